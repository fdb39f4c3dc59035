use serde::{Deserialize, Serialize};
use super::properties::{ItemKind, Rarity};

/// The blueprint for an item
///
/// Definitions live in the `ItemRegistry`; every drop is an `Item` copied
/// from one, so adjusting a drop never touches the pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Display name (also the identifier)
    pub name: String,

    /// Description shown in tooltips
    pub desc: String,

    pub kind: ItemKind,

    pub rarity: Rarity,

    /// Column in the item sprite sheet, used to pick an icon color
    pub img_index: u32,

    /// Heal amount for potions
    pub hp: i32,

    /// Max hp bonus for equips
    pub mhp: i32,

    /// Damage bonus for equips
    pub dmg: i32,

    /// Accuracy bonus (percent) for equips
    pub acc: i32,

    /// Gold received when sold
    pub sell: i32,
}

impl ItemDefinition {
    pub fn potion(name: impl Into<String>, desc: impl Into<String>, rarity: Rarity, img_index: u32, hp: i32, sell: i32) -> Self {
        ItemDefinition {
            name: name.into(),
            desc: desc.into(),
            kind: ItemKind::Potion,
            rarity,
            img_index,
            hp,
            mhp: 0,
            dmg: 0,
            acc: 0,
            sell,
        }
    }

    pub fn misc(name: impl Into<String>, desc: impl Into<String>, rarity: Rarity, img_index: u32, sell: i32) -> Self {
        ItemDefinition {
            name: name.into(),
            desc: desc.into(),
            kind: ItemKind::Misc,
            rarity,
            img_index,
            hp: 0,
            mhp: 0,
            dmg: 0,
            acc: 0,
            sell,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn equip(
        name: impl Into<String>,
        desc: impl Into<String>,
        kind: ItemKind,
        rarity: Rarity,
        img_index: u32,
        mhp: i32,
        dmg: i32,
        acc: i32,
        sell: i32,
    ) -> Self {
        ItemDefinition {
            name: name.into(),
            desc: desc.into(),
            kind,
            rarity,
            img_index,
            hp: 0,
            mhp,
            dmg,
            acc,
            sell,
        }
    }
}

/// One entry of `items.json` as written on disk
///
/// Potions carry `hp`, misc items only `sell`, equips `mhp`/`dmg`/`acc`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawItem {
    pub name: String,
    pub desc: String,
    #[serde(rename = "type")]
    pub kind: i32,
    #[serde(default)]
    pub img_index: u32,
    #[serde(default)]
    pub hp: i32,
    #[serde(default)]
    pub mhp: i32,
    #[serde(default)]
    pub dmg: i32,
    #[serde(default)]
    pub acc: i32,
    #[serde(default)]
    pub sell: i32,
}

impl RawItem {
    /// Builds a definition, or `None` for an unknown type code
    pub fn into_definition(self, rarity: Rarity) -> Option<ItemDefinition> {
        let kind = ItemKind::from_code(self.kind)?;
        Some(match kind {
            ItemKind::Potion => ItemDefinition::potion(self.name, self.desc, rarity, self.img_index, self.hp, self.sell),
            ItemKind::Misc => ItemDefinition::misc(self.name, self.desc, rarity, self.img_index, self.sell),
            ItemKind::Equip(_) => ItemDefinition::equip(
                self.name, self.desc, kind, rarity, self.img_index, self.mhp, self.dmg, self.acc, self.sell,
            ),
        })
    }
}
