use super::Screen;
use super::selector::Selector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuOption {
    Play,
    SpecialMoves,
    Statistics,
    Quit,
}

impl MainMenuOption {
    pub const ALL: [MainMenuOption; 4] = [
        MainMenuOption::Play,
        MainMenuOption::SpecialMoves,
        MainMenuOption::Statistics,
        MainMenuOption::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MainMenuOption::Play => "PLAY",
            MainMenuOption::SpecialMoves => "SPECIAL MOVES",
            MainMenuOption::Statistics => "STATISTICS",
            MainMenuOption::Quit => "QUIT",
        }
    }

    /// Screen the option leads to
    pub fn target(self) -> Screen {
        match self {
            MainMenuOption::Play => Screen::WorldSelect,
            MainMenuOption::SpecialMoves => Screen::SpecialMoves,
            MainMenuOption::Statistics => Screen::Statistics,
            MainMenuOption::Quit => Screen::Quit,
        }
    }
}

/// Title screen menu
#[derive(Debug, Clone)]
pub struct MainMenu {
    selector: Selector,
}

impl Default for MainMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl MainMenu {
    pub fn new() -> Self {
        MainMenu { selector: Selector::new(MainMenuOption::ALL.len()) }
    }

    pub fn select_previous(&mut self) {
        self.selector.select_previous();
    }

    pub fn select_next(&mut self) {
        self.selector.select_next();
    }

    pub fn selected_index(&self) -> usize {
        self.selector.index()
    }

    pub fn selected(&self) -> MainMenuOption {
        MainMenuOption::ALL[self.selector.index()]
    }

    pub fn confirm(&self) -> Screen {
        self.selected().target()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_wraps_to_quit() {
        let mut menu = MainMenu::new();
        assert_eq!(menu.confirm(), Screen::WorldSelect);
        menu.select_previous();
        assert_eq!(menu.selected(), MainMenuOption::Quit);
        assert_eq!(menu.confirm(), Screen::Quit);
        menu.select_next();
        menu.select_next();
        assert_eq!(menu.selected(), MainMenuOption::SpecialMoves);
    }
}
