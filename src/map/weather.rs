use serde::{Deserialize, Serialize};

use crate::rng::GameRng;

/// Horizontal drift of raindrops and snowflakes (logical pixels / second)
pub const RAINDROP_X: f32 = -24.0;
pub const SNOWFLAKE_X: f32 = -12.0;

/// Seconds of thunderstorm between lightning strikes
pub const LIGHTNING_INTERVAL: f32 = 7.0;
/// Seconds a lightning flash lasts
pub const LIGHTNING_DURATION: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Weather {
    #[default]
    Normal,
    Rain,
    HeavyRain,
    Thunderstorm,
    Snow,
    Blizzard,
}

impl Weather {
    pub fn from_id(id: i32) -> Option<Weather> {
        match id {
            0 => Some(Weather::Normal),
            1 => Some(Weather::Rain),
            2 => Some(Weather::HeavyRain),
            3 => Some(Weather::Thunderstorm),
            4 => Some(Weather::Snow),
            5 => Some(Weather::Blizzard),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Raindrop,
    Snowflake,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub kind: ParticleKind,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

/// Screen-space weather particles that wrap around the viewport
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
    pub width: f32,
    pub height: f32,
}

impl ParticleField {
    pub fn new(width: f32, height: f32) -> Self {
        ParticleField {
            particles: Vec::new(),
            width,
            height,
        }
    }

    /// Replaces the particles to match a weather
    pub fn set(&mut self, weather: Weather, rng: &mut GameRng) {
        let spec = match weather {
            Weather::Normal => None,
            Weather::Rain => Some((ParticleKind::Raindrop, 40, RAINDROP_X, 100.0)),
            Weather::HeavyRain | Weather::Thunderstorm => Some((ParticleKind::Raindrop, 95, RAINDROP_X, 120.0)),
            Weather::Snow => Some((ParticleKind::Snowflake, 100, SNOWFLAKE_X, 60.0)),
            Weather::Blizzard => Some((ParticleKind::Snowflake, 300, SNOWFLAKE_X + 50.0, 80.0)),
        };

        self.particles.clear();
        let Some((kind, count, vx, vy)) = spec else {
            return;
        };
        for _ in 0..count {
            // Per-particle speed jitter
            let speed = rng.uniform_f32(0.7, 1.3);
            self.particles.push(Particle {
                kind,
                x: rng.uniform_f32(0.0, self.width),
                y: rng.uniform_f32(0.0, self.height),
                vx: vx * speed,
                vy: vy * speed,
            });
        }
    }

    pub fn update(&mut self, dt: f32) {
        let (w, h) = (self.width, self.height);
        for p in &mut self.particles {
            p.x = wrap(p.x + p.vx * dt, w);
            p.y = wrap(p.y + p.vy * dt, h);
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

fn wrap(value: f32, size: f32) -> f32 {
    let size = size.max(1.0);
    let wrapped = value.rem_euclid(size);
    if wrapped >= size { 0.0 } else { wrapped }
}

/// Thunderstorm lightning timer
#[derive(Debug, Clone, Copy, Default)]
pub struct Lightning {
    elapsed: f32,
    flash: f32,
}

impl Lightning {
    pub fn update(&mut self, dt: f32) {
        if self.elapsed < LIGHTNING_INTERVAL {
            self.elapsed += dt;
            return;
        }
        self.flash += dt;
        if self.flash > LIGHTNING_DURATION {
            self.elapsed = 0.0;
            self.flash = 0.0;
        }
    }

    /// True while the screen should be lit white
    pub fn is_flashing(&self) -> bool {
        self.elapsed >= LIGHTNING_INTERVAL && self.flash < LIGHTNING_DURATION
    }

    pub fn reset(&mut self) {
        *self = Lightning::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_counts() {
        let mut rng = GameRng::new(1);
        let mut field = ParticleField::new(400.0, 240.0);
        let expected = [
            (Weather::Normal, 0),
            (Weather::Rain, 40),
            (Weather::HeavyRain, 95),
            (Weather::Thunderstorm, 95),
            (Weather::Snow, 100),
            (Weather::Blizzard, 300),
        ];
        for (weather, count) in expected {
            field.set(weather, &mut rng);
            assert_eq!(field.len(), count, "{weather:?}");
        }
    }

    #[test]
    fn test_particles_wrap() {
        let mut rng = GameRng::new(2);
        let mut field = ParticleField::new(100.0, 50.0);
        field.set(Weather::Blizzard, &mut rng);
        for _ in 0..100 {
            field.update(0.1);
        }
        for p in &field.particles {
            assert!((0.0..100.0).contains(&p.x));
            assert!((0.0..50.0).contains(&p.y));
        }
    }

    #[test]
    fn test_lightning_cycle() {
        let mut lightning = Lightning::default();
        lightning.update(6.9);
        assert!(!lightning.is_flashing());
        lightning.update(0.2);
        assert!(lightning.is_flashing());
        lightning.update(0.1);
        assert!(lightning.is_flashing());
        lightning.update(0.15);
        assert!(!lightning.is_flashing());
    }

    #[test]
    fn test_weather_ids() {
        assert_eq!(Weather::from_id(3), Some(Weather::Thunderstorm));
        assert_eq!(Weather::from_id(6), None);
    }
}
