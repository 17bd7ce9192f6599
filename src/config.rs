//! Game configuration
//!
//! Stored as JSON. Every field has a default, so a file only needs the
//! values it wants to change.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::util::pack_rgba;

pub const DEFAULT_WIDTH: u32 = 224;
pub const DEFAULT_HEIGHT: u32 = 256;

/// Largest coordinate an entity may sit at; blits take `i32` positions
pub const MAX_COORD: u32 = i32::MAX as u32;

/// Upper bound on rows * cols
pub const MAX_FORMATION_ALIENS: u64 = 1 << 16;

/// Alien grid placement: alien (row, col) sits at
/// `(origin_x + spacing_x * col, origin_y + spacing_y * row)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormationConfig {
    pub rows: u32,
    pub cols: u32,
    pub spacing_x: u32,
    pub spacing_y: u32,
    pub origin_x: u32,
    pub origin_y: u32,
}

impl FormationConfig {
    /// Alien (row, col) position, `None` if it overflows or passes `MAX_COORD`
    pub fn position(&self, row: u32, col: u32) -> Option<(u32, u32)> {
        let x = self.spacing_x.checked_mul(col)?.checked_add(self.origin_x)?;
        let y = self.spacing_y.checked_mul(row)?.checked_add(self.origin_y)?;
        (x <= MAX_COORD && y <= MAX_COORD).then_some((x, y))
    }

    pub fn alien_count(&self) -> u64 {
        self.rows as u64 * self.cols as u64
    }

    pub fn validate(&self) -> Result<()> {
        if self.alien_count() > MAX_FORMATION_ALIENS {
            return Err(Error::Config(format!(
                "formation of {}x{} exceeds {} aliens",
                self.rows, self.cols, MAX_FORMATION_ALIENS
            )));
        }
        // Positions grow with row and col, so the far corner bounds them all
        if self.rows > 0
            && self.cols > 0
            && self.position(self.rows - 1, self.cols - 1).is_none()
        {
            return Err(Error::Config(format!(
                "formation reaches past coordinate {}",
                MAX_COORD
            )));
        }
        Ok(())
    }
}

impl Default for FormationConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 11,
            spacing_x: 16,
            spacing_y: 17,
            origin_x: 20,
            origin_y: 128,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub x: u32,
    pub y: u32,
    pub life: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            x: 107,
            y: 32,
            life: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Ticks each alien pose stays on screen
    pub frame_duration: u32,
    pub looping: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_duration: 10,
            looping: true,
        }
    }
}

/// Colours as (r, g, b); alpha is always opaque
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub background: (u8, u8, u8),
    pub alien: (u8, u8, u8),
    pub player: (u8, u8, u8),
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            background: (0, 128, 0),
            alien: (128, 0, 0),
            player: (128, 0, 0),
        }
    }
}

/// Packed colours ready for the pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: u32,
    pub alien: u32,
    pub player: u32,
}

impl From<&PaletteConfig> for Palette {
    fn from(cfg: &PaletteConfig) -> Self {
        let pack = |(r, g, b): (u8, u8, u8)| pack_rgba(r, g, b);
        Self {
            background: pack(cfg.background),
            alien: pack(cfg.alien),
            player: pack(cfg.player),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from(&PaletteConfig::default())
    }
}

/// Presentation window; the buffer is scaled to fill it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Space Invaders 1978".to_string(),
            width: 640,
            height: 480,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    pub formation: FormationConfig,
    pub player: PlayerConfig,
    pub animation: AnimationConfig,
    pub palette: PaletteConfig,
    pub window: WindowConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            formation: FormationConfig::default(),
            player: PlayerConfig::default(),
            animation: AnimationConfig::default(),
            palette: PaletteConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

impl GameConfig {
    /// Reject settings the session cannot be built from
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimension {
                what: "arena",
                width: self.width,
                height: self.height,
            });
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(Error::InvalidDimension {
                what: "window",
                width: self.window.width,
                height: self.window.height,
            });
        }
        if self.animation.frame_duration == 0 {
            return Err(Error::Config("animation.frame_duration must be at least 1".to_string()));
        }
        if self.player.x > MAX_COORD || self.player.y > MAX_COORD {
            return Err(Error::Config(format!(
                "player position ({}, {}) reaches past coordinate {}",
                self.player.x, self.player.y, MAX_COORD
            )));
        }
        self.formation.validate()
    }

    pub fn palette(&self) -> Palette {
        Palette::from(&self.palette)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        debug!("saved config to {}", path.display());
        Ok(())
    }
}
