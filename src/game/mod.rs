//! Game entities and the per-tick movement rule
//!
//! Entities are plain data. `GameState` owns them and knows how to lay out
//! the alien formation and bounce the player between the arena walls.

mod session;

pub use session::{render_frame, Session, SessionSummary};

use log::debug;

use crate::config::FormationConfig;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alien {
    /// Bottom-left anchor in buffer coordinates
    pub x: u32,
    pub y: u32,
    /// Sprite variant; every alien currently shares one animation
    pub kind: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub x: u32,
    pub y: u32,
    /// Tracked but nothing decrements it yet
    pub life: u32,
}

/// Horizontal travel direction of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub fn step(self) -> i64 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Where alien (row, col) sits in a formation, `None` when out of range
pub fn formation_position(formation: &FormationConfig, row: u32, col: u32) -> Option<(u32, u32)> {
    formation.position(row, col)
}

/// Every alien of a formation, row-major (`index = row * cols + col`)
pub fn layout_formation(formation: &FormationConfig) -> Result<Vec<Alien>> {
    formation.validate()?;
    let mut aliens = Vec::with_capacity(formation.alien_count() as usize);
    for row in 0..formation.rows {
        for col in 0..formation.cols {
            let (x, y) = formation_position(formation, row, col).ok_or_else(|| {
                Error::Config(format!("alien ({row}, {col}) is out of coordinate range"))
            })?;
            aliens.push(Alien { x, y, kind: 0 });
        }
    }
    Ok(aliens)
}

/// Everything that moves in one game session
#[derive(Debug, Clone)]
pub struct GameState {
    width: u32,
    height: u32,
    aliens: Vec<Alien>,
    cols: u32,
    player: Player,
    player_dir: Direction,
}

impl GameState {
    pub fn new(width: u32, height: u32, formation: &FormationConfig, player: Player) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension {
                what: "arena",
                width,
                height,
            });
        }
        Ok(Self {
            width,
            height,
            aliens: layout_formation(formation)?,
            cols: formation.cols,
            player,
            player_dir: Direction::Right,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aliens(&self) -> &[Alien] {
        &self.aliens
    }

    pub fn alien_at(&self, row: u32, col: u32) -> Option<&Alien> {
        if col >= self.cols {
            return None;
        }
        let index = row.checked_mul(self.cols)?.checked_add(col)?;
        self.aliens.get(index as usize)
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn player_dir(&self) -> Direction {
        self.player_dir
    }

    pub fn set_player_dir(&mut self, dir: Direction) {
        self.player_dir = dir;
    }

    /// Move the player one pixel, reversing at the arena walls
    ///
    /// `sprite_width` is the player sprite's width. Returns true when the
    /// direction flipped this tick.
    pub fn move_player(&mut self, sprite_width: u32) -> bool {
        let x = self.player.x as i64;
        let dir = self.player_dir.step();
        let arena = self.width as i64;
        let sprite = sprite_width as i64;

        let (new_x, bounced) = if x + sprite + dir >= arena - 1 {
            (arena - sprite - dir - 1, true)
        } else if x + dir <= 0 {
            (0, true)
        } else {
            (x + dir, false)
        };

        // An arena narrower than the sprite pins the player at the left wall
        self.player.x = new_x.max(0) as u32;
        if bounced {
            self.player_dir = self.player_dir.reversed();
            debug!(
                "player bounced at x={}, now heading {:?}",
                self.player.x, self.player_dir
            );
        }
        bounced
    }
}
