//! Software-rendered invaders.
//!
//! A CPU pixel buffer, mask sprites blitted into it, a shared alien
//! animation clock and a player that bounces between the arena walls.
//! Presentation is pluggable: the `sdl` feature adds a window backend,
//! otherwise sessions run headless.

pub mod config;
pub mod display;
pub mod error;
pub mod game;
pub mod sprite;
pub mod util;

pub use config::GameConfig;
pub use display::PixelBuffer;
pub use error::{Error, Result};
pub use game::{GameState, Session};
pub use sprite::{overlaps, Sprite, SpriteAnimation};
