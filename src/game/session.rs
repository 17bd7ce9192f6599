//! One running game: buffer, entities and the alien animation clock.
//!
//! `tick()` is the whole per-frame sequence. Presenting the returned buffer
//! is left to the caller (a window, or nothing at all when headless).

use std::rc::Rc;

use log::{debug, info, warn};

use super::{GameState, Player};
use crate::config::{GameConfig, Palette};
use crate::display::PixelBuffer;
use crate::error::{Error, Result};
use crate::sprite::{assets, Sprite, SpriteAnimation};

/// Blit at an entity anchor; anchors past `i32::MAX` lie outside any buffer
fn blit_at(buffer: &mut PixelBuffer, sprite: &Sprite, x: u32, y: u32, color: u32) {
    if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
        buffer.blit_sprite(sprite, x, y, color);
    }
}

/// Clear the buffer, then draw aliens and finally the player on top
///
/// Returns `Ok(false)` when the alien animation has finished and the aliens
/// were left out of the frame.
pub fn render_frame(
    buffer: &mut PixelBuffer,
    state: &GameState,
    alien_animation: &SpriteAnimation,
    player_sprite: &Sprite,
    palette: &Palette,
) -> Result<bool> {
    buffer.clear(palette.background);

    let aliens_drawn = match alien_animation.current_sprite() {
        Ok(sprite) => {
            for alien in state.aliens() {
                blit_at(buffer, sprite, alien.x, alien.y, palette.alien);
            }
            true
        },
        Err(Error::AnimationExhausted) => false,
        Err(e) => return Err(e),
    };

    let player = state.player();
    blit_at(buffer, player_sprite, player.x, player.y, palette.player);
    Ok(aliens_drawn)
}

/// What a session looked like when it was shut down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub ticks: u64,
    pub player: Player,
}

pub struct Session {
    buffer: PixelBuffer,
    state: GameState,
    alien_animation: SpriteAnimation,
    player_sprite: Rc<Sprite>,
    palette: Palette,
    ticks: u64,
    warned_exhausted: bool,
}

impl Session {
    /// Build a session with the built-in sprites
    pub fn new(config: &GameConfig) -> Result<Self> {
        config.validate()?;

        let frames = Vec::from(assets::alien_frames()?.map(Rc::new));
        let alien_animation = SpriteAnimation::new(
            frames,
            config.animation.frame_duration,
            config.animation.looping,
        )?;
        let player = Player {
            x: config.player.x,
            y: config.player.y,
            life: config.player.life,
        };
        let state = GameState::new(config.width, config.height, &config.formation, player)?;

        let session = Self::with_parts(
            PixelBuffer::with_size(config.width, config.height)?,
            state,
            alien_animation,
            Rc::new(assets::player()?),
            config.palette(),
        );
        info!(
            "session started: {}x{} arena, {} aliens, player at ({}, {})",
            config.width,
            config.height,
            session.state.aliens().len(),
            player.x,
            player.y
        );
        Ok(session)
    }

    /// Assemble a session from already-built pieces (custom sprites, tests)
    pub fn with_parts(
        buffer: PixelBuffer,
        state: GameState,
        alien_animation: SpriteAnimation,
        player_sprite: Rc<Sprite>,
        palette: Palette,
    ) -> Self {
        Self {
            buffer,
            state,
            alien_animation,
            player_sprite,
            palette,
            ticks: 0,
            warned_exhausted: false,
        }
    }

    /// Advance the animation, draw the frame, then move the player
    pub fn tick(&mut self) -> Result<&PixelBuffer> {
        self.alien_animation.advance();

        let aliens_drawn = render_frame(
            &mut self.buffer,
            &self.state,
            &self.alien_animation,
            &self.player_sprite,
            &self.palette,
        )?;
        if !aliens_drawn && !self.warned_exhausted {
            warn!("alien animation finished; aliens are no longer drawn");
            self.warned_exhausted = true;
        }

        self.state.move_player(self.player_sprite.width());
        self.ticks += 1;
        Ok(&self.buffer)
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn animation(&self) -> &SpriteAnimation {
        &self.alien_animation
    }

    pub fn player_sprite(&self) -> &Sprite {
        &self.player_sprite
    }

    /// Tear the session down, releasing sprites, animation and entities
    pub fn shutdown(mut self) -> SessionSummary {
        self.alien_animation.release();
        let summary = SessionSummary {
            ticks: self.ticks,
            player: *self.state.player(),
        };
        debug!("session storage released");
        info!(
            "session ended after {} ticks, player at ({}, {})",
            summary.ticks, summary.player.x, summary.player.y
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PaletteConfig;
    use crate::game::Direction;
    use crate::sprite::assets::{ALIEN_HEIGHT, PLAYER_WIDTH};

    fn distinct_palette() -> GameConfig {
        GameConfig {
            palette: PaletteConfig {
                background: (0, 128, 0),
                alien: (128, 0, 0),
                player: (0, 0, 200),
            },
            ..GameConfig::default()
        }
    }

    /// Bounce rule applied by hand, for predicting positions
    fn predict_x(mut x: i64, mut dir: i64, ticks: u32, arena: i64, sprite: i64) -> i64 {
        for _ in 0..ticks {
            if x + sprite + dir >= arena - 1 {
                x = arena - sprite - dir - 1;
                dir = -dir;
            } else if x + dir <= 0 {
                x = 0;
                dir = -dir;
            } else {
                x += dir;
            }
        }
        x
    }

    #[test]
    fn test_thirty_tick_scenario() {
        let mut session = Session::new(&GameConfig::default()).unwrap();
        assert_eq!(session.buffer().width(), 224);
        assert_eq!(session.buffer().height(), 256);
        assert_eq!(session.state().aliens().len(), 55);

        for _ in 0..30 {
            session.tick().unwrap();
        }

        let expected = predict_x(107, 1, 30, 224, PLAYER_WIDTH as i64);
        assert_eq!(expected, 137);
        assert_eq!(session.state().player().x as i64, expected);
        assert_eq!(session.animation().current_frame_index(), Some((30 / 10) % 2));
        assert_eq!(session.tick_count(), 30);
    }

    #[test]
    fn test_player_drawn_before_moving() {
        let config = distinct_palette();
        let palette = config.palette();
        let mut session = Session::new(&config).unwrap();
        let buffer = session.tick().unwrap();

        // Bottom row of the player sprite is solid, drawn at the pre-move x
        for x in 107..118 {
            assert_eq!(buffer.get_pixel(x, 32), Some(palette.player));
        }
        assert_eq!(buffer.get_pixel(106, 32), Some(palette.background));
        assert_eq!(buffer.get_pixel(118, 32), Some(palette.background));
        assert_eq!(session.state().player().x, 108);
    }

    #[test]
    fn test_aliens_follow_animation_frame() {
        let config = distinct_palette();
        let palette = config.palette();
        let mut session = Session::new(&config).unwrap();

        // Frame 0 bottom row is "...@@.@@..."
        let buffer = session.tick().unwrap();
        assert_eq!(buffer.get_pixel(23, 128), Some(palette.alien));
        assert_eq!(buffer.get_pixel(21, 128), Some(palette.background));

        // Frame 1 bottom row is ".@.......@."
        for _ in 0..9 {
            session.tick().unwrap();
        }
        assert_eq!(session.animation().current_frame_index(), Some(1));
        let buffer = session.buffer();
        assert_eq!(buffer.get_pixel(21, 128), Some(palette.alien));
        assert_eq!(buffer.get_pixel(23, 128), Some(palette.background));
        // Top row of alien (0, 0) is at y = 128 + 8 - 1
        let top = 128 + ALIEN_HEIGHT as i32 - 1;
        assert_eq!(buffer.get_pixel(22, top), Some(palette.alien));
    }

    #[test]
    fn test_player_drawn_over_aliens() {
        let config = distinct_palette();
        let palette = config.palette();
        let mut session = Session::new(&config).unwrap();
        {
            let player = session.state_mut().player_mut();
            player.x = 20;
            player.y = 128;
        }
        session.state_mut().set_player_dir(Direction::Right);
        let buffer = session.tick().unwrap();
        // Player bottom row is solid and covers the alien's bottom row
        assert_eq!(buffer.get_pixel(23, 128), Some(palette.player));
    }

    #[test]
    fn test_one_shot_animation_stops_drawing_aliens() {
        let mut config = distinct_palette();
        config.animation.looping = false;
        let palette = config.palette();
        let mut session = Session::new(&config).unwrap();
        for _ in 0..20 {
            session.tick().unwrap();
        }
        assert!(session.animation().finished());
        let alien_pixels = session
            .buffer()
            .pixels()
            .iter()
            .filter(|&&p| p == palette.alien)
            .count();
        assert_eq!(alien_pixels, 0);
        // The player keeps moving
        assert_eq!(session.state().player().x, 127);
    }

    #[test]
    fn test_render_frame_is_repeatable() {
        let session = Session::new(&GameConfig::default()).unwrap();
        let mut a = PixelBuffer::with_size(224, 256).unwrap();
        let mut b = PixelBuffer::with_size(224, 256).unwrap();
        b.clear(0xDEAD_BEEF);
        for buffer in [&mut a, &mut b] {
            render_frame(
                buffer,
                session.state(),
                session.animation(),
                session.player_sprite(),
                &Palette::default(),
            )
            .unwrap();
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_positions_past_i32_are_not_wrapped() {
        let config = distinct_palette();
        let palette = config.palette();
        let mut session = Session::new(&config).unwrap();
        session.state_mut().player_mut().x = u32::MAX;
        let mut buffer = PixelBuffer::with_size(224, 256).unwrap();
        render_frame(
            &mut buffer,
            session.state(),
            session.animation(),
            session.player_sprite(),
            &palette,
        )
        .unwrap();
        // Wrapping would have put the ship at x = -1, touching column 0
        assert!(!buffer.pixels().contains(&palette.player));
    }

    #[test]
    fn test_exhausted_animation_reported_as_skipped() {
        let session = Session::new(&GameConfig::default()).unwrap();
        let mut animation = session.animation().clone();
        animation.release();
        let mut buffer = PixelBuffer::with_size(224, 256).unwrap();
        let drawn = render_frame(
            &mut buffer,
            session.state(),
            &animation,
            session.player_sprite(),
            &Palette::default(),
        )
        .unwrap();
        assert!(!drawn);
    }

    #[test]
    fn test_shutdown_summary() {
        let mut session = Session::new(&GameConfig::default()).unwrap();
        session.tick().unwrap();
        session.tick().unwrap();
        let summary = session.shutdown();
        assert_eq!(summary.ticks, 2);
        assert_eq!(summary.player.x, 109);
        assert_eq!(summary.player.life, 3);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig {
            width: 0,
            ..GameConfig::default()
        };
        assert!(Session::new(&config).is_err());
    }
}
