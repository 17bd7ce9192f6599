use std::rc::Rc;

use log::debug;

use super::Sprite;
use crate::error::{Error, Result};

/// Frame-indexed sprite animation driven by a tick counter
///
/// Frames are shared handles; the animation never mutates them. A one-shot
/// (non-looping) animation raises `finished` once its last tick is reached
/// and stops answering `current_sprite` until the owner calls [`release`].
///
/// [`release`]: SpriteAnimation::release
#[derive(Debug, Clone)]
pub struct SpriteAnimation {
    frames: Vec<Rc<Sprite>>,
    frame_duration: u32,
    looping: bool,
    time: u32,
    finished: bool,
}

impl SpriteAnimation {
    pub fn new(frames: Vec<Rc<Sprite>>, frame_duration: u32, looping: bool) -> Result<Self> {
        if frames.is_empty() || frame_duration == 0 {
            return Err(Error::EmptyAnimation);
        }
        Ok(Self {
            frames,
            frame_duration,
            looping,
            time: 0,
            finished: false,
        })
    }

    #[inline]
    pub fn time(&self) -> u32 {
        self.time
    }

    #[inline]
    pub fn frame_duration(&self) -> u32 {
        self.frame_duration
    }

    #[inline]
    pub fn looping(&self) -> bool {
        self.looping
    }

    #[inline]
    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn cycle_length(&self) -> u64 {
        self.frames.len() as u64 * self.frame_duration as u64
    }

    /// Move the clock forward one tick. No-op once finished.
    pub fn advance(&mut self) {
        if self.finished {
            return;
        }
        self.time += 1;
        if self.time as u64 == self.cycle_length() {
            if self.looping {
                self.time = 0;
            } else {
                debug!("one-shot animation finished after {} ticks", self.time);
                self.finished = true;
            }
        }
    }

    /// Index of the frame shown at the current time, `None` once finished
    pub fn current_frame_index(&self) -> Option<usize> {
        if self.finished {
            return None;
        }
        Some((self.time / self.frame_duration) as usize % self.frames.len())
    }

    pub fn current_sprite(&self) -> Result<&Sprite> {
        self.current_frame_index()
            .and_then(|i| self.frames.get(i))
            .map(|frame| &**frame)
            .ok_or(Error::AnimationExhausted)
    }

    /// Drop the frame handles. The animation reports finished from here on.
    pub fn release(&mut self) {
        self.frames.clear();
        self.finished = true;
    }
}
