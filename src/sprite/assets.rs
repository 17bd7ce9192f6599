//! Built-in sprite masks
//!
//! Row 0 is the top of the sprite. `1` = lit.

use super::Sprite;
use crate::error::Result;

pub const ALIEN_WIDTH: u32 = 11;
pub const ALIEN_HEIGHT: u32 = 8;
pub const PLAYER_WIDTH: u32 = 11;
pub const PLAYER_HEIGHT: u32 = 7;

#[rustfmt::skip]
const ALIEN_FRAME_0: [u8; 88] = [
    0,0,1,0,0,0,0,0,1,0,0, // ..@.....@..
    0,0,0,1,0,0,0,1,0,0,0, // ...@...@...
    0,0,1,1,1,1,1,1,1,0,0, // ..@@@@@@@..
    0,1,1,0,1,1,1,0,1,1,0, // .@@.@@@.@@.
    1,1,1,1,1,1,1,1,1,1,1, // @@@@@@@@@@@
    1,0,1,1,1,1,1,1,1,0,1, // @.@@@@@@@.@
    1,0,1,0,0,0,0,0,1,0,1, // @.@.....@.@
    0,0,0,1,1,0,1,1,0,0,0, // ...@@.@@...
];

#[rustfmt::skip]
const ALIEN_FRAME_1: [u8; 88] = [
    0,0,1,0,0,0,0,0,1,0,0, // ..@.....@..
    1,0,0,1,0,0,0,1,0,0,1, // @..@...@..@
    1,0,1,1,1,1,1,1,1,0,1, // @.@@@@@@@.@
    1,1,1,0,1,1,1,0,1,1,1, // @@@.@@@.@@@
    1,1,1,1,1,1,1,1,1,1,1, // @@@@@@@@@@@
    0,1,1,1,1,1,1,1,1,1,0, // .@@@@@@@@@.
    0,0,1,0,0,0,0,0,1,0,0, // ..@.....@..
    0,1,0,0,0,0,0,0,0,1,0, // .@.......@.
];

#[rustfmt::skip]
const PLAYER: [u8; 77] = [
    0,0,0,0,0,1,0,0,0,0,0, // .....@.....
    0,0,0,0,1,1,1,0,0,0,0, // ....@@@....
    0,0,0,0,1,1,1,0,0,0,0, // ....@@@....
    0,1,1,1,1,1,1,1,1,1,0, // .@@@@@@@@@.
    1,1,1,1,1,1,1,1,1,1,1, // @@@@@@@@@@@
    1,1,1,1,1,1,1,1,1,1,1, // @@@@@@@@@@@
    1,1,1,1,1,1,1,1,1,1,1, // @@@@@@@@@@@
];

/// The two alternating alien poses
pub fn alien_frames() -> Result<[Sprite; 2]> {
    Ok([
        Sprite::from_slice(ALIEN_WIDTH, ALIEN_HEIGHT, &ALIEN_FRAME_0)?,
        Sprite::from_slice(ALIEN_WIDTH, ALIEN_HEIGHT, &ALIEN_FRAME_1)?,
    ])
}

pub fn player() -> Result<Sprite> {
    Sprite::from_slice(PLAYER_WIDTH, PLAYER_HEIGHT, &PLAYER)
}
