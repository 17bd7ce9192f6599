mod pixel_buffer;
#[cfg(feature = "sdl")]
mod window;

pub use pixel_buffer::PixelBuffer;
#[cfg(feature = "sdl")]
pub use window::{Display, InputEvent, RenderTarget};
