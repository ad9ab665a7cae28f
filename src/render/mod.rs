//! Render module: what the screen shows and how it is painted.
//!
//! This module contains:
//! - [`Frame`]: text lines as highlight runs, plus status and message bars
//! - [`FrameRenderer`]: paints a frame into ANSI bytes
//! - [`Palette`] and [`Rgb`]: the foreground color of each highlight tag

mod frame;
mod painter;
mod style;

pub use frame::{Frame, FrameLine, Run};
pub use painter::FrameRenderer;
pub use style::{Palette, Rgb};
