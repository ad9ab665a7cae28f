//! Layout module: which part of the buffer is on screen.
//!
//! The screen is split into the text area followed by a status bar and a
//! message bar. [`Viewport`] tracks the text area's size and the scroll
//! offsets into the buffer; the bars are painted by the renderer.

mod viewport;

pub use viewport::Viewport;
