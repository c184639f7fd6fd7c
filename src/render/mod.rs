//! Rendering module: canvas capability, recording backend, and pagination.

mod canvas;
mod options;
mod paginator;
mod recording;

pub use canvas::{Canvas, Color, FontWeight, Rect};
pub use options::{FontScale, RenderOptions};
pub use paginator::{HeadingEntry, PageWriter};
pub use recording::{DocumentMeta, DrawCommand, RecordedPage, RecordingCanvas};
