//! Rendering module: tables, flat text, size-bounded dispatch and images.

mod dispatch;
pub mod images;
mod options;
mod table;
mod text;

pub use dispatch::{Layout, OverflowDispatcher, RenderKind, RenderedText};
pub use images::{collect, present, ImagePage, ImagePages};
pub use options::{RenderOptions, DEFAULT_MAX_LEN, DEFAULT_PASTE_BASE_URL};
pub use table::{
    to_table, FallbackReason, RenderedTable, RowMatrix, TableOutcome, TableRenderer,
};
pub use text::{code_block, flatten, to_flat_text};
