mod export;
mod reconstruct;
mod record;
mod render;

pub use export::{export_to_markdown, ExportError};
pub use reconstruct::{reconstruct, LogicalMessage, Role};
pub use record::{parse_line, Content, ContentBlock, LogRecord, MessageBody};
pub use render::render_markdown;
