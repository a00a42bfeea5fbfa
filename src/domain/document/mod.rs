//! Document module - the generated Term of Reference and its markup.

mod block;
mod generated;
mod jurisdiction;
mod outline;

pub use block::{Alignment, Block, Column, HeadingLevel, Table};
pub use generated::GeneratedDocument;
pub use jurisdiction::{
    parse_reference_date, Jurisdiction, DEFAULT_MUNICIPALITY, LAW_FILE_TAG, LAW_REFERENCE,
};
pub use outline::{classify_line, parse_outline, OutlineItem};
