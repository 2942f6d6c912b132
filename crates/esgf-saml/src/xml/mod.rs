//! XML document model used by the response parsers.

mod document;

pub use document::{Document, ElementRef};
