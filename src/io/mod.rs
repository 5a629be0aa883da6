//! I/O layer for string-res.
//!
//! Resource discovery, UTF-8 file access, and the XML codec that turns
//! resource files into [`Document`](crate::core::Document) trees and back.

pub mod locator;
pub mod reader;
pub mod xml;

pub use locator::{DEFAULT_FILE_NAME, VALUES_MARKER, locate};
pub use reader::{FileReader, read_file, write_file};
pub use xml::{INDENT, XML_DECLARATION, parse_document, render_document};
