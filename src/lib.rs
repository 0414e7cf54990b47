//! xmlsimple - XML documents as generic, case-insensitive containers
//!
//! Converts a well-formed XML document into a tree of [`Value`]s: plain
//! strings for text-only leaves, [`Sequence`]s for repeated siblings, and
//! [`Container`]s mirroring elements, with case-insensitive key lookup.
//! [`Options`] controls attribute prefixing, attribute suppression, and
//! sequence folding.
//!
//! # Quick Start
//!
//! ```
//! use xmlsimple::from_str;
//! # fn main() -> Result<(), xmlsimple::Error> {
//! let library = from_str(
//!     r#"<Library Name="Covington"><Address><Street>S1</Street></Address></Library>"#,
//! )?;
//! assert_eq!(library["name"].as_text(), Some("Covington"));
//! assert_eq!(library["Address"]["Street"].as_text(), Some("S1"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod convert;
pub use convert::convert;

pub mod error;
pub use error::{Error, Result};

pub mod input;

pub mod options;
pub use options::{ForceArray, Options};

pub mod value;
pub use value::{Container, Sequence, Value};

use std::io::Read;
use std::path::Path;

/// Convert an XML string with default options.
pub fn from_str(xml: &str) -> Result<Value> {
    from_str_with_options(xml, &Options::default())
}

/// Convert an XML string.
pub fn from_str_with_options(xml: &str, options: &Options) -> Result<Value> {
    let doc = roxmltree::Document::parse(xml)?;
    Ok(convert::convert(&doc, options))
}

/// Convert an XML document drained from a reader with default options.
pub fn from_reader(reader: impl Read) -> Result<Value> {
    from_reader_with_options(reader, &Options::default())
}

/// Convert an XML document drained from a reader.
pub fn from_reader_with_options(reader: impl Read, options: &Options) -> Result<Value> {
    let xml = input::read_to_string(reader)?;
    from_str_with_options(&xml, options)
}

/// Convert an XML file with default options.
pub fn from_file(path: impl AsRef<Path>) -> Result<Value> {
    from_file_with_options(path, &Options::default())
}

/// Convert an XML file.
pub fn from_file_with_options(path: impl AsRef<Path>, options: &Options) -> Result<Value> {
    let xml = input::read_file(path.as_ref())?;
    from_str_with_options(&xml, options)
}

/// Fetch and convert an XML document from a URL with default options.
#[cfg(feature = "http")]
pub fn from_url(url: &str) -> Result<Value> {
    from_url_with_options(url, &Options::default())
}

/// Fetch and convert an XML document from a URL.
#[cfg(feature = "http")]
pub fn from_url_with_options(url: &str, options: &Options) -> Result<Value> {
    let xml = input::fetch_url(url)?;
    from_str_with_options(&xml, options)
}
