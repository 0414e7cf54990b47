//! Input collaborators feeding the conversion entry points
//!
//! Loading and fetching happen before the engine runs; the engine itself
//! only ever sees a parsed tree.

use std::fs;
use std::io::Read;
use std::path::Path;

#[cfg(feature = "http")]
use std::time::Duration;

use crate::error::Result;

/// HTTP timeout for document fetches (seconds).
#[cfg(feature = "http")]
const HTTP_TIMEOUT_SECS: u64 = 30;

/// User agent string identifying this library.
#[cfg(feature = "http")]
const USER_AGENT: &str = concat!("xmlsimple/", env!("CARGO_PKG_VERSION"));

/// Read a whole XML document from a file.
pub fn read_file(path: &Path) -> Result<String> {
    tracing::debug!(path = %path.display(), "reading XML document from file");
    Ok(fs::read_to_string(path)?)
}

/// Drain a reader into the XML document text.
pub fn read_to_string(mut reader: impl Read) -> Result<String> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(text)
}

/// Fetch an XML document over HTTP.
///
/// One attempt, no retries: a failed fetch fails the whole conversion.
#[cfg(feature = "http")]
pub fn fetch_url(url: &str) -> Result<String> {
    tracing::debug!(url, "fetching XML document");
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    let response = client.get(url).send()?.error_for_status()?;
    Ok(response.text()?)
}
