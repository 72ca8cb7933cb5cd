//! Plugin header reader.
//!
//! Plugin metadata lives in a comment block at the top of the main file:
//!
//! ```text
//! <?php
//! /**
//!  * Plugin Name: wpkickstart
//!  * Version:     2.0.0
//!  */
//! ```
//!
//! Only the first 8 KiB are read. A header line may be prefixed by any mix of
//! spaces, tabs, `/`, `*`, `#` and `@`; the name is matched
//! case-insensitively and the value stops at a closing `*/` or `?>`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, instrument};

use kickstart_core::{
    application::ports::HeaderReader,
    domain::{PLUGIN_HEADER_KEYS, PluginHeaders},
    error::KickstartResult,
};

use crate::error::AdapterError;

/// Bytes scanned for headers.
pub const HEADER_SCAN_BYTES: u64 = 8 * 1024;

/// Reads headers straight from disk.
#[derive(Debug, Clone)]
pub struct FileHeaderReader {
    keys: Vec<String>,
}

impl FileHeaderReader {
    /// Reader for the standard plugin header keys.
    pub fn new() -> Self {
        Self::with_keys(PLUGIN_HEADER_KEYS.iter().copied())
    }

    pub fn with_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for FileHeaderReader {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderReader for FileHeaderReader {
    #[instrument(skip(self), fields(path = %plugin_file.display()))]
    fn read_headers(&self, plugin_file: &Path) -> KickstartResult<PluginHeaders> {
        let file = File::open(plugin_file).map_err(|e| AdapterError::io("open", plugin_file, e))?;

        let mut buf = Vec::new();
        file.take(HEADER_SCAN_BYTES)
            .read_to_end(&mut buf)
            .map_err(|e| AdapterError::io("read headers", plugin_file, e))?;

        let text = String::from_utf8_lossy(&buf).replace('\r', "\n");
        let headers = parse_headers(&text, &self.keys);
        debug!(found = headers.len(), "Read plugin headers");
        Ok(headers)
    }
}

/// Extract `keys` from `text`. Absent keys map to `""`.
pub fn parse_headers(text: &str, keys: &[String]) -> PluginHeaders {
    keys.iter()
        .map(|key| {
            let value = text
                .lines()
                .find_map(|line| header_line_value(line, key))
                .unwrap_or_default();
            (key.clone(), value)
        })
        .collect()
}

fn header_line_value(line: &str, key: &str) -> Option<String> {
    let body = line.trim_start_matches([' ', '\t', '/', '*', '#', '@']);

    let name = body.get(..key.len())?;
    if !name.eq_ignore_ascii_case(key) {
        return None;
    }

    let value = body[key.len()..].strip_prefix(':')?;
    Some(cleanup_comment(value))
}

fn cleanup_comment(value: &str) -> String {
    let end = [value.find("*/"), value.find("?>")]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(value.len());
    value[..end].trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const PLUGIN: &str = "<?php\n\
/**\n \
* Plugin Name: wpkickstart\n \
* Description: A plugin scaffold.\n \
* Version:     2.0.0\n \
* Author:      Aubrey Portwood\n \
* Text Domain: wpkickstart\n \
*/\n";

    fn keys() -> Vec<String> {
        PLUGIN_HEADER_KEYS.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn parses_docblock_headers() {
        let headers = parse_headers(PLUGIN, &keys());
        assert_eq!(headers["Plugin Name"], "wpkickstart");
        assert_eq!(headers["Version"], "2.0.0");
        assert_eq!(headers["Text Domain"], "wpkickstart");
        assert_eq!(headers["License"], "");
    }

    #[test]
    fn name_match_is_case_insensitive() {
        let headers = parse_headers("# version: 1.2.3\n", &keys());
        assert_eq!(headers["Version"], "1.2.3");
    }

    #[test]
    fn closing_comment_is_trimmed() {
        let headers = parse_headers("/* Version: 3.0 */\n", &keys());
        assert_eq!(headers["Version"], "3.0");
        let headers = parse_headers("// Author: Someone ?>\n", &keys());
        assert_eq!(headers["Author"], "Someone");
    }

    #[test]
    fn author_uri_does_not_shadow_author() {
        let text = " * Author URI: https://example.test\n * Author: Someone\n";
        let headers = parse_headers(text, &keys());
        assert_eq!(headers["Author"], "Someone");
        assert_eq!(headers["Author URI"], "https://example.test");
    }

    #[test]
    fn reads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(PLUGIN.replace('\n', "\r\n").as_bytes()).unwrap();

        let headers = FileHeaderReader::new().read_headers(file.path()).unwrap();
        assert_eq!(headers["Version"], "2.0.0");
    }

    #[test]
    fn missing_file_is_error() {
        let result = FileHeaderReader::new().read_headers(Path::new("/definitely/not/here.php"));
        assert!(result.is_err());
    }
}
