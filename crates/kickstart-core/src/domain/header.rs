//! Plugin header metadata.
//!
//! Headers are free-form `Name: value` pairs read from the plugin's main file
//! by a [`crate::application::ports::HeaderReader`]. The core only stores and
//! looks them up.

use std::collections::BTreeMap;

/// Header name → value.
pub type PluginHeaders = BTreeMap<String, String>;

/// Header names read from the plugin file.
pub const PLUGIN_HEADER_KEYS: &[&str] = &[
    "Plugin Name",
    "Description",
    "Version",
    "Author",
    "Author URI",
    "Text Domain",
    "Network",
    "License",
    "License URI",
];

/// Trimmed header value, or `""` when absent.
pub fn header_value<'a>(headers: &'a PluginHeaders, name: &str) -> &'a str {
    headers.get(name).map(|v| v.trim()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_header_is_empty() {
        let headers = PluginHeaders::new();
        assert_eq!(header_value(&headers, "Version"), "");
    }

    #[test]
    fn value_is_trimmed() {
        let mut headers = PluginHeaders::new();
        headers.insert("Version".into(), "  2.0.0 ".into());
        assert_eq!(header_value(&headers, "Version"), "2.0.0");
    }
}
