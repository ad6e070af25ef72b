use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Supported on-disk encodings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Yaml,
    Toml,
}

impl Format {
    /// Pick a format from a resource name's extension.
    ///
    /// `.yaml`/`.yml` select YAML, `.toml` selects TOML, and everything else,
    /// including names with no extension and etcd keys, selects JSON.
    pub fn from_name(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("toml") => Self::Toml,
            _ => Self::Json,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_selects_format() {
        assert_eq!(Format::from_name("config.yaml"), Format::Yaml);
        assert_eq!(Format::from_name("/etc/app/config.YML"), Format::Yaml);
        assert_eq!(Format::from_name("config.toml"), Format::Toml);
        assert_eq!(Format::from_name("config.json"), Format::Json);
    }

    #[test]
    fn unknown_or_missing_extension_is_json() {
        assert_eq!(Format::from_name("config"), Format::Json);
        assert_eq!(Format::from_name("config.conf"), Format::Json);
        assert_eq!(Format::from_name("/config/app/settings"), Format::Json);
        assert_eq!(Format::from_name(""), Format::Json);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(Format::Toml.to_string(), "toml");
        assert_eq!(Format::default(), Format::Json);
    }
}
