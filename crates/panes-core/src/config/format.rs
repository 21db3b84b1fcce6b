// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Configuration formats and read/write support

#[cfg(feature = "serde")]
use serde::{Serialize, de::DeserializeOwned};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Errors loading or saving a [`LayoutConfig`](super::LayoutConfig)
///
/// Layout itself never fails.
#[derive(Error, Debug)]
pub enum Error {
    #[error("reading or writing the configuration file failed")]
    Io(#[from] std::io::Error),

    #[error("no support for {0} configuration (enable the matching feature)")]
    Unsupported(Format),

    #[cfg(feature = "json")]
    #[error("invalid JSON configuration")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "toml")]
    #[error("invalid TOML configuration")]
    TomlDecode(#[from] toml::de::Error),

    #[cfg(feature = "toml")]
    #[error("configuration cannot be written as TOML")]
    TomlEncode(#[from] toml::ser::Error),

    #[cfg(feature = "yaml")]
    #[error("invalid YAML configuration")]
    YamlDecode(#[from] serde::de::value::Error),

    #[cfg(feature = "yaml")]
    #[error("configuration cannot be written as YAML")]
    YamlEncode(#[from] serde_yaml2::ser::Errors),

    #[cfg(feature = "ron")]
    #[error("invalid RON configuration")]
    RonDecode(#[from] ron::error::SpannedError),

    #[cfg(feature = "ron")]
    #[error("configuration cannot be written as RON")]
    RonEncode(#[from] ron::Error),
}

/// Configuration file formats
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Toml,
    Yaml,
    Ron,
    /// The extension was missing or not recognised
    Unknown,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Format::Json => "JSON",
            Format::Toml => "TOML",
            Format::Yaml => "YAML",
            Format::Ron => "RON",
            Format::Unknown => "unrecognised",
        })
    }
}

impl Format {
    /// Guess from the file extension (case insensitive; `.yml` is YAML)
    pub fn guess_from_path(path: &Path) -> Format {
        let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
            return Format::Unknown;
        };
        match ext.to_ascii_lowercase().as_str() {
            "json" => Format::Json,
            "toml" => Format::Toml,
            "yaml" | "yml" => Format::Yaml,
            "ron" => Format::Ron,
            _ => Format::Unknown,
        }
    }

    /// Parse `text`
    #[cfg(feature = "serde")]
    pub fn decode<T: DeserializeOwned>(self, text: &str) -> Result<T, Error> {
        match self {
            #[cfg(feature = "json")]
            Format::Json => Ok(serde_json::from_str(text)?),
            #[cfg(feature = "yaml")]
            Format::Yaml => Ok(serde_yaml2::from_str(text)?),
            #[cfg(feature = "ron")]
            Format::Ron => Ok(ron::from_str(text)?),
            #[cfg(feature = "toml")]
            Format::Toml => Ok(toml::from_str(text)?),
            _ => {
                let _ = text; // unused without a format feature
                Err(Error::Unsupported(self))
            }
        }
    }

    /// Serialise `value`; pretty-printed where the format supports it
    #[cfg(feature = "serde")]
    pub fn encode<T: Serialize>(self, value: &T) -> Result<String, Error> {
        match self {
            #[cfg(feature = "json")]
            Format::Json => Ok(serde_json::to_string_pretty(value)?),
            #[cfg(feature = "yaml")]
            Format::Yaml => Ok(serde_yaml2::to_string(value)?),
            #[cfg(feature = "ron")]
            Format::Ron => {
                let pretty = ron::ser::PrettyConfig::default();
                Ok(ron::ser::to_string_pretty(value, pretty)?)
            }
            #[cfg(feature = "toml")]
            Format::Toml => Ok(toml::to_string(value)?),
            _ => {
                let _ = value; // unused without a format feature
                Err(Error::Unsupported(self))
            }
        }
    }

    /// Read and parse a file
    #[cfg(feature = "serde")]
    pub fn read_path<T: DeserializeOwned>(self, path: &Path) -> Result<T, Error> {
        log::debug!("Format::read_path: reading {self} from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        self.decode(&text)
    }

    /// Serialise and write a file
    ///
    /// Nothing is written if serialisation fails.
    #[cfg(feature = "serde")]
    pub fn write_path<T: Serialize>(self, path: &Path, value: &T) -> Result<(), Error> {
        log::debug!("Format::write_path: writing {self} to {}", path.display());
        let text = self.encode(value)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Read a file, choosing the format from its extension
    #[cfg(feature = "serde")]
    #[inline]
    pub fn guess_and_read_path<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
        Self::guess_from_path(path).read_path(path)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn guess_format() {
        assert_eq!(Format::guess_from_path(Path::new("a/panes.toml")), Format::Toml);
        assert_eq!(Format::guess_from_path(Path::new("panes.YML")), Format::Yaml);
        assert_eq!(Format::guess_from_path(Path::new("panes.ron")), Format::Ron);
        assert_eq!(Format::guess_from_path(Path::new("panes")), Format::Unknown);
        assert_eq!(Format::guess_from_path(Path::new("panes.ini")), Format::Unknown);
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_partial_document_keeps_defaults() {
        use crate::config::LayoutConfig;
        let config: LayoutConfig = Format::Json.decode(r#"{ "stretch_edits": false }"#).unwrap();
        assert!(!config.stretch_edits);
        assert_eq!(config.spacing, LayoutConfig::default().spacing);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn save_then_load() {
        use crate::config::{LayoutConfig, SqueezePolicy};
        let path = std::env::temp_dir().join(format!("panes-config-{}.toml", std::process::id()));
        let mut config = LayoutConfig::default();
        config.squeeze.policy = SqueezePolicy::Reflow;
        config.tiles.group_columns = 6;
        config.save(&path).unwrap();
        let loaded = LayoutConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn unknown_format_is_unsupported() {
        let result: Result<crate::config::LayoutConfig, _> = Format::Unknown.decode("");
        assert!(matches!(result, Err(Error::Unsupported(Format::Unknown))));
    }
}
