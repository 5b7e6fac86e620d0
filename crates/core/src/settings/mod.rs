//! User-tunable settings, read from a TOML file.
//!
//! ```toml
//! [logging]
//! enabled = true
//! level = "info"
//! navigation-level = "debug"
//! max-files = 3
//! directory = "logs"
//!
//! [layout]
//! compact-width-threshold = 600
//! forced-size-class = "regular"
//! ```
//!
//! Every key is optional; missing keys take their default value.

use crate::navigation::HorizontalSizeClass;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("can't read settings file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("can't parse settings")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub logging: LoggingSettings,
    pub layout: LayoutSettings,
}

impl Settings {
    /// Reads the settings stored at `path`.
    ///
    /// A missing file isn't an error: the defaults are returned instead.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Settings, SettingsError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => Settings::parse(&content),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
            Err(source) => Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn parse(content: &str) -> Result<Settings, SettingsError> {
        Ok(toml::from_str(content)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LoggingSettings {
    pub enabled: bool,
    /// An `EnvFilter` directive, overridden by `RUST_LOG`.
    pub level: String,
    /// Level for the navigation containers' events, `level` applies when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation_level: Option<String>,
    /// Number of run files to keep, 0 keeps all of them.
    pub max_files: usize,
    /// Relative to the current working directory.
    pub directory: PathBuf,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            enabled: true,
            level: "info".to_string(),
            navigation_level: None,
            max_files: 3,
            directory: PathBuf::from("logs"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LayoutSettings {
    /// Widths strictly below this are laid out compactly.
    pub compact_width_threshold: u32,
    /// Pins the size class regardless of the width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forced_size_class: Option<HorizontalSizeClass>,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        LayoutSettings {
            compact_width_threshold: 600,
            forced_size_class: None,
        }
    }
}

impl LayoutSettings {
    /// The size class to lay containers out in for a window `width` wide.
    pub fn size_class_for_width(&self, width: u32) -> HorizontalSizeClass {
        if let Some(size_class) = self.forced_size_class {
            return size_class;
        }

        if width < self.compact_width_threshold {
            HorizontalSizeClass::Compact
        } else {
            HorizontalSizeClass::Regular
        }
    }
}
