use crate::decorator::{
    DEFAULT_DELIMITER, DEFAULT_SPECIFIED_STRING, DecoratorOptions, MAX_LEVEL, Position,
    StyleType, default_level_headings, parse_custom_idents,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Errors raised while reading or writing the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("could not replace config file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// A place where heading labels are shown. Each has its own settings.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Surface {
    #[default]
    Reading,
    Preview,
    Outline,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Reading view
    #[serde(default)]
    pub reading: SurfaceConfig,

    /// Live preview while editing
    #[serde(default)]
    pub preview: SurfaceConfig,

    /// Outline panel
    #[serde(default)]
    pub outline: SurfaceConfig,
}

/// Decoration settings for one surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Counter based labels ("1.2.1") instead of fixed per-level labels
    #[serde(default = "default_ordered")]
    pub ordered: bool,

    #[serde(default)]
    pub style_type: StyleType,

    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    #[serde(default)]
    pub trailing_delimiter: bool,

    #[serde(default)]
    pub custom_trailing_delimiter: String,

    #[serde(default)]
    pub leading_delimiter: bool,

    #[serde(default)]
    pub custom_leading_delimiter: String,

    /// Whitespace separated labels for the `custom-ident` style
    #[serde(default)]
    pub custom_idents: String,

    /// Literal for the `string` style
    #[serde(default = "default_specified_string")]
    pub specified_string: String,

    #[serde(default)]
    pub allow_zero_level: bool,

    /// Leave out top levels that hold a single heading (e.g. a lone title)
    #[serde(default)]
    pub ignore_single: bool,

    /// Most levels `ignore_single` may leave out
    #[serde(default = "default_ignore_maximum")]
    pub ignore_maximum: usize,

    /// Deepest level that gets a label
    #[serde(default = "default_max_rec_level")]
    pub max_rec_level: usize,

    /// Unordered labels, one per level
    #[serde(default = "default_unordered_headings")]
    pub level_headings: Vec<String>,

    #[serde(default)]
    pub position: Position,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            ordered: default_ordered(),
            style_type: StyleType::default(),
            delimiter: default_delimiter(),
            trailing_delimiter: false,
            custom_trailing_delimiter: String::new(),
            leading_delimiter: false,
            custom_leading_delimiter: String::new(),
            custom_idents: String::new(),
            specified_string: default_specified_string(),
            allow_zero_level: false,
            ignore_single: false,
            ignore_maximum: default_ignore_maximum(),
            max_rec_level: default_max_rec_level(),
            level_headings: default_unordered_headings(),
            position: Position::default(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_ordered() -> bool {
    true
}

fn default_delimiter() -> String {
    DEFAULT_DELIMITER.to_string()
}

fn default_specified_string() -> String {
    DEFAULT_SPECIFIED_STRING.to_string()
}

fn default_ignore_maximum() -> usize {
    MAX_LEVEL
}

fn default_max_rec_level() -> usize {
    MAX_LEVEL
}

fn default_unordered_headings() -> Vec<String> {
    default_level_headings().to_vec()
}

impl SurfaceConfig {
    /// Validate these settings into an immutable options snapshot.
    ///
    /// Level bounds are clamped into 1-6 and missing unordered labels are
    /// filled with `H1`..`H6`.
    pub fn decorator_options(&self, ignore_top_level: usize) -> DecoratorOptions {
        let max_rec_level = self.max_rec_level.clamp(1, MAX_LEVEL);
        if max_rec_level != self.max_rec_level {
            tracing::warn!(
                configured = self.max_rec_level,
                used = max_rec_level,
                "max_rec_level out of range"
            );
        }

        if self.level_headings.len() > MAX_LEVEL {
            tracing::warn!(
                count = self.level_headings.len(),
                "extra level_headings ignored"
            );
        }
        let defaults = default_level_headings();
        let level_headings = std::array::from_fn(|idx| {
            self.level_headings
                .get(idx)
                .cloned()
                .unwrap_or_else(|| defaults[idx].clone())
        });

        let custom_idents = parse_custom_idents(&self.custom_idents);
        if self.style_type == StyleType::CustomIdent && custom_idents.is_empty() {
            tracing::warn!("custom-ident style without custom_idents, using decimal numbers");
        }

        DecoratorOptions {
            ordered: self.ordered,
            style_type: self.style_type,
            delimiter: self.delimiter.clone(),
            trailing_delimiter: self.trailing_delimiter,
            custom_trailing_delimiter: self.custom_trailing_delimiter.clone(),
            leading_delimiter: self.leading_delimiter,
            custom_leading_delimiter: self.custom_leading_delimiter.clone(),
            custom_idents,
            specified_string: self.specified_string.clone(),
            ignore_top_level: ignore_top_level.min(MAX_LEVEL),
            max_rec_level,
            allow_zero_level: self.allow_zero_level,
            level_headings,
        }
    }

    /// `ignore_maximum` clamped into 0-6.
    pub fn effective_ignore_maximum(&self) -> usize {
        self.ignore_maximum.min(MAX_LEVEL)
    }
}

impl Config {
    /// Get the platform-specific config file path
    /// - macOS: ~/Library/Application Support/heading-decorator/config.toml
    /// - Linux: ~/.config/heading-decorator/config.toml
    /// - Windows: %APPDATA%/heading-decorator/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("heading-decorator").join("config.toml"))
    }

    /// Load config from the default path, or return defaults if it is
    /// missing or unreadable.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
            Self::default()
        })
    }

    /// Load config from `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Write config to `path`, replacing any existing file atomically.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        fs::create_dir_all(parent)?;

        let contents = toml::to_string_pretty(self)?;
        let mut file = tempfile::NamedTempFile::new_in(parent)?;
        file.write_all(contents.as_bytes())?;
        file.persist(path)?;

        tracing::info!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Settings for `surface`.
    pub fn surface(&self, surface: Surface) -> &SurfaceConfig {
        match surface {
            Surface::Reading => &self.reading,
            Surface::Preview => &self.preview,
            Surface::Outline => &self.outline,
        }
    }

    /// Surfaces whose settings differ between `self` and `other`.
    pub fn changed_surfaces(&self, other: &Config) -> Vec<Surface> {
        Surface::iter()
            .filter(|&surface| self.surface(surface) != other.surface(surface))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        let reading = config.surface(Surface::Reading);
        assert!(reading.enabled);
        assert!(reading.ordered);
        assert_eq!(reading.delimiter, ".");
        assert_eq!(reading.level_headings.len(), 6);
        assert_eq!(reading.position, Position::Before);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
[outline]
style_type = "upper-roman"
delimiter = "-"
ignore_single = true
position = "after"
"#,
        )
        .unwrap();

        assert_eq!(config.outline.style_type, StyleType::UpperRoman);
        assert_eq!(config.outline.delimiter, "-");
        assert!(config.outline.ignore_single);
        assert_eq!(config.outline.position, Position::After);
        assert_eq!(config.outline.max_rec_level, 6);
        assert_eq!(config.reading, SurfaceConfig::default());
    }

    #[test]
    fn test_unknown_style_rejected() {
        let result: Result<Config, _> = toml::from_str("[reading]\nstyle_type = \"klingon\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_specified_string_style_name() {
        let config: Config = toml::from_str("[preview]\nstyle_type = \"string\"\n").unwrap();
        assert_eq!(config.preview.style_type, StyleType::Specified);
    }

    #[test]
    fn test_decorator_options_validation() {
        let surface = SurfaceConfig {
            max_rec_level: 0,
            level_headings: vec!["A".to_string(), "B".to_string()],
            custom_idents: "x  y".to_string(),
            ..SurfaceConfig::default()
        };
        let options = surface.decorator_options(9);

        assert_eq!(options.max_rec_level, 1);
        assert_eq!(options.ignore_top_level, 6);
        assert_eq!(options.level_headings[1], "B");
        assert_eq!(options.level_headings[2], "H3");
        assert_eq!(options.custom_idents, vec!["x", "y"]);
    }

    #[test]
    fn test_effective_ignore_maximum() {
        let surface = SurfaceConfig {
            ignore_maximum: 10,
            ..SurfaceConfig::default()
        };
        assert_eq!(surface.effective_ignore_maximum(), 6);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.preview.style_type = StyleType::LowerAlpha;
        config.preview.trailing_delimiter = true;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[reading\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_changed_surfaces() {
        let before = Config::default();
        let mut after = before.clone();
        after.outline.ordered = false;
        assert_eq!(before.changed_surfaces(&after), vec![Surface::Outline]);
        assert!(before.changed_surfaces(&before).is_empty());
    }
}
