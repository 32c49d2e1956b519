use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("config lists no descriptor tables")]
    NoTables,
}

///
/// BuildConfig
///
/// Contents of `avrogen.toml`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    pub generate: GenerateConfig,

    /// Directory the config was read from; tables resolve against it.
    #[serde(skip)]
    pub base_dir: PathBuf,

    /// Raw config text, part of the cache key.
    #[serde(skip)]
    pub source: String,
}

///
/// GenerateConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GenerateConfig {
    pub tables: Vec<PathBuf>,

    #[serde(default = "GenerateConfig::default_output")]
    pub output: String,

    /// Namespace for records that do not declare one.
    #[serde(default)]
    pub namespace: Option<String>,

    #[serde(default = "GenerateConfig::enabled")]
    pub parallel: bool,

    #[serde(default = "GenerateConfig::enabled")]
    pub cache: bool,
}

impl GenerateConfig {
    pub const DEFAULT_OUTPUT: &'static str = "avro_records.rs";

    fn default_output() -> String {
        Self::DEFAULT_OUTPUT.to_string()
    }

    const fn enabled() -> bool {
        true
    }
}

impl BuildConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Self = text.parse()?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        Ok(config)
    }

    /// Table paths resolved against the config's directory.
    #[must_use]
    pub fn table_paths(&self) -> Vec<PathBuf> {
        self.generate
            .tables
            .iter()
            .map(|t| self.base_dir.join(t))
            .collect()
    }
}

impl FromStr for BuildConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut config: Self = toml::from_str(s)?;
        if config.generate.tables.is_empty() {
            return Err(ConfigError::NoTables);
        }
        config.source = s.to_string();

        Ok(config)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_every_key_but_tables() {
        let config: BuildConfig = r#"
            [generate]
            tables = ["records.toml"]
        "#
        .parse()
        .unwrap();

        assert_eq!(config.generate.tables, vec![PathBuf::from("records.toml")]);
        assert_eq!(config.generate.output, "avro_records.rs");
        assert_eq!(config.generate.namespace, None);
        assert!(config.generate.parallel);
        assert!(config.generate.cache);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config: BuildConfig = r#"
            [generate]
            tables = ["a.toml", "b.toml"]
            output = "records.rs"
            namespace = "Fake.Namespace"
            parallel = false
            cache = false
        "#
        .parse()
        .unwrap();

        assert_eq!(config.generate.output, "records.rs");
        assert_eq!(config.generate.namespace.as_deref(), Some("Fake.Namespace"));
        assert!(!config.generate.parallel);
        assert!(!config.generate.cache);
    }

    #[test]
    fn missing_or_empty_tables_are_errors() {
        assert!(matches!(
            "[generate]\ntables = []".parse::<BuildConfig>(),
            Err(ConfigError::NoTables)
        ));
        assert!(matches!(
            "[generate]\noutput = \"x.rs\"".parse::<BuildConfig>(),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            "[generate]\ntables = [\"a.toml\"]\nunknown = 1".parse::<BuildConfig>(),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn tables_resolve_against_the_config_directory() {
        let mut config: BuildConfig = "[generate]\ntables = [\"tables/records.toml\"]"
            .parse()
            .unwrap();
        config.base_dir = PathBuf::from("/project");

        assert_eq!(
            config.table_paths(),
            vec![PathBuf::from("/project/tables/records.toml")]
        );
    }
}
