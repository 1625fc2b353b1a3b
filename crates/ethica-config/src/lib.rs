use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("No edition named `{name}` in the config")]
    UnknownEdition { name: String },
}

/// Address transform for cross references.
///
/// `{index}` is replaced by the raw index string (`1p7d`), `{book}` by the
/// book number it starts with (`1`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkTemplate(String);

impl Default for LinkTemplate {
    fn default() -> Self {
        Self("#{index}".to_string())
    }
}

impl LinkTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn apply(&self, index: &str) -> String {
        let book_end = index
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(index.len());
        self.0
            .replace("{book}", &index[..book_end])
            .replace("{index}", index)
    }
}

/// A named edition file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditionConfig {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub link_template: LinkTemplate,
    /// Where `render` writes when given a bare file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub editions: Vec<EditionConfig>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in every configured path
        for edition in &mut config.editions {
            if let Some(expanded) = Self::expand_path(&edition.path) {
                edition.path = expanded;
            }
        }
        config.output_dir = config
            .output_dir
            .map(|dir| Self::expand_path(&dir).unwrap_or(dir));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/ethica");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn edition(&self, name: &str) -> Result<&EditionConfig, ConfigError> {
        self.editions
            .iter()
            .find(|edition| edition.name == name)
            .ok_or_else(|| ConfigError::UnknownEdition {
                name: name.to_string(),
            })
    }

    /// `file` inside `output_dir` when one is configured and `file` is relative.
    pub fn output_path(&self, file: &Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) if file.is_relative() => dir.join(file),
            _ => file.to_path_buf(),
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::env;
    use tempfile::TempDir;

    fn sample() -> Config {
        Config {
            link_template: LinkTemplate::new("/ethica/{book}#{index}"),
            output_dir: Some(PathBuf::from("/tmp/ethica-out")),
            editions: vec![
                EditionConfig {
                    name: "la_gebhardt".to_string(),
                    path: PathBuf::from("/data/la_gebhardt.json"),
                },
                EditionConfig {
                    name: "en_elwes".to_string(),
                    path: PathBuf::from("/data/en_elwes.json"),
                },
            ],
        }
    }

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/ethica/config.toml"));
    }

    #[rstest]
    #[case("#{index}", "1p7d", "#1p7d")]
    #[case("/ethica/{book}#{index}", "2p13l1", "/ethica/2#2p13l1")]
    #[case("/ethica/{book}#{index}", "12p3", "/ethica/12#12p3")]
    #[case("{book}", "pr", "")]
    #[case("static", "1p1", "static")]
    fn link_template_substitutes(
        #[case] template: &str,
        #[case] index: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(LinkTemplate::new(template).apply(index), expected);
    }

    #[test]
    fn test_defaults_when_fields_missing() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.link_template, LinkTemplate::default());
        assert_eq!(config.link_template, LinkTemplate::new("#{index}"));
        assert!(config.output_dir.is_none());
        assert!(config.editions.is_empty());
    }

    #[test]
    fn test_edition_lookup() {
        let config = sample();

        assert_eq!(
            config.edition("en_elwes").unwrap().path,
            PathBuf::from("/data/en_elwes.json")
        );
        assert!(matches!(
            config.edition("fr_appuhn"),
            Err(ConfigError::UnknownEdition { name }) if name == "fr_appuhn"
        ));
    }

    #[test]
    fn test_output_path() {
        let config = sample();
        assert_eq!(
            config.output_path(Path::new("book1.html")),
            PathBuf::from("/tmp/ethica-out/book1.html")
        );
        assert_eq!(
            config.output_path(Path::new("/abs/book1.html")),
            PathBuf::from("/abs/book1.html")
        );
        assert_eq!(
            Config::default().output_path(Path::new("book1.html")),
            PathBuf::from("book1.html")
        );
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_absolute_path() {
        let path = PathBuf::from("/absolute/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "editions = 3").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/dir/config.toml");
        let test_config = sample();

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config.link_template, test_config.link_template);
        assert_eq!(loaded_config.output_dir, test_config.output_dir);
        assert_eq!(loaded_config.editions, test_config.editions);
    }

    #[test]
    fn test_env_var_in_edition_path() {
        unsafe {
            env::set_var("ETHICA_DATA", "/custom/editions");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            r#"
link_template = "/{book}#{index}"

[[editions]]
name = "la_gebhardt"
path = "$ETHICA_DATA/la_gebhardt.json"
"#,
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(
            config.edition("la_gebhardt").unwrap().path,
            PathBuf::from("/custom/editions/la_gebhardt.json")
        );
        assert_eq!(config.link_template.apply("3p2"), "/3#3p2");

        unsafe {
            env::remove_var("ETHICA_DATA");
        }
    }
}
