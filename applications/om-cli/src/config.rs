/// CLI configuration
use crate::error::{CliError, Result};
use om_playback::PlayerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub player: PlayerConfig,

    /// File holding the persisted current index
    #[serde(default = "default_index_path")]
    pub index_path: PathBuf,

    /// Fetch metadata over HTTP from here instead of reading `root`
    #[serde(default)]
    pub base_url: Option<String>,

    /// Directory the metadata document path is resolved against
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// `path` defaults to `om.toml` and is skipped when it does not exist.
    /// Environment variables are prefixed with `OM_`; nested keys use `__`
    /// (`OM_PLAYER__MEDIA_FOLDER`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        let config_path = path.map_or_else(|| PathBuf::from("om.toml"), Path::to_path_buf);
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        } else if path.is_some() {
            return Err(CliError::Config(format!(
                "config file {} not found",
                config_path.display()
            )));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("OM")
                .prefix_separator("_")
                .separator("__"),
        );

        Ok(settings.build()?.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(CliError::Config(format!(
                    "base_url must start with http:// or https:// (got {})",
                    url
                )));
            }
        }

        if self.player.cover_extensions.is_empty() {
            return Err(CliError::Config(
                "player.cover_extensions cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Local path of the metadata document
    pub fn metadata_path(&self) -> PathBuf {
        self.root.join(&self.player.metadata_url)
    }
}

fn default_index_path() -> PathBuf {
    PathBuf::from(".om_current.json")
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            index_path: default_index_path(),
            base_url: None,
            root: default_root(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_player_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.player, PlayerConfig::default());
        assert_eq!(config.metadata_path(), PathBuf::from("./service/music.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
index_path = "state/index.json"
root = "/srv/om"

[player]
media_folder = "audio/"
"#
        )
        .unwrap();

        let config = CliConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.index_path, PathBuf::from("state/index.json"));
        assert_eq!(config.player.media_folder, "audio/");
        // Unset keys keep their defaults
        assert_eq!(config.player.cover_folder, "cover/");
        assert_eq!(config.metadata_path(), PathBuf::from("/srv/om/service/music.json"));
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let result = CliConfig::load(Some(Path::new("/nonexistent/om.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let config = CliConfig {
            base_url: Some("ftp://example.com".to_string()),
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_cover_extensions() {
        let mut config = CliConfig::default();
        config.player.cover_extensions.clear();
        assert!(config.validate().is_err());
    }
}
