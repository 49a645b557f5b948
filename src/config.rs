use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigSortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) day_file: Option<PathBuf>,
    #[serde(default)]
    pub(crate) hour_file: Option<PathBuf>,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) debug: bool,
    #[serde(default)]
    pub(crate) order: Option<ConfigSortOrder>,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    #[serde(default)]
    pub(crate) locale: Option<String>,
    /// File this config was read from, if any
    #[serde(skip)]
    pub(crate) source: Option<PathBuf>,
}

impl Config {
    /// Load the first readable config file. An explicit path replaces the
    /// default search locations.
    pub(crate) fn load(explicit: Option<&Path>) -> Self {
        let paths = match explicit {
            Some(path) => vec![path.to_path_buf()],
            None => Self::get_config_paths(),
        };

        for path in paths {
            if !path.exists() {
                if explicit.is_some() {
                    eprintln!("Warning: config file {} does not exist", path.display());
                }
                continue;
            }
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    eprintln!("Warning: Failed to read {}: {}", path.display(), e);
                    continue;
                }
            };
            match Self::parse(&content) {
                Ok(mut config) => {
                    config.source = Some(path);
                    return config;
                }
                Err(e) => {
                    eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                }
            }
        }

        Self::default()
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Config>(content)
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/bikestats/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("bikestats").join("config.toml"));
        }

        // 2. Platform config dir (e.g. ~/Library/Application Support on macOS)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("bikestats").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.bikestats.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".bikestats.toml"));
        }

        paths
    }
}
