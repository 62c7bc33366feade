use std::path::Path;

use config::ConfigError;
use serde::Deserialize;

use crate::core::engine::Options;
use crate::utils;

const CONFIG: &str = include_str!("../../.config/config.json5");

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub expander: Options,
}

impl Config {
    /// Layers the embedded defaults, the files in the config directory and
    /// an optional explicit file, in that order of increasing precedence.
    pub fn load(extra: Option<&Path>) -> Result<Self, ConfigError> {
        let default_config = Self::defaults()?;
        let config_dir = utils::get_config_dir();
        let mut builder = config::Config::builder();

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.json", config::FileFormat::Json),
            ("config.yaml", config::FileFormat::Yaml),
            ("config.toml", config::FileFormat::Toml),
            ("config.ini", config::FileFormat::Ini),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            builder = builder.add_source(
                config::File::from(config_dir.join(file))
                    .format(*format)
                    .required(false),
            );
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if let Some(path) = extra {
            builder = builder.add_source(config::File::from(path).required(true));
            found_config = true;
        }
        if !found_config {
            log::info!(
                "No configuration file found in {}, using defaults",
                config_dir.display()
            );
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;
        cfg.expander = cfg.expander.or(default_config.expander);

        Ok(cfg)
    }

    /// The embedded default configuration alone.
    pub fn defaults() -> Result<Self, ConfigError> {
        json5::from_str(CONFIG)
            .map_err(|e| ConfigError::Message(format!("Failed to load default config: {e}")))
    }
}
