use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::*;
use serde::{Deserialize, Serialize};

use infra::persistence::SledStore;

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct Config {
    pub db: SledConfig,
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct SledConfig {
    pub path: PathBuf,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl SledConfig {
    pub(crate) fn build(&self) -> Result<SledStore> {
        debug!("Open store from {:?}", self);

        let store = SledStore::open(&self.path).context("open side-store")?;

        Ok(store)
    }
}

#[derive(Deserialize, Debug)]
pub struct EnvLogger {
    level: Option<LogLevel>,
    #[serde(default)]
    modules: HashMap<String, LogLevel>,
    #[serde(default)]
    timestamp_nanos: bool,
}

impl LogLevel {
    fn to_filter(&self) -> log::LevelFilter {
        match self {
            &LogLevel::Off => log::LevelFilter::Off,
            &LogLevel::Error => log::LevelFilter::Error,
            &LogLevel::Warn => log::LevelFilter::Warn,
            &LogLevel::Info => log::LevelFilter::Info,
            &LogLevel::Debug => log::LevelFilter::Debug,
            &LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl EnvLogger {
    pub fn builder(&self) -> env_logger::Builder {
        let mut b = env_logger::Builder::from_default_env();
        if let Some(level) = self.level.as_ref() {
            b.filter_level(level.to_filter());
        }

        for (module, level) in self.modules.iter() {
            b.filter_module(&module, level.to_filter());
        }

        b.default_format_timestamp_nanos(self.timestamp_nanos);

        return b;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_store_path_from_toml() {
        let config: Config = toml::from_str(
            r#"
            [db]
            path = "/var/lib/tuckshop"
            "#,
        )
        .expect("parse config");

        assert_eq!(config.db.path, PathBuf::from("/var/lib/tuckshop"));
    }

    #[test]
    fn logger_section_defaults_to_empty_module_filters() {
        let logger: EnvLogger = toml::from_str(
            r#"
            level = "info"
            "#,
        )
        .expect("parse logger");

        assert!(logger.modules.is_empty());
        assert!(!logger.timestamp_nanos);
    }
}
