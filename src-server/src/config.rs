//! Server configuration.
//!
//! Loaded from a YAML file (`-f`, default `config.yaml`, optional) and then
//! overridden by `PANTRY_`-prefixed environment variables:
//!
//! ```bash
//! PANTRY_PORT=9000
//! PANTRY_DATABASE_PATH=/var/lib/pantry/pantry.db
//! PANTRY_DEFAULT_CALORIE_GOAL=1800
//! ```

use clap::Parser;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// CLI args - just for locating the config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "PANTRY_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server
    #[arg(long)]
    pub validate: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP host to bind to
    pub host: String,
    /// HTTP port to bind to
    pub port: u16,
    /// SQLite file; `:memory:` keeps everything in memory
    pub database_path: String,
    /// Goal stored when the settings row is first created
    pub default_calorie_goal: i64,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_path: "pantry.db".to_string(),
            default_calorie_goal: 2000,
            cors_origins: Vec::new(),
        }
    }
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let config: Self = Self::figment(args).extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(&args.config))
            .merge(Env::prefixed("PANTRY_").ignore(&["CONFIG"]))
    }

    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<(), figment::Error> {
        if self.database_path.trim().is_empty() {
            return Err(figment::Error::from("database_path must not be empty".to_string()));
        }
        if self.default_calorie_goal <= 0 {
            return Err(figment::Error::from(format!(
                "default_calorie_goal must be positive, got {}",
                self.default_calorie_goal
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn args(path: &str) -> Args {
        Args {
            config: path.to_string(),
            validate: false,
        }
    }

    #[test]
    fn test_defaults_without_file() {
        Jail::expect_with(|_jail| {
            let config = Config::load(&args("missing.yaml"))?;
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_yaml_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "pantry.yaml",
                r#"
port: 9000
database_path: ":memory:"
default_calorie_goal: 1800
"#,
            )?;
            jail.set_env("PANTRY_PORT", "9100");

            let config = Config::load(&args("pantry.yaml"))?;
            assert_eq!(config.port, 9100);
            assert_eq!(config.database_path, ":memory:");
            assert_eq!(config.default_calorie_goal, 1800);
            Ok(())
        });
    }

    #[test]
    fn test_rejects_non_positive_goal() {
        Jail::expect_with(|jail| {
            jail.create_file("bad.yaml", "default_calorie_goal: 0")?;
            assert!(Config::load(&args("bad.yaml")).is_err());
            Ok(())
        });
    }
}
