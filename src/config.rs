//! Environment-driven server configuration.
//!
//! Values come from process environment variables (after `.env` has been loaded by
//! the binary) layered over [`Config::default`].

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::AppError;

const ENV_KEYS: &[&str] = &[
    "database_url",
    "production_database_url",
    "app_env",
    "migrations_dir",
    "loglevel",
    "listen_addr",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppEnv {
    #[default]
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database_url: Option<String>,
    /// Takes precedence over `database_url` when running in production.
    pub production_database_url: Option<String>,
    pub app_env: AppEnv,
    pub migrations_dir: PathBuf,
    pub loglevel: String,
    pub listen_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            production_database_url: None,
            app_env: AppEnv::Development,
            migrations_dir: PathBuf::from("migrations"),
            loglevel: "info".to_string(),
            listen_addr: "0.0.0.0:5000".to_string(),
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::raw().only(ENV_KEYS))
    }

    pub fn from_figment(figment: &Figment) -> Result<Self, AppError> {
        Ok(figment.extract()?)
    }

    /// Load configuration from the current process environment.
    pub fn load() -> Result<Self, AppError> {
        Self::from_figment(&Self::figment())
    }

    /// Connection string for the target database, if any.
    ///
    /// Empty values are treated as unset.
    pub fn database_url(&self) -> Option<&str> {
        match self.app_env {
            AppEnv::Production => {
                non_empty(&self.production_database_url).or_else(|| non_empty(&self.database_url))
            }
            AppEnv::Development => non_empty(&self.database_url),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_without_environment() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let cfg = Config::load().expect("config should load");
            assert_eq!(cfg.app_env, AppEnv::Development);
            assert_eq!(cfg.migrations_dir, PathBuf::from("migrations"));
            assert_eq!(cfg.loglevel, "info");
            assert!(cfg.database_url().is_none());
            Ok(())
        });
    }

    #[test]
    fn reads_database_url_and_overrides() {
        Jail::expect_with(|jail| {
            jail.set_env("DATABASE_URL", "postgres://app@localhost/sandwich");
            jail.set_env("MIGRATIONS_DIR", "db/migrations");
            jail.set_env("LISTEN_ADDR", "127.0.0.1:8080");
            let cfg = Config::load().expect("config should load");
            assert_eq!(cfg.database_url(), Some("postgres://app@localhost/sandwich"));
            assert_eq!(cfg.migrations_dir, PathBuf::from("db/migrations"));
            assert_eq!(cfg.listen_addr, "127.0.0.1:8080");
            Ok(())
        });
    }

    #[test]
    fn production_override_only_applies_in_production() {
        Jail::expect_with(|jail| {
            jail.set_env("DATABASE_URL", "postgres://dev@localhost/sandwich");
            jail.set_env("PRODUCTION_DATABASE_URL", "postgres://prod@db/sandwich");
            let dev = Config::load().expect("config should load");
            assert_eq!(dev.database_url(), Some("postgres://dev@localhost/sandwich"));

            jail.set_env("APP_ENV", "production");
            let prod = Config::load().expect("config should load");
            assert_eq!(prod.app_env, AppEnv::Production);
            assert_eq!(prod.database_url(), Some("postgres://prod@db/sandwich"));
            Ok(())
        });
    }

    #[test]
    fn production_falls_back_to_database_url() {
        let cfg = Config {
            database_url: Some("postgres://dev@localhost/sandwich".to_string()),
            production_database_url: Some("   ".to_string()),
            app_env: AppEnv::Production,
            ..Config::default()
        };
        assert_eq!(cfg.database_url(), Some("postgres://dev@localhost/sandwich"));
    }

    #[test]
    fn empty_database_url_is_absent() {
        let cfg = Config {
            database_url: Some(String::new()),
            ..Config::default()
        };
        assert!(cfg.database_url().is_none());
    }
}
