use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "trivia.toml";
pub const ENV_PREFIX: &str = "TRIVIA_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    /// Fixed seed for quiz selection; unset means a fresh thread-local RNG.
    pub quiz_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://trivia.sqlite3?mode=rwc".into(),
            bind_addr: "127.0.0.1:5000".into(),
            quiz_seed: None,
        }
    }
}

impl AppConfig {
    /// Sources in increasing priority: defaults, the TOML file, `TRIVIA_*`
    /// environment variables.
    pub fn figment(config_path: Option<&Path>) -> Figment {
        let file = config_path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// # Errors
    ///
    /// Returns the figment error when a source holds malformed values.
    pub fn load(config_path: Option<&Path>) -> Result<Self, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }
}

/// Turn a bare path or `sqlite:` URL into an absolute `sqlite://` URL that
/// creates the file on first use.
pub fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.contains("mode=memory") {
        return trimmed.to_owned();
    }

    let rest = trimmed
        .strip_prefix("sqlite://")
        .or_else(|| trimmed.strip_prefix("sqlite:"))
        .unwrap_or(trimmed);
    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));

    let path = Path::new(path);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    let query = if query.is_empty() { "mode=rwc" } else { query };
    format!("sqlite://{}?{query}", absolute.display())
}

/// Create the parent directory of a file-backed database.
///
/// # Errors
///
/// Returns the I/O error when the directory cannot be created.
pub fn prepare_sqlite_dir(db_url: &str) -> std::io::Result<()> {
    let Some(rest) = db_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = rest.split('?').next().unwrap_or(rest);
    match Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_apply_without_sources() {
        Jail::expect_with(|_jail| {
            let config: AppConfig = AppConfig::figment(None).extract()?;
            assert_eq!(config, AppConfig::default());
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
                    bind_addr = "0.0.0.0:8080"
                    database_url = "sqlite://from-file.db"
                "#,
            )?;
            jail.set_env("TRIVIA_DATABASE_URL", "sqlite://from-env.db");
            jail.set_env("TRIVIA_QUIZ_SEED", "42");

            let config: AppConfig = AppConfig::figment(None).extract()?;
            assert_eq!(config.bind_addr, "0.0.0.0:8080");
            assert_eq!(config.database_url, "sqlite://from-env.db");
            assert_eq!(config.quiz_seed, Some(42));
            Ok(())
        });
    }

    #[test]
    fn explicit_config_path_is_used() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", r#"bind_addr = "127.0.0.1:9000""#)?;
            let config: AppConfig = AppConfig::figment(Some(Path::new("custom.toml"))).extract()?;
            assert_eq!(config.bind_addr, "127.0.0.1:9000");
            Ok(())
        });
    }

    #[test]
    fn normalizes_relative_paths() {
        let url = normalize_sqlite_url("data/trivia.db");
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("data/trivia.db?mode=rwc"));

        let url = normalize_sqlite_url("sqlite:///tmp/t.db?mode=ro");
        assert_eq!(url, "sqlite:///tmp/t.db?mode=ro");
    }

    #[test]
    fn memory_urls_pass_through() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:"), "sqlite::memory:");
        let shared = "sqlite:file:memdb1?mode=memory&cache=shared";
        assert_eq!(normalize_sqlite_url(shared), shared);
    }
}
