use crate::error::ConfigError;
use config::builder::DefaultState;
use config::ConfigBuilder;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

#[cfg(feature = "clap")]
pub mod cli;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{DatabaseSettings, LoggingSettings, ServerSettings, Settings};

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Flat environment variables used by existing deployments. They are applied
/// last, so they win over both the file and the `APP__` prefixed variables.
const LEGACY_ENV_KEYS: [(&str, &str); 6] = [
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_USER", "database.username"),
    ("DB_PASSWORD", "database.password"),
    ("DB_NAME", "database.database_name"),
    ("DB_POOL_SIZE", "database.pool_size"),
];

/// Loads the application settings from `config.toml` and the environment.
///
/// This function is the primary entry point for this crate. It is meant to be
/// called once at process start; the resulting `Settings` are passed down
/// explicitly rather than re-read.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(Path::new(DEFAULT_CONFIG_FILE))
}

/// Same as [`load_settings`] but reads the given file. A missing file is not
/// an error; every key has a default.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    let builder = with_defaults()?
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );
    let builder = apply_legacy_env(builder, |key| std::env::var(key).ok())?;
    finish(builder)
}

fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = config::Config::builder()
        .set_default("database.host", "localhost")?
        .set_default("database.port", 5432)?
        .set_default("database.username", "postgres")?
        .set_default("database.password", "")?
        .set_default("database.database_name", "gridvault")?
        .set_default("database.pool_size", 10)?
        .set_default("database.acquire_timeout_secs", 1)?
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("logging.level", "info")?
        .set_default("logging.file_prefix", "gridvault.log")?;
    Ok(builder)
}

fn apply_legacy_env<F>(
    mut builder: ConfigBuilder<DefaultState>,
    lookup: F,
) -> Result<ConfigBuilder<DefaultState>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    for (var, key) in LEGACY_ENV_KEYS {
        builder = builder.set_override_option(key, lookup(var))?;
    }
    Ok(builder)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigError> {
    let settings = builder.build()?.try_deserialize::<Settings>()?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn from_toml(toml: &str) -> Result<Settings, ConfigError> {
        finish(with_defaults()?.add_source(File::from_str(toml, FileFormat::Toml)))
    }

    #[test]
    fn defaults_cover_every_key() {
        let settings = from_toml("").unwrap();
        assert_eq!(settings.database.host, "localhost");
        assert_eq!(settings.database.port, 5432);
        assert_eq!(settings.database.pool_size, 10);
        assert_eq!(settings.database.acquire_timeout_secs, 1);
        assert_eq!(settings.server.port, 3000);
        assert!(settings.logging.directory.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let settings = from_toml(
            r#"
            [database]
            host = "db.internal"
            pool_size = 4
            "#,
        )
        .unwrap();
        assert_eq!(settings.database.host, "db.internal");
        assert_eq!(settings.database.pool_size, 4);
        assert_eq!(settings.database.database_name, "gridvault");
    }

    #[test]
    fn legacy_variables_win() {
        let builder = with_defaults()
            .unwrap()
            .add_source(File::from_str("[database]\nhost = \"from-file\"", FileFormat::Toml));
        let builder = apply_legacy_env(builder, |key| match key {
            "DB_HOST" => Some("from-env".to_string()),
            "DB_PORT" => Some("6543".to_string()),
            _ => None,
        })
        .unwrap();
        let settings = finish(builder).unwrap();
        assert_eq!(settings.database.host, "from-env");
        assert_eq!(settings.database.port, 6543);
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        let err = from_toml("[database]\npool_size = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn display_target_hides_password() {
        let settings = from_toml("[database]\npassword = \"hunter2\"").unwrap();
        let target = settings.database.display_target();
        assert_eq!(target, "postgres@localhost:5432/gridvault");
        assert!(!target.contains("hunter2"));
    }
}
