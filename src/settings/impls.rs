// Standard library
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::{env, fs};

// 3rd party crates
use config::{Config, ConfigError, Environment, File};
use log::{error, info, LevelFilter};
use tokio::sync::RwLock;

// Current module imports
use super::constants::{
    APP_DIR, CONFIG_PATH_ENV, DEFAULT_CONFIG, DEFAULT_STATE_FILE, ENV_PREFIX,
    ENV_PREFIX_SEPARATOR, ENV_SEPARATOR,
};
use super::errors::ValidationError;
use super::types::{ConfigManager, Settings, ValidatedSettings};

impl Settings {
    pub fn get_log_level(&self) -> String {
        self.log.level.to_lowercase()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        // Validate log level
        match self.log.level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => return Err(ValidationError::InvalidLogLevel(self.log.level.clone())),
        }

        self.nios.validate()?;

        let mut seen = BTreeSet::new();
        for resource in &self.resources {
            if resource.address.trim().is_empty() {
                return Err(ValidationError::EmptyAddress);
            }
            if !seen.insert(resource.address.as_str()) {
                return Err(ValidationError::DuplicateAddress(resource.address.clone()));
            }
            if resource
                .import
                .as_deref()
                .is_some_and(|reference| reference.trim().is_empty())
            {
                return Err(ValidationError::EmptyImportReference(
                    resource.address.clone(),
                ));
            }
            resource
                .kind
                .check(&resource.fields)
                .map_err(|source| ValidationError::Resource {
                    address: resource.address.clone(),
                    source,
                })?;
        }

        Ok(())
    }
}

impl ConfigManager {
    /// Creates a new `ConfigManager` instance by loading and validating the configuration.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path: PathBuf = Self::get_config_path()?;
        Self::ensure_config_file_exists(&config_path)?;
        Self::from_path(config_path)
    }

    /// Loads and validates the configuration at `config_path`.
    pub fn from_path(config_path: PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let settings: Settings = Self::load_settings(&config_path)?;

        // Validate settings before proceeding
        let validated_settings = ValidatedSettings::new(settings).map_err(|e| {
            error!("Configuration validation failed: {}", e);
            e
        })?;

        let level = validated_settings.get_log_level();
        let manager = ConfigManager {
            settings: Arc::new(RwLock::new(validated_settings.into_inner())),
            config_path,
        };

        Self::adjust_logging_level(&level);

        Ok(manager)
    }

    /// Determines the configuration file path.
    fn get_config_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            Ok(PathBuf::from(path))
        } else if let Some(config_dir) = dirs::config_dir() {
            Ok(config_dir.join(APP_DIR).join("config.toml"))
        } else {
            let msg: &str = "Could not determine the configuration directory";
            error!("{}", msg);
            Err(ConfigError::Message(msg.into()))
        }
    }

    /// Ensures that the configuration file exists, creating it if necessary.
    fn ensure_config_file_exists(config_path: &Path) -> Result<(), ConfigError> {
        if !config_path.exists() {
            if let Some(parent_dir) = config_path.parent() {
                fs::create_dir_all(parent_dir).map_err(|e| {
                    let msg: String = format!("Failed to create configuration directory: {}", e);
                    error!("{}", msg);
                    ConfigError::Message(msg)
                })?;
            }
            fs::write(config_path, DEFAULT_CONFIG).map_err(|e| {
                let msg: String = format!("Failed to create default configuration file: {}", e);
                error!("{}", msg);
                ConfigError::Message(msg)
            })?;
            info!("Default configuration file created at: {:?}", config_path);
        }
        Ok(())
    }

    /// Loads the settings from the configuration file and environment variables.
    fn load_settings(config_path: &Path) -> Result<Settings, ConfigError> {
        Self::load_settings_with(config_path, Self::environment())
    }

    /// Environment overrides such as `NIOS_RPZ_NIOS__PASSWORD` for `nios.password`.
    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_PREFIX_SEPARATOR)
            .separator(ENV_SEPARATOR)
    }

    fn load_settings_with(
        config_path: &Path,
        environment: Environment,
    ) -> Result<Settings, ConfigError> {
        let config_file: &str = config_path.to_str().ok_or_else(|| {
            let msg: &str = "Configuration file path contains invalid UTF-8 characters";
            error!("{}", msg);
            ConfigError::Message(msg.into())
        })?;

        let settings: Config = Config::builder()
            .add_source(File::with_name(config_file))
            .add_source(environment)
            .build()?;

        settings.try_deserialize()
    }

    /// Adjusts the logging level based on the configuration.
    fn adjust_logging_level(level: &str) {
        let level_filter: LevelFilter = match level {
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Info,
        };
        log::set_max_level(level_filter);
    }

    /// Provides a read-locked reference to the current settings.
    pub async fn get_settings(&self) -> tokio::sync::RwLockReadGuard<'_, Settings> {
        self.settings.read().await
    }

    pub async fn get_log_level(&self) -> String {
        self.settings.read().await.get_log_level()
    }

    /// Location of the state file. Relative paths are taken from the
    /// configuration file's directory.
    pub async fn get_state_path(&self) -> PathBuf {
        let configured = self.settings.read().await.state.path.clone();
        let base = self.config_path.parent().unwrap_or_else(|| Path::new(""));
        match configured {
            Some(path) if path.is_absolute() => path,
            Some(path) => base.join(path),
            None => base.join(DEFAULT_STATE_FILE),
        }
    }
}

impl ValidatedSettings {
    pub fn new(settings: Settings) -> Result<Self, ValidationError> {
        settings.validate()?;
        Ok(ValidatedSettings(settings))
    }

    pub fn into_inner(self) -> Settings {
        self.0
    }
}

// Implement Deref to allow transparent access to Settings fields
impl std::ops::Deref for ValidatedSettings {
    type Target = Settings;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::RecordKind;
    use tempfile::TempDir;

    const NIOS: &str = r#"
[nios]
host = "gm.example.com"
username = "admin"
password = "secret"
"#;

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, body).unwrap();
        path
    }

    #[tokio::test]
    async fn loads_resources_and_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            &format!(
                r#"{NIOS}
[[resource]]
address = "block"
kind = "cname_ipaddress"
fields = {{ name = "10.0.0.0/8.rpz.local", canonical = "", rp_zone = "rpz.local" }}
extattrs = {{ site = "hq" }}

[[resource]]
address = "mail"
kind = "mx"
import = "record:rpz:mx/ZG5z:mail.rpz.local/default"
fields = {{ name = "mail.rpz.local", mail_exchanger = "mx.local", preference = 10, rp_zone = "rpz.local" }}
"#
            ),
        );

        let manager = ConfigManager::from_path(path).unwrap();
        let settings = manager.get_settings().await;

        assert_eq!(settings.get_log_level(), "info");
        assert_eq!(settings.update.interval, 0);
        assert_eq!(settings.nios.wapi_version, "2.13.7");
        assert_eq!(settings.resources.len(), 2);
        assert_eq!(settings.resources[0].kind, RecordKind::CnameIpaddress);
        assert_eq!(
            settings.resources[0].extattrs.as_ref().unwrap()["site"].as_deref(),
            Some("hq")
        );
        assert_eq!(settings.resources[1].fields["preference"], 10);
        assert!(settings.resources[1].import.is_some());
        drop(settings);

        assert_eq!(
            manager.get_state_path().await,
            dir.path().join(DEFAULT_STATE_FILE)
        );
    }

    #[tokio::test]
    async fn relative_state_path_follows_config_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            &format!("{NIOS}\n[state]\npath = \"data/state.json\"\n"),
        );

        let manager = ConfigManager::from_path(path).unwrap();

        assert_eq!(
            manager.get_state_path().await,
            dir.path().join("data").join("state.json")
        );
    }

    #[test]
    fn rejects_invalid_log_level() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, &format!("[log]\nlevel = \"loud\"\n{NIOS}"));

        let err = ConfigManager::from_path(path).err().unwrap();

        assert!(err.to_string().contains("Invalid log level"));
    }

    #[test]
    fn rejects_missing_password() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[nios]\nhost = \"gm\"\nusername = \"admin\"\n");

        let err = ConfigManager::from_path(path).err().unwrap();

        assert!(err.to_string().contains("password"));
    }

    #[test]
    fn rejects_duplicate_and_invalid_resources() {
        let dir = TempDir::new().unwrap();
        let record = r#"
[[resource]]
address = "web"
kind = "a"
fields = { name = "web.rpz.local", ipv4addr = "10.0.0.1", rp_zone = "rpz.local" }
"#;
        let path = write_config(&dir, &format!("{NIOS}{record}{record}"));
        let err = ConfigManager::from_path(path).err().unwrap();
        assert!(err.to_string().contains("more than once"));

        let path = write_config(
            &dir,
            &format!(
                "{NIOS}\n[[resource]]\naddress = \"web\"\nkind = \"a\"\nfields = {{ name = \"web\", ipv4addr = \"fe80::1\", rp_zone = \"rpz.local\" }}\n"
            ),
        );
        let err = ConfigManager::from_path(path).err().unwrap();
        assert!(err.to_string().contains("Resource 'web' is invalid"));
    }

    #[test]
    fn environment_overrides_nested_keys() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "[nios]\nhost = \"gm\"\nusername = \"admin\"\npassword = \"\"\n",
        );
        let vars = config::Map::from([(
            "NIOS_RPZ_NIOS__PASSWORD".to_string(),
            "from-env".to_string(),
        )]);

        let settings = ConfigManager::load_settings_with(
            &path,
            ConfigManager::environment().source(Some(vars)),
        )
        .unwrap();

        assert_eq!(settings.nios.password, "from-env");
        assert_eq!(settings.nios.username, "admin");
        assert!(ValidatedSettings::new(settings).is_ok());
    }

    #[test]
    fn default_config_parses() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        ConfigManager::ensure_config_file_exists(&path).unwrap();
        let settings = ConfigManager::load_settings(&path).unwrap();

        assert_eq!(settings.nios.host, "gridmaster.example.com");
        assert!(settings.resources.is_empty());
    }
}
