use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// JSON file holding every record.
    #[serde(default = "default_data_file")]
    pub data_file: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// People allowed to sign a movement (drives the form select).
    #[serde(default = "default_responsibles")]
    pub responsibles: Vec<String>,
    #[serde(default = "default_pending_days")]
    pub pending_after_days: u32,
    #[serde(default = "default_max_note_len")]
    pub max_note_len: usize,
}

fn default_data_file() -> String {
    Config::data_file_path().to_string_lossy().to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_request_timeout() -> u64 {
    30
}
fn default_responsibles() -> Vec<String> {
    vec![
        "Fulano".to_string(),
        "Ciclano".to_string(),
        "Beltrano".to_string(),
    ]
}
fn default_pending_days() -> u32 {
    crate::core::status::PENDING_AFTER_DAYS
}
fn default_max_note_len() -> usize {
    200
}

impl Default for Config {
    fn default() -> Self {
        Self::with_data_file(Self::data_file_path())
    }
}

impl Config {
    pub fn with_data_file(path: impl AsRef<Path>) -> Self {
        Self {
            data_file: path.as_ref().to_string_lossy().to_string(),
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
            responsibles: default_responsibles(),
            pending_after_days: default_pending_days(),
            max_note_len: default_max_note_len(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("hwcontrol")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".hwcontrol")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("hwcontrol.conf")
    }

    /// Return the default path of the record file
    pub fn data_file_path() -> PathBuf {
        Self::config_dir().join("records.json")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {e}", path.display())))?;
        let mut cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {e}", path.display())))?;
        cfg.data_file = expand_tilde(&cfg.data_file).to_string_lossy().to_string();
        Ok(cfg)
    }

    /// `HWCONTROL_HOST` / `HWCONTROL_PORT` take precedence over the file.
    pub fn apply_env_overrides(&mut self) -> AppResult<()> {
        if let Ok(host) = env::var("HWCONTROL_HOST") {
            self.host = host;
        }
        if let Ok(port) = env::var("HWCONTROL_PORT") {
            self.port = port
                .parse()
                .map_err(|_| AppError::Config(format!("HWCONTROL_PORT is not a port: {port}")))?;
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Initialize configuration and record files
    pub fn init_all(custom_data: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        // Record file: user provided or default
        let data_path = match custom_data {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::data_file_path(),
        };

        let config = Self::with_data_file(&data_path);

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file())
                .map_err(|e| AppError::ConfigSave(e.to_string()))?;
            file.write_all(yaml.as_bytes())
                .map_err(|e| AppError::ConfigSave(e.to_string()))?;
        }

        // Create empty record file if not exists
        if !data_path.exists() {
            if let Some(parent) = data_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&data_path, "[]")?;
        }

        Ok(config)
    }
}
