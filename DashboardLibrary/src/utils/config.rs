use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use crate::utils::logging::*;

lazy_static! {
    static ref CONFIG: RwLock<Config> = RwLock::new(Config::new());
}

#[derive(Debug, Deserialize)]
struct ConfigTable {
    #[serde(rename = "Config")]
    config: Config,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub http_server_bind_port: u16, //port
    pub bind_retry_duration: u64, //seconds
    pub upload_folder: PathBuf, //path
    pub results_folder: PathBuf, //path
    pub water_model_path: PathBuf, //path
    pub rubbish_model_path: PathBuf, //path
    pub python_interpreter: String,
    pub inference_script: PathBuf, //path
    pub confidence: f32, //0..=1
    pub border_width: u32, //pixels
    pub font_path: Option<PathBuf>, //path, embedded font when unset
    pub font_size: f32, //pixels
    pub session_lifetime: u64, //seconds
    pub purge_interval: u64, //seconds
}

impl Default for Config {
    fn default() -> Self {
        #[cfg(target_os = "windows")]
        let python_interpreter = "python".to_string();
        #[cfg(not(target_os = "windows"))]
        let python_interpreter = "python3".to_string();
        Self {
            http_server_bind_port: 5000,
            bind_retry_duration: 5,
            upload_folder: PathBuf::from("static/uploads"),
            results_folder: PathBuf::from("static/results"),
            water_model_path: PathBuf::from("water_hyacinth.pt"),
            rubbish_model_path: PathBuf::from("rubbish.pt"),
            python_interpreter,
            inference_script: PathBuf::from("Script/ultralytics/detect.py"),
            confidence: 0.25,
            border_width: 3,
            font_path: None,
            font_size: 18.0,
            session_lifetime: 86400,
            purge_interval: 300,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        //Seriously, the program must be terminated on a broken configuration.
        let config = match Self::load(Path::new("./dashboard.toml")) {
            Ok(config) => config,
            Err(entry) => {
                logging_console!(entry);
                panic!("Invalid configuration file");
            }
        };
        config.with_port_override(env::var("PORT").ok())
    }

    /// Reads the configuration file, falling back to the built-in defaults
    /// when it does not exist.
    pub fn load(path: &Path) -> Result<Self, LogEntry> {
        match fs::read_to_string(path) {
            Ok(toml_string) => Self::from_toml(&toml_string),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                logging_console!(notice_entry!(SystemEntry::ConfigNotFound));
                Ok(Self::default())
            }
            Err(err) => Err(emergency_entry!(IOEntry::ReadFileError(path.display(), err))),
        }
    }

    pub fn from_toml(toml_string: &str) -> Result<Self, LogEntry> {
        let config = toml::from_str::<ConfigTable>(toml_string)
            .map_err(|err| emergency_entry!(IOEntry::TomlDeserializeError(err)))?
            .config;
        if !Self::validate(&config) {
            return Err(emergency_entry!(SystemEntry::InvalidConfig));
        }
        Ok(config)
    }

    /// `PORT` from the environment wins over the configured port.
    pub fn with_port_override(mut self, port: Option<String>) -> Self {
        if let Some(port) = port {
            match port.trim().parse::<u16>() {
                Ok(port) if port > 0 => self.http_server_bind_port = port,
                _ => logging_console!(warning_entry!(SystemEntry::InvalidPortOverride(port))),
            }
        }
        self
    }

    pub async fn now() -> Config {
        CONFIG.read().await.clone()
    }

    pub fn validate(config: &Config) -> bool {
        Config::validate_port(config.http_server_bind_port)
            && Config::validate_second(config.bind_retry_duration)
            && Config::validate_confidence(config.confidence)
            && Config::validate_border_width(config.border_width)
            && Config::validate_font_size(config.font_size)
            && Config::validate_session_lifetime(config.session_lifetime)
            && Config::validate_second(config.purge_interval)
            && config.purge_interval > 0
    }

    fn validate_port(port: u16) -> bool {
        port > 0
    }

    fn validate_second(second: u64) -> bool {
        second <= 3600
    }

    fn validate_confidence(confidence: f32) -> bool {
        confidence > 0_f32 && confidence <= 1_f32
    }

    fn validate_border_width(width: u32) -> bool {
        width > 0_u32 && width <= 64_u32
    }

    fn validate_font_size(size: f32) -> bool {
        size > 0_f32
    }

    fn validate_session_lifetime(second: u64) -> bool {
        second > 0 && second <= 7 * 86400
    }
}
