use glasses_core::ColorChoice;
use glasses_hw::capability::{DEFAULT_DEV_ROOT, DEFAULT_SYSFS_ROOT};
use glasses_hw::{CapabilityProbe, FacePose, FixedProbe, SysfsProbe};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Shell configuration: defaults, then an optional TOML file named by
/// `GLASSES_CONFIG`, then `GLASSES_*` environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Lens color selected on mount.
    pub initial_color: ColorChoice,
    /// Forces the capability check; `None` probes the hardware.
    pub face_tracking: Option<bool>,
    /// sysfs directory listing V4L2 nodes.
    pub video_sysfs_root: PathBuf,
    /// Directory holding the `videoN` device nodes.
    pub video_dev_root: PathBuf,
    /// Whether the tracking session estimates scene lighting.
    pub light_estimation: bool,
    /// Capacity of the presenter request queue.
    pub request_queue: usize,
    /// Fixed face pose for headless runs without a tracker.
    pub face_pose: Option<FacePose>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_color: ColorChoice::default(),
            face_tracking: None,
            video_sysfs_root: PathBuf::from(DEFAULT_SYSFS_ROOT),
            video_dev_root: PathBuf::from(DEFAULT_DEV_ROOT),
            light_estimation: true,
            request_queue: 4,
            face_pose: None,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` in place of the environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match lookup("GLASSES_CONFIG") {
            Some(path) => Self::from_file(PathBuf::from(path))?,
            None => Self::default(),
        };

        if let Some(v) = lookup("GLASSES_INITIAL_COLOR") {
            config.initial_color = v.parse().map_err(|_| ConfigError::InvalidValue {
                key: "GLASSES_INITIAL_COLOR",
                value: v.clone(),
            })?;
        }
        if let Some(v) = lookup("GLASSES_FACE_TRACKING") {
            config.face_tracking = Some(env_flag("GLASSES_FACE_TRACKING", &v)?);
        }
        if let Some(v) = lookup("GLASSES_VIDEO_SYSFS_ROOT") {
            config.video_sysfs_root = PathBuf::from(v);
        }
        if let Some(v) = lookup("GLASSES_VIDEO_DEV_ROOT") {
            config.video_dev_root = PathBuf::from(v);
        }
        if let Some(v) = lookup("GLASSES_LIGHT_ESTIMATION") {
            config.light_estimation = env_flag("GLASSES_LIGHT_ESTIMATION", &v)?;
        }
        if let Some(v) = lookup("GLASSES_REQUEST_QUEUE") {
            config.request_queue = v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "GLASSES_REQUEST_QUEUE",
                value: v.clone(),
            })?;
        }

        config.validate()
    }

    /// Check the merged file and environment layers.
    fn validate(self) -> Result<Self, ConfigError> {
        if self.request_queue == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_queue",
                value: self.request_queue.to_string(),
            });
        }
        Ok(self)
    }

    /// Parse a TOML config file. Missing keys take their defaults.
    pub fn from_file(path: PathBuf) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Capability probe selected by this configuration.
    pub fn probe(&self) -> Box<dyn CapabilityProbe> {
        match self.face_tracking {
            Some(forced) => {
                tracing::info!(supported = forced, "face tracking capability forced by config");
                Box::new(FixedProbe(forced))
            }
            None => Box::new(self.sysfs_probe()),
        }
    }

    /// Hardware probe over the configured V4L2 roots, ignoring any override.
    pub fn sysfs_probe(&self) -> SysfsProbe {
        SysfsProbe::new(self.video_sysfs_root.clone(), self.video_dev_root.clone())
    }
}

fn env_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}
