//! Controller configuration files
//!
//! JSON with two optional sections:
//!
//! ```json
//! {
//!   "controller": { "motion": { "base_speed": 4.0 }, "fallback": "hold_last" },
//!   "devices": { "left_sensors": ["ps0", "ps1"] }
//! }
//! ```
//!
//! Anything left out keeps its default.

use std::fs;
use std::path::Path;

use fuzzbot_core::constants::{LEFT_MOTOR, LEFT_SENSORS, RIGHT_MOTOR, RIGHT_SENSORS};
use fuzzbot_core::{ControllerConfig, DeviceMap};
use serde::{Deserialize, Serialize};

use crate::error::{ConnectorError, ConnectorResult};

/// Owned device names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceNames {
    pub left_sensors: [String; 2],
    pub right_sensors: [String; 2],
    pub left_motor: String,
    pub right_motor: String,
}

impl Default for DeviceNames {
    fn default() -> Self {
        Self {
            left_sensors: LEFT_SENSORS.map(String::from),
            right_sensors: RIGHT_SENSORS.map(String::from),
            left_motor: LEFT_MOTOR.to_string(),
            right_motor: RIGHT_MOTOR.to_string(),
        }
    }
}

impl DeviceNames {
    /// Borrowed view for the driver
    pub fn device_map(&self) -> DeviceMap<'_> {
        DeviceMap {
            left_sensors: [&self.left_sensors[0], &self.left_sensors[1]],
            right_sensors: [&self.right_sensors[0], &self.right_sensors[1]],
            left_motor: &self.left_motor,
            right_motor: &self.right_motor,
        }
    }

    /// Both motor names, left first
    pub fn motors(&self) -> [&str; 2] {
        [&self.left_motor, &self.right_motor]
    }
}

/// Contents of a configuration file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerFile {
    pub controller: ControllerConfig,
    pub devices: DeviceNames,
}

/// Read and validate a configuration file
pub fn load_config(path: impl AsRef<Path>) -> ConnectorResult<ControllerFile> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let file: ControllerFile = serde_json::from_str(&text).map_err(|source| ConnectorError::Config {
        path: path.to_path_buf(),
        source,
    })?;

    file.controller.validate()?;
    log::info!("Loaded controller config from {}", path.display());
    Ok(file)
}
