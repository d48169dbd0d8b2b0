//! Sensor type selector accepted on the command line.

use std::fmt;
use std::str::FromStr;

use crate::error::ProbeError;

/// Sensor categories the probe can be asked about, plus `all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorType {
    Battery,
    Current,
    Intrusion,
    Memory,
    Performance,
    Processor,
    Redundancy,
    SdCard,
    Voltage,
    All,
}

impl SensorType {
    pub const VARIANTS: [SensorType; 10] = [
        SensorType::Battery,
        SensorType::Current,
        SensorType::Intrusion,
        SensorType::Memory,
        SensorType::Performance,
        SensorType::Processor,
        SensorType::Redundancy,
        SensorType::SdCard,
        SensorType::Voltage,
        SensorType::All,
    ];

    /// Selector string handed to the aggregator. Matches the formatted
    /// category name the parser produces (e.g. "SD Card" -> "sd_card").
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorType::Battery => "battery",
            SensorType::Current => "current",
            SensorType::Intrusion => "intrusion",
            SensorType::Memory => "memory",
            SensorType::Performance => "performance",
            SensorType::Processor => "processor",
            SensorType::Redundancy => "redundancy",
            SensorType::SdCard => "sd_card",
            SensorType::Voltage => "voltage",
            SensorType::All => "all",
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorType {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SensorType::VARIANTS
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = SensorType::VARIANTS.iter().map(|t| t.as_str()).collect();
                ProbeError::Validation(format!("unknown sensortype '{}' (valid: {})", s, valid.join(", ")))
            })
    }
}
