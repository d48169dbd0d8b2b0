//! racadm subcommands the probe is allowed to issue.

use std::fmt;
use std::str::FromStr;

use crate::error::ProbeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportCommand {
    GetSensorInfo,
    Raid,
}

impl ReportCommand {
    pub const VARIANTS: [ReportCommand; 2] = [ReportCommand::GetSensorInfo, ReportCommand::Raid];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportCommand::GetSensorInfo => "getsensorinfo",
            ReportCommand::Raid => "raid",
        }
    }
}

impl fmt::Display for ReportCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportCommand {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportCommand::VARIANTS
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                ProbeError::Validation(format!("unknown command '{}' (valid: getsensorinfo, raid)", s))
            })
    }
}
