//! Hardware preference passed to the inference runtime.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Where the runtime should place the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceSelection {
    /// Prefer an accelerator when one is present, otherwise use the CPU.
    #[default]
    Auto,
    /// Always run on the CPU.
    Cpu,
}

impl DeviceSelection {
    /// Configuration label for the selection.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Cpu => "cpu",
        }
    }

    /// Whether the runtime may pick accelerated hardware.
    #[must_use]
    pub const fn prefers_accelerator(self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl fmt::Display for DeviceSelection {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

/// Parse error for [`DeviceSelection`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported device '{value}': valid options are 'auto' or 'cpu'")]
pub struct DeviceSelectionParseError {
    value: String,
}

impl FromStr for DeviceSelection {
    type Err = DeviceSelectionParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "cpu" => Ok(Self::Cpu),
            _ => Err(DeviceSelectionParseError {
                value: value.to_owned(),
            }),
        }
    }
}
