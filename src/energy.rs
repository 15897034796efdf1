//! Energy-management result

use serde::{Deserialize, Serialize};
use std::fmt;

/// Snapshot of a device after an energy-management run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyManagementResult {
    /// Reported device state (e.g. "Standby")
    pub device_status: String,
    pub energy_saving_mode: bool,
    pub temperature_regulation_active: bool,
    /// Energy consumed so far, in kWh
    pub total_energy_used: f64,
}

impl EnergyManagementResult {
    pub fn new(
        device_status: impl Into<String>,
        energy_saving_mode: bool,
        temperature_regulation_active: bool,
        total_energy_used: f64,
    ) -> Self {
        Self {
            device_status: device_status.into(),
            energy_saving_mode,
            temperature_regulation_active,
            total_energy_used,
        }
    }
}

impl fmt::Display for EnergyManagementResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EnergyManagementResult(device_status={}, energy_saving_mode={}, \
             temperature_regulation_active={}, total_energy_used={})",
            self.device_status,
            flag(self.energy_saving_mode),
            flag(self.temperature_regulation_active),
            self.total_energy_used
        )
    }
}

/// Flags render as `True` / `False`
fn flag(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}
