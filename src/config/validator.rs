//! Configuration validation

use super::{Interface, MonitorConfig};
use crate::monitor::MonitoringMode;
use anyhow::Result;

/// Validate a resolved configuration before the report starts.
pub fn validate_config(config: &MonitorConfig) -> Result<()> {
    if config.rmid_tracking {
        if config.interface != Interface::Msr {
            anyhow::bail!(
                "RMID tracking requires the msr interface, configured interface is {:?}",
                config.interface
            );
        }
        if config.mode != MonitoringMode::Core {
            anyhow::bail!(
                "RMID tracking is only available in core mode, configured mode is {:?}",
                config.mode
            );
        }
    }

    Ok(())
}
