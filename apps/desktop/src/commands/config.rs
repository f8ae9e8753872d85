//! # Config Commands

use tracing::debug;

use crate::state::ConfigState;

/// Current configuration, read once by the UI at startup.
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}
