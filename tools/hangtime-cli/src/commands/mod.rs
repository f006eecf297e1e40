pub mod config;
pub mod detect;
pub mod height;

use hangtime_common::config::AppConfig;
use hangtime_jump_model::height::HeightUnit;

/// Unit from the command line, else from the config file.
pub fn resolve_unit(config: &AppConfig, unit: Option<HeightUnit>) -> anyhow::Result<HeightUnit> {
    match unit {
        Some(unit) => Ok(unit),
        None => config
            .display_unit
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid display_unit in config: {e}")),
    }
}
