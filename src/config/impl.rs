use std::sync::OnceLock;

use super::StaticConfig;
use crate::errors::Result;

static CONFIG: OnceLock<StaticConfig> = OnceLock::new();

/// Load, validate and install the global configuration.
///
/// A second call returns the already installed value; configuration is
/// never reloaded at runtime.
pub fn init_config(path: Option<&str>) -> Result<&'static StaticConfig> {
    if let Some(existing) = CONFIG.get() {
        return Ok(existing);
    }

    let config = StaticConfig::load(path)?;
    super::validators::validate_config(&config)?;
    Ok(CONFIG.get_or_init(|| config))
}
