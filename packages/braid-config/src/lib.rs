mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Folding, ProviderConfig};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn normalize(cfg: &mut Config) {
	cfg.folding.field = cfg.folding.field.trim().to_string();

	if let Some(override_) = cfg.folding.expansion_query_override.as_ref()
		&& override_.trim().is_empty()
	{
		cfg.folding.expansion_query_override = None;
	}
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.folding.field.trim().is_empty() {
		return Err(Error::Validation { message: "folding.field must be non-empty.".to_string() });
	}
	if cfg.folding.max_expansion_results == 0 {
		return Err(Error::Validation {
			message: "folding.max_expansion_results must be greater than zero.".to_string(),
		});
	}
	if cfg.provider.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "provider.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.folding.expansion_enabled && cfg.provider.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "provider.api_base must be non-empty when expansion is enabled.".to_string(),
		});
	}

	Ok(())
}
