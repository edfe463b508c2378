use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub folding: Folding,
	pub provider: ProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Folding {
	/// The payload field holding the grouping key shared by all records of one
	/// conversation.
	pub field: String,
	#[serde(default = "default_expansion_enabled")]
	pub expansion_enabled: bool,
	#[serde(default = "default_max_expansion_results")]
	pub max_expansion_results: u32,
	/// Optional constant expression appended to every expansion query.
	#[serde(default)]
	pub expansion_query_override: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
	pub api_base: String,
	#[serde(default)]
	pub api_key: String,
	pub path: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

fn default_expansion_enabled() -> bool {
	true
}

fn default_max_expansion_results() -> u32 {
	100
}
