use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use braid_config::{Config, Error};

const SAMPLE_CONFIG_TOML: &str = r#"
[folding]
field = "conversationid"

[provider]
api_base = "http://localhost:8080"
api_key = "key"
path = "/rest/search"
timeout_ms = 5000
"#;

fn parse(raw: &str) -> Config {
	let mut cfg: Config = toml::from_str(raw).expect("Failed to parse sample config.");

	braid_config::normalize(&mut cfg);

	cfg
}

fn temp_config_path() -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now().duration_since(UNIX_EPOCH).expect("Clock went backwards.");
	let unique = COUNTER.fetch_add(1, Ordering::Relaxed);

	env::temp_dir().join(format!("braid_config_{}_{unique}.toml", nanos.as_nanos()))
}

#[test]
fn loads_sample_config_from_disk() {
	let path = temp_config_path();

	fs::write(&path, SAMPLE_CONFIG_TOML).expect("Failed to write sample config.");

	let cfg = braid_config::load(&path).expect("Failed to load sample config.");

	fs::remove_file(&path).expect("Failed to remove sample config.");

	assert_eq!(cfg.folding.field, "conversationid");
	assert_eq!(cfg.provider.timeout_ms, 5_000);
}

#[test]
fn load_reports_missing_file() {
	let err = braid_config::load(&temp_config_path()).expect_err("Missing file must fail.");

	assert!(matches!(err, Error::ReadConfig { .. }));
}

#[test]
fn applies_defaults() {
	let cfg = parse(SAMPLE_CONFIG_TOML);

	assert!(cfg.folding.expansion_enabled);
	assert_eq!(cfg.folding.max_expansion_results, 100);
	assert_eq!(cfg.folding.expansion_query_override, None);
}

#[test]
fn normalizes_field_and_empty_override() {
	let raw = SAMPLE_CONFIG_TOML
		.replace("field = \"conversationid\"", "field = \" conversationid \"\nexpansion_query_override = \"  \"");
	let cfg = parse(&raw);

	assert_eq!(cfg.folding.field, "conversationid");
	assert_eq!(cfg.folding.expansion_query_override, None);
}

#[test]
fn rejects_empty_field() {
	let raw = SAMPLE_CONFIG_TOML.replace("field = \"conversationid\"", "field = \"  \"");
	let err = braid_config::validate(&parse(&raw)).expect_err("Empty field must fail validation.");

	assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn rejects_zero_expansion_results() {
	let raw = SAMPLE_CONFIG_TOML
		.replace("field = \"conversationid\"", "field = \"conversationid\"\nmax_expansion_results = 0");
	let err = braid_config::validate(&parse(&raw))
		.expect_err("Zero max_expansion_results must fail validation.");

	assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn rejects_zero_timeout() {
	let raw = SAMPLE_CONFIG_TOML.replace("timeout_ms = 5000", "timeout_ms = 0");
	let err =
		braid_config::validate(&parse(&raw)).expect_err("Zero timeout must fail validation.");

	assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn rejects_missing_api_base_only_when_expansion_enabled() {
	let raw = SAMPLE_CONFIG_TOML.replace("api_base = \"http://localhost:8080\"", "api_base = \"\"");

	assert!(braid_config::validate(&parse(&raw)).is_err());

	let disabled = raw
		.replace("field = \"conversationid\"", "field = \"conversationid\"\nexpansion_enabled = false");

	braid_config::validate(&parse(&disabled))
		.expect("Empty api_base must be fine when expansion is disabled.");
}
