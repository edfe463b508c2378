// std
use std::time::Duration as StdDuration;

// crates.io
use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::{Map, Value};

use braid_config::ProviderConfig;
use braid_domain::Record;

/// Expansion query for one thread: all records sharing the grouping key, up
/// to `max_results`.
#[derive(Debug, Clone, Copy)]
pub struct ExpandQuery<'a> {
	pub field: &'a str,
	pub grouping_key: &'a str,
	pub max_results: u32,
	pub query_override: Option<&'a str>,
}

pub async fn more_results(cfg: &ProviderConfig, query: ExpandQuery<'_>) -> Result<Vec<Record>> {
	let client = Client::builder().timeout(StdDuration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = build_expand_body(query);
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_search_response(json)
}

fn build_expand_body(query: ExpandQuery<'_>) -> Value {
	let mut body = Map::new();

	body.insert(
		"aq".to_string(),
		Value::String(format!("@{}==\"{}\"", query.field, query.grouping_key)),
	);
	body.insert("numberOfResults".to_string(), Value::from(query.max_results));

	if let Some(constant) = query.query_override {
		body.insert("cq".to_string(), Value::String(constant.to_string()));
	}

	Value::Object(body)
}

fn parse_search_response(json: Value) -> Result<Vec<Record>> {
	let results = json
		.get("results")
		.cloned()
		.ok_or_else(|| eyre::eyre!("Search response is missing results array."))?;

	Ok(serde_json::from_value(results)?)
}
