//! Record and config fixtures shared by the packages' tests.

use serde_json::{Map, Value};

use braid_config::{Config, Folding, ProviderConfig};
use braid_domain::Record;

pub fn record(id: &str) -> Record {
	Record::new(id)
}

/// A record carrying an embedded (denormalized) parent reference.
pub fn child(id: &str, parent_id: &str) -> Record {
	let mut record = Record::new(id);

	record.parent = Some(Box::new(Record::new(parent_id)));

	record
}

pub fn self_parented(id: &str) -> Record {
	child(id, id)
}

/// A record whose payload exposes a grouping key under `field`.
pub fn keyed(id: &str, field: &str, key: &str) -> Record {
	let mut record = Record::new(id);

	record.payload.insert(field.to_string(), Value::String(key.to_string()));

	record
}

/// The ids of a record sequence, in order. Handy for tree-shape assertions.
pub fn ids(records: &[Record]) -> Vec<&str> {
	records.iter().map(|record| record.id.as_str()).collect()
}

pub fn config(field: &str) -> Config {
	Config {
		folding: Folding {
			field: field.to_string(),
			expansion_enabled: true,
			max_expansion_results: 100,
			expansion_query_override: None,
		},
		provider: ProviderConfig {
			api_base: "http://localhost:8080".to_string(),
			api_key: "key".to_string(),
			path: "/rest/search".to_string(),
			timeout_ms: 1_000,
			default_headers: Map::new(),
		},
	}
}
