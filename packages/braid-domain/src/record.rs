use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One raw result entry from a search response.
///
/// Search backends denormalize conversations: a child record may carry a full
/// embedded copy of its parent, which in turn may carry its own parent, and
/// the same logical record can show up at several positions in one response.
/// Folding reconciles all of that into a tree; on output `children` holds the
/// resolved children and `parent` a thin reference to the resolved parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
	/// Unique key within one fold operation. An absent id deserializes to the
	/// empty string so that a single malformed record can be rejected on its
	/// own instead of failing the whole batch.
	#[serde(default)]
	pub id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parent: Option<Box<Record>>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub children: Vec<Record>,
	/// Opaque caller data. The engine only ever reads the grouping-key field
	/// out of it.
	#[serde(default)]
	pub payload: Map<String, Value>,
}

impl Record {
	pub fn new(id: impl Into<String>) -> Self {
		Self { id: id.into(), parent: None, children: Vec::new(), payload: Map::new() }
	}

	/// Looks up a string field in the payload. Used to read the grouping key
	/// of records that support expansion.
	pub fn field_value(&self, field: &str) -> Option<&str> {
		self.payload.get(field).and_then(Value::as_str)
	}

	/// A record whose embedded parent is itself carries no usable parentage.
	pub fn is_self_parented(&self) -> bool {
		self.parent.as_ref().map(|parent| parent.id == self.id).unwrap_or(false)
	}
}
