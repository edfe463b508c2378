use serde_json::json;

use braid_domain::Record;

#[test]
fn deserializes_denormalized_parent_chain() {
	let raw = json!({
		"id": "reply-2",
		"payload": { "conversationid": "conv-1" },
		"parent": {
			"id": "reply-1",
			"parent": { "id": "origin" }
		}
	});
	let record: Record = serde_json::from_value(raw).expect("Failed to deserialize record.");

	assert_eq!(record.id, "reply-2");

	let parent = record.parent.as_deref().expect("Missing embedded parent.");

	assert_eq!(parent.id, "reply-1");
	assert_eq!(parent.parent.as_deref().map(|p| p.id.as_str()), Some("origin"));
}

#[test]
fn absent_id_deserializes_to_empty_string() {
	let record: Record = serde_json::from_value(json!({ "payload": {} }))
		.expect("A record without an id must still deserialize.");

	assert!(record.id.is_empty());
}

#[test]
fn field_value_reads_only_string_payload_fields() {
	let mut record = Record::new("a");
	record.payload.insert("conversationid".to_string(), json!("conv-1"));
	record.payload.insert("size".to_string(), json!(42));

	assert_eq!(record.field_value("conversationid"), Some("conv-1"));
	assert_eq!(record.field_value("size"), None);
	assert_eq!(record.field_value("missing"), None);
}

#[test]
fn detects_self_parented_records() {
	let mut record = Record::new("a");

	assert!(!record.is_self_parented());

	record.parent = Some(Box::new(Record::new("a")));

	assert!(record.is_self_parented());

	record.parent = Some(Box::new(Record::new("b")));

	assert!(!record.is_self_parented());
}

#[test]
fn serialization_skips_empty_parent_and_children() {
	let value = serde_json::to_value(Record::new("a")).expect("Failed to serialize record.");
	let object = value.as_object().expect("Record must serialize to an object.");

	assert!(!object.contains_key("parent"));
	assert!(!object.contains_key("children"));
}
