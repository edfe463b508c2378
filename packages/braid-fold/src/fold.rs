use std::collections::HashMap;

use tracing::{debug, warn};

use braid_domain::Record;

/// Score of the synthetic root and of parents that were only ever seen as an
/// embedded reference. Sorts last among siblings; the root is never sorted at
/// all.
const SENTINEL_SCORE: usize = usize::MAX;

type NodeId = usize;

const ROOT: NodeId = 0;

/// Result of one fold operation. Rejected records never abort the fold; they
/// are collected here for the caller to inspect.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FoldOutcome {
	pub records: Vec<Record>,
	pub rejected: Vec<RejectedRecord>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RejectedRecord {
	pub position: usize,
	pub reason: RejectReason,
	pub record: Record,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
	EmptyId,
}

/// Internal wrapper around a [`Record`] while the tree is being built.
///
/// Nodes live in an id-indexed arena and reference each other through arena
/// handles only, so the denormalized recursive parent references of the input
/// can never form an owning cycle.
struct ThreadNode {
	/// Stripped copy of the record this node wraps. Holds an embedded parent
	/// reference until the id's own record shows up and claims the node.
	record: Record,
	/// Minimum original input position among this node and its whole subtree.
	score: usize,
	parent: NodeId,
	children: Vec<NodeId>,
	claimed: bool,
}

struct Arena {
	nodes: Vec<ThreadNode>,
	by_id: HashMap<String, NodeId>,
}

impl Arena {
	fn new() -> Self {
		let root = ThreadNode {
			record: Record::new(""),
			score: SENTINEL_SCORE,
			parent: ROOT,
			children: Vec::new(),
			claimed: false,
		};

		Self { nodes: vec![root], by_id: HashMap::new() }
	}

	/// Returns the node registered for `record.id`, creating it at `score`
	/// when the id has not been seen in this fold yet. The second value tells
	/// whether the node was created by this call.
	fn get_or_create(&mut self, record: &Record, score: usize) -> (NodeId, bool) {
		if let Some(&node) = self.by_id.get(&record.id) {
			return (node, false);
		}

		let node = self.nodes.len();

		self.nodes.push(ThreadNode {
			record: strip(record),
			score,
			parent: ROOT,
			children: Vec::new(),
			claimed: false,
		});
		self.by_id.insert(record.id.clone(), node);

		(node, true)
	}

	/// Resolves the node for a record occurring at `position` in the input.
	///
	/// A node first materialized as an embedded parent reference keeps the
	/// sentinel score and the thin embedded copy until the id occurs in the
	/// input itself; that occurrence lowers the score and takes over the
	/// content. For duplicate occurrences the first record's content wins
	/// while the score takes the minimum position.
	fn claim(&mut self, record: &Record, position: usize) -> (NodeId, bool) {
		let (node, created) = self.get_or_create(record, position);

		if !created {
			let entry = &mut self.nodes[node];

			entry.score = entry.score.min(position);

			if !entry.claimed {
				entry.record = strip(record);
			}
		}

		self.nodes[node].claimed = true;

		(node, created)
	}

	fn attach(&mut self, parent: NodeId, child: NodeId) {
		self.nodes[parent].children.push(child);
		self.nodes[child].parent = parent;
	}

	/// Removes `node` from its current parent's children. The node is always
	/// reattached right after; a child belongs to exactly one parent at any
	/// time.
	fn detach(&mut self, node: NodeId) {
		let parent = self.nodes[node].parent;

		self.nodes[parent].children.retain(|&child| child != node);
	}

	/// Walks upward from `from`, lowering every ancestor whose score is still
	/// greater than `score`. Stops at the first ancestor that is already as
	/// low, or at the synthetic root.
	fn propagate_score(&mut self, from: NodeId, score: usize) {
		let mut current = from;

		while current != ROOT && self.nodes[current].score > score {
			self.nodes[current].score = score;
			current = self.nodes[current].parent;
		}
	}
}

/// Folds a flat, possibly denormalized record sequence into an ordered tree.
///
/// The input order is the relevance signal: siblings end up sorted by the
/// minimum original position found anywhere in their subtree. Records whose
/// embedded parent has not appeared yet hang off a placeholder that a later
/// occurrence of the parent id claims. A record that names itself as its own
/// parent is treated as top-level. The caller's records are never mutated.
pub fn fold(records: &[Record]) -> FoldOutcome {
	let mut arena = Arena::new();
	let mut rejected = Vec::new();

	for (position, record) in records.iter().enumerate() {
		if record.id.is_empty() {
			warn!(position, "Rejected a record with an empty id.");
			rejected.push(RejectedRecord {
				position,
				reason: RejectReason::EmptyId,
				record: record.clone(),
			});

			continue;
		}

		let (node, created) = arena.claim(record, position);
		let parent_ref = match record.parent.as_deref().filter(|parent| !parent.id.is_empty()) {
			Some(parent) if parent.id == record.id => {
				debug!(id = record.id.as_str(), "Self-parented record demoted to top level.");

				None
			},
			other => other,
		};

		match parent_ref {
			None => {
				// A known id stays wherever it is currently attached;
				// re-adding it would duplicate the node.
				if created {
					arena.attach(ROOT, node);
				}
			},
			Some(parent_record) => {
				if !created {
					arena.detach(node);
				}

				let (parent, parent_created) = arena.get_or_create(parent_record, SENTINEL_SCORE);

				if parent_created {
					arena.attach(ROOT, parent);
				}

				arena.attach(parent, node);

				let score = arena.nodes[node].score;

				arena.propagate_score(parent, score);
			},
		}
	}

	FoldOutcome { records: flatten(&arena), rejected }
}

/// Normalizes one search result that carries its thread as pre-existing
/// nesting: the result and its embedded children are folded as a single flat
/// batch with the result first, and the first top-level output becomes the
/// resolved result. Any unrelated top-level output is kept as an extra child
/// rather than dropped.
pub fn fold_result(record: Record) -> FoldOutcome {
	let mut top = record;
	let nested = std::mem::take(&mut top.children);
	let mut flat = Vec::with_capacity(nested.len() + 1);

	flat.push(top);
	flat.extend(nested);

	let FoldOutcome { mut records, rejected } = fold(&flat);

	if records.is_empty() {
		return FoldOutcome { records, rejected };
	}

	let mut top = records.remove(0);

	top.children.extend(records);

	FoldOutcome { records: vec![top], rejected }
}

fn flatten(arena: &Arena) -> Vec<Record> {
	let mut top = arena.nodes[ROOT].children.clone();

	top.sort_by_key(|&node| arena.nodes[node].score);

	top.iter().map(|&node| emit(arena, node, None)).collect()
}

fn emit(arena: &Arena, node: NodeId, parent: Option<&Record>) -> Record {
	let entry = &arena.nodes[node];
	let mut out = entry.record.clone();

	out.parent = parent.cloned().map(Box::new);

	let stub = strip(&out);
	let mut children = entry.children.clone();

	children.sort_by_key(|&child| arena.nodes[child].score);

	out.children = children.iter().map(|&child| emit(arena, child, Some(&stub))).collect();

	out
}

/// Thin copy carrying only identity and payload. Used both for node content
/// and for the parent references on output, which keeps output records
/// acyclic and bounded.
fn strip(record: &Record) -> Record {
	Record {
		id: record.id.clone(),
		parent: None,
		children: Vec::new(),
		payload: record.payload.clone(),
	}
}
