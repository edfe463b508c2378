use std::sync::Arc;

use tracing::debug;

use braid_config::Config;
use braid_domain::Record;
use braid_providers::search::{self, ExpandQuery};

use crate::{BoxFuture, Error, FetchProvider, FoldOutcome, Result, fold};

/// Fetches and folds the remainder of a thread on demand.
///
/// Every call runs an entirely independent fold over the fetched batch; no
/// node or score is shared with the tree the caller is already displaying,
/// and a failed fetch leaves that tree untouched.
pub struct Expander {
	cfg: Config,
	fetcher: Arc<dyn FetchProvider>,
}

struct HttpFetcher {
	cfg: Config,
}

impl FetchProvider for HttpFetcher {
	fn fetch<'a>(
		&'a self,
		grouping_key: &'a str,
		max_results: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Record>>> {
		Box::pin(search::more_results(&self.cfg.provider, ExpandQuery {
			field: &self.cfg.folding.field,
			grouping_key,
			max_results,
			query_override: self.cfg.folding.expansion_query_override.as_deref(),
		}))
	}
}

impl Expander {
	pub fn new(cfg: Config) -> Self {
		let fetcher = Arc::new(HttpFetcher { cfg: cfg.clone() });

		Self { cfg, fetcher }
	}

	pub fn with_fetcher(cfg: Config, fetcher: Arc<dyn FetchProvider>) -> Self {
		Self { cfg, fetcher }
	}

	/// Whether a record can be expanded at all: expansion must be enabled and
	/// the record's payload must expose the grouping-key field.
	pub fn can_expand(&self, record: &Record) -> bool {
		self.cfg.folding.expansion_enabled
			&& record.field_value(&self.cfg.folding.field).is_some()
	}

	/// Requests up to `max_results` records for the record's grouping key and
	/// folds them as a fresh, independent batch. Issues exactly one fetch;
	/// failures are surfaced verbatim, never retried.
	pub async fn request_more(&self, record: &Record, max_results: u32) -> Result<FoldOutcome> {
		if !self.cfg.folding.expansion_enabled {
			return Err(Error::ExpansionDisabled);
		}

		let field = self.cfg.folding.field.as_str();
		let Some(grouping_key) = record.field_value(field) else {
			return Err(Error::MissingGroupingKey {
				id: record.id.clone(),
				field: field.to_string(),
			});
		};
		let fetched = self.fetcher.fetch(grouping_key, max_results).await?;

		debug!(grouping_key, fetched = fetched.len(), "Folding expansion batch.");

		Ok(fold(&fetched))
	}

	/// [`Self::request_more`] with the configured result bound.
	pub async fn expand(&self, record: &Record) -> Result<FoldOutcome> {
		self.request_more(record, self.cfg.folding.max_expansion_results).await
	}
}
