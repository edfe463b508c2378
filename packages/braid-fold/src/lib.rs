mod error;
pub mod expand;
mod fold;

pub use error::{Error, Result};
pub use expand::Expander;
pub use fold::{FoldOutcome, RejectReason, RejectedRecord, fold, fold_result};

use std::{future::Future, pin::Pin};

use braid_domain::Record;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The single capability the engine needs from the expansion transport:
/// fetch more records for a grouping key. Implementations own query
/// construction and wire mechanics; the engine only folds what comes back.
pub trait FetchProvider
where
	Self: Send + Sync,
{
	fn fetch<'a>(
		&'a self,
		grouping_key: &'a str,
		max_results: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Record>>>;
}
