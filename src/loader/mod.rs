use futures::stream::FuturesUnordered;
use futures::StreamExt;
use indicatif::ProgressBar;
use thiserror::Error;
use tracing::{debug, info};

use crate::fetcher::{EntityRecord, FetchError, RecordSource};
use crate::index::{merge_sort_by_id, EntityIndex};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("batch load failed at #{id}: {source}")]
    Fetch {
        id: u32,
        #[source]
        source: FetchError,
    },
}

// Starts one fetch per id in 1..=count before polling any of them, then joins.
// The first failure aborts the join and drops every fetch still in flight.
// Records come back in completion order.
pub async fn load_batch<S: RecordSource>(
    source: &S,
    count: u32,
    pb: &ProgressBar,
) -> Result<Vec<EntityRecord>, LoadError> {
    let mut in_flight: FuturesUnordered<_> = (1..=count).map(|id| source.fetch(id)).collect();
    debug!(count, "batch issued");

    let mut records = Vec::with_capacity(count as usize);
    while let Some(result) = in_flight.next().await {
        pb.inc(1);
        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                return Err(LoadError::Fetch {
                    id: e.id(),
                    source: e,
                })
            }
        }
    }
    Ok(records)
}

// fetch, join, order, index
pub async fn load_index<S: RecordSource>(
    source: &S,
    count: u32,
    pb: &ProgressBar,
) -> Result<EntityIndex, LoadError> {
    let batch = load_batch(source, count, pb).await?;
    let index = EntityIndex::new(merge_sort_by_id(batch));
    info!(records = index.len(), "index built");
    Ok(index)
}
