//! Perma-cache folder cleanup.
//!
//! Bunny repopulates `__bcdn_perma_cache__/` as the cache refills after a
//! purge, so the folders present before a purge are stale and safe to drop.
//! Deletions are independent remote calls and run concurrently; the pass
//! waits for every one of them to settle and reports a tally instead of
//! failing on the first bad folder.

use std::fmt;

use futures::{StreamExt, stream};
use tracing::{info, warn};

use crate::api::error::AppError;
use crate::infrastructure::bunny::CdnApi;

/// Cap on simultaneous delete requests. Folder counts are operationally
/// bounded (hundreds to low thousands); the cap bounds socket usage.
const MAX_CONCURRENT_DELETES: usize = 32;

/// Outcome of one cleanup pass. `deleted + failed == total` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleanupTally {
    pub total: usize,
    pub deleted: usize,
    pub failed: usize,
}

impl fmt::Display for CleanupTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total folders: {}, Deleted: {}, Failed: {}",
            self.total, self.deleted, self.failed
        )
    }
}

/// Lists all perma-cache folders and deletes them concurrently.
///
/// A failed listing is fatal and no deletes are issued. Once deletes are
/// dispatched, every one of them runs to completion; a single failure is
/// counted, logged and never aborts its siblings. An empty listing is a
/// successful no-op tally.
pub async fn run(cdn: &dyn CdnApi) -> Result<CleanupTally, AppError> {
    let folders = cdn.list_perma_cache_folders().await?;
    let total = folders.len();

    let results: Vec<Result<(), (String, AppError)>> = stream::iter(folders)
        .map(|entry| async move {
            cdn.delete_folder(&entry.object_name)
                .await
                .map_err(|e| (entry.object_name, e))
        })
        .buffer_unordered(MAX_CONCURRENT_DELETES)
        .collect()
        .await;

    let mut tally = CleanupTally {
        total,
        ..Default::default()
    };
    for result in results {
        match result {
            Ok(()) => tally.deleted += 1,
            Err((folder, e)) => {
                warn!(folder = %folder, "perma-cache delete failed: {e}");
                tally.failed += 1;
            }
        }
    }

    info!("perma-cache cleanup finished: {tally}");
    Ok(tally)
}
