//! Purge orchestration: full pull-zone purge, then perma-cache cleanup.

use tracing::info;

use crate::api::error::AppError;
use crate::infrastructure::bunny::CdnApi;
use crate::services::cleanup::{self, CleanupTally};

/// Purges the pull zone and, only if the purge succeeds, cleans up the
/// stale perma-cache folders.
///
/// The ordering is load-bearing: perma-cache folders are repopulated as a
/// side effect of the cache refilling after a purge, so cleanup before a
/// successful purge would act on inconsistent state. A failed purge
/// surfaces immediately; there are no retries.
pub async fn purge_and_clean(cdn: &dyn CdnApi) -> Result<CleanupTally, AppError> {
    cdn.purge_cache().await?;
    info!("pull zone purge accepted, starting perma-cache cleanup");
    cleanup::run(cdn).await
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::infrastructure::bunny::CacheFolderEntry;

    struct CountingCdn {
        purge_status: Result<(), u16>,
        list_calls: AtomicUsize,
        delete_calls: AtomicUsize,
    }

    #[async_trait]
    impl CdnApi for CountingCdn {
        async fn purge_cache(&self) -> Result<(), AppError> {
            self.purge_status
                .map_err(|status| AppError::PurgeFailed { status })
        }

        async fn list_perma_cache_folders(&self) -> Result<Vec<CacheFolderEntry>, AppError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![CacheFolderEntry {
                object_name: "perma_1".into(),
            }])
        }

        async fn delete_folder(&self, _object_name: &str) -> Result<(), AppError> {
            self.delete_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_failed_purge_skips_cleanup() {
        let cdn = CountingCdn {
            purge_status: Err(503),
            list_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        };
        let err = purge_and_clean(&cdn).await.unwrap_err();
        assert!(matches!(err, AppError::PurgeFailed { status: 503 }));
        assert_eq!(cdn.list_calls.load(Ordering::SeqCst), 0);
        assert_eq!(cdn.delete_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_successful_purge_runs_cleanup() {
        let cdn = CountingCdn {
            purge_status: Ok(()),
            list_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        };
        let tally = purge_and_clean(&cdn).await.unwrap();
        assert_eq!(tally.total, 1);
        assert_eq!(tally.deleted, 1);
        assert_eq!(cdn.list_calls.load(Ordering::SeqCst), 1);
    }
}
