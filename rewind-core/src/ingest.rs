//! One-shot series ingestion with observable progress.

use async_trait::async_trait;
use rewind_types::{Candle, LoadProgress, ReplayError, Timeframe};
use tokio::sync::watch;

use crate::store::SeriesStore;

/// Source of raw candle series, one call per timeframe.
///
/// Implementations own file formats, type coercion and de-duplication of their
/// source; the store re-sorts and de-duplicates whatever they return.
#[async_trait]
pub trait SeriesLoader: Send + Sync {
    /// Timeframes this loader can provide, in the order they should be loaded.
    fn timeframes(&self) -> Vec<Timeframe>;

    /// Load the complete series for `timeframe`.
    ///
    /// # Errors
    /// Returns `ReplayError::Loader` (or any other variant) when the series cannot
    /// be produced. The driver logs the failure and moves on to the next timeframe.
    async fn load(&self, timeframe: Timeframe) -> Result<Vec<Candle>, ReplayError>;
}

/// Load every timeframe offered by `loader` into a fresh store.
///
/// Progress is published on `progress` before each timeframe and once more with
/// `ready = true` after the store is built. A timeframe that fails to load is
/// skipped and the store is built from the rest. Dropped receivers are ignored.
///
/// # Errors
/// Returns `DataNotReady` when no timeframe could be loaded at all.
pub async fn load_store<L>(
    loader: &L,
    progress: &watch::Sender<LoadProgress>,
) -> Result<SeriesStore, ReplayError>
where
    L: SeriesLoader + ?Sized,
{
    let timeframes = loader.timeframes();
    let total = timeframes.len();
    let mut store = SeriesStore::new();

    for (completed, tf) in timeframes.into_iter().enumerate() {
        progress.send_replace(LoadProgress {
            completed,
            total,
            current: Some(tf),
            percentage: percentage(completed, total),
            message: format!("Loading {tf} data..."),
            ready: false,
        });

        match loader.load(tf).await {
            Ok(candles) => {
                #[cfg(feature = "tracing")]
                tracing::info!(timeframe = %tf, candles = candles.len(), "series loaded");
                store.insert(tf, candles);
            }
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(timeframe = %tf, error = %_e, "series failed to load; skipping");
            }
        }
    }

    let ready = !store.is_empty();
    let message = if ready {
        "All data loaded successfully!"
    } else {
        "No series could be loaded"
    };
    progress.send_replace(LoadProgress {
        completed: total,
        total,
        current: None,
        percentage: 100.0,
        message: message.to_string(),
        ready,
    });

    if !ready {
        return Err(ReplayError::DataNotReady);
    }
    Ok(store)
}

#[allow(clippy::cast_precision_loss)]
fn percentage(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    completed as f64 / total as f64 * 100.0
}
