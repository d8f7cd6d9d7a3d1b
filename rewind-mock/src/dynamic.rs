use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use rewind_core::{Candle, ReplayError, SeriesLoader, Timeframe};

/// Instruction for how a load should behave for a given timeframe.
#[derive(Clone)]
pub enum MockBehavior {
    /// Return the provided candles immediately.
    Return(Vec<Candle>),
    /// Fail immediately with the provided error.
    Fail(ReplayError),
    /// Hang indefinitely (simulate a stalled source).
    Hang,
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<Timeframe, MockBehavior>,
    requests: Vec<Timeframe>,
}

/// Controller handle used by tests to drive the dynamic loader from the outside.
#[derive(Clone)]
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for loads of `timeframe`.
    pub async fn set_behavior(&self, timeframe: Timeframe, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.rules.insert(timeframe, behavior);
    }

    /// Timeframes requested so far, in call order.
    pub async fn requests(&self) -> Vec<Timeframe> {
        self.state.lock().await.requests.clone()
    }
}

/// Loader whose per-timeframe behavior is scripted at runtime.
///
/// Timeframes without a rule load as empty series.
pub struct DynamicMockLoader {
    timeframes: Vec<Timeframe>,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockLoader {
    /// Create a loader offering `timeframes` and its controller.
    #[must_use]
    pub fn new_with_controller(timeframes: Vec<Timeframe>) -> (Self, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        (
            Self {
                timeframes,
                state: Arc::clone(&state),
            },
            DynamicMockController { state },
        )
    }
}

#[async_trait]
impl SeriesLoader for DynamicMockLoader {
    fn timeframes(&self) -> Vec<Timeframe> {
        self.timeframes.clone()
    }

    async fn load(&self, timeframe: Timeframe) -> Result<Vec<Candle>, ReplayError> {
        // Extract the rule without holding the lock across await
        let rule = {
            let mut guard = self.state.lock().await;
            guard.requests.push(timeframe);
            guard.rules.get(&timeframe).cloned()
        };
        match rule {
            Some(MockBehavior::Return(candles)) => Ok(candles),
            Some(MockBehavior::Fail(err)) => Err(err),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                Ok(Vec::new())
            }
            None => Ok(Vec::new()),
        }
    }
}
