use huegrid_core::{AggregationError, ColorCollection, ErrorPolicy, SwatchParams};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::aggregate::ColorAggregator;
use crate::fetcher::ColorFetcher;

/// What the grid currently has to show.
///
/// Only [`Explorer::request`] (to `Loading`) and the completion of the latest
/// request (to `Ready` or `Failed`) ever move between variants.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExplorerState {
    #[default]
    Idle,
    Loading {
        generation: u64,
        params: SwatchParams,
        /// Last good collection, kept only under [`ErrorPolicy::Preserve`].
        previous: Option<ColorCollection>,
    },
    Ready {
        generation: u64,
        params: SwatchParams,
        collection: ColorCollection,
    },
    Failed {
        generation: u64,
        params: SwatchParams,
        error: AggregationError,
        stale: Option<ColorCollection>,
    },
}

impl ExplorerState {
    pub fn generation(&self) -> Option<u64> {
        match self {
            Self::Idle => None,
            Self::Loading { generation, .. }
            | Self::Ready { generation, .. }
            | Self::Failed { generation, .. } => Some(*generation),
        }
    }

    pub fn params(&self) -> Option<SwatchParams> {
        match self {
            Self::Idle => None,
            Self::Loading { params, .. }
            | Self::Ready { params, .. }
            | Self::Failed { params, .. } => Some(*params),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Collection a renderer may show: the fresh one when ready, the stale
    /// one when a failure preserved it.
    pub fn collection(&self) -> Option<&ColorCollection> {
        match self {
            Self::Ready { collection, .. } => Some(collection),
            Self::Failed { stale, .. } => stale.as_ref(),
            Self::Loading { previous, .. } => previous.as_ref(),
            Self::Idle => None,
        }
    }

    pub fn error(&self) -> Option<&AggregationError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Owns the explorer state and runs aggregations for settled parameters.
///
/// Every request takes a fresh generation number; a completion is applied
/// only if no newer request was issued meanwhile, so a slow stale batch can
/// never overwrite a fresher one.
pub struct Explorer<F> {
    aggregator: Arc<ColorAggregator<F>>,
    policy: ErrorPolicy,
    latest: Arc<AtomicU64>,
    state: Arc<watch::Sender<ExplorerState>>,
}

impl<F> Explorer<F>
where
    F: ColorFetcher + 'static,
{
    pub fn new(aggregator: ColorAggregator<F>, policy: ErrorPolicy) -> Self {
        let (state, _) = watch::channel(ExplorerState::Idle);
        Self {
            aggregator: Arc::new(aggregator),
            policy,
            latest: Arc::new(AtomicU64::new(0)),
            state: Arc::new(state),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ExplorerState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> ExplorerState {
        self.state.borrow().clone()
    }

    pub fn latest_generation(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Starts an aggregation for `params` and moves the state to `Loading`.
    pub fn request(&self, params: SwatchParams) -> JoinHandle<()> {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let previous = match self.policy {
            ErrorPolicy::Preserve => self.state.borrow().collection().cloned(),
            ErrorPolicy::Clear => None,
        };
        debug!(
            "Requesting generation {} for s={} l={}",
            generation, params.saturation, params.lightness
        );
        self.state.send_replace(ExplorerState::Loading {
            generation,
            params,
            previous,
        });

        let aggregator = Arc::clone(&self.aggregator);
        let latest = Arc::clone(&self.latest);
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let result = aggregator.aggregate_params(params).await;
            apply_completion(&state, &latest, generation, params, result);
        })
    }

    /// Issues a request for the current settled pair and then one per change
    /// until the sender side goes away.
    pub async fn follow(&self, mut settled: watch::Receiver<SwatchParams>) {
        let initial = *settled.borrow_and_update();
        self.request(initial);
        while settled.changed().await.is_ok() {
            let params = *settled.borrow_and_update();
            self.request(params);
        }
    }
}

fn apply_completion(
    state: &watch::Sender<ExplorerState>,
    latest: &AtomicU64,
    generation: u64,
    params: SwatchParams,
    result: Result<ColorCollection, AggregationError>,
) {
    state.send_if_modified(|current| {
        let newest = latest.load(Ordering::SeqCst);
        if generation != newest {
            warn!(
                "Discarding stale aggregation result (generation {}, latest {})",
                generation, newest
            );
            return false;
        }
        *current = match result {
            Ok(collection) => ExplorerState::Ready {
                generation,
                params,
                collection,
            },
            Err(error) => {
                let stale = match current {
                    ExplorerState::Loading { previous, .. } => previous.take(),
                    _ => None,
                };
                ExplorerState::Failed {
                    generation,
                    params,
                    error,
                    stale,
                }
            }
        };
        true
    });
}
