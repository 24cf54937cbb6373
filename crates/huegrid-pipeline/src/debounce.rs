//! Debouncing of user inputs before they reach the aggregation pipeline.
//!
//! [`DebounceState`] holds the bookkeeping and never touches a clock on its
//! own; [`Debouncer`] drives one channel on a Tokio task and
//! [`ParamsDebouncer`] drives saturation and lightness together so the
//! pipeline only sees a pair once both channels have settled.

use huegrid_core::{Percent, SwatchParams};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DebounceState<T> {
    delay: Duration,
    settled: T,
    pending: Option<(T, Instant)>,
}

impl<T: Clone + PartialEq> DebounceState<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            settled: initial,
            pending: None,
        }
    }

    pub fn settled(&self) -> &T {
        &self.settled
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Records a new input and restarts the wait; any earlier pending value is dropped.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Promotes the pending value once its deadline has passed.
    ///
    /// Returns the value only when the settled value actually changed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => {}
            _ => return None,
        }
        let (value, _) = self.pending.take()?;
        if value == self.settled {
            return None;
        }
        self.settled = value.clone();
        Some(value)
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn earliest(a: Option<Instant>, b: Option<Instant>) -> Option<Instant> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Debounces a single continuously-updating value.
#[derive(Debug)]
pub struct Debouncer<T> {
    input: watch::Sender<T>,
    settled: watch::Receiver<T>,
    task: JoinHandle<()>,
}

impl<T> Debouncer<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// The initial value counts as settled.
    pub fn spawn(initial: T, delay: Duration) -> Self {
        let (input, input_rx) = watch::channel(initial.clone());
        let (settled_tx, settled) = watch::channel(initial.clone());
        let state = DebounceState::new(initial, delay);
        let task = tokio::spawn(run_single(input_rx, settled_tx, state));
        Self {
            input,
            settled,
            task,
        }
    }

    pub fn set(&self, value: T) {
        self.input.send_replace(value);
    }

    pub fn settled(&self) -> watch::Receiver<T> {
        self.settled.clone()
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run_single<T>(
    mut input: watch::Receiver<T>,
    settled: watch::Sender<T>,
    mut state: DebounceState<T>,
) where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    loop {
        tokio::select! {
            changed = input.changed() => {
                if changed.is_err() {
                    break;
                }
                let value = input.borrow_and_update().clone();
                state.push(value, Instant::now());
            }
            _ = sleep_until_deadline(state.deadline()) => {
                if let Some(value) = state.poll(Instant::now()) {
                    settled.send_replace(value);
                }
            }
        }
    }
}

/// Debounces saturation and lightness independently and publishes the pair
/// only when neither channel has a change in flight.
#[derive(Debug)]
pub struct ParamsDebouncer {
    saturation: watch::Sender<Percent>,
    lightness: watch::Sender<Percent>,
    settled: watch::Receiver<SwatchParams>,
    task: JoinHandle<()>,
}

impl ParamsDebouncer {
    /// `initial` is published immediately as the first settled pair.
    pub fn spawn(initial: SwatchParams, delay: Duration) -> Self {
        let (saturation, saturation_rx) = watch::channel(initial.saturation);
        let (lightness, lightness_rx) = watch::channel(initial.lightness);
        let (settled_tx, settled) = watch::channel(initial);
        let task = tokio::spawn(run_pair(
            saturation_rx,
            lightness_rx,
            settled_tx,
            initial,
            delay,
        ));
        Self {
            saturation,
            lightness,
            settled,
            task,
        }
    }

    pub fn set_saturation(&self, value: Percent) {
        self.saturation.send_replace(value);
    }

    pub fn set_lightness(&self, value: Percent) {
        self.lightness.send_replace(value);
    }

    /// Latest settled pair; `changed()` fires once per newly settled pair.
    pub fn settled(&self) -> watch::Receiver<SwatchParams> {
        self.settled.clone()
    }
}

impl Drop for ParamsDebouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run_pair(
    mut saturation_rx: watch::Receiver<Percent>,
    mut lightness_rx: watch::Receiver<Percent>,
    settled: watch::Sender<SwatchParams>,
    initial: SwatchParams,
    delay: Duration,
) {
    let mut saturation = DebounceState::new(initial.saturation, delay);
    let mut lightness = DebounceState::new(initial.lightness, delay);
    let mut last = initial;

    loop {
        let deadline = earliest(saturation.deadline(), lightness.deadline());
        tokio::select! {
            changed = saturation_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let value = *saturation_rx.borrow_and_update();
                saturation.push(value, Instant::now());
            }
            changed = lightness_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let value = *lightness_rx.borrow_and_update();
                lightness.push(value, Instant::now());
            }
            _ = sleep_until_deadline(deadline) => {
                let now = Instant::now();
                saturation.poll(now);
                lightness.poll(now);
                if saturation.is_pending() || lightness.is_pending() {
                    continue;
                }
                let pair = SwatchParams::new(*saturation.settled(), *lightness.settled());
                if pair != last {
                    debug!("Settled on s={} l={}", pair.saturation, pair.lightness);
                    last = pair;
                    settled.send_replace(pair);
                }
            }
        }
    }
}
