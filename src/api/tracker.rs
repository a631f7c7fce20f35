//! Displacement tracker
//!
//! Subscribes to a [`LocationSource`], pins the first fix as the session
//! origin, and turns every later fix into a smoothed distance and a control
//! value. Every change is reported to the caller as a [`TrackingState`]
//! snapshot; location failures arrive through the same channel.

use crate::algorithms::geodesy::{distance_between, local_offset};
use crate::algorithms::mapping::WaveMapping;
use crate::api::types::{TrackingState, TrackingStatus};
use crate::core::PositionSample;
use crate::hardware::{ErrorCallback, FixCallback, LocationError, LocationSource, WatchId};
use crate::processing::ExponentialSmoother;
use crate::utils::config::{ConfigResult, TrackerConfig};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// State-change callback
pub type StateCallback = Rc<dyn Fn(TrackingState)>;

/// Mutable state owned by a single tracking session
struct Session {
    state: TrackingState,
    smoother: ExponentialSmoother,
    mapping: WaveMapping,
}

impl Session {
    fn new(config: &TrackerConfig) -> Self {
        let mut state = TrackingState::idle(config.mapping.neutral());
        state.status = TrackingStatus::Acquiring;

        Self {
            state,
            smoother: ExponentialSmoother::new(config.smoothing_factor),
            mapping: config.mapping,
        }
    }

    fn apply_fix(&mut self, sample: PositionSample) -> TrackingState {
        let point = sample.point();
        let origin = *self.state.origin.get_or_insert(point);

        let raw = distance_between(&origin, &point);
        let smoothed = self.smoother.update(raw);

        self.state.current = Some(sample);
        self.state.raw_distance = raw;
        self.state.smoothed_distance = smoothed;
        self.state.control = self.mapping.map(smoothed);
        self.state.offset = Some(local_offset(&origin, &point));
        self.state.sample_count += 1;
        self.state.status = TrackingStatus::Active;
        self.state.error_message.clear();

        self.state.clone()
    }

    fn apply_error(&mut self, error: &LocationError) -> TrackingState {
        self.state.status = TrackingStatus::Error;
        self.state.error_message = error.message.clone();
        self.state.clone()
    }
}

/// Starts tracking sessions with a validated configuration
#[derive(Debug, Clone, Default)]
pub struct DisplacementTracker {
    config: TrackerConfig,
}

impl DisplacementTracker {
    pub fn new(config: TrackerConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Start a session on `source`
    ///
    /// `callback` receives the `acquiring` state before this returns, then a
    /// snapshot for every fix or failure until the returned handle is stopped
    /// or dropped.
    pub fn start<S, F>(&self, mut source: S, callback: F) -> StopHandle
    where
        S: LocationSource + 'static,
        F: Fn(TrackingState) + 'static,
    {
        let session = Rc::new(RefCell::new(Session::new(&self.config)));
        let active = Rc::new(Cell::new(true));
        let callback: StateCallback = Rc::new(callback);

        let initial = session.borrow().state.clone();
        callback(initial);

        let on_fix: FixCallback = {
            let session = Rc::clone(&session);
            let active = Rc::clone(&active);
            let callback = Rc::clone(&callback);
            Rc::new(move |sample: PositionSample| {
                if !active.get() {
                    return;
                }
                if !(sample.lat.is_finite() && sample.lon.is_finite()) {
                    log::warn!("ignoring non-finite fix ({}, {})", sample.lat, sample.lon);
                    return;
                }
                // Borrow released before the callback so it may stop the session
                let snapshot = session.borrow_mut().apply_fix(sample);
                log::debug!(
                    "fix #{}: raw {:.2} m, smoothed {:.2} m, control {:.3}",
                    snapshot.sample_count,
                    snapshot.raw_distance,
                    snapshot.smoothed_distance,
                    snapshot.control
                );
                callback(snapshot);
            })
        };

        let on_error: ErrorCallback = {
            let session = Rc::clone(&session);
            let active = Rc::clone(&active);
            let callback = Rc::clone(&callback);
            Rc::new(move |error: LocationError| {
                if !active.get() {
                    return;
                }
                log::warn!("location unavailable ({:?}): {}", error.kind, error.message);
                let snapshot = session.borrow_mut().apply_error(&error);
                callback(snapshot);
            })
        };

        let watch_id = source.watch_position(on_fix, on_error, &self.config.watch);
        log::info!("tracking started (watch {})", watch_id.id());

        StopHandle {
            active,
            session,
            source: RefCell::new(Some(Box::new(source))),
            watch_id,
        }
    }
}

/// Start a session with the default playback-rate configuration
pub fn start_tracking<S, F>(source: S, callback: F) -> StopHandle
where
    S: LocationSource + 'static,
    F: Fn(TrackingState) + 'static,
{
    DisplacementTracker::default().start(source, callback)
}

/// Owns a running session; stopping or dropping it unsubscribes
pub struct StopHandle {
    active: Rc<Cell<bool>>,
    session: Rc<RefCell<Session>>,
    source: RefCell<Option<Box<dyn LocationSource>>>,
    watch_id: WatchId,
}

impl StopHandle {
    /// Unsubscribe from the source. Safe to call repeatedly; no callback
    /// fires once the first call returns.
    pub fn stop(&self) {
        if !self.active.replace(false) {
            return;
        }

        if let Some(mut source) = self.source.borrow_mut().take() {
            source.clear_watch(self.watch_id);
        }
        log::info!("tracking stopped (watch {})", self.watch_id.id());
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn watch_id(&self) -> WatchId {
        self.watch_id
    }

    /// Latest snapshot of the session
    pub fn state(&self) -> TrackingState {
        self.session.borrow().state.clone()
    }
}

impl Drop for StopHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
