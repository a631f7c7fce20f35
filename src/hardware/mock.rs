//! Mock location source for testing and demos

use crate::algorithms::geodesy::offset_point;
use crate::core::{GeoPoint, PositionSample};
use crate::hardware::{
    ErrorCallback, FixCallback, LocationError, LocationSource, WatchId, WatchOptions,
};
use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;

struct Watcher {
    id: WatchId,
    on_fix: FixCallback,
    on_error: ErrorCallback,
    options: WatchOptions,
}

#[derive(Default)]
struct MockState {
    watchers: Vec<Watcher>,
    next_id: u32,
    fixes_delivered: u32,
    errors_delivered: u32,
    ignore_clear_watch: bool,
}

/// Deterministic location source driven by the test or demo
///
/// Clones share the same subscriptions, so one clone can be handed to a
/// tracker while another delivers fixes.
#[derive(Clone, Default)]
pub struct MockLocationSource {
    state: Rc<RefCell<MockState>>,
}

impl MockLocationSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a fix to every active subscription
    pub fn deliver(&self, sample: PositionSample) {
        // Callbacks run without the state borrowed so they may clear a watch
        let targets: Vec<FixCallback> = {
            let mut state = self.state.borrow_mut();
            state.fixes_delivered += 1;
            state.watchers.iter().map(|w| Rc::clone(&w.on_fix)).collect()
        };

        for on_fix in targets {
            on_fix(sample);
        }
    }

    /// Deliver a fix built from coordinates
    pub fn deliver_fix(&self, lat: f64, lon: f64, accuracy: f64) {
        self.deliver(PositionSample::new(lat, lon, accuracy));
    }

    /// Deliver a failure to every active subscription
    pub fn deliver_error(&self, error: LocationError) {
        let targets: Vec<ErrorCallback> = {
            let mut state = self.state.borrow_mut();
            state.errors_delivered += 1;
            state.watchers.iter().map(|w| Rc::clone(&w.on_error)).collect()
        };

        for on_error in targets {
            on_error(error.clone());
        }
    }

    /// Deliver a whole recorded track in order
    pub fn replay(&self, samples: &[PositionSample]) {
        for sample in samples {
            self.deliver(*sample);
        }
    }

    pub fn active_watch_count(&self) -> usize {
        self.state.borrow().watchers.len()
    }

    /// Options of the most recent active subscription
    pub fn last_options(&self) -> Option<WatchOptions> {
        self.state.borrow().watchers.last().map(|w| w.options.clone())
    }

    pub fn fixes_delivered(&self) -> u32 {
        self.state.borrow().fixes_delivered
    }

    pub fn errors_delivered(&self) -> u32 {
        self.state.borrow().errors_delivered
    }

    /// Keep subscriptions registered when they are cleared, like a source
    /// that still flushes queued fixes after unsubscribing
    pub fn ignore_clear_watch(&self, ignore: bool) {
        self.state.borrow_mut().ignore_clear_watch = ignore;
    }
}

impl LocationSource for MockLocationSource {
    fn watch_position(
        &mut self,
        on_fix: FixCallback,
        on_error: ErrorCallback,
        options: &WatchOptions,
    ) -> WatchId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = WatchId::new(state.next_id);
        state.watchers.push(Watcher {
            id,
            on_fix,
            on_error,
            options: options.clone(),
        });
        id
    }

    fn clear_watch(&mut self, id: WatchId) {
        let mut state = self.state.borrow_mut();
        if state.ignore_clear_watch {
            return;
        }
        state.watchers.retain(|w| w.id != id);
    }
}

/// Parameters of a simulated out-and-back walk
#[derive(Debug, Clone)]
pub struct WalkSimulation {
    pub start: GeoPoint,
    /// Heading in degrees clockwise from north
    pub heading_deg: f64,
    /// Distance walked between fixes (meters)
    pub step_m: f64,
    /// Fixes on the outbound leg; the return leg mirrors it
    pub steps: usize,
    /// Uniform noise added to each fix, per axis (meters)
    pub jitter_m: f64,
    /// Reported accuracy of each fix (meters)
    pub accuracy_m: f64,
    pub seed: u64,
}

impl Default for WalkSimulation {
    fn default() -> Self {
        Self {
            start: GeoPoint::new(35.0, 135.0),
            heading_deg: 0.0,
            step_m: 1.0,
            steps: 40,
            jitter_m: 1.5,
            accuracy_m: 5.0,
            seed: 7,
        }
    }
}

impl WalkSimulation {
    /// Generate the fixes of the walk, starting with the start point
    pub fn samples(&self) -> Vec<PositionSample> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let heading = self.heading_deg.to_radians();
        let direction = Vector2::new(heading.sin(), heading.cos());

        let outbound = 0..=self.steps;
        let inbound = (0..self.steps).rev();

        outbound
            .chain(inbound)
            .map(|step| {
                let mut offset = direction * (step as f64 * self.step_m);
                if self.jitter_m.is_finite() && self.jitter_m > 0.0 {
                    offset += Vector2::new(
                        rng.gen_range(-self.jitter_m..=self.jitter_m),
                        rng.gen_range(-self.jitter_m..=self.jitter_m),
                    );
                }
                let point = offset_point(&self.start, &offset);
                PositionSample::new(point.lat, point.lon, self.accuracy_m)
            })
            .collect()
    }
}
