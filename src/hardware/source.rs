//! Location source trait and subscription options

use crate::core::PositionSample;
use crate::hardware::LocationError;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Invoked with every fix the source delivers
pub type FixCallback = Rc<dyn Fn(PositionSample)>;

/// Invoked whenever the source fails to produce a fix
pub type ErrorCallback = Rc<dyn Fn(LocationError)>;

/// Identifier of an active subscription, used to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId(u32);

impl WatchId {
    pub fn new(id: u32) -> Self {
        WatchId(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Continuous-location-subscription service
///
/// Implementations deliver fixes and failures asynchronously on the caller's
/// event loop. After `clear_watch` returns, the callbacks registered under
/// that id must not be invoked again.
pub trait LocationSource {
    /// Start delivering fixes to `on_fix` and failures to `on_error`
    fn watch_position(
        &mut self,
        on_fix: FixCallback,
        on_error: ErrorCallback,
        options: &WatchOptions,
    ) -> WatchId;

    /// Cancel a subscription. Unknown ids are ignored.
    fn clear_watch(&mut self, id: WatchId);
}

/// Options passed to the location source with each subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchOptions {
    /// Request the most accurate fix the hardware can produce
    pub enable_high_accuracy: bool,
    /// Oldest cached fix accepted (milliseconds)
    pub maximum_age_ms: u32,
    /// Time allowed for a fix before reporting a timeout (milliseconds)
    pub timeout_ms: u32,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            maximum_age_ms: 2000,
            timeout_ms: 15000,
        }
    }
}
