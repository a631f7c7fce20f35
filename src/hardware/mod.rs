//! Location source abstraction
//!
//! The tracker never talks to positioning hardware directly. It subscribes
//! through [`LocationSource`], which a platform binding or the mock implements.

pub mod source;
pub mod mock;
pub mod error;

pub use source::{LocationSource, WatchOptions, WatchId, FixCallback, ErrorCallback};
pub use mock::{MockLocationSource, WalkSimulation};
pub use error::{LocationError, LocationErrorKind};
