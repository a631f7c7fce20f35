//! Signal processing for the displacement stream

pub mod smoothing;

pub use smoothing::ExponentialSmoother;
