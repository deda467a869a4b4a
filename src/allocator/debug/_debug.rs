//! Allocators for testing and diagnosing allocation behavior

mod null;           pub use null::Null;
mod tracking;       pub use tracking::{Tracking, TrackingError};
