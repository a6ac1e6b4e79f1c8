//! Sensor drivers.  Each wraps an [`InputPort`](crate::app::ports::InputPort)
//! and turns raw levels into domain readings.

pub mod metal;
