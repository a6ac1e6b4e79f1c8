//! Actuator drivers.  Each wraps an [`OutputPort`](crate::app::ports::OutputPort).

pub mod buzzer;
