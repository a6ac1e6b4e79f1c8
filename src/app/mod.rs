//! Application core: pure detection logic, zero I/O.
//!
//! This module contains the rules of the detector: the cooldown gate,
//! the polling coordinator, and cooperative shutdown.  All interaction
//! with pins, clocks, and message transports happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod cooldown;
pub mod events;
pub mod ports;
pub mod service;
pub mod shutdown;
