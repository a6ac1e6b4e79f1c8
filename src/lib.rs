//! Metal Sentry library.
//!
//! Exposes the detection core and its adapters for integration testing
//! and reuse.  Raspberry Pi pin bring-up is gated behind the `rpi`
//! feature; everything else builds and tests on any host.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod pins;
pub mod sensors;
