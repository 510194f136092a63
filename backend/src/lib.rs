//! Movie catalogue, caller resolution, and score aggregation services.
//!
//! The [`domain`] owns the rules; [`outbound`] adapters satisfy its ports;
//! [`services`] wires the two together using [`config`] settings.

pub mod config;
pub mod domain;
pub mod outbound;
pub mod services;
pub mod telemetry;
