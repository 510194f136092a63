//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: in-process persistence gateway backing every repository port.
//!
//! Adapters are thin translators between domain types and their storage
//! representation. They contain no business logic.

pub mod memory;
