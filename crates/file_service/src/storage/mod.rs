//! Remote file-storage contracts and host-independent adapters.

pub mod memory;
pub mod service;
