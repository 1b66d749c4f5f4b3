// Adapters layer: concrete implementations for external systems.

pub mod sheets;
pub mod storage;
