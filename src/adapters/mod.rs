// Adapters layer: concrete implementations for external systems (artifact storage, model formats, http).

pub mod http;
pub mod models;
pub mod storage;
