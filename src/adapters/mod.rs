// Adapters layer: concrete implementations for external systems (backend http, local files).

pub mod backend;
pub mod storage;

pub use backend::{BackendBody, BackendClient, BackendMethod, BackendResponse};
pub use storage::LocalStorage;
