//! User profile retrieval and updates

mod service;

pub use service::ProfileService;
