//! Background Tasks Module
//!
//! # Tasks
//! - TTL Cleanup: optional periodic removal of expired cache entries

mod cleanup;

pub use cleanup::spawn_cleanup_task;
