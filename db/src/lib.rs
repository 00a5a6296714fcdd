//! Persistence for the mcontrol state record.
//!
//! There is exactly one [`models::DbState`] in the store. It is seeded with
//! the fixed machine registry from [`fixed_data`] on first read, and
//! overwritten field-by-field by [`sync::apply_patch`] on every write.

pub mod fixed_data;
pub mod models;
pub mod storage;
pub mod sync;
