//! API request and response models.
//!
//! Separate from [`crate::db::models`]: these are the wire shapes (camelCase keys,
//! formatted timestamps, string ids in mutation responses).

pub mod articles;
