//! Database record models matching table schemas.
//!
//! Models derive `sqlx::FromRow` and are kept separate from the API models in
//! [`crate::api::models`], so the storage and wire representations can evolve
//! independently. Conversion to API models happens in the handlers, where the
//! display timezone is known.

pub mod articles;
