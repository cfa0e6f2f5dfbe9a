//! Domain layer - value objects and the profile record.

pub mod foundation;
pub mod profile;
