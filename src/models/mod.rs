//! Diesel row models and their conversions to domain types.

pub mod category;
#[cfg(feature = "server")]
pub mod config;
pub mod product;
