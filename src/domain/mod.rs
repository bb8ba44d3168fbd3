//! Domain entities and value objects independent of storage and transport.

pub mod category;
pub mod product;
pub mod types;
