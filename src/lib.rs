//! Core library exports for the catalog service.
//!
//! The `data` feature exposes the persistence layer (`db`, `domain`,
//! `models`, `schema`, `repository`). The default `server` feature adds the
//! request pipelines, their external integrations and the Actix-web routes.

pub mod db;
pub mod domain;
pub mod error_conversions;
pub mod models;
pub mod repository;
pub mod schema;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod notifications;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod storage;
