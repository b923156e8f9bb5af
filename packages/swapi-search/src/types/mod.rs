//! Domain types for the search pipeline.

pub mod config;
pub mod record;
pub mod resource;
