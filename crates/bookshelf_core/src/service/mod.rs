//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Own the startup seed routine.

pub mod catalog_service;
pub mod seed;
