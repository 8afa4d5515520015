//! Core use-case services.
//!
//! # Responsibility
//! - Hold business rules in front of repositories.
//! - Keep callers decoupled from storage details.

pub mod product_service;
