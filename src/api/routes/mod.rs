//! API Routes
//!
//! Route handlers organized by functionality.

pub mod export;
pub mod health;
pub mod query;
pub mod timelines;
pub mod visualize;
