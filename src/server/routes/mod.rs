//! Route handlers

pub mod content;
pub mod health;
