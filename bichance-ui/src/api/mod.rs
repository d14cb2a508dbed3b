//! Backend access

pub mod client;

pub use client::*;
