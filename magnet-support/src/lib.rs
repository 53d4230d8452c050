//! # Magnet Support
//!
//! Shared helpers for the Magnet crates.
//!
//! This crate provides:
//! - Short type names for log and error output
//! - Scope path rendering and "did you mean?" suggestions

pub mod rendering;
