//! Driven adapters for external infrastructure.

pub mod persistence;
