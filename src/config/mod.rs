// src/config/mod.rs
//! Configuration system for decrypt-relocate
//!
//! Central, lazy-loaded global config with TOML + env overrides.

pub use app::{load, load_padding, resolve, resolve_padding, Config, PipelineSettings, StorageSettings};

mod app;
mod defaults;
