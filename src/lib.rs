//! # ui-prefs
//!
//! Client-side UI preference store for Leptos + WASM frontends: theme
//! (light/dark/follow-OS), background animation mode, and rendering quality.
//!
//! A single [`PreferenceStore`] is built at the application root, reads what
//! the pre-hydration script ([`prehydration_script`]) already applied to
//! `<html>`, falls back to `localStorage`, and keeps both in sync on every
//! change. Browser bindings live behind the `hydrate` feature; everywhere
//! else the store runs on in-memory ports.

pub mod config;
pub mod context;
pub mod env;
pub mod error;
pub mod memory;
pub mod observable;
pub mod prefs;
pub mod quality;
pub mod script;
pub mod store;

#[cfg(feature = "hydrate")]
pub mod browser;

pub use config::StoreConfig;
pub use context::{PreferenceSignals, provide_preferences, use_preference_store, use_preferences};
pub use env::Environment;
pub use error::{PreferenceError, StorageError};
pub use prefs::{Background, ColorScheme, Field, Quality, QualityTier, Theme};
pub use script::prehydration_script;
pub use store::PreferenceStore;
