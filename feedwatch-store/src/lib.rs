// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # feedwatch Store
//!
//! Durable state and configuration for `feedwatch`.
//!
//! This crate provides:
//!
//! - **CredentialStore**: per-account access credential cache (file or memory)
//! - **Config**: account lists, sink settings, and runtime options
//! - **Persistence**: file I/O helpers for JSON data
//!
//! ## Usage
//!
//! ```ignore
//! use feedwatch_store::{Config, CredentialStore, FileCredentialStore};
//!
//! let config = Config::load_from(&path)?;
//! let store = FileCredentialStore::new(config.state_dir(), "avito");
//! let cached = store.load("Test Co").await;
//! ```

pub mod config;
pub mod credentials;
pub mod error;
pub mod persistence;

pub use config::{
    AvitoSettings, CianSettings, Config, DiagnosticsConfig, HttpConfig, ScheduleConfig,
    YandexSettings, ENV_TELEGRAM_BOT_TOKEN, ENV_TELEGRAM_CHAT_ID, ENV_YANDEX_OAUTH_TOKEN,
};
pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use error::StoreError;
pub use persistence::{default_config_dir, default_config_path, default_state_dir, load_json, save_json};
