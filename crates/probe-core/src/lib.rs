//! Core logic for the storage-probe harness: API client, transcoder,
//! formatting helpers, and the harness state controller.

pub mod api;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod render;
pub mod transcode;

pub use error::ProbeError;
