//! Core components of the `appversions-rs` client.
//!
//! This module contains the foundational building blocks of the library:
//! - The main [`AvClient`] and its builder.
//! - The primary [`AvError`] type and the caller-facing [`ErrorPayload`].
//! - The validated [`AppId`] input type.

/// Validated app id input type.
pub mod appid;
/// The main client (`AvClient`), builder, and retry configuration.
pub mod client;
/// The primary error type (`AvError`) for the crate.
pub mod error;

// convenient re-exports so most code can just `use crate::core::AvClient`
pub use appid::AppId;
pub use client::{AvClient, AvClientBuilder, Backoff, RetryConfig};
pub use error::{AvError, ErrorPayload};
