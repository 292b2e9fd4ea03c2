//! HTTP client for the Speisekammer inventory service
//!
//! This crate provides [`SpeisekammerClient`], an authenticated REST client
//! with a small in-memory cache of storage locations. It resolves the
//! account's community id, loads the storage-location list on demand and
//! submits stock mutations, translating every failure into a typed
//! [`ApiError`].

mod client;
mod error;

pub use client::SpeisekammerClient;
pub use error::{ApiError, ApiResult};
