//! YouTube Data API v3 integration module.
//!
//! Provides the channel video fetcher, its record model and its error type.

pub mod client;
pub mod error;
pub mod models;

pub use client::{RequestOptions, VideoFetcher};
pub use error::FetchError;
pub use models::VideoRecord;
