//! Fetch a channel's videos from the YouTube Data API v3, or a bundled set of
//! default videos, as normalized [`VideoRecord`]s.

pub mod config;
pub mod youtube;

pub use config::Config;
pub use youtube::{FetchError, RequestOptions, VideoFetcher, VideoRecord};
