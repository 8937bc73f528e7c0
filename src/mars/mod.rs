//! Network side: the photo record model and the client for the photos
//! endpoint.

pub mod client;
pub mod error;
pub mod photo;

pub use client::{FetchClient, HttpFetchClient};
pub use error::FetchError;
pub use photo::{CameraRecord, PhotoRecord, UNKNOWN_CAPTURE_DATE};
