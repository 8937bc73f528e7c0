//! Browse Mars rover photos from a remote JSON API.
//!
//! The network side ([`mars`]) fetches the photo list; the view side
//! ([`view`]) holds the observable Loading / Success / Error state that the
//! terminal front-end in `main.rs` renders.

#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod mars;
pub mod shutdown;
pub mod types;
pub mod view;
