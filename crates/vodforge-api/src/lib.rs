//! vodforge-api: typed client for the Bitmovin Encoding REST API.
//!
//! This crate covers the slice of the platform vodforge drives:
//!
//! - **Client**: [`BitmovinClient`] with API key / organization headers,
//!   response envelope decoding and paginated listing
//! - **Identifiers**: one write-once newtype per resource kind ([`ids`])
//! - **Models**: request bodies and the response fields read back ([`models`])
//! - **Errors**: [`Error`] carrying the platform's error envelope
//!
//! # Examples
//!
//! ```no_run
//! use vodforge_api::{BitmovinClient, ClientConfig};
//! use vodforge_api::models::HttpsInput;
//!
//! # async fn example() -> vodforge_api::Result<()> {
//! let client = BitmovinClient::new(&ClientConfig::new("my-api-key"))?;
//! let input_id = client
//!     .create_https_input(&HttpsInput {
//!         host: "media.example.com".into(),
//!         name: "Example input".into(),
//!     })
//!     .await?;
//! println!("created input {input_id}");
//! # Ok(())
//! # }
//! ```

pub mod client;
mod envelope;
pub mod error;
pub mod ids;
pub mod models;
mod resources;

pub use client::{BitmovinClient, ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, PAGE_SIZE};
pub use error::{Error, Result};
pub use ids::*;
