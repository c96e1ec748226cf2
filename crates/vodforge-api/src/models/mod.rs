//! Request and response models of the encoding platform.
//!
//! Request types are `Serialize` only and mirror the platform's camelCase
//! JSON. Response types (`*Details`, [`Task`]) are `Deserialize` and keep
//! just the fields the orchestration reads back.

pub mod codec;
pub mod common;
pub mod encoding;
pub mod manifest;
pub mod muxing;
pub mod storage;
pub mod task;

pub use codec::*;
pub use common::*;
pub use encoding::*;
pub use manifest::*;
pub use muxing::*;
pub use storage::*;
pub use task::*;
