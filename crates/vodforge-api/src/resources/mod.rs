//! Resource calls, one module per API area.
//!
//! Each module adds an `impl BitmovinClient` block. Create calls return the
//! typed identifier of the new resource and nothing else.

mod configurations;
mod encodings;
mod manifests;
mod muxings;
mod storage;
