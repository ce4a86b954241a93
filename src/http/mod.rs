//! HTTP protocol layer module
//!
//! Protocol-level helpers shared by the API and static file handlers.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use response::{
    build_304_response, build_404_response, build_405_response, build_413_response,
    build_options_response, build_static_response, with_cors,
};
