//! Request handler module
//!
//! Front controller: API dispatch, the front-end bundle, and access logging.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
