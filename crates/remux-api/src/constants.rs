//! API constants
//!
//! Routes and the OpenAPI spec are versioned under a single prefix; handler
//! path annotations spell it out literally (utoipa requires compile-time
//! literals).

/// API base path prefix, including the version segment.
pub const API_PREFIX: &str = "/api/v0";
