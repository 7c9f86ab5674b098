//! Request middleware and extractors.
//!
//! The authorization gate lives in [`auth`]: an extractor validates the
//! bearer token before any protected handler body runs.
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. The `AuthUser` extractor verifies the token signature and expiry
//! 3. The handler runs with the verified claims, or the request is
//!    rejected with 401 before any business logic executes

pub mod auth;
