//! Core domain for the chamados ticket API.
//!
//! Pure types and functions shared by the server: entities, request payloads
//! and their validation, repository traits and error mapping. Nothing in this
//! crate performs I/O.

pub mod serde;
pub mod storage;
pub mod ticket;
