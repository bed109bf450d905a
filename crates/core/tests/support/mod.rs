//! Shared test helpers for `picnic-core` integration tests.
//!
//! In-memory doubles for the client, factory and credentials ports, backed by
//! one shared [`picnic::Backend`] so tests can assert on logins and calls.

pub mod picnic;
