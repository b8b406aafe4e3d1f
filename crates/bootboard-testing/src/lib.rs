//! Testing infrastructure for bootboard integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `TestWorld`: Fluent interface for declarative CLI test setup
//! - `assertions`: Custom assertions on JSON command output
//! - `fixtures`: Sample boot records
//! - `memory`: Scripted in-memory page fetcher with delays and failures
//! - `server`: Stub results API served over real HTTP

pub mod assertions;
pub mod fixtures;
pub mod memory;
pub mod server;
pub mod world;

pub use memory::MemoryFetcher;
pub use server::StubServer;
pub use world::TestWorld;
