//! HTTP clients for the docket ecosystem.
//!
//! Three external services back the CLI:
//! - the hosted relational store (PostgREST-style REST API), wrapped by
//!   [`StoreClient`],
//! - the store's file-storage bucket API (storage monitoring page),
//! - the external causelist endpoint, wrapped by [`CauselistClient`].
//!
//! `docket-core` owns the types and the workflows; this crate only moves
//! them over the wire.

pub mod causelist;
pub mod client;
pub mod load;
pub mod storage;
pub mod tables;

pub use causelist::CauselistClient;
pub use client::StoreClient;
pub use load::load_sources;
pub use storage::BucketUsage;
pub use tables::{NewExpense, NewNotification};
