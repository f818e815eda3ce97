//! Client-side data synchronization: cached reads with freshness windows,
//! stale-while-revalidate, in-flight deduplication, and mutation-driven
//! invalidation.

pub mod cache;
pub mod client;
pub mod key;
pub mod mutation;
pub mod queries;

pub use cache::TypedCache;
pub use client::QueryClient;
pub use key::{QueryKey, Resource};
pub use mutation::{MutationState, MutationStatus};
