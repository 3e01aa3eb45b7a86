//! Leaseweb REST API client.
//!
//! A thin reqwest wrapper: wire DTOs in [`models`], one API struct per
//! product ([`PublicCloudApi`], [`DedicatedServerApi`]) sharing a single
//! [`LeasewebClient`].

mod client;
mod dedicated_server;
mod error;
pub mod models;
mod public_cloud;

pub use client::{LeasewebClient, DEFAULT_BASE_URL};
pub use dedicated_server::{DedicatedServerApi, DEDICATED_SERVER_PATH};
pub use error::{ApiError, ErrorBody};
pub use public_cloud::{PublicCloudApi, PUBLIC_CLOUD_PATH};

/// Page size used by list calls.
pub const PAGE_SIZE: i64 = 50;

/// Offset of the next page, or `None` when `offset + limit` covers `total_count`.
pub fn next_offset(limit: i64, offset: i64, total_count: i64) -> Option<i64> {
    if limit <= 0 {
        return None;
    }

    let next = offset + limit;
    (next < total_count).then_some(next)
}
