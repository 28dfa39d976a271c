pub mod client;
pub mod collector;
pub mod endpoints;
pub mod paginator;

pub use client::{HttpFetcher, QueryParams, RemoteFetcher, RetryPolicy};
pub use collector::{Collector, FailedUnit, RoundCollection};
pub use paginator::{PageWarning, Paginated, Paginator};
