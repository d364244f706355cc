//! Resource catalog query-and-recommendation engine.
//!
//! Turns a user's filter/sort/pagination/view state into a stable, paginated,
//! optionally personalized list of wellness resources. The moving parts:
//!
//! - [`catalog`] — read-only catalog data sources (JSON file or HTTP)
//! - [`services::query`] — the pure filter/sort/paginate query engine
//! - [`services::recommendations`] — frequency-weighted scorer with
//!   cold-start handling
//! - [`store`] — the filter state store with its debounced, deduplicated,
//!   supersede-on-stale query pipeline
//! - [`storage`] — best-effort key-value persistence for favorites and UI
//!   preferences

pub mod catalog;
pub mod config;
pub mod deep_link;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod store;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{
    Category, Format, Level, PaginatedResponse, Resource, ResourceFilter, SortBy, ViewContext,
};
pub use store::{LibraryStore, QueryState, ViewMode};
