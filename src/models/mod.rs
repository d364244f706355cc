mod filter;
mod page;
mod resource;

pub use filter::{ResourceFilter, SortBy, ViewContext};
pub use page::PaginatedResponse;
pub use resource::{Category, Format, Level, Resource};
