pub mod favorites;
pub mod query;
pub mod recommendations;

pub use favorites::FavoritesService;
pub use query::execute_query;
pub use recommendations::generate_recommendations;
