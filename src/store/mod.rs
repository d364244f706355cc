//! Central state management for the resource library
//!
//! The store is the single source of truth for filter, sort, pagination,
//! view, and UI-layout state. Every mutation recomputes a composite query
//! snapshot and hands it to a background pipeline that debounces,
//! deduplicates, and executes queries, publishing results through a watch
//! channel. Constructed once per session and passed explicitly to consumers.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::{mpsc, watch, RwLock};

use crate::{
    catalog::CatalogSource,
    config::Config,
    deep_link::{self, DeepLinkParams},
    models::{Category, Format, ResourceFilter, SortBy, ViewContext},
    services::FavoritesService,
    storage::KeyValueStore,
};

mod pipeline;

pub use pipeline::QueryState;

/// Storage key holding the sidebar collapse preference
const SIDEBAR_KEY: &str = "isSidebarCollapsed";

/// How result cards are laid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// Live filter, view, and layout state behind the store's lock
#[derive(Debug, Clone)]
struct FilterState {
    search: String,
    categories: Vec<Category>,
    formats: Vec<Format>,
    sort: SortBy,
    page: usize,
    page_size: usize,
    view: ViewContext,
    favorite_ids: Vec<u32>,
    /// Frozen favorite IDs used while the recommended view is active, so
    /// favoriting while browsing does not reshuffle the results
    recommendation_snapshot: Vec<u32>,
    view_mode: ViewMode,
    sidebar_collapsed: bool,
}

impl FilterState {
    fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            categories: Vec::new(),
            formats: Vec::new(),
            sort: SortBy::Newest,
            page: 1,
            page_size,
            view: ViewContext::Recommended,
            favorite_ids: Vec::new(),
            recommendation_snapshot: Vec::new(),
            view_mode: ViewMode::Grid,
            sidebar_collapsed: false,
        }
    }

    /// Derives the composite query snapshot from the live state
    ///
    /// The favorites view needs the live ID list so unfavorited items
    /// disappear immediately; the recommended view needs the frozen
    /// snapshot.
    fn snapshot(&self) -> ResourceFilter {
        ResourceFilter {
            search: (!self.search.is_empty()).then(|| self.search.clone()),
            categories: self.categories.clone(),
            formats: self.formats.clone(),
            sort: self.sort,
            page: self.page,
            page_size: self.page_size,
            view: self.view,
            favorite_ids: match self.view {
                ViewContext::Favorites => Some(self.favorite_ids.clone()),
                ViewContext::Recommended => Some(self.recommendation_snapshot.clone()),
                ViewContext::All => None,
            },
        }
    }
}

/// The library's filter/query/favorites store
pub struct LibraryStore {
    state: Arc<RwLock<FilterState>>,
    snapshots: mpsc::UnboundedSender<ResourceFilter>,
    results: watch::Receiver<QueryState>,
    favorites: FavoritesService,
    storage: Arc<dyn KeyValueStore>,
}

impl LibraryStore {
    /// Creates the store and spawns its query pipeline
    ///
    /// No query runs until the first state change; call
    /// [`load_initial_data`](Self::load_initial_data) to prime favorites and
    /// trigger the initial fetch.
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        storage: Arc<dyn KeyValueStore>,
        config: &Config,
    ) -> Self {
        let (snapshot_tx, snapshot_rx) = mpsc::unbounded_channel();
        let (results_tx, results_rx) = watch::channel(QueryState::default());

        pipeline::spawn(
            catalog,
            results_tx,
            Duration::from_millis(config.debounce_ms),
            snapshot_rx,
        );

        Self {
            state: Arc::new(RwLock::new(FilterState::new(config.page_size))),
            snapshots: snapshot_tx,
            results: results_rx,
            favorites: FavoritesService::new(Arc::clone(&storage)),
            storage,
        }
    }

    /// Applies a mutation and forwards the resulting snapshot to the
    /// pipeline
    async fn update<F>(&self, mutate: F)
    where
        F: FnOnce(&mut FilterState),
    {
        let snapshot = {
            let mut state = self.state.write().await;
            mutate(&mut state);
            state.snapshot()
        };

        if self.snapshots.send(snapshot).is_err() {
            tracing::warn!("Query pipeline is gone, dropping state change");
        }
    }

    // --- Initialization ---

    /// Loads persisted favorites and UI preferences, captures the first
    /// recommendation snapshot, and triggers the initial query
    pub async fn load_initial_data(&self) {
        let favorite_ids = self.favorites.get_favorites();
        let sidebar_collapsed = self.read_sidebar_pref();

        tracing::info!(favorites = favorite_ids.len(), "Loaded initial library data");

        self.update(|state| {
            state.recommendation_snapshot = favorite_ids.clone();
            state.favorite_ids = favorite_ids;
            state.sidebar_collapsed = sidebar_collapsed;
        })
        .await;
    }

    // --- Favorites ---

    /// Reloads favorite IDs from persistence into live state
    pub async fn load_favorites(&self) {
        let favorite_ids = self.favorites.get_favorites();
        self.update(|state| state.favorite_ids = favorite_ids).await;
    }

    /// Adds or removes a favorite, then reloads the live list
    pub async fn toggle_favorite(&self, id: u32) {
        let is_favorite = self.state.read().await.favorite_ids.contains(&id);
        if is_favorite {
            self.favorites.remove_favorite(id);
        } else {
            self.favorites.add_favorite(id);
        }
        self.load_favorites().await;
    }

    pub async fn favorite_ids(&self) -> Vec<u32> {
        self.state.read().await.favorite_ids.clone()
    }

    pub async fn is_favorite(&self, id: u32) -> bool {
        self.state.read().await.favorite_ids.contains(&id)
    }

    // --- Filter setters ---

    pub async fn set_search(&self, search: impl Into<String>) {
        let search = search.into();
        self.update(|state| {
            state.search = search;
            state.page = 1;
        })
        .await;
    }

    pub async fn set_sort(&self, sort: SortBy) {
        self.update(|state| {
            state.sort = sort;
            state.page = 1;
        })
        .await;
    }

    pub async fn set_current_page(&self, page: usize) {
        self.update(|state| state.page = page.max(1)).await;
    }

    /// Switches the active view
    ///
    /// Switching into the recommended view recaptures the recommendation
    /// snapshot from the live favorites first, so newly favorited items
    /// inform the ranking from this point on.
    pub async fn set_active_filter(&self, view: ViewContext) {
        self.update(|state| {
            if view == ViewContext::Recommended {
                state.recommendation_snapshot = state.favorite_ids.clone();
            }
            state.view = view;
            state.page = 1;
        })
        .await;
    }

    // --- Category selection ---

    pub async fn toggle_category(&self, category: Category) {
        self.update(|state| {
            if let Some(pos) = state.categories.iter().position(|c| *c == category) {
                state.categories.remove(pos);
            } else {
                state.categories.push(category);
            }
            state.page = 1;
        })
        .await;
    }

    pub async fn set_categories(&self, categories: Vec<Category>) {
        self.update(|state| state.categories = categories).await;
    }

    pub async fn clear_categories(&self) {
        self.update(|state| {
            state.categories.clear();
            state.page = 1;
        })
        .await;
    }

    // --- Format selection ---

    pub async fn toggle_format(&self, format: Format) {
        self.update(|state| {
            if let Some(pos) = state.formats.iter().position(|f| *f == format) {
                state.formats.remove(pos);
            } else {
                state.formats.push(format);
            }
            state.page = 1;
        })
        .await;
    }

    pub async fn set_formats(&self, formats: Vec<Format>) {
        self.update(|state| state.formats = formats).await;
    }

    pub async fn clear_formats(&self) {
        self.update(|state| {
            state.formats.clear();
            state.page = 1;
        })
        .await;
    }

    // --- Bulk actions ---

    /// Restores search, categories, formats, and sort to their defaults
    pub async fn reset_filters(&self) {
        self.update(|state| {
            state.search.clear();
            state.categories.clear();
            state.formats.clear();
            state.sort = SortBy::Newest;
            state.page = 1;
        })
        .await;
    }

    /// Clears the category and format selections only
    pub async fn clear_all_filters(&self) {
        self.update(|state| {
            state.categories.clear();
            state.formats.clear();
            state.page = 1;
        })
        .await;
    }

    // --- Deep links ---

    /// Applies recognized URL query parameters to the filter state
    ///
    /// Unknown keys and invalid values are silently ignored; the affected
    /// field keeps its current value.
    pub async fn apply_deep_link(&self, params: &std::collections::HashMap<String, String>) {
        let parsed = deep_link::parse(params);
        self.apply_params(parsed).await;
    }

    async fn apply_params(&self, params: DeepLinkParams) {
        self.update(|state| {
            if let Some(search) = params.search {
                state.search = search;
            }
            if let Some(categories) = params.categories {
                state.categories = categories;
            }
            if let Some(formats) = params.formats {
                state.formats = formats;
            }
            if let Some(sort) = params.sort {
                state.sort = sort;
            }
            if let Some(view) = params.view {
                if view == ViewContext::Recommended {
                    state.recommendation_snapshot = state.favorite_ids.clone();
                }
                state.view = view;
            }
            state.page = 1;
        })
        .await;
    }

    /// Current filter state as URL query parameters, defaults omitted
    pub async fn deep_link_params(&self) -> Vec<(String, String)> {
        let filter = self.state.read().await.snapshot();
        deep_link::encode(&filter)
    }

    // --- UI layout ---

    pub async fn set_view_mode(&self, mode: ViewMode) {
        self.state.write().await.view_mode = mode;
    }

    pub async fn view_mode(&self) -> ViewMode {
        self.state.read().await.view_mode
    }

    /// Flips the sidebar collapse flag and persists it best-effort
    pub async fn toggle_sidebar(&self) {
        let collapsed = {
            let mut state = self.state.write().await;
            state.sidebar_collapsed = !state.sidebar_collapsed;
            state.sidebar_collapsed
        };

        if let Err(e) = self.storage.set(SIDEBAR_KEY, Value::Bool(collapsed)) {
            tracing::warn!(error = %e, "Failed to persist sidebar preference");
        }
    }

    pub async fn sidebar_collapsed(&self) -> bool {
        self.state.read().await.sidebar_collapsed
    }

    fn read_sidebar_pref(&self) -> bool {
        match self.storage.get(SIDEBAR_KEY) {
            Ok(Some(Value::Bool(collapsed))) => collapsed,
            Ok(Some(other)) => {
                tracing::warn!(value = %other, "Ignoring non-boolean sidebar preference");
                false
            }
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read sidebar preference");
                false
            }
        }
    }

    // --- Query results ---

    /// Watches the published query state
    pub fn subscribe(&self) -> watch::Receiver<QueryState> {
        self.results.clone()
    }

    /// Latest published query state
    pub fn query_state(&self) -> QueryState {
        self.results.borrow().clone()
    }

    /// Pages needed for the current result set at the current page size
    pub async fn total_pages(&self) -> usize {
        let page_size = self.state.read().await.page_size;
        if page_size == 0 {
            return 0;
        }
        self.results.borrow().total_items.div_ceil(page_size)
    }

    /// Whether any category or format restriction is active
    pub async fn are_filters_active(&self) -> bool {
        let state = self.state.read().await;
        !state.categories.is_empty() || !state.formats.is_empty()
    }

    /// The composite snapshot the next query would use
    pub async fn current_filter(&self) -> ResourceFilter {
        self.state.read().await.snapshot()
    }

    /// The frozen favorite IDs backing the recommended view
    pub async fn recommendation_snapshot(&self) -> Vec<u32> {
        self.state.read().await.recommendation_snapshot.clone()
    }
}
