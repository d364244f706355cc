use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use super::{Category, Format};

/// Result ordering for the `all` and `favorites` views
///
/// The recommended view carries its own relevance order and ignores this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Newest,
    Title,
}

impl Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortBy::Newest => write!(f, "newest"),
            SortBy::Title => write!(f, "title"),
        }
    }
}

impl FromStr for SortBy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortBy::Newest),
            "title" => Ok(SortBy::Title),
            _ => Err(()),
        }
    }
}

/// Which subset of the catalog is under consideration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewContext {
    All,
    Favorites,
    Recommended,
}

impl Display for ViewContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewContext::All => write!(f, "all"),
            ViewContext::Favorites => write!(f, "favorites"),
            ViewContext::Recommended => write!(f, "recommended"),
        }
    }
}

impl FromStr for ViewContext {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ViewContext::All),
            "favorites" => Ok(ViewContext::Favorites),
            "recommended" => Ok(ViewContext::Recommended),
            _ => Err(()),
        }
    }
}

/// Everything a single query execution depends on
///
/// This is the composite snapshot the store derives from its live state and
/// hands to the query engine. Structural equality between consecutive
/// snapshots is what suppresses redundant queries, so the favorite-id source
/// is baked in here: the live list for the favorites view, the frozen
/// recommendation snapshot for the recommended view, nothing otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceFilter {
    pub search: Option<String>,
    pub categories: Vec<Category>,
    pub formats: Vec<Format>,
    pub sort: SortBy,
    /// 1-based page number
    pub page: usize,
    pub page_size: usize,
    pub view: ViewContext,
    pub favorite_ids: Option<Vec<u32>>,
}

impl Default for ResourceFilter {
    fn default() -> Self {
        Self {
            search: None,
            categories: Vec::new(),
            formats: Vec::new(),
            sort: SortBy::Newest,
            page: 1,
            page_size: 9,
            view: ViewContext::All,
            favorite_ids: None,
        }
    }
}
