//! URL query-parameter encoding of the filter state (deep linking)
//!
//! Recognized keys: `search`, `categories` (comma-joined), `formats`
//! (comma-joined), `sort`, `view`. Parsing is lenient: unknown keys and
//! values outside the closed enumerations are silently dropped. Encoding is
//! the inverse and omits default values so links stay short.

use std::collections::HashMap;

use crate::models::{Category, Format, ResourceFilter, SortBy, ViewContext};

/// Filter fields recovered from URL query parameters
///
/// `None` means the parameter was absent or entirely invalid; the caller
/// keeps its current value for that field.
#[derive(Debug, Default, PartialEq)]
pub struct DeepLinkParams {
    pub search: Option<String>,
    pub categories: Option<Vec<Category>>,
    pub formats: Option<Vec<Format>>,
    pub sort: Option<SortBy>,
    pub view: Option<ViewContext>,
}

/// Parses recognized query parameters, validating each against its closed
/// enumeration
pub fn parse(params: &HashMap<String, String>) -> DeepLinkParams {
    DeepLinkParams {
        search: params.get("search").cloned(),
        categories: params.get("categories").and_then(|raw| parse_list(raw)),
        formats: params.get("formats").and_then(|raw| parse_list(raw)),
        sort: params.get("sort").and_then(|raw| parse_enum(raw, "sort")),
        view: params.get("view").and_then(|raw| parse_enum(raw, "view")),
    }
}

/// Parses a comma-joined list, keeping the valid entries
///
/// Yields `None` when nothing valid remains, so the caller's default wins.
fn parse_list<T: std::str::FromStr>(raw: &str) -> Option<Vec<T>> {
    let values: Vec<T> = raw
        .split(',')
        .filter_map(|part| {
            let part = part.trim();
            match part.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::debug!(value = %part, "Ignoring invalid deep-link list entry");
                    None
                }
            }
        })
        .collect();

    (!values.is_empty()).then_some(values)
}

fn parse_enum<T: std::str::FromStr>(raw: &str, key: &str) -> Option<T> {
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::debug!(key = %key, value = %raw, "Ignoring invalid deep-link parameter");
            None
        }
    }
}

/// Encodes the filter as query parameters, omitting defaults
///
/// The recommended view is the application's landing view, so `view` is
/// only emitted for the other two contexts, mirroring the parse defaults.
pub fn encode(filter: &ResourceFilter) -> Vec<(String, String)> {
    let mut params = Vec::new();

    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        params.push(("search".to_string(), search.to_string()));
    }
    if filter.sort != SortBy::Newest {
        params.push(("sort".to_string(), filter.sort.to_string()));
    }
    if !filter.categories.is_empty() {
        params.push(("categories".to_string(), join(&filter.categories)));
    }
    if !filter.formats.is_empty() {
        params.push(("formats".to_string(), join(&filter.formats)));
    }
    if filter.view != ViewContext::Recommended {
        params.push(("view".to_string(), filter.view.to_string()));
    }

    params
}

fn join<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_full_set() {
        let parsed = parse(&params(&[
            ("search", "sleep"),
            ("categories", "Nutrition,Mental Health"),
            ("formats", "Video"),
            ("sort", "title"),
            ("view", "favorites"),
        ]));

        assert_eq!(parsed.search.as_deref(), Some("sleep"));
        assert_eq!(
            parsed.categories,
            Some(vec![Category::Nutrition, Category::MentalHealth])
        );
        assert_eq!(parsed.formats, Some(vec![Format::Video]));
        assert_eq!(parsed.sort, Some(SortBy::Title));
        assert_eq!(parsed.view, Some(ViewContext::Favorites));
    }

    #[test]
    fn test_parse_ignores_invalid_values() {
        let parsed = parse(&params(&[
            ("sort", "upside-down"),
            ("view", "hidden"),
            ("categories", "Astrology"),
        ]));

        assert_eq!(parsed.sort, None);
        assert_eq!(parsed.view, None);
        assert_eq!(parsed.categories, None);
    }

    #[test]
    fn test_parse_keeps_valid_list_entries() {
        let parsed = parse(&params(&[("categories", "Nutrition,Astrology")]));
        assert_eq!(parsed.categories, Some(vec![Category::Nutrition]));
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let parsed = parse(&params(&[("utm_source", "newsletter")]));
        assert_eq!(parsed, DeepLinkParams::default());
    }

    #[test]
    fn test_encode_omits_defaults() {
        let filter = ResourceFilter {
            view: ViewContext::Recommended,
            ..ResourceFilter::default()
        };
        assert!(encode(&filter).is_empty());
    }

    #[test]
    fn test_encode_round_trips_through_parse() {
        let filter = ResourceFilter {
            search: Some("sleep".to_string()),
            categories: vec![Category::MentalHealth],
            formats: vec![Format::Podcast, Format::Video],
            sort: SortBy::Title,
            view: ViewContext::All,
            ..ResourceFilter::default()
        };

        let encoded: HashMap<String, String> = encode(&filter).into_iter().collect();
        let parsed = parse(&encoded);

        assert_eq!(parsed.search.as_deref(), Some("sleep"));
        assert_eq!(parsed.categories, Some(filter.categories.clone()));
        assert_eq!(parsed.formats, Some(filter.formats.clone()));
        assert_eq!(parsed.sort, Some(SortBy::Title));
        assert_eq!(parsed.view, Some(ViewContext::All));
    }
}
