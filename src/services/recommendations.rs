use std::cmp::Ordering;
use std::collections::HashMap;

use rand::seq::SliceRandom;

use crate::models::{Category, Format, Resource};

/// Score weights for the interest profile match, highest priority first
const CATEGORY_WEIGHT: f64 = 10.0;
const TAG_WEIGHT: f64 = 5.0;
const FORMAT_WEIGHT: f64 = 3.0;
/// Deterministic tie-break among equal-weight candidates; carries no
/// relevance meaning
const ID_TIE_BREAK: f64 = 0.1;

/// Ranks non-favorited resources by similarity to the favorited set
///
/// The favorite IDs are expected to be a frozen snapshot so the order stays
/// stable while the user interacts with results.
///
/// Cold start (no favorites yet) returns the whole catalog in randomized
/// order: every item is discoverable instead of the list being empty. The
/// warm path builds a frequency profile of the favorited categories, tags,
/// and formats, scores every non-favorited candidate against it, drops
/// candidates with no similarity signal, and sorts by score descending.
pub fn generate_recommendations(all_items: Vec<Resource>, favorite_ids: &[u32]) -> Vec<Resource> {
    if favorite_ids.is_empty() {
        let mut items = all_items;
        items.shuffle(&mut rand::rng());
        tracing::debug!(count = items.len(), "Cold-start recommendations");
        return items;
    }

    // 1. Build the interest profile from favorited resources
    let mut category_freq: HashMap<Category, u32> = HashMap::new();
    let mut format_freq: HashMap<Format, u32> = HashMap::new();
    let mut tag_freq: HashMap<String, u32> = HashMap::new();

    for resource in all_items.iter().filter(|r| favorite_ids.contains(&r.id)) {
        *category_freq.entry(resource.category).or_default() += 1;
        *format_freq.entry(resource.format).or_default() += 1;
        for tag in &resource.tags {
            *tag_freq.entry(tag.clone()).or_default() += 1;
        }
    }

    // 2. Score every non-favorited candidate
    let mut scored: Vec<(f64, Resource)> = all_items
        .into_iter()
        .filter(|r| !favorite_ids.contains(&r.id))
        .map(|r| {
            let score = score_candidate(&r, &category_freq, &format_freq, &tag_freq);
            (score, r)
        })
        .filter(|(score, _)| *score > 0.0)
        .collect();

    // 3. Best match first
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    tracing::debug!(
        favorites = favorite_ids.len(),
        candidates = scored.len(),
        "Generated recommendations"
    );

    scored.into_iter().map(|(_, r)| r).collect()
}

fn score_candidate(
    resource: &Resource,
    category_freq: &HashMap<Category, u32>,
    format_freq: &HashMap<Format, u32>,
    tag_freq: &HashMap<String, u32>,
) -> f64 {
    let mut score = 0.0;

    if let Some(freq) = category_freq.get(&resource.category) {
        score += CATEGORY_WEIGHT * f64::from(*freq);
    }

    for tag in &resource.tags {
        if let Some(freq) = tag_freq.get(tag) {
            score += TAG_WEIGHT * f64::from(*freq);
        }
    }

    if let Some(freq) = format_freq.get(&resource.format) {
        score += FORMAT_WEIGHT * f64::from(*freq);
    }

    score + f64::from(resource.id) * ID_TIE_BREAK
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn resource(id: u32, category: Category, format: Format, tags: &[&str]) -> Resource {
        Resource {
            id,
            title: format!("Resource {}", id),
            description: String::new(),
            category,
            format,
            published: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            duration: None,
            level: None,
            thumbnail: None,
            url: None,
            content: None,
        }
    }

    fn sample_catalog() -> Vec<Resource> {
        vec![
            resource(1, Category::Nutrition, Format::Article, &["meal-prep"]),
            resource(2, Category::Nutrition, Format::Video, &["protein"]),
            resource(3, Category::Nutrition, Format::Guide, &["meal-prep"]),
            resource(4, Category::Productivity, Format::Article, &["focus"]),
            resource(5, Category::Productivity, Format::Podcast, &["habits"]),
        ]
    }

    #[test]
    fn test_cold_start_covers_whole_catalog_exactly_once() {
        let catalog = sample_catalog();
        let expected: HashSet<u32> = catalog.iter().map(|r| r.id).collect();

        let recommended = generate_recommendations(catalog, &[]);

        let got: Vec<u32> = recommended.iter().map(|r| r.id).collect();
        assert_eq!(got.len(), expected.len());
        assert_eq!(got.iter().copied().collect::<HashSet<_>>(), expected);
    }

    #[test]
    fn test_warm_path_excludes_favorited_items() {
        let recommended = generate_recommendations(sample_catalog(), &[1]);
        assert!(recommended.iter().all(|r| r.id != 1));
    }

    #[test]
    fn test_same_category_ranks_above_other_categories() {
        // Favorites: one Nutrition item. The two remaining Nutrition items
        // must rank above both Productivity items.
        let recommended = generate_recommendations(sample_catalog(), &[1]);

        let order: Vec<u32> = recommended.iter().map(|r| r.id).collect();
        let pos = |id: u32| order.iter().position(|x| *x == id).unwrap();

        assert!(pos(2) < pos(4));
        assert!(pos(2) < pos(5));
        assert!(pos(3) < pos(4));
        assert!(pos(3) < pos(5));
    }

    #[test]
    fn test_tag_overlap_boosts_score() {
        // Item 3 shares the "meal-prep" tag with the favorite; item 2 only
        // shares the category.
        let recommended = generate_recommendations(sample_catalog(), &[1]);

        let order: Vec<u32> = recommended.iter().map(|r| r.id).collect();
        let pos = |id: u32| order.iter().position(|x| *x == id).unwrap();
        assert!(pos(3) < pos(2));
    }

    #[test]
    fn test_score_is_monotone_in_category_frequency() {
        let mut catalog = sample_catalog();
        catalog.push(resource(6, Category::Nutrition, Format::Website, &[]));

        let category_freq_single: HashMap<Category, u32> =
            [(Category::Nutrition, 1)].into_iter().collect();
        let category_freq_double: HashMap<Category, u32> =
            [(Category::Nutrition, 2)].into_iter().collect();
        let empty_formats = HashMap::new();
        let empty_tags = HashMap::new();

        let candidate = &catalog[5];
        let single = score_candidate(candidate, &category_freq_single, &empty_formats, &empty_tags);
        let double = score_candidate(candidate, &category_freq_double, &empty_formats, &empty_tags);

        assert!(double > single);

        // An unaffected candidate's score does not change
        let outsider = &catalog[3];
        let before = score_candidate(outsider, &category_freq_single, &empty_formats, &empty_tags);
        let after = score_candidate(outsider, &category_freq_double, &empty_formats, &empty_tags);
        assert_eq!(before, after);
    }

    #[test]
    fn test_zero_signal_candidates_are_dropped() {
        // The id tie-break keeps every id > 0 candidate above zero, so the
        // score <= 0 boundary is only reachable at id 0 with no profile
        // overlap at all.
        let candidate = resource(0, Category::Nutrition, Format::Article, &[]);
        let category_freq: HashMap<Category, u32> =
            [(Category::Productivity, 1)].into_iter().collect();
        let format_freq: HashMap<Format, u32> = [(Format::Podcast, 1)].into_iter().collect();
        let tag_freq: HashMap<String, u32> = [("habits".to_string(), 1)].into_iter().collect();

        let score = score_candidate(&candidate, &category_freq, &format_freq, &tag_freq);
        assert_eq!(score, 0.0);

        let catalog = vec![
            candidate,
            resource(5, Category::Productivity, Format::Podcast, &["habits"]),
            resource(7, Category::Productivity, Format::Video, &[]),
        ];
        let recommended = generate_recommendations(catalog, &[5]);

        // The zero-score candidate is discarded; id 7 has a category match
        // and survives.
        let ids: Vec<u32> = recommended.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![7]);
    }

    #[test]
    fn test_id_tie_break_orders_equal_candidates() {
        let catalog = vec![
            resource(1, Category::Nutrition, Format::Article, &[]),
            resource(2, Category::Nutrition, Format::Article, &[]),
            resource(3, Category::Nutrition, Format::Article, &[]),
        ];

        let recommended = generate_recommendations(catalog, &[1]);
        let ids: Vec<u32> = recommended.iter().map(|r| r.id).collect();

        // Identical profile match, so the higher id wins the tie-break
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn test_warm_path_is_deterministic() {
        let first = generate_recommendations(sample_catalog(), &[1, 5]);
        let second = generate_recommendations(sample_catalog(), &[1, 5]);
        assert_eq!(first, second);
    }
}
