use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// The four wellness pillars a resource can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Nutrition,
    #[serde(rename = "Mental Health")]
    MentalHealth,
    #[serde(rename = "Physical Health")]
    PhysicalHealth,
    Productivity,
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Nutrition => "Nutrition",
            Category::MentalHealth => "Mental Health",
            Category::PhysicalHealth => "Physical Health",
            Category::Productivity => "Productivity",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Nutrition" => Ok(Category::Nutrition),
            "Mental Health" => Ok(Category::MentalHealth),
            "Physical Health" => Ok(Category::PhysicalHealth),
            "Productivity" => Ok(Category::Productivity),
            _ => Err(()),
        }
    }
}

/// The media type of a resource
///
/// Determines which viewer a client uses for the detail view (video player,
/// audio player, article body, external link).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    Article,
    Video,
    Podcast,
    Guide,
    Website,
}

impl Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Format::Article => "Article",
            Format::Video => "Video",
            Format::Podcast => "Podcast",
            Format::Guide => "Guide",
            Format::Website => "Website",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Format {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Article" => Ok(Format::Article),
            "Video" => Ok(Format::Video),
            "Podcast" => Ok(Format::Podcast),
            "Guide" => Ok(Format::Guide),
            "Website" => Ok(Format::Website),
            _ => Err(()),
        }
    }
}

/// Difficulty level of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

/// A single wellness resource in the catalog
///
/// Resources are immutable once loaded within a query cycle; the catalog is
/// treated as a read-only snapshot per query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique, stable identifier
    pub id: u32,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub format: Format,
    /// Publication date (ISO `YYYY-MM-DD` on the wire)
    pub published: NaiveDate,
    pub tags: Vec<String>,

    /// Human-readable duration, e.g. "10 min" or "7 days"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    /// URL to a cover image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    /// External link, video embed URL, or audio file URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Inline body for articles and guides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}
