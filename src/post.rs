// Record model: what the user types (`PostDraft`) and what ends up in the
// JSON store (`BlogPost`). The helpers here derive the slug, normalize the
// published date and split the category list.

use crate::error::PostError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Raw answers collected by the prompt chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub author: String,
    pub categories: Vec<String>,
    /// Free text as typed, normalized when the record is built.
    pub published_date: String,
    pub description: String,
    pub body: String,
}

/// One blog-post entry as persisted in the store. Keys are camelCase on
/// disk (`publishedDate`) to stay compatible with existing data files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub title: String,
    pub slug: String,
    pub author: String,
    pub categories: Vec<String>,
    #[serde(with = "iso_millis")]
    pub published_date: DateTime<Utc>,
    pub description: String,
    pub excerpt: String,
    pub body: String,
}

impl BlogPost {
    /// Shape a record from the user's answers and the summarizer's excerpt.
    pub fn from_draft(draft: PostDraft, excerpt: String) -> Result<Self, PostError> {
        let published_date = normalize_published_date(&draft.published_date)?;
        Ok(BlogPost {
            slug: slugify(&draft.title),
            title: draft.title,
            author: draft.author,
            categories: draft.categories,
            published_date,
            description: draft.description,
            excerpt,
            body: draft.body,
        })
    }
}

/// Lowercase the title and turn every whitespace run into one `-`.
///
/// Nothing else is stripped, so punctuation survives and leading or
/// trailing whitespace becomes a hyphen as well.
pub fn slugify(title: &str) -> String {
    // Lowercase the whole string so context rules apply (final sigma).
    let lower = title.to_lowercase();
    let mut slug = String::with_capacity(lower.len());
    let mut in_space = false;
    for c in lower.chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
                in_space = true;
            }
        } else {
            slug.push(c);
            in_space = false;
        }
    }
    slug
}

/// Parse `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
pub fn normalize_published_date(input: &str) -> Result<DateTime<Utc>, PostError> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| PostError::InvalidDate(input.to_string()))
}

/// Split the comma-separated category answer on every `,`. Entries keep
/// their surrounding whitespace and empty entries are kept, so a blank
/// answer yields one empty category.
pub fn split_categories(input: &str) -> Vec<String> {
    input.split(',').map(String::from).collect()
}

/// `2024-01-15T00:00:00.000Z` on the way out; any RFC 3339 string on the
/// way in.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}
