use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Key of the cover image inside a book's `formats` map.
pub const COVER_FORMAT: &str = "image/jpeg";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "AuthorRepr")]
pub struct Author {
    pub id: Option<u32>,
    pub name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
}

// Full serializer output, or just a name for the flattened search endpoints.
#[derive(Deserialize)]
#[serde(untagged)]
enum AuthorRepr {
    Full {
        #[serde(default)]
        id: Option<u32>,
        #[serde(default, deserialize_with = "null_as_default")]
        name: String,
        #[serde(default)]
        birth_year: Option<i32>,
        #[serde(default)]
        death_year: Option<i32>,
    },
    Name(String),
}

impl From<AuthorRepr> for Author {
    fn from(repr: AuthorRepr) -> Self {
        match repr {
            AuthorRepr::Full {
                id,
                name,
                birth_year,
                death_year,
            } => Author {
                id,
                name,
                birth_year,
                death_year,
            },
            AuthorRepr::Name(name) => Author {
                id: None,
                name,
                birth_year: None,
                death_year: None,
            },
        }
    }
}

impl Author {
    /// `Name (birth - death)`, with `?` standing in for unknown years.
    pub fn display_line(&self) -> String {
        if self.birth_year.is_none() && self.death_year.is_none() {
            return self.name.clone();
        }
        let year = |y: Option<i32>| y.map(|y| y.to_string()).unwrap_or_else(|| "?".to_string());
        format!(
            "{} ({} - {})",
            self.name,
            year(self.birth_year),
            year(self.death_year)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, alias = "author__name")]
    pub author: Option<Author>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub languages: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub formats: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closeness_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_found_in_text: Option<bool>,
}

impl CatalogItem {
    pub fn image_url(&self) -> Option<&str> {
        self.formats.get(COVER_FORMAT).map(String::as_str)
    }

    pub fn author_line(&self) -> String {
        self.author
            .as_ref()
            .map(Author::display_line)
            .unwrap_or_else(|| "Unknown author".to_string())
    }

    /// First `max_chars` characters of the summary followed by `...`.
    pub fn summary_excerpt(&self, max_chars: usize) -> String {
        match self.summary.as_deref().map(str::trim) {
            Some(summary) if !summary.is_empty() => {
                let mut excerpt: String = summary.chars().take(max_chars).collect();
                if summary.chars().count() > max_chars {
                    excerpt.push_str("...");
                }
                excerpt
            }
            _ => "No summary available".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub word: String,
    #[serde(default)]
    pub occurrences: u64,
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
