use crate::utils::error::{Result, WorkbenchError};
use crate::utils::validation::{validate_range, validate_slug};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// One of the four parallel renditions kept in every chapter workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Original,
    Robust,
    Exercises,
    Extensions,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Original,
        Variant::Robust,
        Variant::Exercises,
        Variant::Extensions,
    ];

    pub fn all() -> impl Iterator<Item = Variant> {
        Self::ALL.into_iter()
    }

    pub fn dir_name(self) -> &'static str {
        match self {
            Variant::Original => "original",
            Variant::Robust => "robust",
            Variant::Exercises => "exercises",
            Variant::Extensions => "extensions",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Variant::Original => "A direct transcription of the book's example code.",
            Variant::Robust => {
                "The same example with explicit types and stricter contracts."
            }
            Variant::Exercises => {
                "Step-by-step walkthroughs of the implementations, for exploring state."
            }
            Variant::Extensions => {
                "Creative elaborations that explore edge cases beyond the book's scope."
            }
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::all().map(Variant::dir_name).collect()
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for Variant {
    type Err = WorkbenchError;

    fn from_str(s: &str) -> Result<Self> {
        Variant::all()
            .find(|variant| variant.dir_name() == s.trim())
            .ok_or_else(|| WorkbenchError::InvalidConfigValueError {
                field: "variant".to_string(),
                value: s.to_string(),
                reason: format!("Expected one of: {}", Variant::names().join(", ")),
            })
    }
}

fn chapter_dir_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^ch(\d{2})_([a-z][a-z0-9_]*)$").expect("chapter pattern is valid")
    })
}

/// Identifies a chapter workspace; its directory name is `chNN_slug`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChapterId {
    number: u8,
    slug: String,
}

impl ChapterId {
    /// Builds an id from a chapter number and a free-form topic, which is
    /// lower-cased with spaces and dashes turned into underscores.
    pub fn new(number: u8, topic: &str) -> Result<Self> {
        let slug = topic
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect::<String>();

        validate_range("chapter.number", number, 1, 99).map_err(|e| invalid_id(number, topic, e))?;
        validate_slug("chapter.slug", &slug).map_err(|e| invalid_id(number, topic, e))?;

        Ok(Self { number, slug })
    }

    /// Parses a canonical directory name such as `ch01_data_model`.
    pub fn parse(dir_name: &str) -> Result<Self> {
        let caps = chapter_dir_pattern().captures(dir_name).ok_or_else(|| {
            WorkbenchError::InvalidChapterId {
                value: dir_name.to_string(),
                reason: "expected chNN_topic with a two-digit number".to_string(),
            }
        })?;

        let number: u8 = caps[1]
            .parse()
            .map_err(|_| WorkbenchError::InvalidChapterId {
                value: dir_name.to_string(),
                reason: "chapter number is not numeric".to_string(),
            })?;

        if number == 0 {
            return Err(WorkbenchError::InvalidChapterId {
                value: dir_name.to_string(),
                reason: "chapter numbers start at 01".to_string(),
            });
        }

        Ok(Self {
            number,
            slug: caps[2].to_string(),
        })
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn dir_name(&self) -> String {
        format!("ch{:02}_{}", self.number, self.slug)
    }

    /// "data_model" becomes "Data Model".
    pub fn default_title(&self) -> String {
        self.slug
            .split('_')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn invalid_id(number: u8, topic: &str, cause: WorkbenchError) -> WorkbenchError {
    WorkbenchError::InvalidChapterId {
        value: format!("{}:{}", number, topic),
        reason: cause.to_string(),
    }
}

impl fmt::Display for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ch{:02}_{}", self.number, self.slug)
    }
}

impl FromStr for ChapterId {
    type Err = WorkbenchError;

    fn from_str(s: &str) -> Result<Self> {
        ChapterId::parse(s)
    }
}

impl TryFrom<String> for ChapterId {
    type Error = WorkbenchError;

    fn try_from(value: String) -> Result<Self> {
        ChapterId::parse(&value)
    }
}

impl From<ChapterId> for String {
    fn from(id: ChapterId) -> Self {
        id.dir_name()
    }
}

/// Contents of `chapter.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterManifest {
    pub chapter: ChapterId,
    pub title: String,
    pub book: String,
    pub created_at: DateTime<Utc>,
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Relative to the workspace root.
    pub relative_path: String,
    pub kind: FileKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileKind {
    ChapterNotes,
    ComparisonNotes,
    Manifest,
    VariantReadme(Variant),
}

#[derive(Debug, Clone)]
pub struct RenderedFile {
    pub relative_path: String,
    pub contents: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub chapter_dir: String,
    pub created: Vec<String>,
    pub overwritten: Vec<String>,
    pub skipped: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chapter_id() {
        let id = ChapterId::parse("ch01_data_model").unwrap();
        assert_eq!(id.number(), 1);
        assert_eq!(id.slug(), "data_model");
        assert_eq!(id.dir_name(), "ch01_data_model");
        assert_eq!(id.default_title(), "Data Model");
    }

    #[test]
    fn test_parse_rejects_malformed_names() {
        for bad in ["ch1_data", "chapter01", "ch00_intro", "ch01_Data", "ch01_", "notes"] {
            assert!(
                matches!(ChapterId::parse(bad), Err(WorkbenchError::InvalidChapterId { .. })),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_new_normalises_topic() {
        let id = ChapterId::new(2, "Sequences And-Slicing").unwrap();
        assert_eq!(id.dir_name(), "ch02_sequences_and_slicing");
        assert!(ChapterId::new(0, "intro").is_err());
        assert!(ChapterId::new(100, "intro").is_err());
        assert!(ChapterId::new(3, "3d graphics").is_err());
    }

    #[test]
    fn test_chapter_ids_sort_by_number() {
        let mut ids = vec![
            ChapterId::parse("ch10_decorators").unwrap(),
            ChapterId::parse("ch02_sequences").unwrap(),
        ];
        ids.sort();
        assert_eq!(ids[0].number(), 2);
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("robust".parse::<Variant>().unwrap(), Variant::Robust);
        assert!("remix".parse::<Variant>().is_err());
        assert_eq!(Variant::names(), vec!["original", "robust", "exercises", "extensions"]);
    }
}
