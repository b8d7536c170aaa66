//! Wire models for the course API

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a course unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(pub i64);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UnitId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(UnitId)
    }
}

/// A course unit (chapter) as listed by `GET /units`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub unit_id: UnitId,
    pub title: String,
    /// Source document the unit was cut from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_page: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_page: Option<i64>,
}

impl Unit {
    /// Create a unit with only the fields the client relies on
    pub fn new(unit_id: i64, title: impl Into<String>) -> Self {
        Self {
            unit_id: UnitId(unit_id),
            title: title.into(),
            document_id: None,
            start_page: None,
            end_page: None,
        }
    }
}

/// One page of a unit's content as returned by `GET /unit-pages/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: i64,
    pub page_number: i64,
    /// Pages with no extracted text arrive as `null`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<i64>,
}

impl Page {
    pub fn new(id: i64, page_number: i64, content: impl Into<String>) -> Self {
        Self { id, page_number, content: content.into(), document_id: None }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One of the four lettered options of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Choice {
    A,
    B,
    C,
    D,
}

impl Choice {
    /// All choices in display order
    pub const ALL: [Choice; 4] = [Choice::A, Choice::B, Choice::C, Choice::D];

    /// Upper-case letter for this choice
    pub fn letter(self) -> char {
        match self {
            Choice::A => 'A',
            Choice::B => 'B',
            Choice::C => 'C',
            Choice::D => 'D',
        }
    }

    /// Parse a letter in either case
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Choice::A),
            'B' => Some(Choice::B),
            'C' => Some(Choice::C),
            'D' => Some(Choice::D),
            _ => None,
        }
    }

    /// Choice for a zero-based option index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Whether this choice matches an answer key, ignoring case
    pub fn matches(self, answer_key: &str) -> bool {
        let mut buf = [0u8; 4];
        answer_key.eq_ignore_ascii_case(self.letter().encode_utf8(&mut buf))
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Choice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_letter(c).ok_or_else(|| format!("Not an option: {}", s)),
            _ => Err(format!("Not an option: {}", s)),
        }
    }
}

/// A generated multiple-choice question
///
/// The generator occasionally drops fields, so every string defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub option_a: String,
    #[serde(default)]
    pub option_b: String,
    #[serde(default)]
    pub option_c: String,
    #[serde(default)]
    pub option_d: String,
    #[serde(default)]
    pub correct_answer: String,
}

impl Question {
    /// Text of the given option
    pub fn option(&self, choice: Choice) -> &str {
        match choice {
            Choice::A => &self.option_a,
            Choice::B => &self.option_b,
            Choice::C => &self.option_c,
            Choice::D => &self.option_d,
        }
    }

    /// Whether `choice` is the correct answer
    pub fn is_correct(&self, choice: Choice) -> bool {
        choice.matches(&self.correct_answer)
    }
}

/// Body of `GET /generate-mcq/{id}`
///
/// Error bodies carry `detail` instead of `mcqs`.
#[derive(Debug, Clone, Deserialize)]
pub struct McqResponse {
    #[serde(default)]
    pub mcqs: Option<Vec<Question>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

/// Body of `GET /chapter-audio/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct ChapterAudio {
    pub unit_id: UnitId,
    pub text: String,
}

/// Body of `GET /health`
#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub status: String,
}
