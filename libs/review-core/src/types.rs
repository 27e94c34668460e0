//! Core types for the lesson review screens.

use serde::{Deserialize, Serialize};

/// Which screen a collection is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenKind {
    /// Flat word list: one inner item per vocabulary entry.
    Vocabulary,
    /// Vocabulary entries paired with their example sentences.
    Grammar,
}

impl ScreenKind {
    /// Item type reported to the progress tracker for this screen.
    pub fn item_type(self) -> ItemType {
        match self {
            Self::Vocabulary => ItemType::Vocabulary,
            Self::Grammar => ItemType::GrammarExample,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vocabulary => "vocabulary",
            Self::Grammar => "grammar",
        }
    }
}

/// Item type accepted by the progress tracking endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Vocabulary,
    GrammarExample,
    Listening,
    Speaking,
}

/// Leaf unit of a collection, e.g. one example sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InnerItem {
    /// Unique within the parent outer item. Synthesized as
    /// `{outer_id}_{index}` when the source has no id.
    pub id: String,
    /// Numeric id understood by the backend, if the source provided one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<i64>,
    pub text: String,
    pub transliteration: String,
    pub translation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_transliteration: Option<String>,
}

/// Top-level unit of a collection, e.g. a vocabulary word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OuterItem {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<i64>,
    pub word: String,
    pub transliteration: String,
    pub meaning: String,
    pub inner: Vec<InnerItem>,
}

/// Collection-wide identity of an inner item.
///
/// Inner ids are only unique within their outer item, so membership sets key
/// on the pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub outer: String,
    pub inner: String,
}

impl ItemKey {
    pub fn new(outer: &OuterItem, inner: &InnerItem) -> Self {
        Self {
            outer: outer.id.clone(),
            inner: inner.id.clone(),
        }
    }
}

/// Record that the user viewed the item at the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub item_type: ItemType,
    pub item_id: i64,
    pub completed: bool,
}

impl ProgressEvent {
    /// Completed-view event for an item.
    pub fn viewed(item_type: ItemType, item_id: i64) -> Self {
        Self {
            item_type,
            item_id,
            completed: true,
        }
    }
}

/// Lesson metadata shown in the screen header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonInfo {
    pub lesson_id: i64,
    pub hsk_level: u32,
    pub title: String,
}

impl LessonInfo {
    /// Header used when the backend provides no metadata.
    pub fn placeholder(lesson_id: i64, hsk_level: u32) -> Self {
        Self {
            lesson_id,
            hsk_level,
            title: format!("Bài {}", lesson_id),
        }
    }
}
