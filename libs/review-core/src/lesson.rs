//! Mapping of lesson response bodies into review collections.
//!
//! Upstream lesson data has shipped under more than one field name for the
//! same logical value (`chinese` vs `sentence`, `meaning` vs `translation`).
//! Every logical field is read through a [`FieldChain`]: an ordered list of
//! candidate keys where the first non-empty string wins. The chains are listed
//! once below and nowhere else.
//!
//! # Body shape
//! ```json
//! {
//!   "hsk_level": 1,
//!   "title": "Chào hỏi",
//!   "vocabulary": [
//!     { "id": 3, "word": "你好", "pinyin": "nǐ hǎo", "meaning": "Xin chào",
//!       "examples": [{ "id": 9, "chinese": "你好吗？", "pinyin": "Nǐ hǎo ma?",
//!                      "vietnamese": "Bạn khỏe không?" }] }
//!   ],
//!   "grammar": []
//! }
//! ```

use serde_json::{Map, Value};

use crate::error::PayloadError;
use crate::types::{InnerItem, LessonInfo, OuterItem, ScreenKind};

/// Ordered candidate keys for one logical field.
#[derive(Debug, Clone, Copy)]
pub struct FieldChain {
    pub keys: &'static [&'static str],
}

impl FieldChain {
    const fn new(keys: &'static [&'static str]) -> Self {
        Self { keys }
    }

    /// First candidate holding a non-empty string.
    pub fn text<'a>(&self, object: &'a Map<String, Value>) -> Option<&'a str> {
        self.keys
            .iter()
            .filter_map(|key| object.get(*key).and_then(Value::as_str))
            .find(|value| !value.is_empty())
    }
}

pub const VOCAB_WORD: FieldChain = FieldChain::new(&["word", "character"]);
pub const VOCAB_PINYIN: FieldChain = FieldChain::new(&["pinyin"]);
pub const VOCAB_MEANING: FieldChain = FieldChain::new(&["meaning", "translation"]);

pub const EXAMPLE_TEXT: FieldChain = FieldChain::new(&["chinese", "sentence"]);
pub const EXAMPLE_PINYIN: FieldChain = FieldChain::new(&["pinyin", "sentence_pinyin"]);
pub const EXAMPLE_TRANSLATION: FieldChain = FieldChain::new(&["vietnamese", "translation"]);
pub const EXAMPLE_KEYWORD: FieldChain = FieldChain::new(&["keyword"]);
pub const EXAMPLE_KEYWORD_PINYIN: FieldChain = FieldChain::new(&["keyword_pinyin"]);

// Placeholders for vocabulary entries missing every candidate.
const DEFAULT_WORD: &str = "你好";
const DEFAULT_PINYIN: &str = "nǐ hǎo";
const DEFAULT_MEANING: &str = "Xin chào";

const DEFAULT_HSK_LEVEL: u32 = 1;
const LESSON_ID_PREFIX: &str = "lesson_";

/// Lesson metadata plus the collection for one screen.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonContent {
    pub info: LessonInfo,
    pub items: Vec<OuterItem>,
}

/// Map a lesson body into the collection for `kind`.
///
/// Grammar collections only contain vocabulary entries with at least one
/// example. The result may be empty; callers decide what an empty lesson means.
pub fn map_lesson(
    kind: ScreenKind,
    lesson_id: i64,
    body: &Value,
) -> Result<LessonContent, PayloadError> {
    let object = body.as_object().ok_or(PayloadError::NotAnObject)?;

    let mut info = LessonInfo::placeholder(lesson_id, DEFAULT_HSK_LEVEL);
    if let Some(level) = object
        .get("hsk_level")
        .and_then(Value::as_u64)
        .and_then(|level| u32::try_from(level).ok())
    {
        info.hsk_level = level;
    }
    if let Some(title) = object.get("title").and_then(Value::as_str) {
        if !title.is_empty() {
            info.title = title.to_string();
        }
    }

    let vocabulary = array_field(object, "vocabulary")?;
    let mut items = Vec::with_capacity(vocabulary.len());

    for (index, entry) in vocabulary.iter().enumerate() {
        let entry = entry
            .as_object()
            .ok_or(PayloadError::InvalidField { field: "vocabulary" })?;
        let outer = map_vocabulary(entry, index);

        match kind {
            ScreenKind::Vocabulary => {
                let inner = InnerItem {
                    id: outer.id.clone(),
                    remote_id: outer.remote_id,
                    text: outer.word.clone(),
                    transliteration: outer.transliteration.clone(),
                    translation: outer.meaning.clone(),
                    keyword: None,
                    keyword_transliteration: None,
                };
                items.push(OuterItem {
                    inner: vec![inner],
                    ..outer
                });
            }
            ScreenKind::Grammar => {
                let examples = array_field(entry, "examples")?;
                let mut inner = Vec::with_capacity(examples.len());
                for (ex_index, example) in examples.iter().enumerate() {
                    let example = example
                        .as_object()
                        .ok_or(PayloadError::InvalidField { field: "examples" })?;
                    if let Some(item) = map_example(example, &outer.id, ex_index) {
                        inner.push(item);
                    }
                }
                if !inner.is_empty() {
                    items.push(OuterItem { inner, ..outer });
                }
            }
        }
    }

    Ok(LessonContent { info, items })
}

fn map_vocabulary(entry: &Map<String, Value>, index: usize) -> OuterItem {
    let (id, remote_id) = match read_id(entry) {
        Some(id) => id,
        // Prefixed so a positional id never equals an explicit one.
        None => (format!("#{}", index), None),
    };

    OuterItem {
        id,
        remote_id,
        word: VOCAB_WORD.text(entry).unwrap_or(DEFAULT_WORD).to_string(),
        transliteration: VOCAB_PINYIN.text(entry).unwrap_or(DEFAULT_PINYIN).to_string(),
        meaning: VOCAB_MEANING.text(entry).unwrap_or(DEFAULT_MEANING).to_string(),
        inner: Vec::new(),
    }
}

fn map_example(example: &Map<String, Value>, outer_id: &str, index: usize) -> Option<InnerItem> {
    let text = EXAMPLE_TEXT.text(example)?;
    let (id, remote_id) = match read_id(example) {
        Some(id) => id,
        None => (format!("{}_{}", outer_id, index), None),
    };

    Some(InnerItem {
        id,
        remote_id,
        text: text.to_string(),
        transliteration: EXAMPLE_PINYIN.text(example).unwrap_or_default().to_string(),
        translation: EXAMPLE_TRANSLATION.text(example).unwrap_or_default().to_string(),
        keyword: EXAMPLE_KEYWORD.text(example).map(str::to_string),
        keyword_transliteration: EXAMPLE_KEYWORD_PINYIN.text(example).map(str::to_string),
    })
}

/// Read an `id` given either as a number or a string.
fn read_id(object: &Map<String, Value>) -> Option<(String, Option<i64>)> {
    match object.get("id")? {
        Value::Number(n) => n.as_i64().map(|n| (n.to_string(), Some(n))),
        Value::String(s) if !s.is_empty() => Some((s.clone(), s.parse().ok())),
        _ => None,
    }
}

/// Missing or null fields read as an empty list.
fn array_field<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a [Value], PayloadError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(&[][..]),
        Some(Value::Array(values)) => Ok(values.as_slice()),
        Some(_) => Err(PayloadError::InvalidField { field }),
    }
}

/// Normalize a lesson id as returned by the resume endpoint.
///
/// Accepts `7`, `"7"` and `"lesson_7"`.
pub fn normalize_lesson_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => parse_lesson_id(s),
        _ => None,
    }
}

pub fn parse_lesson_id(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.strip_prefix(LESSON_ID_PREFIX)
        .unwrap_or(raw)
        .parse()
        .ok()
}

/// Part of a sentence with its keyword marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Keyword(&'a str),
}

/// Split `text` around the first occurrence of `keyword`.
pub fn highlight<'a>(text: &'a str, keyword: Option<&'a str>) -> Vec<Segment<'a>> {
    let Some(keyword) = keyword.filter(|k| !k.is_empty()) else {
        return vec![Segment::Plain(text)];
    };
    let Some((before, after)) = text.split_once(keyword) else {
        return vec![Segment::Plain(text)];
    };

    let mut segments = Vec::with_capacity(3);
    if !before.is_empty() {
        segments.push(Segment::Plain(before));
    }
    segments.push(Segment::Keyword(keyword));
    if !after.is_empty() {
        segments.push(Segment::Plain(after));
    }
    segments
}
