//! Core review logic shared by the lesson screens.
//!
//! Provides:
//! - Hierarchical review cursor (outer items -> inner items) with mastery tracking
//! - Stroke capture buffer for character writing practice
//! - Lesson payload mapping with field-name fallback chains
//! - Built-in mock lessons used when the backend is unavailable
//! - Shared types (OuterItem, InnerItem, ProgressEvent, etc.)

pub mod cursor;
pub mod error;
pub mod lesson;
pub mod mock;
pub mod stroke;
pub mod types;

pub use cursor::{Position, Progress, ReviewCursor};
pub use error::{CollectionError, PayloadError};
pub use lesson::{
    highlight, map_lesson, normalize_lesson_id, parse_lesson_id, FieldChain, LessonContent, Segment,
};
pub use stroke::{PathCommand, Point, StrokeBuffer, StrokePath};
pub use types::{InnerItem, ItemKey, ItemType, LessonInfo, OuterItem, ProgressEvent, ScreenKind};
