//! Lesson content sources and the fallback policy between them.

use std::future::Future;

use review_core::error::PayloadError;
use review_core::lesson::{map_lesson, LessonContent};
use review_core::mock;
use review_core::types::ScreenKind;
use tracing::warn;

use crate::api::{ApiError, LessonApi};

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Malformed lesson: {0}")]
    Payload(#[from] PayloadError),

    #[error("Lesson has no items for this screen")]
    NoItems,
}

/// Something that can produce the collection for a screen.
pub trait ContentSource: Send + Sync {
    fn load(
        &self,
        kind: ScreenKind,
        lesson_id: i64,
    ) -> impl Future<Output = Result<LessonContent, ContentError>> + Send;
}

/// Lessons fetched from the backend.
#[derive(Clone)]
pub struct RemoteSource {
    api: LessonApi,
}

impl RemoteSource {
    pub fn new(api: LessonApi) -> Self {
        Self { api }
    }
}

impl ContentSource for RemoteSource {
    async fn load(&self, kind: ScreenKind, lesson_id: i64) -> Result<LessonContent, ContentError> {
        let body = self.api.fetch_lesson(lesson_id).await?;
        let content = map_lesson(kind, lesson_id, &body)?;
        if content.items.is_empty() {
            return Err(ContentError::NoItems);
        }
        Ok(content)
    }
}

/// The fixed built-in lessons.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockSource;

impl ContentSource for MockSource {
    async fn load(&self, kind: ScreenKind, lesson_id: i64) -> Result<LessonContent, ContentError> {
        Ok(mock::lesson(kind, lesson_id))
    }
}

/// Which source a loaded collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Remote,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub content: LessonContent,
    pub origin: Origin,
}

/// Load from `primary`, falling back to `fallback` on any failure.
///
/// Network errors, non-success statuses, malformed bodies and lessons with no
/// usable items all select the fallback; none of them reach the caller.
pub async fn load_with_fallback<P, F>(
    primary: &P,
    fallback: &F,
    kind: ScreenKind,
    lesson_id: i64,
) -> Result<Loaded, ContentError>
where
    P: ContentSource,
    F: ContentSource,
{
    match primary.load(kind, lesson_id).await {
        Ok(content) => Ok(Loaded {
            content,
            origin: Origin::Remote,
        }),
        Err(e) => {
            warn!(lesson_id, kind = kind.as_str(), error = %e, "lesson unavailable, using built-in lesson");
            let content = fallback.load(kind, lesson_id).await?;
            Ok(Loaded {
                content,
                origin: Origin::Fallback,
            })
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use review_core::types::LessonInfo;
    use review_core::types::{InnerItem, OuterItem};

    /// Source returning a fixed result.
    pub(crate) struct StaticSource(pub Option<LessonContent>);

    impl ContentSource for StaticSource {
        async fn load(&self, _kind: ScreenKind, _lesson_id: i64) -> Result<LessonContent, ContentError> {
            self.0.clone().ok_or(ContentError::NoItems)
        }
    }

    pub(crate) fn content(shape: &[(&str, &[i64])]) -> LessonContent {
        let items = shape
            .iter()
            .map(|(outer, inner)| OuterItem {
                id: outer.to_string(),
                remote_id: None,
                word: outer.to_string(),
                transliteration: String::new(),
                meaning: String::new(),
                inner: inner
                    .iter()
                    .map(|id| InnerItem {
                        id: id.to_string(),
                        remote_id: Some(*id),
                        text: format!("sentence {}", id),
                        transliteration: String::new(),
                        translation: String::new(),
                        keyword: None,
                        keyword_transliteration: None,
                    })
                    .collect(),
            })
            .collect();
        LessonContent {
            info: LessonInfo::placeholder(1, 1),
            items,
        }
    }

    #[tokio::test]
    async fn primary_success_is_remote() {
        let primary = StaticSource(Some(content(&[("A", &[1])])));
        let loaded = load_with_fallback(&primary, &MockSource, ScreenKind::Grammar, 1)
            .await
            .unwrap();
        assert_eq!(loaded.origin, Origin::Remote);
        assert_eq!(loaded.content.items[0].id, "A");
    }

    #[tokio::test]
    async fn primary_failure_uses_mock() {
        let loaded = load_with_fallback(&StaticSource(None), &MockSource, ScreenKind::Vocabulary, 3)
            .await
            .unwrap();
        assert_eq!(loaded.origin, Origin::Fallback);
        assert_eq!(loaded.content, mock::lesson(ScreenKind::Vocabulary, 3));
    }

    #[tokio::test]
    async fn remote_source_maps_network_failure() {
        // Port 9 (discard) is not served in the test environment.
        let api = LessonApi::with_tokens("http://127.0.0.1:9", Default::default());
        let result = RemoteSource::new(api).load(ScreenKind::Vocabulary, 1).await;
        assert!(matches!(result, Err(ContentError::Api(ApiError::Network(_)))));
    }
}
