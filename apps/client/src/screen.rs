//! Screen controller for the vocabulary and grammar review screens.
//!
//! Owns the review cursor, the mastered and favorite sets, the writing pad and
//! the progress reporter for one screen visit. All mutation happens through
//! `&mut self` from the UI event loop; only lesson fetches and progress
//! reports are asynchronous.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use review_core::cursor::{Progress, ReviewCursor};
use review_core::error::CollectionError;
use review_core::stroke::{Point, StrokeBuffer};
use review_core::types::{InnerItem, ItemKey, LessonInfo, OuterItem, ProgressEvent, ScreenKind};
use tracing::{debug, info};

use crate::progress::{ProgressReporter, ProgressSink};
use crate::source::{load_with_fallback, ContentError, ContentSource, Loaded, MockSource, Origin};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Fallback lesson unavailable: {0}")]
    Content(#[from] ContentError),

    #[error("Invalid lesson collection: {0}")]
    Collection(#[from] CollectionError),
}

/// Identifies one lesson request. Only the newest ticket may be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied(Origin),
    /// A newer load was requested, or the screen was unmounted.
    Stale,
}

struct Session {
    info: LessonInfo,
    origin: Origin,
    cursor: ReviewCursor,
    favorites: HashSet<ItemKey>,
}

pub struct ScreenController<S, P> {
    kind: ScreenKind,
    lesson_id: i64,
    source: S,
    fallback: MockSource,
    reporter: ProgressReporter<P>,
    session: Option<Session>,
    strokes: StrokeBuffer,
    writing_mode: bool,
    generation: u64,
}

impl<S, P> ScreenController<S, P>
where
    S: ContentSource,
    P: ProgressSink,
{
    pub fn new(kind: ScreenKind, lesson_id: i64, source: S, sink: Arc<P>, debounce: Duration) -> Self {
        Self {
            kind,
            lesson_id,
            source,
            fallback: MockSource,
            reporter: ProgressReporter::new(sink, debounce),
            session: None,
            strokes: StrokeBuffer::new(),
            writing_mode: false,
            generation: 0,
        }
    }

    pub fn kind(&self) -> ScreenKind {
        self.kind
    }

    pub fn lesson_id(&self) -> i64 {
        self.lesson_id
    }

    /// Fetch the lesson (falling back to the built-in one) and apply it.
    pub async fn load(&mut self) -> Result<Origin, LoadError> {
        let ticket = self.begin_load();
        let loaded = load_with_fallback(&self.source, &self.fallback, self.kind, self.lesson_id).await;
        match self.finish_load(ticket, loaded)? {
            LoadOutcome::Applied(origin) => Ok(origin),
            // Unreachable while `&mut self` is held across the fetch.
            LoadOutcome::Stale => Ok(self.origin().unwrap_or(Origin::Fallback)),
        }
    }

    /// Switch to another lesson and load it.
    pub async fn open_lesson(&mut self, lesson_id: i64) -> Result<Origin, LoadError> {
        self.lesson_id = lesson_id;
        self.load().await
    }

    /// Start a lesson request, invalidating any request still in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    /// Apply the result of a request started with [`begin_load`](Self::begin_load).
    ///
    /// Results for superseded tickets are dropped untouched. Applying a
    /// collection resets cursor, mastered and favorite sets and strokes.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        loaded: Result<Loaded, ContentError>,
    ) -> Result<LoadOutcome, LoadError> {
        if ticket.0 != self.generation {
            debug!(lesson_id = self.lesson_id, "dropping stale lesson response");
            return Ok(LoadOutcome::Stale);
        }

        let Loaded { content, origin } = loaded?;
        let cursor = ReviewCursor::new(content.items)?;

        info!(
            lesson_id = self.lesson_id,
            kind = self.kind.as_str(),
            items = cursor.total(),
            ?origin,
            "lesson loaded"
        );

        self.session = Some(Session {
            info: content.info,
            origin,
            cursor,
            favorites: HashSet::new(),
        });
        self.strokes.clear();
        self.report_current();

        Ok(LoadOutcome::Applied(origin))
    }

    /// Leave the screen: ignore in-flight responses and drop pending reports.
    pub fn unmount(&mut self) {
        self.generation += 1;
        self.reporter.cancel();
    }

    pub fn is_loaded(&self) -> bool {
        self.session.is_some()
    }

    pub fn info(&self) -> Option<&LessonInfo> {
        self.session.as_ref().map(|s| &s.info)
    }

    pub fn origin(&self) -> Option<Origin> {
        self.session.as_ref().map(|s| s.origin)
    }

    pub fn cursor(&self) -> Option<&ReviewCursor> {
        self.session.as_ref().map(|s| &s.cursor)
    }

    pub fn current(&self) -> Option<(&OuterItem, &InnerItem)> {
        self.cursor().map(ReviewCursor::current)
    }

    pub fn progress(&self) -> Option<Progress> {
        self.cursor().map(ReviewCursor::progress)
    }

    pub fn has_next(&self) -> bool {
        self.cursor().is_some_and(ReviewCursor::has_next)
    }

    pub fn has_previous(&self) -> bool {
        self.cursor().is_some_and(ReviewCursor::has_previous)
    }

    pub fn next(&mut self) -> bool {
        let moved = self
            .session
            .as_mut()
            .is_some_and(|s| s.cursor.next());
        if moved {
            self.on_focus_changed();
        }
        moved
    }

    pub fn previous(&mut self) -> bool {
        let moved = self
            .session
            .as_mut()
            .is_some_and(|s| s.cursor.previous());
        if moved {
            self.on_focus_changed();
        }
        moved
    }

    /// Returns the new membership; `false` before a lesson is loaded.
    pub fn toggle_mastered(&mut self) -> bool {
        self.session
            .as_mut()
            .is_some_and(|s| s.cursor.toggle_mastered())
    }

    pub fn is_mastered(&self) -> bool {
        self.cursor().is_some_and(ReviewCursor::is_mastered)
    }

    pub fn toggle_favorite(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let key = session.cursor.current_key();
        if session.favorites.remove(&key) {
            false
        } else {
            session.favorites.insert(key);
            true
        }
    }

    pub fn is_favorite(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.favorites.contains(&s.cursor.current_key()))
    }

    pub fn writing_mode(&self) -> bool {
        self.writing_mode
    }

    /// Switching writing mode on starts from a blank pad.
    pub fn toggle_writing_mode(&mut self) -> bool {
        self.writing_mode = !self.writing_mode;
        if self.writing_mode {
            self.strokes.clear();
        }
        self.writing_mode
    }

    pub fn strokes(&self) -> &StrokeBuffer {
        &self.strokes
    }

    pub fn stroke_start(&mut self, at: Point) {
        if self.writing_mode {
            self.strokes.begin(at);
        }
    }

    pub fn stroke_move(&mut self, to: Point) {
        if self.writing_mode {
            self.strokes.extend(to);
        }
    }

    pub fn stroke_end(&mut self) {
        self.strokes.end();
    }

    pub fn stroke_cancel(&mut self) {
        self.strokes.cancel();
    }

    pub fn clear_strokes(&mut self) {
        self.strokes.clear();
    }

    /// Key of the report still waiting for the debounce delay.
    pub fn pending_report(&self) -> Option<&ItemKey> {
        self.reporter.pending_key()
    }

    fn on_focus_changed(&mut self) {
        if let Some(cursor) = self.cursor() {
            let position = cursor.position();
            debug!(outer = position.outer, inner = position.inner, "cursor moved");
        }
        self.strokes.clear();
        self.report_current();
    }

    /// Schedule a report for the focused item, superseding any pending one.
    fn report_current(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let (outer, inner) = session.cursor.current();
        let key = ItemKey::new(outer, inner);

        match inner.remote_id {
            Some(item_id) => {
                let event = ProgressEvent::viewed(self.kind.item_type(), item_id);
                self.reporter.schedule(key, event);
            }
            None => {
                debug!(outer = %key.outer, inner = %key.inner, "item has no backend id, not reported");
                self.reporter.cancel();
            }
        }
    }
}
