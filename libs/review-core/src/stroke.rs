//! Stroke capture for character writing practice.
//!
//! A drag gesture becomes one vector path: a move-to at the start point
//! followed by a line-to per pointer move. Coordinates are stored as given,
//! in the local space of the drawing surface.

use std::fmt;

/// Point in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        debug_assert!(x.is_finite() && y.is_finite(), "non-finite stroke coordinate");
        Self { x, y }
    }
}

/// One SVG path command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveTo(p) => write!(f, "M{},{}", p.x, p.y),
            Self::LineTo(p) => write!(f, "L{},{}", p.x, p.y),
        }
    }
}

/// A single stroke. Always starts with a move-to.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokePath {
    commands: Vec<PathCommand>,
}

impl StrokePath {
    fn start(at: Point) -> Self {
        Self {
            commands: vec![PathCommand::MoveTo(at)],
        }
    }

    fn line_to(&mut self, to: Point) {
        self.commands.push(PathCommand::LineTo(to));
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Path data suitable for an SVG `d` attribute.
    pub fn to_svg(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StrokePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", command)?;
        }
        Ok(())
    }
}

/// Finished strokes plus the stroke being drawn, if any.
///
/// `Idle` when `active` is `None`, `Drawing` otherwise.
#[derive(Debug, Clone, Default)]
pub struct StrokeBuffer {
    finished: Vec<StrokePath>,
    active: Option<StrokePath>,
}

impl StrokeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    /// Gesture start. A stroke already in progress is discarded.
    pub fn begin(&mut self, at: Point) {
        self.active = Some(StrokePath::start(at));
    }

    /// Gesture move. Ignored when idle.
    pub fn extend(&mut self, to: Point) {
        if let Some(path) = self.active.as_mut() {
            path.line_to(to);
        }
    }

    /// Gesture end: commit the active stroke.
    pub fn end(&mut self) {
        if let Some(path) = self.active.take() {
            if !path.is_empty() {
                self.finished.push(path);
            }
        }
    }

    /// Gesture cancelled by the system: drop the active stroke.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn clear(&mut self) {
        self.finished.clear();
        self.active = None;
    }

    pub fn finished(&self) -> &[StrokePath] {
        &self.finished
    }

    pub fn active(&self) -> Option<&StrokePath> {
        self.active.as_ref()
    }

    /// Every path to draw, finished strokes first.
    pub fn paths(&self) -> impl Iterator<Item = &StrokePath> {
        self.finished.iter().chain(self.active.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.finished.is_empty() && self.active.is_none()
    }
}
