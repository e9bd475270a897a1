use crate::mouse_gestures::context::GestureContext;
use crate::mouse_gestures::geometry::Point;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStyle {
    Grabbing,
}

impl CursorStyle {
    /// Every context draws with the same `grabbing` cursor.
    pub fn for_context(_context: GestureContext) -> Self {
        CursorStyle::Grabbing
    }

    pub fn as_css(self) -> &'static str {
        match self {
            CursorStyle::Grabbing => "grabbing",
        }
    }
}

/// Renders stroke feedback. Implementations own their drawing surfaces and
/// use interior mutability; all calls arrive on the event thread.
pub trait FeedbackBackend {
    fn set_cursor(&self, cursor: CursorStyle);
    fn restore_cursor(&self);
    fn begin_stroke(&self, origin: Point, context: GestureContext, show_context_chip: bool);
    fn push_point(&self, point: Point);
    fn end_stroke(&self);
    fn start_drag_text(&self, text: &str, at: Point);
    fn move_drag_text(&self, at: Point);
    fn end_drag_text(&self);
    /// `None` hides the live gesture name.
    fn update_preview(&self, text: Option<&str>);
}

/// Backend used without a display: every call is traced and dropped.
#[derive(Debug, Default)]
pub struct HeadlessFeedback;

impl FeedbackBackend for HeadlessFeedback {
    fn set_cursor(&self, cursor: CursorStyle) {
        tracing::trace!(cursor = cursor.as_css(), "set cursor");
    }

    fn restore_cursor(&self) {
        tracing::trace!("restore cursor");
    }

    fn begin_stroke(&self, origin: Point, context: GestureContext, _show_context_chip: bool) {
        tracing::trace!(x = origin.x, y = origin.y, %context, "begin stroke");
    }

    fn push_point(&self, _point: Point) {}

    fn end_stroke(&self) {
        tracing::trace!("end stroke");
    }

    fn start_drag_text(&self, text: &str, _at: Point) {
        tracing::trace!(len = text.len(), "start drag text");
    }

    fn move_drag_text(&self, _at: Point) {}

    fn end_drag_text(&self) {}

    fn update_preview(&self, text: Option<&str>) {
        if let Some(text) = text {
            tracing::trace!(text, "gesture preview");
        }
    }
}

/// Feedback resources held for one stroke.
///
/// Acquiring applies the cursor override; dropping the session releases
/// everything that was started, so every way a stroke ends restores the page.
pub struct FeedbackSession {
    backend: Arc<dyn FeedbackBackend>,
    trail_active: bool,
    drag_text_active: bool,
    preview_visible: bool,
}

impl FeedbackSession {
    pub fn acquire(backend: Arc<dyn FeedbackBackend>, cursor: CursorStyle) -> Self {
        backend.set_cursor(cursor);
        Self {
            backend,
            trail_active: false,
            drag_text_active: false,
            preview_visible: false,
        }
    }

    pub fn start_trail(&mut self, origin: Point, context: GestureContext, show_context_chip: bool) {
        if self.trail_active {
            return;
        }
        self.backend.begin_stroke(origin, context, show_context_chip);
        self.trail_active = true;
    }

    pub fn push_point(&mut self, point: Point) {
        if self.trail_active {
            self.backend.push_point(point);
        }
    }

    pub fn start_drag_text(&mut self, text: &str, at: Point) {
        if self.drag_text_active || text.is_empty() {
            return;
        }
        self.backend.start_drag_text(text, at);
        self.drag_text_active = true;
    }

    pub fn move_drag_text(&mut self, at: Point) {
        if self.drag_text_active {
            self.backend.move_drag_text(at);
        }
    }

    pub fn show_preview(&mut self, text: &str) {
        self.backend.update_preview(Some(text));
        self.preview_visible = true;
    }
}

impl Drop for FeedbackSession {
    fn drop(&mut self) {
        if self.trail_active {
            self.backend.end_stroke();
        }
        if self.drag_text_active {
            self.backend.end_drag_text();
        }
        if self.preview_visible {
            self.backend.update_preview(None);
        }
        self.backend.restore_cursor();
    }
}

impl std::fmt::Debug for FeedbackSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackSession")
            .field("trail_active", &self.trail_active)
            .field("drag_text_active", &self.drag_text_active)
            .field("preview_visible", &self.preview_visible)
            .finish()
    }
}
