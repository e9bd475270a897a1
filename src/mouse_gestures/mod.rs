mod code;
mod context;
mod db;
pub mod engine;
mod exclusion;
pub mod geometry;
mod overlay;
mod router;
mod service;

pub use code::{Direction, GestureCode, GestureCodeError, MAX_GESTURE_SEGMENTS};
pub use context::{
    detect_context, find_link, resolve_href, should_ignore_element, should_suppress_default,
    DetectRequest, Detection, DocumentProbe, ElementNode, GestureContext, Modifiers,
    PointerButton, Rect, SelectionSnapshot, LINK_SEARCH_DEPTH, MAX_SELECTION_CHARS,
    SELECTION_HIT_TOLERANCE_PX,
};
pub use db::{resolve, ContextMappings, GestureMapping};
pub use engine::recognize;
pub use exclusion::{ExclusionMatcher, PatternError};
pub use geometry::Point;
pub use overlay::{CursorStyle, FeedbackBackend, FeedbackSession, HeadlessFeedback};
pub use router::{ActionRouter, RouteOutcome};
pub use service::{
    Clock, Disposition, GestureCapture, GestureEvent, GestureEventSink, ManualClock,
    MonotonicClock, PointerDown, DRAG_ARM_THRESHOLD_PX, LIVE_RECOGNITION_INTERVAL_MS,
    TRAILING_EVENT_WINDOW_MS,
};
