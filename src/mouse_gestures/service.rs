use crate::mouse_gestures::code::GestureCode;
use crate::mouse_gestures::context::{
    detect_context, should_ignore_element, should_suppress_default, truncate_chars,
    DetectRequest, DocumentProbe, ElementNode, GestureContext, Modifiers, PointerButton,
    LINK_SEARCH_DEPTH, MAX_SELECTION_CHARS,
};
use crate::mouse_gestures::engine::recognize;
use crate::mouse_gestures::exclusion::ExclusionMatcher;
use crate::mouse_gestures::geometry::{distance, Point};
use crate::mouse_gestures::overlay::{
    CursorStyle, FeedbackBackend, FeedbackSession, HeadlessFeedback,
};
use crate::settings::{GestureSettings, ModifierKey};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Displacement a link or selection stroke needs before it takes over the
/// pointer from the page.
pub const DRAG_ARM_THRESHOLD_PX: f64 = 16.0;
pub const LIVE_RECOGNITION_INTERVAL_MS: u64 = 100;
/// Window after a completed gesture in which one trailing click or context
/// menu is swallowed.
pub const TRAILING_EVENT_WINDOW_MS: u64 = 100;

pub trait Clock {
    /// Monotonic milliseconds.
    fn now_ms(&self) -> u64;
}

#[derive(Debug)]
pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Clock driven by hand, for replays and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::SeqCst);
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// The single hand-off to the action layer for a finished stroke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureEvent {
    pub context: GestureContext,
    pub gesture_code: GestureCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_text: Option<String>,
    /// Wall-clock milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
}

/// Receives finalized gestures. Delivery is fire-and-forget: the controller
/// never waits on the sink and a failed delivery is the sink's to report.
pub trait GestureEventSink {
    fn dispatch(&self, event: GestureEvent);
}

impl GestureEventSink for Sender<GestureEvent> {
    fn dispatch(&self, event: GestureEvent) {
        if let Err(err) = self.send(event) {
            tracing::warn!(?err, "gesture event receiver is gone");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Let the browser handle the event.
    PassThrough,
    /// Cancel the default action and stop propagation.
    Suppress,
}

impl Disposition {
    pub fn is_suppressed(self) -> bool {
        self == Disposition::Suppress
    }

    fn suppress_if(cond: bool) -> Self {
        if cond {
            Disposition::Suppress
        } else {
            Disposition::PassThrough
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerDown {
    pub x: f64,
    pub y: f64,
    pub button: PointerButton,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Event target; hit-tested through the probe when absent.
    #[serde(default)]
    pub target: Option<ElementNode>,
}

#[derive(Debug)]
struct StrokeState {
    context: GestureContext,
    /// Settings in force when the stroke began.
    settings: Arc<GestureSettings>,
    origin: Point,
    path: Vec<Point>,
    link_target: Option<String>,
    link_text: Option<String>,
    selected_text: Option<String>,
    modifier_pressed: bool,
    max_distance: f64,
    armed: bool,
    last_live_recognition: Option<u64>,
    feedback: FeedbackSession,
}

impl StrokeState {
    fn threshold_reached(&self) -> bool {
        match self.context {
            GestureContext::Page => {
                self.max_distance >= self.settings.activation.page_threshold_px
            }
            GestureContext::Link | GestureContext::Selection => self.armed,
        }
    }

    fn arm(&mut self, at: Point) {
        if self.armed {
            return;
        }
        self.armed = true;
        let show_chip = self.settings.style.show_context_chip;
        self.feedback.start_trail(self.origin, self.context, show_chip);
        let ghost = match self.context {
            GestureContext::Selection => self.selected_text.clone(),
            GestureContext::Link => self.link_text.clone().or_else(|| self.link_target.clone()),
            GestureContext::Page => None,
        };
        if let Some(text) = ghost {
            self.feedback.start_drag_text(&text, at);
        }
    }
}

/// Per-document gesture capture state machine.
///
/// Idle until a pointer-down passes activation, then capturing until the
/// matching pointer-up. Strokes are strictly sequential.
pub struct GestureCapture {
    settings: Arc<GestureSettings>,
    exclusions: ExclusionMatcher,
    page_url: Option<Url>,
    feedback: Arc<dyn FeedbackBackend>,
    sink: Box<dyn GestureEventSink>,
    clock: Arc<dyn Clock>,
    stroke: Option<StrokeState>,
    completed_at: Option<u64>,
}

impl GestureCapture {
    pub fn new(settings: Arc<GestureSettings>, sink: Box<dyn GestureEventSink>) -> Self {
        Self::new_with_backends(
            settings,
            Arc::new(HeadlessFeedback),
            sink,
            Arc::new(MonotonicClock::default()),
        )
    }

    pub fn new_with_backends(
        settings: Arc<GestureSettings>,
        feedback: Arc<dyn FeedbackBackend>,
        sink: Box<dyn GestureEventSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let exclusions = ExclusionMatcher::new(&settings.exclusions);
        Self {
            settings,
            exclusions,
            page_url: None,
            feedback,
            sink,
            clock,
            stroke: None,
            completed_at: None,
        }
    }

    /// Sets the document URL used for exclusions and relative link targets.
    pub fn set_page_url(&mut self, url: &str) {
        self.page_url = match Url::parse(url) {
            Ok(url) => Some(url),
            Err(err) => {
                tracing::debug!(%err, url, "page url is not absolute");
                None
            }
        };
    }

    pub fn is_excluded(&self) -> bool {
        self.page_url
            .as_ref()
            .map(|url| self.exclusions.is_excluded(url.as_str()))
            .unwrap_or(false)
    }

    pub fn is_capturing(&self) -> bool {
        self.stroke.is_some()
    }

    pub fn current_context(&self) -> Option<GestureContext> {
        self.stroke.as_ref().map(|stroke| stroke.context)
    }

    pub fn is_armed(&self) -> bool {
        self.stroke.as_ref().map(|stroke| stroke.armed).unwrap_or(false)
    }

    pub fn settings(&self) -> &Arc<GestureSettings> {
        &self.settings
    }

    /// Swaps in a new settings snapshot.
    ///
    /// A stroke in flight keeps the snapshot it started with, unless the new
    /// settings switch its context off, in which case it is abandoned.
    pub fn update_settings(&mut self, settings: Arc<GestureSettings>) {
        if Arc::ptr_eq(&self.settings, &settings) {
            return;
        }
        self.exclusions.update_patterns(&settings.exclusions);
        self.settings = settings;

        let still_active = match self.stroke.as_ref() {
            Some(stroke) => {
                self.settings.global_enabled
                    && self.settings.activation.is_enabled(stroke.context)
                    && !self.is_excluded()
            }
            None => return,
        };
        if !still_active {
            if let Some(stroke) = self.stroke.take() {
                tracing::debug!(context = %stroke.context, "stroke abandoned after settings change");
            }
        }
    }

    pub fn pointer_down(&mut self, event: &PointerDown, probe: &dyn DocumentProbe) -> Disposition {
        if !self.settings.global_enabled || self.is_excluded() {
            return Disposition::PassThrough;
        }
        if self.stroke.is_some() {
            // A second button while capturing does not start a new stroke.
            return Disposition::PassThrough;
        }
        if !matches!(event.button, PointerButton::Primary | PointerButton::Secondary) {
            return Disposition::PassThrough;
        }

        let target = match event.target.clone() {
            Some(target) => Some(target),
            None => match probe.element_at(event.x, event.y) {
                Ok(target) => target,
                Err(err) => {
                    tracing::debug!(?err, "element lookup failed");
                    return Disposition::PassThrough;
                }
            },
        };
        if target.as_ref().map(should_ignore_element).unwrap_or(false) {
            return Disposition::PassThrough;
        }

        // Read the selection before anything else can clear it.
        let selection = match probe.selection() {
            Ok(selection) => selection,
            Err(err) => {
                tracing::debug!(?err, "selection query failed");
                return Disposition::PassThrough;
            }
        };
        let has_selection = selection
            .as_ref()
            .map(|s| !s.text.trim().is_empty())
            .unwrap_or(false);

        let activation = &self.settings.activation;
        let required_modifier = match event.button {
            PointerButton::Primary if has_selection => {
                if !activation.selection_enabled {
                    return Disposition::PassThrough;
                }
                activation.selection_modifier
            }
            PointerButton::Primary => {
                if !activation.link_enabled {
                    return Disposition::PassThrough;
                }
                activation.link_modifier
            }
            _ => {
                if !activation.page_enabled {
                    return Disposition::PassThrough;
                }
                ModifierKey::None
            }
        };
        let modifier_pressed = required_modifier.is_held(&event.modifiers);

        let request = DetectRequest {
            target: target.as_ref(),
            button: event.button,
            modifier_held: modifier_pressed,
            required_modifier,
            selection: selection.as_ref(),
            pointer: Some((event.x, event.y)),
            link_enabled: activation.link_enabled,
            selection_enabled: activation.selection_enabled,
            base_url: self.page_url.as_ref(),
        };
        let Some(detection) = detect_context(&request) else {
            return Disposition::PassThrough;
        };

        self.completed_at = None;

        let origin = Point::new(event.x, event.y, self.clock.now_ms());
        let feedback = FeedbackSession::acquire(
            Arc::clone(&self.feedback),
            CursorStyle::for_context(detection.context),
        );
        let link_text = match detection.context {
            GestureContext::Link => target.as_ref().and_then(anchor_text),
            _ => None,
        };
        let mut stroke = StrokeState {
            context: detection.context,
            settings: Arc::clone(&self.settings),
            origin,
            path: vec![origin],
            link_target: detection.link_target,
            link_text,
            selected_text: detection.selected_text,
            modifier_pressed,
            max_distance: 0.0,
            armed: false,
            last_live_recognition: None,
            feedback,
        };
        if stroke.context == GestureContext::Page {
            stroke.arm(origin);
        }

        tracing::debug!(
            context = %stroke.context,
            x = event.x,
            y = event.y,
            modifier = stroke.modifier_pressed,
            "gesture stroke started"
        );
        self.stroke = Some(stroke);
        Disposition::PassThrough
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, probe: &dyn DocumentProbe) -> Disposition {
        let now = self.clock.now_ms();
        let Some(stroke) = self.stroke.as_mut() else {
            return Disposition::PassThrough;
        };

        let last_ts = stroke.path.last().map(|p| p.timestamp).unwrap_or(0);
        let point = Point::new(x, y, now.max(last_ts));
        let moved = distance(stroke.origin, point);
        stroke.max_distance = stroke.max_distance.max(moved);

        let context = stroke.context;
        let disposition = match context {
            GestureContext::Page => Disposition::suppress_if(should_suppress_default(
                GestureContext::Page,
                moved,
                stroke.settings.activation.page_threshold_px,
                false,
            )),
            GestureContext::Link | GestureContext::Selection => {
                if moved >= DRAG_ARM_THRESHOLD_PX {
                    stroke.arm(point);
                }
                if stroke.armed {
                    // Armed strokes stay armed on backtrack; only focus matters.
                    Disposition::suppress_if(!focused_element_editable(probe))
                } else {
                    Disposition::PassThrough
                }
            }
        };

        stroke.path.push(point);
        stroke.feedback.push_point(point);
        if context != GestureContext::Page {
            stroke.feedback.move_drag_text(point);
        }
        live_recognition(stroke, now);

        disposition
    }

    pub fn pointer_up(&mut self, _x: f64, _y: f64, probe: &dyn DocumentProbe) -> Disposition {
        let Some(stroke) = self.stroke.take() else {
            return Disposition::PassThrough;
        };

        // Editable focus keeps the native mouseup and the click that follows.
        let native_kept =
            stroke.context != GestureContext::Page && focused_element_editable(probe);
        let disposition = Disposition::suppress_if(
            stroke.context != GestureContext::Page && stroke.armed && !native_kept,
        );

        if !stroke.threshold_reached() {
            tracing::debug!(context = %stroke.context, "stroke below activation threshold");
            return disposition;
        }

        let code = recognize(&stroke.path, &stroke.settings.recognition);
        if !code.is_valid() {
            tracing::debug!(
                context = %stroke.context,
                points = stroke.path.len(),
                "stroke produced no gesture"
            );
            return disposition;
        }

        tracing::info!(context = %stroke.context, code = %code, "gesture recognized");
        let StrokeState {
            context,
            link_target,
            selected_text,
            ..
        } = stroke;
        self.sink.dispatch(GestureEvent {
            context,
            gesture_code: code,
            link_target,
            selected_text,
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
        });
        if !native_kept {
            self.completed_at = Some(self.clock.now_ms());
        }
        disposition
    }

    pub fn click(&mut self) -> Disposition {
        Disposition::suppress_if(self.take_trailing_suppression())
    }

    pub fn context_menu(&mut self, x: f64, y: f64) -> Disposition {
        if self.take_trailing_suppression() {
            return Disposition::Suppress;
        }
        match self.stroke.as_ref() {
            Some(stroke) if stroke.context == GestureContext::Page => {
                let moved = distance(stroke.origin, Point::new(x, y, 0));
                Disposition::suppress_if(moved >= stroke.settings.activation.page_threshold_px)
            }
            _ => Disposition::PassThrough,
        }
    }

    pub fn drag_start(&mut self) -> Disposition {
        Disposition::suppress_if(self.stroke.is_some())
    }

    /// Consumes the "gesture just completed" flag. Only the first trailing
    /// event inside the window is swallowed.
    fn take_trailing_suppression(&mut self) -> bool {
        let now = self.clock.now_ms();
        match self.completed_at.take() {
            Some(at) => now.saturating_sub(at) < TRAILING_EVENT_WINDOW_MS,
            None => false,
        }
    }
}

impl std::fmt::Debug for GestureCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureCapture")
            .field("page_url", &self.page_url.as_ref().map(Url::as_str))
            .field("capturing", &self.stroke.is_some())
            .field("completed_at", &self.completed_at)
            .finish()
    }
}

fn live_recognition(stroke: &mut StrokeState, now: u64) {
    if !stroke.armed || !stroke.settings.style.show_gesture_name || stroke.path.len() < 3 {
        return;
    }
    if let Some(last) = stroke.last_live_recognition {
        if now.saturating_sub(last) < LIVE_RECOGNITION_INTERVAL_MS {
            return;
        }
    }
    stroke.last_live_recognition = Some(now);

    let code = recognize(&stroke.path, &stroke.settings.recognition);
    if !code.is_valid() {
        return;
    }
    let label = match stroke.settings.mapping(stroke.context, &code) {
        Some(action) => action.label().to_string(),
        None => code.to_arrows(),
    };
    stroke.feedback.show_preview(&label);
}

fn focused_element_editable(probe: &dyn DocumentProbe) -> bool {
    match probe.active_element() {
        Ok(element) => element.map(|el| el.is_editable()).unwrap_or(false),
        Err(err) => {
            tracing::debug!(?err, "active element query failed");
            true
        }
    }
}

fn anchor_text(target: &ElementNode) -> Option<String> {
    target
        .ancestors()
        .take(LINK_SEARCH_DEPTH)
        .find(|node| node.is_tag("a"))
        .map(|node| node.text_content.trim())
        .filter(|text| !text.is_empty())
        .map(|text| truncate_chars(text, MAX_SELECTION_CHARS))
}
