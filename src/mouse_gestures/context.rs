//! Classifies a pointer-down into the surface a stroke is drawn against.

use crate::settings::ModifierKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Pixels of slack around the selection rectangle that still count as a hit.
pub const SELECTION_HIT_TOLERANCE_PX: f64 = 10.0;
/// Selected text is cut to this many characters before it leaves the core.
pub const MAX_SELECTION_CHARS: usize = 500;
/// The target itself plus up to four ancestors are searched for an anchor.
pub const LINK_SEARCH_DEPTH: usize = 5;

const IGNORED_TAGS: [&str; 5] = ["video", "audio", "object", "embed", "iframe"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureContext {
    Page,
    Link,
    Selection,
}

impl GestureContext {
    pub const ALL: [GestureContext; 3] = [
        GestureContext::Page,
        GestureContext::Link,
        GestureContext::Selection,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GestureContext::Page => "page",
            GestureContext::Link => "link",
            GestureContext::Selection => "selection",
        }
    }
}

impl fmt::Display for GestureContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
    Other,
}

impl PointerButton {
    /// Maps a DOM `MouseEvent.button` value.
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => PointerButton::Primary,
            1 => PointerButton::Middle,
            2 => PointerButton::Secondary,
            _ => PointerButton::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
}

/// Snapshot of a DOM element and its ancestor chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementNode {
    pub tag: String,
    pub href: Option<String>,
    pub attributes: Vec<(String, String)>,
    pub text_content: String,
    pub parent: Option<Box<ElementNode>>,
}

impl ElementNode {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn with_href(mut self, href: &str) -> Self {
        self.href = Some(href.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_parent(mut self, parent: ElementNode) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// This element followed by its ancestors, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &ElementNode> {
        std::iter::successors(Some(self), |node| node.parent.as_deref())
    }

    pub fn is_editable(&self) -> bool {
        if self.is_tag("input") || self.is_tag("textarea") {
            return true;
        }
        matches!(self.attribute("contenteditable"), Some(value) if value != "false")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn contains_with_tolerance(&self, x: f64, y: f64, tolerance: f64) -> bool {
        x >= self.left - tolerance
            && x <= self.right + tolerance
            && y >= self.top - tolerance
            && y <= self.bottom + tolerance
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    pub text: String,
    /// Bounding rectangle of the first selection range, if any.
    pub bounds: Option<Rect>,
}

/// Read-only document queries the controller needs while handling events.
pub trait DocumentProbe {
    fn selection(&self) -> anyhow::Result<Option<SelectionSnapshot>>;
    /// The focused element, looking through shadow roots.
    fn active_element(&self) -> anyhow::Result<Option<ElementNode>>;
    fn element_at(&self, x: f64, y: f64) -> anyhow::Result<Option<ElementNode>>;
}

#[derive(Debug, Clone)]
pub struct DetectRequest<'a> {
    pub target: Option<&'a ElementNode>,
    pub button: PointerButton,
    pub modifier_held: bool,
    pub required_modifier: ModifierKey,
    /// Selection captured before anything else ran for this pointer-down.
    pub selection: Option<&'a SelectionSnapshot>,
    pub pointer: Option<(f64, f64)>,
    pub link_enabled: bool,
    pub selection_enabled: bool,
    pub base_url: Option<&'a Url>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub context: GestureContext,
    pub link_target: Option<String>,
    pub selected_text: Option<String>,
}

impl Detection {
    fn page() -> Self {
        Self {
            context: GestureContext::Page,
            link_target: None,
            selected_text: None,
        }
    }
}

pub fn detect_context(request: &DetectRequest<'_>) -> Option<Detection> {
    match request.button {
        PointerButton::Secondary => Some(Detection::page()),
        PointerButton::Primary => detect_primary(request),
        PointerButton::Middle | PointerButton::Other => None,
    }
}

fn detect_primary(request: &DetectRequest<'_>) -> Option<Detection> {
    if request.required_modifier != ModifierKey::None && !request.modifier_held {
        return None;
    }

    if request.selection_enabled {
        if let Some(text) = selection_hit(request) {
            return Some(Detection {
                context: GestureContext::Selection,
                link_target: None,
                selected_text: Some(text),
            });
        }
    }

    if request.link_enabled {
        if let Some(target) = request.target.and_then(|t| find_link(t, request.base_url)) {
            return Some(Detection {
                context: GestureContext::Link,
                link_target: Some(target),
                selected_text: None,
            });
        }
    }

    None
}

/// Returns the (truncated) selection text when the pointer went down on it.
///
/// The hit test requires the target's text to contain the selection and the
/// pointer to lie inside the selection rectangle plus a fixed tolerance. A
/// repeated substring elsewhere in the target can satisfy the first half.
fn selection_hit(request: &DetectRequest<'_>) -> Option<String> {
    let selection = request.selection?;
    let text = selection.text.trim();
    if text.is_empty() {
        return None;
    }
    let target = request.target?;
    if !target.text_content.contains(text) {
        return None;
    }
    let (x, y) = request.pointer?;
    let bounds = selection.bounds?;
    if !bounds.contains_with_tolerance(x, y, SELECTION_HIT_TOLERANCE_PX) {
        return None;
    }
    Some(truncate_chars(text, MAX_SELECTION_CHARS))
}

pub fn find_link(element: &ElementNode, base_url: Option<&Url>) -> Option<String> {
    element
        .ancestors()
        .take(LINK_SEARCH_DEPTH)
        .filter(|node| node.is_tag("a"))
        .find_map(|node| resolve_href(node.href.as_deref()?, base_url))
}

/// Resolves `href` to an absolute URL, relative to `base_url` when needed.
pub fn resolve_href(href: &str, base_url: Option<&Url>) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    match Url::parse(href) {
        Ok(url) => Some(url.into()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            base_url?.join(href).ok().map(Into::into)
        }
        Err(_) => None,
    }
}

/// Media and plugin embeds, editable fields and anything inside a draggable
/// ancestor keep their native pointer behaviour.
pub fn should_ignore_element(element: &ElementNode) -> bool {
    if IGNORED_TAGS.iter().any(|tag| element.is_tag(tag)) {
        return true;
    }
    if element.is_editable() {
        return true;
    }
    element
        .ancestors()
        .any(|node| node.attribute("draggable") == Some("true"))
}

/// Whether the browser default should be cancelled for the current move.
///
/// `focused_editable` is the editability of the focused element; editable
/// fields keep native behaviour for link and selection strokes.
pub fn should_suppress_default(
    context: GestureContext,
    distance_moved: f64,
    threshold_px: f64,
    focused_editable: bool,
) -> bool {
    if distance_moved < threshold_px {
        return false;
    }
    match context {
        GestureContext::Page => true,
        GestureContext::Link | GestureContext::Selection => !focused_editable,
    }
}

pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
