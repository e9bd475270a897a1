use crate::mouse_gestures::{
    ActionRouter, DocumentProbe, ElementNode, GestureCapture, GestureEvent, HeadlessFeedback,
    ManualClock, PointerDown, RouteOutcome, SelectionSnapshot,
};
use crate::settings::GestureSettings;
use serde::{Deserialize, Serialize};
use std::sync::{mpsc, Arc};

/// Recorded pointer session used to drive the controller offline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplayTrace {
    pub page_url: Option<String>,
    pub selection: Option<SelectionSnapshot>,
    pub active_element: Option<ElementNode>,
    pub events: Vec<ReplayEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayEvent {
    Down {
        at: u64,
        #[serde(flatten)]
        event: PointerDown,
    },
    Move {
        at: u64,
        x: f64,
        y: f64,
    },
    Up {
        at: u64,
        x: f64,
        y: f64,
    },
    Click {
        at: u64,
    },
    ContextMenu {
        at: u64,
        x: f64,
        y: f64,
    },
}

impl ReplayEvent {
    fn at(&self) -> u64 {
        match self {
            ReplayEvent::Down { at, .. }
            | ReplayEvent::Move { at, .. }
            | ReplayEvent::Up { at, .. }
            | ReplayEvent::Click { at }
            | ReplayEvent::ContextMenu { at, .. } => *at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayResult {
    pub event: GestureEvent,
    pub outcome: RouteOutcome,
}

pub fn load_trace(path: &str) -> anyhow::Result<ReplayTrace> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

struct TraceProbe<'a> {
    trace: &'a ReplayTrace,
}

impl DocumentProbe for TraceProbe<'_> {
    fn selection(&self) -> anyhow::Result<Option<SelectionSnapshot>> {
        Ok(self.trace.selection.clone())
    }

    fn active_element(&self) -> anyhow::Result<Option<ElementNode>> {
        Ok(self.trace.active_element.clone())
    }

    fn element_at(&self, _x: f64, _y: f64) -> anyhow::Result<Option<ElementNode>> {
        Ok(None)
    }
}

/// Feeds every event of `trace` through a fresh controller and routes each
/// finalized gesture.
pub fn replay(settings: Arc<GestureSettings>, trace: &ReplayTrace) -> Vec<ReplayResult> {
    let (tx, rx) = mpsc::channel::<GestureEvent>();
    let clock = Arc::new(ManualClock::default());
    let mut capture = GestureCapture::new_with_backends(
        Arc::clone(&settings),
        Arc::new(HeadlessFeedback),
        Box::new(tx),
        clock.clone(),
    );
    if let Some(url) = trace.page_url.as_deref() {
        capture.set_page_url(url);
    }

    let probe = TraceProbe { trace };
    for event in &trace.events {
        clock.set(event.at());
        let disposition = match event {
            ReplayEvent::Down { event, .. } => capture.pointer_down(event, &probe),
            ReplayEvent::Move { x, y, .. } => capture.pointer_move(*x, *y, &probe),
            ReplayEvent::Up { x, y, .. } => capture.pointer_up(*x, *y, &probe),
            ReplayEvent::Click { .. } => capture.click(),
            ReplayEvent::ContextMenu { x, y, .. } => capture.context_menu(*x, *y),
        };
        tracing::trace!(at = event.at(), ?disposition, "replayed event");
    }
    drop(capture);

    let router = ActionRouter;
    rx.try_iter()
        .map(|event| {
            let outcome = router.route(&settings, &event);
            ReplayResult { event, outcome }
        })
        .collect()
}
