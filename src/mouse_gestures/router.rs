use crate::actions::{Action, ActionRequirement};
use crate::mouse_gestures::service::GestureEvent;
use crate::settings::GestureSettings;
use serde::{Deserialize, Serialize};

/// Result of resolving a finalized gesture. Failures are soft: they carry a
/// message for the caller to log or show, never an error value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RouteOutcome {
    fn matched(action: Action) -> Self {
        Self {
            success: true,
            action: Some(action),
            error: None,
        }
    }

    fn failed(action: Option<Action>, error: String) -> Self {
        Self {
            success: false,
            action,
            error: Some(error),
        }
    }
}

/// Picks the action a gesture event is bound to, checking that the event
/// carries what the action needs. Nothing is executed here.
#[derive(Debug, Default, Clone, Copy)]
pub struct ActionRouter;

impl ActionRouter {
    pub fn route(&self, settings: &GestureSettings, event: &GestureEvent) -> RouteOutcome {
        if !settings.global_enabled {
            return RouteOutcome::failed(None, "gestures disabled".to_string());
        }

        let Some(action) = settings.mapping(event.context, &event.gesture_code) else {
            return RouteOutcome::failed(
                None,
                format!(
                    "No mapping found for gesture \"{}\" in {} context",
                    event.gesture_code, event.context
                ),
            );
        };

        match action.requirement() {
            ActionRequirement::LinkTarget if event.link_target.is_none() => {
                RouteOutcome::failed(Some(action), "link target required".to_string())
            }
            ActionRequirement::SelectedText
                if event
                    .selected_text
                    .as_deref()
                    .map(str::is_empty)
                    .unwrap_or(true) =>
            {
                RouteOutcome::failed(Some(action), "selected text required".to_string())
            }
            _ => {
                tracing::debug!(action = ?action, context = %event.context, "gesture routed");
                RouteOutcome::matched(action)
            }
        }
    }
}
