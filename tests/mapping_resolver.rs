use quick_gestures::actions::{Action, ActionRequirement};
use quick_gestures::mouse_gestures::{
    resolve, ActionRouter, ContextMappings, GestureCode, GestureContext, GestureEvent,
};
use quick_gestures::settings::GestureSettings;

fn code(s: &str) -> GestureCode {
    GestureCode::parse(s).unwrap()
}

fn event(context: GestureContext, gesture: &str) -> GestureEvent {
    GestureEvent {
        context,
        gesture_code: code(gesture),
        link_target: None,
        selected_text: None,
        timestamp_ms: 0,
    }
}

#[test]
fn lookup_is_exact_and_per_context() {
    let mappings = ContextMappings::default();
    assert_eq!(
        resolve(GestureContext::Page, &code("LR"), &mappings),
        Some(Action::NewTab)
    );
    assert_eq!(
        resolve(GestureContext::Link, &code("R"), &mappings),
        Some(Action::OpenLinkBackground)
    );
    assert_eq!(
        resolve(GestureContext::Selection, &code("R"), &mappings),
        Some(Action::SearchTextNew)
    );
    // No prefix matching.
    assert_eq!(resolve(GestureContext::Page, &code("LRU"), &mappings), None);
    assert_eq!(resolve(GestureContext::Selection, &code("U"), &mappings), None);
    assert_eq!(
        resolve(GestureContext::Page, &GestureCode::empty(), &mappings),
        None
    );
}

#[test]
fn set_mapping_keeps_codes_unique() {
    let mut mappings = ContextMappings::empty();
    assert_eq!(
        mappings.set_mapping(GestureContext::Page, code("UD"), Action::Reload),
        None
    );
    assert_eq!(
        mappings.set_mapping(GestureContext::Page, code("UD"), Action::DuplicateTab),
        Some(Action::Reload)
    );
    assert_eq!(mappings.page.len(), 1);
    assert_eq!(
        resolve(GestureContext::Page, &code("UD"), &mappings),
        Some(Action::DuplicateTab)
    );

    assert_eq!(
        mappings.remove_mapping(GestureContext::Page, &code("UD")),
        Some(Action::DuplicateTab)
    );
    assert!(mappings.page.is_empty());
}

#[test]
fn router_reports_missing_mapping_softly() {
    let outcome = ActionRouter.route(&GestureSettings::default(), &event(GestureContext::Page, "DR"));
    assert!(!outcome.success);
    assert_eq!(outcome.action, None);
    assert_eq!(
        outcome.error.as_deref(),
        Some("No mapping found for gesture \"DR\" in page context")
    );
}

#[test]
fn router_checks_action_requirements() {
    let settings = GestureSettings::default();
    let outcome = ActionRouter.route(&settings, &event(GestureContext::Link, "U"));
    assert!(!outcome.success);
    assert_eq!(outcome.action, Some(Action::OpenLinkWindow));
    assert_eq!(outcome.error.as_deref(), Some("link target required"));

    let mut with_text = event(GestureContext::Selection, "L");
    with_text.selected_text = Some("rust".into());
    let outcome = ActionRouter.route(&settings, &with_text);
    assert!(outcome.success);
    assert_eq!(outcome.action, Some(Action::SearchTextCurrent));
}

#[test]
fn router_refuses_when_disabled() {
    let mut settings = GestureSettings::default();
    settings.global_enabled = false;
    let outcome = ActionRouter.route(&settings, &event(GestureContext::Page, "L"));
    assert_eq!(outcome.error.as_deref(), Some("gestures disabled"));
}

#[test]
fn action_catalog_labels_and_requirements() {
    assert_eq!(Action::CloseTabsRight.label(), "Close Tabs to Right");
    assert_eq!(Action::CopyLink.requirement(), ActionRequirement::LinkTarget);
    assert_eq!(Action::CopyText.requirement(), ActionRequirement::SelectedText);
    assert_eq!(Action::ScrollTop.requirement(), ActionRequirement::None);
    assert_eq!(
        serde_json::to_string(&Action::OpenLinkBackground).unwrap(),
        "\"open_link_background\""
    );
}
