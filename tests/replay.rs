use quick_gestures::actions::Action;
use quick_gestures::mouse_gestures::GestureContext;
use quick_gestures::replay::{load_trace, replay, ReplayTrace};
use quick_gestures::settings::GestureSettings;
use std::sync::Arc;
use tempfile::tempdir;

const TRACE: &str = r#"{
    "pageUrl": "https://news.example.org/today",
    "events": [
        { "type": "down", "at": 0, "x": 10, "y": 10, "button": "secondary" },
        { "type": "move", "at": 10, "x": 10, "y": 60 },
        { "type": "move", "at": 20, "x": 10, "y": 10 },
        { "type": "up", "at": 30, "x": 10, "y": 10 },
        { "type": "context_menu", "at": 35, "x": 10, "y": 10 },
        { "type": "down", "at": 500, "x": 100, "y": 100, "button": "primary",
          "target": { "tag": "a", "href": "/story/42", "textContent": "Story" } },
        { "type": "move", "at": 510, "x": 100, "y": 70 },
        { "type": "move", "at": 520, "x": 100, "y": 40 },
        { "type": "up", "at": 530, "x": 100, "y": 40 },
        { "type": "click", "at": 540 }
    ]
}"#;

#[test]
fn replay_routes_each_gesture() {
    let trace: ReplayTrace = serde_json::from_str(TRACE).unwrap();
    let results = replay(Arc::new(GestureSettings::default()), &trace);
    assert_eq!(results.len(), 2);

    assert_eq!(results[0].event.context, GestureContext::Page);
    assert_eq!(results[0].event.gesture_code, "DU");
    assert_eq!(results[0].outcome.action, Some(Action::ReopenTab));

    assert_eq!(results[1].event.context, GestureContext::Link);
    assert_eq!(results[1].event.gesture_code, "U");
    assert_eq!(
        results[1].event.link_target.as_deref(),
        Some("https://news.example.org/story/42")
    );
    assert_eq!(results[1].outcome.action, Some(Action::OpenLinkWindow));
    assert!(results[1].outcome.success);
}

#[test]
fn trace_loads_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("trace.json");
    std::fs::write(&path, TRACE).unwrap();
    let trace = load_trace(path.to_str().unwrap()).unwrap();
    assert_eq!(trace.events.len(), 10);
    assert!(load_trace(dir.path().join("missing.json").to_str().unwrap()).is_err());
}
