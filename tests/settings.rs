use quick_gestures::actions::Action;
use quick_gestures::mouse_gestures::{GestureCode, GestureContext};
use quick_gestures::settings::{GestureSettings, ModifierKey, SETTINGS_VERSION};
use tempfile::tempdir;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let settings = GestureSettings::load(path.to_str().unwrap()).unwrap();
    assert_eq!(settings, GestureSettings::default());
    assert!(settings.global_enabled);
    assert_eq!(settings.activation.page_threshold_px, 16.0);
    assert_eq!(settings.recognition.min_segment_length_px, 20.0);
    assert_eq!(settings.version, SETTINGS_VERSION);
}

#[test]
fn save_then_load_preserves_changes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let path = path.to_str().unwrap();

    let mut settings = GestureSettings::default();
    settings.activation.link_modifier = ModifierKey::Ctrl;
    settings.mappings.set_mapping(
        GestureContext::Page,
        GestureCode::parse("DR").unwrap(),
        Action::CloseTab,
    );
    settings.save(path).unwrap();

    let loaded = GestureSettings::load(path).unwrap();
    assert_eq!(loaded, settings);
    assert_eq!(
        loaded.mapping(GestureContext::Page, &GestureCode::parse("DR").unwrap()),
        Some(Action::CloseTab)
    );
}

#[test]
fn partial_json_fills_in_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{ "activation": { "pageThresholdPx": 32, "selectionModifier": "shift" },
             "globalEnabled": false }"#,
    )
    .unwrap();

    let settings = GestureSettings::load(path.to_str().unwrap()).unwrap();
    assert!(!settings.global_enabled);
    assert_eq!(settings.activation.page_threshold_px, 32.0);
    assert_eq!(settings.activation.selection_modifier, ModifierKey::Shift);
    assert!(settings.activation.link_enabled);
    assert_eq!(settings.mappings.page.len(), 9);
    assert_eq!(settings.exclusions, vec!["*.test.com/*".to_string()]);
}

#[test]
fn malformed_json_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(GestureSettings::load(path.to_str().unwrap()).is_err());
}

#[test]
fn validate_reports_bad_mappings() {
    let json = r#"{
        "mappings": {
            "page": [
                { "gesture": "LL", "action": "go_back" },
                { "gesture": "U", "action": "scroll_top" },
                { "gesture": "U", "action": "reload" }
            ]
        }
    }"#;
    let settings: GestureSettings = serde_json::from_str(json).unwrap();
    let issues = settings.validate();
    assert_eq!(issues.len(), 2, "{issues:?}");
    assert!(issues[0].contains("'LL'"));
    assert!(issues[1].contains("bound more than once"));
    assert!(GestureSettings::default().validate().is_empty());
}

#[test]
fn modifier_key_matches_held_keys() {
    use quick_gestures::mouse_gestures::Modifiers;
    let held = Modifiers {
        alt: false,
        ctrl: true,
        shift: false,
    };
    assert!(ModifierKey::Ctrl.is_held(&held));
    assert!(!ModifierKey::Alt.is_held(&held));
    assert!(!ModifierKey::None.is_held(&held));
}
