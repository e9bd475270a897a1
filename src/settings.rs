use crate::actions::Action;
use crate::mouse_gestures::{
    ContextMappings, ExclusionMatcher, GestureCode, GestureContext, Modifiers,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const SETTINGS_VERSION: u32 = 1;

/// Modifier key a context may require before a primary-button stroke starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKey {
    #[default]
    None,
    Alt,
    Ctrl,
    Shift,
}

impl ModifierKey {
    /// Whether the configured key is physically held. `None` is never held.
    pub fn is_held(self, modifiers: &Modifiers) -> bool {
        match self {
            ModifierKey::None => false,
            ModifierKey::Alt => modifiers.alt,
            ModifierKey::Ctrl => modifiers.ctrl,
            ModifierKey::Shift => modifiers.shift,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleSettings {
    pub line_color: String,
    pub line_width: f32,
    pub high_contrast: bool,
    pub show_context_chip: bool,
    /// Runs throttled recognition while drawing to preview the action name.
    pub show_gesture_name: bool,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            line_color: "#1E90FF".to_string(),
            line_width: 4.0,
            high_contrast: false,
            show_context_chip: true,
            show_gesture_name: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivationSettings {
    pub page_enabled: bool,
    /// Movement below this many pixels keeps the native right click.
    pub page_threshold_px: f64,
    pub link_enabled: bool,
    pub link_modifier: ModifierKey,
    pub selection_enabled: bool,
    pub selection_modifier: ModifierKey,
}

impl Default for ActivationSettings {
    fn default() -> Self {
        Self {
            page_enabled: true,
            page_threshold_px: 16.0,
            link_enabled: true,
            link_modifier: ModifierKey::None,
            selection_enabled: true,
            selection_modifier: ModifierKey::None,
        }
    }
}

impl ActivationSettings {
    pub fn is_enabled(&self, context: GestureContext) -> bool {
        match context {
            GestureContext::Page => self.page_enabled,
            GestureContext::Link => self.link_enabled,
            GestureContext::Selection => self.selection_enabled,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RecognitionSettings {
    pub angle_snap_deg: f64,
    pub min_segment_length_px: f64,
    /// Reserved for idle timeouts; the recognizer does not read it.
    pub max_idle_ms: u64,
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        Self {
            angle_snap_deg: 45.0,
            min_segment_length_px: 20.0,
            max_idle_ms: 150,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchProvider {
    #[default]
    Google,
    Bing,
    Duckduckgo,
    Custom,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchSettings {
    pub provider: SearchProvider,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct GestureSettings {
    pub style: StyleSettings,
    pub activation: ActivationSettings,
    pub recognition: RecognitionSettings,
    pub mappings: ContextMappings,
    pub search: SearchSettings,
    pub exclusions: Vec<String>,
    pub global_enabled: bool,
    /// When enabled the logger is initialised at debug level.
    pub debug_logging: bool,
    pub version: u32,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            style: StyleSettings::default(),
            activation: ActivationSettings::default(),
            recognition: RecognitionSettings::default(),
            mappings: ContextMappings::default(),
            search: SearchSettings::default(),
            exclusions: vec!["*.test.com/*".to_string()],
            global_enabled: true,
            debug_logging: false,
            version: SETTINGS_VERSION,
        }
    }
}

impl GestureSettings {
    /// Loads settings from `path`. A missing or empty file yields the
    /// defaults; problems inside an otherwise readable file are logged.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self = serde_json::from_str(&content)?;
        for issue in settings.validate() {
            tracing::warn!(path, %issue, "gesture settings issue");
        }
        Ok(settings)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Lists soft problems: unparsable mapping codes, codes bound twice in
    /// one context and malformed exclusion patterns.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        for context in GestureContext::ALL {
            let mut seen = HashSet::new();
            for mapping in self.mappings.for_context(context) {
                if let Err(err) = GestureCode::parse(mapping.gesture.as_str()) {
                    issues.push(format!("{context} mapping '{}': {err}", mapping.gesture));
                    continue;
                }
                if !seen.insert(mapping.gesture.as_str()) {
                    issues.push(format!(
                        "{context} mapping '{}' is bound more than once",
                        mapping.gesture
                    ));
                }
            }
        }
        for pattern in self.exclusions.iter().filter(|p| !p.trim().is_empty()) {
            if let Err(err) = ExclusionMatcher::validate_pattern(pattern) {
                issues.push(err.to_string());
            }
        }
        issues
    }

    pub fn mapping(&self, context: GestureContext, code: &GestureCode) -> Option<Action> {
        crate::mouse_gestures::resolve(context, code, &self.mappings)
    }
}
