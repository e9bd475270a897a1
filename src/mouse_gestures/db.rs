use crate::actions::Action;
use crate::mouse_gestures::code::GestureCode;
use crate::mouse_gestures::context::GestureContext;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GestureMapping {
    pub gesture: GestureCode,
    pub action: Action,
}

impl GestureMapping {
    fn new(gesture: &str, action: Action) -> Option<Self> {
        GestureCode::parse(gesture)
            .ok()
            .map(|gesture| Self { gesture, action })
    }
}

/// Per-context mapping tables. Codes are unique within a context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContextMappings {
    pub page: Vec<GestureMapping>,
    pub link: Vec<GestureMapping>,
    pub selection: Vec<GestureMapping>,
}

impl Default for ContextMappings {
    fn default() -> Self {
        fn table(entries: &[(&str, Action)]) -> Vec<GestureMapping> {
            entries
                .iter()
                .filter_map(|&(gesture, action)| GestureMapping::new(gesture, action))
                .collect()
        }

        Self {
            page: table(&[
                ("L", Action::GoBack),
                ("R", Action::GoForward),
                ("U", Action::ScrollTop),
                ("D", Action::ScrollBottom),
                ("LR", Action::NewTab),
                ("RL", Action::CloseTabsRight),
                ("DU", Action::ReopenTab),
                ("UL", Action::SwitchTabLeft),
                ("UR", Action::SwitchTabRight),
            ]),
            link: table(&[
                ("R", Action::OpenLinkBackground),
                ("L", Action::OpenLinkForeground),
                ("U", Action::OpenLinkWindow),
            ]),
            selection: table(&[
                ("R", Action::SearchTextNew),
                ("L", Action::SearchTextCurrent),
            ]),
        }
    }
}

impl ContextMappings {
    pub fn empty() -> Self {
        Self {
            page: Vec::new(),
            link: Vec::new(),
            selection: Vec::new(),
        }
    }

    pub fn for_context(&self, context: GestureContext) -> &[GestureMapping] {
        match context {
            GestureContext::Page => &self.page,
            GestureContext::Link => &self.link,
            GestureContext::Selection => &self.selection,
        }
    }

    fn for_context_mut(&mut self, context: GestureContext) -> &mut Vec<GestureMapping> {
        match context {
            GestureContext::Page => &mut self.page,
            GestureContext::Link => &mut self.link,
            GestureContext::Selection => &mut self.selection,
        }
    }

    /// Binds `code` to `action`, replacing an existing binding for the same
    /// code in place so each code appears once per context. Returns the
    /// action that was replaced.
    pub fn set_mapping(
        &mut self,
        context: GestureContext,
        code: GestureCode,
        action: Action,
    ) -> Option<Action> {
        let table = self.for_context_mut(context);
        if let Some(existing) = table.iter_mut().find(|m| m.gesture == code) {
            return Some(std::mem::replace(&mut existing.action, action));
        }
        table.push(GestureMapping {
            gesture: code,
            action,
        });
        None
    }

    pub fn remove_mapping(&mut self, context: GestureContext, code: &GestureCode) -> Option<Action> {
        let table = self.for_context_mut(context);
        let idx = table.iter().position(|m| &m.gesture == code)?;
        Some(table.remove(idx).action)
    }
}

/// Exact-match lookup of `code` in the table for `context`.
pub fn resolve(
    context: GestureContext,
    code: &GestureCode,
    mappings: &ContextMappings,
) -> Option<Action> {
    if code.is_empty() {
        return None;
    }
    mappings
        .for_context(context)
        .iter()
        .find(|mapping| &mapping.gesture == code)
        .map(|mapping| mapping.action)
}
