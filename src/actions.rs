use serde::{Deserialize, Serialize};
use std::fmt;

/// Every action a gesture can be bound to. Executing them is left to the
/// host; this crate only resolves which one a stroke selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    GoBack,
    GoForward,
    Reload,
    ScrollTop,
    ScrollBottom,
    NewTab,
    CloseTab,
    ReopenTab,
    DuplicateTab,
    CloseTabsRight,
    SwitchTabLeft,
    SwitchTabRight,
    NewWindow,
    CloseWindow,
    MinimizeWindow,
    OpenLinkBackground,
    OpenLinkForeground,
    OpenLinkWindow,
    CopyLink,
    SearchTextNew,
    SearchTextCurrent,
    CopyText,
    NoAction,
}

/// Stroke data an action cannot run without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionRequirement {
    None,
    LinkTarget,
    SelectedText,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::GoBack => "Go Back",
            Action::GoForward => "Go Forward",
            Action::Reload => "Reload Page",
            Action::ScrollTop => "Scroll to Top",
            Action::ScrollBottom => "Scroll to Bottom",
            Action::NewTab => "New Tab",
            Action::CloseTab => "Close Tab",
            Action::ReopenTab => "Reopen Tab",
            Action::DuplicateTab => "Duplicate Tab",
            Action::CloseTabsRight => "Close Tabs to Right",
            Action::SwitchTabLeft => "Switch Tab Left",
            Action::SwitchTabRight => "Switch Tab Right",
            Action::NewWindow => "New Window",
            Action::CloseWindow => "Close Window",
            Action::MinimizeWindow => "Minimize Window",
            Action::OpenLinkBackground => "Open Link in Background Tab",
            Action::OpenLinkForeground => "Open Link in Foreground Tab",
            Action::OpenLinkWindow => "Open Link in New Window",
            Action::CopyLink => "Copy Link URL",
            Action::SearchTextNew => "Search Text in New Tab",
            Action::SearchTextCurrent => "Search Text in Current Tab",
            Action::CopyText => "Copy Selected Text",
            Action::NoAction => "No Action",
        }
    }

    pub fn requirement(self) -> ActionRequirement {
        match self {
            Action::OpenLinkBackground
            | Action::OpenLinkForeground
            | Action::OpenLinkWindow
            | Action::CopyLink => ActionRequirement::LinkTarget,
            Action::SearchTextNew | Action::SearchTextCurrent | Action::CopyText => {
                ActionRequirement::SelectedText
            }
            _ => ActionRequirement::None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
