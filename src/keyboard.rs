use crate::deck::DismissAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Dismiss(DismissAction),
    Reset,
}

impl KeyCommand {
    /// Maps `KeyboardEvent.key`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Self::Dismiss(DismissAction::Nope)),
            "ArrowRight" => Some(Self::Dismiss(DismissAction::Like)),
            "ArrowUp" => Some(Self::Dismiss(DismissAction::SuperLike)),
            "r" | "R" => Some(Self::Reset),
            _ => None,
        }
    }
}

/// Shortcuts are suppressed while the user is typing.
pub fn is_text_entry(tag_name: &str, content_editable: bool) -> bool {
    content_editable
        || tag_name.eq_ignore_ascii_case("input")
        || tag_name.eq_ignore_ascii_case("textarea")
}
