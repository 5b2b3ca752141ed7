//! Centralized keyboard shortcuts registry.
//!
//! Single source of truth for the shortcuts shown by `HelpDialog` and the
//! status bar hints.

use crossterm::event::KeyCode;

/// A keyboard shortcut definition
#[derive(Debug, Clone)]
pub struct Shortcut {
    /// Primary key for this shortcut
    pub key: KeyCode,
    /// Alternative key (e.g., lowercase variant or arrow key)
    pub alt_key: Option<KeyCode>,
    /// Human-readable description of what this shortcut does
    pub description: &'static str,
    /// Category for grouping in help
    pub category: ShortcutCategory,
    /// Context where this shortcut is active
    pub context: ShortcutContext,
}

/// Categories for organizing shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutCategory {
    General,
    Navigation,
    Actions,
}

/// Contexts where shortcuts are active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutContext {
    /// Everywhere outside text input
    Global,
    /// List screens: assets, nodes, portfolio, orders
    Browse,
    /// Login, checkout and the claim wizard
    Form,
}

impl ShortcutCategory {
    /// Display name for this category
    pub fn display_name(&self) -> &'static str {
        match self {
            ShortcutCategory::General => "General",
            ShortcutCategory::Navigation => "Navigation",
            ShortcutCategory::Actions => "Actions",
        }
    }

    /// All categories in display order
    pub fn all() -> &'static [ShortcutCategory] {
        &[
            ShortcutCategory::General,
            ShortcutCategory::Navigation,
            ShortcutCategory::Actions,
        ]
    }
}

impl ShortcutContext {
    /// Display name for this context
    pub fn display_name(&self) -> &'static str {
        match self {
            ShortcutContext::Global => "Everywhere",
            ShortcutContext::Browse => "Lists",
            ShortcutContext::Form => "Forms",
        }
    }

    /// All contexts in display order
    pub fn all() -> &'static [ShortcutContext] {
        &[
            ShortcutContext::Global,
            ShortcutContext::Browse,
            ShortcutContext::Form,
        ]
    }
}

impl Shortcut {
    /// Format key for display (e.g., "q", "Tab", "j/↓")
    pub fn key_display(&self) -> String {
        let primary = format_keycode(&self.key);
        match &self.alt_key {
            Some(alt) => format!("{}/{}", primary, format_keycode(alt)),
            None => primary,
        }
    }

    /// Format key for help dialog (left-padded to 9 chars)
    pub fn key_display_padded(&self) -> String {
        format!("{:<9}", self.key_display())
    }
}

/// Format a KeyCode for display
fn format_keycode(key: &KeyCode) -> String {
    match key {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => format!("{:?}", key),
    }
}

/// Static registry of all keyboard shortcuts
pub static SHORTCUTS: &[Shortcut] = &[
    // === Global Context ===
    Shortcut {
        key: KeyCode::Char('q'),
        alt_key: None,
        description: "Quit",
        category: ShortcutCategory::General,
        context: ShortcutContext::Global,
    },
    Shortcut {
        key: KeyCode::Char('?'),
        alt_key: None,
        description: "Toggle help",
        category: ShortcutCategory::General,
        context: ShortcutContext::Global,
    },
    Shortcut {
        key: KeyCode::Tab,
        alt_key: None,
        description: "Switch between sidebar and content",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Global,
    },
    Shortcut {
        key: KeyCode::Char('j'),
        alt_key: Some(KeyCode::Down),
        description: "Move down",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Global,
    },
    Shortcut {
        key: KeyCode::Char('k'),
        alt_key: Some(KeyCode::Up),
        description: "Move up",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Global,
    },
    Shortcut {
        key: KeyCode::Esc,
        alt_key: None,
        description: "Back",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Global,
    },
    Shortcut {
        key: KeyCode::Enter,
        alt_key: None,
        description: "Open / Confirm",
        category: ShortcutCategory::Actions,
        context: ShortcutContext::Global,
    },
    Shortcut {
        key: KeyCode::Char('c'),
        alt_key: None,
        description: "Claim a node",
        category: ShortcutCategory::Actions,
        context: ShortcutContext::Global,
    },
    // === Browse Context ===
    Shortcut {
        key: KeyCode::Char('/'),
        alt_key: None,
        description: "Search",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Browse,
    },
    Shortcut {
        key: KeyCode::Char('f'),
        alt_key: None,
        description: "Cycle category / status filter",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Browse,
    },
    Shortcut {
        key: KeyCode::Char('s'),
        alt_key: None,
        description: "Cycle sort order",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Browse,
    },
    Shortcut {
        key: KeyCode::Char('t'),
        alt_key: None,
        description: "Cycle buy / sell tab",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Browse,
    },
    Shortcut {
        key: KeyCode::Char('b'),
        alt_key: None,
        description: "Buy selected asset",
        category: ShortcutCategory::Actions,
        context: ShortcutContext::Browse,
    },
    Shortcut {
        key: KeyCode::Char('x'),
        alt_key: None,
        description: "Sell selected holding",
        category: ShortcutCategory::Actions,
        context: ShortcutContext::Browse,
    },
    // === Form Context ===
    Shortcut {
        key: KeyCode::Tab,
        alt_key: Some(KeyCode::BackTab),
        description: "Next / previous field",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Form,
    },
    Shortcut {
        key: KeyCode::Enter,
        alt_key: None,
        description: "Next step / Submit",
        category: ShortcutCategory::Actions,
        context: ShortcutContext::Form,
    },
    Shortcut {
        key: KeyCode::Esc,
        alt_key: None,
        description: "Previous step / Cancel",
        category: ShortcutCategory::Navigation,
        context: ShortcutContext::Form,
    },
    Shortcut {
        key: KeyCode::Char(' '),
        alt_key: None,
        description: "Toggle checkbox",
        category: ShortcutCategory::Actions,
        context: ShortcutContext::Form,
    },
    Shortcut {
        key: KeyCode::Left,
        alt_key: Some(KeyCode::Right),
        description: "Change selection",
        category: ShortcutCategory::Actions,
        context: ShortcutContext::Form,
    },
];

/// Get all shortcuts for a given context
pub fn shortcuts_for_context(context: ShortcutContext) -> impl Iterator<Item = &'static Shortcut> {
    SHORTCUTS.iter().filter(move |s| s.context == context)
}

/// Get shortcuts grouped by category for a given context
pub fn shortcuts_by_category_for_context(
    context: ShortcutContext,
) -> Vec<(ShortcutCategory, Vec<&'static Shortcut>)> {
    let mut result = Vec::new();
    for category in ShortcutCategory::all() {
        let shortcuts: Vec<&Shortcut> = SHORTCUTS
            .iter()
            .filter(|s| s.context == context && s.category == *category)
            .collect();
        if !shortcuts.is_empty() {
            result.push((*category, shortcuts));
        }
    }
    result
}

/// One-line hint for the status bar: `key desc · key desc`
pub fn status_hint(context: ShortcutContext) -> String {
    shortcuts_for_context(context)
        .map(|s| format!("{} {}", s.key_display(), s.description.to_lowercase()))
        .collect::<Vec<_>>()
        .join(" · ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_shortcuts_have_descriptions() {
        for shortcut in SHORTCUTS {
            assert!(
                !shortcut.description.is_empty(),
                "Shortcut {:?} has empty description",
                shortcut.key
            );
        }
    }

    #[test]
    fn test_no_duplicate_keys_within_context() {
        for context in ShortcutContext::all() {
            let mut seen = HashSet::new();
            for shortcut in shortcuts_for_context(*context) {
                assert!(
                    seen.insert(shortcut.key),
                    "{:?} bound twice in {:?}",
                    shortcut.key,
                    context
                );
            }
        }
    }

    #[test]
    fn test_key_display_with_alt() {
        let shortcut = Shortcut {
            key: KeyCode::Char('j'),
            alt_key: Some(KeyCode::Down),
            description: "Test",
            category: ShortcutCategory::Navigation,
            context: ShortcutContext::Global,
        };
        assert_eq!(shortcut.key_display(), "j/↓");
    }

    #[test]
    fn test_key_display_special_keys() {
        assert_eq!(format_keycode(&KeyCode::Enter), "Enter");
        assert_eq!(format_keycode(&KeyCode::BackTab), "Shift+Tab");
        assert_eq!(format_keycode(&KeyCode::Char(' ')), "Space");
    }

    #[test]
    fn test_every_context_has_shortcuts() {
        for context in ShortcutContext::all() {
            assert!(!shortcuts_by_category_for_context(*context).is_empty());
        }
    }

    #[test]
    fn test_status_hint_lists_context_keys() {
        let hint = status_hint(ShortcutContext::Browse);
        assert!(hint.contains("/ search"));
        assert!(hint.contains("b buy selected asset"));
    }
}
