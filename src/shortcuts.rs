//! Shortcut controller - key bindings for the marking workflow

use std::collections::HashMap;

/// Logical editor actions reachable from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    MarkStart,
    MarkEnd,
    AddClip,
}

/// Maps key events to editor actions for the lifetime of one editor
/// session.
///
/// The subscription is explicit: keys resolve only between `bind` and
/// `unbind`, and dispatching reads current session state at the call site
/// rather than anything captured at bind time.
pub struct ShortcutController {
    bindings: HashMap<char, EditorAction>,
    auto_add: bool,
    bound: bool,
}

impl Default for ShortcutController {
    fn default() -> Self {
        let mut bindings = HashMap::new();
        bindings.insert('j', EditorAction::MarkStart);
        bindings.insert('k', EditorAction::MarkEnd);
        bindings.insert('a', EditorAction::AddClip);
        Self {
            bindings,
            auto_add: true,
            bound: false,
        }
    }
}

impl ShortcutController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start receiving key events
    pub fn bind(&mut self) {
        self.bound = true;
    }

    /// Stop receiving key events; part of session teardown
    pub fn unbind(&mut self) {
        self.bound = false;
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// When set, marking an end with a valid pending start commits the
    /// clip immediately
    pub fn set_auto_add(&mut self, enabled: bool) {
        self.auto_add = enabled;
    }

    pub fn auto_add(&self) -> bool {
        self.auto_add
    }

    /// Resolve a key press to an action; `None` when unbound or unmapped.
    /// Matching is case-insensitive.
    pub fn resolve(&self, key: char) -> Option<EditorAction> {
        if !self.bound {
            return None;
        }
        self.bindings.get(&key.to_ascii_lowercase()).copied()
    }
}
