//! Navigation guard: dirty-state interception for unsaved edits.
//!
//! A page with unsaved edits arms the guard; while armed, any attempt
//! to leave the page must be confirmed by the operator. Two independent
//! channels, structurally parallel:
//!
//! 1. **In-app transitions** - [`NavigationGuard::evaluate`] compares
//!    the current and requested locations (by normalized path, never by
//!    object identity) and holds a differing destination in a blocked
//!    state until [`NavigationGuard::resolve`] runs the confirmation.
//! 2. **Process exit** - [`NavigationGuard::exit_prompt`] hands the
//!    warning message to the host (shell `quit`, terminal close) while
//!    armed; the host shows whatever native confirmation it has.
//!
//! The guard itself holds no dirty flag - the owning page supplies
//! `armed` per call, so flipping it mid-block does not cancel an
//! in-flight block.

use crate::confirm::Confirm;

/// Warning shown when leaving a page with unsaved edits.
pub const UNSAVED_CHANGES_WARNING: &str = "您有未儲存的變更，確定要離開嗎？";

/// Guard state between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    /// No transition pending.
    Idle,
    /// A transition to `destination` is held awaiting confirmation.
    Blocked { destination: String },
}

/// Outcome of evaluating a proposed transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// Transition may proceed immediately.
    Allowed,
    /// Transition is held; call [`NavigationGuard::resolve`].
    Blocked,
}

/// Per-page navigation guard.
#[derive(Debug)]
pub struct NavigationGuard {
    message: String,
    state: GuardState,
}

impl NavigationGuard {
    /// Guard with a custom warning message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            state: GuardState::Idle,
        }
    }

    pub fn state(&self) -> &GuardState {
        &self.state
    }

    /// Channel 1: evaluate a proposed in-app transition.
    ///
    /// Allowed when the guard is unarmed or when `current` and `next`
    /// normalize to the same path; otherwise the destination is held
    /// in [`GuardState::Blocked`] until resolved.
    pub fn evaluate(&mut self, armed: bool, current: &str, next: &str) -> Evaluation {
        if !armed || normalize_path(current) == normalize_path(next) {
            return Evaluation::Allowed;
        }
        self.state = GuardState::Blocked {
            destination: next.to_string(),
        };
        Evaluation::Blocked
    }

    /// Resolve a blocked transition through the confirmation prompt.
    ///
    /// Returns the held destination when the operator confirms (the
    /// caller then applies the transition, exactly once); `None` when
    /// declined or when nothing was blocked. Either way the guard is
    /// idle afterwards.
    pub fn resolve(&mut self, confirm: &dyn Confirm) -> Option<String> {
        let GuardState::Blocked { destination } = std::mem::replace(&mut self.state, GuardState::Idle)
        else {
            return None;
        };
        if confirm.confirm(&self.message) {
            Some(destination)
        } else {
            None
        }
    }

    /// Channel 2: the prompt text for a whole-process exit, or `None`
    /// when leaving needs no confirmation.
    pub fn exit_prompt(&self, armed: bool) -> Option<&str> {
        armed.then_some(self.message.as_str())
    }
}

impl Default for NavigationGuard {
    fn default() -> Self {
        Self::new(UNSAVED_CHANGES_WARNING)
    }
}

/// Compare route values by logical location: trimmed, single trailing
/// slash dropped (except the root path itself).
fn normalize_path(path: &str) -> &str {
    let path = path.trim();
    match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::mocks::ScriptedConfirm;

    #[test]
    fn test_unarmed_navigation_always_proceeds() {
        let mut guard = NavigationGuard::default();
        assert_eq!(
            guard.evaluate(false, "/track/rec1", "/database"),
            Evaluation::Allowed
        );
        assert_eq!(guard.state(), &GuardState::Idle);
    }

    #[test]
    fn test_same_location_never_blocks_even_armed() {
        let mut guard = NavigationGuard::default();
        assert_eq!(
            guard.evaluate(true, "/database", "/database"),
            Evaluation::Allowed
        );
        // Normalized comparison: trailing slash is the same location
        assert_eq!(
            guard.evaluate(true, "/database", "/database/"),
            Evaluation::Allowed
        );
        assert_eq!(guard.evaluate(true, "/", "/"), Evaluation::Allowed);
    }

    #[test]
    fn test_armed_transition_blocks_then_confirm_proceeds_once() {
        let mut guard = NavigationGuard::default();
        assert_eq!(
            guard.evaluate(true, "/track/rec1", "/database"),
            Evaluation::Blocked
        );
        assert_eq!(
            guard.state(),
            &GuardState::Blocked {
                destination: "/database".to_string()
            }
        );

        let confirm = ScriptedConfirm::accepting();
        assert_eq!(guard.resolve(&confirm), Some("/database".to_string()));
        assert_eq!(confirm.times_asked(), 1);
        assert_eq!(guard.state(), &GuardState::Idle);

        // The held destination is consumed; resolving again yields nothing
        assert_eq!(guard.resolve(&confirm), None);
        assert_eq!(confirm.times_asked(), 1);
    }

    #[test]
    fn test_declined_transition_is_discarded() {
        let mut guard = NavigationGuard::default();
        guard.evaluate(true, "/track/rec1", "/database");

        let confirm = ScriptedConfirm::declining();
        assert_eq!(guard.resolve(&confirm), None);
        assert_eq!(confirm.prompts(), vec![UNSAVED_CHANGES_WARNING.to_string()]);
        assert_eq!(guard.state(), &GuardState::Idle);
    }

    #[test]
    fn test_disarming_does_not_cancel_inflight_block() {
        let mut guard = NavigationGuard::default();
        guard.evaluate(true, "/add", "/");
        // Page saves and disarms; the held block still resolves normally
        let confirm = ScriptedConfirm::accepting();
        assert_eq!(guard.resolve(&confirm), Some("/".to_string()));
    }

    #[test]
    fn test_exit_prompt_only_while_armed() {
        let guard = NavigationGuard::default();
        assert_eq!(guard.exit_prompt(false), None);
        assert_eq!(guard.exit_prompt(true), Some(UNSAVED_CHANGES_WARNING));
    }

    #[test]
    fn test_custom_message_reaches_both_channels() {
        let mut guard = NavigationGuard::new("leave?");
        assert_eq!(guard.exit_prompt(true), Some("leave?"));
        guard.evaluate(true, "/a", "/b");
        let confirm = ScriptedConfirm::declining();
        guard.resolve(&confirm);
        assert_eq!(confirm.prompts(), vec!["leave?".to_string()]);
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/database/"), "/database");
        assert_eq!(normalize_path("  /database  "), "/database");
        assert_eq!(normalize_path("/"), "/");
    }
}
