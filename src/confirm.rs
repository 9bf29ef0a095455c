//! Injected blocking yes/no confirmation.
//!
//! Deletion and the navigation guard both need a modal "are you sure"
//! prompt. Putting it behind a trait keeps the store and guard free of
//! terminal I/O and lets tests script the answers deterministically.

use std::io::Write;

/// A blocking yes/no prompt.
pub trait Confirm {
    /// Show `message` and return whether the operator accepted.
    fn confirm(&self, message: &str) -> bool;
}

/// Terminal prompt: prints the message and reads `y`/`yes` from stdin.
///
/// Anything else (including EOF) counts as decline - the safe default
/// for destructive actions.
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, message: &str) -> bool {
        print!("{message} [y/N] ");
        let _ = std::io::stdout().flush();

        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// Accepts everything without prompting (`--yes` flag).
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}
