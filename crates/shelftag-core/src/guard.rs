//! The write guard: decides whether a computed label is worth writing.
//!
//! This is the sole defense against redundant API traffic and against
//! feedback loops where a write's own echo notification would re-trigger an
//! identical write.

use crate::label::Label;

/// The guard's verdict for one variant, with the reason kept for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteDecision {
    /// The stored label differs from the target; issue the mutation.
    Write,
    /// The stored label already equals the target under normalization.
    SkipUnchanged,
    /// The target is the empty sentinel and the stored label is already
    /// empty; writing would be a no-op empty value.
    SkipAlreadyEmpty,
}

impl WriteDecision {
    /// Whether this decision results in a mutation.
    #[must_use]
    pub fn is_write(self) -> bool {
        matches!(self, WriteDecision::Write)
    }
}

/// Compares the stored label against the target label.
///
/// The stored value is normalized (trim + ASCII lowercase) before
/// comparison, so `"Hot"`, `" hot "`, and `"HOT"` all match a target of
/// [`Label::Hot`]. An empty stored value matches a target of
/// [`Label::None`]; clearing an already-clear label is never written.
#[must_use]
pub fn decide_write(current_raw: &str, target: Label) -> WriteDecision {
    let current = Label::normalize(current_raw);

    if current == target.normalized() {
        return WriteDecision::SkipUnchanged;
    }

    if target == Label::None && current.is_empty() {
        return WriteDecision::SkipAlreadyEmpty;
    }

    WriteDecision::Write
}
