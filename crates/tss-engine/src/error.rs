//! Error types for rule-effect application.

/// A driver invariant was violated while applying a rule effect.
///
/// Data-quality problems (unknown formatter names, missing declarations,
/// absent pseudo-functions) are *not* errors; they degrade to defined
/// fallback behavior. This type covers structural misuse only.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EffectError {
    /// A replace operation needs the target's parent to insert siblings,
    /// but the target node is detached.
    #[error("replace target has no parent node")]
    DetachedNode,
}
