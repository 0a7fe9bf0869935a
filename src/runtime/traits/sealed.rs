// ABOUTME: Sealed trait pattern for runtime traits.
// ABOUTME: Only engine clients defined in this crate may implement them.

/// Supertrait of every runtime capability trait.
pub trait Sealed {}
