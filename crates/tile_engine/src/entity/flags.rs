//! Per-entity collision side flags

use bitflags::bitflags;

bitflags! {
    /// Sides of an entity that touched solid tiles during the last resolver pass
    ///
    /// The Y pass owns `TOP`/`BOTTOM` and the X pass owns `LEFT`/`RIGHT`; each
    /// pass clears its own bits before probing, so flags never carry over
    /// from an earlier tick.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CollisionFlags: u8 {
        /// Head hit a tile
        const TOP = 1 << 0;
        /// Standing on a tile
        const BOTTOM = 1 << 1;
        /// Left side hit a tile
        const LEFT = 1 << 2;
        /// Right side hit a tile
        const RIGHT = 1 << 3;

        /// Bits owned by the vertical pass
        const VERTICAL = Self::TOP.bits() | Self::BOTTOM.bits();
        /// Bits owned by the horizontal pass
        const HORIZONTAL = Self::LEFT.bits() | Self::RIGHT.bits();
    }
}
