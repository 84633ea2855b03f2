//! Per-slot click policy.
//!
//! A [`ClickOptions`] answers one question: may this `(action, click type)`
//! combination happen at this slot? A combination is permitted when both
//! halves are in the allowed sets, or when the exact pair was allowed on its
//! own.

use bitflags::bitflags;
use trove_core::{ClickType, InventoryAction};

bitflags! {
    /// A set of [`InventoryAction`]s.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ActionSet: u32 {
        const NOTHING                = 1 << 0;
        const PICKUP_ALL             = 1 << 1;
        const PICKUP_SOME            = 1 << 2;
        const PICKUP_HALF            = 1 << 3;
        const PICKUP_ONE             = 1 << 4;
        const PLACE_ALL              = 1 << 5;
        const PLACE_SOME             = 1 << 6;
        const PLACE_ONE              = 1 << 7;
        const SWAP_WITH_CURSOR       = 1 << 8;
        const DROP_ALL_CURSOR        = 1 << 9;
        const DROP_ONE_CURSOR        = 1 << 10;
        const DROP_ALL_SLOT          = 1 << 11;
        const DROP_ONE_SLOT          = 1 << 12;
        const MOVE_TO_OTHER_INVENTORY = 1 << 13;
        const HOTBAR_MOVE_AND_READD  = 1 << 14;
        const HOTBAR_SWAP            = 1 << 15;
        const CLONE_STACK            = 1 << 16;
        const COLLECT_TO_CURSOR      = 1 << 17;
        const UNKNOWN                = 1 << 18;

        const PICKUP = Self::PICKUP_ALL.bits()
            | Self::PICKUP_SOME.bits()
            | Self::PICKUP_HALF.bits()
            | Self::PICKUP_ONE.bits();
        const PLACE = Self::PLACE_ALL.bits() | Self::PLACE_SOME.bits() | Self::PLACE_ONE.bits();
    }
}

impl ActionSet {
    /// The single-member set for `action`.
    #[inline]
    pub const fn of(action: InventoryAction) -> Self {
        Self::from_bits_retain(1 << action.ordinal())
    }
}

impl From<InventoryAction> for ActionSet {
    fn from(action: InventoryAction) -> Self {
        Self::of(action)
    }
}

bitflags! {
    /// A set of [`ClickType`]s.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ClickSet: u16 {
        const LEFT                = 1 << 0;
        const SHIFT_LEFT          = 1 << 1;
        const RIGHT               = 1 << 2;
        const SHIFT_RIGHT         = 1 << 3;
        const WINDOW_BORDER_LEFT  = 1 << 4;
        const WINDOW_BORDER_RIGHT = 1 << 5;
        const MIDDLE              = 1 << 6;
        const NUMBER_KEY          = 1 << 7;
        const DOUBLE_CLICK        = 1 << 8;
        const DROP                = 1 << 9;
        const CONTROL_DROP        = 1 << 10;
        const CREATIVE            = 1 << 11;
        const SWAP_OFFHAND        = 1 << 12;
        const UNKNOWN             = 1 << 13;
    }
}

impl ClickSet {
    /// The single-member set for `click`.
    #[inline]
    pub const fn of(click: ClickType) -> Self {
        Self::from_bits_retain(1 << click.ordinal())
    }
}

impl From<ClickType> for ClickSet {
    fn from(click: ClickType) -> Self {
        Self::of(click)
    }
}

// ---------------------------------------------------------------------------
// ClickOptions
// ---------------------------------------------------------------------------

/// Immutable allow-list over `(InventoryAction, ClickType)` pairs.
///
/// The default is [`ClickOptions::DENY_ALL`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClickOptions {
    actions: ActionSet,
    clicks: ClickSet,
    pairs: Vec<(InventoryAction, ClickType)>,
}

impl ClickOptions {
    /// Every action with every click type.
    pub const ALLOW_ALL: ClickOptions = ClickOptions {
        actions: ActionSet::all(),
        clicks: ClickSet::all(),
        pairs: Vec::new(),
    };

    /// Nothing at all.
    pub const DENY_ALL: ClickOptions = ClickOptions {
        actions: ActionSet::empty(),
        clicks: ClickSet::empty(),
        pairs: Vec::new(),
    };

    pub fn builder() -> ClickOptionsBuilder {
        ClickOptionsBuilder::default()
    }

    /// Whether `action` performed with `click` is permitted.
    pub fn permits(&self, action: InventoryAction, click: ClickType) -> bool {
        (self.actions.contains(ActionSet::of(action)) && self.clicks.contains(ClickSet::of(click)))
            || self.pairs.contains(&(action, click))
    }

    #[inline]
    pub fn allowed_actions(&self) -> ActionSet {
        self.actions
    }

    #[inline]
    pub fn allowed_clicks(&self) -> ClickSet {
        self.clicks
    }

    pub fn allowed_pairs(&self) -> &[(InventoryAction, ClickType)] {
        &self.pairs
    }
}

/// Builder for [`ClickOptions`]. Starts empty (deny-all).
#[derive(Clone, Debug, Default)]
pub struct ClickOptionsBuilder {
    inner: ClickOptions,
}

impl ClickOptionsBuilder {
    /// Allow every action (still gated by the click-type set).
    pub fn all_actions(mut self) -> Self {
        self.inner.actions = ActionSet::all();
        self
    }

    /// Allow every click type (still gated by the action set).
    pub fn all_click_types(mut self) -> Self {
        self.inner.clicks = ClickSet::all();
        self
    }

    pub fn allow_action(mut self, action: InventoryAction) -> Self {
        self.inner.actions |= ActionSet::of(action);
        self
    }

    pub fn allow_actions(mut self, actions: impl Into<ActionSet>) -> Self {
        self.inner.actions |= actions.into();
        self
    }

    pub fn allow_click(mut self, click: ClickType) -> Self {
        self.inner.clicks |= ClickSet::of(click);
        self
    }

    pub fn allow_clicks(mut self, clicks: impl Into<ClickSet>) -> Self {
        self.inner.clicks |= clicks.into();
        self
    }

    /// Allow exactly this combination, independently of the sets.
    pub fn allow_pair(mut self, action: InventoryAction, click: ClickType) -> Self {
        if !self.inner.pairs.contains(&(action, click)) {
            self.inner.pairs.push((action, click));
        }
        self
    }

    pub fn build(self) -> ClickOptions {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_instances() {
        for action in InventoryAction::ALL {
            for click in ClickType::ALL {
                assert!(ClickOptions::ALLOW_ALL.permits(action, click));
                assert!(!ClickOptions::DENY_ALL.permits(action, click));
            }
        }
        assert_eq!(ClickOptions::default(), ClickOptions::DENY_ALL);
    }

    #[test]
    fn both_halves_must_match() {
        let opts = ClickOptions::builder()
            .allow_actions(ActionSet::PICKUP)
            .allow_click(ClickType::Left)
            .build();
        assert!(opts.permits(InventoryAction::PickupHalf, ClickType::Left));
        assert!(!opts.permits(InventoryAction::PickupHalf, ClickType::Right));
        assert!(!opts.permits(InventoryAction::PlaceAll, ClickType::Left));
    }

    #[test]
    fn single_pairs_stand_alone() {
        let opts = ClickOptions::builder()
            .allow_pair(InventoryAction::MoveToOtherInventory, ClickType::ShiftLeft)
            .allow_pair(InventoryAction::MoveToOtherInventory, ClickType::ShiftLeft)
            .build();
        assert_eq!(opts.allowed_pairs().len(), 1);
        assert!(opts.permits(InventoryAction::MoveToOtherInventory, ClickType::ShiftLeft));
        assert!(!opts.permits(InventoryAction::MoveToOtherInventory, ClickType::ShiftRight));
    }

    #[test]
    fn set_bits_follow_ordinals() {
        assert_eq!(
            ActionSet::of(InventoryAction::MoveToOtherInventory),
            ActionSet::MOVE_TO_OTHER_INVENTORY
        );
        assert_eq!(ActionSet::of(InventoryAction::Unknown), ActionSet::UNKNOWN);
        assert_eq!(ClickSet::of(ClickType::SwapOffhand), ClickSet::SWAP_OFFHAND);
        assert_eq!(ClickSet::of(ClickType::Unknown), ClickSet::UNKNOWN);
    }
}
