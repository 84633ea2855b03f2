//! The [`ItemStack`] type — an amount of one kind of item.

use std::fmt;

/// Stack limit used when nothing more specific is known.
pub const DEFAULT_MAX_STACK: u32 = 64;

/// An amount of a single item kind, with optional display metadata.
///
/// Two stacks are *similar* when they would merge into one slot: same
/// material, same stack limit and same display metadata. The amount is not
/// part of similarity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStack {
    pub material: String,
    pub amount: u32,
    pub max_stack_size: u32,
    pub name: Option<String>,
    pub lore: Vec<String>,
}

impl ItemStack {
    /// Create a stack of `amount` with the default stack limit.
    pub fn new(material: impl Into<String>, amount: u32) -> Self {
        Self {
            material: material.into(),
            amount,
            max_stack_size: DEFAULT_MAX_STACK,
            name: None,
            lore: Vec::new(),
        }
    }

    /// A single item of `material`.
    pub fn one(material: impl Into<String>) -> Self {
        Self::new(material, 1)
    }

    /// Set the amount (builder).
    #[inline]
    pub fn with_amount(mut self, amount: u32) -> Self {
        self.amount = amount;
        self
    }

    /// Set the per-slot stack limit (builder).
    #[inline]
    pub fn with_max_stack_size(mut self, max: u32) -> Self {
        self.max_stack_size = max;
        self
    }

    /// Set the display name (builder).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the lore lines (builder).
    pub fn with_lore<I, S>(mut self, lore: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lore = lore.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `other` would stack with this item, ignoring amounts.
    pub fn is_similar(&self, other: &ItemStack) -> bool {
        self.material == other.material
            && self.max_stack_size == other.max_stack_size
            && self.name == other.name
            && self.lore == other.lore
    }

    /// How many more items fit on top of this stack.
    #[inline]
    pub fn room(&self) -> u32 {
        self.max_stack_size.saturating_sub(self.amount)
    }

    /// Whether the stack is at or above its limit.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.amount >= self.max_stack_size
    }
}

impl fmt::Display for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}x {} \"{}\"", self.amount, self.material, name),
            None => write!(f, "{}x {}", self.amount, self.material),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn similarity_ignores_amount() {
        let a = ItemStack::new("stone", 10);
        let b = ItemStack::new("stone", 50);
        assert!(a.is_similar(&b));
        assert!(!a.is_similar(&ItemStack::new("dirt", 10)));
        assert!(!a.is_similar(&b.clone().with_name("Special")));
        assert!(!a.is_similar(&b.with_max_stack_size(16)));
    }

    #[test]
    fn room_saturates() {
        let stack = ItemStack::new("pearl", 20).with_max_stack_size(16);
        assert_eq!(stack.room(), 0);
        assert!(stack.is_full());
        assert_eq!(ItemStack::new("stone", 40).room(), 24);
    }

    #[test]
    fn display_includes_name() {
        let stack = ItemStack::one("arrow").with_name("Next Menu");
        assert_eq!(stack.to_string(), "1x arrow \"Next Menu\"");
    }
}
