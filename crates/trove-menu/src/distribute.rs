//! Splitting a stack that enters a menu over the menu's slots.
//!
//! Similar stacks with room are topped up left to right; whatever is left
//! goes into the lowest empty slot, capped by the stack limit. At most one
//! empty slot is used per call.

use trove_core::{ItemStack, Transfer};

/// Plan how `moving` spreads over `contents`.
///
/// An empty plan means the stack does not fit anywhere.
pub fn plan(contents: &[Option<ItemStack>], moving: &ItemStack) -> Vec<Transfer> {
    let mut remaining = moving.amount;
    let mut shares = Vec::new();
    if remaining == 0 {
        return shares;
    }

    for (slot, item) in contents.iter().enumerate() {
        let Some(item) = item else { continue };
        if !item.is_similar(moving) || item.is_full() {
            continue;
        }
        let amount = remaining.min(item.room());
        shares.push(Transfer::new(slot, amount));
        remaining -= amount;
        if remaining == 0 {
            return shares;
        }
    }

    if let Some(slot) = contents.iter().position(Option::is_none) {
        let amount = remaining.min(moving.max_stack_size);
        if amount > 0 {
            shares.push(Transfer::new(slot, amount));
        }
    }
    shares
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stone(n: u32) -> Option<ItemStack> {
        Some(ItemStack::new("stone", n))
    }

    #[test]
    fn tops_up_then_uses_first_empty() {
        let contents = vec![stone(40), None, None];
        let shares = plan(&contents, &ItemStack::new("stone", 50));
        assert_eq!(shares, vec![Transfer::new(0, 24), Transfer::new(1, 26)]);
    }

    #[test]
    fn small_stack_fits_in_first_partial() {
        let mut contents = vec![None; 27];
        contents[4] = stone(10);
        contents[5] = stone(10);
        let shares = plan(&contents, &ItemStack::new("stone", 20));
        assert_eq!(shares, vec![Transfer::new(4, 20)]);
    }

    #[test]
    fn skips_full_and_dissimilar_stacks() {
        let contents = vec![stone(64), Some(ItemStack::new("dirt", 1)), stone(60), stone(62)];
        let shares = plan(&contents, &ItemStack::new("stone", 5));
        assert_eq!(shares, vec![Transfer::new(2, 4), Transfer::new(3, 1)]);
    }

    #[test]
    fn no_room_anywhere_is_empty() {
        let contents = vec![stone(64), Some(ItemStack::new("dirt", 3))];
        assert!(plan(&contents, &ItemStack::new("stone", 5)).is_empty());
    }

    #[test]
    fn only_one_empty_slot_is_claimed() {
        let contents = vec![None, None, None];
        let moving = ItemStack::new("pearl", 40).with_max_stack_size(16);
        assert_eq!(plan(&contents, &moving), vec![Transfer::new(0, 16)]);
    }
}
