//! Aircraft damage rule, shared by the hero and enemy entities.

use skyraid_core::components::{Hitpoints, Validity};

/// Apply `amount` damage. HP floors at zero and the aircraft expires the
/// first time it gets there. Returns true only on that transition.
///
/// Non-positive damage and damage to an expired aircraft are no-ops.
pub fn take_damage(hp: &mut Hitpoints, validity: &mut Validity, amount: i32) -> bool {
    if !validity.alive || amount <= 0 {
        return false;
    }
    hp.current = hp.current.saturating_sub(amount).max(0);
    if hp.current == 0 {
        validity.alive = false;
        return true;
    }
    false
}
