//! Overlap tests and actor-vs-hostile contact resolution
//!
//! Both games share the same priority ladder when a hostile touches the
//! actor: invincibility first, then a consumable ability, then HP.

use super::timer::TickTimer;

/// What a single actor-vs-hostile contact did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Actor was invincible; the hostile is destroyed and scores
    Smashed,
    /// The actor's ability absorbed the hit; the hostile survives
    AbilityLost,
    /// HP went down but the actor is still standing
    Wounded { hp: u32 },
    /// HP reached zero
    Defeated,
}

/// Grace invincibility lengths, in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grace {
    /// After losing HP
    pub hit: u32,
    /// After losing the ability
    pub ability: u32,
}

impl Grace {
    pub const fn uniform(ticks: u32) -> Self {
        Self {
            hit: ticks,
            ability: ticks,
        }
    }
}

/// Apply the contact priority ladder to the actor's defenses
///
/// `ability` is `None` for games without a consumable ability.
pub fn resolve_hostile_contact(
    hp: &mut u32,
    invincible: &mut TickTimer,
    ability: Option<&mut bool>,
    grace: Grace,
) -> Contact {
    if invincible.is_active() {
        return Contact::Smashed;
    }

    if let Some(ability) = ability {
        if *ability {
            *ability = false;
            invincible.set(grace.ability);
            return Contact::AbilityLost;
        }
    }

    *hp = hp.saturating_sub(1);
    if *hp == 0 {
        Contact::Defeated
    } else {
        invincible.set(grace.hit);
        Contact::Wounded { hp: *hp }
    }
}

/// 1-D span overlap, used by the lane game's vertical catch zone
#[inline]
pub fn spans_overlap(a_start: f32, a_len: f32, b_start: f32, b_len: f32) -> bool {
    a_start + a_len > b_start && a_start < b_start + b_len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invincible_smashes() {
        let mut hp = 3;
        let mut inv = TickTimer::idle();
        inv.set(10);
        let mut fire = true;
        let c = resolve_hostile_contact(&mut hp, &mut inv, Some(&mut fire), Grace::uniform(60));
        assert_eq!(c, Contact::Smashed);
        assert_eq!(hp, 3);
        assert!(fire, "invincibility takes priority over the ability");
    }

    #[test]
    fn test_ability_absorbs_hit() {
        let mut hp = 3;
        let mut inv = TickTimer::idle();
        let mut fire = true;
        let c = resolve_hostile_contact(&mut hp, &mut inv, Some(&mut fire), Grace::uniform(60));
        assert_eq!(c, Contact::AbilityLost);
        assert_eq!(hp, 3);
        assert!(!fire);
        assert_eq!(inv.remaining(), 60);
    }

    #[test]
    fn test_damage_then_defeat() {
        let mut hp = 2;
        let mut inv = TickTimer::idle();
        assert_eq!(
            resolve_hostile_contact(&mut hp, &mut inv, None, Grace::uniform(60)),
            Contact::Wounded { hp: 1 }
        );
        assert_eq!(inv.remaining(), 60);

        let mut inv = TickTimer::idle();
        assert_eq!(resolve_hostile_contact(&mut hp, &mut inv, None, Grace::uniform(60)), Contact::Defeated);
        assert_eq!(hp, 0);
        assert!(!inv.is_active(), "no grace is granted on defeat");
    }

    #[test]
    fn test_span_overlap_edges() {
        // obstacle bottom exactly on the zone top does not count
        assert!(!spans_overlap(450.0, 50.0, 500.0, 60.0));
        assert!(spans_overlap(451.0, 50.0, 500.0, 60.0));
        assert!(!spans_overlap(560.0, 50.0, 500.0, 60.0));
    }
}
