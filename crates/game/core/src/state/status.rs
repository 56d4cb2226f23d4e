//! Status effect system for combatants.
//!
//! Status effects are turn-counted conditions attached to a combatant. Each
//! kind appears at most once; reapplying a kind merges into the existing
//! entry instead of adding a second one.
//!
//! # Turn-based Duration
//!
//! `duration` counts remaining end-of-turn ticks. An effect is removed in the
//! same tick its duration reaches zero.

use arrayvec::ArrayVec;

use crate::config::GameConfig;

/// Types of status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    /// Deals damage equal to its stacks every tick.
    Burn,

    /// Reserved. Shields use the combatant's numeric shield pool instead.
    Shielded,

    /// Attack bonus.
    AttackUp,

    /// Defense penalty.
    DefenseDown,
}

impl StatusEffectKind {
    /// Damage dealt to the bearer each tick for the given stack count.
    pub const fn periodic_damage(&self, stacks: u32) -> u32 {
        match self {
            Self::Burn => stacks,
            Self::Shielded | Self::AttackUp | Self::DefenseDown => 0,
        }
    }
}

/// A single active effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveStatusEffect {
    pub kind: StatusEffectKind,
    /// Remaining ticks.
    pub duration: u32,
    /// Magnitude multiplier.
    pub stacks: u32,
}

/// Periodic work produced by one status tick, in effect order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusTick {
    /// Damage each periodic effect wants applied to the bearer.
    pub periodic: ArrayVec<(StatusEffectKind, u32), { GameConfig::MAX_STATUS_EFFECTS }>,
    /// Effects removed by this tick.
    pub expired: ArrayVec<StatusEffectKind, { GameConfig::MAX_STATUS_EFFECTS }>,
}

/// Active status effects on a combatant, in application order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<ActiveStatusEffect, { GameConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Applies an effect or merges it into the existing one of the same kind.
    ///
    /// Merging adds `stacks` and resets the duration to `duration`. Returns
    /// false (and changes nothing) when either value is not positive.
    pub fn apply(&mut self, kind: StatusEffectKind, duration: i32, stacks: i32) -> bool {
        if duration <= 0 || stacks <= 0 {
            return false;
        }
        let (duration, stacks) = (duration.unsigned_abs(), stacks.unsigned_abs());

        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            existing.stacks = existing.stacks.saturating_add(stacks);
            existing.duration = duration;
            return true;
        }

        if self.effects.is_full() {
            return false;
        }
        self.effects.push(ActiveStatusEffect {
            kind,
            duration,
            stacks,
        });
        true
    }

    /// Advances every effect by one tick.
    ///
    /// Periodic magnitudes are read before the duration is decremented, then
    /// every effect that reached zero is dropped in a single pass.
    pub fn advance(&mut self) -> StatusTick {
        let mut tick = StatusTick::default();

        for effect in self.effects.iter_mut() {
            let damage = effect.kind.periodic_damage(effect.stacks);
            if damage > 0 {
                tick.periodic.push((effect.kind, damage));
            }
            effect.duration = effect.duration.saturating_sub(1);
            if effect.duration == 0 {
                tick.expired.push(effect.kind);
            }
        }

        self.effects.retain(|e| e.duration > 0);
        tick
    }

    /// Returns the active effect of the given kind, if any.
    pub fn get(&self, kind: StatusEffectKind) -> Option<&ActiveStatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Checks if a specific status effect is active.
    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.get(kind).is_some()
    }

    /// Removes all effects.
    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Returns an iterator over all active effects.
    pub fn iter(&self) -> impl Iterator<Item = &ActiveStatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn reapplication_sums_stacks_and_replaces_duration() {
        let mut status = StatusEffects::empty();
        status.apply(StatusEffectKind::Burn, 1, 2);
        status.apply(StatusEffectKind::Burn, 2, 3);

        let burn = status.get(StatusEffectKind::Burn).unwrap();
        assert_eq!(burn.stacks, 5);
        assert_eq!(burn.duration, 2);
        assert_eq!(status.len(), 1);
    }

    #[test]
    fn shorter_reapplication_still_replaces_duration() {
        let mut status = StatusEffects::empty();
        status.apply(StatusEffectKind::AttackUp, 5, 1);
        status.apply(StatusEffectKind::AttackUp, 1, 1);

        assert_eq!(status.get(StatusEffectKind::AttackUp).unwrap().duration, 1);
    }

    #[test]
    fn non_positive_duration_or_stacks_is_ignored() {
        let mut status = StatusEffects::empty();
        assert!(!status.apply(StatusEffectKind::Burn, 0, 3));
        assert!(!status.apply(StatusEffectKind::Burn, 3, 0));
        assert!(!status.apply(StatusEffectKind::Burn, -1, 3));
        assert!(status.is_empty());
    }

    #[test]
    fn every_kind_fits_at_once() {
        let mut status = StatusEffects::empty();
        for kind in StatusEffectKind::iter() {
            assert!(status.apply(kind, 2, 1));
        }
        assert_eq!(status.len(), GameConfig::MAX_STATUS_EFFECTS);
    }

    #[test]
    fn advance_reports_burn_and_drops_expired_effects_together() {
        let mut status = StatusEffects::empty();
        status.apply(StatusEffectKind::Burn, 1, 4);
        status.apply(StatusEffectKind::AttackUp, 1, 1);
        status.apply(StatusEffectKind::DefenseDown, 3, 1);

        let tick = status.advance();

        assert_eq!(tick.periodic.as_slice(), &[(StatusEffectKind::Burn, 4)]);
        assert_eq!(
            tick.expired.as_slice(),
            &[StatusEffectKind::Burn, StatusEffectKind::AttackUp]
        );
        assert_eq!(status.len(), 1);
        assert_eq!(status.get(StatusEffectKind::DefenseDown).unwrap().duration, 2);
    }
}
