//! Stateless dispatch from a target handle to its combatant state.
//!
//! The resolver never panics on a bad handle: a missing target yields
//! [`ResolveError::TargetNotFound`] and leaves every combatant untouched.

use crate::state::{CombatantId, StatusEffectKind};

use super::combatant::{CombatantState, Side};
use super::errors::ResolveError;

/// Combatants of one combat, players first, in creation order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    combatants: Vec<CombatantState>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, combatant: CombatantState) {
        self.combatants.push(combatant);
    }

    pub fn get(&self, id: CombatantId) -> Option<&CombatantState> {
        self.combatants.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut CombatantState> {
        self.combatants.iter_mut().find(|c| c.id == id)
    }

    fn require_mut(&mut self, id: CombatantId) -> Result<&mut CombatantState, ResolveError> {
        self.get_mut(id).ok_or(ResolveError::TargetNotFound(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombatantState> {
        self.combatants.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CombatantState> {
        self.combatants.iter_mut()
    }

    /// Combatants fighting for `side`, alive or not.
    pub fn side(&self, side: Side) -> impl Iterator<Item = &CombatantState> {
        self.combatants.iter().filter(move |c| c.side == side)
    }

    /// Returns true if at least one combatant on `side` has health left.
    pub fn has_living(&self, side: Side) -> bool {
        self.side(side).any(CombatantState::is_alive)
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    /// Removes and returns every combatant.
    pub fn drain(&mut self) -> Vec<CombatantState> {
        std::mem::take(&mut self.combatants)
    }
}

/// Deals damage to `target`. Shield absorbs first.
pub fn deal_damage(roster: &mut Roster, target: CombatantId, amount: i32) -> Result<(), ResolveError> {
    roster.require_mut(target)?.take_damage(amount);
    Ok(())
}

/// Adds shield points to `target`.
pub fn apply_shield(roster: &mut Roster, target: CombatantId, amount: i32) -> Result<(), ResolveError> {
    roster.require_mut(target)?.receive_shield(amount);
    Ok(())
}

/// Applies or merges a status effect on `target`.
pub fn apply_status_effect(
    roster: &mut Roster,
    target: CombatantId,
    kind: StatusEffectKind,
    duration: i32,
    stacks: i32,
) -> Result<(), ResolveError> {
    roster
        .require_mut(target)?
        .receive_status_effect(kind, duration, stacks);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::combatant::CombatantSeed;
    use crate::state::{CharacterId, CharacterRecord};

    fn roster_with_one() -> Roster {
        let record = CharacterRecord::new(CharacterId::from("c1"), "Ada", 30, 10);
        let (state, _) = CombatantState::initialize(
            CombatantId(0),
            Side::Player,
            Some(CombatantSeed::Character(&record)),
        );
        let mut roster = Roster::new();
        roster.push(state);
        roster
    }

    #[test]
    fn dispatches_to_the_target() {
        let mut roster = roster_with_one();
        apply_shield(&mut roster, CombatantId(0), 5).unwrap();
        deal_damage(&mut roster, CombatantId(0), 8).unwrap();
        apply_status_effect(&mut roster, CombatantId(0), StatusEffectKind::DefenseDown, 2, 1)
            .unwrap();

        let target = roster.get(CombatantId(0)).unwrap();
        assert_eq!(target.current_shield(), 0);
        assert_eq!(target.current_hp(), 27);
        assert!(target.status().has(StatusEffectKind::DefenseDown));
    }

    #[test]
    fn unknown_target_is_reported_and_changes_nothing() {
        let mut roster = roster_with_one();
        let before = roster.clone();

        let result = deal_damage(&mut roster, CombatantId(9), 10);

        assert_eq!(result, Err(ResolveError::TargetNotFound(CombatantId(9))));
        assert_eq!(roster, before);
    }
}
