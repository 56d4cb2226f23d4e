//! Effect and card definitions consumed by the resolver.

use crate::state::{CardId, StatusEffectKind};

/// What an effect does to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    Damage,
    Shield,
    ApplyStatus,
    /// Any kind this build does not understand. Resolving it is a no-op.
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

/// One atomic change requested by a card or ability.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatEffect {
    pub kind: EffectKind,
    /// Damage or shield amount.
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: i32,
    /// Status applied by [`EffectKind::ApplyStatus`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: Option<StatusEffectKind>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stacks: i32,
}

impl CombatEffect {
    pub fn damage(value: i32) -> Self {
        Self::of_kind(EffectKind::Damage, value)
    }

    pub fn shield(value: i32) -> Self {
        Self::of_kind(EffectKind::Shield, value)
    }

    pub fn status(kind: StatusEffectKind, duration: i32, stacks: i32) -> Self {
        Self {
            kind: EffectKind::ApplyStatus,
            value: 0,
            status: Some(kind),
            duration,
            stacks,
        }
    }

    pub fn of_kind(kind: EffectKind, value: i32) -> Self {
        Self {
            kind,
            value,
            status: None,
            duration: 0,
            stacks: 0,
        }
    }
}

/// Who a card's effects land on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetType {
    /// The card's user.
    SelfTarget,
    /// The chosen target.
    EnemySingle,
    /// Every living combatant on the other side.
    EnemyAll,
}

/// A playable card.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardDefinition {
    pub id: CardId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub energy_cost: u32,
    pub target: TargetType,
    pub effects: Vec<CombatEffect>,
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn unrecognised_kind_deserializes_as_unknown() {
        let effect: CombatEffect =
            serde_json::from_str(r#"{ "kind": "Teleport", "value": 3 }"#).unwrap();
        assert_eq!(effect.kind, EffectKind::Unknown);
        assert_eq!(effect.value, 3);
        assert_eq!(effect.status, None);
    }
}
