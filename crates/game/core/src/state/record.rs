//! Persistent character records and the read-only templates that seed them.

use super::ids::{ArchetypeId, CardId, CharacterId, EnemyId, PassiveId};

/// Persistent character data owned by the persistence gateway.
///
/// The progression engine mutates a record during an XP grant; the combat
/// engine only reads it to seed a combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CharacterRecord {
    #[cfg_attr(feature = "serde", serde(rename = "characterId"))]
    pub id: CharacterId,
    pub name: String,
    pub level: u32,
    pub xp: u32,
    pub max_hp: u32,
    pub max_energy: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub passives: Vec<PassiveId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub deck: Vec<CardId>,
}

impl CharacterRecord {
    pub const STARTING_LEVEL: u32 = 1;

    /// Creates a level 1 record with no XP.
    pub fn new(id: CharacterId, name: impl Into<String>, max_hp: u32, max_energy: u32) -> Self {
        Self {
            id,
            name: name.into(),
            level: Self::STARTING_LEVEL,
            xp: 0,
            max_hp,
            max_energy,
            passives: Vec::new(),
            deck: Vec::new(),
        }
    }

    /// Creates a fresh character from an archetype's base stats.
    pub fn from_archetype(
        id: CharacterId,
        name: impl Into<String>,
        archetype: &CharacterArchetype,
    ) -> Self {
        let mut record = Self::new(id, name, archetype.base_max_hp, archetype.base_max_energy);
        record.deck = archetype.starting_deck.clone();
        record
    }

    pub fn with_level(mut self, level: u32, xp: u32) -> Self {
        self.level = level.max(Self::STARTING_LEVEL);
        self.xp = xp;
        self
    }

    pub fn with_deck(mut self, deck: Vec<CardId>) -> Self {
        self.deck = deck;
        self
    }

    pub fn with_passives(mut self, passives: Vec<PassiveId>) -> Self {
        self.passives = passives;
        self
    }
}

/// Base stats for a playable class, used when creating new characters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterArchetype {
    pub id: ArchetypeId,
    pub base_max_hp: u32,
    pub base_max_energy: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub starting_deck: Vec<CardId>,
}

/// How an enemy picks its cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiBehavior {
    #[default]
    SimpleAttack,
    Defensive,
}

/// Read-only enemy definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub id: EnemyId,
    pub name: String,
    pub base_max_hp: u32,
    pub base_max_energy: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub deck: Vec<CardId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub behavior: AiBehavior,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archetype_seeds_a_level_one_record() {
        let archetype = CharacterArchetype {
            id: ArchetypeId::from("warrior"),
            base_max_hp: 120,
            base_max_energy: 40,
            starting_deck: vec![CardId::from("strike")],
        };

        let record = CharacterRecord::from_archetype(CharacterId::from("c1"), "Ada", &archetype);

        assert_eq!(record.level, 1);
        assert_eq!(record.xp, 0);
        assert_eq!(record.max_hp, 120);
        assert_eq!(record.max_energy, 40);
        assert_eq!(record.deck, vec![CardId::from("strike")]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_uses_camel_case_wire_names() {
        let record = CharacterRecord::new(CharacterId::from("c1"), "Ada", 50, 10);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["characterId"], "c1");
        assert_eq!(json["maxHp"], 50);
        assert_eq!(json["maxEnergy"], 10);
    }
}
