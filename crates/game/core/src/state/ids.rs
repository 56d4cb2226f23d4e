use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true for the empty id, which never names a real record.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Opaque, immutable identifier of a persistent character record.
    CharacterId
);
string_id!(
    /// Identifier of the account that owns a set of characters.
    UserId
);
string_id!(
    /// Identifier of an enemy template.
    EnemyId
);
string_id!(
    /// Identifier of a card definition.
    CardId
);
string_id!(
    /// Identifier of a passive skill definition.
    PassiveId
);
string_id!(
    /// Identifier of a character archetype used at character creation.
    ArchetypeId
);

/// Handle of one combatant inside a single combat.
///
/// Handles are assigned sequentially when combat starts and are only
/// meaningful for that combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u16);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_ids_display_their_value() {
        let id = CharacterId::from("hero-1");
        assert_eq!(id.to_string(), "hero-1");
        assert!(!id.is_empty());
        assert!(CharacterId::default().is_empty());
        assert_eq!(CombatantId(3).to_string(), "#3");
    }
}
