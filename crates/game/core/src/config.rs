/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Flat XP granted to every player-side participant of a won combat.
    pub combat_reward_xp: i32,

    /// Stat growth applied per level gained.
    pub growth: StatGrowth,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// One slot per [`StatusEffectKind`](crate::StatusEffectKind) variant.
    pub const MAX_STATUS_EFFECTS: usize = 4;
    /// Max HP substituted when a combatant has no backing data.
    pub const DEFAULT_MAX_HP: u32 = 100;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_COMBAT_REWARD_XP: i32 = 10;

    pub fn new() -> Self {
        Self {
            combat_reward_xp: Self::DEFAULT_COMBAT_REWARD_XP,
            growth: StatGrowth::default(),
        }
    }

    pub fn with_combat_reward_xp(mut self, combat_reward_xp: i32) -> Self {
        self.combat_reward_xp = combat_reward_xp;
        self
    }

    pub fn with_growth(mut self, growth: StatGrowth) -> Self {
        self.growth = growth;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed stat increase applied for every level gained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatGrowth {
    pub max_hp_per_level: u32,
    pub max_energy_per_level: u32,
}

impl StatGrowth {
    pub const DEFAULT_MAX_HP_PER_LEVEL: u32 = 10;
    pub const DEFAULT_MAX_ENERGY_PER_LEVEL: u32 = 5;
}

impl Default for StatGrowth {
    fn default() -> Self {
        Self {
            max_hp_per_level: Self::DEFAULT_MAX_HP_PER_LEVEL,
            max_energy_per_level: Self::DEFAULT_MAX_ENERGY_PER_LEVEL,
        }
    }
}
