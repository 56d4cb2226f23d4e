//! Card catalog loader.

use std::path::Path;

use game_core::{CardDefinition, EffectKind};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique, read_file};

/// Card catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardCatalog {
    pub cards: Vec<CardDefinition>,
}

/// Loader for card definitions from RON files.
///
/// Effect kinds this build does not know load as [`EffectKind::Unknown`] and
/// are skipped at resolution time, so newer data files still load.
pub struct CardLoader;

impl CardLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<CardDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<CardDefinition>> {
        let catalog: CardCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse card catalog RON: {}", e))?;

        ensure_unique("card catalog", &catalog.cards, |card| &card.id)?;
        for card in &catalog.cards {
            let missing_status = card
                .effects
                .iter()
                .any(|effect| effect.kind == EffectKind::ApplyStatus && effect.status.is_none());
            if missing_status {
                anyhow::bail!("Card '{}' applies a status without naming it", card.id);
            }
        }

        Ok(catalog.cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{StatusEffectKind, TargetType};

    #[test]
    fn parses_cards_and_tolerates_unknown_effects() {
        let cards = CardLoader::parse(
            r#"(
                cards: [
                    (
                        id: "ignite",
                        name: "Ignite",
                        energy_cost: 2,
                        target: EnemySingle,
                        effects: [
                            (kind: Damage, value: 4),
                            (kind: ApplyStatus, status: Some(Burn), duration: 2, stacks: 3),
                            (kind: Teleport, value: 1),
                        ],
                    ),
                ],
            )"#,
        )
        .unwrap();

        let ignite = &cards[0];
        assert_eq!(ignite.target, TargetType::EnemySingle);
        assert_eq!(ignite.description, "");
        assert_eq!(ignite.effects[1].status, Some(StatusEffectKind::Burn));
        assert_eq!(ignite.effects[2].kind, EffectKind::Unknown);
    }

    #[test]
    fn rejects_status_effect_without_kind() {
        let result = CardLoader::parse(
            r#"(cards: [(
                id: "broken",
                name: "Broken",
                target: SelfTarget,
                effects: [(kind: ApplyStatus, duration: 1, stacks: 1)],
            )])"#,
        );

        assert!(result.is_err());
    }
}
