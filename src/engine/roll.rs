//! Roll engine - turns random draws into a tier plus stacked modifiers

use serde::Serialize;

use super::random::RandomSource;
use super::tables::{ModifierTable, RarityTable};
use crate::types::ModifierTier;

/// Result of a single roll
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollOutcome {
    /// Glyph string followed by the text form, e.g. `"✨ 🔵 Shiny Rare"`
    pub label: String,
    pub rarity_score: f64,
    pub tier: String,
    pub tier_weight: u64,
    /// Triggered modifier names, in trigger order
    pub modifiers: Vec<String>,
    pub multiplier: f64,
}

/// Weighted roll engine over immutable tier tables
#[derive(Debug, Clone)]
pub struct RollEngine {
    rarities: RarityTable,
    modifiers: ModifierTable,
}

impl RollEngine {
    pub fn new(rarities: RarityTable, modifiers: ModifierTable) -> Self {
        Self {
            rarities,
            modifiers,
        }
    }

    pub fn rarities(&self) -> &RarityTable {
        &self.rarities
    }

    pub fn modifiers(&self) -> &ModifierTable {
        &self.modifiers
    }

    /// Roll once.
    ///
    /// Consumes one draw for the tier, then one draw per non-baseline
    /// modifier in table order.
    pub fn roll<S: RandomSource + ?Sized>(&self, source: &mut S) -> RollOutcome {
        let r = source.next_unit();

        // Rarest first, so thresholds ascend: the first hit is the rarest band containing r
        let tier = self
            .rarities
            .tiers()
            .iter()
            .find(|t| t.threshold() > r)
            .unwrap_or_else(|| self.rarities.common());

        let triggered: Vec<&ModifierTier> = self
            .modifiers
            .drawable()
            .filter(|m| source.next_unit() < m.probability())
            .collect();

        let multiplier: f64 = triggered.iter().map(|m| m.weight as f64).product();
        let rarity_score = tier.weight as f64 * multiplier;

        let mut by_weight = triggered.clone();
        by_weight.sort_by_key(|m| m.weight);
        let glyphs: Vec<&str> = by_weight
            .iter()
            .map(|m| m.glyph.as_str())
            .chain(std::iter::once(tier.glyph.as_str()))
            .filter(|g| !g.is_empty())
            .collect();

        let names: Vec<&str> = triggered
            .iter()
            .map(|m| m.name.as_str())
            .chain(std::iter::once(tier.name.as_str()))
            .collect();

        let text = names.join(" ");
        let label = if glyphs.is_empty() {
            text
        } else {
            format!("{} {}", glyphs.join(" "), text)
        };

        RollOutcome {
            label,
            rarity_score,
            tier: tier.name.clone(),
            tier_weight: tier.weight,
            modifiers: triggered.iter().map(|m| m.name.clone()).collect(),
            multiplier,
        }
    }
}

impl Default for RollEngine {
    fn default() -> Self {
        Self::new(RarityTable::standard(), ModifierTable::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::random::{draw_for_weight, SequenceSource};
    use crate::types::{ModifierTier, RarityTier};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const NO_TRIGGER: f64 = 0.999;

    fn no_modifiers(engine: &RollEngine) -> Vec<f64> {
        vec![NO_TRIGGER; engine.modifiers().drawable().count()]
    }

    #[test]
    fn test_forced_floor_tier_has_plain_label() {
        let engine = RollEngine::default();
        let mut draws = vec![draw_for_weight(2)];
        draws.extend(no_modifiers(&engine));
        let outcome = engine.roll(&mut SequenceSource::new(draws));

        assert_eq!(outcome.tier, "Common");
        assert_eq!(outcome.rarity_score, 2.0);
        assert_eq!(outcome.label, "⚪ Common");
        assert!(outcome.modifiers.is_empty());
    }

    #[test]
    fn test_no_modifiers_scores_tier_weight() {
        let engine = RollEngine::default();
        for tier in engine.rarities().tiers() {
            let mut draws = vec![draw_for_weight(tier.weight)];
            draws.extend(no_modifiers(&engine));
            let outcome = engine.roll(&mut SequenceSource::new(draws));
            assert_eq!(outcome.tier, tier.name);
            assert_eq!(outcome.multiplier, 1.0);
            assert_eq!(outcome.rarity_score, tier.weight as f64);
        }
    }

    #[test]
    fn test_two_forced_modifiers_multiply() {
        let engine = RollEngine::default();
        // Rare tier; Shiny on, Golden off, Cursed on, Cosmic off
        let draws = vec![draw_for_weight(20), 0.0, NO_TRIGGER, 0.0, NO_TRIGGER];
        let outcome = engine.roll(&mut SequenceSource::new(draws));

        assert_eq!(outcome.tier, "Rare");
        assert_eq!(outcome.modifiers, vec!["Shiny", "Cursed"]);
        assert_eq!(outcome.multiplier, 10.0 * 250.0);
        assert_eq!(outcome.rarity_score, 20.0 * 10.0 * 250.0);
        assert_eq!(outcome.label, "✨ 💀 🔵 Shiny Cursed Rare");
    }

    #[test]
    fn test_glyphs_by_weight_names_by_trigger_order() {
        let rarities = RarityTable::new(vec![RarityTier::new("Base", 2, "B")]).unwrap();
        let modifiers = ModifierTable::new(vec![
            ModifierTier::new("Heavy", 100, "H"),
            ModifierTier::new("Light", 3, "L"),
            ModifierTier::new("Quiet", 4, ""),
        ])
        .unwrap();
        let engine = RollEngine::new(rarities, modifiers);

        let outcome = engine.roll(&mut SequenceSource::new([0.0, 0.0, 0.0, 0.0]));
        assert_eq!(outcome.label, "L H B Heavy Light Quiet Base");
        assert_eq!(outcome.rarity_score, 2.0 * 100.0 * 3.0 * 4.0);
    }

    #[test]
    fn test_draws_below_half_never_fall_through() {
        let engine = RollEngine::new(RarityTable::standard(), ModifierTable::baseline_only());
        let mut r = 0.0;
        while r < 0.5 {
            let outcome = engine.roll(&mut SequenceSource::new([r]));
            let tier = engine
                .rarities()
                .tiers()
                .iter()
                .find(|t| t.name == outcome.tier)
                .unwrap();
            assert!(tier.threshold() > r, "draw {r} fell through to {}", outcome.tier);
            r += 0.001;
        }
    }

    #[test]
    fn test_draws_above_half_fall_back_to_common() {
        let engine = RollEngine::new(RarityTable::standard(), ModifierTable::baseline_only());
        for r in [0.5, 0.75, 0.999_999] {
            let outcome = engine.roll(&mut SequenceSource::new([r]));
            assert_eq!(outcome.tier, "Common");
            assert_eq!(outcome.rarity_score, 2.0);
        }
    }

    /// Every roll picks exactly one tier of the table and scores its weight
    /// times the product of the triggered modifiers.
    fn assert_well_formed_rolls(engine: &RollEngine, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..5_000 {
            let outcome = engine.roll(&mut rng);
            let matching: Vec<&RarityTier> = engine
                .rarities()
                .tiers()
                .iter()
                .filter(|t| t.name == outcome.tier)
                .collect();
            assert_eq!(matching.len(), 1);
            assert_eq!(matching[0].weight, outcome.tier_weight);

            let product: f64 = outcome
                .modifiers
                .iter()
                .map(|name| {
                    let m = engine.modifiers().modifiers().iter().find(|m| &m.name == name);
                    m.unwrap().weight as f64
                })
                .product();
            assert_eq!(outcome.multiplier, product);

            assert!(outcome.rarity_score > 0.0);
            let ratio = outcome.rarity_score / outcome.tier_weight as f64;
            assert!(ratio >= 1.0);
            assert_eq!(ratio.fract(), 0.0);
        }
    }

    #[test]
    fn test_random_rolls_on_standard_tables() {
        assert_well_formed_rolls(&RollEngine::default(), 42);
    }

    #[test]
    fn test_random_rolls_on_ladder_table() {
        let tiers = (2..=12).map(|w| RarityTier::new(format!("T{w}"), w, "")).collect();
        let engine = RollEngine::new(
            RarityTable::new(tiers).unwrap(),
            ModifierTable::baseline_only(),
        );
        assert_well_formed_rolls(&engine, 7);
    }

    #[test]
    fn test_random_rolls_on_custom_tables_with_modifiers() {
        let rarities = RarityTable::new(vec![
            RarityTier::new("Floor", 2, "f"),
            RarityTier::new("Mid", 9, "m"),
            RarityTier::new("Peak", 400, "p"),
        ])
        .unwrap();
        let modifiers = ModifierTable::new(vec![
            ModifierTier::new("Plain", 1, ""),
            ModifierTier::new("Often", 2, "o"),
            ModifierTier::new("Sometimes", 3, "s"),
            ModifierTier::new("Seldom", 7, "d"),
        ])
        .unwrap();
        let engine = RollEngine::new(rarities, modifiers);
        assert_well_formed_rolls(&engine, 1234);

        // Frequent modifiers must actually stack
        let mut rng = StdRng::seed_from_u64(99);
        let stacked = (0..1_000)
            .map(|_| engine.roll(&mut rng))
            .any(|o| o.modifiers.len() >= 2);
        assert!(stacked);
    }

    #[test]
    fn test_roll_through_trait_object() {
        let engine = RollEngine::default();
        let mut boxed: Box<dyn RandomSource> = Box::new(SequenceSource::new([]));
        let outcome = engine.roll(&mut *boxed);
        assert_eq!(outcome.tier, "Common");
    }
}
