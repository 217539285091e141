use std::collections::BTreeMap;
use std::sync::Arc;

use crate::development::catalog::{AttributeCatalog, AttributeDefinition, PositionWeights};
use crate::development::domain::{AttributeCategory, AttributeScore, PlayerAttributes, Position};
use crate::development::evaluation::ScoreEvaluator;
use crate::development::recommendations::RecommendationEngine;

pub(super) fn standard_catalog() -> Arc<AttributeCatalog> {
    Arc::new(AttributeCatalog::standard())
}

pub(super) fn evaluator() -> ScoreEvaluator {
    ScoreEvaluator::new(standard_catalog())
}

pub(super) fn engine() -> RecommendationEngine {
    RecommendationEngine::new(standard_catalog())
}

pub(super) fn score(value: f64, potential: f64) -> AttributeScore {
    AttributeScore::new(value, potential)
}

/// The point guard snapshot used throughout the scoring scenarios.
pub(super) fn point_guard_snapshot() -> PlayerAttributes {
    PlayerAttributes::from_iter([
        ("shooting", score(12.0, 16.0)),
        ("ballHandling", score(14.0, 16.0)),
        ("speed", score(16.0, 17.0)),
        ("basketballIQ", score(13.0, 16.0)),
    ])
}

pub(super) fn full_snapshot(value: f64) -> PlayerAttributes {
    AttributeCatalog::standard()
        .definitions()
        .map(|definition| (definition.id.clone(), score(value, 20.0)))
        .collect()
}

pub(super) fn uniform_weights(ids: &[&str], weight: f64) -> PositionWeights {
    ids.iter().map(|id| (id.to_string(), weight)).collect()
}

/// Two-attribute catalog where every position weighs `jumpShot` and `mystery` equally, and
/// `mystery` has no definition.
pub(super) fn sparse_catalog() -> Arc<AttributeCatalog> {
    let definitions = vec![AttributeDefinition {
        id: "jumpShot".to_string(),
        display_name: "Jump Shot".to_string(),
        category: AttributeCategory::Technical,
    }];
    let weights: BTreeMap<Position, PositionWeights> = Position::all()
        .into_iter()
        .map(|position| (position, uniform_weights(&["jumpShot", "mystery"], 0.5)))
        .collect();

    Arc::new(AttributeCatalog::new(definitions, weights).expect("sparse catalog is valid"))
}
