use std::sync::Arc;

use serde::Serialize;

use super::catalog::AttributeCatalog;
use super::domain::{AttributeCategory, PlayerAttributes, Position, SkillLevel};

/// Multiplier projecting the 0-20 attribute scale onto the 0-100 rating scale.
const RATING_SCALE: f64 = 5.0;

/// Computes position-aware overall ratings from raw attribute scores.
#[derive(Debug, Clone)]
pub struct ScoreEvaluator {
    catalog: Arc<AttributeCatalog>,
}

impl ScoreEvaluator {
    pub fn new(catalog: Arc<AttributeCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &AttributeCatalog {
        &self.catalog
    }

    /// Weighted average of the attributes the position cares about, projected onto 0-100.
    ///
    /// Only attributes present in both the snapshot and the position's weight table count, and
    /// the average is normalized by the weights actually used. With no overlap the rating is 0.
    /// Values are not clamped, so out-of-range inputs produce out-of-range ratings.
    pub fn calculate_overall_rating(&self, attributes: &PlayerAttributes, position: Position) -> i32 {
        let weights = self.catalog.weights(position);

        let (weighted_sum, weight_total) = attributes
            .iter()
            .filter_map(|(id, score)| weights.get(id).map(|weight| (score.value, weight)))
            .fold((0.0_f64, 0.0_f64), |(sum, total), (value, weight)| {
                (sum + value * weight, total + weight)
            });

        if weight_total == 0.0 {
            return 0;
        }

        let normalized = weighted_sum / weight_total;
        (normalized * RATING_SCALE).round() as i32
    }

    /// Overall rating, stars, and a per-attribute breakdown for dashboards.
    pub fn evaluate(&self, attributes: &PlayerAttributes, position: Position) -> PlayerEvaluation {
        let overall_rating = self.calculate_overall_rating(attributes, position);
        let weights = self.catalog.weights(position);

        let attributes = attributes
            .iter()
            .map(|(id, score)| {
                let skill_level = skill_level_from_score(score.value);
                AttributeLevelView {
                    attribute_id: id.to_string(),
                    display_name: self.catalog.display_name(id).to_string(),
                    category: self.catalog.category(id),
                    value: score.value,
                    potential: score.potential,
                    skill_level,
                    weight: weights.get(id),
                }
            })
            .collect();

        PlayerEvaluation {
            position,
            overall_rating,
            stars: convert_rating_to_stars(overall_rating),
            attributes,
        }
    }
}

/// Star ladder over the 0-100 rating. The floor is one star, even for a rating of 0.
pub fn convert_rating_to_stars(rating: i32) -> u8 {
    if rating >= 80 {
        5
    } else if rating >= 60 {
        4
    } else if rating >= 40 {
        3
    } else if rating >= 20 {
        2
    } else {
        1
    }
}

/// Classify a raw 0-20 score. Exactly 5 is Foundational and exactly 15 is Advanced.
pub fn skill_level_from_score(score: f64) -> SkillLevel {
    if score <= 5.0 {
        SkillLevel::Foundational
    } else if score <= 10.0 {
        SkillLevel::Developmental
    } else if score <= 15.0 {
        SkillLevel::Advanced
    } else {
        SkillLevel::Elite
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerEvaluation {
    pub position: Position,
    pub overall_rating: i32,
    pub stars: u8,
    pub attributes: Vec<AttributeLevelView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeLevelView {
    pub attribute_id: String,
    pub display_name: String,
    pub category: AttributeCategory,
    pub value: f64,
    pub potential: f64,
    pub skill_level: SkillLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}
