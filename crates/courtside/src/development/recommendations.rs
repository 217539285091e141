use std::sync::Arc;

use serde::Serialize;

use super::catalog::AttributeCatalog;
use super::domain::{
    PlayerAttributes, Position, RecommendationIcon, RecommendationId, RecommendationPriority,
    TrainingRecommendation, TrainingStage, MAX_ATTRIBUTE_SCORE,
};

pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 5;

/// One attribute's place in the development ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DevelopmentPriority {
    pub attribute_id: String,
    pub weight: f64,
    pub value: f64,
    pub priority: f64,
}

/// Ranks attributes by positional importance times current weakness and phrases training
/// recommendations for the weakest, most important ones.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    catalog: Arc<AttributeCatalog>,
    limit: usize,
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<AttributeCatalog>) -> Self {
        Self::with_limit(catalog, DEFAULT_RECOMMENDATION_LIMIT)
    }

    pub fn with_limit(catalog: Arc<AttributeCatalog>, limit: usize) -> Self {
        Self { catalog, limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Positionally weighted attributes, highest `weight * (1 - value / 20)` first.
    ///
    /// The sort is stable over the snapshot's ascending id order, so equal priorities are
    /// broken alphabetically by attribute id.
    pub fn rank_priorities(
        &self,
        attributes: &PlayerAttributes,
        position: Position,
    ) -> Vec<DevelopmentPriority> {
        let weights = self.catalog.weights(position);

        let mut ranked: Vec<DevelopmentPriority> = attributes
            .iter()
            .filter_map(|(id, score)| {
                weights.get(id).map(|weight| DevelopmentPriority {
                    attribute_id: id.to_string(),
                    weight,
                    value: score.value,
                    priority: weight * (1.0 - score.value / MAX_ATTRIBUTE_SCORE),
                })
            })
            .collect();

        ranked.sort_by(|left, right| right.priority.total_cmp(&left.priority));
        ranked
    }

    pub fn generate_training_recommendations(
        &self,
        attributes: &PlayerAttributes,
        position: Position,
    ) -> Vec<TrainingRecommendation> {
        self.rank_priorities(attributes, position)
            .into_iter()
            .take(self.limit)
            .map(|entry| self.recommendation_for(&entry.attribute_id, entry.value))
            .collect()
    }

    fn recommendation_for(&self, attribute_id: &str, value: f64) -> TrainingRecommendation {
        let stage = training_stage(value);
        let display_name = self.catalog.display_name(attribute_id);
        let category = self.catalog.category(attribute_id);
        let lowered = display_name.to_lowercase();

        let (title, description, duration, priority) = match stage {
            TrainingStage::Foundation => (
                format!("Focus on {display_name} Fundamentals"),
                format!(
                    "Build reliable {lowered} mechanics with high-repetition, low-pressure drills and close coaching feedback."
                ),
                "30-45 min daily",
                RecommendationPriority::High,
            ),
            TrainingStage::Development => (
                format!("Develop {display_name} Consistency"),
                format!(
                    "Turn {lowered} into a dependable skill with progressive drills under moderate game pressure."
                ),
                "25-35 min daily",
                RecommendationPriority::MediumHigh,
            ),
            TrainingStage::Advanced => (
                format!("Advanced {display_name} Development"),
                format!(
                    "Sharpen {lowered} at game speed with live defenders and decision-making reads."
                ),
                "20-30 min daily",
                RecommendationPriority::Medium,
            ),
            TrainingStage::Elite => (
                format!("Elite {display_name} Refinement"),
                format!(
                    "Maintain elite {lowered} with short, high-intensity, situation-specific work and film review."
                ),
                "15-20 min daily",
                RecommendationPriority::Maintenance,
            ),
        };

        TrainingRecommendation {
            id: RecommendationId::derive(attribute_id, stage),
            attribute_id: attribute_id.to_string(),
            stage,
            title,
            description,
            duration: duration.to_string(),
            priority,
            category,
            icon: RecommendationIcon::for_category(category),
        }
    }
}

// Independent of `skill_level_from_score`, even though the boundaries currently match.
pub(crate) fn training_stage(value: f64) -> TrainingStage {
    if value <= 5.0 {
        TrainingStage::Foundation
    } else if value <= 10.0 {
        TrainingStage::Development
    } else if value <= 15.0 {
        TrainingStage::Advanced
    } else {
        TrainingStage::Elite
    }
}
