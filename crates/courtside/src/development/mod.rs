//! Position-weighted player scoring and training recommendations.
//!
//! Everything in this module is pure: the catalog is built once, shared through an `Arc`, and
//! the evaluator and recommendation engine only read from it.

pub mod catalog;
pub mod domain;
pub mod evaluation;
pub mod recommendations;

#[cfg(test)]
mod tests;

pub use catalog::{AttributeCatalog, AttributeDefinition, CatalogError, PositionWeights};
pub use domain::{
    AttributeCategory, AttributeScore, PlayerAttributes, Position, PositionParseError,
    RecommendationIcon, RecommendationId, RecommendationPriority, SkillLevel,
    TrainingRecommendation, TrainingStage,
};
pub use evaluation::{
    convert_rating_to_stars, skill_level_from_score, AttributeLevelView, PlayerEvaluation,
    ScoreEvaluator,
};
pub use recommendations::{
    DevelopmentPriority, RecommendationEngine, DEFAULT_RECOMMENDATION_LIMIT,
};
