use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Upper bound of the raw per-attribute assessment scale.
pub const MAX_ATTRIBUTE_SCORE: f64 = 20.0;

/// The five standard basketball roles used to weight attribute importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    PG,
    SG,
    SF,
    PF,
    C,
}

impl Position {
    pub const fn all() -> [Self; 5] {
        [Self::PG, Self::SG, Self::SF, Self::PF, Self::C]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::PG => "PG",
            Self::SG => "SG",
            Self::SF => "SF",
            Self::PF => "PF",
            Self::C => "C",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PG => "Point Guard",
            Self::SG => "Shooting Guard",
            Self::SF => "Small Forward",
            Self::PF => "Power Forward",
            Self::C => "Center",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown position '{0}' (expected PG, SG, SF, PF or C)")]
pub struct PositionParseError(pub String);

impl FromStr for Position {
    type Err = PositionParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "pg" | "pointguard" => Ok(Self::PG),
            "sg" | "shootingguard" => Ok(Self::SG),
            "sf" | "smallforward" => Ok(Self::SF),
            "pf" | "powerforward" => Ok(Self::PF),
            "c" | "center" | "centre" => Ok(Self::C),
            _ => Err(PositionParseError(raw.to_string())),
        }
    }
}

/// Broad grouping of an attribute, also used to pick recommendation icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeCategory {
    Physical,
    Technical,
    Defensive,
    Mental,
}

impl AttributeCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::Technical => "technical",
            Self::Defensive => "defensive",
            Self::Mental => "mental",
        }
    }
}

/// A single assessed attribute on the 0-20 scale.
///
/// `value <= potential` is expected but not enforced here; range checks belong to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributeScore {
    pub value: f64,
    pub potential: f64,
}

impl AttributeScore {
    pub const fn new(value: f64, potential: f64) -> Self {
        Self { value, potential }
    }
}

/// One assessment snapshot for one player, keyed by attribute id.
///
/// Iteration is in ascending attribute-id order, which is what makes recommendation tie-breaks
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerAttributes(BTreeMap<String, AttributeScore>);

impl PlayerAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        attribute_id: impl Into<String>,
        score: AttributeScore,
    ) -> Option<AttributeScore> {
        self.0.insert(attribute_id.into(), score)
    }

    pub fn get(&self, attribute_id: &str) -> Option<&AttributeScore> {
        self.0.get(attribute_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeScore)> {
        self.0.iter().map(|(id, score)| (id.as_str(), score))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, AttributeScore)> for PlayerAttributes {
    fn from_iter<I: IntoIterator<Item = (S, AttributeScore)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(id, score)| (id.into(), score))
                .collect(),
        )
    }
}

/// Classification of a single raw attribute score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    Foundational,
    Developmental,
    Advanced,
    Elite,
}

impl SkillLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Foundational => "Foundational",
            Self::Developmental => "Developmental",
            Self::Advanced => "Advanced",
            Self::Elite => "Elite",
        }
    }
}

/// How far along a player is on an attribute, as seen by the recommendation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingStage {
    Foundation,
    Development,
    Advanced,
    Elite,
}

impl TrainingStage {
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Foundation => "foundation",
            Self::Development => "development",
            Self::Advanced => "advanced",
            Self::Elite => "elite",
        }
    }
}

/// Urgency label attached to a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationPriority {
    High,
    #[serde(rename = "Medium-High")]
    MediumHigh,
    Medium,
    Maintenance,
}

impl RecommendationPriority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::MediumHigh => "Medium-High",
            Self::Medium => "Medium",
            Self::Maintenance => "Maintenance",
        }
    }
}

/// Closed set of icon tags the dashboard knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationIcon {
    Dumbbell,
    Target,
    Shield,
    Brain,
}

impl RecommendationIcon {
    pub const fn for_category(category: AttributeCategory) -> Self {
        match category {
            AttributeCategory::Physical => Self::Dumbbell,
            AttributeCategory::Technical => Self::Target,
            AttributeCategory::Defensive => Self::Shield,
            AttributeCategory::Mental => Self::Brain,
        }
    }
}

/// Stable identifier derived from the attribute and stage a recommendation targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecommendationId(pub String);

impl RecommendationId {
    pub fn derive(attribute_id: &str, stage: TrainingStage) -> Self {
        Self(format!("{attribute_id}-{}", stage.slug()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecommendation {
    pub id: RecommendationId,
    pub attribute_id: String,
    pub stage: TrainingStage,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub priority: RecommendationPriority,
    pub category: AttributeCategory,
    pub icon: RecommendationIcon,
}
