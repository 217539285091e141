use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::development::{PlayerAttributes, PlayerEvaluation, Position, TrainingRecommendation};

/// Identifier wrapper for registered players.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub player_id: PlayerId,
    pub name: String,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jersey_number: Option<u8>,
}

/// Payload accepted when a player joins the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRegistration {
    pub name: String,
    pub position: Position,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub jersey_number: Option<u8>,
    #[serde(default)]
    pub initial_assessment: Option<AssessmentSubmission>,
}

/// A new assessment. Missing dates default to today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    #[serde(default)]
    pub assessed_on: Option<NaiveDate>,
    pub attributes: PlayerAttributes,
}

/// Stored assessment. The latest snapshot supersedes earlier ones; earlier ones are kept for
/// progress tracking only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSnapshot {
    pub assessed_on: NaiveDate,
    pub attributes: PlayerAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub profile: PlayerProfile,
    #[serde(default)]
    pub assessments: Vec<AssessmentSnapshot>,
}

impl PlayerRecord {
    pub fn latest_assessment(&self) -> Option<&AssessmentSnapshot> {
        self.assessments.last()
    }

    pub fn current_attributes(&self) -> Option<&PlayerAttributes> {
        self.latest_assessment().map(|snapshot| &snapshot.attributes)
    }
}

/// Roster listing entry. Rating and stars are absent until the first assessment.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSummaryView {
    pub player_id: PlayerId,
    pub name: String,
    pub position: Position,
    pub position_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stars: Option<u8>,
    pub assessment_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DevelopmentAssessment {
    pub evaluation: PlayerEvaluation,
    pub recommendations: Vec<TrainingRecommendation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerDevelopmentView {
    pub profile: PlayerProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessed_on: Option<NaiveDate>,
    pub evaluation: PlayerEvaluation,
    pub recommendations: Vec<TrainingRecommendation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressPoint {
    pub assessed_on: NaiveDate,
    pub overall_rating: i32,
    pub stars: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_change: Option<i32>,
}
