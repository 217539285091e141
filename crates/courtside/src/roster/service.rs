use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use super::domain::{
    AssessmentSnapshot, AssessmentSubmission, DevelopmentAssessment, PlayerDevelopmentView,
    PlayerId, PlayerProfile, PlayerRecord, PlayerRegistration, PlayerSummaryView, ProgressPoint,
};
use super::repository::{PlayerRepository, RepositoryError};
use crate::development::domain::MAX_ATTRIBUTE_SCORE;
use crate::development::{
    convert_rating_to_stars, AttributeCatalog, PlayerAttributes, Position, RecommendationEngine,
    ScoreEvaluator,
};

/// Service composing the player repository with the scoring and recommendation engines.
pub struct RosterService<R> {
    repository: Arc<R>,
    catalog: Arc<AttributeCatalog>,
    evaluator: ScoreEvaluator,
    engine: RecommendationEngine,
}

static PLAYER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_player_id() -> PlayerId {
    let id = PLAYER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    PlayerId(format!("player-{id:06}"))
}

/// Sequence number of an id minted by `next_player_id`, if it is one.
fn player_sequence(id: &PlayerId) -> Option<u64> {
    id.0.strip_prefix("player-")?.parse().ok()
}

impl<R> RosterService<R>
where
    R: PlayerRepository + 'static,
{
    pub fn new(repository: Arc<R>, catalog: Arc<AttributeCatalog>) -> Self {
        let engine = RecommendationEngine::new(catalog.clone());
        Self::with_engine(repository, catalog, engine)
    }

    pub fn with_engine(
        repository: Arc<R>,
        catalog: Arc<AttributeCatalog>,
        engine: RecommendationEngine,
    ) -> Self {
        let evaluator = ScoreEvaluator::new(catalog.clone());
        Self {
            repository,
            catalog,
            evaluator,
            engine,
        }
    }

    pub fn catalog(&self) -> &Arc<AttributeCatalog> {
        &self.catalog
    }

    /// Add a player to the roster, optionally with a first assessment.
    pub fn register(
        &self,
        registration: PlayerRegistration,
    ) -> Result<PlayerRecord, RosterServiceError> {
        let PlayerRegistration {
            name,
            position,
            team,
            jersey_number,
            initial_assessment,
        } = registration;

        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AssessmentViolation::EmptyName.into());
        }

        let assessments = match initial_assessment {
            Some(submission) => vec![snapshot_from_submission(submission)?],
            None => Vec::new(),
        };

        let record = PlayerRecord {
            profile: PlayerProfile {
                player_id: next_player_id(),
                name,
                position,
                team: team
                    .map(|team| team.trim().to_string())
                    .filter(|team| !team.is_empty()),
                jersey_number,
            },
            assessments,
        };

        let stored = self.repository.insert(record)?;
        info!(
            player_id = %stored.profile.player_id,
            position = %stored.profile.position,
            "player registered"
        );
        Ok(stored)
    }

    /// Record a new snapshot. It becomes the player's current attributes.
    pub fn record_assessment(
        &self,
        player_id: &PlayerId,
        submission: AssessmentSubmission,
    ) -> Result<PlayerRecord, RosterServiceError> {
        let mut record = self.get(player_id)?;
        let snapshot = snapshot_from_submission(submission)?;

        if let Some(latest) = record.latest_assessment() {
            if snapshot.assessed_on < latest.assessed_on {
                return Err(AssessmentViolation::OutOfOrder {
                    latest: latest.assessed_on,
                    submitted: snapshot.assessed_on,
                }
                .into());
            }
        }

        debug!(
            %player_id,
            assessed_on = %snapshot.assessed_on,
            attributes = snapshot.attributes.len(),
            "assessment recorded"
        );
        record.assessments.push(snapshot);
        self.repository.update(record.clone())?;
        Ok(record)
    }

    pub fn get(&self, player_id: &PlayerId) -> Result<PlayerRecord, RosterServiceError> {
        let record = self
            .repository
            .fetch(player_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Roster listing in registration order, optionally narrowed to one team (case-insensitive).
    pub fn list(&self, team: Option<&str>) -> Result<Vec<PlayerSummaryView>, RosterServiceError> {
        let mut records = self.repository.list()?;
        records.sort_by(|left, right| {
            let (left, right) = (&left.profile.player_id, &right.profile.player_id);
            player_sequence(left)
                .cmp(&player_sequence(right))
                .then_with(|| left.cmp(right))
        });

        let summaries = records
            .iter()
            .filter(|record| match team {
                Some(wanted) => record
                    .profile
                    .team
                    .as_deref()
                    .is_some_and(|team| team.eq_ignore_ascii_case(wanted.trim())),
                None => true,
            })
            .map(|record| self.summarize(record))
            .collect();

        Ok(summaries)
    }

    pub fn remove(&self, player_id: &PlayerId) -> Result<PlayerRecord, RosterServiceError> {
        let removed = self.repository.remove(player_id)?;
        info!(%player_id, "player removed");
        Ok(removed)
    }

    /// Evaluation and training plan for an ad-hoc snapshot, validated like a stored one.
    pub fn assess(
        &self,
        position: Position,
        attributes: &PlayerAttributes,
    ) -> Result<DevelopmentAssessment, RosterServiceError> {
        validate_attributes(attributes)?;
        Ok(self.assessment_for(attributes, position))
    }

    /// Evaluation and recommendations for the player's current snapshot.
    pub fn development_report(
        &self,
        player_id: &PlayerId,
    ) -> Result<PlayerDevelopmentView, RosterServiceError> {
        let record = self.get(player_id)?;
        let empty = PlayerAttributes::new();
        let attributes = record.current_attributes().unwrap_or(&empty);
        let assessment = self.assessment_for(attributes, record.profile.position);

        Ok(PlayerDevelopmentView {
            assessed_on: record
                .latest_assessment()
                .map(|snapshot| snapshot.assessed_on),
            profile: record.profile,
            evaluation: assessment.evaluation,
            recommendations: assessment.recommendations,
        })
    }

    /// Overall rating per snapshot in recorded order, with the change from the previous one.
    pub fn progress(&self, player_id: &PlayerId) -> Result<Vec<ProgressPoint>, RosterServiceError> {
        let record = self.get(player_id)?;
        let position = record.profile.position;

        let mut previous: Option<i32> = None;
        let points = record
            .assessments
            .iter()
            .map(|snapshot| {
                let overall_rating = self
                    .evaluator
                    .calculate_overall_rating(&snapshot.attributes, position);
                let rating_change = previous.map(|earlier| overall_rating - earlier);
                previous = Some(overall_rating);
                ProgressPoint {
                    assessed_on: snapshot.assessed_on,
                    overall_rating,
                    stars: convert_rating_to_stars(overall_rating),
                    rating_change,
                }
            })
            .collect();

        Ok(points)
    }

    fn assessment_for(
        &self,
        attributes: &PlayerAttributes,
        position: Position,
    ) -> DevelopmentAssessment {
        DevelopmentAssessment {
            evaluation: self.evaluator.evaluate(attributes, position),
            recommendations: self
                .engine
                .generate_training_recommendations(attributes, position),
        }
    }

    fn summarize(&self, record: &PlayerRecord) -> PlayerSummaryView {
        let overall_rating = record.current_attributes().map(|attributes| {
            self.evaluator
                .calculate_overall_rating(attributes, record.profile.position)
        });

        PlayerSummaryView {
            player_id: record.profile.player_id.clone(),
            name: record.profile.name.clone(),
            position: record.profile.position,
            position_label: record.profile.position.label(),
            team: record.profile.team.clone(),
            overall_rating,
            stars: overall_rating.map(convert_rating_to_stars),
            assessment_count: record.assessments.len(),
        }
    }
}

fn snapshot_from_submission(
    submission: AssessmentSubmission,
) -> Result<AssessmentSnapshot, AssessmentViolation> {
    validate_attributes(&submission.attributes)?;
    Ok(AssessmentSnapshot {
        assessed_on: submission
            .assessed_on
            .unwrap_or_else(|| Local::now().date_naive()),
        attributes: submission.attributes,
    })
}

/// Range check performed at the service boundary; the scoring core does not clamp.
pub(crate) fn validate_attributes(attributes: &PlayerAttributes) -> Result<(), AssessmentViolation> {
    for (attribute_id, score) in attributes.iter() {
        for (field, value) in [("value", score.value), ("potential", score.potential)] {
            if !value.is_finite() || !(0.0..=MAX_ATTRIBUTE_SCORE).contains(&value) {
                return Err(AssessmentViolation::OutOfRange {
                    attribute_id: attribute_id.to_string(),
                    field,
                    value,
                });
            }
        }
    }
    Ok(())
}

/// Input rejected before it reaches the roster.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssessmentViolation {
    #[error("player name must not be empty")]
    EmptyName,
    #[error("{field} {value} for '{attribute_id}' is outside the 0-20 scale")]
    OutOfRange {
        attribute_id: String,
        field: &'static str,
        value: f64,
    },
    #[error("assessment dated {submitted} is older than the latest one ({latest})")]
    OutOfOrder {
        latest: NaiveDate,
        submitted: NaiveDate,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum RosterServiceError {
    #[error(transparent)]
    Validation(#[from] AssessmentViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
