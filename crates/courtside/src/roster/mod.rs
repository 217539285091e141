//! Player roster: profiles, assessment history, and the HTTP surface over them.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AssessmentSnapshot, AssessmentSubmission, DevelopmentAssessment, PlayerDevelopmentView,
    PlayerId, PlayerProfile, PlayerRecord, PlayerRegistration, PlayerSummaryView, ProgressPoint,
};
pub use repository::{PlayerRepository, RepositoryError};
pub use router::roster_router;
pub use service::{AssessmentViolation, RosterService, RosterServiceError};
