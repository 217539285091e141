use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::development::{AttributeCatalog, AttributeScore, PlayerAttributes, Position};
use crate::roster::domain::{
    AssessmentSubmission, PlayerId, PlayerRecord, PlayerRegistration,
};
use crate::roster::repository::{PlayerRepository, RepositoryError};
use crate::roster::{roster_router, RosterService};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn score(value: f64, potential: f64) -> AttributeScore {
    AttributeScore::new(value, potential)
}

pub(super) fn guard_attributes() -> PlayerAttributes {
    PlayerAttributes::from_iter([
        ("shooting", score(12.0, 16.0)),
        ("ballHandling", score(14.0, 16.0)),
        ("speed", score(16.0, 17.0)),
        ("basketballIQ", score(13.0, 16.0)),
    ])
}

pub(super) fn assessment(on: NaiveDate, attributes: PlayerAttributes) -> AssessmentSubmission {
    AssessmentSubmission {
        assessed_on: Some(on),
        attributes,
    }
}

pub(super) fn registration(name: &str, position: Position) -> PlayerRegistration {
    PlayerRegistration {
        name: name.to_string(),
        position,
        team: Some("Varsity".to_string()),
        jersey_number: Some(3),
        initial_assessment: None,
    }
}

pub(super) fn assessed_guard() -> PlayerRegistration {
    let mut registration = registration("Maya Chen", Position::PG);
    registration.initial_assessment = Some(assessment(date(2025, 9, 1), guard_attributes()));
    registration
}

pub(super) fn build_service() -> (RosterService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = RosterService::new(repository.clone(), Arc::new(AttributeCatalog::standard()));
    (service, repository)
}

pub(super) fn router_with_service(service: RosterService<MemoryRepository>) -> axum::Router {
    roster_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<PlayerId, PlayerRecord>>>,
}

impl PlayerRepository for MemoryRepository {
    fn insert(&self, record: PlayerRecord) -> Result<PlayerRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.profile.player_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.profile.player_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: PlayerRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.profile.player_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &PlayerId) -> Result<Option<PlayerRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<PlayerRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn remove(&self, id: &PlayerId) -> Result<PlayerRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(id).ok_or(RepositoryError::NotFound)
    }
}

pub(super) struct ConflictRepository;

impl PlayerRepository for ConflictRepository {
    fn insert(&self, _record: PlayerRecord) -> Result<PlayerRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: PlayerRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &PlayerId) -> Result<Option<PlayerRecord>, RepositoryError> {
        Ok(None)
    }

    fn list(&self) -> Result<Vec<PlayerRecord>, RepositoryError> {
        Ok(Vec::new())
    }

    fn remove(&self, _id: &PlayerId) -> Result<PlayerRecord, RepositoryError> {
        Err(RepositoryError::NotFound)
    }
}

pub(super) struct UnavailableRepository;

impl PlayerRepository for UnavailableRepository {
    fn insert(&self, _record: PlayerRecord) -> Result<PlayerRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: PlayerRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &PlayerId) -> Result<Option<PlayerRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<PlayerRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn remove(&self, _id: &PlayerId) -> Result<PlayerRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
