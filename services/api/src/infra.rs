use chrono::NaiveDate;
use courtside::config::DevelopmentConfig;
use courtside::development::{
    AttributeCatalog, AttributeScore, CatalogError, PlayerAttributes, Position,
};
use courtside::roster::{
    AssessmentSubmission, PlayerId, PlayerRecord, PlayerRegistration, PlayerRepository,
    RepositoryError, RosterService, RosterServiceError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) catalog: Arc<AttributeCatalog>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPlayerRepository {
    records: Arc<Mutex<HashMap<PlayerId, PlayerRecord>>>,
}

impl PlayerRepository for InMemoryPlayerRepository {
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
        if guard.contains_key(&record.profile.player_id) {
            guard.insert(record.profile.player_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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

/// Catalog from the configured JSON document, or the built-in standard one.
pub(crate) fn load_catalog(config: &DevelopmentConfig) -> Result<AttributeCatalog, CatalogError> {
    let catalog = match &config.catalog_path {
        Some(path) => {
            info!(path = %path.display(), "loading attribute catalog");
            AttributeCatalog::from_path(path)?
        }
        None => AttributeCatalog::standard(),
    };

    let undefined = catalog.undefined_weighted_ids();
    if !undefined.is_empty() {
        warn!(?undefined, "weighted attributes without a catalog definition");
    }
    Ok(catalog)
}

fn score(value: f64, potential: f64) -> AttributeScore {
    AttributeScore::new(value, potential)
}

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Sample players with two assessments each, shared by the demo command and roster seeding.
pub(crate) fn demo_roster() -> Vec<(PlayerRegistration, AssessmentSubmission)> {
    vec![
        (
            PlayerRegistration {
                name: "Maya Chen".to_string(),
                position: Position::PG,
                team: Some("Varsity".to_string()),
                jersey_number: Some(3),
                initial_assessment: Some(AssessmentSubmission {
                    assessed_on: date(2025, 9, 1),
                    attributes: PlayerAttributes::from_iter([
                        ("shooting", score(12.0, 16.0)),
                        ("ballHandling", score(14.0, 16.0)),
                        ("speed", score(16.0, 17.0)),
                        ("basketballIQ", score(13.0, 16.0)),
                    ]),
                }),
            },
            AssessmentSubmission {
                assessed_on: date(2026, 1, 10),
                attributes: PlayerAttributes::from_iter([
                    ("shooting", score(16.0, 17.0)),
                    ("ballHandling", score(14.0, 16.0)),
                    ("speed", score(16.0, 17.0)),
                    ("basketballIQ", score(15.0, 17.0)),
                ]),
            },
        ),
        (
            PlayerRegistration {
                name: "Sam Okafor".to_string(),
                position: Position::C,
                team: Some("Varsity".to_string()),
                jersey_number: Some(34),
                initial_assessment: Some(AssessmentSubmission {
                    assessed_on: date(2025, 9, 1),
                    attributes: PlayerAttributes::from_iter([
                        ("rebounding", score(8.0, 15.0)),
                        ("strength", score(10.0, 16.0)),
                        ("interiorDefense", score(7.0, 14.0)),
                        ("shotBlocking", score(6.0, 12.0)),
                    ]),
                }),
            },
            AssessmentSubmission {
                assessed_on: date(2026, 1, 10),
                attributes: PlayerAttributes::from_iter([
                    ("rebounding", score(11.0, 15.0)),
                    ("strength", score(12.0, 16.0)),
                    ("interiorDefense", score(10.0, 14.0)),
                    ("shotBlocking", score(10.0, 12.0)),
                ]),
            },
        ),
        (
            PlayerRegistration {
                name: "Leo Park".to_string(),
                position: Position::SG,
                team: Some("JV".to_string()),
                jersey_number: Some(11),
                initial_assessment: Some(AssessmentSubmission {
                    assessed_on: date(2025, 9, 2),
                    attributes: PlayerAttributes::from_iter([
                        ("shooting", score(3.0, 14.0)),
                        ("speed", score(9.0, 13.0)),
                        ("perimeterDefense", score(6.0, 12.0)),
                    ]),
                }),
            },
            AssessmentSubmission {
                assessed_on: date(2026, 1, 12),
                attributes: PlayerAttributes::from_iter([
                    ("shooting", score(7.0, 14.0)),
                    ("speed", score(10.0, 13.0)),
                    ("perimeterDefense", score(8.0, 12.0)),
                ]),
            },
        ),
    ]
}

/// Register the demo roster and record each follow-up assessment.
pub(crate) fn seed_demo_roster<R>(
    service: &RosterService<R>,
) -> Result<Vec<PlayerId>, RosterServiceError>
where
    R: PlayerRepository + 'static,
{
    let mut seeded = Vec::new();
    for (registration, follow_up) in demo_roster() {
        let record = service.register(registration)?;
        service.record_assessment(&record.profile.player_id, follow_up)?;
        seeded.push(record.profile.player_id);
    }
    info!(players = seeded.len(), "demo roster seeded");
    Ok(seeded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_roster_seeds_progressing_players() {
        let service = RosterService::new(
            Arc::new(InMemoryPlayerRepository::default()),
            Arc::new(AttributeCatalog::standard()),
        );

        let ids = seed_demo_roster(&service).expect("seeded");

        assert_eq!(ids.len(), 3);
        for id in &ids {
            let progress = service.progress(id).expect("progress");
            assert_eq!(progress.len(), 2);
            assert!(progress[1].rating_change.is_some_and(|delta| delta > 0));
        }
    }

    #[test]
    fn default_development_config_uses_standard_catalog() {
        let config = DevelopmentConfig {
            catalog_path: None,
            seed_demo_roster: false,
        };

        let catalog = load_catalog(&config).expect("catalog loads");
        assert!(catalog.undefined_weighted_ids().is_empty());
        assert!(catalog.definition("shooting").is_some());
    }

    #[test]
    fn missing_catalog_file_is_reported() {
        let config = DevelopmentConfig {
            catalog_path: Some("does/not/exist.json".into()),
            seed_demo_roster: false,
        };

        assert!(matches!(load_catalog(&config), Err(CatalogError::Io(_))));
    }
}
