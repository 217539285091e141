use super::domain::{PlayerId, PlayerRecord};

/// Storage abstraction so the roster service can be exercised in isolation.
pub trait PlayerRepository: Send + Sync {
    fn insert(&self, record: PlayerRecord) -> Result<PlayerRecord, RepositoryError>;
    fn update(&self, record: PlayerRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &PlayerId) -> Result<Option<PlayerRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<PlayerRecord>, RepositoryError>;
    fn remove(&self, id: &PlayerId) -> Result<PlayerRecord, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
