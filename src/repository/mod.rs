use async_trait::async_trait;
use uuid::Uuid;

use crate::structs::person::{NewPerson, Person};

pub use memory::InMemoryPersonRepository;
pub use mongo::MongoPersonRepository;

mod memory;
mod mongo;

/// Upper bound on the persons returned by a single term search.
pub const SEARCH_LIMIT: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("nickname already taken")]
    DuplicateNickname,
    #[error("person not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Assigns a fresh id and persists the person.
    async fn save(&self, person: &NewPerson) -> Result<Person, RepositoryError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Person, RepositoryError>;
    /// Case-insensitive substring match over name, nickname and stack,
    /// capped at [`SEARCH_LIMIT`]. An empty term matches nothing.
    async fn search_by_term(&self, term: &str) -> Result<Vec<Person>, RepositoryError>;
    async fn count(&self) -> Result<u64, RepositoryError>;
}
