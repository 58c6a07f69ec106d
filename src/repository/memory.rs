use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{PersonRepository, RepositoryError, SEARCH_LIMIT};
use crate::structs::person::{NewPerson, Person};

#[derive(Default)]
struct Persons {
    by_id: HashMap<Uuid, (Person, String)>,
    nicknames: HashSet<String>,
}

/// Process-local store with the same contract as the MongoDB one.
#[derive(Default)]
pub struct InMemoryPersonRepository {
    persons: RwLock<Persons>,
}

impl InMemoryPersonRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersonRepository for InMemoryPersonRepository {
    #[tracing::instrument(name = "memory.save", skip(self, person), fields(nickname = %person.nickname))]
    async fn save(&self, person: &NewPerson) -> Result<Person, RepositoryError> {
        let mut persons = self.persons.write().await;
        if !persons.nicknames.insert(person.nickname.clone()) {
            return Err(RepositoryError::DuplicateNickname);
        }

        let person = person.clone().into_person(Uuid::new_v4());
        let searchable = person.searchable_text();
        persons.by_id.insert(person.id, (person.clone(), searchable));
        Ok(person)
    }

    #[tracing::instrument(name = "memory.get_by_id", skip(self))]
    async fn get_by_id(&self, id: Uuid) -> Result<Person, RepositoryError> {
        self.persons
            .read()
            .await
            .by_id
            .get(&id)
            .map(|(person, _)| person.clone())
            .ok_or(RepositoryError::NotFound)
    }

    #[tracing::instrument(name = "memory.search_by_term", skip(self))]
    async fn search_by_term(&self, term: &str) -> Result<Vec<Person>, RepositoryError> {
        if term.is_empty() {
            return Ok(vec![]);
        }

        let term = term.to_lowercase();
        let persons = self.persons.read().await;
        Ok(persons
            .by_id
            .values()
            .filter(|(_, searchable)| searchable.contains(&term))
            .take(SEARCH_LIMIT)
            .map(|(person, _)| person.clone())
            .collect())
    }

    #[tracing::instrument(name = "memory.count", skip(self))]
    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(self.persons.read().await.by_id.len() as u64)
    }
}
