use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{FindOptions, IndexOptions};
use mongodb::{bson, bson::doc, Collection, Database, IndexModel};
use uuid::Uuid;

use super::{PersonRepository, RepositoryError, SEARCH_LIMIT};
use crate::structs::person::{NewPerson, Person, PersonDocument};

const DUPLICATE_KEY: i32 = 11000;

impl From<mongodb::error::Error> for RepositoryError {
    fn from(error: mongodb::error::Error) -> Self {
        match error.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write_error))
                if write_error.code == DUPLICATE_KEY =>
            {
                RepositoryError::DuplicateNickname
            }
            _ => RepositoryError::StoreUnavailable(error.to_string()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MongoPersonRepository {
    persons: Collection<PersonDocument>,
}

impl MongoPersonRepository {
    /// Binds to `collection_name` and makes sure its indexes exist.
    pub async fn new(database: &Database, collection_name: &str) -> Result<Self, RepositoryError> {
        let persons = database.collection::<PersonDocument>(collection_name);

        let indexes = [
            IndexModel::builder()
                .keys(doc! { "nickname": 1 })
                .options(
                    IndexOptions::builder()
                        .name(String::from("persons_nickname_unique"))
                        .unique(true)
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "searchable": 1 })
                .options(
                    IndexOptions::builder()
                        .name(String::from("persons_searchable"))
                        .build(),
                )
                .build(),
        ];
        persons.create_indexes(indexes, None).await?;

        Ok(Self { persons })
    }
}

#[async_trait]
impl PersonRepository for MongoPersonRepository {
    #[tracing::instrument(name = "mongo.save", skip(self, person), fields(nickname = %person.nickname))]
    async fn save(&self, person: &NewPerson) -> Result<Person, RepositoryError> {
        let person = person.clone().into_person(Uuid::new_v4());
        self.persons
            .insert_one(PersonDocument::from(&person), None)
            .await?;
        Ok(person)
    }

    #[tracing::instrument(name = "mongo.get_by_id", skip(self))]
    async fn get_by_id(&self, id: Uuid) -> Result<Person, RepositoryError> {
        self.persons
            .find_one(doc! { "_id": bson::Uuid::from(id) }, None)
            .await?
            .map(Person::from)
            .ok_or(RepositoryError::NotFound)
    }

    #[tracing::instrument(name = "mongo.search_by_term", skip(self))]
    async fn search_by_term(&self, term: &str) -> Result<Vec<Person>, RepositoryError> {
        if term.is_empty() {
            return Ok(vec![]);
        }

        // Unanchored, so this scans `searchable` in full; lower-casing both sides
        // stands in for the `i` flag.
        let pattern = regex::escape(&term.to_lowercase());
        let options = FindOptions::builder().limit(SEARCH_LIMIT as i64).build();
        let cursor = self
            .persons
            .find(
                doc! {
                    "searchable": bson::Regex {
                        pattern,
                        options: String::new(),
                    }
                },
                options,
            )
            .await?;

        let found: Vec<PersonDocument> = cursor.try_collect().await?;
        Ok(found.into_iter().map(Person::from).collect())
    }

    #[tracing::instrument(name = "mongo.count", skip(self))]
    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(self.persons.count_documents(None, None).await?)
    }
}
