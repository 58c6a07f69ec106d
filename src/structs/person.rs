use chrono::NaiveDate;
use mongodb::bson;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person as stored and as served by `GET /persons/:id`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Person {
    pub id: Uuid,
    pub nickname: String,
    pub name: String,
    pub birth_date: NaiveDate,
    pub stack: Vec<String>,
}

/// A person that passed validation but has no id yet.
#[derive(Clone, Debug, PartialEq)]
pub struct NewPerson {
    pub nickname: String,
    pub name: String,
    pub birth_date: NaiveDate,
    pub stack: Vec<String>,
}

impl NewPerson {
    pub fn into_person(self, id: Uuid) -> Person {
        Person {
            id,
            nickname: self.nickname,
            name: self.name,
            birth_date: self.birth_date,
            stack: self.stack,
        }
    }
}

impl Person {
    /// Lower-cased name, nickname and stack entries, space separated.
    pub fn searchable_text(&self) -> String {
        let mut searchable = String::with_capacity(self.name.len() + self.nickname.len() + 16);
        searchable.push_str(&self.name);
        searchable.push(' ');
        searchable.push_str(&self.nickname);
        for tech in &self.stack {
            searchable.push(' ');
            searchable.push_str(tech);
        }
        searchable.to_lowercase()
    }
}

/// Collection layout; `searchable` is derived on insert and never read back
/// into the public model.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PersonDocument {
    #[serde(rename(serialize = "_id", deserialize = "_id"))]
    pub id: bson::Uuid,
    pub nickname: String,
    pub name: String,
    pub birth_date: NaiveDate,
    pub stack: Vec<String>,
    pub searchable: String,
}

impl From<&Person> for PersonDocument {
    fn from(person: &Person) -> Self {
        PersonDocument {
            id: bson::Uuid::from(person.id),
            nickname: person.nickname.clone(),
            name: person.name.clone(),
            birth_date: person.birth_date,
            stack: person.stack.clone(),
            searchable: person.searchable_text(),
        }
    }
}

impl From<PersonDocument> for Person {
    fn from(document: PersonDocument) -> Self {
        Person {
            id: document.id.into(),
            nickname: document.nickname,
            name: document.name,
            birth_date: document.birth_date,
            stack: document.stack,
        }
    }
}
