use serde::{Deserialize, Deserializer};

/// A JSON member that can be missing, explicitly `null`, or carry a value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Field<T> {
    #[default]
    Absent,
    Null,
    Present(T),
}

impl<T> Field<T> {
    /// Collapses `Absent` and `Null` into `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Present(value) => Some(value),
            Field::Absent | Field::Null => None,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Field::Present(value),
            None => Field::Null,
        }
    }
}

// Only reached when the member exists; `#[serde(default)]` supplies `Absent`.
impl<'de, T> Deserialize<'de> for Field<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Field::from)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreatePersonBody {
    #[serde(default, alias = "apelido")]
    pub nickname: Field<String>,
    #[serde(default, alias = "nome")]
    pub name: Field<String>,
    #[serde(default, alias = "nascimento")]
    pub birth_date: Field<String>,
    #[serde(default)]
    pub stack: Field<Vec<Option<String>>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchPersonQuery {
    #[serde(rename(deserialize = "t"))]
    pub search_term: String,
}
