use std::fmt;

use chrono::{Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::structs::api::{CreatePersonBody, Field};
use crate::structs::person::NewPerson;

pub const MAX_NICKNAME_CHARS: usize = 32;
pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_STACK_ENTRY_CHARS: usize = 32;
pub const MIN_BIRTH_YEAR: i32 = 1900;

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date pattern"));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersonField {
    Nickname,
    Name,
    BirthDate,
    Stack,
}

impl fmt::Display for PersonField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PersonField::Nickname => "nickname",
            PersonField::Name => "name",
            PersonField::BirthDate => "birth_date",
            PersonField::Stack => "stack",
        };
        f.write_str(name)
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing field `{0}`")]
    MissingField(PersonField),
    #[error("field `{0}` is too long")]
    FieldTooLong(PersonField),
    #[error("birth date is not formatted as YYYY-MM-DD")]
    MalformedDate,
    #[error("birth date is not a real date between 1900 and this year")]
    InvalidDate,
    #[error("stack entries must be non-null and at most 32 characters")]
    InvalidStackEntry,
}

/// Checks a creation payload against today's date.
pub fn validate_create(body: CreatePersonBody) -> Result<NewPerson, ValidationError> {
    validate_create_at(body, Utc::now().year())
}

pub fn validate_create_at(
    body: CreatePersonBody,
    current_year: i32,
) -> Result<NewPerson, ValidationError> {
    let nickname = required(body.nickname, PersonField::Nickname)?;
    let name = required(body.name, PersonField::Name)?;
    let birth_date = required(body.birth_date, PersonField::BirthDate)?;

    if exceeds(&nickname, MAX_NICKNAME_CHARS) {
        return Err(ValidationError::FieldTooLong(PersonField::Nickname));
    }
    if exceeds(&name, MAX_NAME_CHARS) {
        return Err(ValidationError::FieldTooLong(PersonField::Name));
    }

    let birth_date = parse_birth_date(&birth_date, current_year)?;

    let stack = match body.stack {
        Field::Absent | Field::Null => {
            return Err(ValidationError::MissingField(PersonField::Stack))
        }
        Field::Present(entries) => validate_stack(entries)?,
    };

    Ok(NewPerson {
        nickname,
        name,
        birth_date,
        stack,
    })
}

fn required(field: Field<String>, which: PersonField) -> Result<String, ValidationError> {
    field
        .into_option()
        .ok_or(ValidationError::MissingField(which))
}

/// Lengths are counted in code points, not bytes.
fn exceeds(value: &str, max_chars: usize) -> bool {
    value.chars().count() > max_chars
}

fn parse_birth_date(raw: &str, current_year: i32) -> Result<NaiveDate, ValidationError> {
    if !DATE_PATTERN.is_match(raw) {
        return Err(ValidationError::MalformedDate);
    }

    let date =
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate)?;

    if !(MIN_BIRTH_YEAR..=current_year).contains(&date.year()) {
        return Err(ValidationError::InvalidDate);
    }

    Ok(date)
}

fn validate_stack(entries: Vec<Option<String>>) -> Result<Vec<String>, ValidationError> {
    entries
        .into_iter()
        .map(|entry| match entry {
            Some(tech) if !exceeds(&tech, MAX_STACK_ENTRY_CHARS) => Ok(tech),
            _ => Err(ValidationError::InvalidStackEntry),
        })
        .collect()
}
