use super::gender::Gender;
use crate::errors::{AppError, AppResult};
use chrono::Local;
use serde::Serialize;

pub const MIN_AGE: i64 = 5;
pub const MAX_AGE: i64 = 25;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Student {
    pub id: i64,
    pub teacher_id: i64,
    pub name: String,
    pub roll_number: String, // ⇔ students.roll_number, UNIQUE(teacher_id, roll_number)
    pub class: String,
    pub section: String,
    pub age: i64,
    pub gender: Gender,
    pub photo: String,
    pub created_at: String,
}

/// Validated input for a new roster entry.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub name: String,
    pub roll_number: String,
    pub class: String,
    pub section: String,
    pub age: i64,
    pub gender: Gender,
    pub photo: String,
    pub created_at: String,
}

impl NewStudent {
    /// Build and validate a student. Text fields are trimmed; an empty
    /// photo falls back to `default_photo`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        roll_number: &str,
        class: &str,
        section: &str,
        age: i64,
        gender: &str,
        photo: Option<&str>,
        default_photo: &str,
    ) -> AppResult<Self> {
        let photo = photo
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(default_photo)
            .to_string();

        let st = Self {
            name: required("name", name)?,
            roll_number: required("roll number", roll_number)?,
            class: required("class", class)?,
            section: required("section", section)?,
            age: check_age(age)?,
            gender: Gender::parse(gender)?,
            photo,
            created_at: Local::now().to_rfc3339(),
        };
        Ok(st)
    }
}

/// Partial update for an existing student; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub roll_number: Option<String>,
    pub class: Option<String>,
    pub section: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub photo: Option<String>,
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.roll_number.is_none()
            && self.class.is_none()
            && self.section.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.photo.is_none()
    }

    /// Apply the patch on a copy of `current`, validating every changed field.
    pub fn apply_to(&self, current: &Student) -> AppResult<Student> {
        let mut st = current.clone();

        if let Some(v) = &self.name {
            st.name = required("name", v)?;
        }
        if let Some(v) = &self.roll_number {
            st.roll_number = required("roll number", v)?;
        }
        if let Some(v) = &self.class {
            st.class = required("class", v)?;
        }
        if let Some(v) = &self.section {
            st.section = required("section", v)?;
        }
        if let Some(v) = self.age {
            st.age = check_age(v)?;
        }
        if let Some(v) = &self.gender {
            st.gender = Gender::parse(v)?;
        }
        if let Some(v) = &self.photo {
            st.photo = required("photo", v)?;
        }

        Ok(st)
    }
}

fn required(field: &str, value: &str) -> AppResult<String> {
    let v = value.trim();
    if v.is_empty() {
        return Err(AppError::Validation(format!("{} must not be empty", field)));
    }
    Ok(v.to_string())
}

fn check_age(age: i64) -> AppResult<i64> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(AppError::Validation(format!(
            "age {} out of range ({}-{})",
            age, MIN_AGE, MAX_AGE
        )));
    }
    Ok(age)
}
