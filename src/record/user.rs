//! # User Records
//!
//! The concrete record type handed in by query and report handlers.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::field::FieldValue;
use super::IndexedRecord;

/// Access role assigned to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Editor => "Editor",
            Role::Viewer => "Viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// Salary bands used by index reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SalaryBand {
    /// Below 60k
    Entry,
    /// 60k up to 80k
    Mid,
    /// 80k up to 100k
    Senior,
    /// 100k and above
    Executive,
}

impl SalaryBand {
    /// Classify a salary. Lower bounds are inclusive.
    pub fn classify(salary: f64) -> Self {
        if salary < 60_000.0 {
            SalaryBand::Entry
        } else if salary < 80_000.0 {
            SalaryBand::Mid
        } else if salary < 100_000.0 {
            SalaryBand::Senior
        } else {
            SalaryBand::Executive
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            SalaryBand::Entry => "Entry Level (<$60k)",
            SalaryBand::Mid => "Mid Level ($60k-$80k)",
            SalaryBand::Senior => "Senior Level ($80k-$100k)",
            SalaryBand::Executive => "Executive Level ($100k+)",
        }
    }
}

impl fmt::Display for SalaryBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// User record
///
/// `id` is the identity field and is never rewritten by this crate.
/// Fields not modelled explicitly travel in `attributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier
    pub id: i64,

    pub username: String,

    pub full_name: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub gender: Option<Gender>,

    /// Secondary ordering used when building an index
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub date_of_birth: Option<NaiveDate>,

    pub salary: f64,

    #[serde(default)]
    pub is_top_performer: bool,

    #[serde(rename = "userRole", skip_serializing_if = "Option::is_none", default)]
    pub role: Option<Role>,

    /// Any other fields supplied by the caller
    #[serde(flatten)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl User {
    /// Create a user with the required fields; the rest default to empty.
    pub fn new(id: i64, username: impl Into<String>, salary: f64) -> Self {
        let username = username.into();
        Self {
            id,
            full_name: username.clone(),
            username,
            gender: None,
            date_of_birth: None,
            salary,
            is_top_performer: false,
            role: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        self
    }

    pub fn with_birth_date(mut self, date: NaiveDate) -> Self {
        self.date_of_birth = Some(date);
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Salary band this user falls into
    pub fn salary_band(&self) -> SalaryBand {
        SalaryBand::classify(self.salary)
    }
}

impl IndexedRecord for User {
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }

    fn chronology(&self) -> Option<NaiveDate> {
        self.date_of_birth
    }

    /// Accepts both the serialized camelCase names and snake_case.
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::from_int(self.id)),
            "username" => Some(FieldValue::from_text(self.username.as_str())),
            "fullName" | "full_name" => Some(FieldValue::from_text(self.full_name.as_str())),
            "gender" => self.gender.map(|g| FieldValue::from_text(g.as_str())),
            "dateOfBirth" | "date_of_birth" => self.date_of_birth.map(FieldValue::from_date),
            "salary" => Some(FieldValue::from_float(self.salary)),
            "isTopPerformer" | "is_top_performer" => {
                Some(FieldValue::from_bool(self.is_top_performer))
            }
            "userRole" | "role" => self.role.map(|r| FieldValue::from_text(r.as_str())),
            other => self.attributes.get(other).and_then(FieldValue::from_json),
        }
    }
}
