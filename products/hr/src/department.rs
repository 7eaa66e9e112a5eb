use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

const FIELD_CRITERIA: &[&str] = &[
    "Work Quality",
    "Safety Compliance",
    "Equipment Handling",
    "Teamwork",
    "Punctuality",
];

const PACKING_CRITERIA: &[&str] = &[
    "Packaging Speed",
    "Quality Control",
    "Attention to Detail",
    "Organization",
    "Safety Protocols",
];

const OFFICE_CRITERIA: &[&str] = &[
    "Communication Skills",
    "Technical Proficiency",
    "Problem Solving",
    "Time Management",
    "Professional Conduct",
];

/// Department an employee belongs to.
///
/// Names outside the known set are kept as [`Department::Other`] and carry
/// no evaluation criteria.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Department {
    Field,
    Packing,
    Office,
    Other(String),
}

impl Department {
    pub const KNOWN: [Department; 3] = [Department::Field, Department::Packing, Department::Office];

    pub fn as_str(&self) -> &str {
        match self {
            Department::Field => "Field",
            Department::Packing => "Packing",
            Department::Office => "Office",
            Department::Other(name) => name,
        }
    }

    /// Ordered criterion names scored for this department.
    pub fn criteria(&self) -> &'static [&'static str] {
        match self {
            Department::Field => FIELD_CRITERIA,
            Department::Packing => PACKING_CRITERIA,
            Department::Office => OFFICE_CRITERIA,
            Department::Other(_) => &[],
        }
    }

    pub fn has_criterion(&self, criterion: &str) -> bool {
        self.criteria().contains(&criterion)
    }
}

/// Criterion list for a raw department name; unknown names yield an empty list.
pub fn criteria_for(department: &str) -> &'static [&'static str] {
    Department::from(department).criteria()
}

impl From<&str> for Department {
    fn from(value: &str) -> Self {
        match value.trim() {
            "Field" => Department::Field,
            "Packing" => Department::Packing,
            "Office" => Department::Office,
            other => Department::Other(other.to_string()),
        }
    }
}

impl From<String> for Department {
    fn from(value: String) -> Self {
        Department::from(value.as_str())
    }
}

impl From<Department> for String {
    fn from(value: Department) -> Self {
        match value {
            Department::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Department {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Department::from(s))
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
