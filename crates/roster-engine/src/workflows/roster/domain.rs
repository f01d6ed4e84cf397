use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Sentinel written into reports for a slot nobody could take.
pub const VACANT: &str = "VACANT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Site {
    Main,
    Satellite,
}

impl Site {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Main => "Frankston",
            Self::Satellite => "Rosebud",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "PM")]
    Pm,
}

impl Period {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

/// One assignable unit of work, built once from the fixed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ShiftSlot {
    pub name: &'static str,
    pub site: Site,
    pub period: Period,
    pub is_leadership: bool,
}

impl ShiftSlot {
    pub(crate) const fn new(
        name: &'static str,
        site: Site,
        period: Period,
        is_leadership: bool,
    ) -> Self {
        Self {
            name,
            site,
            period,
            is_leadership,
        }
    }

    /// Leadership roles and the satellite evening shift.
    pub fn is_undesirable(&self) -> bool {
        self.is_leadership || (self.site == Site::Satellite && self.period == Period::Pm)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoctorStatus {
    #[default]
    Active,
    Inactive,
    OnLeave,
}

impl DoctorStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::OnLeave => "On Leave",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub eft: f64,
    pub rosebud_preference: i8,
    pub unavailable_dates: BTreeSet<NaiveDate>,
    pub status: DoctorStatus,
    pub email: String,
    pub phone: String,
    pub specialization: String,
}

impl Doctor {
    /// Active doctor with no unavailability; loader-validated fields are assumed.
    pub fn new(id: impl Into<String>, name: impl Into<String>, eft: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            eft,
            rosebud_preference: 0,
            unavailable_dates: BTreeSet::new(),
            status: DoctorStatus::Active,
            email: String::new(),
            phone: String::new(),
            specialization: String::new(),
        }
    }

    pub fn with_rosebud_preference(mut self, preference: i8) -> Self {
        self.rosebud_preference = preference;
        self
    }

    pub fn with_status(mut self, status: DoctorStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_unavailable_date(mut self, date: NaiveDate) -> Self {
        self.unavailable_dates.insert(date);
        self
    }

    pub fn is_available_on(&self, date: NaiveDate) -> bool {
        self.status == DoctorStatus::Active && !self.unavailable_dates.contains(&date)
    }
}

/// Fatal input problems, raised before any assignment work begins.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("invalid start date '{value}': expected YYYY-MM-DD")]
    InvalidStartDate { value: String },
    #[error("weeks must be a positive integer (got '{value}')")]
    InvalidWeeks { value: String },
    #[error("doctor configuration must be a JSON object keyed by doctor id")]
    MalformedCatalog,
    #[error("doctor '{key}' has missing or invalid fields: {source}")]
    InvalidDoctor {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("doctor '{key}' has eft {eft}; expected a value in (0, 1]")]
    InvalidEft { key: String, eft: f64 },
    #[error("doctor '{key}' has rosebud_preference {value}; expected -2..=2")]
    InvalidPreference { key: String, value: i64 },
    #[error("doctor '{key}' lists unavailable date '{value}' which is not YYYY-MM-DD")]
    InvalidUnavailableDate { key: String, value: String },
    #[error("doctor name '{name}' is used by more than one doctor")]
    DuplicateDoctorName { name: String },
    #[error("failed to read doctor configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("doctor configuration is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Report(#[from] super::report::ReportError),
}
