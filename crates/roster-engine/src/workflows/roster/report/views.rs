use super::super::domain::{DoctorStatus, Period, Site, VACANT};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarCell {
    Assigned(String),
    Vacant,
    /// The shift does not run on this date (weekend catalog).
    NotRostered,
}

impl CalendarCell {
    pub fn label(&self) -> &str {
        match self {
            Self::Assigned(name) => name,
            Self::Vacant => VACANT,
            Self::NotRostered => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarRow {
    pub date: NaiveDate,
    pub cells: Vec<CalendarCell>,
}

/// Dates down, shift names across (sorted), one cell per pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarView {
    pub shift_names: Vec<&'static str>,
    pub rows: Vec<CalendarRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoctorShiftEntry {
    pub date: NaiveDate,
    pub shift_name: &'static str,
    pub site: Site,
    pub site_label: &'static str,
    pub period: Period,
    pub period_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoctorSchedule {
    pub doctor_id: String,
    pub name: String,
    pub status: DoctorStatus,
    pub status_label: &'static str,
    pub shifts: Vec<DoctorShiftEntry>,
    pub total_shifts: usize,
    pub penalty_points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoctorSummaryEntry {
    pub doctor_id: String,
    pub name: String,
    pub eft: f64,
    pub total_shifts: usize,
    pub penalty_points: u32,
    pub average_penalty: f64,
    pub undesirable_shifts: usize,
    pub eft_utilization_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterStatistics {
    pub total_shifts: usize,
    pub assigned_shifts: usize,
    pub vacant_shifts: usize,
    pub coverage_rate: String,
    pub average_penalty_points: f64,
    pub max_penalty_points: u32,
    pub min_penalty_points: u32,
    pub total_doctors: usize,
    pub active_doctors: usize,
}

impl RosterStatistics {
    /// Coverage as a number, for callers that need to compare it.
    pub fn coverage_pct(&self) -> f64 {
        if self.total_shifts == 0 {
            0.0
        } else {
            self.assigned_shifts as f64 / self.total_shifts as f64 * 100.0
        }
    }
}
