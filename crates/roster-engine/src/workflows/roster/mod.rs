//! Two-site doctor rostering with penalty-balanced greedy assignment.

pub mod catalog;
pub mod domain;
pub mod engine;
pub mod loader;
pub mod penalty;
pub mod report;
pub mod result;

pub use catalog::required_shifts;
pub use domain::{Doctor, DoctorStatus, Period, RosterError, ShiftSlot, Site, VACANT};
pub use engine::{
    generate, parse_start_date, AssignmentMap, Assignee, DayRoster, PenaltyLedger, RosterPlan,
    RosterRun, SlotAssignment,
};
pub use loader::DoctorCatalogLoader;
pub use penalty::penalty;
pub use report::{ReportError, RosterReport};
pub use result::{RosterOutputs, RosterRequest, RosterResult};
