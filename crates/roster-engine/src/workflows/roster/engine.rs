use super::catalog::required_shifts;
use super::domain::{Doctor, RosterError, ShiftSlot, VACANT};
use super::penalty::penalty;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info};

/// Validated horizon: `weeks * 7` consecutive days from `start_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RosterPlan {
    start_date: NaiveDate,
    weeks: u32,
    #[serde(skip)]
    day_count: u32,
}

impl RosterPlan {
    /// Rejects zero weeks and any horizon whose last day falls outside the calendar.
    pub fn new(start_date: NaiveDate, weeks: u32) -> Result<Self, RosterError> {
        let invalid = || RosterError::InvalidWeeks {
            value: weeks.to_string(),
        };

        let day_count = weeks
            .checked_mul(7)
            .filter(|days| *days > 0)
            .ok_or_else(invalid)?;
        start_date
            .checked_add_signed(Duration::days(i64::from(day_count) - 1))
            .ok_or_else(invalid)?;

        Ok(Self {
            start_date,
            weeks,
            day_count,
        })
    }

    /// Parses caller-supplied text, rejecting anything but `YYYY-MM-DD` and a positive integer.
    pub fn parse(start_date: &str, weeks: &str) -> Result<Self, RosterError> {
        let start = parse_start_date(start_date)?;
        let weeks = weeks
            .trim()
            .parse::<u32>()
            .map_err(|_| RosterError::InvalidWeeks {
                value: weeks.to_string(),
            })?;
        Self::new(start, weeks)
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn weeks(&self) -> u32 {
        self.weeks
    }

    pub fn day_count(&self) -> u32 {
        self.day_count
    }

    /// Last rostered day, inclusive.
    pub fn end_date(&self) -> NaiveDate {
        self.start_date + Duration::days(i64::from(self.day_count()) - 1)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.day_count()).map(move |offset| self.start_date + Duration::days(i64::from(offset)))
    }
}

pub fn parse_start_date(raw: &str) -> Result<NaiveDate, RosterError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| RosterError::InvalidStartDate {
        value: raw.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Assignee {
    Doctor { id: String, name: String },
    Vacant,
}

impl Assignee {
    /// Display value used by every report: the doctor's name or `VACANT`.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Doctor { name, .. } => name,
            Self::Vacant => VACANT,
        }
    }

    pub fn doctor_id(&self) -> Option<&str> {
        match self {
            Self::Doctor { id, .. } => Some(id),
            Self::Vacant => None,
        }
    }

    pub fn is_vacant(&self) -> bool {
        matches!(self, Self::Vacant)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotAssignment {
    pub slot: ShiftSlot,
    pub assignee: Assignee,
}

/// All slots required on one date, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayRoster {
    pub date: NaiveDate,
    pub slots: Vec<SlotAssignment>,
}

impl DayRoster {
    pub fn get(&self, shift_name: &str) -> Option<&Assignee> {
        self.slots
            .iter()
            .find(|entry| entry.slot.name == shift_name)
            .map(|entry| &entry.assignee)
    }

    pub fn vacant_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|entry| entry.assignee.is_vacant())
            .count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssignmentMap {
    days: BTreeMap<NaiveDate, DayRoster>,
}

impl AssignmentMap {
    pub fn day(&self, date: NaiveDate) -> Option<&DayRoster> {
        self.days.get(&date)
    }

    pub fn get(&self, date: NaiveDate, shift_name: &str) -> Option<&Assignee> {
        self.day(date).and_then(|day| day.get(shift_name))
    }

    /// Days in ascending date order.
    pub fn days(&self) -> impl Iterator<Item = &DayRoster> {
        self.days.values()
    }

    pub fn slot_count(&self) -> usize {
        self.days.values().map(|day| day.slots.len()).sum()
    }

    fn insert(&mut self, day: DayRoster) {
        self.days.insert(day.date, day);
    }
}

/// Running penalty totals. Only ever increases during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PenaltyLedger {
    totals: BTreeMap<String, u32>,
}

impl PenaltyLedger {
    pub fn for_doctors(doctors: &[Doctor]) -> Self {
        Self {
            totals: doctors.iter().map(|doctor| (doctor.id.clone(), 0)).collect(),
        }
    }

    pub fn points(&self, doctor_id: &str) -> u32 {
        self.totals.get(doctor_id).copied().unwrap_or(0)
    }

    pub fn charge(&mut self, doctor_id: &str, points: u32) {
        let total = self.totals.entry(doctor_id.to_string()).or_insert(0);
        *total = total.saturating_add(points);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.totals.iter().map(|(id, points)| (id.as_str(), *points))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Everything one generation owns: inputs, the assignment map and the ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterRun {
    plan: RosterPlan,
    doctors: Vec<Doctor>,
    assignments: AssignmentMap,
    ledger: PenaltyLedger,
}

impl RosterRun {
    pub fn plan(&self) -> &RosterPlan {
        &self.plan
    }

    /// Doctors in configuration order; also the tie-break order.
    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn assignments(&self) -> &AssignmentMap {
        &self.assignments
    }

    pub fn ledger(&self) -> &PenaltyLedger {
        &self.ledger
    }
}

/// Rosters every day of `plan`, oldest first.
///
/// Each slot goes to the available doctor with the lowest
/// `ledger + penalty`; ties go to whoever comes first in `doctors`.
/// Choices are never revisited, so an early pick can leave a later slot
/// `VACANT` even when another arrangement would have filled it.
pub fn generate(doctors: &[Doctor], plan: &RosterPlan) -> RosterRun {
    let mut assignments = AssignmentMap::default();
    let mut ledger = PenaltyLedger::for_doctors(doctors);

    for date in plan.dates() {
        let day = assign_day(date, doctors, &mut ledger);
        debug!(
            %date,
            filled = day.slots.len() - day.vacant_count(),
            vacant = day.vacant_count(),
            "rostered day"
        );
        assignments.insert(day);
    }

    let run = RosterRun {
        plan: *plan,
        doctors: doctors.to_vec(),
        assignments,
        ledger,
    };

    info!(
        start = %plan.start_date(),
        weeks = plan.weeks(),
        doctors = doctors.len(),
        slots = run.assignments.slot_count(),
        "roster generated"
    );

    run
}

fn assign_day(date: NaiveDate, doctors: &[Doctor], ledger: &mut PenaltyLedger) -> DayRoster {
    let weekday = date.weekday();
    let is_friday = weekday == Weekday::Fri;

    let available: Vec<&Doctor> = doctors
        .iter()
        .filter(|doctor| doctor.is_available_on(date))
        .collect();
    let mut assigned_today: HashSet<&str> = HashSet::new();

    let slots = required_shifts(weekday)
        .iter()
        .map(|slot| {
            let chosen = select_doctor(slot, &available, &assigned_today, ledger, is_friday);

            let assignee = match chosen {
                Some(doctor) => {
                    assigned_today.insert(doctor.id.as_str());
                    ledger.charge(&doctor.id, penalty(slot, doctor, is_friday));
                    Assignee::Doctor {
                        id: doctor.id.clone(),
                        name: doctor.name.clone(),
                    }
                }
                None => Assignee::Vacant,
            };

            SlotAssignment {
                slot: *slot,
                assignee,
            }
        })
        .collect();

    DayRoster { date, slots }
}

fn select_doctor<'a>(
    slot: &ShiftSlot,
    available: &[&'a Doctor],
    assigned_today: &HashSet<&str>,
    ledger: &PenaltyLedger,
    is_friday: bool,
) -> Option<&'a Doctor> {
    let mut best: Option<(&'a Doctor, u64)> = None;

    for doctor in available
        .iter()
        .copied()
        .filter(|doctor| !assigned_today.contains(doctor.id.as_str()))
    {
        let score =
            u64::from(ledger.points(&doctor.id)) + u64::from(penalty(slot, doctor, is_friday));
        // Strict comparison keeps the earliest doctor on ties.
        if best.map_or(true, |(_, best_score)| score < best_score) {
            best = Some((doctor, score));
        }
    }

    best.map(|(doctor, _)| doctor)
}
