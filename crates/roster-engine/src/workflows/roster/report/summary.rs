use super::super::domain::{Doctor, DoctorStatus};
use super::super::engine::RosterRun;
use super::views::{
    CalendarCell, CalendarRow, CalendarView, DoctorSchedule, DoctorShiftEntry,
    DoctorSummaryEntry, RosterStatistics,
};
use std::collections::BTreeSet;

const SHIFT_HOURS: f64 = 10.0;
const WEEKLY_HOURS_PER_EFT: f64 = 40.0;

/// Read-only views over a finished run. Every method recomputes from the
/// run, so calling one twice yields the same value.
#[derive(Debug, Clone, Copy)]
pub struct RosterReport<'a> {
    run: &'a RosterRun,
}

impl RosterRun {
    pub fn report(&self) -> RosterReport<'_> {
        RosterReport { run: self }
    }
}

impl RosterReport<'_> {
    pub fn calendar_view(&self) -> CalendarView {
        let assignments = self.run.assignments();
        let shift_names: Vec<&'static str> = assignments
            .days()
            .flat_map(|day| day.slots.iter().map(|entry| entry.slot.name))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let rows = assignments
            .days()
            .map(|day| CalendarRow {
                date: day.date,
                cells: shift_names
                    .iter()
                    .map(|shift_name| match day.get(shift_name) {
                        Some(assignee) if assignee.is_vacant() => CalendarCell::Vacant,
                        Some(assignee) => {
                            CalendarCell::Assigned(assignee.display_name().to_string())
                        }
                        None => CalendarCell::NotRostered,
                    })
                    .collect(),
            })
            .collect();

        CalendarView { shift_names, rows }
    }

    pub fn doctor_schedules(&self) -> Vec<DoctorSchedule> {
        self.run
            .doctors()
            .iter()
            .map(|doctor| self.schedule_for(doctor))
            .collect()
    }

    pub fn doctor_summary(&self) -> Vec<DoctorSummaryEntry> {
        let weeks = f64::from(self.run.plan().weeks());
        let mut entries: Vec<DoctorSummaryEntry> = self
            .run
            .doctors()
            .iter()
            .map(|doctor| {
                let schedule = self.schedule_for(doctor);
                let undesirable_shifts = self
                    .run
                    .assignments()
                    .days()
                    .flat_map(|day| day.slots.iter())
                    .filter(|entry| entry.assignee.doctor_id() == Some(doctor.id.as_str()))
                    .filter(|entry| entry.slot.is_undesirable())
                    .count();

                let average_penalty = if schedule.total_shifts == 0 {
                    0.0
                } else {
                    f64::from(schedule.penalty_points) / schedule.total_shifts as f64
                };

                let contracted_hours = doctor.eft * WEEKLY_HOURS_PER_EFT * weeks;
                let eft_utilization_pct = if contracted_hours > 0.0 {
                    round_to(
                        schedule.total_shifts as f64 * SHIFT_HOURS / contracted_hours * 100.0,
                        1,
                    )
                } else {
                    0.0
                };

                DoctorSummaryEntry {
                    doctor_id: schedule.doctor_id,
                    name: schedule.name,
                    eft: doctor.eft,
                    total_shifts: schedule.total_shifts,
                    penalty_points: schedule.penalty_points,
                    average_penalty: round_to(average_penalty, 2),
                    undesirable_shifts,
                    eft_utilization_pct,
                }
            })
            .collect();

        // Stable: equal counts keep configuration order.
        entries.sort_by(|a, b| b.total_shifts.cmp(&a.total_shifts));
        entries
    }

    pub fn statistics(&self) -> RosterStatistics {
        let assignments = self.run.assignments();
        let total_shifts = assignments.slot_count();
        let vacant_shifts: usize = assignments.days().map(|day| day.vacant_count()).sum();
        let assigned_shifts = total_shifts - vacant_shifts;

        // The ledger holds every catalog doctor, idle ones at zero.
        let ledger = self.run.ledger();
        let totals: Vec<u32> = ledger.iter().map(|(_, points)| points).collect();
        let average_penalty_points = if ledger.is_empty() {
            0.0
        } else {
            round_to(
                totals.iter().map(|points| f64::from(*points)).sum::<f64>() / ledger.len() as f64,
                2,
            )
        };

        let mut statistics = RosterStatistics {
            total_shifts,
            assigned_shifts,
            vacant_shifts,
            coverage_rate: String::new(),
            average_penalty_points,
            max_penalty_points: totals.iter().copied().max().unwrap_or(0),
            min_penalty_points: totals.iter().copied().min().unwrap_or(0),
            total_doctors: self.run.doctors().len(),
            active_doctors: self
                .run
                .doctors()
                .iter()
                .filter(|doctor| doctor.status == DoctorStatus::Active)
                .count(),
        };
        statistics.coverage_rate = format!("{:.1}%", statistics.coverage_pct());
        statistics
    }

    fn schedule_for(&self, doctor: &Doctor) -> DoctorSchedule {
        let shifts: Vec<DoctorShiftEntry> = self
            .run
            .assignments()
            .days()
            .flat_map(|day| day.slots.iter().map(move |entry| (day.date, entry)))
            .filter(|(_, entry)| entry.assignee.doctor_id() == Some(doctor.id.as_str()))
            .map(|(date, entry)| DoctorShiftEntry {
                date,
                shift_name: entry.slot.name,
                site: entry.slot.site,
                site_label: entry.slot.site.label(),
                period: entry.slot.period,
                period_label: entry.slot.period.label(),
            })
            .collect();

        DoctorSchedule {
            doctor_id: doctor.id.clone(),
            name: doctor.name.clone(),
            status: doctor.status,
            status_label: doctor.status.label(),
            total_shifts: shifts.len(),
            shifts,
            penalty_points: self.run.ledger().points(&doctor.id),
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
