use super::views::{CalendarView, DoctorSchedule, DoctorSummaryEntry};
use super::ReportError;
use std::fmt::Write as _;

pub(crate) const CALENDAR_DATE_HEADER: &str = "Date";
pub(crate) const SUMMARY_HEADERS: [&str; 4] = [
    "Doctor",
    "Total Shifts",
    "Penalty Points",
    "Avg Penalty/Shift",
];

impl CalendarView {
    /// `Date,<shift>,...` then one row per date. Fields containing commas are quoted.
    pub fn to_csv(&self) -> Result<String, ReportError> {
        let mut writer = csv_writer();

        let mut header = Vec::with_capacity(self.shift_names.len() + 1);
        header.push(CALENDAR_DATE_HEADER);
        header.extend(self.shift_names.iter().copied());
        writer.write_record(&header)?;

        for row in &self.rows {
            let date = row.date.format("%Y-%m-%d").to_string();
            let mut record = Vec::with_capacity(row.cells.len() + 1);
            record.push(date.as_str());
            record.extend(row.cells.iter().map(|cell| cell.label()));
            writer.write_record(&record)?;
        }

        finish(writer)
    }
}

/// Free-text doctor view, one block per doctor separated by blank lines.
pub fn render_doctor_view(schedules: &[DoctorSchedule]) -> String {
    let mut out = String::new();

    for (index, schedule) in schedules.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }

        writeln!(out, "{}", schedule.name).expect("write doctor name");
        if schedule.shifts.is_empty() {
            out.push_str("  No shifts assigned\n");
        } else {
            for shift in &schedule.shifts {
                writeln!(
                    out,
                    "  {}  {}",
                    shift.date.format("%Y-%m-%d"),
                    shift.shift_name
                )
                .expect("write shift line");
            }
        }
        writeln!(
            out,
            "  Total shifts: {} | Penalty points: {}",
            schedule.total_shifts, schedule.penalty_points
        )
        .expect("write doctor totals");
    }

    out
}

pub fn doctor_summary_csv(entries: &[DoctorSummaryEntry]) -> Result<String, ReportError> {
    let mut writer = csv_writer();
    writer.write_record(SUMMARY_HEADERS)?;

    for entry in entries {
        writer.write_record([
            entry.name.clone(),
            entry.total_shifts.to_string(),
            entry.penalty_points.to_string(),
            format!("{:.2}", entry.average_penalty),
        ])?;
    }

    finish(writer)
}

fn csv_writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, ReportError> {
    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8(bytes)?)
}
