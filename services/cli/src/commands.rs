use clap::{Args, ValueEnum};
use roster_engine::config::AppConfig;
use roster_engine::error::AppError;
use roster_engine::workflows::roster::report::render_doctor_view;
use roster_engine::workflows::roster::report::views::CalendarCell;
use roster_engine::workflows::roster::{
    generate, DoctorCatalogLoader, RosterError, RosterPlan, RosterResult, RosterRun,
};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct RosterArgs {
    /// Doctor catalog JSON (defaults to ROSTER_CONFIG_PATH)
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    /// Number of weeks to roster (defaults to ROSTER_DEFAULT_WEEKS)
    #[arg(long)]
    pub(crate) weeks: Option<String>,
    /// First rostered date (YYYY-MM-DD)
    #[arg(long)]
    pub(crate) start_date: String,
}

impl RosterArgs {
    fn execute(&self, config: &AppConfig) -> Result<RosterRun, RosterError> {
        let weeks = self
            .weeks
            .clone()
            .unwrap_or_else(|| config.roster.default_weeks.to_string());
        let plan = RosterPlan::parse(&self.start_date, &weeks)?;

        let path = self
            .config
            .as_deref()
            .unwrap_or(config.roster.config_path.as_path());
        info!(path = %path.display(), "loading doctor catalog");
        let doctors = DoctorCatalogLoader::from_path(path)?;

        Ok(generate(&doctors, &plan))
    }
}

#[derive(Args, Debug)]
pub(crate) struct GenerateArgs {
    #[command(flatten)]
    pub(crate) roster: RosterArgs,
    /// Pretty-print the result JSON
    #[arg(long)]
    pub(crate) pretty: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    #[command(flatten)]
    pub(crate) roster: RosterArgs,
    /// Which view to print after the statistics
    #[arg(long, value_enum, default_value_t = ReportView::All)]
    pub(crate) view: ReportView,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReportView {
    Calendar,
    Doctors,
    Summary,
    All,
}

impl ReportView {
    fn shows(self, view: ReportView) -> bool {
        self == ReportView::All || self == view
    }
}

/// Success JSON goes to stdout; a rejected input goes to stderr with a failing exit code.
pub(crate) fn run_generate(args: GenerateArgs, config: &AppConfig) -> Result<ExitCode, AppError> {
    let result = RosterResult::from_outcome(args.roster.execute(config));
    let body = if args.pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    }
    .map_err(RosterError::from)?;

    if result.success {
        println!("{body}");
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("{body}");
        Ok(ExitCode::FAILURE)
    }
}

pub(crate) fn run_report(args: ReportArgs, config: &AppConfig) -> Result<ExitCode, AppError> {
    let run = args.roster.execute(config)?;
    print!("{}", render_report(&run, args.view));
    Ok(ExitCode::SUCCESS)
}

fn render_report(run: &RosterRun, view: ReportView) -> String {
    let report = run.report();
    let stats = report.statistics();
    let mut out = String::new();

    writeln!(
        out,
        "Roster {} -> {} ({} weeks)",
        run.plan().start_date(),
        run.plan().end_date(),
        run.plan().weeks()
    )
    .expect("write horizon");
    writeln!(
        out,
        "Coverage: {}/{} shifts filled ({}), {} vacant",
        stats.assigned_shifts, stats.total_shifts, stats.coverage_rate, stats.vacant_shifts
    )
    .expect("write coverage");
    writeln!(
        out,
        "Penalty points: avg {:.2} | max {} | min {}",
        stats.average_penalty_points, stats.max_penalty_points, stats.min_penalty_points
    )
    .expect("write penalties");
    writeln!(
        out,
        "Doctors: {} active of {}",
        stats.active_doctors, stats.total_doctors
    )
    .expect("write doctor counts");

    if view.shows(ReportView::Calendar) {
        let calendar = report.calendar_view();
        out.push_str("\nCalendar\n");
        for row in &calendar.rows {
            writeln!(out, "{} ({})", row.date, row.date.format("%a")).expect("write date");
            for (shift, cell) in calendar.shift_names.iter().zip(&row.cells) {
                if *cell != CalendarCell::NotRostered {
                    writeln!(out, "  - {}: {}", shift, cell.label()).expect("write cell");
                }
            }
        }
    }

    if view.shows(ReportView::Doctors) {
        out.push_str("\nDoctor schedules\n");
        out.push_str(&render_doctor_view(&report.doctor_schedules()));
    }

    if view.shows(ReportView::Summary) {
        out.push_str("\nDoctor summary\n");
        for entry in report.doctor_summary() {
            writeln!(
                out,
                "- {}: {} shifts, {} points (avg {:.2}), {} undesirable, {:.1}% of EFT",
                entry.name,
                entry.total_shifts,
                entry.penalty_points,
                entry.average_penalty,
                entry.undesirable_shifts,
                entry.eft_utilization_pct
            )
            .expect("write summary line");
        }
    }

    out
}
