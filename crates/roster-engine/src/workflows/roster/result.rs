use super::domain::RosterError;
use super::engine::{generate, RosterPlan, RosterRun};
use super::loader::DoctorCatalogLoader;
use super::report::views::RosterStatistics;
use super::report::{doctor_summary_csv, render_doctor_view};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterOutputs {
    pub calendar_view: String,
    pub doctor_view: String,
    pub doctor_summary: String,
}

/// `{success, outputs, statistics}` on success, `{success: false, error}` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<RosterOutputs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<RosterStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RosterResult {
    pub fn from_run(run: &RosterRun) -> Result<Self, RosterError> {
        let report = run.report();
        let outputs = RosterOutputs {
            calendar_view: report.calendar_view().to_csv()?,
            doctor_view: render_doctor_view(&report.doctor_schedules()),
            doctor_summary: doctor_summary_csv(&report.doctor_summary())?,
        };

        Ok(Self {
            success: true,
            outputs: Some(outputs),
            statistics: Some(report.statistics()),
            error: None,
        })
    }

    pub fn failure(err: &RosterError) -> Self {
        Self {
            success: false,
            outputs: None,
            statistics: None,
            error: Some(err.to_string()),
        }
    }

    /// Folds any fatal error into the tagged failure shape.
    pub fn from_outcome(outcome: Result<RosterRun, RosterError>) -> Self {
        match outcome.and_then(|run| Self::from_run(&run)) {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "roster generation rejected");
                Self::failure(&err)
            }
        }
    }
}

/// Loosely typed request as API-style callers send it.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterRequest {
    pub doctors: Value,
    pub start_date: String,
    pub weeks: Value,
}

impl RosterRequest {
    pub fn plan(&self) -> Result<RosterPlan, RosterError> {
        match &self.weeks {
            Value::Number(number) => {
                let weeks = number
                    .as_u64()
                    .and_then(|weeks| u32::try_from(weeks).ok())
                    .ok_or_else(|| RosterError::InvalidWeeks {
                        value: number.to_string(),
                    })?;
                RosterPlan::new(super::engine::parse_start_date(&self.start_date)?, weeks)
            }
            Value::String(raw) => RosterPlan::parse(&self.start_date, raw),
            other => Err(RosterError::InvalidWeeks {
                value: other.to_string(),
            }),
        }
    }

    /// Validates everything up front, then generates and renders.
    pub fn execute(&self) -> RosterResult {
        RosterResult::from_outcome(self.plan().and_then(|plan| {
            let doctors = DoctorCatalogLoader::from_value(&self.doctors)?;
            Ok(generate(&doctors, &plan))
        }))
    }
}
