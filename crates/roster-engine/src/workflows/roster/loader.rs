use super::domain::{Doctor, DoctorStatus, RosterError};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashSet};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Key wrapping the doctor map in the shared application config file.
const DOCTORS_KEY: &str = "DOCTORS";

#[derive(Debug, Deserialize)]
struct DoctorEntry {
    #[serde(default)]
    name: Option<String>,
    eft: f64,
    #[serde(default)]
    rosebud_preference: i64,
    #[serde(default)]
    unavailable_dates: Vec<String>,
    #[serde(default)]
    status: DoctorStatus,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    specialization: String,
}

pub struct DoctorCatalogLoader;

impl DoctorCatalogLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Doctor>, RosterError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Doctor>, RosterError> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(&value)
    }

    /// Accepts either the bare doctor map or one nested under `DOCTORS`.
    /// Entries keep file order, which is also the assignment tie-break order.
    pub fn from_value(value: &Value) -> Result<Vec<Doctor>, RosterError> {
        let root = value.as_object().ok_or(RosterError::MalformedCatalog)?;
        let entries = match root.get(DOCTORS_KEY) {
            Some(nested) => nested.as_object().ok_or(RosterError::MalformedCatalog)?,
            None => root,
        };

        doctors_from_map(entries)
    }
}

fn doctors_from_map(entries: &Map<String, Value>) -> Result<Vec<Doctor>, RosterError> {
    let mut doctors = Vec::with_capacity(entries.len());
    let mut names: HashSet<String> = HashSet::new();

    for (key, raw) in entries {
        if key.starts_with('_') {
            debug!(%key, "skipping metadata entry");
            continue;
        }

        let doctor = parse_doctor(key, raw)?;
        if !names.insert(doctor.name.clone()) {
            return Err(RosterError::DuplicateDoctorName { name: doctor.name });
        }
        doctors.push(doctor);
    }

    Ok(doctors)
}

fn parse_doctor(key: &str, raw: &Value) -> Result<Doctor, RosterError> {
    let entry: DoctorEntry =
        serde_json::from_value(raw.clone()).map_err(|source| RosterError::InvalidDoctor {
            key: key.to_string(),
            source,
        })?;

    if !(entry.eft > 0.0 && entry.eft <= 1.0) {
        return Err(RosterError::InvalidEft {
            key: key.to_string(),
            eft: entry.eft,
        });
    }

    let rosebud_preference = i8::try_from(entry.rosebud_preference)
        .ok()
        .filter(|value| (-2..=2).contains(value))
        .ok_or(RosterError::InvalidPreference {
            key: key.to_string(),
            value: entry.rosebud_preference,
        })?;

    let unavailable_dates = entry
        .unavailable_dates
        .iter()
        .map(|raw_date| {
            NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d").map_err(|_| {
                RosterError::InvalidUnavailableDate {
                    key: key.to_string(),
                    value: raw_date.clone(),
                }
            })
        })
        .collect::<Result<BTreeSet<_>, _>>()?;

    let name = entry
        .name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| key.to_string());

    Ok(Doctor {
        id: key.to_string(),
        name,
        eft: entry.eft,
        rosebud_preference,
        unavailable_dates,
        status: entry.status,
        email: entry.email,
        phone: entry.phone,
        specialization: entry.specialization,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    #[test]
    fn reads_nested_catalog_and_skips_metadata() {
        let raw = r#"{
            "DOCTORS": {
                "_comment": "rostering staff",
                "zhang": {"name": "Dr Zhang", "eft": 1.0, "rosebud_preference": 2},
                "adams": {"eft": 0.5, "status": "on_leave", "unavailable_dates": ["2025-01-08"]}
            },
            "SMTP": {"host": "localhost"}
        }"#;

        let doctors = DoctorCatalogLoader::from_reader(Cursor::new(raw)).expect("catalog loads");
        assert_eq!(doctors.len(), 2);
        assert_eq!(doctors[0].id, "zhang");
        assert_eq!(doctors[0].name, "Dr Zhang");
        assert_eq!(doctors[0].rosebud_preference, 2);
        assert_eq!(doctors[0].status, DoctorStatus::Active);
        assert_eq!(doctors[1].id, "adams");
        assert_eq!(doctors[1].name, "adams");
        assert_eq!(doctors[1].status, DoctorStatus::OnLeave);
        assert!(doctors[1]
            .unavailable_dates
            .contains(&NaiveDate::from_ymd_opt(2025, 1, 8).unwrap()));
    }

    #[test]
    fn preserves_file_order_for_bare_maps() {
        let value = json!({
            "zulu": {"eft": 1.0},
            "alpha": {"eft": 1.0},
            "mike": {"eft": 1.0}
        });

        let ids: Vec<String> = DoctorCatalogLoader::from_value(&value)
            .expect("catalog loads")
            .into_iter()
            .map(|doctor| doctor.id)
            .collect();
        assert_eq!(ids, vec!["zulu", "alpha", "mike"]);
    }

    #[test]
    fn missing_eft_is_fatal() {
        let value = json!({ "smith": {"name": "Dr Smith"} });
        let err = DoctorCatalogLoader::from_value(&value).expect_err("eft required");
        assert!(matches!(err, RosterError::InvalidDoctor { ref key, .. } if key == "smith"));
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let eft = json!({ "a": {"eft": 1.5} });
        assert!(matches!(
            DoctorCatalogLoader::from_value(&eft),
            Err(RosterError::InvalidEft { .. })
        ));

        let zero_eft = json!({ "a": {"eft": 0.0} });
        assert!(matches!(
            DoctorCatalogLoader::from_value(&zero_eft),
            Err(RosterError::InvalidEft { .. })
        ));

        let preference = json!({ "a": {"eft": 1.0, "rosebud_preference": 3} });
        assert!(matches!(
            DoctorCatalogLoader::from_value(&preference),
            Err(RosterError::InvalidPreference { value: 3, .. })
        ));

        let date = json!({ "a": {"eft": 1.0, "unavailable_dates": ["8 Jan"]} });
        assert!(matches!(
            DoctorCatalogLoader::from_value(&date),
            Err(RosterError::InvalidUnavailableDate { .. })
        ));

        let status = json!({ "a": {"eft": 1.0, "status": "retired"} });
        assert!(matches!(
            DoctorCatalogLoader::from_value(&status),
            Err(RosterError::InvalidDoctor { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_display_names() {
        let value = json!({
            "a": {"name": "Dr Lee", "eft": 1.0},
            "b": {"name": "Dr Lee", "eft": 0.8}
        });
        assert!(matches!(
            DoctorCatalogLoader::from_value(&value),
            Err(RosterError::DuplicateDoctorName { .. })
        ));
    }

    #[test]
    fn rejects_non_object_catalogs() {
        assert!(matches!(
            DoctorCatalogLoader::from_value(&json!(["a", "b"])),
            Err(RosterError::MalformedCatalog)
        ));
        assert!(matches!(
            DoctorCatalogLoader::from_value(&json!({ "DOCTORS": [] })),
            Err(RosterError::MalformedCatalog)
        ));
        assert!(matches!(
            DoctorCatalogLoader::from_reader(Cursor::new("{not json")),
            Err(RosterError::Json(_))
        ));
    }
}
