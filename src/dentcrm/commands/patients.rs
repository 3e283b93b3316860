use crate::commands::{clean, CmdMessage, CmdResult};
use crate::error::{CrmError, Result};
use crate::model::PatientSummary;
use crate::store::{RecordStore, StorageBackend};

/// A patient as entered in a form. `id` is normally left to the store.
#[derive(Debug, Clone, Default)]
pub struct PatientDraft {
    pub id: Option<i64>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<String>,
    pub fiscal_code: Option<String>,
    pub notes: Option<String>,
}

impl PatientDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

pub fn add<B: StorageBackend>(
    store: &mut RecordStore<B>,
    draft: PatientDraft,
) -> Result<CmdResult> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(CrmError::Api("Patient name cannot be empty".into()));
    }
    let birth_date = clean(draft.birth_date);
    if let Some(date) = &birth_date {
        chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            CrmError::Api(format!("Invalid birth date (want YYYY-MM-DD): {}", date))
        })?;
    }

    let snapshot = store.snapshot();
    let mut result = CmdResult::default();
    let id = match draft.id {
        Some(id) => {
            if snapshot.patients.find(id).is_some() {
                result.add_message(CmdMessage::warning(format!(
                    "Another patient already uses id {}",
                    id
                )));
            }
            id
        }
        None => snapshot
            .patients
            .next_id()
            .ok_or_else(|| CrmError::Api("No patient id left to assign".into()))?,
    };

    let patient = PatientSummary {
        id,
        name: name.to_string(),
        email: clean(draft.email),
        phone: clean(draft.phone),
        birth_date,
        fiscal_code: clean(draft.fiscal_code).map(|c| c.to_uppercase()),
        notes: clean(draft.notes),
        extra: Default::default(),
    };
    drop(snapshot);
    store.add_patient(patient.clone());

    result.add_message(CmdMessage::success(format!(
        "Patient added ({}): {}",
        patient.id, patient.name
    )));
    Ok(result.with_patients(vec![patient]))
}

pub fn list<B: StorageBackend>(
    store: &RecordStore<B>,
    search: Option<&str>,
) -> Result<CmdResult> {
    let snapshot = store.snapshot();
    let patients: Vec<PatientSummary> = match search {
        Some(term) => snapshot.patients.search(term).into_iter().cloned().collect(),
        None => snapshot.patients.as_slice().to_vec(),
    };

    let mut result = CmdResult::default();
    if patients.is_empty() {
        result.add_message(CmdMessage::info("No patients found."));
    }
    Ok(result.with_patients(patients))
}

pub fn show<B: StorageBackend>(store: &RecordStore<B>, id: i64) -> Result<CmdResult> {
    let patient = store
        .snapshot()
        .patients
        .find(id)
        .cloned()
        .ok_or(CrmError::NotFound { kind: "Patient", id })?;
    Ok(CmdResult::default().with_patients(vec![patient]))
}
