use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// What kind of account is logged in. Written lowercase, read in any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Dentist,
    Clinic,
    Other,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Dentist => "dentist",
            Role::Clinic => "clinic",
            Role::Other => "other",
        };
        f.write_str(s)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dentist" => Ok(Role::Dentist),
            "clinic" => Ok(Role::Clinic),
            "other" => Ok(Role::Other),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Fields written by other clients that this crate does not model. Kept so a
/// load-then-save cycle does not drop them.
pub type Extra = Map<String, Value>;

/// The authenticated user. Authentication itself happens elsewhere; whatever the
/// login view hands over is stored as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_in_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Session {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            role,
            token: None,
            logged_in_at: None,
            extra: Extra::new(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn stamped(mut self, at: DateTime<Utc>) -> Self {
        self.logged_in_at = Some(at);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
    /// Assigned by the backing store; not checked for uniqueness here.
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// ISO date, e.g. `1980-04-12`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl PatientSummary {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: None,
            phone: None,
            birth_date: None,
            fiscal_code: None,
            notes: None,
            extra: Extra::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Unique device identifier, for implants and other traced devices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub udi: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ProductSummary {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            sku: None,
            category: None,
            quantity: None,
            unit: None,
            udi: None,
            extra: Extra::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Dentist).unwrap();
        assert_eq!(json, "\"dentist\"");
        let parsed: Role = serde_json::from_str("\"clinic\"").unwrap();
        assert_eq!(parsed, Role::Clinic);
    }

    #[test]
    fn role_reads_any_case_from_json() {
        let parsed: Role = serde_json::from_str("\"Dentist\"").unwrap();
        assert_eq!(parsed, Role::Dentist);
        assert!(serde_json::from_str::<Role>("\"nurse\"").is_err());
    }

    #[test]
    fn role_from_str_ignores_case() {
        assert_eq!("Dentist".parse::<Role>().unwrap(), Role::Dentist);
        assert!("nurse".parse::<Role>().is_err());
    }

    #[test]
    fn session_uses_camel_case_and_omits_missing_token() {
        let session = Session::new("u1", "a@b.com", Role::Dentist);
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["userId"], "u1");
        assert!(value.get("token").is_none());
        assert!(value.get("loggedInAt").is_none());
    }

    #[test]
    fn patient_reads_minimal_record() {
        let patient: PatientSummary =
            serde_json::from_str(r#"{"id":1,"name":"Mario Rossi"}"#).unwrap();
        assert_eq!(patient, PatientSummary::new(1, "Mario Rossi"));
    }

    #[test]
    fn patient_keeps_unknown_fields() {
        let raw = r#"{"id":1,"name":"Mario Rossi","address":"Via Roma 1","gender":"M"}"#;
        let patient: PatientSummary = serde_json::from_str(raw).unwrap();
        assert_eq!(patient.extra["address"], "Via Roma 1");
        assert!(patient.email.is_none());

        let value = serde_json::to_value(&patient).unwrap();
        assert_eq!(value["gender"], "M");
        assert!(value.get("extra").is_none());
    }

    #[test]
    fn product_keeps_udi() {
        let mut product = ProductSummary::new(7, "Implant 4.1mm");
        product.udi = Some("(01)08056297890123(17)270101".to_string());
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["udi"], "(01)08056297890123(17)270101");
        assert!(value.get("sku").is_none());
    }
}
