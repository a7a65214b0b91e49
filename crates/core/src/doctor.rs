//! Doctor feed records and their normalization
//!
//! The doctor feed is an untrusted JSON array. Every field of a feed entry is
//! optional and a few are typed inconsistently between records (ids arrive as
//! strings or numbers, fees as `"₹ 1,000"` or `500`). [`normalize`] is the only
//! place that inspects raw field presence; everything downstream works with
//! [`NormalizedDoctor`] and never re-checks the feed shape.

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::filter::ConsultationMode;
use crate::specialty::canonical_label;

/// Specialty assigned to doctors whose feed entry lists none
pub const DEFAULT_SPECIALTY: &str = "General Physician";

/// Doctor entry as it arrives from the feed
///
/// Every field reads leniently: a value of the wrong type is treated as
/// missing, so only the id and the name decide whether an entry is usable.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct RawDoctorRecord {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub name_initials: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub photo: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub doctor_introduction: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub specialities: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient")]
    pub fees: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub experience: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub languages: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient")]
    pub clinic: Option<RawClinic>,
    #[serde(deserialize_with = "lenient")]
    pub video_consult: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub in_clinic: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct RawClinic {
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub address: Option<RawAddress>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct RawAddress {
    #[serde(deserialize_with = "lenient")]
    pub locality: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub address_line1: Option<String>,
}

/// Read any JSON value and keep it only when it has the expected shape
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Clinic details after normalization
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub struct Clinic {
    pub name: String,
    /// Address locality, falling back to the city
    pub location: String,
    pub address_line: Option<String>,
}

/// Doctor record with every invariant the listing relies on
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct NormalizedDoctor {
    pub id: String,
    pub name: String,
    pub initials: Option<String>,
    pub photo: Option<String>,
    pub introduction: Option<String>,
    /// Never empty
    pub specialties: Vec<String>,
    pub primary_specialty: String,
    /// Digits only; empty when the feed carries no price
    pub fee: String,
    /// Experience text as published, e.g. "13 Years of experience"
    pub experience: Option<String>,
    pub experience_years: Option<f64>,
    pub languages: Vec<String>,
    pub consultation_mode: ConsultationMode,
    pub clinic: Clinic,
}

/// Reason a feed entry was left out of the batch
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MalformedRecord {
    #[error("entry is not a JSON object")]
    NotAnObject,

    #[error("entry has no id")]
    MissingId,

    #[error("doctor {0} has no name")]
    MissingName(String),

    #[error("doctor id {0} appears more than once")]
    DuplicateId(String),
}

/// Result of normalizing a whole feed
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    /// Accepted doctors, in feed order
    pub doctors: Vec<NormalizedDoctor>,
    pub skipped: Vec<MalformedRecord>,
}

fn currency_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[\p{Sc},\s]").expect("static currency pattern"))
}

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+(\.\d+)?").expect("static number pattern"))
}

/// Extract the first integer or decimal found anywhere in `text`
///
/// `"10 Years of experience"` yields `10.0`; text without digits yields `None`.
pub fn parse_leading_number(text: &str) -> Option<f64> {
    number_pattern()
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Strip currency symbols, thousands separators and whitespace from a fee
pub fn clean_fee(fee: &str) -> String {
    currency_pattern().replace_all(fee, "").into_owned()
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };

    (!text.is_empty()).then_some(text)
}

fn extract_languages(entries: Option<Vec<Value>>) -> Vec<String> {
    entries
        .unwrap_or_default()
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|language| !language.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn extract_specialties(entries: Option<&[Value]>) -> Vec<String> {
    let specialties: Vec<String> = entries
        .unwrap_or_default()
        .iter()
        .filter_map(|entry| entry.get("name").and_then(Value::as_str))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(canonical_label)
        .collect();

    if specialties.is_empty() {
        vec![DEFAULT_SPECIALTY.to_string()]
    } else {
        specialties
    }
}

fn normalize_clinic(raw: Option<RawClinic>) -> Clinic {
    let RawClinic { name, address } = raw.unwrap_or_default();
    let address = address.unwrap_or_default();

    let location = non_blank(address.locality)
        .or_else(|| non_blank(address.city))
        .unwrap_or_default();

    Clinic {
        name: non_blank(name).unwrap_or_default(),
        location,
        address_line: non_blank(address.address_line1),
    }
}

/// Normalize a single feed entry
///
/// Fails only when the entry cannot identify a doctor (no id or no name); every
/// other gap is filled with a documented default.
pub fn normalize(raw: RawDoctorRecord) -> Result<NormalizedDoctor, MalformedRecord> {
    let id = raw
        .id
        .as_ref()
        .and_then(scalar_text)
        .ok_or(MalformedRecord::MissingId)?;

    let name = non_blank(raw.name).ok_or_else(|| MalformedRecord::MissingName(id.clone()))?;

    let specialties = extract_specialties(raw.specialities.as_deref());
    let primary_specialty = specialties[0].clone();

    let fee = raw
        .fees
        .as_ref()
        .and_then(scalar_text)
        .map(|fee| clean_fee(&fee))
        .unwrap_or_default();

    let experience = raw.experience.as_ref().and_then(scalar_text);
    let experience_years = experience.as_deref().and_then(parse_leading_number);

    // Video wins when both flags are set; in clinic is also the fallback when neither is.
    let consultation_mode = if raw.video_consult == Some(true) {
        ConsultationMode::VideoConsult
    } else {
        ConsultationMode::InClinic
    };

    Ok(NormalizedDoctor {
        id,
        name,
        initials: non_blank(raw.name_initials),
        photo: non_blank(raw.photo),
        introduction: non_blank(raw.doctor_introduction),
        specialties,
        primary_specialty,
        fee,
        experience,
        experience_years,
        languages: extract_languages(raw.languages),
        consultation_mode,
        clinic: normalize_clinic(raw.clinic),
    })
}

/// Normalize every entry of a feed, skipping the ones that are malformed
///
/// Entries that are not objects, lack an id or a name, or repeat an id already
/// accepted are recorded in [`NormalizedBatch::skipped`]; the rest keep their
/// feed order.
pub fn normalize_batch(entries: Vec<Value>) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();
    let mut seen = HashSet::new();

    for entry in entries {
        if !entry.is_object() {
            batch.skipped.push(MalformedRecord::NotAnObject);
            continue;
        }

        // Every field is lenient, so an object always reads.
        let outcome = serde_json::from_value::<RawDoctorRecord>(entry)
            .map_err(|_| MalformedRecord::NotAnObject)
            .and_then(normalize);

        match outcome {
            Ok(doctor) if !seen.insert(doctor.id.clone()) => {
                batch.skipped.push(MalformedRecord::DuplicateId(doctor.id));
            }
            Ok(doctor) => batch.doctors.push(doctor),
            Err(reason) => batch.skipped.push(reason),
        }
    }

    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawDoctorRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_normalize_full_record() {
        let doctor = normalize(raw(json!({
            "id": "1",
            "name": "Dr. A",
            "specialities": [{"name": "cardiologist"}],
            "fees": "₹500",
            "experience": "10 Years",
            "video_consult": true,
            "in_clinic": false,
            "clinic": {"address": {"locality": "X", "city": "Y"}}
        })))
        .unwrap();

        assert_eq!(doctor.specialties, vec!["Cardiologist"]);
        assert_eq!(doctor.primary_specialty, "Cardiologist");
        assert_eq!(doctor.fee, "500");
        assert_eq!(doctor.consultation_mode, ConsultationMode::VideoConsult);
        assert_eq!(doctor.clinic.location, "X");
        assert_eq!(doctor.experience_years, Some(10.0));
    }

    #[test]
    fn test_normalize_defaults_specialty() {
        let missing = normalize(raw(json!({"id": "1", "name": "Dr. A"}))).unwrap();
        let empty = normalize(raw(json!({"id": "2", "name": "Dr. B", "specialities": []}))).unwrap();
        let blank = normalize(raw(json!({
            "id": "3",
            "name": "Dr. C",
            "specialities": [{"name": "  "}, {"name": 42}, {}, null]
        })))
        .unwrap();

        for doctor in [missing, empty, blank] {
            assert_eq!(doctor.specialties, vec![DEFAULT_SPECIALTY]);
            assert_eq!(doctor.primary_specialty, DEFAULT_SPECIALTY);
        }
    }

    #[test]
    fn test_normalize_specialty_casing() {
        let doctor = normalize(raw(json!({
            "id": "1",
            "name": "Dr. A",
            "specialities": [{"name": " DENTIST "}, {"name": "dietitian-Nutritionist"}, {"name": "ENT"}]
        })))
        .unwrap();

        assert_eq!(
            doctor.specialties,
            vec!["Dentist", "Dietitian-nutritionist", "Ent"]
        );
        assert_eq!(doctor.primary_specialty, "Dentist");
    }

    #[test]
    fn test_clean_fee() {
        assert_eq!(clean_fee("₹ 1,500"), "1500");
        assert_eq!(clean_fee("$ 20"), "20");
        assert_eq!(clean_fee("€1 000"), "1000");
        assert_eq!(clean_fee("700"), "700");
        assert_eq!(clean_fee(""), "");
    }

    #[test]
    fn test_normalize_numeric_fee_and_missing_fee() {
        let numeric = normalize(raw(json!({"id": 1, "name": "Dr. A", "fees": 450}))).unwrap();
        assert_eq!(numeric.id, "1");
        assert_eq!(numeric.fee, "450");

        let missing = normalize(raw(json!({"id": 2, "name": "Dr. B"}))).unwrap();
        assert_eq!(missing.fee, "");
    }

    #[test]
    fn test_parse_leading_number() {
        assert_eq!(parse_leading_number("13 Years of experience"), Some(13.0));
        assert_eq!(parse_leading_number("Over 7.5 yrs"), Some(7.5));
        assert_eq!(parse_leading_number("no digits"), None);
        assert_eq!(parse_leading_number(""), None);
    }

    #[test]
    fn test_consultation_mode_rules() {
        let both = normalize(raw(json!({
            "id": "1", "name": "Dr. A", "video_consult": true, "in_clinic": true
        })))
        .unwrap();
        let clinic = normalize(raw(json!({
            "id": "2", "name": "Dr. B", "video_consult": false, "in_clinic": true
        })))
        .unwrap();
        let neither = normalize(raw(json!({"id": "3", "name": "Dr. C"}))).unwrap();

        assert_eq!(both.consultation_mode, ConsultationMode::VideoConsult);
        assert_eq!(clinic.consultation_mode, ConsultationMode::InClinic);
        assert_eq!(neither.consultation_mode, ConsultationMode::InClinic);
    }

    #[test]
    fn test_clinic_location_falls_back_to_city() {
        let doctor = normalize(raw(json!({
            "id": "1",
            "name": "Dr. A",
            "clinic": {"name": "Apollo", "address": {"locality": " ", "city": "Chennai"}}
        })))
        .unwrap();

        assert_eq!(doctor.clinic.name, "Apollo");
        assert_eq!(doctor.clinic.location, "Chennai");

        let no_clinic = normalize(raw(json!({"id": "2", "name": "Dr. B"}))).unwrap();
        assert_eq!(no_clinic.clinic, Clinic::default());
    }

    #[test]
    fn test_normalize_rejects_missing_id_and_name() {
        assert_eq!(
            normalize(raw(json!({"name": "Dr. A"}))).unwrap_err(),
            MalformedRecord::MissingId
        );
        assert_eq!(
            normalize(raw(json!({"id": null, "name": "Dr. A"}))).unwrap_err(),
            MalformedRecord::MissingId
        );
        assert_eq!(
            normalize(raw(json!({"id": "7", "name": ""}))).unwrap_err(),
            MalformedRecord::MissingName("7".to_string())
        );
    }

    #[test]
    fn test_normalize_batch_skips_malformed() {
        let batch = normalize_batch(vec![
            json!({"id": "1", "name": "Dr. A"}),
            json!("not a doctor"),
            json!({"name": "Dr. Anonymous"}),
            json!({"id": "1", "name": "Dr. A again"}),
            json!({"id": "2", "name": "Dr. B", "languages": "English"}),
            json!({"id": "3", "name": 42}),
        ]);

        let ids: Vec<&str> = batch.doctors.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(batch.doctors[1].languages, Vec::<String>::new());
        assert_eq!(
            batch.skipped,
            vec![
                MalformedRecord::NotAnObject,
                MalformedRecord::MissingId,
                MalformedRecord::DuplicateId("1".to_string()),
                MalformedRecord::MissingName("3".to_string()),
            ]
        );
    }

    #[test]
    fn test_normalize_batch_keeps_doctors_with_mistyped_display_fields() {
        let batch = normalize_batch(vec![
            json!({"id": "1", "name": "Dr. A", "languages": "English"}),
            json!({"id": "2", "name": "Dr. B", "photo": 12}),
            json!({"id": "3", "name": "Dr. C", "languages": ["English", null, 5]}),
            json!({"id": "4", "name": "Dr. D", "clinic": {"name": "Care", "address": {"address_line1": 7, "city": "Pune"}}}),
            json!({"id": "5", "name": "Dr. E", "video_consult": "true", "in_clinic": 1}),
            json!({"id": "6", "name": "Dr. F", "specialities": "Dentist", "clinic": "Apollo"}),
        ]);

        let ids: Vec<&str> = batch.doctors.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
        assert!(batch.skipped.is_empty());

        let doctors = &batch.doctors;
        assert!(doctors[0].languages.is_empty());
        assert_eq!(doctors[1].photo, None);
        assert_eq!(doctors[2].languages, vec!["English"]);
        assert_eq!(doctors[3].clinic.name, "Care");
        assert_eq!(doctors[3].clinic.location, "Pune");
        assert_eq!(doctors[3].clinic.address_line, None);
        assert_eq!(doctors[4].consultation_mode, ConsultationMode::InClinic);
        assert_eq!(doctors[5].specialties, vec![DEFAULT_SPECIALTY]);
        assert_eq!(doctors[5].clinic, Clinic::default());
    }

    #[test]
    fn test_normalize_batch_never_yields_empty_specialties() {
        let batch = normalize_batch(vec![
            json!({"id": "1", "name": "Dr. A", "specialities": null}),
            json!({"id": "2", "name": "Dr. B", "specialities": [{"name": ""}]}),
            json!({"id": "3", "name": "Dr. C", "specialities": [{"name": "Dentist"}]}),
        ]);

        assert_eq!(batch.doctors.len(), 3);
        assert!(batch.doctors.iter().all(|d| !d.specialties.is_empty()));
    }

    #[test]
    fn test_normalize_keeps_display_fields() {
        let doctor = normalize(raw(json!({
            "id": "1",
            "name": " Dr. Asha Rao ",
            "name_initials": "AR",
            "photo": "https://example.com/a.png",
            "doctor_introduction": "Cardiologist with a decade of practice.",
            "experience": " 10 Years of experience ",
            "languages": ["English", "Tamil"],
            "clinic": {"name": "Heart Care", "address": {"locality": "Adyar", "address_line1": "12 Main Rd"}}
        })))
        .unwrap();

        assert_eq!(doctor.name, "Dr. Asha Rao");
        assert_eq!(doctor.initials.as_deref(), Some("AR"));
        assert_eq!(doctor.experience.as_deref(), Some("10 Years of experience"));
        assert_eq!(doctor.languages, vec!["English", "Tamil"]);
        assert_eq!(doctor.clinic.address_line.as_deref(), Some("12 Main Rd"));
    }
}
