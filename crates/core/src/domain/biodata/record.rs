use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use strum::IntoEnumIterator;

use super::field::{BiodataField, Gender};

pub const SUBMISSION_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What the biodata form posts. Optional widgets default to an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BiodataSubmission {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub address: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub department: String,
    pub date_joined: NaiveDate,
    #[serde(default)]
    pub emergency_name: String,
    #[serde(default)]
    pub emergency_phone: String,
    #[serde(default)]
    pub emergency_relation: String,
}

impl BiodataSubmission {
    /// Stamps the submission and flattens it into a sheet row.
    pub fn into_record(self, submitted_at: NaiveDateTime) -> BiodataRecord {
        let entries = BiodataField::iter()
            .map(|field| {
                let value = match field {
                    BiodataField::FullName => self.full_name.clone(),
                    BiodataField::PhoneNumber => self.phone.clone(),
                    BiodataField::Email => self.email.clone(),
                    BiodataField::Address => self.address.clone(),
                    BiodataField::DateOfBirth => self.date_of_birth.to_string(),
                    BiodataField::Gender => self.gender.to_string(),
                    BiodataField::DepartmentRole => self.department.clone(),
                    BiodataField::DateJoined => self.date_joined.to_string(),
                    BiodataField::EmergencyContactName => self.emergency_name.clone(),
                    BiodataField::EmergencyContactPhone => self.emergency_phone.clone(),
                    BiodataField::EmergencyRelationship => self.emergency_relation.clone(),
                    BiodataField::SubmissionDate => {
                        submitted_at.format(SUBMISSION_DATE_FORMAT).to_string()
                    }
                };
                (field, value)
            })
            .collect();

        BiodataRecord { entries }
    }
}

/// One staff submission: every [`BiodataField`] exactly once, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiodataRecord {
    entries: Vec<(BiodataField, String)>,
}

impl BiodataRecord {
    /// Header names, used for row 1 when the worksheet is created.
    pub fn keys(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(field, _)| field.to_string())
            .collect()
    }

    pub fn values(&self) -> Vec<String> {
        self.entries.iter().map(|(_, value)| value.clone()).collect()
    }

    pub fn get(&self, field: BiodataField) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BiodataField, &str)> {
        self.entries
            .iter()
            .map(|(field, value)| (*field, value.as_str()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn jane_doe() -> BiodataSubmission {
        BiodataSubmission {
            full_name: "Jane Doe".to_string(),
            phone: "555-1111".to_string(),
            email: "jane.doe@example.com".to_string(),
            address: "12 Market Road, Lagos".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
            gender: Gender::Female,
            department: "Mathematics".to_string(),
            date_joined: NaiveDate::from_ymd_opt(2021, 9, 1).unwrap(),
            emergency_name: "John Doe".to_string(),
            emergency_phone: "555-2222".to_string(),
            emergency_relation: "Brother".to_string(),
        }
    }

    fn submitted_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 30, 5)
            .unwrap()
    }

    #[test]
    fn test_record_has_every_field_in_order() {
        let record = jane_doe().into_record(submitted_at());
        assert_eq!(record.len(), 12);
        assert_eq!(record.keys()[0], "Full Name");
        assert_eq!(record.keys()[11], "Submission Date");
        assert_eq!(
            record.iter().map(|(field, _)| field).collect::<Vec<_>>(),
            BiodataField::iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_record_values_are_plain_strings() {
        let record = jane_doe().into_record(submitted_at());
        assert_eq!(
            record.values(),
            vec![
                "Jane Doe",
                "555-1111",
                "jane.doe@example.com",
                "12 Market Road, Lagos",
                "1990-04-12",
                "Female",
                "Mathematics",
                "2021-09-01",
                "John Doe",
                "555-2222",
                "Brother",
                "2024-01-15 09:30:05",
            ]
        );
    }

    #[test]
    fn test_optional_fields_default_to_empty() {
        let submission: BiodataSubmission = serde_json::from_value(serde_json::json!({
            "full_name": "Ada",
            "phone": "1",
            "email": "ada@example.com",
            "date_of_birth": "1985-02-03",
            "gender": "Other",
            "department": "Admin",
            "date_joined": "2020-01-01",
        }))
        .unwrap();

        let record = submission.into_record(submitted_at());
        assert_eq!(record.get(BiodataField::Address), Some(""));
        assert_eq!(record.get(BiodataField::EmergencyRelationship), Some(""));
        assert_eq!(record.get(BiodataField::Gender), Some("Other"));
        assert_eq!(record.get(BiodataField::DateOfBirth), Some("1985-02-03"));
    }
}
