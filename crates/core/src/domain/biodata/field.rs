use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Columns of the biodata sheet, in the order they are written.
///
/// The serialized name of each variant is the header text used in row 1 of the
/// worksheet, so reordering variants changes the sheet layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, AsRefStr)]
pub enum BiodataField {
    #[strum(serialize = "Full Name")]
    FullName,
    #[strum(serialize = "Phone Number")]
    PhoneNumber,
    #[strum(serialize = "Email")]
    Email,
    #[strum(serialize = "Address")]
    Address,
    #[strum(serialize = "Date of Birth")]
    DateOfBirth,
    #[strum(serialize = "Gender")]
    Gender,
    #[strum(serialize = "Department/Role")]
    DepartmentRole,
    #[strum(serialize = "Date Joined")]
    DateJoined,
    #[strum(serialize = "Emergency Contact Name")]
    EmergencyContactName,
    #[strum(serialize = "Emergency Contact Phone")]
    EmergencyContactPhone,
    #[strum(serialize = "Emergency Relationship")]
    EmergencyRelationship,
    #[strum(serialize = "Submission Date")]
    SubmissionDate,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
    AsRefStr,
)]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_header_names_in_sheet_order() {
        let headers = BiodataField::iter()
            .map(|field| field.to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            headers,
            vec![
                "Full Name",
                "Phone Number",
                "Email",
                "Address",
                "Date of Birth",
                "Gender",
                "Department/Role",
                "Date Joined",
                "Emergency Contact Name",
                "Emergency Contact Phone",
                "Emergency Relationship",
                "Submission Date",
            ]
        );
    }

    #[test]
    fn test_gender_choices() {
        let choices = Gender::iter().map(|g| g.to_string()).collect::<Vec<_>>();
        assert_eq!(choices, vec!["Male", "Female", "Other"]);
        assert_eq!("Female".parse::<Gender>().unwrap(), Gender::Female);
        assert!("female".parse::<Gender>().is_err());
    }
}
