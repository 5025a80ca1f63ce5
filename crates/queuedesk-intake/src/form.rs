// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tier-dependent field requirements.
//!
//! Each tier adds fields to the tier below it, so the required set only
//! grows with the tier ordinal.

use std::fmt;

use queuedesk_core::{DocumentKind, QueueDeskError, ResidentStatus, Tier};

use crate::record::{IntakeRecord, RecordPatch};

/// A field of the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    FullName,
    DateOfBirth,
    Nationality,
    Address,
    City,
    Postcode,
    State,
    Country,
    PhoneNumber,
    OrderPurpose,
    ResidentStatus,
    Occupation,
    NatureOfBusiness,
    Document(DocumentKind),
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FormField::FullName => "Full Name",
            FormField::DateOfBirth => "Date of Birth",
            FormField::Nationality => "Nationality",
            FormField::Address => "Address",
            FormField::City => "City",
            FormField::Postcode => "Postcode",
            FormField::State => "State",
            FormField::Country => "Country",
            FormField::PhoneNumber => "Mobile Number",
            FormField::OrderPurpose => "Order Purpose",
            FormField::ResidentStatus => "Resident Status",
            FormField::Occupation => "Occupation",
            FormField::NatureOfBusiness => "Nature of Business",
            FormField::Document(kind) => kind.label(),
        };
        f.write_str(label)
    }
}

impl FormField {
    /// Typed fields, in form order.
    pub const TEXT: [FormField; 13] = [
        FormField::FullName,
        FormField::DateOfBirth,
        FormField::Nationality,
        FormField::Address,
        FormField::City,
        FormField::Postcode,
        FormField::State,
        FormField::Country,
        FormField::PhoneNumber,
        FormField::OrderPurpose,
        FormField::ResidentStatus,
        FormField::Occupation,
        FormField::NatureOfBusiness,
    ];

    /// Command-line key, e.g. `date-of-birth`.
    pub fn key(self) -> &'static str {
        match self {
            FormField::FullName => "full-name",
            FormField::DateOfBirth => "date-of-birth",
            FormField::Nationality => "nationality",
            FormField::Address => "address",
            FormField::City => "city",
            FormField::Postcode => "postcode",
            FormField::State => "state",
            FormField::Country => "country",
            FormField::PhoneNumber => "phone",
            FormField::OrderPurpose => "order-purpose",
            FormField::ResidentStatus => "resident-status",
            FormField::Occupation => "occupation",
            FormField::NatureOfBusiness => "nature-of-business",
            FormField::Document(kind) => kind.form_field(),
        }
    }

    pub fn from_key(key: &str) -> Option<FormField> {
        let key = key.trim().to_ascii_lowercase().replace('_', "-");
        FormField::TEXT.into_iter().find(|f| f.key() == key)
    }

    /// A patch that sets this field to `value`.
    pub fn patch(self, value: &str) -> Result<RecordPatch, QueueDeskError> {
        let text = Some(value.trim().to_string());
        let mut patch = RecordPatch::default();
        match self {
            FormField::FullName => patch.full_name = text,
            FormField::DateOfBirth => patch.date_of_birth = text,
            FormField::Nationality => patch.nationality = text,
            FormField::Address => patch.address = text,
            FormField::City => patch.city = text,
            FormField::Postcode => patch.postcode = text,
            FormField::State => patch.state = text,
            FormField::Country => patch.country = text,
            FormField::PhoneNumber => patch.phone_number = text,
            FormField::OrderPurpose => patch.order_purpose = text,
            FormField::Occupation => patch.occupation = text,
            FormField::NatureOfBusiness => patch.nature_of_business = text,
            FormField::ResidentStatus => {
                let normalized = value.trim().to_ascii_uppercase().replace(['-', ' '], "_");
                let status = normalized.parse::<ResidentStatus>().map_err(|_| {
                    QueueDeskError::InvalidInput(format!(
                        "resident status must be RESIDENT or NON_RESIDENT, got '{value}'"
                    ))
                })?;
                patch.resident_status = Some(status);
            }
            FormField::Document(kind) => {
                return Err(QueueDeskError::InvalidInput(format!(
                    "{} is a document, attach a file instead",
                    kind.label()
                )));
            }
        }
        Ok(patch)
    }
}

const BASIC_FIELDS: &[FormField] = &[FormField::FullName, FormField::DateOfBirth];

const STANDARD_FIELDS: &[FormField] = &[
    FormField::Nationality,
    FormField::Address,
    FormField::City,
    FormField::Postcode,
    FormField::State,
    FormField::Country,
    FormField::PhoneNumber,
    FormField::OrderPurpose,
    FormField::ResidentStatus,
];

const PREMIUM_FIELDS: &[FormField] = &[
    FormField::Occupation,
    FormField::NatureOfBusiness,
    FormField::Document(DocumentKind::IdFront),
    FormField::Document(DocumentKind::IdBack),
    FormField::Document(DocumentKind::PassportFront),
];

/// Fields the tier adds on top of its predecessor.
fn added_by(tier: Tier) -> &'static [FormField] {
    match tier {
        Tier::Basic => BASIC_FIELDS,
        Tier::Standard => STANDARD_FIELDS,
        Tier::Premium => PREMIUM_FIELDS,
    }
}

/// Every field required for `tier`, in display order.
pub fn required_fields(tier: Tier) -> Vec<FormField> {
    let mut fields = tier.predecessor().map(required_fields).unwrap_or_default();
    fields.extend_from_slice(added_by(tier));
    fields
}

/// Whether a field has a value in `record`.
pub fn is_filled(record: &IntakeRecord, field: FormField) -> bool {
    let f = &record.fields;
    let text = match field {
        FormField::FullName => &f.full_name,
        FormField::DateOfBirth => &f.date_of_birth,
        FormField::Nationality => &f.nationality,
        FormField::Address => &f.address,
        FormField::City => &f.city,
        FormField::Postcode => &f.postcode,
        FormField::State => &f.state,
        FormField::Country => &f.country,
        FormField::PhoneNumber => &f.phone_number,
        FormField::OrderPurpose => &f.order_purpose,
        FormField::Occupation => &f.occupation,
        FormField::NatureOfBusiness => &f.nature_of_business,
        FormField::ResidentStatus => return f.resident_status.is_some(),
        FormField::Document(kind) => return record.document(kind).is_some(),
    };
    !text.trim().is_empty()
}

/// Required fields of `tier` that `record` leaves blank.
pub fn missing_fields(record: &IntakeRecord, tier: Tier) -> Vec<FormField> {
    required_fields(tier)
        .into_iter()
        .filter(|field| !is_filled(record, *field))
        .collect()
}

/// Refuses a submit while required fields are blank.
pub fn check_required(record: &IntakeRecord, tier: Tier) -> Result<(), QueueDeskError> {
    let missing = missing_fields(record, tier);
    if missing.is_empty() {
        return Ok(());
    }
    let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
    Err(QueueDeskError::InvalidInput(format!(
        "required fields missing: {}",
        names.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tier_strategy() -> impl Strategy<Value = Tier> {
        prop::sample::select(Tier::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn higher_tiers_require_a_superset(tier in tier_strategy()) {
            let required = required_fields(tier);
            if let Some(lower) = tier.predecessor() {
                let lower = required_fields(lower);
                prop_assert!(lower.iter().all(|f| required.contains(f)));
                prop_assert!(required.len() > lower.len());
            }
        }

        #[test]
        fn filled_fields_never_reported_missing(name in "[A-Za-z ]{1,20}", dob in "[0-9-]{1,10}") {
            let mut record = IntakeRecord::default();
            RecordPatch {
                full_name: Some(format!("x{name}")),
                date_of_birth: Some(format!("1{dob}")),
                ..Default::default()
            }
            .apply(&mut record);
            prop_assert!(missing_fields(&record, Tier::Basic).is_empty());
        }
    }

    #[test]
    fn tier_field_counts() {
        assert_eq!(required_fields(Tier::Basic).len(), 2);
        assert_eq!(required_fields(Tier::Standard).len(), 11);
        assert_eq!(required_fields(Tier::Premium).len(), 16);
    }

    #[test]
    fn whitespace_counts_as_blank() {
        let mut record = IntakeRecord::default();
        RecordPatch {
            full_name: Some("   ".into()),
            date_of_birth: Some("1990-01-01".into()),
            ..Default::default()
        }
        .apply(&mut record);
        assert_eq!(missing_fields(&record, Tier::Basic), vec![FormField::FullName]);
    }

    #[test]
    fn premium_needs_documents() {
        let mut record = IntakeRecord::default();
        RecordPatch {
            full_name: Some("Aina".into()),
            date_of_birth: Some("1990-01-01".into()),
            nationality: Some("Malaysian".into()),
            address: Some("12 Jalan Ampang".into()),
            city: Some("KL".into()),
            postcode: Some("50450".into()),
            state: Some("WP".into()),
            country: Some("Malaysia".into()),
            phone_number: Some("+6012".into()),
            order_purpose: Some("Travel".into()),
            resident_status: Some(ResidentStatus::Resident),
            occupation: Some("Engineer".into()),
            nature_of_business: Some("Software".into()),
            ..Default::default()
        }
        .apply(&mut record);
        assert!(check_required(&record, Tier::Standard).is_ok());

        let err = check_required(&record, Tier::Premium).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid input: required fields missing: ID Front, ID Back, Passport Front"
        );

        for kind in DocumentKind::ALL {
            record.stage_document(kind, "doc.png", vec![1]).unwrap();
        }
        assert!(check_required(&record, Tier::Premium).is_ok());
    }

    #[test]
    fn fields_patch_by_key() {
        for field in FormField::TEXT {
            assert_eq!(FormField::from_key(field.key()), Some(field));
        }
        assert_eq!(FormField::from_key("Full_Name"), Some(FormField::FullName));
        assert_eq!(FormField::from_key("idFrontImage"), None);

        let mut record = IntakeRecord::default();
        FormField::City.patch(" Ipoh ").unwrap().apply(&mut record);
        FormField::ResidentStatus
            .patch("non-resident")
            .unwrap()
            .apply(&mut record);
        assert_eq!(record.fields.city, "Ipoh");
        assert_eq!(record.fields.resident_status, Some(ResidentStatus::NonResident));

        assert!(FormField::ResidentStatus.patch("tourist").is_err());
        assert!(
            FormField::Document(DocumentKind::IdBack)
                .patch("x")
                .is_err()
        );
    }
}
