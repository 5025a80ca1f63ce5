// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The customer data collected during intake.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use queuedesk_api::{CustomerFields, CustomerUpload, DocumentUpload};
use queuedesk_core::{CustomerRecord, DocumentKind, QueueDeskError, ResidentStatus};

/// Accepted image extensions and the content type each is uploaded with.
const IMAGE_TYPES: [(&str, &str); 7] = [
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("heic", "image/heic"),
];

/// Local reference to a staged document, shown in place of the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewHandle(String);

impl PreviewHandle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A document picked on this client and not uploaded yet.
#[derive(Clone, PartialEq, Eq)]
pub struct StagedDocument {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub preview: PreviewHandle,
}

impl fmt::Debug for StagedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StagedDocument")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .field("preview", &self.preview)
            .finish()
    }
}

/// What occupies a document slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSlot {
    /// Already on the backend, referenced by URL.
    Stored { url: String },
    /// Picked locally, uploaded with the next submit or save.
    Staged(StagedDocument),
}

impl DocumentSlot {
    /// What to display for the slot: the stored URL or the local preview.
    pub fn preview(&self) -> &str {
        match self {
            DocumentSlot::Stored { url } => url,
            DocumentSlot::Staged(doc) => doc.preview.as_str(),
        }
    }
}

/// Intake Record: the fourteen text fields, the optional third-party id and
/// the three document slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeRecord {
    pub fields: CustomerFields,
    /// Id number of the person transacted for, when the customer acts for a third party.
    pub third_party_id_number: Option<String>,
    documents: BTreeMap<DocumentKind, DocumentSlot>,
}

impl IntakeRecord {
    /// Record as shown for a stored customer. Stored documents keep their URLs.
    pub fn from_customer(customer: &CustomerRecord) -> Self {
        let documents = DocumentKind::ALL
            .into_iter()
            .filter_map(|kind| {
                customer.document_url(kind).map(|url| {
                    (
                        kind,
                        DocumentSlot::Stored {
                            url: url.to_string(),
                        },
                    )
                })
            })
            .collect();
        Self {
            fields: CustomerFields::from(customer),
            third_party_id_number: None,
            documents,
        }
    }

    pub fn document(&self, kind: DocumentKind) -> Option<&DocumentSlot> {
        self.documents.get(&kind)
    }

    /// Stages one image file for `kind`, replacing whatever the slot held.
    ///
    /// Only image files are accepted, judged by extension.
    pub fn stage_document(
        &mut self,
        kind: DocumentKind,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<&PreviewHandle, QueueDeskError> {
        let content_type = image_content_type(file_name).ok_or_else(|| {
            QueueDeskError::InvalidInput(format!("{kind}: {file_name} is not an image file"))
        })?;
        if bytes.is_empty() {
            return Err(QueueDeskError::InvalidInput(format!(
                "{kind}: {file_name} is empty"
            )));
        }

        let staged = StagedDocument {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            bytes,
            preview: PreviewHandle(format!("preview://{}/{file_name}", kind.form_field())),
        };
        self.documents.insert(kind, DocumentSlot::Staged(staged));
        match self.documents.get(&kind) {
            Some(DocumentSlot::Staged(doc)) => Ok(&doc.preview),
            _ => Err(QueueDeskError::Internal(format!("{kind} was not staged"))),
        }
    }

    /// Clears a slot, dropping both the preview and the file.
    pub fn remove_document(&mut self, kind: DocumentKind) -> Option<DocumentSlot> {
        self.documents.remove(&kind)
    }

    /// Multipart payload: every text field plus each staged document.
    pub fn to_upload(&self) -> CustomerUpload {
        let documents = self
            .documents
            .iter()
            .filter_map(|(kind, slot)| match slot {
                DocumentSlot::Staged(doc) => Some(DocumentUpload {
                    kind: *kind,
                    file_name: doc.file_name.clone(),
                    content_type: doc.content_type.clone(),
                    bytes: doc.bytes.clone(),
                }),
                DocumentSlot::Stored { .. } => None,
            })
            .collect();
        CustomerUpload {
            fields: self.fields.clone(),
            documents,
        }
    }
}

fn image_content_type(file_name: &str) -> Option<&'static str> {
    let extension = Path::new(file_name)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();
    IMAGE_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, content_type)| *content_type)
}

/// A partial update to an [`IntakeRecord`]. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub full_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub id_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub phone_number: Option<String>,
    pub resident_status: Option<ResidentStatus>,
    pub order_purpose: Option<String>,
    pub occupation: Option<String>,
    pub nature_of_business: Option<String>,
    pub nationality: Option<String>,
    pub third_party_id_number: Option<String>,
}

impl RecordPatch {
    /// Shallow merge into `record`.
    pub fn apply(self, record: &mut IntakeRecord) {
        let fields = &mut record.fields;
        let text = [
            (self.full_name, &mut fields.full_name),
            (self.date_of_birth, &mut fields.date_of_birth),
            (self.id_number, &mut fields.id_number),
            (self.address, &mut fields.address),
            (self.city, &mut fields.city),
            (self.postcode, &mut fields.postcode),
            (self.state, &mut fields.state),
            (self.country, &mut fields.country),
            (self.phone_number, &mut fields.phone_number),
            (self.order_purpose, &mut fields.order_purpose),
            (self.occupation, &mut fields.occupation),
            (self.nature_of_business, &mut fields.nature_of_business),
            (self.nationality, &mut fields.nationality),
        ];
        for (value, slot) in text {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if let Some(status) = self.resident_status {
            fields.resident_status = Some(status);
        }
        if let Some(id) = self.third_party_id_number {
            record.third_party_id_number = Some(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_preserves_unset_fields() {
        let mut record = IntakeRecord::default();
        RecordPatch {
            full_name: Some("Aina".into()),
            city: Some("Ipoh".into()),
            ..Default::default()
        }
        .apply(&mut record);
        RecordPatch {
            city: Some("Penang".into()),
            resident_status: Some(ResidentStatus::Resident),
            ..Default::default()
        }
        .apply(&mut record);

        assert_eq!(record.fields.full_name, "Aina");
        assert_eq!(record.fields.city, "Penang");
        assert_eq!(record.fields.resident_status, Some(ResidentStatus::Resident));
        assert_eq!(record.fields.nationality, "");
    }

    #[test]
    fn stages_images_only() {
        let mut record = IntakeRecord::default();
        let preview = record
            .stage_document(DocumentKind::IdFront, "front.JPG", vec![1, 2, 3])
            .unwrap()
            .clone();
        assert_eq!(preview.as_str(), "preview://idFrontImage/front.JPG");

        let err = record
            .stage_document(DocumentKind::IdBack, "scan.pdf", vec![1])
            .unwrap_err();
        assert!(err.to_string().contains("not an image"));
        assert!(record.document(DocumentKind::IdBack).is_none());

        assert!(record
            .stage_document(DocumentKind::IdBack, "empty.png", Vec::new())
            .is_err());
    }

    #[test]
    fn restaging_replaces_and_removing_clears() {
        let mut record = IntakeRecord::default();
        record
            .stage_document(DocumentKind::PassportFront, "a.png", vec![1])
            .unwrap();
        record
            .stage_document(DocumentKind::PassportFront, "b.webp", vec![2])
            .unwrap();
        let Some(DocumentSlot::Staged(doc)) = record.document(DocumentKind::PassportFront) else {
            panic!("expected staged document");
        };
        assert_eq!(doc.file_name, "b.webp");
        assert_eq!(doc.content_type, "image/webp");

        assert!(record.remove_document(DocumentKind::PassportFront).is_some());
        assert!(record.document(DocumentKind::PassportFront).is_none());
        assert!(record.to_upload().documents.is_empty());
    }

    #[test]
    fn upload_carries_only_staged_documents() {
        let customer = CustomerRecord {
            id: "c-1".into(),
            full_name: "Aina".into(),
            id_front_image: Some("https://files.example/front.png".into()),
            ..Default::default()
        };
        let mut record = IntakeRecord::from_customer(&customer);
        assert_eq!(
            record.document(DocumentKind::IdFront).map(DocumentSlot::preview),
            Some("https://files.example/front.png")
        );

        record
            .stage_document(DocumentKind::IdBack, "back.png", vec![9])
            .unwrap();
        let upload = record.to_upload();
        assert_eq!(upload.fields.full_name, "Aina");
        assert_eq!(upload.documents.len(), 1);
        assert_eq!(upload.documents[0].kind, DocumentKind::IdBack);
    }
}
