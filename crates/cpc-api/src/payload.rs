//! Submission payload assembly.
//!
//! One abstraction covers both payload shapes the portal uses: plain JSON
//! for text-only forms and multipart for forms carrying uploads. Callers
//! build the payload field by field; the client picks the wire encoding
//! from [`SubmissionPayload::has_file`], so the workflow around it is
//! identical either way.

use cpc_model::{FileUpload, FormKind};
use reqwest::blocking::multipart::{Form, Part};
use serde_json::{Map, Value};

use crate::error::{ApiError, Result};

/// One named entry of a submission payload.
#[derive(Debug, Clone)]
pub enum PayloadPart {
    /// Plain text value.
    Text(String),
    /// Structured value (e.g. the selected-courses array).
    Json(Value),
    /// File upload.
    File(FileUpload),
}

/// Ordered field set for one submission.
#[derive(Debug, Clone, Default)]
pub struct SubmissionPayload {
    parts: Vec<(String, PayloadPart)>,
}

impl SubmissionPayload {
    /// Empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field.
    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parts.push((name.into(), PayloadPart::Text(value.into())));
    }

    /// Append a structured field.
    pub fn push_json(&mut self, name: impl Into<String>, value: Value) {
        self.parts.push((name.into(), PayloadPart::Json(value)));
    }

    /// Append a file field.
    pub fn push_file(&mut self, name: impl Into<String>, file: FileUpload) {
        self.parts.push((name.into(), PayloadPart::File(file)));
    }

    /// True when any part is a file, forcing multipart encoding.
    #[must_use]
    pub fn has_file(&self) -> bool {
        self.parts
            .iter()
            .any(|(_, part)| matches!(part, PayloadPart::File(_)))
    }

    /// Number of parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// True when no parts have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Iterate the parts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PayloadPart)> {
        self.parts.iter().map(|(name, part)| (name.as_str(), part))
    }

    /// Encode as a JSON object. File parts are not representable here;
    /// callers must have checked [`Self::has_file`] first.
    pub fn to_json(&self) -> Result<Value> {
        let mut object = Map::new();
        for (name, part) in &self.parts {
            match part {
                PayloadPart::Text(text) => {
                    object.insert(name.clone(), Value::String(text.clone()));
                }
                PayloadPart::Json(value) => {
                    object.insert(name.clone(), value.clone());
                }
                PayloadPart::File(_) => {
                    return Err(ApiError::InvalidPayload(format!(
                        "file field '{name}' cannot be JSON-encoded"
                    )));
                }
            }
        }
        Ok(Value::Object(object))
    }

    /// Encode as a multipart form.
    pub fn to_multipart(&self) -> Result<Form> {
        let mut form = Form::new();
        for (name, part) in &self.parts {
            form = match part {
                PayloadPart::Text(text) => form.text(name.clone(), text.clone()),
                PayloadPart::Json(value) => form.text(name.clone(), value.to_string()),
                PayloadPart::File(file) => {
                    let part = Part::bytes(file.bytes.clone())
                        .file_name(file.file_name.clone())
                        .mime_str(&file.content_type)
                        .map_err(|err| ApiError::InvalidPayload(err.to_string()))?;
                    form.part(name.clone(), part)
                }
            };
        }
        Ok(form)
    }
}

/// Endpoint path each form submits to.
#[must_use]
pub fn endpoint_path(kind: FormKind) -> &'static str {
    match kind {
        FormKind::AdmissionInquiry => "/inquiry/create",
        FormKind::ExamRegistration => "/exam/create",
        FormKind::StudentInquiry => "/placement/studentInquiry",
        FormKind::CompanyInquiry => "/placement/companyInquiry",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_encoding_preserves_structure() {
        let mut payload = SubmissionPayload::new();
        payload.push_text("name", "Asha Rao");
        payload.push_json("courses", json!(["B. Design Product", "M. Design UI UX"]));

        let value = payload.to_json().unwrap();
        assert_eq!(value["name"], "Asha Rao");
        assert_eq!(value["courses"][1], "M. Design UI UX");
    }

    #[test]
    fn file_part_forces_multipart() {
        let mut payload = SubmissionPayload::new();
        payload.push_text("companyName", "Acme");
        assert!(!payload.has_file());

        payload.push_file(
            "jobDescriptionFile",
            FileUpload::new("jd.pdf", "application/pdf", vec![1, 2, 3]),
        );
        assert!(payload.has_file());
        assert!(payload.to_json().is_err());
        assert!(payload.to_multipart().is_ok());
    }

    #[test]
    fn endpoint_paths() {
        assert_eq!(endpoint_path(FormKind::AdmissionInquiry), "/inquiry/create");
        assert_eq!(
            endpoint_path(FormKind::CompanyInquiry),
            "/placement/companyInquiry"
        );
    }
}
