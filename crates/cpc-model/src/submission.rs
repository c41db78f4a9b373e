//! Form submission state and field value types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The inquiry and registration forms the portal submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    /// Admission inquiry from the contact section (JSON payload).
    AdmissionInquiry,
    /// Entrance-exam registration with document uploads (multipart payload).
    ExamRegistration,
    /// Placement inquiry filed by a student (JSON payload).
    StudentInquiry,
    /// Placement inquiry filed by a recruiting company (multipart payload).
    CompanyInquiry,
}

impl FormKind {
    /// Human-readable form title.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::AdmissionInquiry => "Admission Inquiry",
            Self::ExamRegistration => "Entrance Exam Registration",
            Self::StudentInquiry => "Student Placement Inquiry",
            Self::CompanyInquiry => "Company Placement Inquiry",
        }
    }

    /// All form kinds, for listings.
    #[must_use]
    pub const fn all() -> [FormKind; 4] {
        [
            Self::AdmissionInquiry,
            Self::ExamRegistration,
            Self::StudentInquiry,
            Self::CompanyInquiry,
        ]
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Lifecycle of one submission attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    /// Nothing in flight; fields may be edited.
    #[default]
    Idle,
    /// The endpoint call is in flight; repeated submit clicks are ignored.
    Submitting,
    /// The endpoint acknowledged the submission; auto-dismiss is scheduled.
    Success,
    /// The endpoint rejected the submission; fields are preserved for retry.
    Failed(String),
}

impl SubmissionState {
    /// True while the endpoint call is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Failure reason reported by the endpoint, if any.
    #[must_use]
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// An uploaded file held by a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Original file name as selected by the user.
    pub file_name: String,
    /// MIME type reported for the file.
    pub content_type: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Create an upload from its parts.
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// File size in bytes.
    #[must_use]
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Current value of a single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text input (also used for emails, phone numbers, selections).
    Text(String),
    /// Validated file upload.
    File(FileUpload),
}

impl FieldValue {
    /// Text content, if this is a text field.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::File(_) => None,
        }
    }

    /// File content, if this is a file field.
    #[must_use]
    pub fn as_file(&self) -> Option<&FileUpload> {
        match self {
            Self::File(file) => Some(file),
            Self::Text(_) => None,
        }
    }

    /// True for a file field.
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<FileUpload> for FieldValue {
    fn from(file: FileUpload) -> Self {
        Self::File(file)
    }
}
