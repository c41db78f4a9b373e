//! Validation issue types.
//!
//! The Issue enum provides type-safe validation issue creation where each
//! variant carries only its needed data. Messages are formatted on demand
//! and match what the portal shows inline next to the offending field.

use serde::{Deserialize, Serialize};

/// Validation issue - each variant carries only its needed data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Issue {
    // Presence checks
    /// Required field has no value at submit time.
    RequiredMissing { field: String, label: String },

    // Format checks
    /// Value does not match the field's allowed-character pattern.
    PatternMismatch { field: String, message: String },
    /// Value is shorter than the field's minimum length.
    TooShort { field: String, label: String, min_len: usize },
    /// Value is longer than the field's maximum length.
    TooLong { field: String, message: String },
    /// Value must have an exact length (digit fields such as phone numbers).
    WrongLength { field: String, message: String },

    // Word-limit checks
    /// More words than the field allows.
    TooManyWords { field: String, max_words: usize },
    /// A single word exceeds the per-word character cap.
    WordTooLong { field: String, max_chars: usize },
    /// A comma-separated name list has more entries than allowed.
    TooManyNames { field: String, max_names: usize },

    // File checks
    /// File is larger than the allowed maximum.
    FileTooLarge {
        field: String,
        size_bytes: u64,
        max_bytes: u64,
    },
    /// File is smaller than the allowed minimum.
    FileTooSmall {
        field: String,
        size_bytes: u64,
        min_bytes: u64,
    },
    /// File MIME type is not in the allow-list.
    FileTypeNotAllowed { field: String, allowed: Vec<String> },

    // Selection checks
    /// No category chosen yet.
    CategoryMissing { label: String },
    /// No sub-item chosen yet.
    SubItemsMissing { label: String, exactly_one: bool },
    /// Sub-item selection already at its bound (reject-at-bound policy).
    TooManySubItems { label: String, max: usize },

    // Bot-challenge check
    /// The bot-challenge token has not been issued yet.
    CaptchaMissing,
}

impl Issue {
    /// Field name the issue belongs to, for inline display next to the
    /// input. Selection and captcha issues are form-level.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Issue::RequiredMissing { field, .. }
            | Issue::PatternMismatch { field, .. }
            | Issue::TooShort { field, .. }
            | Issue::TooLong { field, .. }
            | Issue::WrongLength { field, .. }
            | Issue::TooManyWords { field, .. }
            | Issue::WordTooLong { field, .. }
            | Issue::TooManyNames { field, .. }
            | Issue::FileTooLarge { field, .. }
            | Issue::FileTooSmall { field, .. }
            | Issue::FileTypeNotAllowed { field, .. } => Some(field),
            Issue::CategoryMissing { .. }
            | Issue::SubItemsMissing { .. }
            | Issue::TooManySubItems { .. }
            | Issue::CaptchaMissing => None,
        }
    }

    /// Format the user-facing message for this issue.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Issue::RequiredMissing { label, .. } => format!("{} is required", label),

            Issue::PatternMismatch { message, .. } => message.clone(),

            Issue::TooShort { label, min_len, .. } => {
                format!("{} must be at least {} characters", label, min_len)
            }

            Issue::TooLong { message, .. } => message.clone(),

            Issue::WrongLength { message, .. } => message.clone(),

            Issue::TooManyWords { max_words, .. } => {
                format!("Maximum {} words allowed", max_words)
            }

            Issue::WordTooLong { max_chars, .. } => {
                format!("Each word must be maximum {} characters", max_chars)
            }

            Issue::TooManyNames { max_names, .. } => {
                format!("Maximum {} companies allowed", max_names)
            }

            Issue::FileTooLarge {
                size_bytes,
                max_bytes,
                ..
            } => {
                format!(
                    "File size ({:.2} MB) exceeds the maximum limit of {} MB",
                    megabytes(*size_bytes),
                    trim_decimal(megabytes(*max_bytes))
                )
            }

            Issue::FileTooSmall {
                size_bytes,
                min_bytes,
                ..
            } => {
                format!(
                    "File size ({:.2} KB) is smaller than the minimum requirement of {} KB",
                    kilobytes(*size_bytes),
                    trim_decimal(kilobytes(*min_bytes))
                )
            }

            Issue::FileTypeNotAllowed { allowed, .. } => {
                let names: Vec<String> = allowed.iter().map(|t| short_type_name(t)).collect();
                format!("Invalid file type. Please upload a {} file", names.join("/"))
            }

            Issue::CategoryMissing { label } => format!("Please select a {}", label),

            Issue::SubItemsMissing { label, exactly_one } => {
                if *exactly_one {
                    format!("Please select one {}", label)
                } else {
                    format!("Please select at least one {}", label)
                }
            }

            Issue::TooManySubItems { label, max } => {
                format!("Up to {} {}s can be selected", max, label)
            }

            Issue::CaptchaMissing => "Please verify that you are not a robot.".to_string(),
        }
    }
}

/// Bytes expressed in megabytes.
fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

/// Bytes expressed in kilobytes.
fn kilobytes(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}

/// Render a bound without trailing zeros ("1" rather than "1.00", "4.5"
/// rather than "4.50").
fn trim_decimal(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// MIME type shortened for display ("application/pdf" -> "PDF").
fn short_type_name(mime: &str) -> String {
    mime.rsplit('/').next().unwrap_or(mime).to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_too_large_names_both_sizes() {
        let issue = Issue::FileTooLarge {
            field: "pdf".to_string(),
            size_bytes: 2 * 1024 * 1024,
            max_bytes: 1024 * 1024,
        };
        assert_eq!(
            issue.message(),
            "File size (2.00 MB) exceeds the maximum limit of 1 MB"
        );
    }

    #[test]
    fn file_too_small_names_both_sizes() {
        let issue = Issue::FileTooSmall {
            field: "profileImage".to_string(),
            size_bytes: 10 * 1024,
            min_bytes: 50 * 1024,
        };
        assert_eq!(
            issue.message(),
            "File size (10.00 KB) is smaller than the minimum requirement of 50 KB"
        );
    }

    #[test]
    fn file_type_message_lists_short_names() {
        let issue = Issue::FileTypeNotAllowed {
            field: "profileImage".to_string(),
            allowed: vec!["image/jpeg".to_string(), "image/png".to_string()],
        };
        assert_eq!(
            issue.message(),
            "Invalid file type. Please upload a JPEG/PNG file"
        );
    }

    #[test]
    fn selection_messages() {
        let missing = Issue::CategoryMissing {
            label: "department".to_string(),
        };
        assert_eq!(missing.message(), "Please select a department");

        let one = Issue::SubItemsMissing {
            label: "course".to_string(),
            exactly_one: true,
        };
        assert_eq!(one.message(), "Please select one course");

        let at_least = Issue::SubItemsMissing {
            label: "course".to_string(),
            exactly_one: false,
        };
        assert_eq!(at_least.message(), "Please select at least one course");
    }

    #[test]
    fn issues_survive_serialization() {
        let issue = Issue::FileTooLarge {
            field: "marksheet".to_string(),
            size_bytes: 2 * 1024 * 1024,
            max_bytes: 1024 * 1024,
        };
        let json = serde_json::to_string(&issue).unwrap();
        let back: Issue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, issue);
        assert_eq!(back.message(), issue.message());
    }

    #[test]
    fn form_level_issues_have_no_field() {
        assert_eq!(Issue::CaptchaMissing.field(), None);
        let issue = Issue::RequiredMissing {
            field: "name".to_string(),
            label: "Name".to_string(),
        };
        assert_eq!(issue.field(), Some("name"));
        assert_eq!(issue.message(), "Name is required");
    }
}
