//! File upload checks: size interval and MIME allow-list.

use cpc_model::FileUpload;

use crate::issue::Issue;
use crate::rules::FileConstraint;

/// Check an upload against a field's constraint.
///
/// Size bounds are checked before the type allow-list, matching the order
/// the portal reports problems in. Returns the first violation only; a
/// rejected file is never stored, so one message at a time is enough.
pub fn check(field: &str, constraint: &FileConstraint, upload: &FileUpload) -> Option<Issue> {
    let size = upload.size_bytes();

    if size > constraint.max_bytes {
        return Some(Issue::FileTooLarge {
            field: field.to_string(),
            size_bytes: size,
            max_bytes: constraint.max_bytes,
        });
    }

    if let Some(min_bytes) = constraint.min_bytes {
        if size < min_bytes {
            return Some(Issue::FileTooSmall {
                field: field.to_string(),
                size_bytes: size,
                min_bytes,
            });
        }
    }

    if !constraint
        .allowed_types
        .iter()
        .any(|allowed| allowed == &upload.content_type)
    {
        return Some(Issue::FileTypeNotAllowed {
            field: field.to_string(),
            allowed: constraint.allowed_types.clone(),
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;

    fn marksheet_constraint() -> FileConstraint {
        FileConstraint {
            allowed_types: vec!["application/pdf".to_string()],
            min_bytes: Some(50 * KB),
            max_bytes: MB,
        }
    }

    fn pdf(size: usize) -> FileUpload {
        FileUpload::new("marksheet.pdf", "application/pdf", vec![0u8; size])
    }

    #[test]
    fn accepts_file_within_interval() {
        let constraint = marksheet_constraint();
        assert!(check("pdf", &constraint, &pdf(200 * KB as usize)).is_none());
    }

    #[test]
    fn rejects_oversized_file() {
        let constraint = marksheet_constraint();
        let issue = check("pdf", &constraint, &pdf(2 * MB as usize)).unwrap();
        assert!(matches!(issue, Issue::FileTooLarge { .. }));
    }

    #[test]
    fn rejects_undersized_file() {
        let constraint = marksheet_constraint();
        let issue = check("pdf", &constraint, &pdf(10 * KB as usize)).unwrap();
        assert!(matches!(issue, Issue::FileTooSmall { .. }));
    }

    #[test]
    fn rejects_disallowed_type() {
        let constraint = marksheet_constraint();
        let upload = FileUpload::new("photo.png", "image/png", vec![0u8; 200 * KB as usize]);
        let issue = check("pdf", &constraint, &upload).unwrap();
        assert!(matches!(issue, Issue::FileTypeNotAllowed { .. }));
    }

    #[test]
    fn size_bound_reported_before_type() {
        let constraint = marksheet_constraint();
        let upload = FileUpload::new("photo.png", "image/png", vec![0u8; 2 * MB as usize]);
        let issue = check("pdf", &constraint, &upload).unwrap();
        assert!(matches!(issue, Issue::FileTooLarge { .. }));
    }
}
