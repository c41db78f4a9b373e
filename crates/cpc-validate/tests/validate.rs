//! Engine-level validation tests.

use std::collections::HashMap;

use cpc_model::{FieldValue, FileUpload, FormKind};
use cpc_validate::{
    FieldRule, FileConstraint, FormSchema, Issue, SelectionRule, validate_all, validate_field,
};

const KB: u64 = 1024;
const MB: u64 = 1024 * 1024;

fn registration_schema() -> FormSchema {
    FormSchema::new(FormKind::ExamRegistration)
        .with_field(FieldRule::text("name", "Name").required().with_min_len(3))
        .with_field(
            FieldRule::email("email", "Email", "Invalid email address").required(),
        )
        .with_field(
            FieldRule::phone("number", "Mobile number", 10, "Invalid mobile number (10 digits)")
                .required(),
        )
        .with_field(
            FieldRule::file(
                "profileImage",
                "Profile Photo",
                FileConstraint {
                    allowed_types: vec!["image/jpeg".to_string(), "image/png".to_string()],
                    min_bytes: Some(50 * KB),
                    max_bytes: MB,
                },
            )
            .required(),
        )
        .with_selection(SelectionRule::single("department", "course"))
}

fn valid_fields() -> HashMap<String, FieldValue> {
    let mut fields = HashMap::new();
    fields.insert("name".to_string(), FieldValue::from("Asha Rao"));
    fields.insert("email".to_string(), FieldValue::from("asha@example.com"));
    fields.insert("number".to_string(), FieldValue::from("9876543210"));
    fields.insert(
        "profileImage".to_string(),
        FieldValue::from(FileUpload::new(
            "me.png",
            "image/png",
            vec![0u8; 200 * KB as usize],
        )),
    );
    fields
}

#[test]
fn fully_valid_registration_passes() {
    let schema = registration_schema();
    let chosen = vec!["M.Sc. IT Animation & VFX".to_string()];
    let issues = validate_all(
        &schema,
        &valid_fields(),
        Some("Department of Animation"),
        &chosen,
        None,
    );
    assert!(issues.is_empty(), "unexpected issues: {issues:?}");
}

#[test]
fn missing_upload_blocks_submit() {
    let schema = registration_schema();
    let mut fields = valid_fields();
    fields.remove("profileImage");
    let chosen = vec!["M.Sc. IT Animation & VFX".to_string()];
    let issues = validate_all(
        &schema,
        &fields,
        Some("Department of Animation"),
        &chosen,
        None,
    );
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field(), Some("profileImage"));
    assert_eq!(issues[0].message(), "Profile Photo is required");
}

#[test]
fn oversized_upload_reports_the_violated_bound() {
    let schema = registration_schema();
    let rule = schema.rule("profileImage").unwrap();
    let upload = FileUpload::new("big.png", "image/png", vec![0u8; 3 * MB as usize]);
    let issue = validate_field(rule, Some(&FieldValue::from(upload))).unwrap();
    insta::assert_snapshot!(
        issue.message(),
        @"File size (3.00 MB) exceeds the maximum limit of 1 MB"
    );
}

#[test]
fn undersized_upload_reports_the_violated_bound() {
    let schema = registration_schema();
    let rule = schema.rule("profileImage").unwrap();
    let upload = FileUpload::new("tiny.png", "image/png", vec![0u8; 20 * KB as usize]);
    let issue = validate_field(rule, Some(&FieldValue::from(upload))).unwrap();
    insta::assert_snapshot!(
        issue.message(),
        @"File size (20.00 KB) is smaller than the minimum requirement of 50 KB"
    );
}

#[test]
fn wrong_upload_type_message() {
    let schema = registration_schema();
    let rule = schema.rule("profileImage").unwrap();
    let upload = FileUpload::new("cv.pdf", "application/pdf", vec![0u8; 200 * KB as usize]);
    let issue = validate_field(rule, Some(&FieldValue::from(upload))).unwrap();
    insta::assert_snapshot!(
        issue.message(),
        @"Invalid file type. Please upload a JPEG/PNG file"
    );
}

#[test]
fn short_name_keystroke_message() {
    let schema = registration_schema();
    let rule = schema.rule("name").unwrap();
    let issue = validate_field(rule, Some(&FieldValue::from("Al"))).unwrap();
    insta::assert_snapshot!(issue.message(), @"Name must be at least 3 characters");
}

#[test]
fn invalid_email_message() {
    let schema = registration_schema();
    let rule = schema.rule("email").unwrap();
    let issue = validate_field(rule, Some(&FieldValue::from("not-an-email"))).unwrap();
    insta::assert_snapshot!(issue.message(), @"Invalid email address");
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any 10-digit string satisfies the phone rule at submit time.
        #[test]
        fn ten_digit_phones_pass(digits in "[0-9]{10}") {
            let schema = registration_schema();
            let rule = schema.rule("number").unwrap();
            let issue = cpc_validate::checks::text::check_submit(rule, Some(&digits));
            prop_assert!(issue.is_none());
        }

        /// Any other digit count fails with the exact-length message.
        #[test]
        fn other_digit_counts_fail(digits in "[0-9]{1,9}|[0-9]{11,14}") {
            let schema = registration_schema();
            let rule = schema.rule("number").unwrap();
            let issue = cpc_validate::checks::text::check_submit(rule, Some(&digits)).unwrap();
            prop_assert!(
                matches!(issue, Issue::WrongLength { .. }),
                "expected Issue::WrongLength, got {issue:?}"
            );
        }

        /// Files inside the size interval with an allowed type always pass.
        #[test]
        fn in_interval_files_pass(size in 50 * KB..=MB) {
            let schema = registration_schema();
            let rule = schema.rule("profileImage").unwrap();
            let upload = FileUpload::new("p.png", "image/png", vec![0u8; size as usize]);
            prop_assert!(validate_field(rule, Some(&FieldValue::from(upload))).is_none());
        }
    }
}
