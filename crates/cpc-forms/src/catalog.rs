//! Static form catalog.
//!
//! One schema per form, mirroring the rules the portal enforces inline.
//! Wire names match what each endpoint expects, so the session can build
//! payloads straight from the schema.

use cpc_model::FormKind;
use cpc_validate::{FieldRule, FileConstraint, FormSchema, SelectionRule};

use crate::session::Category;

const KB: u64 = 1024;
const MB: u64 = 1024 * 1024;

/// Schema for a form kind.
#[must_use]
pub fn schema(kind: FormKind) -> FormSchema {
    match kind {
        FormKind::AdmissionInquiry => admission_inquiry(),
        FormKind::ExamRegistration => exam_registration(),
        FormKind::StudentInquiry => student_inquiry(),
        FormKind::CompanyInquiry => company_inquiry(),
    }
}

/// Admission inquiry: contact details plus a department and up to two
/// courses of interest, gated on a bot challenge.
fn admission_inquiry() -> FormSchema {
    FormSchema::new(FormKind::AdmissionInquiry)
        .with_field(name_field("name", "Name"))
        .with_field(phone_field("number", "Phone number"))
        .with_field(
            FieldRule::text("message", "Message").required().with_pattern(
                r"^[\w\s]*$",
                "Message can only contain letters, numbers, and spaces",
            ),
        )
        .with_selection(SelectionRule::multi("department", "course", 2))
        .with_captcha()
}

/// Entrance-exam registration: candidate details, one department and one
/// course, an exam slot, payment details, and two uploads.
fn exam_registration() -> FormSchema {
    let photo = FileConstraint {
        allowed_types: vec!["image/jpeg".to_string(), "image/png".to_string()],
        min_bytes: Some(50 * KB),
        max_bytes: MB,
    };
    let marksheet = FileConstraint {
        allowed_types: vec!["application/pdf".to_string()],
        min_bytes: Some(50 * KB),
        max_bytes: MB,
    };

    FormSchema::new(FormKind::ExamRegistration)
        .with_field(name_field("name", "Name").keystroke_required().with_min_len(3))
        .with_field(email_field("email", "Email"))
        .with_field(phone_field("number", "Mobile number"))
        .with_field(FieldRule::text("gcasNumber", "GCAS number").required())
        .with_field(FieldRule::text("tID", "Transaction ID").required())
        .with_field(FieldRule::text("examDate", "Exam date").required())
        .with_field(FieldRule::file("profileImage", "Profile photo", photo).required())
        .with_field(FieldRule::file("marksheet", "Marksheet", marksheet).required())
        .with_selection(
            SelectionRule::single("department", "course")
                .with_wire_names("departmentName", "courseName"),
        )
}

/// Student placement inquiry: enrollment details, the student's vertical
/// and course, and the companies of interest.
fn student_inquiry() -> FormSchema {
    FormSchema::new(FormKind::StudentInquiry)
        .with_field(
            FieldRule::text("studentName", "Student name")
                .required()
                .with_pattern(
                    r"^[\w\s]*$",
                    "Student name can only contain letters, numbers, and spaces",
                )
                .with_word_limit(5, 20),
        )
        .with_field(
            FieldRule::text("enrollmentNo", "Enrollment number")
                .required()
                .with_max_len(13, "Enrollment number cannot exceed 13 characters"),
        )
        .with_field(FieldRule::text("semester", "Semester").required())
        .with_field(email_field("email", "Email"))
        .with_field(
            FieldRule::text("companyNames", "Company names")
                .required()
                .with_pattern(
                    r"^[a-zA-Z\s&,]*$",
                    "Company names can only contain letters, spaces, & and commas",
                )
                .with_word_limit(5, 20)
                .with_max_names(5),
        )
        .with_selection(
            SelectionRule::single("vertical", "course")
                .with_wire_names("verticalName", "courseName"),
        )
}

/// Company placement inquiry: HR contact fields, a job description, and
/// an optional PDF attachment.
fn company_inquiry() -> FormSchema {
    let job_description_file = FileConstraint {
        allowed_types: vec!["application/pdf".to_string()],
        min_bytes: None,
        max_bytes: 45 * MB / 10,
    };

    FormSchema::new(FormKind::CompanyInquiry)
        .with_field(
            FieldRule::text("companyName", "Company name")
                .required()
                .with_pattern(
                    r"^[a-zA-Z\s&,]*$",
                    "Company name can only contain letters, spaces, & and commas",
                )
                .with_word_limit(5, 20),
        )
        .with_field(email_field("hrEmail", "HR email"))
        .with_field(phone_field("hrNumber", "HR phone number"))
        .with_field(
            FieldRule::text("jobDescription", "Job description")
                .required()
                .with_word_limit(600, 20),
        )
        .with_field(FieldRule::file(
            "jobDescriptionFile",
            "Job description file",
            job_description_file,
        ))
}

fn name_field(name: &str, label: &str) -> FieldRule {
    FieldRule::text(name, label).required().with_pattern(
        r"^[\w\s]*$",
        &format!("{label} can only contain letters, numbers, and spaces"),
    )
}

fn email_field(name: &str, label: &str) -> FieldRule {
    FieldRule::email(name, label, "Please enter a valid email address").required()
}

fn phone_field(name: &str, label: &str) -> FieldRule {
    FieldRule::phone(name, label, 10, &format!("{label} must be 10 digits")).required()
}

/// Departments offered on the admission and exam forms, with the courses
/// selectable under each.
#[must_use]
pub fn departments() -> Vec<Category> {
    vec![
        Category::new(
            "School of Design",
            &[
                "B. Design Product",
                "B. Design Communication",
                "M. Design UI UX",
            ],
        ),
        Category::new(
            "Department of Animation",
            &["B. Sc Animation", "M. Sc Animation"],
        ),
        Category::new("Department of Fine Arts", &["B. Fine Arts", "M. Fine Arts"]),
    ]
}

/// Exam slots offered on the registration form.
#[must_use]
pub fn exam_dates() -> Vec<String> {
    vec![
        "15 June 2025".to_string(),
        "22 June 2025".to_string(),
        "29 June 2025".to_string(),
    ]
}
