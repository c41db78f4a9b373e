//! Generic validation engine interpreting a form's rule table.

use std::collections::HashMap;

use cpc_model::FieldValue;

use crate::checks;
use crate::issue::Issue;
use crate::rules::{FieldKind, FieldRule, FormSchema};

/// Keystroke validation for one field against its rule.
///
/// Returns the issue to show inline, or `None` when the field is clean.
/// File values are assumed pre-checked by the set-file path (a stored file
/// already passed its constraint), so only text is inspected here.
#[must_use]
pub fn validate_field(rule: &FieldRule, value: Option<&FieldValue>) -> Option<Issue> {
    match value {
        None => checks::text::check_keystroke(rule, ""),
        Some(FieldValue::Text(text)) => checks::text::check_keystroke(rule, text),
        Some(FieldValue::File(upload)) => {
            let constraint = rule.file.as_ref()?;
            checks::file::check(&rule.name, constraint, upload)
        }
    }
}

/// Full submit-time sweep over every field and the selection state.
///
/// This is the single gate before submission: any returned issue blocks
/// the endpoint call.
#[must_use]
pub fn validate_all(
    schema: &FormSchema,
    fields: &HashMap<String, FieldValue>,
    category: Option<&str>,
    sub_items: &[String],
    captcha_token: Option<&str>,
) -> Vec<Issue> {
    let mut issues = Vec::new();

    for rule in &schema.fields {
        match rule.kind {
            FieldKind::File => {
                match fields.get(&rule.name).and_then(FieldValue::as_file) {
                    Some(upload) => {
                        // Re-check a stored file; cheap, and it keeps the
                        // gate independent of how the value got in.
                        if let Some(constraint) = &rule.file {
                            if let Some(issue) = checks::file::check(&rule.name, constraint, upload)
                            {
                                issues.push(issue);
                            }
                        }
                    }
                    None => {
                        if rule.required {
                            issues.push(Issue::RequiredMissing {
                                field: rule.name.clone(),
                                label: rule.label.clone(),
                            });
                        }
                    }
                }
            }
            _ => {
                let text = fields.get(&rule.name).and_then(FieldValue::as_text);
                if let Some(issue) = checks::text::check_submit(rule, text) {
                    issues.push(issue);
                }
            }
        }
    }

    if let Some(selection) = &schema.selection {
        issues.extend(checks::selection::check(selection, category, sub_items));
    }

    if schema.requires_captcha && captcha_token.is_none_or(str::is_empty) {
        issues.push(Issue::CaptchaMissing);
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::SelectionRule;
    use cpc_model::FormKind;

    fn schema() -> FormSchema {
        FormSchema::new(FormKind::AdmissionInquiry)
            .with_field(FieldRule::text("name", "Name").required().with_pattern(
                r"^[\w\s]*$",
                "Name can only contain letters, numbers, and spaces",
            ))
            .with_field(FieldRule::phone(
                "number",
                "Phone number",
                10,
                "Phone number must be 10 digits",
            ))
            .with_selection(SelectionRule::multi("department", "course", 2))
            .with_captcha()
    }

    #[test]
    fn empty_form_reports_everything() {
        let schema = schema();
        let issues = validate_all(&schema, &HashMap::new(), None, &[], None);

        let messages: Vec<String> = issues.iter().map(Issue::message).collect();
        assert!(messages.contains(&"Name is required".to_string()));
        assert!(messages.contains(&"Please select a department".to_string()));
        assert!(messages.contains(&"Please verify that you are not a robot.".to_string()));
    }

    #[test]
    fn valid_form_is_clean() {
        let schema = schema();
        let mut fields = HashMap::new();
        fields.insert("name".to_string(), FieldValue::from("Asha Rao"));
        fields.insert("number".to_string(), FieldValue::from("9876543210"));
        let sub_items = vec!["B. Design Product".to_string()];

        let issues = validate_all(
            &schema,
            &fields,
            Some("School of Design"),
            &sub_items,
            Some("token"),
        );
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    }

    #[test]
    fn optional_phone_skipped_when_empty() {
        // `number` above is not required, so leaving it out only costs
        // selection/captcha issues, not a phone issue.
        let schema = schema();
        let mut fields = HashMap::new();
        fields.insert("name".to_string(), FieldValue::from("Asha"));
        let issues = validate_all(&schema, &fields, Some("dept"), &["c".to_string()], Some("t"));
        assert!(issues.iter().all(|issue| issue.field() != Some("number")));
    }

    #[test]
    fn empty_captcha_token_is_missing() {
        let schema = schema();
        let issues = validate_all(&schema, &HashMap::new(), None, &[], Some(""));
        assert!(issues.contains(&Issue::CaptchaMissing));
    }
}
