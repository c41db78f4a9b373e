//! Mutable state of one open form.
//!
//! The session validates on two cadences: each edit runs the keystroke
//! pass for that field, and submit runs the full sweep. Submission is a
//! state machine; a second submit while one is in flight, or while the
//! success notice is showing, is a no-op. Success clears the form after a
//! fixed delay, failure keeps everything the user typed.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{debug, warn};

use cpc_api::{SubmissionEndpoint, SubmissionPayload};
use cpc_model::{FieldValue, FileUpload, SubmissionState};
use cpc_validate::{FormSchema, Issue, SelectionPolicy, validate_all, validate_field};

/// How long the success notice stays up before the form resets.
pub const SUCCESS_DISMISS_DELAY: Duration = Duration::from_secs(5);

/// A selectable category with its sub-items (a department and its
/// courses).
#[derive(Debug, Clone)]
pub struct Category {
    /// Display name, also the submitted value.
    pub name: String,
    /// Sub-items selectable once this category is chosen.
    pub sub_items: Vec<String>,
}

impl Category {
    /// Build a category from static catalog data.
    #[must_use]
    pub fn new(name: &str, sub_items: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            sub_items: sub_items.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Live state of one form.
pub struct FormSession {
    schema: FormSchema,
    fields: HashMap<String, FieldValue>,
    errors: HashMap<String, String>,
    form_errors: Vec<String>,
    category: Option<String>,
    sub_items: Vec<String>,
    captcha_token: Option<String>,
    state: SubmissionState,
    dismiss_at: Option<Instant>,
}

impl FormSession {
    /// Open a form over its schema.
    #[must_use]
    pub fn new(schema: FormSchema) -> Self {
        Self {
            schema,
            fields: HashMap::new(),
            errors: HashMap::new(),
            form_errors: Vec::new(),
            category: None,
            sub_items: Vec::new(),
            captcha_token: None,
            state: SubmissionState::Idle,
            dismiss_at: None,
        }
    }

    /// The schema this session enforces.
    #[must_use]
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Current submission state.
    #[must_use]
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Inline error for a field, if any.
    #[must_use]
    pub fn field_error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// Form-level errors (selection, bot challenge).
    #[must_use]
    pub fn form_errors(&self) -> &[String] {
        &self.form_errors
    }

    /// Current text of a field, empty when unset.
    #[must_use]
    pub fn field_text(&self, name: &str) -> &str {
        self.fields
            .get(name)
            .and_then(FieldValue::as_text)
            .unwrap_or("")
    }

    /// Stored upload for a file field, if one passed its constraint.
    #[must_use]
    pub fn field_file(&self, name: &str) -> Option<&FileUpload> {
        self.fields.get(name).and_then(FieldValue::as_file)
    }

    /// Record a text edit and run the keystroke pass for that field.
    pub fn set_field(&mut self, name: &str, text: &str) {
        self.fields
            .insert(name.to_string(), FieldValue::from(text.to_string()));

        let Some(rule) = self.schema.rule(name) else {
            return;
        };
        match validate_field(rule, self.fields.get(name)) {
            Some(issue) => {
                self.errors.insert(name.to_string(), issue.message());
            }
            None => {
                self.errors.remove(name);
            }
        }
    }

    /// Store an upload after checking it against the field's constraint.
    ///
    /// A rejected file is not stored; the constraint message appears as
    /// the field's inline error instead. Returns whether the file was
    /// accepted.
    pub fn set_file(&mut self, name: &str, upload: FileUpload) -> bool {
        let constraint = self.schema.rule(name).and_then(|rule| rule.file.clone());
        let Some(constraint) = constraint else {
            warn!(field = name, "no file constraint for field");
            return false;
        };

        if let Some(issue) = cpc_validate::checks::file::check(name, &constraint, &upload) {
            self.errors.insert(name.to_string(), issue.message());
            return false;
        }
        self.errors.remove(name);
        self.fields.insert(name.to_string(), FieldValue::from(upload));
        true
    }

    /// Remove a stored upload.
    pub fn clear_file(&mut self, name: &str) {
        if self.fields.get(name).is_some_and(FieldValue::is_file) {
            self.fields.remove(name);
            self.errors.remove(name);
        }
    }

    /// Chosen category, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Currently selected sub-items, in selection order.
    #[must_use]
    pub fn sub_items(&self) -> &[String] {
        &self.sub_items
    }

    /// Choose a category. Switching categories always clears the
    /// sub-item selection; stale picks must never survive into a payload
    /// for a different category.
    pub fn select_category(&mut self, name: &str) {
        if self.category.as_deref() == Some(name) {
            return;
        }
        self.category = Some(name.to_string());
        self.sub_items.clear();
        self.form_errors.clear();
    }

    /// Toggle a sub-item. Selecting past the bound either replaces the
    /// previous pick or is rejected, per the schema's policy. Returns
    /// whether the selection changed.
    pub fn select_sub_item(&mut self, item: &str) -> bool {
        let Some(selection) = &self.schema.selection else {
            return false;
        };

        if let Some(position) = self.sub_items.iter().position(|chosen| chosen == item) {
            self.sub_items.remove(position);
            return true;
        }

        if self.sub_items.len() < selection.max_sub_items {
            self.sub_items.push(item.to_string());
            self.form_errors.clear();
            return true;
        }

        match selection.policy {
            SelectionPolicy::ReplaceAtBound => {
                self.sub_items.clear();
                self.sub_items.push(item.to_string());
                true
            }
            SelectionPolicy::RejectAtBound => {
                let issue = Issue::TooManySubItems {
                    label: selection.sub_item_label.clone(),
                    max: selection.max_sub_items,
                };
                self.form_errors = vec![issue.message()];
                false
            }
        }
    }

    /// Record a bot-challenge token.
    pub fn set_captcha_token(&mut self, token: &str) {
        self.captcha_token = Some(token.to_string());
        self.form_errors
            .retain(|message| message != &Issue::CaptchaMissing.message());
    }

    /// Run the full submit-time sweep, filling the error maps.
    ///
    /// Returns true when the form is clean.
    pub fn validate(&mut self) -> bool {
        let issues = validate_all(
            &self.schema,
            &self.fields,
            self.category.as_deref(),
            &self.sub_items,
            self.captcha_token.as_deref(),
        );

        self.errors.clear();
        self.form_errors.clear();
        for issue in &issues {
            match issue.field() {
                Some(field) => {
                    // First issue per field wins; later ones would
                    // overwrite the more specific message.
                    self.errors
                        .entry(field.to_string())
                        .or_insert_with(|| issue.message());
                }
                None => self.form_errors.push(issue.message()),
            }
        }
        issues.is_empty()
    }

    /// Validate and submit.
    ///
    /// No-op unless the form is idle or retrying after a failure; a
    /// submit racing an in-flight one, or clicked while the success
    /// notice shows, must not reach the endpoint.
    pub fn submit(&mut self, endpoint: &dyn SubmissionEndpoint, now: Instant) {
        match self.state {
            SubmissionState::Idle | SubmissionState::Failed(_) => {}
            SubmissionState::Submitting | SubmissionState::Success => return,
        }

        if !self.validate() {
            debug!(kind = %self.schema.kind, "submit blocked by validation");
            return;
        }

        self.state = SubmissionState::Submitting;
        let payload = self.build_payload();

        match endpoint.submit(self.schema.kind, &payload) {
            Ok(ack) if ack.is_success() => {
                debug!(kind = %self.schema.kind, "submission accepted");
                self.state = SubmissionState::Success;
                self.dismiss_at = Some(now + SUCCESS_DISMISS_DELAY);
            }
            Ok(_) => {
                self.state = SubmissionState::Failed("An error occurred".to_string());
            }
            Err(err) => {
                warn!(kind = %self.schema.kind, %err, "submission failed");
                self.state = SubmissionState::Failed(err.user_message());
            }
        }
    }

    /// Assemble the submission payload from current state.
    ///
    /// Fields go in schema order; unset text fields are sent empty. A
    /// single-choice selection submits plain text, a multi-choice one a
    /// JSON array.
    #[must_use]
    pub fn build_payload(&self) -> SubmissionPayload {
        let mut payload = SubmissionPayload::new();

        for rule in &self.schema.fields {
            match self.fields.get(&rule.name) {
                Some(FieldValue::File(upload)) => {
                    payload.push_file(&rule.name, upload.clone());
                }
                Some(FieldValue::Text(text)) => payload.push_text(&rule.name, text.clone()),
                None => {
                    if rule.file.is_none() {
                        payload.push_text(&rule.name, "");
                    }
                }
            }
        }

        if let Some(selection) = &self.schema.selection {
            payload.push_text(
                &selection.category_field,
                self.category.clone().unwrap_or_default(),
            );
            if selection.max_sub_items == 1 {
                payload.push_text(
                    &selection.sub_items_field,
                    self.sub_items.first().cloned().unwrap_or_default(),
                );
            } else {
                let items: Vec<Value> = self
                    .sub_items
                    .iter()
                    .map(|item| Value::String(item.clone()))
                    .collect();
                payload.push_json(&selection.sub_items_field, Value::Array(items));
            }
        }

        if self.schema.requires_captcha {
            payload.push_text(
                "captchaToken",
                self.captcha_token.clone().unwrap_or_default(),
            );
        }

        payload
    }

    /// Advance time-based state: reset the form once the success notice
    /// has been up long enough.
    pub fn tick(&mut self, now: Instant) {
        if matches!(self.state, SubmissionState::Success)
            && self.dismiss_at.is_some_and(|at| now >= at)
        {
            self.reset();
        }
    }

    /// Close the form, discarding everything: values, errors, selection,
    /// and any failure state.
    pub fn close(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.fields.clear();
        self.errors.clear();
        self.form_errors.clear();
        self.category = None;
        self.sub_items.clear();
        self.captcha_token = None;
        self.state = SubmissionState::Idle;
        self.dismiss_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use cpc_model::FormKind;

    #[test]
    fn keystroke_error_appears_and_clears() {
        let mut session = FormSession::new(catalog::schema(FormKind::AdmissionInquiry));

        session.set_field("name", "a@b");
        assert_eq!(
            session.field_error("name"),
            Some("Name can only contain letters, numbers, and spaces")
        );

        session.set_field("name", "Asha Rao");
        assert_eq!(session.field_error("name"), None);
    }

    #[test]
    fn single_select_replaces_at_bound() {
        let mut session = FormSession::new(catalog::schema(FormKind::ExamRegistration));
        session.select_category("School of Design");
        assert!(session.select_sub_item("B. Design Product"));
        assert!(session.select_sub_item("M. Design UI UX"));
        assert_eq!(session.sub_items(), ["M. Design UI UX".to_string()]);
    }

    #[test]
    fn multi_select_rejects_past_bound() {
        let mut session = FormSession::new(catalog::schema(FormKind::AdmissionInquiry));
        session.select_category("School of Design");
        assert!(session.select_sub_item("B. Design Product"));
        assert!(session.select_sub_item("B. Design Communication"));
        assert!(!session.select_sub_item("M. Design UI UX"));

        assert_eq!(session.sub_items().len(), 2);
        assert_eq!(session.form_errors(), ["Up to 2 courses can be selected"]);
    }

    #[test]
    fn toggling_deselects() {
        let mut session = FormSession::new(catalog::schema(FormKind::AdmissionInquiry));
        session.select_category("School of Design");
        session.select_sub_item("B. Design Product");
        session.select_sub_item("B. Design Product");
        assert!(session.sub_items().is_empty());
    }

    #[test]
    fn rejected_file_is_not_stored() {
        let mut session = FormSession::new(catalog::schema(FormKind::ExamRegistration));
        let oversized = FileUpload::new("photo.png", "image/png", vec![0; 2 * 1024 * 1024]);

        assert!(!session.set_file("profileImage", oversized));
        assert!(session.field_file("profileImage").is_none());
        assert_eq!(
            session.field_error("profileImage"),
            Some("File size (2.00 MB) exceeds the maximum limit of 1 MB")
        );

        let fine = FileUpload::new("photo.png", "image/png", vec![0; 100 * 1024]);
        assert!(session.set_file("profileImage", fine));
        assert!(session.field_error("profileImage").is_none());
    }

    #[test]
    fn category_switch_clears_sub_items() {
        let mut session = FormSession::new(catalog::schema(FormKind::AdmissionInquiry));
        session.select_category("School of Design");
        session.select_sub_item("B. Design Product");

        session.select_category("Department of Animation");
        assert!(session.sub_items().is_empty());

        // Re-selecting the same category is not a switch.
        session.select_sub_item("B. Sc Animation");
        session.select_category("Department of Animation");
        assert_eq!(session.sub_items().len(), 1);
    }
}
