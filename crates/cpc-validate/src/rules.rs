//! Field-rule descriptors and form schemas.
//!
//! A form is a table of [`FieldRule`] entries plus an optional
//! [`SelectionRule`] for its category/sub-item picker. The engine in
//! [`crate::engine`] interprets the table; nothing here executes checks.

use cpc_model::FormKind;
use regex::Regex;

/// What a field fundamentally holds; drives which checks apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Email address (pattern check).
    Email,
    /// Phone number: digits only while typing, exact length at submit.
    Phone,
    /// File upload with type and size constraints.
    File,
}

/// Allowed-character pattern with the message shown when it fails.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub regex: Regex,
    pub message: String,
}

impl Pattern {
    /// Compile a pattern.
    ///
    /// # Panics
    ///
    /// Panics on an invalid regex; patterns are static catalog data.
    #[must_use]
    pub fn new(regex: &str, message: impl Into<String>) -> Self {
        Self {
            regex: Regex::new(regex).expect("valid catalog regex"),
            message: message.into(),
        }
    }
}

/// Word-count limits applied to free-text fields.
#[derive(Debug, Clone, Copy)]
pub struct WordLimit {
    /// Maximum number of whitespace-separated words.
    pub max_words: usize,
    /// Maximum characters per word.
    pub max_chars_per_word: usize,
}

/// Size and type constraints for a file field.
#[derive(Debug, Clone)]
pub struct FileConstraint {
    /// MIME types accepted for this field.
    pub allowed_types: Vec<String>,
    /// Minimum size in bytes, when a lower bound exists.
    pub min_bytes: Option<u64>,
    /// Maximum size in bytes.
    pub max_bytes: u64,
}

/// Declarative description of one form field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    /// Wire name used in the submission payload (e.g. `tID`).
    pub name: String,
    /// Display label used in messages (e.g. `Transaction ID`).
    pub label: String,
    pub kind: FieldKind,
    /// Empty value rejected at submit time.
    pub required: bool,
    /// Also report an empty value on every keystroke (a few source fields
    /// validate presence while typing).
    pub keystroke_required: bool,
    pub pattern: Option<Pattern>,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    /// Exact digit count for phone-style fields.
    pub exact_len: Option<usize>,
    /// Message shown when `exact_len` is violated.
    pub exact_len_message: Option<String>,
    /// Message shown when `max_len` is violated.
    pub max_len_message: Option<String>,
    pub word_limit: Option<WordLimit>,
    /// Treat the value as a comma-separated name list with this many
    /// entries at most; the word limit then applies per entry.
    pub max_names: Option<usize>,
    pub file: Option<FileConstraint>,
}

impl FieldRule {
    fn base(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            keystroke_required: false,
            pattern: None,
            min_len: None,
            max_len: None,
            exact_len: None,
            exact_len_message: None,
            max_len_message: None,
            word_limit: None,
            max_names: None,
            file: None,
        }
    }

    /// A free-text field.
    #[must_use]
    pub fn text(name: &str, label: &str) -> Self {
        Self::base(name, label, FieldKind::Text)
    }

    /// An email field with the standard address pattern.
    #[must_use]
    pub fn email(name: &str, label: &str, message: &str) -> Self {
        let mut rule = Self::base(name, label, FieldKind::Email);
        rule.pattern = Some(Pattern::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$", message));
        rule
    }

    /// A phone field: digits only while typing, exact digit count at submit.
    #[must_use]
    pub fn phone(name: &str, label: &str, digits: usize, wrong_length_message: &str) -> Self {
        let mut rule = Self::base(name, label, FieldKind::Phone);
        rule.pattern = Some(Pattern::new(
            r"^\d*$",
            format!("{} can only contain digits", label),
        ));
        rule.exact_len = Some(digits);
        rule.exact_len_message = Some(wrong_length_message.to_string());
        rule
    }

    /// A file field with its constraint.
    #[must_use]
    pub fn file(name: &str, label: &str, constraint: FileConstraint) -> Self {
        let mut rule = Self::base(name, label, FieldKind::File);
        rule.file = Some(constraint);
        rule
    }

    /// Mark the field required at submit time.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Also report emptiness on every keystroke.
    #[must_use]
    pub fn keystroke_required(mut self) -> Self {
        self.required = true;
        self.keystroke_required = true;
        self
    }

    /// Set the allowed-character pattern.
    #[must_use]
    pub fn with_pattern(mut self, regex: &str, message: &str) -> Self {
        self.pattern = Some(Pattern::new(regex, message));
        self
    }

    /// Set a minimum length.
    #[must_use]
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = Some(min_len);
        self
    }

    /// Set a maximum length with its message.
    #[must_use]
    pub fn with_max_len(mut self, max_len: usize, message: &str) -> Self {
        self.max_len = Some(max_len);
        self.max_len_message = Some(message.to_string());
        self
    }

    /// Apply word-count limits.
    #[must_use]
    pub fn with_word_limit(mut self, max_words: usize, max_chars_per_word: usize) -> Self {
        self.word_limit = Some(WordLimit {
            max_words,
            max_chars_per_word,
        });
        self
    }

    /// Treat the value as a comma-separated name list.
    #[must_use]
    pub fn with_max_names(mut self, max_names: usize) -> Self {
        self.max_names = Some(max_names);
        self
    }
}

/// How `select_sub_item` behaves once the bound is reached and a new item
/// arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Drop the previous selection and keep the new item (single-select).
    ReplaceAtBound,
    /// Keep the existing selection and reject the new item (multi-select).
    RejectAtBound,
}

/// Category/sub-item selection constraints for a form.
#[derive(Debug, Clone)]
pub struct SelectionRule {
    /// Label used in messages for the category level ("department").
    pub category_label: String,
    /// Label used in messages for sub-items ("course").
    pub sub_item_label: String,
    /// Payload key the chosen category is submitted under.
    pub category_field: String,
    /// Payload key the chosen sub-items are submitted under.
    pub sub_items_field: String,
    /// Minimum number of sub-items required at submit.
    pub min_sub_items: usize,
    /// Maximum number of sub-items selectable.
    pub max_sub_items: usize,
    pub policy: SelectionPolicy,
}

impl SelectionRule {
    /// Single choice: the bound is one and a new pick replaces the old.
    #[must_use]
    pub fn single(category_label: &str, sub_item_label: &str) -> Self {
        Self {
            category_label: category_label.to_string(),
            sub_item_label: sub_item_label.to_string(),
            category_field: "department".to_string(),
            sub_items_field: "courses".to_string(),
            min_sub_items: 1,
            max_sub_items: 1,
            policy: SelectionPolicy::ReplaceAtBound,
        }
    }

    /// Bounded multi-choice: extra picks beyond `max` are rejected.
    #[must_use]
    pub fn multi(category_label: &str, sub_item_label: &str, max: usize) -> Self {
        Self {
            category_label: category_label.to_string(),
            sub_item_label: sub_item_label.to_string(),
            category_field: "department".to_string(),
            sub_items_field: "courses".to_string(),
            min_sub_items: 1,
            max_sub_items: max,
            policy: SelectionPolicy::RejectAtBound,
        }
    }

    /// Override the payload keys the selection is submitted under.
    #[must_use]
    pub fn with_wire_names(mut self, category_field: &str, sub_items_field: &str) -> Self {
        self.category_field = category_field.to_string();
        self.sub_items_field = sub_items_field.to_string();
        self
    }
}

/// Full declarative description of a form.
#[derive(Debug, Clone)]
pub struct FormSchema {
    pub kind: FormKind,
    pub fields: Vec<FieldRule>,
    pub selection: Option<SelectionRule>,
    /// Submission requires a bot-challenge token.
    pub requires_captcha: bool,
}

impl FormSchema {
    /// Create a schema with no fields yet.
    #[must_use]
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            fields: Vec::new(),
            selection: None,
            requires_captcha: false,
        }
    }

    /// Append a field rule.
    #[must_use]
    pub fn with_field(mut self, rule: FieldRule) -> Self {
        self.fields.push(rule);
        self
    }

    /// Attach the selection rule.
    #[must_use]
    pub fn with_selection(mut self, rule: SelectionRule) -> Self {
        self.selection = Some(rule);
        self
    }

    /// Gate submission on a bot-challenge token.
    #[must_use]
    pub fn with_captcha(mut self) -> Self {
        self.requires_captcha = true;
        self
    }

    /// Look up a rule by wire name.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.name == name)
    }
}
