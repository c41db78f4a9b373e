//! Declarative field validation for portal forms.
//!
//! Each form declares its fields as a table of [`FieldRule`] descriptors
//! interpreted by one generic engine, instead of a per-field conditional
//! chain. Checks are pure functions of the candidate value; they never
//! consult network state.
//!
//! Two validation passes exist:
//!
//! - the *keystroke* pass runs after every input event and only reports
//!   format problems (bad characters, over-length words), so an empty
//!   required field does not flash an error while the user is still typing;
//! - the *submit* pass runs the full rule set, including required-presence
//!   and selection checks, and is the single gate before submission.

pub mod checks;
pub mod engine;
pub mod issue;
pub mod rules;

pub use engine::{validate_all, validate_field};
pub use issue::Issue;
pub use rules::{
    FieldKind, FieldRule, FileConstraint, FormSchema, Pattern, SelectionPolicy, SelectionRule,
    WordLimit,
};
