//! Form sessions for the portal's inquiry and registration forms.
//!
//! A [`FormSession`] owns the mutable state of one open form: field
//! values, inline errors, the category/sub-item selection, and the
//! submission lifecycle. The rules it enforces come from the static
//! catalog; the wire work is delegated to the API client through the
//! [`cpc_api::SubmissionEndpoint`] trait.

pub mod catalog;
pub mod session;

pub use catalog::schema;
pub use session::{Category, FormSession, SUCCESS_DISMISS_DELAY};
