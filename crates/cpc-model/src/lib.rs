//! Shared data model for the campus portal client.
//!
//! Plain data types used across the API client, the live visitor counter,
//! and the form submission engine. No behavior beyond small accessors.

pub mod count;
pub mod directory;
pub mod submission;

pub use count::{ConnectionState, LoadState, VisitCount};
pub use directory::{
    Announcement, Committee, Course, Event, FacultyMember, JobPosting, MediaItem, PlacementRecord,
    ResultNotice, Vertical,
};
pub use submission::{FieldValue, FileUpload, FormKind, SubmissionState};
