//! Blocking HTTP client for the portal's REST endpoints.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use cpc_model::{
    Announcement, Committee, Event, FacultyMember, FormKind, JobPosting, MediaItem,
    PlacementRecord, ResultNotice, Vertical, VisitCount,
};

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::payload::{SubmissionPayload, endpoint_path};

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Envelope most directory endpoints wrap their data in.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    status: String,
    data: T,
}

/// Structured error body the API returns on rejections.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Acknowledgement returned by submission endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAck {
    /// `"success"` on acceptance.
    #[serde(default)]
    pub status: String,
}

impl SubmitAck {
    /// True when the endpoint accepted the submission.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Anything that can serve the current visit count (the live counter's
/// pull side; tests substitute a fake).
pub trait CountSource {
    /// Fetch the current count.
    fn fetch_count(&self) -> Result<VisitCount>;
}

/// Anything that can accept a form submission (tests substitute a fake).
pub trait SubmissionEndpoint {
    /// Submit a payload for the given form.
    fn submit(&self, kind: FormKind, payload: &SubmissionPayload) -> Result<SubmitAck>;
}

/// Client for the portal REST API.
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Create a client from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base_url: config.base_url.clone(),
            client,
        })
    }

    /// Create a client for an explicit base URL.
    pub fn from_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::new(&Config::with_base_url(base_url))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a JSON body, converting non-success statuses into errors.
    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!(path, "GET");
        let response = self.client.get(self.url(path)).send()?;
        Self::decode(response)
    }

    /// GET an envelope-wrapped body and unwrap its `data`.
    fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let envelope: Envelope<T> = self.get_json(path)?;
        if !envelope.status.is_empty() && envelope.status != "success" {
            return Err(ApiError::Server {
                message: format!("unexpected status '{}'", envelope.status),
            });
        }
        Ok(envelope.data)
    }

    /// Decode a response, extracting a structured `{ message }` error body
    /// when the endpoint rejected the request.
    fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            if let Ok(error) = serde_json::from_str::<ErrorBody>(&body) {
                return Err(ApiError::Server {
                    message: error.message,
                });
            }
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: body,
            });
        }
        response
            .json()
            .map_err(|err| ApiError::MalformedResponse(err.to_string()))
    }

    // ------------------------------------------------------------------
    // Visit counter
    // ------------------------------------------------------------------

    /// Current visitor count.
    pub fn get_visit_count(&self) -> Result<VisitCount> {
        self.get_json("/visits/getCount")
    }

    /// Record one visit. Fire-and-forget: failures are logged, never
    /// surfaced to the user.
    pub fn increment_visits(&self) {
        match self.get_json::<VisitCount>("/visits/incrementCount") {
            Ok(count) => debug!(total = count.total_visits, "visit recorded"),
            Err(err) => warn!(%err, "failed to record visit"),
        }
    }

    // ------------------------------------------------------------------
    // Directory endpoints
    // ------------------------------------------------------------------

    /// All academic verticals.
    pub fn get_verticals(&self) -> Result<Vec<Vertical>> {
        self.get_data("/vertical/getAll")
    }

    /// One vertical with its course list.
    pub fn get_vertical(&self, id: &str) -> Result<Vertical> {
        self.get_data(&format!("/vertical/getVerticalByID/{id}"))
    }

    /// One faculty member.
    pub fn get_faculty(&self, id: &str) -> Result<FacultyMember> {
        self.get_data(&format!("/faculty/getById/{id}"))
    }

    /// Faculty members of a vertical.
    pub fn get_faculty_by_vertical(&self, vertical_id: &str) -> Result<Vec<FacultyMember>> {
        self.get_data(&format!("/faculty/vertical/{vertical_id}"))
    }

    /// Placement records of a vertical.
    pub fn get_placements_by_vertical(&self, vertical_id: &str) -> Result<Vec<PlacementRecord>> {
        self.get_data(&format!("/placement/vertical/{vertical_id}"))
    }

    /// All campus events.
    pub fn get_events(&self) -> Result<Vec<Event>> {
        self.get_data("/event/getAll")
    }

    /// All media-coverage items.
    pub fn get_media(&self) -> Result<Vec<MediaItem>> {
        self.get_data("/media/getAll")
    }

    /// All announcements.
    pub fn get_announcements(&self) -> Result<Vec<Announcement>> {
        self.get_data("/announcement/getAll")
    }

    /// All job postings.
    pub fn get_jobs(&self) -> Result<Vec<JobPosting>> {
        self.get_data("/jobs/getAll")
    }

    /// All committees.
    pub fn get_committees(&self) -> Result<Vec<Committee>> {
        self.get_data("/committees/getAll")
    }

    /// All result notices.
    pub fn get_results(&self) -> Result<Vec<ResultNotice>> {
        self.get_data("/results/getAll")
    }

    // ------------------------------------------------------------------
    // Form submission
    // ------------------------------------------------------------------

    /// Submit a form payload, JSON or multipart depending on whether any
    /// field holds a file.
    pub fn submit_form(&self, kind: FormKind, payload: &SubmissionPayload) -> Result<SubmitAck> {
        let path = endpoint_path(kind);
        debug!(%kind, path, multipart = payload.has_file(), "submitting form");

        let request = self.client.post(self.url(path));
        let response = if payload.has_file() {
            request.multipart(payload.to_multipart()?).send()?
        } else {
            request.json(&payload.to_json()?).send()?
        };
        Self::decode(response)
    }
}

impl CountSource for ApiClient {
    fn fetch_count(&self) -> Result<VisitCount> {
        self.get_visit_count()
    }
}

impl SubmissionEndpoint for ApiClient {
    fn submit(&self, kind: FormKind, payload: &SubmissionPayload) -> Result<SubmitAck> {
        self.submit_form(kind, payload)
    }
}
