//! Standard response envelope
//!
//! Every endpoint answers with the same outer structure: a status, the API
//! version, a timestamp, the time spent producing the payload, the payload
//! itself and an optional error detail.
//!
//! The envelope is built around a *producer*, a closure returning
//! `Result<Produced, E>`. The builder owns the policy that maps the outcome
//! onto the status taxonomy:
//!
//! | Producer outcome                     | `status`  | `payload` | `error`  |
//! |--------------------------------------|-----------|-----------|----------|
//! | `Ok(Produced::ok(..))`               | `SUCCESS` | set       | absent   |
//! | `Ok(..)` with explicit status        | as given  | as given  | as given |
//! | `Err(e)`                             | `ERROR`   | absent    | from `e` |
//! | panic                                | `ERROR`   | absent    | set      |
//!
//! # Example
//!
//! ```rust
//! use standard_response::response::{PayloadStatus, Produced, StandardResponse};
//! use standard_response::Error;
//!
//! let ok = StandardResponse::build(|| Ok::<_, Error>(Produced::ok(&42_u32)));
//! assert_eq!(ok.status, PayloadStatus::Success);
//!
//! let failed = StandardResponse::build(|| -> Result<Produced, Error> {
//!     Err(Error::Producer("backend unavailable".to_string()))
//! });
//! assert_eq!(failed.status, PayloadStatus::Error);
//! assert!(failed.payload.is_none());
//! assert!(failed.error.is_some());
//! ```

use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::alias::OwnerType;
use crate::config::ResponseConfig;
use crate::error::Error;
use crate::value::{Model, Record, StructuredValue};

/// Outcome category of a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PayloadStatus {
    /// The producer completed normally
    #[default]
    Success,
    /// The producer detected a domain-level failure
    Fail,
    /// The producer faulted
    Error,
}

impl PayloadStatus {
    /// Uppercase name used on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Fail => "FAIL",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for PayloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Model for PayloadStatus {
    fn owner_type() -> OwnerType {
        OwnerType::new("PayloadStatus")
    }

    fn to_structured(&self) -> StructuredValue {
        StructuredValue::Scalar(Value::from(self.as_str()))
    }
}

/// Structured error detail
///
/// Used both as the `error` of an envelope and as a domain-failure payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Additional detail
    pub detail: Option<String>,
}

impl ErrorPayload {
    /// Create an error payload without detail
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            detail: None,
        }
    }

    /// Attach detail
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl From<&Error> for ErrorPayload {
    fn from(error: &Error) -> Self {
        Self::new(error.code(), error.to_string())
    }
}

impl From<Error> for ErrorPayload {
    fn from(error: Error) -> Self {
        Self::from(&error)
    }
}

impl Model for ErrorPayload {
    fn owner_type() -> OwnerType {
        OwnerType::new("ErrorPayload")
    }

    fn to_structured(&self) -> StructuredValue {
        Record::of::<Self>()
            .field("code", &self.code)
            .field("message", &self.message)
            .field("detail", &self.detail)
            .into()
    }
}

/// What a producer hands back to the envelope builder
///
/// `status` and `error` are optional; an unset status means success.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Produced {
    /// Payload of the response
    pub payload: Option<StructuredValue>,
    /// Explicit status, overriding the default `SUCCESS`
    pub status: Option<PayloadStatus>,
    /// Explicit error detail
    pub error: Option<ErrorPayload>,
}

impl Produced {
    /// Create from the full `(payload, status, error)` triple
    pub fn new(
        payload: Option<StructuredValue>,
        status: Option<PayloadStatus>,
        error: Option<ErrorPayload>,
    ) -> Self {
        Self {
            payload,
            status,
            error,
        }
    }

    /// A successful payload
    pub fn ok<M: Model + ?Sized>(payload: &M) -> Self {
        Self::new(Some(payload.to_structured()), None, None)
    }

    /// A domain failure carrying `payload`
    ///
    /// # Example
    ///
    /// ```rust
    /// use standard_response::response::{ErrorPayload, PayloadStatus, Produced, StandardResponse};
    /// use standard_response::Error;
    ///
    /// let rejected = ErrorPayload::new("INVALID_VALUE", "value_2 must not be negative");
    /// let response = StandardResponse::build(|| Ok::<_, Error>(Produced::fail(&rejected)));
    /// assert_eq!(response.status, PayloadStatus::Fail);
    /// assert!(response.payload.is_some());
    /// ```
    pub fn fail<M: Model + ?Sized>(payload: &M) -> Self {
        Self::new(Some(payload.to_structured()), Some(PayloadStatus::Fail), None)
    }

    /// Attach explicit error detail
    #[must_use]
    pub fn with_error(mut self, error: ErrorPayload) -> Self {
        self.error = Some(error);
        self
    }
}

/// The standard response envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandardResponse {
    /// Outcome category
    pub status: PayloadStatus,
    /// API version
    pub version: String,
    /// Creation time of the envelope
    pub datetime: Option<DateTime<Utc>>,
    /// Seconds spent inside the producer
    pub duration: f64,
    /// Payload, absent when the producer faulted
    pub payload: Option<StructuredValue>,
    /// Error detail
    pub error: Option<ErrorPayload>,
}

impl StandardResponse {
    /// Run `producer` and wrap its outcome with default envelope settings
    pub fn build<F, E>(producer: F) -> Self
    where
        F: FnOnce() -> Result<Produced, E>,
        E: fmt::Display,
    {
        Self::build_with(&ResponseConfig::default(), producer)
    }

    /// Run `producer` and wrap its outcome
    ///
    /// The producer is invoked exactly once. Its errors and panics never
    /// escape; both become an `ERROR` envelope.
    pub fn build_with<F, E>(config: &ResponseConfig, producer: F) -> Self
    where
        F: FnOnce() -> Result<Produced, E>,
        E: fmt::Display,
    {
        let datetime = config.include_datetime.then(Utc::now);
        let started = Instant::now();
        let outcome = catch_unwind(AssertUnwindSafe(producer));
        let duration = started.elapsed().as_secs_f64();

        let (status, payload, error) = match outcome {
            Ok(Ok(produced)) => (
                produced.status.unwrap_or_default(),
                produced.payload,
                produced.error,
            ),
            Ok(Err(err)) => {
                let fault = ErrorPayload::from(Error::Producer(err.to_string()));
                tracing::error!(code = %fault.code, error = %fault.message, "Producer failed");
                (PayloadStatus::Error, None, Some(fault))
            }
            Err(panic) => {
                let fault = ErrorPayload::from(Error::Panic(panic_message(panic.as_ref())));
                tracing::error!(code = %fault.code, error = %fault.message, "Producer panicked");
                (PayloadStatus::Error, None, Some(fault))
            }
        };

        tracing::debug!(status = %status, duration, "Built response envelope");

        Self {
            status,
            version: config.version.clone(),
            datetime,
            duration,
            payload,
            error,
        }
    }

    /// Replace the reported API version
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Whether the producer completed normally
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == PayloadStatus::Success
    }
}

impl Model for StandardResponse {
    fn owner_type() -> OwnerType {
        OwnerType::new("StandardResponse")
    }

    fn to_structured(&self) -> StructuredValue {
        let datetime = self
            .datetime
            .map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true));

        Record::of::<Self>()
            .field("status", &self.status)
            .field("version", &self.version)
            .field("datetime", &datetime)
            .field("duration", &self.duration)
            .field("payload", &self.payload)
            .field("error", &self.error)
            .into()
    }
}

#[cfg(feature = "http")]
impl axum::response::IntoResponse for StandardResponse {
    fn into_response(self) -> axum::response::Response {
        // The outcome lives in the body; transport status is always 200
        axum::Json(self.to_structured()).into_response()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
