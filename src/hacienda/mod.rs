//! Payloads exchanged with the Hacienda reception API (recepción v1).
//!
//! This module only shapes and decodes the JSON bodies; sending them,
//! authenticating and signing the XML are left to the caller's HTTP client.

mod environment;
mod submission;

pub use environment::Environment;
pub use submission::{PartyIdentification, ReceptionResponse, ReceptionStatus, SubmissionRequest};
