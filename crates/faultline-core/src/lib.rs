//! Error classification and response envelopes for Faultline
//!
//! Every request ends in one of two wire shapes: a success envelope carrying data (or a list with
//! page info), or an error envelope carrying a stable code and message. This crate owns the
//! catalog of error descriptors, the per-request [`DomainFault`], the [`Failure`] shape handlers
//! raise, and the [`Classifier`] that turns one into the other. It has no HTTP framework
//! dependency; the server crate adapts it to axum.

#![allow(clippy::must_use_candidate)]

pub mod catalog;
mod classify;
mod diagnostics;
mod envelope;
mod error;
mod failure;
mod fault;

pub use catalog::{CatalogError, ErrorDescriptor, ErrorId};
pub use classify::Classifier;
pub use diagnostics::{Diagnostics, NoopDiagnostics, TracingDiagnostics};
pub use envelope::{DataBody, Envelope, EnvelopeBody, ErrorBody, ListBody, PageInfo};
pub use error::{CustomError, HttpError};
pub use failure::{Failure, FailureKind, FieldViolation};
pub use fault::DomainFault;
