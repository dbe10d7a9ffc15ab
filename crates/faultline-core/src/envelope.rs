//! Canonical response bodies
//!
//! Success: `{"data": ...}` with `data` omitted when absent. List:
//! `{"pageInfo": {...}, "list": [...]}` with `pageInfo` omitted when absent.
//! Error: `{"errorCode": "...", "errorMessage": "...", "externalError": ...}`
//! with `externalError` omitted when absent.

use http::StatusCode;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::catalog::{self, ErrorDescriptor};
use crate::error::HttpError;
use crate::fault::DomainFault;

/// Paging metadata attached to list responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_count: u64,
    pub page: u32,
    pub show_count: u32,
}

impl PageInfo {
    pub const fn new(total_count: u64, page: u32, show_count: u32) -> Self {
        Self {
            total_count,
            page,
            show_count,
        }
    }

    /// Page info for a result set with no rows
    pub const fn empty(page: u32, show_count: u32) -> Self {
        Self::new(0, page, show_count)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataBody<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBody<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_info: Option<PageInfo>,
    pub list: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_code: String,
    pub error_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_error: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EnvelopeBody<T> {
    Data(DataBody<T>),
    List(ListBody<T>),
    Error(ErrorBody),
}

/// A rendered response: the HTTP status plus the body every client sees
///
/// Serializes as the body alone; the status travels out of band.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    status: StatusCode,
    body: EnvelopeBody<T>,
}

impl<T> Envelope<T> {
    /// `200 OK` carrying `data`, or an empty object when there is none
    pub fn from_success(data: impl Into<Option<T>>) -> Self {
        Self {
            status: StatusCode::OK,
            body: EnvelopeBody::Data(DataBody { data: data.into() }),
        }
    }

    /// `200 OK` with no data
    pub const fn empty() -> Self {
        Self {
            status: StatusCode::OK,
            body: EnvelopeBody::Data(DataBody { data: None }),
        }
    }

    /// `200 OK` carrying a list and optional paging metadata
    pub fn from_list(list: Vec<T>, page_info: Option<PageInfo>) -> Self {
        Self {
            status: StatusCode::OK,
            body: EnvelopeBody::List(ListBody { page_info, list }),
        }
    }

    /// Error envelope with the status of the fault's descriptor
    pub fn from_fault(fault: &DomainFault) -> Self {
        Self::from_error(fault)
    }

    /// Error envelope for anything that knows its own wire representation
    pub fn from_error<E: HttpError + ?Sized>(error: &E) -> Self {
        Self {
            status: error.status_code(),
            body: EnvelopeBody::Error(ErrorBody {
                error_code: error.error_code().to_owned(),
                error_message: error.client_message(),
                external_error: error.external_error().cloned(),
            }),
        }
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    pub const fn body(&self) -> &EnvelopeBody<T> {
        &self.body
    }

    pub fn into_parts(self) -> (StatusCode, EnvelopeBody<T>) {
        (self.status, self.body)
    }

    /// The error body, if this is an error envelope
    pub const fn error(&self) -> Option<&ErrorBody> {
        match &self.body {
            EnvelopeBody::Error(error) => Some(error),
            _ => None,
        }
    }

    /// The catalog descriptor this error envelope was rendered from
    pub fn fault_descriptor(&self) -> Option<&'static ErrorDescriptor> {
        self.error()
            .and_then(|error| catalog::resolve(self.status, &error.error_code))
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.body.serialize(serializer)
    }
}

impl<T> From<&DomainFault> for Envelope<T> {
    fn from(fault: &DomainFault) -> Self {
        Self::from_fault(fault)
    }
}
