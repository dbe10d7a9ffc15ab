use indexmap::IndexMap;
use serde_json::Value;

use crate::catalog::{self, ErrorId};
use crate::error::HttpError;
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::failure::{Failure, FailureKind, FieldViolation};
use crate::fault::DomainFault;

/// One classification rule: a name for diagnostics and a matcher that
/// yields a fault when the kind is one it handles
struct Rule {
    name: &'static str,
    apply: fn(&FailureKind) -> Option<DomainFault>,
}

const UNCLASSIFIED: &str = "unclassified";

// Most specific first. The terminal unclassified rule is applied by
// `matching_rule` once every kind has been tried.
static RULES: &[Rule] = &[
    Rule {
        name: "pre-classified",
        apply: |kind| match kind {
            FailureKind::Fault(fault) => Some(fault.clone()),
            _ => None,
        },
    },
    Rule {
        name: "custom",
        apply: |kind| match kind {
            FailureKind::Custom(custom) => catalog::resolve(custom.status_code(), custom.error_code()).map(|entry| {
                let fault = DomainFault::with_message(entry.id(), custom.message());
                match custom.external_error() {
                    Some(external) => fault.with_external_error(external.clone()),
                    None => fault,
                }
            }),
            _ => None,
        },
    },
    Rule {
        name: "illegal-argument",
        apply: |kind| matches!(kind, FailureKind::IllegalArgument).then(|| ErrorId::InvalidRequestParameter.into()),
    },
    Rule {
        name: "field-binding",
        apply: |kind| match kind {
            FailureKind::FieldBinding(violations) => Some(DomainFault::with_message(
                ErrorId::InvalidParameterDetail,
                format!("please check the following input values: {}", render_violations(violations)),
            )),
            _ => None,
        },
    },
    Rule {
        name: "malformed-json",
        apply: |kind| match kind {
            FailureKind::UnreadableBody {
                syntax_error: Some(parser_message),
            } => Some(DomainFault::with_message(
                ErrorId::InvalidJsonDetail,
                format!("invalid JSON value: {parser_message}"),
            )),
            _ => None,
        },
    },
    Rule {
        name: "unreadable-body",
        apply: |kind| {
            matches!(kind, FailureKind::UnreadableBody { .. }).then(|| ErrorId::InvalidRequestParameter.into())
        },
    },
    Rule {
        name: "validation-failed",
        apply: |kind| matches!(kind, FailureKind::ValidationFailed).then(|| ErrorId::InvalidRequestParameter.into()),
    },
    Rule {
        name: "type-mismatch",
        apply: |kind| {
            matches!(kind, FailureKind::TypeMismatch { .. }).then(|| ErrorId::InvalidRequestParameter.into())
        },
    },
    Rule {
        name: "missing-parameter",
        apply: |kind| match kind {
            FailureKind::MissingParameter { name: Some(name) } => Some(DomainFault::with_message(
                ErrorId::InvalidParameterDetail,
                format!("missing parameter: '{name}'"),
            )),
            _ => None,
        },
    },
    Rule {
        name: "missing-part",
        apply: |kind| match kind {
            FailureKind::MissingPart { name } => Some(DomainFault::with_message(
                ErrorId::InvalidParameterDetail,
                format!("missing parameter: '{name}'"),
            )),
            _ => None,
        },
    },
    Rule {
        name: "missing-header",
        apply: |kind| match kind {
            FailureKind::MissingHeader { name } => Some(DomainFault::with_message(
                ErrorId::InvalidParameterDetail,
                format!("missing header: '{name}'"),
            )),
            _ => None,
        },
    },
    Rule {
        name: "method-not-allowed",
        apply: |kind| matches!(kind, FailureKind::MethodNotAllowed { .. }).then(|| ErrorId::UnknownRoute.into()),
    },
    Rule {
        name: "no-route",
        apply: |kind| matches!(kind, FailureKind::NoRoute { .. }).then(|| ErrorId::UnknownRoute.into()),
    },
    Rule {
        name: "duplicate",
        apply: |kind| matches!(kind, FailureKind::Duplicate).then(|| ErrorId::DuplicateRequest.into()),
    },
];

/// Render rejected fields as `{field=value, ...}`
///
/// Strings render bare and a repeated field keeps its last value.
fn render_violations(violations: &[FieldViolation]) -> String {
    let mut rejected: IndexMap<&str, &Value> = IndexMap::with_capacity(violations.len());
    for violation in violations {
        rejected.insert(&violation.field, &violation.rejected);
    }

    let entries: Vec<String> = rejected
        .into_iter()
        .map(|(field, value)| match value {
            Value::String(s) => format!("{field}={s}"),
            other => format!("{field}={other}"),
        })
        .collect();

    format!("{{{}}}", entries.join(", "))
}

/// Turns raised failures into domain faults
///
/// Each of the failure's kinds is tried against the ordered rule list,
/// most specific kind first; the first rule that matches wins. A failure
/// nothing matches becomes `unclassified-internal-error`, so
/// classification never fails.
#[derive(Debug)]
pub struct Classifier<D = TracingDiagnostics> {
    diagnostics: D,
}

impl Classifier {
    /// Classifier that records diagnostics through `tracing`
    pub const fn new() -> Self {
        Self {
            diagnostics: TracingDiagnostics,
        }
    }

    /// Classify without recording anything
    pub fn resolve(raised: &Failure) -> DomainFault {
        matching_rule(raised).1
    }

    /// Name of the rule that handles `raised`
    pub fn explain(raised: &Failure) -> &'static str {
        matching_rule(raised).0
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Diagnostics> Classifier<D> {
    pub const fn with_diagnostics(diagnostics: D) -> Self {
        Self { diagnostics }
    }

    /// Classify a failure and record it; the diagnostic record is written
    /// exactly once, before the fault is returned
    pub fn classify(&self, raised: &Failure) -> DomainFault {
        let fault = matching_rule(raised).1;
        self.diagnostics.record(raised, &fault);
        fault
    }
}

fn matching_rule(raised: &Failure) -> (&'static str, DomainFault) {
    raised
        .kinds()
        .iter()
        .find_map(|kind| {
            RULES
                .iter()
                .find_map(|rule| (rule.apply)(kind).map(|fault| (rule.name, fault)))
        })
        .unwrap_or_else(|| (UNCLASSIFIED, ErrorId::UnclassifiedInternalError.into()))
}
