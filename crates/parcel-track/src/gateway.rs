use std::fmt;
use std::sync::Arc;

use crate::package::{ModalKind, PackageId};

/// A backend operation. Each maps to one fixed route and method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    UpdateTitle,
    DeletePackage,
    FetchTrackingData,
}

impl Action {
    /// Route path relative to the page's base URL.
    pub fn route(self) -> &'static str {
        match self {
            Self::UpdateTitle => "updatePackageTitle",
            Self::DeletePackage => "deletePackage",
            Self::FetchTrackingData => "packageData",
        }
    }

    pub fn method(self) -> &'static str {
        "POST"
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.route())
    }
}

/// Ordered form fields for a request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    fields: Vec<(&'static str, String)>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((name, value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    /// Percent-encode as `application/x-www-form-urlencoded`.
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.fields.iter().map(|(k, v)| (*k, v.as_str())))
            .finish()
    }
}

/// What came back from a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: u16,
    pub body: String,
}

impl Outcome {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    /// Network failure or timeout: no HTTP status was received.
    pub fn transport_failure(reason: impl Into<String>) -> Self {
        Self::new(0, reason)
    }

    pub fn is_ok_status(&self) -> bool {
        self.status == 200
    }
}

/// Issues outbound requests for backend actions.
///
/// Implementations perform exactly one network call per `submit` and never
/// retry. Every failure is reported through the returned `Outcome`.
#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    async fn submit(&self, action: Action, payload: &Payload) -> Outcome;
}

#[async_trait::async_trait]
impl<T: Gateway + ?Sized> Gateway for Arc<T> {
    async fn submit(&self, action: Action, payload: &Payload) -> Outcome {
        (**self).submit(action, payload).await
    }
}

/// Correlates a completion with the state that issued the request.
///
/// The generation is compared when the completion arrives; a mismatch
/// means the owner has moved on and the outcome is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ticket {
    Modal { kind: ModalKind, generation: u64 },
    Section { package: PackageId, generation: u64 },
}

/// A request a controller wants executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub ticket: Ticket,
    pub action: Action,
    pub payload: Payload,
}

impl Request {
    /// Run this request through `gateway`, producing its completion.
    pub async fn execute<G: Gateway + ?Sized>(self, gateway: &G) -> Completion {
        tracing::debug!(action = %self.action, ticket = ?self.ticket, "submitting request");
        let outcome = gateway.submit(self.action, &self.payload).await;
        Completion {
            ticket: self.ticket,
            outcome,
        }
    }
}

/// The one-shot result for a `Request`, routed back by ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub ticket: Ticket,
    pub outcome: Outcome,
}
