//! # Persistence Gateway
//!
//! Contract between the editor and the remote content service.
//!
//! A page is addressable two ways: a stable identifier and, for pages created
//! before stable identifiers existed, a legacy one. Gateways only implement
//! single-endpoint primitives; the stable-then-legacy fallback lives here so
//! every gateway resolves identifiers the same way.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use async_trait::async_trait;
use pagecraft_model::Document;
use thiserror::Error;
use tracing::{info, warn};

use crate::EditorError;

/// Which of a page's two identifiers an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Stable,
    Legacy,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Stable => write!(f, "stable"),
            Endpoint::Legacy => write!(f, "legacy"),
        }
    }
}

/// Identifiers for one landing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageIdentifier {
    pub stable: String,
    pub legacy: Option<String>,
}

impl PageIdentifier {
    pub fn new(stable: impl Into<String>) -> Self {
        Self {
            stable: stable.into(),
            legacy: None,
        }
    }

    pub fn with_legacy(mut self, legacy: impl Into<String>) -> Self {
        self.legacy = Some(legacy.into());
        self
    }

    /// Endpoints to try, in order, with the id for each
    pub fn attempts(&self) -> Vec<(Endpoint, &str)> {
        let mut attempts = vec![(Endpoint::Stable, self.stable.as_str())];
        if let Some(legacy) = &self.legacy {
            attempts.push((Endpoint::Legacy, legacy.as_str()));
        }
        attempts
    }
}

impl fmt::Display for PageIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.legacy {
            Some(legacy) => write!(f, "{} (legacy {})", self.stable, legacy),
            None => write!(f, "{}", self.stable),
        }
    }
}

/// Successful load responses
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(Document),

    /// Credentials are not available yet; retry the whole load later
    AuthPending,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Page not found")]
    NotFound,

    #[error("Credentials rejected")]
    Unauthorized,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server returned {code}: {body}")]
    Status { code: u16, body: String },

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Save rejected by server: {0}")]
    Rejected(String),
}

/// Remote store for landing pages
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Fetch a page from one endpoint
    async fn load_from(&self, endpoint: Endpoint, id: &str) -> Result<LoadOutcome, GatewayError>;

    /// Store the full document at one endpoint
    async fn save_to(&self, endpoint: Endpoint, id: &str, document: &Document) -> Result<(), GatewayError>;
}

/// Load a page, falling back to the legacy identifier on any failure.
///
/// `AuthPending` from either endpoint defers the whole load and is returned
/// as-is.
pub async fn load_with_fallback(
    gateway: &dyn PersistenceGateway,
    identifier: &PageIdentifier,
) -> Result<LoadOutcome, EditorError> {
    let mut failures = Vec::new();

    for (endpoint, id) in identifier.attempts() {
        match gateway.load_from(endpoint, id).await {
            Ok(outcome) => {
                if matches!(outcome, LoadOutcome::AuthPending) {
                    info!(%endpoint, id, "Load deferred until credentials are available");
                } else {
                    info!(%endpoint, id, "Loaded page");
                }
                return Ok(outcome);
            }
            Err(error) => {
                warn!(%endpoint, id, %error, "Page load attempt failed");
                failures.push(error);
            }
        }
    }

    let mut failures = failures.into_iter();
    Err(EditorError::LoadFailure {
        identifier: identifier.to_string(),
        stable: failures.next().unwrap_or(GatewayError::NotFound),
        legacy: failures.next(),
    })
}

/// Save a page, falling back to the legacy identifier on any failure.
///
/// Returns the endpoint that accepted the document.
pub async fn save_with_fallback(
    gateway: &dyn PersistenceGateway,
    identifier: &PageIdentifier,
    document: &Document,
) -> Result<Endpoint, GatewayError> {
    let mut last_error = GatewayError::NotFound;

    for (endpoint, id) in identifier.attempts() {
        match gateway.save_to(endpoint, id, document).await {
            Ok(()) => {
                info!(%endpoint, id, "Saved page");
                return Ok(endpoint);
            }
            Err(error) => {
                warn!(%endpoint, id, %error, "Page save attempt failed");
                last_error = error;
            }
        }
    }

    Err(last_error)
}

/// In-memory gateway for tests and offline editing
#[derive(Debug, Default)]
pub struct MemoryGateway {
    pages: Mutex<HashMap<(Endpoint, String), Document>>,
    failures: Mutex<HashMap<Endpoint, GatewayError>>,
    auth_pending: Mutex<bool>,
    saves: Mutex<usize>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, endpoint: Endpoint, id: impl Into<String>, document: Document) {
        lock(&self.pages).insert((endpoint, id.into()), document);
    }

    /// Make every operation on `endpoint` fail with `error`
    pub fn fail(&self, endpoint: Endpoint, error: GatewayError) {
        lock(&self.failures).insert(endpoint, error);
    }

    pub fn recover(&self, endpoint: Endpoint) {
        lock(&self.failures).remove(&endpoint);
    }

    pub fn set_auth_pending(&self, pending: bool) {
        *lock(&self.auth_pending) = pending;
    }

    /// Document currently stored under `id` at `endpoint`
    pub fn page(&self, endpoint: Endpoint, id: &str) -> Option<Document> {
        lock(&self.pages).get(&(endpoint, id.to_string())).cloned()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        *lock(&self.saves)
    }

    fn check(&self, endpoint: Endpoint) -> Result<(), GatewayError> {
        match lock(&self.failures).get(&endpoint) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

// A poisoned lock only means another test thread panicked mid-update
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl PersistenceGateway for MemoryGateway {
    async fn load_from(&self, endpoint: Endpoint, id: &str) -> Result<LoadOutcome, GatewayError> {
        if *lock(&self.auth_pending) {
            return Ok(LoadOutcome::AuthPending);
        }
        self.check(endpoint)?;

        self.page(endpoint, id)
            .map(LoadOutcome::Loaded)
            .ok_or(GatewayError::NotFound)
    }

    async fn save_to(&self, endpoint: Endpoint, id: &str, document: &Document) -> Result<(), GatewayError> {
        if *lock(&self.auth_pending) {
            return Err(GatewayError::Unauthorized);
        }
        self.check(endpoint)?;

        self.insert(endpoint, id, document.clone());
        *lock(&self.saves) += 1;
        Ok(())
    }
}
