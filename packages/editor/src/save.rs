//! # Detached Saves
//!
//! A save captures the reconciled payload at the moment it is issued and
//! then runs without borrowing the model, so the user can keep editing while
//! it is in flight. The resulting receipt records which document version it
//! persisted ("saved as of version N"); by the time it arrives the model may
//! already be ahead of it.
//!
//! Receipts carry the id of the session that issued them. A receipt from a
//! superseded session is ignored when acknowledged.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pagecraft_model::Document;
use uuid::Uuid;

use crate::gateway::{save_with_fallback, Endpoint, PageIdentifier, PersistenceGateway};
use crate::EditorError;

/// A save that has been issued but not yet run
#[derive(Debug, Clone)]
pub struct SaveJob {
    /// Session that issued the save
    pub session_id: Uuid,

    /// Model version captured by the payload
    pub version: u64,

    /// Reconciled document sent to the gateway
    pub payload: Document,

    /// Document the store will hold once the save lands
    pub(crate) snapshot: Arc<Document>,
}

/// Proof that a save reached the content service
#[derive(Debug, Clone)]
pub struct SaveReceipt {
    pub session_id: Uuid,
    pub version: u64,
    pub endpoint: Endpoint,
    pub saved_at: DateTime<Utc>,
    pub(crate) snapshot: Arc<Document>,
}

impl SaveJob {
    /// Send the full payload, stable identifier first
    pub async fn run(
        self,
        gateway: &dyn PersistenceGateway,
        identifier: &PageIdentifier,
    ) -> Result<SaveReceipt, EditorError> {
        let endpoint = save_with_fallback(gateway, identifier, &self.payload)
            .await
            .map_err(EditorError::SaveFailure)?;

        Ok(SaveReceipt {
            session_id: self.session_id,
            version: self.version,
            endpoint,
            saved_at: Utc::now(),
            snapshot: self.snapshot,
        })
    }
}
