//! Error types for the editor

use thiserror::Error;

use crate::edits::EditError;
use crate::gateway::GatewayError;

#[derive(Error, Debug)]
pub enum EditorError {
    /// Neither identifier produced a page; the session cannot start
    #[error("Failed to load page {identifier}: {stable}")]
    LoadFailure {
        identifier: String,
        stable: GatewayError,
        legacy: Option<GatewayError>,
    },

    /// The document and history are untouched and the save may be retried
    #[error("Failed to save page: {0}")]
    SaveFailure(#[source] GatewayError),

    #[error("Edit error: {0}")]
    Edit(#[from] EditError),
}

impl EditorError {
    /// Whether retrying the same operation can succeed without user changes
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EditorError::SaveFailure(_))
    }
}
