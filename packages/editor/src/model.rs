//! # Document Model
//!
//! Owns the page being edited and its history for one editor session.
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Edit/Undo/Redo → Reconcile → Save
//!   ↓          ↓              ↓         ↓
//! Gateway   History        Payload   Gateway
//! ```
//!
//! Every change to the document goes through [`DocumentModel::apply_edit`],
//! which pushes the new state onto the history. Undo and redo only move the
//! history pointer and never call the generator or the gateway.

use std::sync::Arc;

use pagecraft_compiler_html::{compile_document, export_page, CompileOptions, ExportedPage};
use pagecraft_model::{ContentSource, Document};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::edits::{Edit, EditError};
use crate::gateway::{load_with_fallback, LoadOutcome, PageIdentifier, PersistenceGateway};
use crate::history::{HistoryEntry, HistoryStack, DEFAULT_MAX_ENTRIES};
use crate::reconcile::{reconcile, ActiveEdit};
use crate::save::{SaveJob, SaveReceipt};
use crate::EditorError;

/// Result of starting a session from the content service
#[derive(Debug)]
pub enum SessionLoad {
    Ready(DocumentModel),

    /// Credentials are not available yet; call load again once they are
    AuthPending,
}

/// Editable landing page plus its undo/redo history
#[derive(Debug)]
pub struct DocumentModel {
    /// Unique session identifier
    session_id: Uuid,

    history: HistoryStack,

    /// Increments on every change to the current document
    version: u64,

    /// Document the store holds as of the last acknowledged save; the loaded
    /// document until a save lands
    saved: Arc<Document>,

    /// Version captured by the last acknowledged save
    saved_version: Option<u64>,

    options: CompileOptions,
}

impl DocumentModel {
    /// Start a session from an already loaded document
    pub fn from_document(document: Document) -> Self {
        Self::with_history_limit(document, DEFAULT_MAX_ENTRIES)
    }

    /// Start a session with a custom history entry limit (0 = unlimited)
    pub fn with_history_limit(document: Document, max_entries: usize) -> Self {
        let history = HistoryStack::with_max_entries(document, max_entries);
        let saved = history.original().document.clone();

        Self {
            session_id: Uuid::new_v4(),
            history,
            version: 0,
            saved,
            saved_version: None,
            options: CompileOptions::default(),
        }
    }

    /// Set the formatting used when regenerating markup
    pub fn with_compile_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// Load a page through the gateway, stable identifier first.
    ///
    /// The loaded document becomes history entry 0.
    pub async fn load(
        gateway: &dyn PersistenceGateway,
        identifier: &PageIdentifier,
    ) -> Result<SessionLoad, EditorError> {
        match load_with_fallback(gateway, identifier).await? {
            LoadOutcome::Loaded(document) => {
                let model = Self::from_document(document);
                info!(session = %model.session_id, page = %identifier, "Editor session started");
                Ok(SessionLoad::Ready(model))
            }
            LoadOutcome::AuthPending => Ok(SessionLoad::AuthPending),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Current document
    pub fn document(&self) -> &Document {
        &self.history.current().document
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Version captured by the last acknowledged save, if any save happened
    pub fn last_saved_version(&self) -> Option<u64> {
        self.saved_version
    }

    /// True when the current document differs from what the last
    /// acknowledged save stored.
    ///
    /// A save that carried an active edit stored the reconciled payload, so
    /// the model stays dirty until those values are committed.
    pub fn is_dirty(&self) -> bool {
        *self.saved != *self.document()
    }

    /// Commit a new document produced from the current one.
    ///
    /// When the current document renders its components and the mutator
    /// changes `html` but leaves `components` alone, the hand-edited markup
    /// is kept and the result's source becomes [`ContentSource::Markup`], as
    /// with [`Edit::SetHtml`]. Otherwise derived markup is regenerated.
    pub fn apply_edit<F>(&mut self, mutator: F) -> u64
    where
        F: FnOnce(&Document) -> Document,
    {
        let next = self.mutate(mutator);
        self.commit(HistoryEntry::new(next))
    }

    /// Like [`apply_edit`](Self::apply_edit) with a history label
    pub fn apply_edit_labeled<F>(&mut self, label: impl Into<String>, mutator: F) -> u64
    where
        F: FnOnce(&Document) -> Document,
    {
        let next = self.mutate(mutator);
        self.commit(HistoryEntry::new(next).with_label(label))
    }

    fn mutate<F>(&self, mutator: F) -> Document
    where
        F: FnOnce(&Document) -> Document,
    {
        let current = self.document();
        let mut next = mutator(current);

        if current.renders_components()
            && next.renders_components()
            && next.components == current.components
            && next.html != current.html
        {
            debug!("Markup edited directly; switching source to markup");
            next.source = ContentSource::Markup;
        }

        next
    }

    /// Apply one edit; nothing is committed if it fails validation
    pub fn apply(&mut self, edit: Edit) -> Result<u64, EditError> {
        let label = edit.describe();
        self.apply_labeled(label, edit)
    }

    pub fn apply_labeled(&mut self, label: impl Into<String>, edit: Edit) -> Result<u64, EditError> {
        let next = edit.apply(self.document())?;
        Ok(self.commit(HistoryEntry::new(next).with_label(label)))
    }

    /// Apply several edits as a single undo step.
    ///
    /// Edits run in order against the intermediate results; if any fails,
    /// nothing is committed.
    pub fn apply_batch(&mut self, label: impl Into<String>, edits: &[Edit]) -> Result<u64, EditError> {
        let mut next = self.document().clone();
        for edit in edits {
            next = edit.apply(&next)?;
        }
        Ok(self.commit(HistoryEntry::new(next).with_label(label)))
    }

    fn commit(&mut self, mut entry: HistoryEntry) -> u64 {
        // Keep derived markup in step with the component list
        if entry.document.renders_components() {
            let html = compile_document(&entry.document, &self.options);
            if html != entry.document.html {
                Arc::make_mut(&mut entry.document).html = html;
            }
        }

        debug!(label = ?entry.label, "Committing edit");
        self.history.push(entry);
        self.bump()
    }

    fn bump(&mut self) -> u64 {
        self.version += 1;
        self.version
    }

    /// Step back one edit; `None` when there is nothing to undo
    pub fn undo(&mut self) -> Option<&Document> {
        if self.history.undo().is_none() {
            debug!("Nothing to undo");
            return None;
        }
        self.bump();
        Some(self.document())
    }

    /// Step forward one edit; `None` when there is nothing to redo
    pub fn redo(&mut self) -> Option<&Document> {
        if self.history.redo().is_none() {
            debug!("Nothing to redo");
            return None;
        }
        self.bump();
        Some(self.document())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Restore the document as it was loaded and drop all history
    pub fn reset(&mut self) -> &Document {
        self.history.reset();
        self.bump();
        self.document()
    }

    /// Merge the current document with the active edit into a save payload
    pub fn serialize_for_save(&self, active: Option<&ActiveEdit>) -> Document {
        reconcile(self.document(), active, &self.options)
    }

    /// Capture a save of the current state; the model stays editable
    pub fn prepare_save(&self, active: Option<&ActiveEdit>) -> SaveJob {
        let payload = self.serialize_for_save(active);

        // With an active edit the store ends up holding the payload rather
        // than the committed snapshot
        let snapshot = match active {
            Some(active) if !active.is_empty() => Arc::new(payload.clone()),
            _ => self.history.current().document.clone(),
        };

        SaveJob {
            session_id: self.session_id,
            version: self.version,
            payload,
            snapshot,
        }
    }

    /// Record a completed save.
    ///
    /// Returns false, changing nothing, when the receipt came from another
    /// session or is older than the last acknowledged save.
    pub fn acknowledge_save(&mut self, receipt: &SaveReceipt) -> bool {
        if receipt.session_id != self.session_id {
            warn!(
                receipt_session = %receipt.session_id,
                session = %self.session_id,
                "Ignoring save receipt from superseded session"
            );
            return false;
        }

        if let Some(saved_version) = self.saved_version {
            if receipt.version < saved_version {
                debug!(version = receipt.version, saved_version, "Ignoring stale save receipt");
                return false;
            }
        }

        if receipt.version < self.version {
            info!(
                saved_version = receipt.version,
                current_version = self.version,
                "Saved an earlier version; newer edits are unsaved"
            );
        }

        self.saved = receipt.snapshot.clone();
        self.saved_version = Some(receipt.version);
        true
    }

    /// Reconcile, save through the gateway and acknowledge the receipt.
    ///
    /// On failure the document and history are untouched.
    pub async fn save(
        &mut self,
        gateway: &dyn PersistenceGateway,
        identifier: &PageIdentifier,
        active: Option<&ActiveEdit>,
    ) -> Result<SaveReceipt, EditorError> {
        let receipt = self.prepare_save(active).run(gateway, identifier).await?;
        self.acknowledge_save(&receipt);
        Ok(receipt)
    }

    /// Standalone HTML page for the "view page" action
    pub fn export_page(&self, title: &str) -> ExportedPage {
        let document = self.document();
        let html = compile_document(document, &self.options);
        export_page(&html, &document.css, title)
    }
}
