//! # Pagecraft Editor
//!
//! Document and history engine for the landing-page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ gateway: load/save against content service  │
//! │  - stable identifier, then legacy fallback  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: DocumentModel + HistoryStack        │
//! │  - Apply edits, one snapshot per commit     │
//! │  - Linear undo/redo/reset                   │
//! │  - Reconcile components/sections/html       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: components → markup          │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Snapshots, not inverses**: history stores immutable documents
//! 2. **One commit path**: every change goes through `apply_edit`
//! 3. **Declared source of truth**: `ContentSource` says whether components
//!    or markup are canonical; the other is derived
//! 4. **Single writer**: mutation is synchronous and never interleaved;
//!    only load and save are asynchronous
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{DocumentModel, Edit, MemoryGateway, PageIdentifier, SessionLoad};
//!
//! let id = PageIdentifier::new("summer-sale").with_legacy("1042");
//! let SessionLoad::Ready(mut model) = DocumentModel::load(&gateway, &id).await? else {
//!     return Ok(()); // retry once credentials arrive
//! };
//!
//! model.apply(Edit::AddComponent {
//!     component: ComponentDescriptor::button("/shop", "Shop now"),
//!     index: None,
//! })?;
//! model.undo();
//! model.redo();
//!
//! let receipt = model.save(&gateway, &id, None).await?;
//! println!("saved as of version {}", receipt.version);
//! ```

mod edits;
mod errors;
mod gateway;
mod history;
mod model;
mod reconcile;
mod reorder;
mod save;

pub use edits::{Edit, EditError};
pub use errors::EditorError;
pub use gateway::{
    load_with_fallback, save_with_fallback, Endpoint, GatewayError, LoadOutcome, MemoryGateway,
    PageIdentifier, PersistenceGateway,
};
pub use history::{HistoryEntry, HistoryStack, DEFAULT_MAX_ENTRIES, MIN_MAX_ENTRIES};
pub use model::{DocumentModel, SessionLoad};
pub use reconcile::{reconcile, ActiveEdit};
pub use reorder::{reorder, reorder_from_drag, try_reorder};
pub use save::{SaveJob, SaveReceipt};

// Re-export model types for convenience
pub use pagecraft_model::{Component, ComponentDescriptor, ContentSource, Document, SectionDescriptor};
