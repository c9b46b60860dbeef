//! # Pagecraft Model
//!
//! Data types shared by every Pagecraft crate: the editable [`Document`], its
//! structured [`ComponentDescriptor`] list and the coarser
//! [`SectionDescriptor`] list.
//!
//! The wire format is JSON with camelCase keys, matching what the content
//! service stores. Every field is optional on input so partially populated
//! records from older pages still load.

pub mod component;
pub mod document;
pub mod error;
pub mod section;

pub use component::{Component, ComponentDescriptor};
pub use document::{ContentSource, Document};
pub use error::{ModelError, ModelResult};
pub use section::SectionDescriptor;
