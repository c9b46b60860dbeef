//! # Pagecraft Gateway
//!
//! HTTP adapter for the landing-page content service.
//!
//! Pages are fetched with `GET {base}/{stable_path}/{id}` and stored with
//! `POST` to the same URL; the legacy endpoint is only used when the stable
//! one fails. The identifier fallback itself is shared with every other
//! gateway in `pagecraft_editor`.

mod credentials;
mod http;

pub use credentials::{CredentialProvider, NoCredentials, SharedToken, StaticToken};
pub use http::{GatewayConfig, HttpGateway};
