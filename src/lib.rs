//! # vcardqr
//!
//! Turns contact-card fields into a vCard 3.0 record and renders that record as a QR code
//! PNG, returned base64-encoded.
//!
//! Each request is a pure transformation: form fields in, base64 PNG out. Nothing is stored
//! and no state is shared between requests.
//!
//! ## Features
//!
//! - Validate contact fields and serialize them as a vCard 3.0 record.
//! - Encode text into QR Code Model 2 symbols (versions 1 to 40, byte mode, error correction
//!   level Low, automatic mask selection).
//! - Render symbols as grayscale images, PNG bytes or base64 PNG text.
//! - Serve everything through a small axum HTTP API.
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Example
//!
//! ```rust
//! use vcardqr::handler::{generate, HandlerConfig};
//! use vcardqr::vcard::ContactForm;
//!
//! let form = ContactForm {
//!     first_name: "Jane".into(),
//!     last_name: "Doe".into(),
//!     phone: "555-1234".into(),
//!     email: "jane@x.com".into(),
//!     ..ContactForm::default()
//! };
//! let response = generate(&form, &HandlerConfig::default());
//! assert!(response.success);
//! assert_eq!(response.filename.as_deref(), Some("Jane_Doe_qr.png"));
//! ```
//!
//! ## Modules
//!
//! - [`vcard`]: Contact validation and vCard serialization.
//! - [`qrcode`]: Core QR symbol encoding.
//! - [`helper`]: Rendering symbols to images, PNG and base64.
//! - [`handler`]: The stateless request handler.
//! - [`server`]: HTTP routes.
//! - [`config`]: Service configuration.

pub mod config;
pub mod error;
pub mod handler;
pub mod helper;
pub mod qrcode;
pub mod server;
pub mod vcard;

pub use error::{EncodingError, Error, Result, ValidationError};
