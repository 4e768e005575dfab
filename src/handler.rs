//! Stateless request handler.
//!
//! [`generate`] is the single entry point shared by every deployment: it takes the submitted
//! form plus an explicit [`HandlerConfig`] and always produces a response body. Failures are
//! reported in the body (`success: false`), never through the transport status.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::helper::to_base64_png;
use crate::qrcode::{encode, SymbolOptions};
use crate::vcard::{ContactFields, ContactForm, VCardRecord};

/// Message returned by [`ResponseStyle::Serverless`] on success.
pub const SUCCESS_MESSAGE: &str = "QR Code generated successfully!";

/// Shape of a successful response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStyle {
    /// Long-running server: includes `filename` and `vcard_content`.
    #[default]
    Server,
    /// Serverless function: includes a fixed `message`.
    Serverless,
}

/// Everything [`generate`] needs besides the form itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandlerConfig {
    pub style: ResponseStyle,
    pub symbol: SymbolOptions,
}

/// JSON body returned for every generate request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vcard_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerateResponse {
    /// A `success: false` body carrying `error` verbatim.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            qr_image: None,
            filename: None,
            vcard_content: None,
            message: None,
            error: Some(error.into()),
        }
    }

    /// A `success: false` body for anything other than a validation failure.
    pub fn generation_failure(detail: impl std::fmt::Display) -> Self {
        Self::failure(format!("Error generating QR code: {detail}"))
    }

    fn success(generated: Generated, style: ResponseStyle) -> Self {
        let mut response = Self {
            success: true,
            qr_image: Some(generated.qr_image),
            filename: None,
            vcard_content: None,
            message: None,
            error: None,
        };
        match style {
            ResponseStyle::Server => {
                response.filename = Some(generated.filename);
                response.vcard_content = Some(generated.record.into_string());
            }
            ResponseStyle::Serverless => {
                response.message = Some(SUCCESS_MESSAGE.to_owned());
            }
        }
        response
    }
}

/// Output of a successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub record: VCardRecord,
    /// Base64 PNG.
    pub qr_image: String,
    pub filename: String,
}

/// Validates the form, builds the vCard, encodes and renders it.
///
/// # Errors
///
/// Returns [`Error::Validation`] for a blank required field, [`Error::Encoding`] if the record
/// is too large for any QR version, or [`Error::Image`] if PNG encoding fails.
pub fn try_generate(form: &ContactForm, options: &SymbolOptions) -> Result<Generated> {
    let fields = ContactFields::try_from(form)?;
    let record = VCardRecord::from(&fields);
    let symbol = encode(record.as_str(), options)?;
    info!(
        version = symbol.version().value(),
        mask = symbol.mask().value(),
        bytes = record.len(),
        "encoded vCard symbol"
    );
    let qr_image = to_base64_png(&symbol, options)?;
    Ok(Generated {
        record,
        qr_image,
        filename: fields.filename(),
    })
}

/// Handles one generate request. Never fails: errors become a `success: false` body.
pub fn generate(form: &ContactForm, config: &HandlerConfig) -> GenerateResponse {
    debug!(style = ?config.style, "generate request");
    match try_generate(form, &config.symbol) {
        Ok(generated) => GenerateResponse::success(generated, config.style),
        Err(Error::Validation(err)) => {
            warn!(field = err.field().name(), "rejected contact form");
            GenerateResponse::failure(err.to_string())
        }
        Err(Error::Encoding(err)) => {
            warn!(error = %err, "vCard too large for a QR symbol");
            GenerateResponse::generation_failure(err)
        }
        Err(err) => {
            error!(error = %err, "failed to generate QR code");
            GenerateResponse::generation_failure(err)
        }
    }
}
