//! Contact validation and vCard 3.0 serialization.
//!
//! A [`ContactForm`] holds the raw strings a caller submitted. [`build`] validates it into
//! [`ContactFields`] and serializes those into a [`VCardRecord`] with one property per line in
//! a fixed order.
//!
//! Values are inserted verbatim: `;`, `,` and `\` are not escaped, so a value containing them
//! can split into extra components for strict vCard parsers.
//!
//! # Example
//!
//! ```rust
//! use vcardqr::vcard::{build, ContactForm};
//!
//! let form = ContactForm {
//!     first_name: "Jane".into(),
//!     last_name: "Doe".into(),
//!     phone: "555-1234".into(),
//!     email: "jane@x.com".into(),
//!     ..ContactForm::default()
//! };
//! let record = build(&form).unwrap();
//! assert!(record.as_str().starts_with("BEGIN:VCARD\nVERSION:3.0\n"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Raw contact input as submitted by a caller. Absent fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub organization: String,
    pub title: String,
    pub website: String,
    pub address: String,
}

/// The fields that must be non-blank, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    FirstName,
    LastName,
    Phone,
    Email,
}

impl RequiredField {
    /// Validation order.
    pub const ALL: [RequiredField; 4] = [Self::FirstName, Self::LastName, Self::Phone, Self::Email];

    /// Form key of the field.
    pub fn name(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Phone => "phone",
            Self::Email => "email",
        }
    }

    /// Human-readable label used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Phone => "Phone",
            Self::Email => "Email",
        }
    }

    fn value(self, form: &ContactForm) -> &str {
        match self {
            Self::FirstName => &form.first_name,
            Self::LastName => &form.last_name,
            Self::Phone => &form.phone,
            Self::Email => &form.email,
        }
    }
}

/// Validated, trimmed contact fields.
///
/// Only obtainable through [`ContactFields::try_from`], so the required fields are always
/// non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFields {
    first_name: String,
    last_name: String,
    phone: String,
    email: String,
    organization: String,
    title: String,
    website: String,
    address: String,
}

impl TryFrom<&ContactForm> for ContactFields {
    type Error = ValidationError;

    fn try_from(form: &ContactForm) -> Result<Self, Self::Error> {
        if let Some(field) = RequiredField::ALL
            .into_iter()
            .find(|field| field.value(form).trim().is_empty())
        {
            return Err(ValidationError::MissingField(field));
        }

        Ok(Self {
            first_name: form.first_name.trim().to_owned(),
            last_name: form.last_name.trim().to_owned(),
            phone: form.phone.trim().to_owned(),
            email: form.email.trim().to_owned(),
            organization: form.organization.trim().to_owned(),
            title: form.title.trim().to_owned(),
            website: form.website.trim().to_owned(),
            address: form.address.trim().to_owned(),
        })
    }
}

impl ContactFields {
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn website(&self) -> &str {
        &self.website
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Suggested download name, `{first}_{last}_qr.png` with spaces replaced by `_`.
    pub fn filename(&self) -> String {
        format!("{}_{}_qr.png", self.first_name, self.last_name).replace(' ', "_")
    }
}

/// A serialized vCard 3.0 record.
///
/// Lines are separated by `\n` with no trailing newline. Always starts with `BEGIN:VCARD`,
/// `VERSION:3.0` and ends with `END:VCARD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VCardRecord {
    text: String,
}

impl VCardRecord {
    /// Property names in the order they are written.
    pub const PROPERTIES: [&'static str; 8] =
        ["FN", "N", "ORG", "TITLE", "TEL", "EMAIL", "URL", "ADR"];

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Size of the record in bytes, which is what the QR encoder has to fit.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    /// Returns the raw value of the first line whose property name is `name`.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.lines().find_map(|line| {
            let (key, value) = line.split_once(':')?;
            (key == name).then_some(value)
        })
    }
}

impl From<&ContactFields> for VCardRecord {
    fn from(fields: &ContactFields) -> Self {
        let lines = [
            "BEGIN:VCARD".to_owned(),
            "VERSION:3.0".to_owned(),
            format!("FN:{} {}", fields.first_name, fields.last_name),
            format!("N:{};{};;;", fields.last_name, fields.first_name),
            format!("ORG:{}", fields.organization),
            format!("TITLE:{}", fields.title),
            format!("TEL:{}", fields.phone),
            format!("EMAIL:{}", fields.email),
            format!("URL:{}", fields.website),
            format!("ADR:;;{};;;;", fields.address),
            "END:VCARD".to_owned(),
        ];
        Self { text: lines.join("\n") }
    }
}

impl fmt::Display for VCardRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Validates `form` and serializes it into a vCard record.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] naming the first blank required field, checked in
/// the order of [`RequiredField::ALL`].
pub fn build(form: &ContactForm) -> Result<VCardRecord, ValidationError> {
    let fields = ContactFields::try_from(form)?;
    Ok(VCardRecord::from(&fields))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> ContactForm {
        ContactForm {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            phone: "555-1234".into(),
            email: "jane@x.com".into(),
            ..ContactForm::default()
        }
    }

    #[test]
    fn test_minimal_record_matches_template() {
        let record = build(&jane()).unwrap();
        let expected = "BEGIN:VCARD\n\
                        VERSION:3.0\n\
                        FN:Jane Doe\n\
                        N:Doe;Jane;;;\n\
                        ORG:\n\
                        TITLE:\n\
                        TEL:555-1234\n\
                        EMAIL:jane@x.com\n\
                        URL:\n\
                        ADR:;;;;;;\n\
                        END:VCARD";
        assert_eq!(record.as_str(), expected);
        assert_eq!(record.len(), 117);
    }

    #[test]
    fn test_full_record_is_trimmed() {
        let form = ContactForm {
            first_name: "  Ada ".into(),
            last_name: "Lovelace\t".into(),
            phone: " +44 20 7946 0000 ".into(),
            email: "ada@example.org ".into(),
            organization: " Analytical Engines Ltd ".into(),
            title: " Mathematician".into(),
            website: "https://example.org ".into(),
            address: " 12 St James's Square, London ".into(),
        };
        let record = build(&form).unwrap();
        assert_eq!(record.property("FN"), Some("Ada Lovelace"));
        assert_eq!(record.property("N"), Some("Lovelace;Ada;;;"));
        assert_eq!(record.property("ORG"), Some("Analytical Engines Ltd"));
        assert_eq!(record.property("TITLE"), Some("Mathematician"));
        assert_eq!(record.property("TEL"), Some("+44 20 7946 0000"));
        assert_eq!(record.property("EMAIL"), Some("ada@example.org"));
        assert_eq!(record.property("URL"), Some("https://example.org"));
        assert_eq!(record.property("ADR"), Some(";;12 St James's Square, London;;;;"));
    }

    #[test]
    fn test_properties_in_fixed_order() {
        let record = build(&jane()).unwrap();
        let names: Vec<&str> = record
            .lines()
            .filter_map(|line| line.split_once(':').map(|(key, _)| key))
            .filter(|key| VCardRecord::PROPERTIES.contains(key))
            .collect();
        assert_eq!(names, VCardRecord::PROPERTIES);
    }

    #[test]
    fn test_special_characters_are_not_escaped() {
        let form = ContactForm { address: "1 Main St; Apt 2, Springfield".into(), ..jane() };
        let record = build(&form).unwrap();
        assert_eq!(record.property("ADR"), Some(";;1 Main St; Apt 2, Springfield;;;;"));
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        let err = build(&ContactForm::default()).unwrap_err();
        assert_eq!(err, ValidationError::MissingField(RequiredField::FirstName));

        let form = ContactForm { last_name: "   ".into(), phone: String::new(), ..jane() };
        let err = build(&form).unwrap_err();
        assert_eq!(err.field(), RequiredField::LastName);

        let form = ContactForm { email: "\n\t".into(), ..jane() };
        let err = build(&form).unwrap_err();
        assert_eq!(err.to_string(), "Please fill in Email");
    }

    #[test]
    fn test_optional_fields_may_be_blank() {
        let form = ContactForm { organization: "   ".into(), ..jane() };
        let record = build(&form).unwrap();
        assert_eq!(record.property("ORG"), Some(""));
    }

    #[test]
    fn test_filename() {
        let form = ContactForm { first_name: "Mary Ann".into(), last_name: " van Dyke ".into(), ..jane() };
        let fields = ContactFields::try_from(&form).unwrap();
        assert_eq!(fields.filename(), "Mary_Ann_van_Dyke_qr.png");
    }

    #[test]
    fn test_form_deserializes_with_missing_keys() {
        let form: ContactForm = serde_json::from_str(r#"{"first_name": "Jane"}"#).unwrap();
        assert_eq!(form.first_name, "Jane");
        assert_eq!(form.email, "");
    }
}
