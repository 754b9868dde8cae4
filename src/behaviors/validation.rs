use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9\s\-\(\)\+]{10,}$").expect("phone pattern compiles"));

/// Input kind, taken from the element's `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Email,
    Tel,
    Other,
}

impl FieldKind {
    pub fn from_type_attr(kind: &str) -> Self {
        match kind.to_ascii_lowercase().as_str() {
            "email" => Self::Email,
            "tel" => Self::Tel,
            _ => Self::Other,
        }
    }
}

/// User-facing messages are the site's own copy and stay untranslated.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("Este campo é obrigatório")]
    Required,
    #[error("Por favor, insira um e-mail válido")]
    InvalidEmail,
    #[error("Por favor, insira um telefone válido")]
    InvalidPhone,
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

/// Checks one form field. The first failing rule wins.
pub fn validate_field(kind: FieldKind, required: bool, raw_value: &str) -> Result<(), FieldError> {
    let value = raw_value.trim();
    if value.is_empty() {
        return if required { Err(FieldError::Required) } else { Ok(()) };
    }
    match kind {
        FieldKind::Email if !is_valid_email(value) => Err(FieldError::InvalidEmail),
        FieldKind::Tel if !is_valid_phone(value) => Err(FieldError::InvalidPhone),
        _ => Ok(()),
    }
}
