//! Form State and Validation
//!
//! Client-side checks run before any request is made: required fields,
//! numeric parsing, and the upload size cap. Default values for the risk
//! questionnaire live in [`HISTORY_DEFAULTS`] so prefill and submit agree.

use thiserror::Error;

use crate::models::{BreastDensity, LoginRequest, MedicalHistory, RegisterRequest};

/// Largest image accepted for analysis (10 MB)
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Local validation failures; these never reach the network
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{0} must be a whole number")]
    InvalidNumber(&'static str),

    #[error("Please select an image to analyze")]
    NoFile,

    #[error("File size must be less than 10MB")]
    FileTooLarge { size: u64 },

    #[error("Please wait for the current request to finish")]
    Busy,
}

// ============================================
// Authentication forms
// ============================================

/// Login form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn to_request(&self) -> Result<LoginRequest, FormError> {
        Ok(LoginRequest {
            email: required("Email", &self.email)?.to_string(),
            password: required_secret("Password", &self.password)?.to_string(),
        })
    }
}

/// Registration form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub email: String,
    pub full_name: String,
    pub password: String,
}

impl RegisterForm {
    pub fn to_request(&self) -> Result<RegisterRequest, FormError> {
        Ok(RegisterRequest {
            email: required("Email", &self.email)?.to_string(),
            full_name: required("Full name", &self.full_name)?.to_string(),
            password: required_secret("Password", &self.password)?.to_string(),
        })
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::Required(field))
    } else {
        Ok(trimmed)
    }
}

/// Passwords are sent untrimmed
fn required_secret<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FormError> {
    if value.is_empty() {
        Err(FormError::Required(field))
    } else {
        Ok(value)
    }
}

// ============================================
// Image upload
// ============================================

/// An image picked for analysis
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn validate(&self) -> Result<(), FormError> {
        check_upload_size(self.size())
    }
}

/// Size gate shared by every front end; browsers call it before reading the file
pub fn check_upload_size(size: u64) -> Result<(), FormError> {
    if size > MAX_UPLOAD_BYTES {
        Err(FormError::FileTooLarge { size })
    } else {
        Ok(())
    }
}

/// Guess an image MIME type from a file name
pub fn guess_content_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}

// ============================================
// Risk questionnaire
// ============================================

/// Fallback values for questionnaire fields with no stored answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryDefaults {
    pub family_history: bool,
    pub previous_biopsies: bool,
    pub hormone_therapy: bool,
    pub breast_density: BreastDensity,
}

pub const HISTORY_DEFAULTS: HistoryDefaults = HistoryDefaults {
    family_history: false,
    previous_biopsies: false,
    hormone_therapy: false,
    breast_density: BreastDensity::Normal,
};

/// Risk questionnaire as edited. Numeric fields hold raw input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskForm {
    pub age: String,
    pub family_history: bool,
    pub previous_biopsies: bool,
    pub hormone_therapy: bool,
    pub first_pregnancy_age: String,
    pub menstruation_age: String,
    pub breast_density: BreastDensity,
}

impl Default for RiskForm {
    fn default() -> Self {
        Self::from_history(None)
    }
}

impl RiskForm {
    /// Prefill from the last saved history, falling back to [`HISTORY_DEFAULTS`]
    pub fn from_history(history: Option<&MedicalHistory>) -> Self {
        let d = HISTORY_DEFAULTS;
        match history {
            Some(h) => Self {
                age: h.age.to_string(),
                family_history: h.family_history,
                previous_biopsies: h.previous_biopsies,
                hormone_therapy: h.hormone_therapy,
                first_pregnancy_age: optional_text(h.first_pregnancy_age),
                menstruation_age: optional_text(h.menstruation_age),
                breast_density: h.breast_density.unwrap_or(d.breast_density),
            },
            None => Self {
                age: String::new(),
                family_history: d.family_history,
                previous_biopsies: d.previous_biopsies,
                hormone_therapy: d.hormone_therapy,
                first_pregnancy_age: String::new(),
                menstruation_age: String::new(),
                breast_density: d.breast_density,
            },
        }
    }

    /// Request body for both the assessment and the history endpoints.
    ///
    /// Blank optional ages become `None` (serialized as `null`).
    pub fn to_history(&self) -> Result<MedicalHistory, FormError> {
        let age = parse_optional("Age", &self.age)?.ok_or(FormError::Required("Age"))?;

        Ok(MedicalHistory {
            age,
            family_history: self.family_history,
            previous_biopsies: self.previous_biopsies,
            hormone_therapy: self.hormone_therapy,
            first_pregnancy_age: parse_optional("First pregnancy age", &self.first_pregnancy_age)?,
            menstruation_age: parse_optional("Menstruation start age", &self.menstruation_age)?,
            breast_density: Some(self.breast_density),
        })
    }
}

fn optional_text(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn parse_optional(field: &'static str, raw: &str) -> Result<Option<u32>, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| FormError::InvalidNumber(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_fields() {
        let form = LoginForm {
            email: "  ".into(),
            password: "pw".into(),
        };
        assert_eq!(form.to_request(), Err(FormError::Required("Email")));

        let form = LoginForm {
            email: " ada@example.com ".into(),
            password: String::new(),
        };
        assert_eq!(form.to_request(), Err(FormError::Required("Password")));
    }

    #[test]
    fn test_register_trims_but_keeps_password() {
        let form = RegisterForm {
            email: " ada@example.com".into(),
            full_name: "Ada Lovelace ".into(),
            password: " spaced ".into(),
        };
        let req = form.to_request().unwrap();
        assert_eq!(req.email, "ada@example.com");
        assert_eq!(req.full_name, "Ada Lovelace");
        assert_eq!(req.password, " spaced ");
    }

    #[test]
    fn test_upload_size_boundary() {
        assert!(check_upload_size(MAX_UPLOAD_BYTES).is_ok());
        assert_eq!(
            check_upload_size(MAX_UPLOAD_BYTES + 1),
            Err(FormError::FileTooLarge {
                size: MAX_UPLOAD_BYTES + 1
            })
        );
        let upload = ImageUpload::new("a.png", "image/png", vec![0; 16]);
        assert!(upload.validate().is_ok());
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type("scan.PNG"), "image/png");
        assert_eq!(guess_content_type("scan.jpeg"), "image/jpeg");
        assert_eq!(guess_content_type("scan"), "application/octet-stream");
    }

    #[test]
    fn test_defaults_without_history() {
        let form = RiskForm::default();
        assert_eq!(form.age, "");
        assert!(!form.family_history);
        assert!(!form.previous_biopsies);
        assert!(!form.hormone_therapy);
        assert_eq!(form.breast_density, BreastDensity::Normal);
    }

    #[test]
    fn test_prefill_from_history() {
        let history = MedicalHistory {
            age: 47,
            family_history: true,
            previous_biopsies: false,
            hormone_therapy: true,
            first_pregnancy_age: Some(29),
            menstruation_age: None,
            breast_density: None,
        };
        let form = RiskForm::from_history(Some(&history));
        assert_eq!(form.age, "47");
        assert!(form.family_history);
        assert_eq!(form.first_pregnancy_age, "29");
        assert_eq!(form.menstruation_age, "");
        assert_eq!(form.breast_density, BreastDensity::Normal);
    }

    #[test]
    fn test_blank_optional_ages_become_null() {
        let form = RiskForm {
            age: "50".into(),
            first_pregnancy_age: "".into(),
            menstruation_age: "   ".into(),
            ..RiskForm::default()
        };
        let history = form.to_history().unwrap();
        assert_eq!(history.first_pregnancy_age, None);
        assert_eq!(history.menstruation_age, None);

        let json = serde_json::to_value(&history).unwrap();
        assert!(json["first_pregnancy_age"].is_null());
        assert!(json["menstruation_age"].is_null());
        assert_ne!(json["first_pregnancy_age"], 0);
        assert_ne!(json["menstruation_age"], "");
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        let missing_age = RiskForm::default();
        assert_eq!(missing_age.to_history(), Err(FormError::Required("Age")));

        let bad = RiskForm {
            age: "40".into(),
            menstruation_age: "twelve".into(),
            ..RiskForm::default()
        };
        assert_eq!(
            bad.to_history(),
            Err(FormError::InvalidNumber("Menstruation start age"))
        );
    }

    #[test]
    fn test_prefill_then_submit_is_stable() {
        let history = MedicalHistory {
            age: 61,
            family_history: false,
            previous_biopsies: true,
            hormone_therapy: false,
            first_pregnancy_age: None,
            menstruation_age: Some(11),
            breast_density: Some(BreastDensity::Dense),
        };
        let form = RiskForm::from_history(Some(&history));
        assert_eq!(form.to_history().unwrap(), history);
    }
}
