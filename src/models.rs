//! Data Model
//!
//! Entities exchanged with the screening API. This layer owns no persistence;
//! the types only describe the wire shapes and a few lenient decoding rules.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================
// Users and authentication
// ============================================

/// Profile of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: String,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `POST /auth/register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub full_name: String,
    pub password: String,
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response of both auth endpoints
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

// ============================================
// Medical history
// ============================================

/// Breast tissue density as reported on the questionnaire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreastDensity {
    Fatty,
    Scattered,
    Normal,
    Dense,
}

impl BreastDensity {
    pub const ALL: [BreastDensity; 4] = [
        BreastDensity::Fatty,
        BreastDensity::Scattered,
        BreastDensity::Normal,
        BreastDensity::Dense,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BreastDensity::Fatty => "fatty",
            BreastDensity::Scattered => "scattered",
            BreastDensity::Normal => "normal",
            BreastDensity::Dense => "dense",
        }
    }

    /// Human label used by the questionnaire
    pub fn label(&self) -> &'static str {
        match self {
            BreastDensity::Fatty => "Almost entirely fatty",
            BreastDensity::Scattered => "Scattered fibroglandular",
            BreastDensity::Normal => "Heterogeneously dense (normal)",
            BreastDensity::Dense => "Extremely dense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fatty" => Some(BreastDensity::Fatty),
            "scattered" => Some(BreastDensity::Scattered),
            "normal" => Some(BreastDensity::Normal),
            "dense" => Some(BreastDensity::Dense),
            _ => None,
        }
    }
}

impl fmt::Display for BreastDensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-reported baseline questionnaire.
///
/// Optional ages are always serialized, as `null` when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalHistory {
    pub age: u32,
    pub family_history: bool,
    pub previous_biopsies: bool,
    pub hormone_therapy: bool,
    #[serde(default)]
    pub first_pregnancy_age: Option<u32>,
    #[serde(default)]
    pub menstruation_age: Option<u32>,
    #[serde(default, deserialize_with = "lenient_density")]
    pub breast_density: Option<BreastDensity>,
}

/// Older records may hold a null or free-text density; treat those as unset
fn lenient_density<'de, D>(deserializer: D) -> Result<Option<BreastDensity>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(BreastDensity::parse))
}

// ============================================
// Analyses
// ============================================

/// Kind of analysis that produced a result
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnalysisType {
    Image,
    RiskAssessment,
    Other(String),
}

impl AnalysisType {
    pub fn as_str(&self) -> &str {
        match self {
            AnalysisType::Image => "image",
            AnalysisType::RiskAssessment => "risk_assessment",
            AnalysisType::Other(s) => s,
        }
    }

    /// Title shown on history cards
    pub fn title(&self) -> String {
        match self {
            AnalysisType::Image => "Image Analysis".to_string(),
            AnalysisType::RiskAssessment => "Risk Assessment".to_string(),
            AnalysisType::Other(s) => s.clone(),
        }
    }
}

impl From<String> for AnalysisType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "image" => AnalysisType::Image,
            "risk_assessment" => AnalysisType::RiskAssessment,
            _ => AnalysisType::Other(s),
        }
    }
}

impl From<AnalysisType> for String {
    fn from(t: AnalysisType) -> Self {
        t.as_str().to_string()
    }
}

/// Coarse risk category assigned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Other(String),
}

impl RiskLevel {
    pub fn as_str(&self) -> &str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Other(s) => s,
        }
    }
}

impl From<String> for RiskLevel {
    fn from(s: String) -> Self {
        match s.as_str() {
            "low" => RiskLevel::Low,
            "moderate" => RiskLevel::Moderate,
            "high" => RiskLevel::High,
            _ => RiskLevel::Other(s),
        }
    }
}

impl From<RiskLevel> for String {
    fn from(level: RiskLevel) -> Self {
        level.as_str().to_string()
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of an image analysis or risk assessment call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub id: Option<String>,
    pub analysis_type: AnalysisType,
    pub risk_level: RiskLevel,
    pub result: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// One entry of the analysis history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: String,
    pub analysis_type: AnalysisType,
    pub risk_level: RiskLevel,
    pub result: String,
    pub created_at: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl AnalysisRecord {
    /// Creation time formatted for display, or the raw value if it does not parse
    pub fn created_at_display(&self) -> String {
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&self.created_at) {
            return dt.format("%b %d, %Y %H:%M").to_string();
        }
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%dT%H:%M:%S%.f") {
            return dt.format("%b %d, %Y %H:%M").to_string();
        }
        self.created_at.clone()
    }
}

/// Response of `GET /`
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceInfo {
    #[serde(default)]
    pub message: String,
}
