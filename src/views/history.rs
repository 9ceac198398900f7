//! History tab projection.

use super::badge::RiskBadge;
use crate::models::AnalysisRecord;

/// Shown when the user has no analyses yet
pub const EMPTY_HISTORY_MESSAGE: &str =
    "No analysis history yet. Upload an image or complete a risk assessment to get started.";

/// One rendered history entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryCard {
    pub id: String,
    pub title: String,
    pub badge: RiskBadge,
    pub result: String,
    pub created_at: String,
}

impl From<&AnalysisRecord> for HistoryCard {
    fn from(record: &AnalysisRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.analysis_type.title(),
            badge: RiskBadge::for_level(record.risk_level.as_str()),
            result: record.result.clone(),
            created_at: record.created_at_display(),
        }
    }
}

/// What the history tab draws
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryView {
    Empty(&'static str),
    Cards(Vec<HistoryCard>),
}

impl HistoryView {
    /// Cards keep the backend's order
    pub fn from_records(records: &[AnalysisRecord]) -> Self {
        if records.is_empty() {
            HistoryView::Empty(EMPTY_HISTORY_MESSAGE)
        } else {
            HistoryView::Cards(records.iter().map(HistoryCard::from).collect())
        }
    }

    pub fn cards(&self) -> &[HistoryCard] {
        match self {
            HistoryView::Empty(_) => &[],
            HistoryView::Cards(cards) => cards,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalysisType, RiskLevel};

    fn record(id: &str, risk: &str) -> AnalysisRecord {
        AnalysisRecord {
            id: id.into(),
            analysis_type: AnalysisType::RiskAssessment,
            risk_level: RiskLevel::from(risk.to_string()),
            result: "r".into(),
            created_at: "2024-01-02T03:04:05Z".into(),
            recommendations: vec![],
        }
    }

    #[test]
    fn test_empty_history_placeholder() {
        let view = HistoryView::from_records(&[]);
        assert_eq!(view, HistoryView::Empty(EMPTY_HISTORY_MESSAGE));
        assert!(view.cards().is_empty());
    }

    #[test]
    fn test_cards_keep_backend_order() {
        let records = vec![record("new", "high"), record("mid", "low"), record("old", "moderate")];
        let view = HistoryView::from_records(&records);
        let ids: Vec<&str> = view.cards().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
        assert_eq!(view.cards()[0].title, "Risk Assessment");
        assert_eq!(view.cards()[0].created_at, "Jan 02, 2024 03:04");
    }
}
