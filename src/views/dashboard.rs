//! Dashboard
//!
//! Post-login shell with three tabs: image analysis, risk assessment and
//! history. Each form owns its loading flag, so a second submission of the
//! same form is refused while the first is in flight; different forms do not
//! block each other.

use futures_util::future::join;

use super::history::HistoryView;
use super::Notice;
use crate::client::{Action, ApiResult, Backend};
use crate::forms::{FormError, ImageUpload, RiskForm};
use crate::models::{AnalysisRecord, AnalysisResult, AnalysisType, MedicalHistory};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    ImageAnalysis,
    RiskAssessment,
    History,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 3] = [
        DashboardTab::ImageAnalysis,
        DashboardTab::RiskAssessment,
        DashboardTab::History,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DashboardTab::ImageAnalysis => "Image Analysis",
            DashboardTab::RiskAssessment => "Risk Assessment",
            DashboardTab::History => "History",
        }
    }
}

/// Image analysis tab
#[derive(Debug, Clone, Default)]
pub struct ImageTab {
    pub selected: Option<ImageUpload>,
    pub result: Option<AnalysisResult>,
    pub loading: bool,
}

impl ImageTab {
    pub fn submit_label(&self) -> &'static str {
        if self.loading {
            "Analyzing..."
        } else {
            "Analyze Image"
        }
    }
}

/// Risk assessment tab
#[derive(Debug, Clone, Default)]
pub struct RiskTab {
    pub form: RiskForm,
    pub result: Option<AnalysisResult>,
    pub calculating: bool,
    pub saving: bool,
}

impl RiskTab {
    pub fn calculate_label(&self) -> &'static str {
        if self.calculating {
            "Calculating..."
        } else {
            "Calculate Risk"
        }
    }

    pub fn save_label(&self) -> &'static str {
        if self.saving {
            "Saving..."
        } else {
            "Save History"
        }
    }
}

/// All dashboard state for one session
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub tab: DashboardTab,
    pub image: ImageTab,
    pub risk: RiskTab,
    pub analyses: Vec<AnalysisRecord>,
    pub medical_history: Option<MedicalHistory>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_tab(&mut self, tab: DashboardTab) {
        self.tab = tab;
    }

    // ============================================
    // Fetched lists
    // ============================================

    /// Store a fetched analysis list; on failure the old list stays
    pub fn apply_analyses(&mut self, outcome: ApiResult<Vec<AnalysisRecord>>) -> Option<Notice> {
        match outcome {
            Ok(records) => {
                self.analyses = records;
                None
            }
            Err(e) => Some(Notice::from_api(Action::LoadAnalyses, &e)),
        }
    }

    /// Store fetched medical history and re-derive the risk form defaults
    pub fn apply_medical_history(
        &mut self,
        outcome: ApiResult<Option<MedicalHistory>>,
    ) -> Option<Notice> {
        match outcome {
            Ok(history) => {
                self.risk.form = RiskForm::from_history(history.as_ref());
                self.medical_history = history;
                None
            }
            Err(e) => Some(Notice::from_api(Action::LoadHistory, &e)),
        }
    }

    /// Initial load: both fetches run concurrently, in no particular order
    pub async fn mount<B: Backend + ?Sized>(&mut self, backend: &B, session: &Session) -> Vec<Notice> {
        let (analyses, history) = join(
            backend.analyses(&session.token),
            backend.medical_history(&session.token),
        )
        .await;

        [self.apply_analyses(analyses), self.apply_medical_history(history)]
            .into_iter()
            .flatten()
            .collect()
    }

    pub async fn refresh_analyses<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        session: &Session,
    ) -> Option<Notice> {
        let outcome = backend.analyses(&session.token).await;
        self.apply_analyses(outcome)
    }

    pub async fn refresh_medical_history<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        session: &Session,
    ) -> Option<Notice> {
        let outcome = backend.medical_history(&session.token).await;
        self.apply_medical_history(outcome)
    }

    pub fn history_view(&self) -> HistoryView {
        HistoryView::from_records(&self.analyses)
    }

    // ============================================
    // Image analysis
    // ============================================

    /// Pick a file; oversized files are rejected and the previous pick stays
    pub fn select_image(&mut self, upload: ImageUpload) -> Result<(), Notice> {
        upload.validate()?;
        self.image.selected = Some(upload);
        Ok(())
    }

    pub fn begin_image(&mut self) -> Result<ImageUpload, Notice> {
        if self.image.loading {
            return Err(FormError::Busy.into());
        }
        let upload = self.image.selected.clone().ok_or(FormError::NoFile)?;
        upload.validate()?;
        self.image.loading = true;
        Ok(upload)
    }

    /// On failure the previous result is left untouched
    pub fn finish_image(&mut self, outcome: ApiResult<AnalysisResult>) -> Notice {
        self.image.loading = false;
        match outcome {
            Ok(result) => {
                self.image.result = Some(result);
                Notice::success("Image analyzed successfully")
            }
            Err(e) => Notice::from_api(Action::AnalyzeImage, &e),
        }
    }

    /// Result to render in the image panel, only if it is an image analysis
    pub fn image_result(&self) -> Option<&AnalysisResult> {
        self.image
            .result
            .as_ref()
            .filter(|r| r.analysis_type == AnalysisType::Image)
    }

    /// Upload the selected image; on success the history list is refreshed
    pub async fn submit_image<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        session: &Session,
    ) -> Vec<Notice> {
        let upload = match self.begin_image() {
            Ok(upload) => upload,
            Err(notice) => return vec![notice],
        };

        let outcome = backend.analyze_image(&session.token, &upload).await;
        let succeeded = outcome.is_ok();
        let mut notices = vec![self.finish_image(outcome)];

        if succeeded {
            notices.extend(self.refresh_analyses(backend, session).await);
        }
        notices
    }

    // ============================================
    // Risk assessment
    // ============================================

    pub fn begin_assessment(&mut self) -> Result<MedicalHistory, Notice> {
        if self.risk.calculating {
            return Err(FormError::Busy.into());
        }
        let body = self.risk.form.to_history()?;
        self.risk.calculating = true;
        Ok(body)
    }

    pub fn finish_assessment(&mut self, outcome: ApiResult<AnalysisResult>) -> Notice {
        self.risk.calculating = false;
        match outcome {
            Ok(result) => {
                self.risk.result = Some(result);
                Notice::success("Risk assessment completed")
            }
            Err(e) => Notice::from_api(Action::AssessRisk, &e),
        }
    }

    /// Result to render in the risk panel, only if it is a risk assessment
    pub fn risk_result(&self) -> Option<&AnalysisResult> {
        self.risk
            .result
            .as_ref()
            .filter(|r| r.analysis_type == AnalysisType::RiskAssessment)
    }

    /// Calculate risk from the form; the backend records it, so history is refreshed
    pub async fn calculate_risk<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        session: &Session,
    ) -> Vec<Notice> {
        let body = match self.begin_assessment() {
            Ok(body) => body,
            Err(notice) => return vec![notice],
        };

        let outcome = backend.assess_risk(&session.token, &body).await;
        let succeeded = outcome.is_ok();
        let mut notices = vec![self.finish_assessment(outcome)];

        if succeeded {
            notices.extend(self.refresh_analyses(backend, session).await);
        }
        notices
    }

    pub fn begin_save_history(&mut self) -> Result<MedicalHistory, Notice> {
        if self.risk.saving {
            return Err(FormError::Busy.into());
        }
        let body = self.risk.form.to_history()?;
        self.risk.saving = true;
        Ok(body)
    }

    pub fn finish_save_history(&mut self, outcome: ApiResult<MedicalHistory>) -> Notice {
        self.risk.saving = false;
        match outcome {
            Ok(_) => Notice::success("Medical history saved"),
            Err(e) => Notice::from_api(Action::SaveHistory, &e),
        }
    }

    /// Save the questionnaire, then re-fetch it so the defaults follow
    pub async fn save_history<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        session: &Session,
    ) -> Vec<Notice> {
        let body = match self.begin_save_history() {
            Ok(body) => body,
            Err(notice) => return vec![notice],
        };

        let outcome = backend.save_medical_history(&session.token, &body).await;
        let succeeded = outcome.is_ok();
        let mut notices = vec![self.finish_save_history(outcome)];

        if succeeded {
            notices.extend(self.refresh_medical_history(backend, session).await);
        }
        notices
    }
}
