//! Candidate assessment models.
//!
//! These mirror the JSON schema the extraction prompt instructs the model to
//! reproduce field-for-field, so the model output deserializes directly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentinel the model writes for contact fields absent from the transcript.
pub const NOT_MENTIONED: &str = "Not mentioned in the transcript";

/// Verdict for one screening criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Pass,
    #[serde(rename = "Conditional Pass")]
    ConditionalPass,
    Fail,
    #[serde(rename = "Not Applicable")]
    NotApplicable,
}

impl Verdict {
    /// Whether this criterion was actually evaluable from the transcript.
    pub fn is_evaluated(&self) -> bool {
        !matches!(self, Verdict::NotApplicable)
    }
}

/// Overall fit classification for the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitCategory {
    #[serde(rename = "GOOD")]
    Good,
    #[serde(rename = "BAD")]
    Bad,
    #[serde(rename = "INCOMPLETE")]
    Incomplete,
}

impl FitCategory {
    pub fn display_text(&self) -> &'static str {
        match self {
            FitCategory::Good => "Good Fit",
            FitCategory::Bad => "Poor Fit",
            FitCategory::Incomplete => "Incomplete Assessment",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PersonalDetails {
    #[serde(default)]
    pub organization_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub assessment_date: String,
    #[serde(default)]
    pub other_info: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobDuration {
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobExperience {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub duration: JobDuration,
    #[serde(default)]
    pub job_role: Vec<String>,
}

/// One row of the job-matching table: the criterion's display label, the
/// verdict, and the transcript evidence the verdict rests on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionResult {
    pub criteria: String,
    pub status: Verdict,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallAnalysis {
    #[serde(default)]
    pub call_summary: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub reason_for_fit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conclusion {
    #[serde(default)]
    pub overall_recommendation: String,
    #[serde(default)]
    pub reason: String,
    pub fit_recommendation: FitCategory,
    /// The model writes the score as a string; it is normalized in code.
    #[serde(default)]
    pub score: serde_json::Value,
}

/// The full structured assessment extracted from one call.
///
/// Field names follow the prompt schema exactly (uppercase section keys) so
/// the model's JSON round-trips without a mapping layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateAssessment {
    #[serde(rename = "PERSONAL_DETAILS", default)]
    pub personal_details: PersonalDetails,
    #[serde(rename = "JOB_EXPERIENCE", default)]
    pub job_experience: Vec<JobExperience>,
    #[serde(rename = "KEY_SKILLS", default)]
    pub key_skills: Vec<String>,
    /// Keyed by criterion key (BTreeMap for stable render order).
    #[serde(rename = "JOB_MATCHING", default)]
    pub job_matching: BTreeMap<String, CriterionResult>,
    #[serde(rename = "CALL_ANALYSIS", default)]
    pub call_analysis: CallAnalysis,
    #[serde(rename = "CONCLUSION")]
    pub conclusion: Conclusion,
}

impl CandidateAssessment {
    /// The normalized numeric score: parsed from whatever the model wrote,
    /// meaningful only when fit is GOOD.
    pub fn score(&self) -> u32 {
        match self.conclusion.fit_recommendation {
            FitCategory::Good => parse_score(&self.conclusion.score).clamp(1, 100),
            FitCategory::Bad | FitCategory::Incomplete => 0,
        }
    }

    pub fn verdicts(&self) -> impl Iterator<Item = Verdict> + '_ {
        self.job_matching.values().map(|r| r.status)
    }
}

fn parse_score(value: &serde_json::Value) -> u32 {
    match value {
        serde_json::Value::Number(n) => n.as_u64().unwrap_or(0) as u32,
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// True when a field carries real content rather than a sentinel value.
pub fn is_displayable(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed != NOT_MENTIONED
        && trimmed != "Not Applicable"
        && trimmed != "N/A"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_serde_uses_display_labels() {
        assert_eq!(
            serde_json::to_string(&Verdict::ConditionalPass).unwrap(),
            "\"Conditional Pass\""
        );
        let v: Verdict = serde_json::from_str("\"Not Applicable\"").unwrap();
        assert_eq!(v, Verdict::NotApplicable);
    }

    #[test]
    fn sentinel_values_are_not_displayable() {
        assert!(!is_displayable(""));
        assert!(!is_displayable("   "));
        assert!(!is_displayable(NOT_MENTIONED));
        assert!(!is_displayable("N/A"));
        assert!(!is_displayable("Not Applicable"));
        assert!(is_displayable("+1 555 0100"));
    }

    #[test]
    fn score_is_zero_unless_fit_is_good() {
        let mut conclusion = Conclusion {
            overall_recommendation: String::new(),
            reason: String::new(),
            fit_recommendation: FitCategory::Bad,
            score: serde_json::json!("85"),
        };
        let mut assessment = CandidateAssessment {
            personal_details: PersonalDetails::default(),
            job_experience: vec![],
            key_skills: vec![],
            job_matching: BTreeMap::new(),
            call_analysis: CallAnalysis::default(),
            conclusion: conclusion.clone(),
        };
        assert_eq!(assessment.score(), 0);

        conclusion.fit_recommendation = FitCategory::Good;
        assessment.conclusion = conclusion.clone();
        assert_eq!(assessment.score(), 85);

        // A GOOD fit with a missing or absurd score is still a positive
        // integer within bounds.
        conclusion.score = serde_json::json!("");
        assessment.conclusion = conclusion.clone();
        assert_eq!(assessment.score(), 1);
        conclusion.score = serde_json::json!(250);
        assessment.conclusion = conclusion;
        assert_eq!(assessment.score(), 100);
    }

    #[test]
    fn model_json_deserializes_directly() {
        let json = r#"{
            "PERSONAL_DETAILS": {"name": "Dorian Jackson", "phone": "Not mentioned in the transcript"},
            "JOB_EXPERIENCE": [{"job_title": "Driver", "company": "Acme", "duration": {"start_date": "2022", "end_date": ""}, "job_role": ["Delivered packages"]}],
            "KEY_SKILLS": ["Driving"],
            "JOB_MATCHING": {"age": {"criteria": "Age Requirements", "status": "Pass", "notes": "Accepted physical demands"}},
            "CALL_ANALYSIS": {"call_summary": "Short call.", "recommendations": [], "reason_for_fit": ""},
            "CONCLUSION": {"overall_recommendation": "Proceed", "reason": "", "fit_recommendation": "GOOD", "score": "72"}
        }"#;
        let assessment: CandidateAssessment = serde_json::from_str(json).unwrap();
        assert_eq!(assessment.personal_details.name, "Dorian Jackson");
        assert_eq!(assessment.job_matching["age"].status, Verdict::Pass);
        assert_eq!(assessment.score(), 72);
    }
}
