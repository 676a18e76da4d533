//! Assessment extraction: prompt construction and model-output parsing.
//!
//! Everything here is pure text-in/struct-out so it tests without a network.
//! The LLM round-trip itself lives in the services layer.

use serde::Serialize;

use crate::config::ScreeningPolicy;
use crate::domain::assessment::{CandidateAssessment, FitCategory, NOT_MENTIONED};
use crate::domain::rules::{self, CRITERIA};
use crate::error::{ApiError, ApiResult};

/// Rejects transcripts above the pipeline ceiling before any model call.
pub fn check_transcript_len(transcript: &str, max_chars: usize) -> ApiResult<()> {
    let len = transcript.chars().count();
    if len > max_chars {
        return Err(ApiError::PayloadTooLarge(format!(
            "transcript is {len} characters, limit is {max_chars}"
        )));
    }
    Ok(())
}

/// Builds the structured-assessment prompt: role framing, the JSON schema the
/// model must reproduce field-for-field, the rendered rule table, and the
/// transcript.
pub fn build_assessment_prompt(
    transcript: &str,
    org_name: &str,
    policy: &ScreeningPolicy,
) -> String {
    let mut keys = String::new();
    for criterion in CRITERIA {
        keys.push_str(&format!(
            "      \"{key}\": {{\"criteria\": \"{label}\", \"status\": \"Pass | Conditional Pass | Fail | Not Applicable\", \"notes\": \"<transcript evidence>\"}},\n",
            key = criterion.key,
            label = criterion.label,
        ));
    }
    // trailing comma on the last entry would make the schema example invalid JSON
    keys.truncate(keys.trim_end_matches(",\n").len());

    format!(
        r#"You are an expert recruiter assistant for {org_name}. Analyze the phone screening transcript below and produce a structured candidate assessment.

Return ONLY a JSON object with exactly this structure. Do not add fields, commentary, or markdown fences:

{{
  "PERSONAL_DETAILS": {{
    "organization_name": "{org_name}",
    "name": "", "phone": "", "email": "", "address": "",
    "assessment_date": "", "other_info": ""
  }},
  "JOB_EXPERIENCE": [
    {{"job_title": "", "company": "", "duration": {{"start_date": "", "end_date": ""}}, "job_role": [""]}}
  ],
  "KEY_SKILLS": [""],
  "JOB_MATCHING": {{
{keys}
  }},
  "CALL_ANALYSIS": {{"call_summary": "", "recommendations": [""], "reason_for_fit": ""}},
  "CONCLUSION": {{"overall_recommendation": "", "reason": "", "fit_recommendation": "GOOD | BAD | INCOMPLETE", "score": "1-100"}}
}}

For any contact field the transcript does not mention, write exactly "{NOT_MENTIONED}".
Every JOB_MATCHING key above must appear in the output. Base every status on the rules below, citing the transcript in the notes.
If the call was cut short, rescheduled, or never reached the screening questions, set fit_recommendation to INCOMPLETE.

## Screening rules

{rules}## Transcript

{transcript}
"#,
        org_name = org_name,
        NOT_MENTIONED = NOT_MENTIONED,
        keys = keys,
        rules = rules::render_rule_table(policy),
        transcript = transcript,
    )
}

/// Strips a leading/trailing markdown code fence from model output, if present.
pub fn strip_json_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop an optional language tag on the fence line
    let inner = inner
        .strip_prefix("json")
        .unwrap_or(inner)
        .trim_start_matches(['\r', '\n']);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Parses model output into an assessment and finalizes it: the fit category
/// and score are recomputed from the per-criterion verdicts, overriding
/// whatever the model claimed. The model's own INCOMPLETE claim survives only
/// as the cut-short signal.
pub fn parse_assessment(raw: &str) -> ApiResult<CandidateAssessment> {
    let cleaned = strip_json_fences(raw);
    let mut assessment: CandidateAssessment =
        serde_json::from_str(cleaned).map_err(|e| ApiError::ExtractionParse {
            message: format!("model output is not a valid assessment: {e}"),
            raw: raw.to_string(),
        })?;

    let flagged_incomplete =
        assessment.conclusion.fit_recommendation == FitCategory::Incomplete;
    let fit = rules::compute_fit(assessment.verdicts(), flagged_incomplete);
    assessment.conclusion.fit_recommendation = fit;
    let score = assessment.score();
    assessment.conclusion.score = serde_json::Value::from(score);
    Ok(assessment)
}

/// Quick screening outcome parsed from labeled-block model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreeningOutcome {
    pub status: String,
    pub reasons: Vec<String>,
    pub recommendation: String,
}

/// Builds the lightweight pass/fail prompt whose output is labeled blocks
/// rather than JSON.
pub fn build_outcome_prompt(transcript: &str, policy: &ScreeningPolicy) -> String {
    format!(
        r#"You are screening a truck-driver candidate from a phone call transcript. Apply the rules below and answer in exactly this labeled format, nothing else:

status: <qualified | not qualified | incomplete>
reasons:
- <one reason per line>
recommendation: <one sentence next step>

## Screening rules

{rules}## Transcript

{transcript}
"#,
        rules = rules::render_rule_table(policy),
        transcript = transcript,
    )
}

/// Case-insensitive label match at the start of a line, returning the rest.
fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    if line.is_char_boundary(label.len()) && line[..label.len()].eq_ignore_ascii_case(label) {
        Some(line[label.len()..].trim())
    } else {
        None
    }
}

/// Parses "status:" / "reasons:" / "recommendation:" labeled blocks.
///
/// Labels are matched case-insensitively at line starts. Reason lines keep
/// accumulating until the next label; leading list markers are stripped.
pub fn parse_outcome(raw: &str) -> ApiResult<ScreeningOutcome> {
    let mut status = None;
    let mut recommendation = None;
    let mut reasons = Vec::new();
    let mut in_reasons = false;

    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = strip_label(trimmed, "status:") {
            status = Some(rest.to_string());
            in_reasons = false;
        } else if let Some(rest) = strip_label(trimmed, "reasons:") {
            if !rest.is_empty() {
                reasons.push(rest.to_string());
            }
            in_reasons = true;
        } else if let Some(rest) = strip_label(trimmed, "recommendation:") {
            recommendation = Some(rest.to_string());
            in_reasons = false;
        } else if in_reasons {
            let item = trimmed.trim_start_matches(['-', '*', '•']).trim();
            if !item.is_empty() {
                reasons.push(item.to_string());
            }
        }
    }

    match status {
        Some(status) if !status.is_empty() => Ok(ScreeningOutcome {
            status,
            reasons,
            recommendation: recommendation.unwrap_or_default(),
        }),
        _ => Err(ApiError::ExtractionParse {
            message: "model output has no status line".to_string(),
            raw: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::Verdict;

    fn assessment_json(fit: &str, age_status: &str) -> String {
        format!(
            r#"{{
                "PERSONAL_DETAILS": {{"name": "Sam Reyes"}},
                "JOB_EXPERIENCE": [],
                "KEY_SKILLS": [],
                "JOB_MATCHING": {{
                    "age": {{"criteria": "Age Requirements", "status": "{age_status}", "notes": ""}},
                    "weekend_work": {{"criteria": "Weekend Work Availability", "status": "Pass", "notes": ""}}
                }},
                "CALL_ANALYSIS": {{"call_summary": "", "recommendations": [], "reason_for_fit": ""}},
                "CONCLUSION": {{"overall_recommendation": "", "reason": "", "fit_recommendation": "{fit}", "score": "90"}}
            }}"#
        )
    }

    #[test]
    fn transcript_ceiling_is_enforced() {
        assert!(check_transcript_len("short", 12_000).is_ok());
        let long = "x".repeat(12_001);
        let err = check_transcript_len(&long, 12_000).unwrap_err();
        assert!(matches!(err, ApiError::PayloadTooLarge(_)));
    }

    #[test]
    fn prompt_embeds_schema_rules_and_transcript() {
        let prompt = build_assessment_prompt(
            "USER: I'm 30.",
            "TruckerHire.AI",
            &ScreeningPolicy::default(),
        );
        assert!(prompt.contains("\"JOB_MATCHING\""));
        assert!(prompt.contains("\"weekend_work\""));
        assert!(prompt.contains("### Age Requirements"));
        assert!(prompt.contains("USER: I'm 30."));
        assert!(prompt.contains(NOT_MENTIONED));
    }

    #[test]
    fn fences_are_stripped() {
        assert_eq!(strip_json_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_json_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_json_fences("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn model_fit_claim_is_overridden_by_verdicts() {
        // model claims GOOD but a criterion failed
        let parsed = parse_assessment(&assessment_json("GOOD", "Fail")).unwrap();
        assert_eq!(parsed.conclusion.fit_recommendation, FitCategory::Bad);
        assert_eq!(parsed.score(), 0);
        assert_eq!(parsed.conclusion.score, serde_json::Value::from(0u32));

        // model claims BAD but nothing failed
        let parsed = parse_assessment(&assessment_json("BAD", "Pass")).unwrap();
        assert_eq!(parsed.conclusion.fit_recommendation, FitCategory::Good);
        assert_eq!(parsed.score(), 90);
        assert_eq!(parsed.job_matching["age"].status, Verdict::Pass);
    }

    #[test]
    fn model_incomplete_claim_survives_without_failures() {
        let parsed = parse_assessment(&assessment_json("INCOMPLETE", "Pass")).unwrap();
        assert_eq!(parsed.conclusion.fit_recommendation, FitCategory::Incomplete);
        assert_eq!(parsed.score(), 0);
    }

    #[test]
    fn unparseable_output_keeps_the_raw_text() {
        let err = parse_assessment("I could not assess this call.").unwrap_err();
        match err {
            ApiError::ExtractionParse { raw, .. } => {
                assert_eq!(raw, "I could not assess this call.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn labeled_blocks_parse() {
        let raw = "Status: not qualified\nReasons:\n- failed drug screening question\n- no weekend availability\nRecommendation: do not advance.";
        let outcome = parse_outcome(raw).unwrap();
        assert_eq!(outcome.status, "not qualified");
        assert_eq!(outcome.reasons.len(), 2);
        assert_eq!(outcome.reasons[0], "failed drug screening question");
        assert_eq!(outcome.recommendation, "do not advance.");
    }

    #[test]
    fn missing_status_is_a_parse_error() {
        let err = parse_outcome("reasons:\n- whatever").unwrap_err();
        assert!(matches!(err, ApiError::ExtractionParse { .. }));
    }
}
