//! HTML report rendering.
//!
//! One assessment renders to a self-contained HTML document in one of two
//! themes: the dark app theme served to browsers (with a print stylesheet
//! embedded) and the light print theme used as PDF input. Rendering is pure
//! string assembly; given the same assessment it always produces the same
//! bytes.

use crate::domain::assessment::{is_displayable, CandidateAssessment, FitCategory, Verdict};
use crate::domain::extraction::ScreeningOutcome;

/// Report color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Dark on-screen theme, print overrides included.
    App,
    /// Light theme for the PDF pipeline.
    Print,
}

/// Escapes text for interpolation into HTML element content or attributes.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn display_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if is_displayable(value) {
        value
    } else {
        fallback
    }
}

fn status_class(status: Verdict) -> &'static str {
    match status {
        Verdict::Pass => "status-pass",
        Verdict::Fail => "status-fail",
        Verdict::ConditionalPass => "status-conditional",
        Verdict::NotApplicable => "status-na",
    }
}

fn achievement_card_class(fit: FitCategory) -> &'static str {
    match fit {
        FitCategory::Good => "achievement_card",
        FitCategory::Bad => "achievement_card _bad",
        FitCategory::Incomplete => "achievement_card _incomplete",
    }
}

/// Renders the full report document for one assessment.
pub fn render_html_report(
    assessment: &CandidateAssessment,
    org_name: &str,
    theme: Theme,
) -> String {
    let styles = match theme {
        Theme::App => APP_CSS,
        Theme::Print => PRINT_CSS,
    };

    let details = &assessment.personal_details;
    let mut cover_rows = String::new();
    let mut cover_row = |label: &str, value: &str, always: bool| {
        if always || is_displayable(value) {
            cover_rows.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>\n",
                label,
                escape(display_or(value, ""))
            ));
        }
    };
    cover_row("Organization Name", &details.organization_name, false);
    cover_row("Name", &details.name, true);
    cover_row("Assessment Date", &details.assessment_date, true);
    cover_row("Address", &details.address, true);
    cover_row("Phone", &details.phone, false);
    cover_row("Email", &details.email, false);

    let mut experience = String::new();
    for job in &assessment.job_experience {
        if !is_displayable(&job.job_title) || !is_displayable(&job.company) {
            continue;
        }
        let mut body = String::new();
        if is_displayable(&job.duration.start_date) || is_displayable(&job.duration.end_date) {
            body.push_str(&format!(
                "<p><strong>Duration:</strong> {} - {}</p>",
                escape(display_or(&job.duration.start_date, "Unknown")),
                escape(display_or(&job.duration.end_date, "Present")),
            ));
        }
        let roles: Vec<&str> = job
            .job_role
            .iter()
            .map(String::as_str)
            .filter(|r| is_displayable(r))
            .collect();
        if !roles.is_empty() {
            body.push_str(&format!(
                "<p><strong>Responsibilities:</strong> {}</p>",
                escape(&roles.join(", "))
            ));
        }
        experience.push_str(&format!(
            "<div class=\"inner_card\"><h4>{} - {}</h4>{}</div>\n",
            escape(&job.job_title),
            escape(&job.company),
            body,
        ));
    }
    if experience.is_empty() {
        experience.push_str("<p>No job experience information available.</p>");
    }

    let mut skills = String::new();
    for skill in assessment.key_skills.iter().filter(|s| is_displayable(s)) {
        skills.push_str(&format!(
            "<div class=\"inner_card\"><h4>{}</h4></div>",
            escape(skill)
        ));
    }
    if skills.is_empty() {
        skills.push_str("<p>No key skills information available.</p>");
    }

    // Unevaluated criteria are omitted rather than shown as empty rows.
    let mut matching_rows = String::new();
    for result in assessment.job_matching.values() {
        if !result.status.is_evaluated() {
            continue;
        }
        let status_label = match serde_json::to_value(result.status) {
            Ok(serde_json::Value::String(s)) => s,
            _ => String::new(),
        };
        matching_rows.push_str(&format!(
            "<tr><td>{}</td><td class=\"{}\">{}</td><td>{}</td></tr>\n",
            escape(&result.criteria),
            status_class(result.status),
            escape(&status_label),
            escape(display_or(&result.notes, "No additional notes")),
        ));
    }

    let mut recommendations = String::new();
    for rec in assessment
        .call_analysis
        .recommendations
        .iter()
        .filter(|r| is_displayable(r))
    {
        recommendations.push_str(&format!("<li>{}</li>\n", escape(rec)));
    }
    if recommendations.is_empty() {
        recommendations
            .push_str("<li>No specific recommendations available from the call analysis.</li>");
    }

    let fit = assessment.conclusion.fit_recommendation;
    let org = escape(org_name);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Call Summary Report</title>
<style>
{styles}
</style>
</head>
<body>
<div class="header">
  <table class="full_width">
    <tr>
      <td style="text-align: left;"><h1 class="header_text">Call Summary Report</h1></td>
      <td style="text-align: right;"><h2>{org}</h2></td>
    </tr>
  </table>
</div>
<div class="footer">Copyright 2025 {org}. All rights reserved.</div>
<div class="cover_page">
  <table>
{cover_rows}  </table>
</div>
<div class="content_page">
  <h2 class="page_heading">Assessment Result</h2>
  <div class="achievement_card_container">
    <div class="{card_class}">
      <div class="_content">
        <p class="_text_1">OVERALL ASSESSMENT</p>
        <h4 class="_text_2">{fit_text}</h4>
        <p class="_text_4">{overall}</p>
      </div>
      <div class="_score_wrap">
        <p>Overall Score</p>
        <p>{score}</p>
      </div>
    </div>
  </div>
</div>
<div class="content_page">
  <h2 class="page_heading">Executive Summary</h2>
  <div class="card">
    <h3>Objective:</h3>
    <p>To evaluate the candidate's suitability and alignment with the role's requirements through comprehensive call analysis.</p>
  </div>
  <div class="card">
    <h3>Job Experience:</h3>
    <div>{experience}</div>
  </div>
  <div class="card">
    <h3>Key Skills:</h3>
    <div>{skills}</div>
  </div>
</div>
<div class="content_page">
  <h2 class="page_heading">Job Matching</h2>
  <table class="_job_matching_table">
    <thead>
      <tr>
        <th style="width: 60%;">Criteria</th>
        <th style="width: 15%;">Status</th>
        <th style="width: 25%;">Notes</th>
      </tr>
    </thead>
    <tbody>
{matching_rows}    </tbody>
  </table>
</div>
<div class="content_page">
  <h2 class="page_heading">Call Analysis</h2>
  <div class="card">
    <h3 class="card_heading_1">Call Summary</h3>
    <p>{summary}</p>
  </div>
  <div class="card">
    <h3 class="card_heading_1">Recommendations</h3>
    <ul class="styled_list">
{recommendations}    </ul>
  </div>
  <div class="card">
    <h3 class="card_heading_1">Reason for Assessment</h3>
    <p>{reason}</p>
  </div>
</div>
</body>
</html>"#,
        styles = styles,
        org = org,
        cover_rows = cover_rows,
        card_class = achievement_card_class(fit),
        fit_text = fit.display_text(),
        overall = escape(display_or(&assessment.conclusion.overall_recommendation, "N/A")),
        score = assessment.score(),
        experience = experience,
        skills = skills,
        matching_rows = matching_rows,
        summary = escape(display_or(
            &assessment.call_analysis.call_summary,
            "Call summary not available."
        )),
        recommendations = recommendations,
        reason = escape(display_or(
            &assessment.call_analysis.reason_for_fit,
            "Assessment reasoning not available."
        )),
    )
}

/// Plain-text rendering of a quick screening outcome, served as the
/// call-evaluation attachment.
pub fn render_outcome_text(outcome: &ScreeningOutcome) -> String {
    let mut out = String::new();
    out.push_str("status: ");
    out.push_str(&outcome.status);
    out.push_str("\nreasons:\n");
    if outcome.reasons.is_empty() {
        out.push_str("  - none recorded\n");
    } else {
        for reason in &outcome.reasons {
            out.push_str("  - ");
            out.push_str(reason);
            out.push('\n');
        }
    }
    out.push_str("recommendation: ");
    out.push_str(&outcome.recommendation);
    out.push('\n');
    out
}

const APP_CSS: &str = r#"
@page { margin: 0; }
body { font-family: Arial, sans-serif; background-color: #222; color: #fff; margin: 0; padding: 1.3in 0.25in 0.25in; vertical-align: top; }
.full_width { width: calc(100% - 0.5in); }
.header { position: fixed; top: 0; left: 0; width: 100%; height: 0.75in; background-color: rgba(0, 0, 0, 0.8); padding: 0.25in; box-sizing: border-box; z-index: 1000; }
.header_text { color: #fff; margin: 0; font-size: 1.25em; font-weight: 700; text-transform: uppercase; }
.footer { position: fixed; bottom: 0; left: 0; width: 100%; border-top: 1px solid rgba(255, 255, 255, 0.1); padding: 0.125in; height: 0.25in; text-align: center; color: #aaa; font-size: 0.75em; z-index: 1000; }
.cover_page { color: #fff; padding-top: 0.5in; padding-bottom: 0.25in; }
.cover_page table { color: #fff; font-size: 1.25em; border: 2px solid rgba(255, 204, 0, 0.25); border-radius: 1em; width: 100%; border-spacing: 0; overflow: hidden; }
.cover_page table td { padding: 0.25in; border-bottom: 2px solid rgba(255, 204, 0, 0.25); }
.cover_page table tr:last-child td { border-bottom: none; }
.cover_page table td:first-child { border-right: 2px solid rgba(255, 204, 0, 0.25); font-weight: bold; background-color: rgba(255, 204, 0, 0.025); color: rgba(255, 204, 0, 1); }
.content_page { padding-top: 0.25in; padding-bottom: 0.25in; }
.page_heading { color: rgba(255, 255, 255, 0.75); font-size: 1.25em; margin: 0 0 0.5em; padding: 0.125in; background-color: rgba(255, 255, 255, 0.05); border-radius: 0.5em; }
.card { border: 1px solid rgba(255, 255, 255, 0.1); border-radius: 0.5em; padding: 0.125in; vertical-align: top; margin-bottom: 1em; }
.card h3 { color: rgba(255, 255, 255, 0.75); font-size: 1em; margin: 0 0 0.5em; padding: 0; }
.card p { color: rgba(255, 255, 255, 0.875); font-size: 0.825em; line-height: 1.5; margin: 0 0 0.5em; padding: 0; }
.card p:last-child { margin-bottom: 0; }
.achievement_card_container { padding-top: 50px; padding-bottom: 50px; }
.achievement_card { width: 400px; max-width: 100%; margin: 0 auto; border: 5px solid #a4e89f; border-radius: 1.25em; position: relative; background-color: rgba(164, 232, 159, 0.125); }
.achievement_card._bad { border-color: #ff6b6b; background-color: rgba(255, 107, 107, 0.125); }
.achievement_card._incomplete { border-color: #ffa726; background-color: rgba(255, 167, 38, 0.125); }
.achievement_card ._content { padding: 1.25em; text-align: center; }
.achievement_card ._content ._text_1 { color: #ffcc00; font-size: 0.875em; margin: 0 0 0.5em; padding: 0; }
.achievement_card ._content ._text_2 { color: #fff; font-size: 1.5em; margin: 0 0 0.5em; padding: 0; font-weight: bold; text-transform: uppercase; }
.achievement_card ._content ._text_4 { background-color: #ffcc0040; color: rgba(255, 255, 255, 0.75); padding: 0.5em; border-radius: 0.5em; }
.achievement_card ._score_wrap { background-color: rgba(0, 0, 0, 0.25); color: #fff; padding: 1.25em; text-align: center; border-radius: 4em 4em 1.25em 1.25em; }
.achievement_card ._score_wrap p:first-child { font-size: 0.875em; margin: 0 0 0.5em; padding: 0; color: #b9b9b9; }
.achievement_card ._score_wrap p:last-child { font-size: 2em; margin: 0; padding: 0; font-weight: bold; color: #ffcc00; }
._job_matching_table { max-width: 100%; margin: 0 auto; border-collapse: collapse; border: 1px solid #444; border-radius: 0.5em; overflow: hidden; }
._job_matching_table thead { background-color: #2f2f2f; color: #aaa; }
._job_matching_table thead th { padding: 0.5em; border-bottom: 1px solid #444; border-right: 1px solid #444; text-align: left; }
._job_matching_table thead th:last-child { border-right: none; }
._job_matching_table tbody tr td { padding: 0.5em; color: #fff; border-bottom: 1px solid #444; border-right: 1px solid #444; }
._job_matching_table tbody tr:last-child td { border-bottom: none; }
._job_matching_table tbody tr td:first-child { background-color: #2f2f2f; }
._job_matching_table tbody tr td:last-child { border-right: none; }
.status-pass { color: #4CAF50; font-weight: bold; text-transform: uppercase; }
.status-fail { color: #f44336; font-weight: bold; text-transform: uppercase; }
.status-conditional { color: #ff9800; font-weight: bold; text-transform: uppercase; }
.status-na { color: #9e9e9e; }
.inner_card { padding: 0.125in; border-right: 1px solid #444; background-color: rgba(255, 255, 255, 0.05); border-radius: 0.25em; margin-right: 0.5em; margin-bottom: 0.5em; display: inline-block; vertical-align: top; min-width: 200px; }
.inner_card h4 { color: rgba(255, 255, 255, 0.75); font-size: 0.875em; margin: 0 0 0.25em; padding: 0; }
.inner_card p { color: rgba(255, 255, 255, 0.875); font-size: 0.75em; line-height: 1.5; margin: 0; padding: 0; }
.styled_list { padding: 0; margin: 0; }
.styled_list li { list-style: none; padding-left: 1.5em; position: relative; margin-bottom: 0.5em; font-size: 0.875em; line-height: 1.4; color: #f2f2f2; }
.styled_list li:before { content: "\2022"; color: #ffcc00; font-size: 1.5em; position: absolute; left: 0; top: 0; line-height: 1; }
.card_heading_1 { background-color: #2f2f2f; padding: 0.125in; border-radius: 0.5em; color: #ffcc00; font-size: 1.125em; margin: 0 0 0.5em; }
@media print {
  body { background: #fff !important; color: #000 !important; padding: 1in 0.5in 0.5in; }
  .header { background: #fff !important; color: #000 !important; border-bottom: 2px solid #000; }
  .header_text { color: #000 !important; }
  .footer { background: #fff !important; color: #666 !important; border-top: 1px solid #ccc; }
  .cover_page table { background: #fff !important; color: #000 !important; border: 2px solid #333 !important; }
  .cover_page table td { color: #000 !important; border-bottom: 1px solid #ccc !important; }
  .cover_page table td:first-child { background: #f5f5f5 !important; color: #333 !important; border-right: 1px solid #ccc !important; }
  .page_heading { background: #f8f8f8 !important; color: #333 !important; border-left: 4px solid #333 !important; }
  .card { background: #fafafa !important; color: #000 !important; border: 1px solid #ddd !important; }
  .card h3 { color: #333 !important; }
  .card p { color: #444 !important; }
  .achievement_card { background: #f0f8f0 !important; border-color: #4CAF50 !important; }
  .achievement_card._bad { background: #fff0f0 !important; border-color: #f44336 !important; }
  .achievement_card._incomplete { background: #fff8f0 !important; border-color: #ff9800 !important; }
  .achievement_card ._content ._text_1 { color: #666 !important; }
  .achievement_card ._content ._text_2 { color: #000 !important; }
  .achievement_card ._content ._text_4 { background: #f5f5f5 !important; color: #333 !important; }
  .achievement_card ._score_wrap { background: #f0f0f0 !important; color: #000 !important; }
  .achievement_card ._score_wrap p:first-child { color: #666 !important; }
  .achievement_card ._score_wrap p:last-child { color: #333 !important; }
  ._job_matching_table { border: 1px solid #ccc !important; }
  ._job_matching_table thead { background: #f5f5f5 !important; color: #333 !important; }
  ._job_matching_table thead th { border-bottom: 1px solid #ccc !important; border-right: 1px solid #ccc !important; color: #333 !important; }
  ._job_matching_table tbody tr td { color: #000 !important; border-bottom: 1px solid #ccc !important; border-right: 1px solid #ccc !important; }
  ._job_matching_table tbody tr td:first-child { background: #f8f8f8 !important; }
  .inner_card { background: #f8f8f8 !important; border: 1px solid #ddd !important; color: #000 !important; }
  .inner_card h4 { color: #333 !important; }
  .inner_card p { color: #555 !important; }
  .styled_list li { color: #000 !important; }
  .styled_list li:before { color: #333 !important; }
  .card_heading_1 { background: #f0f0f0 !important; color: #333 !important; }
}
"#;

const PRINT_CSS: &str = r#"
@page { margin: 0; }
body { font-family: Arial, sans-serif; background-color: #fff !important; color: #000 !important; margin: 0; padding: 0; }
.full_width { width: 100%; }
.header { width: 100%; padding: 0.125in 0; border-bottom: 2px solid #000; box-sizing: border-box; }
.header_text { color: #000 !important; margin: 0; font-size: 1.25em; font-weight: 700; text-transform: uppercase; }
.footer { width: 100%; border-top: 1px solid #ccc; padding: 0.125in 0; text-align: center; color: #666 !important; background: #fff !important; font-size: 0.75em; }
.cover_page { color: #000 !important; padding-top: 0.25in; padding-bottom: 0.25in; }
.cover_page table { color: #000 !important; font-size: 1.25em; border: 2px solid #333; border-radius: 1em; width: 100%; border-spacing: 0; overflow: hidden; background: #fff !important; }
.cover_page table td { padding: 0.25in; border-bottom: 1px solid #ccc; color: #000 !important; }
.cover_page table tr:last-child td { border-bottom: none; }
.cover_page table td:first-child { border-right: 1px solid #ccc; font-weight: bold; background-color: #f5f5f5 !important; color: #333 !important; }
.content_page { padding-top: 0.25in; padding-bottom: 0.25in; }
.page_heading { color: #333 !important; font-size: 1.25em; margin: 0 0 0.5em; padding: 0.125in; background-color: #f8f8f8 !important; border-left: 4px solid #333; border-radius: 0.5em; }
.card { border: 1px solid #ddd; border-radius: 0.5em; padding: 0.125in; vertical-align: top; margin-bottom: 1em; background: #fafafa !important; }
.card h3 { color: #333 !important; font-size: 1em; margin: 0 0 0.5em; padding: 0; }
.card p { color: #444 !important; font-size: 0.825em; line-height: 1.5; margin: 0 0 0.5em; padding: 0; }
.card p:last-child { margin-bottom: 0; }
.achievement_card_container { padding-top: 50px; padding-bottom: 50px; }
.achievement_card { width: 400px; max-width: 100%; margin: 0 auto; border: 5px solid #4CAF50; border-radius: 1.25em; position: relative; background-color: #f0f8f0 !important; }
.achievement_card._bad { border-color: #f44336; background-color: #fff0f0 !important; }
.achievement_card._incomplete { border-color: #ff9800; background-color: #fff8f0 !important; }
.achievement_card ._content { padding: 1.25em; text-align: center; }
.achievement_card ._content ._text_1 { color: #666 !important; font-size: 0.875em; margin: 0 0 0.5em; padding: 0; }
.achievement_card ._content ._text_2 { color: #000 !important; font-size: 1.5em; margin: 0 0 0.5em; padding: 0; font-weight: bold; text-transform: uppercase; }
.achievement_card ._content ._text_4 { background-color: #f5f5f5 !important; color: #333 !important; padding: 0.5em; border-radius: 0.5em; }
.achievement_card ._score_wrap { background-color: #f0f0f0 !important; color: #000 !important; padding: 1.25em; text-align: center; border-radius: 4em 4em 1.25em 1.25em; }
.achievement_card ._score_wrap p:first-child { font-size: 0.875em; margin: 0 0 0.5em; padding: 0; color: #666 !important; }
.achievement_card ._score_wrap p:last-child { font-size: 2em; margin: 0; padding: 0; font-weight: bold; color: #333 !important; }
._job_matching_table { max-width: 100%; margin: 0 auto; border-collapse: collapse; border: 1px solid #ccc; border-radius: 0.5em; overflow: hidden; }
._job_matching_table thead { background-color: #f5f5f5 !important; color: #333 !important; }
._job_matching_table thead th { padding: 0.5em; border-bottom: 1px solid #ccc; border-right: 1px solid #ccc; text-align: left; color: #333 !important; }
._job_matching_table thead th:last-child { border-right: none; }
._job_matching_table tbody tr td { padding: 0.5em; color: #000 !important; border-bottom: 1px solid #ccc; border-right: 1px solid #ccc; }
._job_matching_table tbody tr:last-child td { border-bottom: none; }
._job_matching_table tbody tr td:first-child { background-color: #f8f8f8 !important; }
._job_matching_table tbody tr td:last-child { border-right: none; }
.status-pass { color: #2e7d32 !important; font-weight: bold; text-transform: uppercase; }
.status-fail { color: #c62828 !important; font-weight: bold; text-transform: uppercase; }
.status-conditional { color: #ef6c00 !important; font-weight: bold; text-transform: uppercase; }
.status-na { color: #616161 !important; }
.inner_card { padding: 0.125in; background-color: #f8f8f8 !important; border: 1px solid #ddd; border-radius: 0.25em; margin-right: 0.5em; margin-bottom: 0.5em; display: inline-block; vertical-align: top; min-width: 200px; }
.inner_card h4 { color: #333 !important; font-size: 0.875em; margin: 0 0 0.25em; padding: 0; }
.inner_card p { color: #555 !important; font-size: 0.75em; line-height: 1.5; margin: 0; padding: 0; }
.styled_list { padding: 0; margin: 0; }
.styled_list li { list-style: none; padding-left: 1.5em; position: relative; margin-bottom: 0.5em; font-size: 0.875em; line-height: 1.4; color: #000 !important; }
.styled_list li:before { content: "\2022"; color: #333 !important; font-size: 1.5em; position: absolute; left: 0; top: 0; line-height: 1; }
.card_heading_1 { background-color: #f0f0f0 !important; padding: 0.125in; border-radius: 0.5em; color: #333 !important; font-size: 1.125em; margin: 0 0 0.5em; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{
        CallAnalysis, Conclusion, CriterionResult, PersonalDetails, NOT_MENTIONED,
    };
    use std::collections::BTreeMap;

    fn sample_assessment() -> CandidateAssessment {
        let mut job_matching = BTreeMap::new();
        job_matching.insert(
            "age".to_string(),
            CriterionResult {
                criteria: "Age Requirements".to_string(),
                status: Verdict::Pass,
                notes: "Confirmed physical demands".to_string(),
            },
        );
        job_matching.insert(
            "drug_use".to_string(),
            CriterionResult {
                criteria: "Drug Use / Medications".to_string(),
                status: Verdict::NotApplicable,
                notes: String::new(),
            },
        );
        CandidateAssessment {
            personal_details: PersonalDetails {
                name: "Dorian Jackson".to_string(),
                phone: NOT_MENTIONED.to_string(),
                email: "d@example.com".to_string(),
                ..PersonalDetails::default()
            },
            job_experience: vec![],
            key_skills: vec!["Driving".to_string(), NOT_MENTIONED.to_string()],
            job_matching,
            call_analysis: CallAnalysis {
                call_summary: "Short & positive call.".to_string(),
                recommendations: vec!["Advance to video interview".to_string()],
                reason_for_fit: String::new(),
            },
            conclusion: Conclusion {
                overall_recommendation: "Proceed".to_string(),
                reason: String::new(),
                fit_recommendation: FitCategory::Good,
                score: serde_json::json!(72),
            },
        }
    }

    #[test]
    fn sentinel_fields_are_suppressed() {
        let html = render_html_report(&sample_assessment(), "TruckerHire.AI", Theme::App);
        assert!(!html.contains(NOT_MENTIONED));
        assert!(html.contains("d@example.com"));
        // phone row dropped entirely
        assert!(!html.contains("<td>Phone</td>"));
    }

    #[test]
    fn unevaluated_criteria_are_omitted_from_the_table() {
        let html = render_html_report(&sample_assessment(), "TruckerHire.AI", Theme::App);
        assert!(html.contains("Age Requirements"));
        assert!(!html.contains("Drug Use / Medications"));
    }

    #[test]
    fn fit_category_drives_card_class_and_text() {
        let mut assessment = sample_assessment();
        assessment.conclusion.fit_recommendation = FitCategory::Bad;
        let html = render_html_report(&assessment, "TruckerHire.AI", Theme::Print);
        assert!(html.contains("achievement_card _bad"));
        assert!(html.contains("Poor Fit"));
        assert!(html.contains(">0</p>"));
    }

    #[test]
    fn text_content_is_html_escaped() {
        let mut assessment = sample_assessment();
        assessment.call_analysis.call_summary = "<script>alert(1)</script>".to_string();
        let html = render_html_report(&assessment, "TruckerHire.AI", Theme::App);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn themes_differ_only_in_styles() {
        let app = render_html_report(&sample_assessment(), "TruckerHire.AI", Theme::App);
        let print = render_html_report(&sample_assessment(), "TruckerHire.AI", Theme::Print);
        assert_ne!(app, print);
        assert!(app.contains("@media print"));
        assert!(!print.contains("@media print"));
        // identical input renders identical output
        assert_eq!(
            app,
            render_html_report(&sample_assessment(), "TruckerHire.AI", Theme::App)
        );
    }

    #[test]
    fn outcome_text_lists_reasons() {
        let outcome = ScreeningOutcome {
            status: "Screening Complete > Bad Fit".to_string(),
            reasons: vec!["drug use disclosed".to_string()],
            recommendation: "do not advance".to_string(),
        };
        let text = render_outcome_text(&outcome);
        assert!(text.starts_with("status: Screening Complete > Bad Fit\n"));
        assert!(text.contains("  - drug use disclosed\n"));
        assert!(text.ends_with("recommendation: do not advance\n"));
    }
}
