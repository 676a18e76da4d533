//! Candidate report rendering.

pub mod html;

pub use html::{render_html_report, render_outcome_text, Theme};
