//! The screening rule table and the deterministic fit computation.
//!
//! The rules are rendered into the extraction prompt so the model assigns
//! per-criterion verdicts, but the overall fit category is computed here from
//! the verdict set. The model's own fit claim is only consulted for the
//! incomplete-call signal, never for the pass/fail decision.

use crate::config::ScreeningPolicy;
use crate::domain::assessment::{FitCategory, Verdict};

/// One screening criterion: stable key, display label, and the policy rule
/// rendered into the prompt.
pub struct Criterion {
    pub key: &'static str,
    pub label: &'static str,
    rule: fn(&ScreeningPolicy) -> String,
}

/// The fixed criterion set, in prompt/schema order.
pub const CRITERIA: &[Criterion] = &[
    Criterion {
        key: "age",
        label: "Age Requirements",
        rule: |p| {
            format!(
                "Age >= {confirm}: accepts physical demands -> Pass; hesitates or cannot lift 150 lbs -> Fail. \
                 Age > {fail} -> Fail. Age < {confirm} -> Pass.",
                confirm = p.age_physical_confirm_min,
                fail = p.age_fail_over,
            )
        },
    },
    Criterion {
        key: "commute_time",
        label: "Commute Time",
        rule: |p| {
            format!(
                "Commute >= {m} minutes: willing or rural area -> Conditional Pass; else -> Fail. \
                 Commute < {m} minutes -> Pass.",
                m = p.commute_concern_minutes,
            )
        },
    },
    Criterion {
        key: "background_check",
        label: "Felony / Misdemeanor",
        rule: |_| {
            "Felony or misdemeanor disclosed transparently -> Conditional Pass; hides information -> Fail. \
             Clean record -> Pass."
                .to_string()
        },
    },
    Criterion {
        key: "drug_use",
        label: "Drug Use / Medications",
        rule: |_| "Any current usage -> Fail. No usage -> Pass.".to_string(),
    },
    Criterion {
        key: "driving_experience",
        label: "Driving Experience (last 3 years)",
        rule: |_| {
            "Less than 1 year in the last 3 years: gig work or 5-10 years of history -> Conditional Pass; \
             none -> Fail. At least 1 year recent -> Pass."
                .to_string()
        },
    },
    Criterion {
        key: "fedex_experience",
        label: "FedEx Experience",
        rule: |_| {
            "Worked as a driver less than 1 month ago -> Conditional Pass. Other experience or none -> Pass."
                .to_string()
        },
    },
    Criterion {
        key: "employment_status_employed",
        label: "Employment Status (Employed)",
        rule: |_| {
            "Currently employed with a valid reason for changing -> Pass; vague issues -> Conditional Pass."
                .to_string()
        },
    },
    Criterion {
        key: "employment_status_unemployed",
        label: "Employment Status (Unemployed)",
        rule: |p| {
            format!(
                "Unemployed < 1 month -> Pass. Unemployed 1+ months with unclear reason -> Conditional Pass. \
                 Unemployed {m}+ months -> Fail.",
                m = p.unemployed_fail_months,
            )
        },
    },
    Criterion {
        key: "transportation",
        label: "Transportation Availability",
        rule: |_| {
            "Reliable transport, or < 5 minute walk and punctual -> Pass. No reliable transport -> Conditional Pass."
                .to_string()
        },
    },
    Criterion {
        key: "relocating",
        label: "Relocating",
        rule: |_| {
            "Recently moved or moving within 1 month -> Conditional Pass. No definite move date -> Fail. \
             Not relocating -> Pass."
                .to_string()
        },
    },
    Criterion {
        key: "english_communication",
        label: "English Communication",
        rule: |_| {
            "Cannot communicate effectively -> Conditional Pass. Good communication -> Pass.".to_string()
        },
    },
    Criterion {
        key: "cdl_transition",
        label: "CDL to Non-CDL Transition",
        rule: |_| {
            "CDL holder moving to non-CDL with a clear reason -> Pass; no clear reason -> Conditional Pass."
                .to_string()
        },
    },
    Criterion {
        key: "license_class",
        label: "License Class Availability",
        rule: |_| {
            "Missing the required class but will get it before the road test -> Conditional Pass; \
             won't get it -> Fail. Has the required class -> Pass."
                .to_string()
        },
    },
    Criterion {
        key: "driving_job_understanding",
        label: "Understanding of Driving Job",
        rule: |_| {
            "Understands the driving job requirements -> Pass. Resists or misunderstands -> Fail.".to_string()
        },
    },
    Criterion {
        key: "weekend_work",
        label: "Weekend Work Availability",
        rule: |_| {
            "Accepts weekend work -> Pass. Hesitant but willing -> Conditional Pass. \
             Unavailable for weekends -> Fail."
                .to_string()
        },
    },
];

/// Renders the rule table as prompt text, one block per criterion, with the
/// precedence rule stated up front.
pub fn render_rule_table(policy: &ScreeningPolicy) -> String {
    let mut out = String::with_capacity(2048);
    out.push_str(
        "Apply each rule only if the transcript contains evidence for it; \
         otherwise the status is \"Not Applicable\". \
         Precedence: if any evaluated criterion is Fail, the overall fit is BAD \
         regardless of how many others pass.\n\n",
    );
    for criterion in CRITERIA {
        out.push_str("### ");
        out.push_str(criterion.label);
        out.push('\n');
        out.push_str(&(criterion.rule)(policy));
        out.push_str("\n\n");
    }
    out
}

/// Deterministic fit computation over the extracted verdicts.
///
/// `flagged_incomplete` carries the model's own signal that the call was cut
/// short or rescheduled; it only matters when no criterion failed.
pub fn compute_fit<I>(verdicts: I, flagged_incomplete: bool) -> FitCategory
where
    I: IntoIterator<Item = Verdict>,
{
    let mut evaluated = 0usize;
    for verdict in verdicts {
        match verdict {
            Verdict::Fail => return FitCategory::Bad,
            Verdict::Pass | Verdict::ConditionalPass => evaluated += 1,
            Verdict::NotApplicable => {}
        }
    }
    if flagged_incomplete || evaluated == 0 {
        FitCategory::Incomplete
    } else {
        FitCategory::Good
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_fail_forces_bad_regardless_of_passes() {
        let verdicts = vec![
            Verdict::Pass,
            Verdict::ConditionalPass,
            Verdict::Fail,
            Verdict::Pass,
        ];
        assert_eq!(compute_fit(verdicts, false), FitCategory::Bad);
    }

    #[test]
    fn fail_outranks_the_incomplete_flag() {
        assert_eq!(
            compute_fit(vec![Verdict::Fail], true),
            FitCategory::Bad
        );
    }

    #[test]
    fn conditional_passes_still_yield_good() {
        let verdicts = vec![
            Verdict::Pass,
            Verdict::ConditionalPass,
            Verdict::NotApplicable,
        ];
        assert_eq!(compute_fit(verdicts, false), FitCategory::Good);
    }

    #[test]
    fn nothing_evaluable_is_incomplete() {
        assert_eq!(
            compute_fit(vec![Verdict::NotApplicable; 15], false),
            FitCategory::Incomplete
        );
        assert_eq!(compute_fit(vec![], false), FitCategory::Incomplete);
    }

    #[test]
    fn flagged_incomplete_overrides_passes() {
        assert_eq!(
            compute_fit(vec![Verdict::Pass, Verdict::Pass], true),
            FitCategory::Incomplete
        );
    }

    #[test]
    fn single_pass_with_rest_not_applicable_is_good() {
        // The age-only example: one Pass, everything else unmentioned.
        let mut verdicts = vec![Verdict::NotApplicable; 14];
        verdicts.push(Verdict::Pass);
        assert_eq!(compute_fit(verdicts, false), FitCategory::Good);
    }

    #[test]
    fn rule_table_reflects_policy_thresholds() {
        let policy = ScreeningPolicy {
            age_physical_confirm_min: 40,
            age_fail_over: 60,
            commute_concern_minutes: 50,
            unemployed_fail_months: 6,
            video_interview_for_older: true,
        };
        let table = render_rule_table(&policy);
        assert!(table.contains("Age >= 40"));
        assert!(table.contains("Commute >= 50 minutes"));
        assert!(table.contains("### Weekend Work Availability"));
        // every criterion is present
        for criterion in CRITERIA {
            assert!(table.contains(criterion.label), "{} missing", criterion.label);
        }
    }
}
