use serde::{Deserialize, Serialize};
use std::fmt;

use crate::result::PredictionResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: String,
    pub rationale: String,
    pub priority: Priority,
}

/// Human-readable text shown next to a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub headline: String,
    pub explanation: String,
    pub recommendations: Vec<Recommendation>,
}

fn recommendation(action: &str, rationale: &str, priority: Priority) -> Recommendation {
    Recommendation {
        action: action.to_string(),
        rationale: rationale.to_string(),
        priority,
    }
}

pub fn compose_report(result: &PredictionResult) -> Report {
    let headline = if result.is_positive() {
        format!(
            "High risk of heart disease ({:.2}% probability)",
            result.positive_probability() * 100.0
        )
    } else {
        format!(
            "Low risk of heart disease ({:.2}% probability of no disease)",
            result.label_probability() * 100.0
        )
    };

    let explanation = "The prediction compares the submitted answers with patterns the model \
        learned from survey records. Age, smoking, physical inactivity and conditions such as \
        diabetes are among the main contributors to heart-disease risk."
        .to_string();

    let mut recommendations = Vec::new();
    if result.is_positive() {
        recommendations.push(recommendation(
            "consult_provider",
            "elevated predicted risk warrants a clinical evaluation",
            Priority::High,
        ));
    } else {
        recommendations.push(recommendation(
            "routine_check_up",
            "no elevated risk detected; regular check-ups are still advised",
            Priority::Low,
        ));
    }
    recommendations.push(recommendation(
        "diet_and_exercise",
        "keep a balanced diet and a regular exercise routine",
        Priority::Medium,
    ));
    recommendations.push(recommendation(
        "monitor_vitals",
        "check blood pressure and cholesterol regularly",
        Priority::Medium,
    ));
    recommendations.push(recommendation(
        "limit_tobacco_and_alcohol",
        "avoid smoking and limit alcohol consumption",
        Priority::Medium,
    ));

    Report {
        headline,
        explanation,
        recommendations,
    }
}
