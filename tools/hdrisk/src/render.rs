//! Plain-text output for the `predict` and `schema` subcommands.

use std::fmt::Write;

use hdrisk_model::ModelBundle;
use hdrisk_predict::{Assessment, FeatureImportance, Report};

pub fn assessment_text(
    assessment: &Assessment,
    report: &Report,
    importance: Option<&[FeatureImportance]>,
) -> String {
    let mut out = String::new();
    let result = &assessment.result;
    let _ = writeln!(out, "Result:      {}", report.headline);
    let _ = writeln!(
        out,
        "Probability: {:.4} (threshold: {})",
        result.positive_probability(),
        result.threshold
    );

    if !assessment.defaulted.is_empty() {
        let _ = writeln!(
            out,
            "\nwarning: {} expected feature(s) were not produced and default to 0: {}",
            assessment.defaulted.len(),
            assessment.defaulted.join(", ")
        );
    }
    if !assessment.unrecognized.is_empty() {
        let fields: Vec<String> = assessment.unrecognized.iter().map(|f| f.to_string()).collect();
        let _ = writeln!(out, "warning: unrecognized answers for {}", fields.join(", "));
    }

    if let Some(table) = importance {
        let _ = writeln!(out, "\nFeature importance:");
        for row in table {
            let _ = writeln!(out, "  {:<20} {:.4}", row.feature, row.importance);
        }
    }

    let _ = writeln!(out, "\n{}", report.explanation);
    let _ = writeln!(out, "\nRecommendations:");
    for rec in &report.recommendations {
        let _ = writeln!(out, "  [{}] {}: {}", rec.priority, rec.action, rec.rationale);
    }
    out
}

pub fn schema_text(bundle: &ModelBundle) -> String {
    let mut out = String::new();
    let caps = bundle.capabilities();
    let _ = writeln!(out, "model:    {}", bundle.name());
    let _ = writeln!(out, "scheme:   {}", bundle.scheme().id());
    let _ = writeln!(out, "scaler:   {}", if bundle.scaler().is_some() { "yes" } else { "no" });
    let _ = writeln!(
        out,
        "declares: feature_names={} feature_importances={}",
        caps.feature_names, caps.feature_importances
    );
    let _ = writeln!(out, "features ({}):", bundle.schema().len());
    for (i, name) in bundle.schema().iter().enumerate() {
        let _ = writeln!(out, "  {i:>3}  {name}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdrisk_model::BinaryLabel;
    use hdrisk_predict::{compose_report, DecisionThreshold, PredictionResult};

    fn assessment(defaulted: &[&str]) -> Assessment {
        Assessment {
            result: PredictionResult {
                label: BinaryLabel::Positive,
                probabilities: [0.6, 0.4],
                threshold: DecisionThreshold::Explicit(0.35),
            },
            defaulted: defaulted.iter().map(|s| s.to_string()).collect(),
            dropped: Vec::new(),
            unrecognized: Vec::new(),
        }
    }

    #[test]
    fn defaulted_features_are_surfaced() {
        let a = assessment(&["Smoking", "Stroke"]);
        let text = assessment_text(&a, &compose_report(&a.result), None);
        assert!(text.contains("High risk"), "{text}");
        assert!(text.contains("default to 0: Smoking, Stroke"), "{text}");
        assert!(!text.contains("Feature importance"));
    }

    #[test]
    fn importance_rows_are_listed() {
        let a = assessment(&[]);
        let table = vec![FeatureImportance {
            feature: "BMI".into(),
            importance: 0.5,
        }];
        let text = assessment_text(&a, &compose_report(&a.result), Some(&table));
        assert!(!text.contains("warning"));
        assert!(text.contains("BMI"));
        assert!(text.contains("0.5000"));
    }
}
