use serde::Serialize;

use hdrisk_model::ModelBundle;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// Schema names paired with the model's importance scores, most important
/// first. `None` when the model does not expose importances.
pub fn importance_table(bundle: &ModelBundle) -> Option<Vec<FeatureImportance>> {
    let importances = bundle.feature_importances()?;
    let schema = bundle.schema();
    if importances.len() != schema.len() {
        log::warn!(
            "model '{}' reports {} importances for {} schema columns, skipping table",
            bundle.name(),
            importances.len(),
            schema.len()
        );
        return None;
    }

    let mut table: Vec<FeatureImportance> = schema
        .iter()
        .zip(importances)
        .map(|(feature, importance)| FeatureImportance {
            feature: feature.to_string(),
            importance: *importance,
        })
        .collect();
    table.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    Some(table)
}
