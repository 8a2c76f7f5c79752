//! Multi-label confidence scorer
//!
//! The scorer is an opaque, pre-trained artifact: a linear bag-of-words model
//! with per-label weights and a logistic link, loaded once at startup. Scores
//! are independent per label and need not sum to 1. Training and accuracy are
//! out of scope; the artifact is treated as immutable and versionless.

use crate::domain::LabelScore;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Trait for multi-label segment scoring implementations
///
/// Implementations must be safe to share read-only across worker tasks.
pub trait SegmentScorer: Send + Sync {
    /// Score the text against every known label; one entry per label,
    /// in the scorer's label order
    fn score(&self, text: &str) -> Vec<LabelScore>;

    /// The label set this scorer was trained on
    fn labels(&self) -> &[String];
}

/// Serialized scorer artifact
#[derive(Debug, Deserialize)]
struct ScorerArtifact {
    version: u32,
    labels: Vec<String>,
    bias: Vec<f64>,
    weights: HashMap<String, Vec<f64>>,
}

/// Linear bag-of-words scorer loaded from a JSON artifact
pub struct LabelScorer {
    labels: Vec<String>,
    bias: Vec<f64>,
    weights: HashMap<String, Vec<f64>>,
}

impl LabelScorer {
    /// Load a scorer from JSON artifact content
    pub fn from_json(content: &str) -> Result<Self> {
        let artifact: ScorerArtifact =
            serde_json::from_str(content).context("Failed to parse scorer artifact JSON")?;
        Self::from_artifact(artifact)
    }

    /// Load a scorer from a JSON artifact file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read scorer artifact: {}",
                path.as_ref().display()
            )
        })?;
        Self::from_json(&content)
    }

    /// Load the embedded default artifact
    pub fn default_scorer() -> Result<Self> {
        let default_json = include_str!("../../artifacts/scorer.json");
        Self::from_json(default_json)
    }

    fn from_artifact(artifact: ScorerArtifact) -> Result<Self> {
        if artifact.version != 1 {
            anyhow::bail!("Unsupported scorer artifact version: {}", artifact.version);
        }
        if artifact.labels.is_empty() {
            anyhow::bail!("Scorer artifact defines no labels");
        }
        let n = artifact.labels.len();
        if artifact.bias.len() != n {
            anyhow::bail!(
                "Scorer artifact bias length {} does not match label count {}",
                artifact.bias.len(),
                n
            );
        }
        for (term, row) in &artifact.weights {
            if row.len() != n {
                anyhow::bail!(
                    "Scorer artifact weight row for '{term}' has length {}, expected {}",
                    row.len(),
                    n
                );
            }
        }
        Ok(Self {
            labels: artifact.labels,
            bias: artifact.bias,
            weights: artifact.weights,
        })
    }
}

impl SegmentScorer for LabelScorer {
    fn score(&self, text: &str) -> Vec<LabelScore> {
        let mut logits = self.bias.clone();
        for token in tokenize(text) {
            if let Some(row) = self.weights.get(&token) {
                for (logit, weight) in logits.iter_mut().zip(row) {
                    *logit += weight;
                }
            }
        }
        self.labels
            .iter()
            .zip(&logits)
            .map(|(label, &logit)| LabelScore {
                label: label.clone(),
                confidence: sigmoid(logit),
            })
            .collect()
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// Lowercased alphanumeric word tokens
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
