//! Dense embedding vectors and the distance metrics used to compare them.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScreenrackError};

/// A dense vector produced by an embedder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector {
    /// The vector dimensions as floating point values.
    pub data: Vec<f32>,
}

impl Vector {
    /// Create a new vector with the given dimensions.
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    /// Get the dimensionality of this vector.
    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    /// True when the embedder produced no dimensions at all.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reject empty vectors and vectors containing NaN or infinite values.
    pub fn validate(&self) -> Result<()> {
        if self.data.is_empty() {
            return Err(ScreenrackError::embedding("embedding is empty"));
        }
        if self.data.iter().any(|v| !v.is_finite()) {
            return Err(ScreenrackError::embedding(
                "embedding contains NaN or infinite values",
            ));
        }
        Ok(())
    }
}

impl From<Vec<f32>> for Vector {
    fn from(data: Vec<f32>) -> Self {
        Self::new(data)
    }
}

/// Distance metrics for nearest-neighbor lookup. Lower is more similar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Squared Euclidean distance, the default of most embedding stores.
    #[default]
    SquaredEuclidean,
    /// Euclidean (L2) distance
    Euclidean,
    /// Cosine distance (1 - cosine similarity)
    Cosine,
}

impl DistanceMetric {
    /// Calculate the distance between two vectors using this metric.
    pub fn distance(&self, a: &[f32], b: &[f32]) -> Result<f32> {
        if a.len() != b.len() {
            return Err(ScreenrackError::invalid_argument(format!(
                "vector dimensions must match for distance calculation ({} != {})",
                a.len(),
                b.len()
            )));
        }

        let result = match self {
            DistanceMetric::SquaredEuclidean => {
                a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
            }
            DistanceMetric::Euclidean => a
                .iter()
                .zip(b.iter())
                .map(|(x, y)| (x - y).powi(2))
                .sum::<f32>()
                .sqrt(),
            DistanceMetric::Cosine => {
                let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
                let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
                let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

                if norm_a == 0.0 || norm_b == 0.0 {
                    1.0 // Maximum distance for zero vectors
                } else {
                    1.0 - (dot_product / (norm_a * norm_b))
                }
            }
        };

        Ok(result)
    }
}
