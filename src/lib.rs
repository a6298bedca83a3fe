pub mod codebook;
pub mod config;
pub mod decision;
pub mod error;
pub mod features;
pub mod network;
pub mod record;
pub mod scaler;
pub mod storage;

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use codebook::LABELS;

pub use error::{ClassifierError, Result};
pub use features::FeatureVector;
pub use network::ClassifierNetwork;
pub use record::RawRecord;
pub use scaler::ScalerParameters;

/// Result of classifying one record.
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    /// Decoded category label.
    pub label: &'static str,
    /// Raw score vector, one entry per label, for diagnostics.
    pub scores: Vec<f32>,
}

/// The classification pipeline: a loaded network and scaler held as
/// immutable values.
///
/// Construct one per model version; instances are `Send + Sync` by
/// construction (no interior mutability, no globals) and can be shared
/// behind `Arc` across arbitrarily many concurrent callers. Each call
/// allocates its own feature and score vectors.
#[derive(Debug)]
pub struct Pipeline {
    network: ClassifierNetwork,
    scaler: ScalerParameters,
}

impl Pipeline {
    /// Assemble a pipeline from already-loaded parts, checking that their
    /// widths agree with each other and with the label vocabulary.
    pub fn new(network: ClassifierNetwork, scaler: ScalerParameters) -> Result<Self> {
        if scaler.feature_count() != network.input_width() {
            return Err(ClassifierError::ScalerShape {
                expected: network.input_width(),
                got: scaler.feature_count(),
            });
        }
        if network.output_width() != LABELS.len() {
            return Err(ClassifierError::VocabularyMismatch {
                scores: network.output_width(),
                labels: LABELS.len(),
            });
        }

        Ok(Self { network, scaler })
    }

    /// Load both artifacts and assemble the pipeline. The only I/O the
    /// pipeline ever performs; called once at process start.
    pub fn from_artifacts(weights_path: &Path, scaler_path: &Path) -> Result<Self> {
        let network = storage::load_network(weights_path)?.network;
        let scaler = storage::load_scaler(scaler_path)?.scaler;
        Self::new(network, scaler)
    }

    /// Classify one record: encode, normalize, infer, decide. Pure
    /// computation; deterministic for identical inputs. Any stage failure
    /// yields an error and no label.
    pub fn classify(&self, record: &RawRecord) -> Result<Classification> {
        let features = FeatureVector::build(record)?;
        debug!("encoded features: {:?}", features.as_slice());

        let normalized = self.scaler.normalize(&features)?;
        let scores = self.network.infer(&normalized)?;
        debug!("raw scores: {:?}", scores);

        let label = decision::decide(&scores, LABELS)?;
        Ok(Classification { label, scores })
    }

    /// Parse a comma-separated record line and classify it.
    pub fn classify_line(&self, line: &str) -> Result<Classification> {
        let record = RawRecord::parse(line)?;
        self.classify(&record)
    }

    /// The loaded network.
    pub fn network(&self) -> &ClassifierNetwork {
        &self.network
    }

    /// The loaded scaler.
    pub fn scaler(&self) -> &ScalerParameters {
        &self.scaler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FEATURE_COUNT;
    use crate::network::{Activation, DenseLayer};

    /// 28→5 network whose logits echo the first five normalized features.
    fn echo_network() -> ClassifierNetwork {
        let mut weights = vec![0.0; FEATURE_COUNT * LABELS.len()];
        for class in 0..LABELS.len() {
            weights[class * FEATURE_COUNT + class] = 1.0;
        }
        ClassifierNetwork::new(vec![DenseLayer {
            input_dim: FEATURE_COUNT,
            output_dim: LABELS.len(),
            weights,
            bias: vec![0.0; LABELS.len()],
            activation: Activation::Identity,
        }])
        .unwrap()
    }

    fn sample_line() -> String {
        let mut fields = vec!["0", "tcp", "telnet", "SF"];
        fields.extend(std::iter::repeat("0").take(37));
        fields.join(",")
    }

    #[test]
    fn test_pipeline_classifies_record() {
        let pipeline =
            Pipeline::new(echo_network(), ScalerParameters::identity(FEATURE_COUNT)).unwrap();

        // Features start [0, 1 (tcp), 60 (telnet), 9 (SF), 0, ...] so the
        // echoed logits peak at class index 2.
        let result = pipeline.classify_line(&sample_line()).unwrap();
        assert_eq!(result.label, "R2L");
        assert_eq!(result.scores.len(), LABELS.len());
        assert_eq!(result.scores[2], 60.0);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let pipeline =
            Pipeline::new(echo_network(), ScalerParameters::identity(FEATURE_COUNT)).unwrap();

        let first = pipeline.classify_line(&sample_line()).unwrap();
        let second = pipeline.classify_line(&sample_line()).unwrap();
        assert_eq!(first.label, second.label);
        assert_eq!(first.scores, second.scores);
    }

    #[test]
    fn test_mismatched_scaler_rejected() {
        let err = Pipeline::new(echo_network(), ScalerParameters::identity(10)).unwrap_err();
        assert!(matches!(err, ClassifierError::ScalerShape { .. }));
    }

    #[test]
    fn test_bad_record_produces_no_label() {
        let pipeline =
            Pipeline::new(echo_network(), ScalerParameters::identity(FEATURE_COUNT)).unwrap();

        assert!(pipeline.classify_line("0,tcp").is_err());
        let mut fields = vec!["0", "tcp", "not_a_real_service", "SF"];
        fields.extend(std::iter::repeat("0").take(37));
        assert!(pipeline.classify_line(&fields.join(",")).is_err());
    }
}
