use crate::error::RecognitionError;
use crate::types::{Alignment, FeatureMatrix, FeatureSequence};

/// Spectral front end turning a raw waveform into a `(C, T)` coefficient
/// matrix. The MFCC transform itself lives behind this boundary.
pub trait SpectralTransform: Send + Sync {
    fn coefficients(&self, samples: &[f32]) -> Result<FeatureMatrix, RecognitionError>;
}

/// Opaque pretrained scorer: framed `(C, F)` features in, one score per
/// class index out. Training and persistence are outside this crate.
pub trait Classifier: Send + Sync {
    fn infer(&self, features: &FeatureSequence) -> Result<Vec<f32>, RecognitionError>;
}

/// Alignment seam between a query and a stored reference template.
pub trait SequenceAligner: Send + Sync {
    fn align(
        &self,
        query: &FeatureSequence,
        reference: &FeatureSequence,
    ) -> Result<Alignment, RecognitionError>;
}
