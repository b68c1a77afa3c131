use crate::alignment::distance::cosine_distance;
use crate::alignment::dtw::dtw;
use crate::error::RecognitionError;
use crate::recognizer::traits::SequenceAligner;
use crate::types::{Alignment, FeatureSequence};

/// Default aligner: dynamic time warping under cosine frame distance.
pub struct DtwAligner;

impl SequenceAligner for DtwAligner {
    fn align(
        &self,
        query: &FeatureSequence,
        reference: &FeatureSequence,
    ) -> Result<Alignment, RecognitionError> {
        dtw(query, reference, cosine_distance)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn dtw_aligner_matches_the_dtw_function() {
        let x = FeatureSequence::new(array![[1.0f32, 0.0], [0.0, 1.0]]).unwrap();
        let y = FeatureSequence::new(array![[0.0f32, 1.0], [1.0, 0.0]]).unwrap();
        let via_trait = DtwAligner.align(&x, &y).unwrap();
        let direct = dtw(&x, &y, cosine_distance).unwrap();
        assert_eq!(via_trait.cost.to_bits(), direct.cost.to_bits());
        assert_eq!(via_trait.path, direct.path);
    }

    #[test]
    fn dtw_aligner_propagates_dimension_mismatch() {
        let x = FeatureSequence::new(array![[1.0f32], [2.0]]).unwrap();
        let y = FeatureSequence::new(array![[1.0f32]]).unwrap();
        assert!(matches!(
            DtwAligner.align(&x, &y),
            Err(RecognitionError::DimensionMismatch { .. })
        ));
    }
}
