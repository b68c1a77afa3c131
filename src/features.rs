use ndarray::{s, Array2};

use crate::error::RecognitionError;
use crate::types::{FeatureMatrix, FeatureSequence};

/// Floor substituted for a per-coefficient standard deviation below it.
const STD_EPSILON: f32 = 1e-6;

/// Pad or truncate a raw `(C, T)` feature matrix to exactly `target_frames`
/// columns, optionally standardizing each coefficient row afterwards.
///
/// Truncation keeps the first `target_frames` columns; padding appends
/// zero-valued columns on the right. Pure function of its inputs.
pub fn frame(
    matrix: &FeatureMatrix,
    target_frames: usize,
    standardize: bool,
) -> Result<FeatureSequence, RecognitionError> {
    if matrix.nrows() == 0 || matrix.ncols() == 0 {
        return Err(RecognitionError::degenerate("framing features"));
    }
    if target_frames == 0 {
        return Err(RecognitionError::invalid_input(
            "target frame count must be at least 1",
        ));
    }

    let coefficients = matrix.nrows();
    let raw_frames = matrix.ncols();

    let mut framed = Array2::<f32>::zeros((coefficients, target_frames));
    let kept = raw_frames.min(target_frames);
    framed
        .slice_mut(s![.., ..kept])
        .assign(&matrix.slice(s![.., ..kept]));

    if standardize {
        standardize_rows(&mut framed);
    }

    FeatureSequence::new(framed)
}

fn standardize_rows(matrix: &mut Array2<f32>) {
    let frames = matrix.ncols() as f32;
    for mut row in matrix.rows_mut() {
        let mean = row.sum() / frames;
        let var = row.iter().map(|v| (v - mean) * (v - mean)).sum::<f32>() / frames;
        let std = var.sqrt();
        let std_safe = if std < STD_EPSILON { STD_EPSILON } else { std };
        row.mapv_inplace(|v| (v - mean) / std_safe);
    }
}
