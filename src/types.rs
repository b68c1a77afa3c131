use ndarray::{Array2, ArrayView1};

use crate::error::RecognitionError;

/// Raw spectral features as produced by the MFCC front end: one row per
/// coefficient, one column per frame, shape `(C, T)`.
pub type FeatureMatrix = Array2<f32>;

/// A framed feature sequence with a fixed coefficient count per frame.
/// Stored coefficient-major, shape `(C, F)`; frames are columns.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSequence {
    data: Array2<f32>,
}

impl FeatureSequence {
    pub fn new(data: Array2<f32>) -> Result<Self, RecognitionError> {
        if data.nrows() == 0 || data.ncols() == 0 {
            return Err(RecognitionError::degenerate("building feature sequence"));
        }
        Ok(Self { data })
    }

    pub fn coefficient_count(&self) -> usize {
        self.data.nrows()
    }

    /// Frame count.
    pub fn len(&self) -> usize {
        self.data.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.data.ncols() == 0
    }

    pub fn frame(&self, index: usize) -> ArrayView1<'_, f32> {
        self.data.column(index)
    }

    pub fn matrix(&self) -> &Array2<f32> {
        &self.data
    }
}

/// Ordered `(i, j)` index pairs from `(0, 0)` to `(n-1, m-1)`, each step
/// advancing one or both coordinates by exactly one.
pub type AlignmentPath = Vec<(usize, usize)>;

#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// Cumulative alignment cost divided by `n + m`, comparable across
    /// sequences of different lengths.
    pub cost: f32,
    pub path: AlignmentPath,
}

/// Outcome of one recognition attempt. Rejection of an unrecognized sound
/// is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prediction {
    Command(String),
    Unknown,
}

/// Recognition strategy currently in force. The transition from
/// `Classifier` to `TemplateFallback` is one-directional per instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Classifier,
    TemplateFallback,
}
