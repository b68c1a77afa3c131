pub mod alignment;
pub mod config;
pub mod error;
pub mod features;
pub mod recognizer;
pub mod store;
pub mod types;

pub use config::RecognizerConfig;
pub use error::RecognitionError;
pub use recognizer::builder::RecognizerBuilder;
pub use recognizer::defaults::DtwAligner;
pub use recognizer::runtime::Recognizer;
pub use recognizer::traits::{Classifier, SequenceAligner, SpectralTransform};
pub use store::{TemplateStore, Vocabulary};
pub use types::{Alignment, AlignmentPath, FeatureMatrix, FeatureSequence, Mode, Prediction};
