use std::path::Path;

use crate::config::RecognizerConfig;
use crate::error::RecognitionError;
use crate::features::frame;
use crate::recognizer::defaults::DtwAligner;
use crate::recognizer::runtime::{Recognizer, RecognizerParts};
use crate::recognizer::traits::{Classifier, SequenceAligner, SpectralTransform};
use crate::store::{TemplateStore, Vocabulary};

/// Assembles a [`Recognizer`] from its collaborators and the startup
/// resources: the `commands.json` vocabulary and the canonical reference
/// recordings, each framed and stored before first use.
pub struct RecognizerBuilder {
    config: RecognizerConfig,
    classifier: Option<Box<dyn Classifier>>,
    spectral_transform: Option<Box<dyn SpectralTransform>>,
    sequence_aligner: Option<Box<dyn SequenceAligner>>,
    reference_sounds: Vec<(String, Vec<f32>)>,
}

impl RecognizerBuilder {
    pub fn new(config: RecognizerConfig) -> Self {
        Self {
            config,
            classifier: None,
            spectral_transform: None,
            sequence_aligner: None,
            reference_sounds: Vec::new(),
        }
    }

    pub fn with_classifier(mut self, classifier: Box<dyn Classifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn with_spectral_transform(
        mut self,
        spectral_transform: Box<dyn SpectralTransform>,
    ) -> Self {
        self.spectral_transform = Some(spectral_transform);
        self
    }

    pub fn with_sequence_aligner(mut self, sequence_aligner: Box<dyn SequenceAligner>) -> Self {
        self.sequence_aligner = Some(sequence_aligner);
        self
    }

    /// Register a canonical reference recording for `label`. Repeatable;
    /// the last recording supplied for a label wins.
    pub fn with_reference_sound(mut self, label: impl Into<String>, samples: Vec<f32>) -> Self {
        self.reference_sounds.push((label.into(), samples));
        self
    }

    pub fn build(self) -> Result<Recognizer, RecognitionError> {
        let classifier = self
            .classifier
            .ok_or_else(|| RecognitionError::invalid_input("a classifier is required"))?;
        let spectral_transform = self.spectral_transform.ok_or_else(|| {
            RecognitionError::invalid_input("a spectral transform is required")
        })?;
        let sequence_aligner = self
            .sequence_aligner
            .unwrap_or_else(|| Box::new(DtwAligner));

        let vocabulary = if self.config.commands_path.is_empty() {
            Vocabulary::new()
        } else {
            Vocabulary::from_commands_file(Path::new(&self.config.commands_path))?
        };

        let target_frames = self.config.target_frames();
        let mut store = TemplateStore::new(vocabulary);
        for (label, samples) in &self.reference_sounds {
            let matrix = spectral_transform.coefficients(samples)?;
            let sequence = frame(&matrix, target_frames, self.config.standardize)?;
            store.insert(label, sequence);
        }
        tracing::debug!(
            commands = store.vocabulary().len(),
            templates = store.len(),
            "recognizer assembled"
        );

        Ok(Recognizer::from_parts(RecognizerParts {
            config: self.config,
            store,
            classifier,
            spectral_transform,
            sequence_aligner,
        }))
    }
}
