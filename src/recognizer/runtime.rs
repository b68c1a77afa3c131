use crate::config::RecognizerConfig;
use crate::error::RecognitionError;
use crate::features::frame;
use crate::recognizer::traits::{Classifier, SequenceAligner, SpectralTransform};
use crate::store::{TemplateStore, Vocabulary};
use crate::types::{FeatureSequence, Mode, Prediction};

/// Spoken-command recognizer.
///
/// Starts in classifier mode and delegates every prediction to the
/// pretrained classifier. The first call to [`Recognizer::add_new_sound`]
/// switches it permanently to template-fallback mode, where predictions are
/// nearest-template searches over the store instead; the classifier was
/// never trained on grown labels, so its scores stop being meaningful for
/// the whole vocabulary.
pub struct Recognizer {
    config: RecognizerConfig,
    store: TemplateStore,
    mode: Mode,
    classifier: Box<dyn Classifier>,
    spectral_transform: Box<dyn SpectralTransform>,
    sequence_aligner: Box<dyn SequenceAligner>,
}

pub(crate) struct RecognizerParts {
    pub config: RecognizerConfig,
    pub store: TemplateStore,
    pub classifier: Box<dyn Classifier>,
    pub spectral_transform: Box<dyn SpectralTransform>,
    pub sequence_aligner: Box<dyn SequenceAligner>,
}

impl Recognizer {
    pub(crate) fn from_parts(parts: RecognizerParts) -> Self {
        Self {
            config: parts.config,
            store: parts.store,
            mode: Mode::Classifier,
            classifier: parts.classifier,
            spectral_transform: parts.spectral_transform,
            sequence_aligner: parts.sequence_aligner,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        self.store.vocabulary()
    }

    pub fn template_count(&self) -> usize {
        self.store.len()
    }

    /// Recognize one utterance. One-shot: collaborator failures propagate
    /// without retry, and an unrecognized sound in fallback mode is the
    /// normal [`Prediction::Unknown`] outcome, not an error.
    pub fn predict(&self, samples: &[f32]) -> Result<Prediction, RecognitionError> {
        let features = self.extract_features(samples)?;
        match self.mode {
            Mode::Classifier => self.classifier_predict(&features),
            Mode::TemplateFallback => self.template_predict(&features),
        }
    }

    /// Grow the vocabulary with a new command derived from `samples` and
    /// switch irreversibly into template-fallback mode. Re-supplying an
    /// existing label replaces its reference template in place.
    pub fn add_new_sound(&mut self, label: &str, samples: &[f32]) -> Result<(), RecognitionError> {
        let features = self.extract_features(samples)?;
        let class_index = self.store.insert(label, features);
        if self.mode != Mode::TemplateFallback {
            tracing::info!(label, class_index, "vocabulary grown; template fallback engaged");
            self.mode = Mode::TemplateFallback;
        } else {
            tracing::debug!(label, class_index, "reference template stored");
        }
        Ok(())
    }

    fn extract_features(&self, samples: &[f32]) -> Result<FeatureSequence, RecognitionError> {
        let matrix = self.spectral_transform.coefficients(samples)?;
        frame(&matrix, self.config.target_frames(), self.config.standardize)
    }

    fn classifier_predict(
        &self,
        features: &FeatureSequence,
    ) -> Result<Prediction, RecognitionError> {
        let scores = self.classifier.infer(features)?;
        let best_index = argmax(&scores).ok_or_else(|| {
            RecognitionError::classifier("selecting top class", "empty score vector")
        })?;
        let label = self.store.vocabulary().label_for(best_index).ok_or_else(|| {
            RecognitionError::classifier(
                "mapping class index to label",
                format!("no vocabulary entry for class index {best_index}"),
            )
        })?;
        Ok(Prediction::Command(label.to_string()))
    }

    fn template_predict(&self, features: &FeatureSequence) -> Result<Prediction, RecognitionError> {
        let mut best: Option<(&str, f32)> = None;
        for (label, reference) in self.store.iter() {
            let alignment = self.sequence_aligner.align(features, reference)?;
            // strict less-than keeps the first-encountered label on ties
            if best.map_or(true, |(_, cost)| alignment.cost < cost) {
                best = Some((label, alignment.cost));
            }
        }

        let Some((label, cost)) = best else {
            tracing::debug!("no reference templates stored");
            return Ok(Prediction::Unknown);
        };
        tracing::debug!(cost, label, "nearest template");

        // cost == threshold is accepted; only strictly above is rejected
        if cost > self.config.rejection_threshold {
            Ok(Prediction::Unknown)
        } else {
            Ok(Prediction::Command(label.to_string()))
        }
    }
}

/// Index of the highest score; the first one wins on exact ties.
fn argmax(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, &score) in scores.iter().enumerate() {
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((index, score)),
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_picks_the_highest_score() {
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), Some(1));
        assert_eq!(argmax(&[-1.0, -0.5, -2.0]), Some(1));
    }

    #[test]
    fn argmax_breaks_ties_toward_the_first_index() {
        assert_eq!(argmax(&[0.5, 0.5, 0.5]), Some(0));
    }

    #[test]
    fn argmax_of_empty_scores_is_none() {
        assert_eq!(argmax(&[]), None);
    }
}
