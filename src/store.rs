use std::collections::HashMap;
use std::path::Path;

use crate::error::RecognitionError;
use crate::types::FeatureSequence;

/// Label-to-class-index mapping shared by the classifier and the template
/// store. Indices are dense, assigned in insertion order, and never reused.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    indices: HashMap<String, usize>,
    labels: Vec<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the initial mapping from a `commands.json` file: a JSON object
    /// of `label -> class index`, expected to be dense over `0..len`.
    pub fn from_commands_file(path: &Path) -> Result<Self, RecognitionError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| RecognitionError::io("read commands.json", e))?;
        let raw: HashMap<String, usize> = serde_json::from_str(&data)
            .map_err(|e| RecognitionError::json("parse commands.json", e))?;

        let mut labels: Vec<Option<String>> = vec![None; raw.len()];
        for (label, index) in &raw {
            if *index >= labels.len() {
                return Err(RecognitionError::invalid_input(format!(
                    "commands.json index {index} is out of range for {} commands",
                    raw.len()
                )));
            }
            if labels[*index].is_some() {
                return Err(RecognitionError::invalid_input(format!(
                    "commands.json assigns class index {index} twice"
                )));
            }
            labels[*index] = Some(label.clone());
        }
        let labels: Vec<String> = labels.into_iter().flatten().collect();

        Ok(Self {
            indices: raw,
            labels,
        })
    }

    /// Index for `label`, assigning the next dense index when it is new.
    pub fn assign(&mut self, label: &str) -> usize {
        if let Some(&index) = self.indices.get(label) {
            return index;
        }
        let index = self.labels.len();
        self.indices.insert(label.to_string(), index);
        self.labels.push(label.to_string());
        index
    }

    pub fn class_index(&self, label: &str) -> Option<usize> {
        self.indices.get(label).copied()
    }

    pub fn label_for(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Growable mapping from command label to its reference feature sequence.
///
/// Insertion order is remembered; the recognition policy's scan visits
/// templates in that order, which makes minimum-cost ties resolve to the
/// first-inserted label.
#[derive(Debug, Default)]
pub struct TemplateStore {
    vocabulary: Vocabulary,
    templates: HashMap<String, FeatureSequence>,
    order: Vec<String>,
}

impl TemplateStore {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            templates: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Bind or rebind `label -> sequence`. A label new to the vocabulary
    /// gets a fresh dense class index; rebinding replaces the stored
    /// template and leaves the index untouched.
    pub fn insert(&mut self, label: &str, sequence: FeatureSequence) -> usize {
        let index = self.vocabulary.assign(label);
        if self.templates.insert(label.to_string(), sequence).is_none() {
            self.order.push(label.to_string());
        }
        index
    }

    pub fn get(&self, label: &str) -> Option<&FeatureSequence> {
        self.templates.get(label)
    }

    /// Templates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureSequence)> {
        self.order
            .iter()
            .filter_map(|label| Some((label.as_str(), self.templates.get(label)?)))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }
}
