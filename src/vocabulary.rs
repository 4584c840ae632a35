use crate::error::{ConfigError, RunError};
use std::path::Path;

/// Ordered label list the classifier scores against. Index `i` of a
/// probability vector belongs to `labels[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    labels: Vec<String>,
}

impl Vocabulary {
    /// One label per line. Surrounding whitespace is trimmed but blank lines
    /// keep their slot so indices stay aligned with the model output.
    pub fn from_lines(text: &str) -> Result<Self, ConfigError> {
        let labels: Vec<String> = text.lines().map(|line| line.trim().to_string()).collect();

        if labels.is_empty() {
            return Err(ConfigError::EmptyVocabulary);
        }

        Ok(Self { labels })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::MissingLabels(path.to_path_buf())
            } else {
                ConfigError::ReadLabels {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        Self::from_lines(&text)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn label_at(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Top label and its score for one classifier output.
    pub fn top(&self, probabilities: &[f32]) -> Result<(&str, f32), RunError> {
        let length_error = || RunError::ProbabilityLength {
            expected: self.labels.len(),
            actual: probabilities.len(),
        };

        if probabilities.len() != self.labels.len() {
            return Err(length_error());
        }

        argmax(probabilities)
            .and_then(|(index, confidence)| Some((self.label_at(index)?, confidence)))
            .ok_or_else(length_error)
    }
}

/// Index and value of the largest entry. Ties go to the first occurrence.
pub fn argmax(values: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;

    for (index, &value) in values.iter().enumerate() {
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((index, value)),
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lines_trims_whitespace() {
        let vocabulary = Vocabulary::from_lines("  mouse \r\nchain\n\tlip rouge\n").unwrap();

        assert_eq!(vocabulary.len(), 3);
        assert_eq!(vocabulary.label_at(0), Some("mouse"));
        assert_eq!(vocabulary.label_at(1), Some("chain"));
        assert_eq!(vocabulary.label_at(2), Some("lip rouge"));
        assert_eq!(vocabulary.label_at(3), None);
    }

    #[test]
    fn test_blank_line_keeps_its_index() {
        let vocabulary = Vocabulary::from_lines("mouse\n\nchain\n").unwrap();

        assert_eq!(vocabulary.label_at(1), Some(""));
        assert_eq!(vocabulary.label_at(2), Some("chain"));
    }

    #[test]
    fn test_empty_vocabulary_is_rejected() {
        assert!(matches!(
            Vocabulary::from_lines(""),
            Err(ConfigError::EmptyVocabulary)
        ));
    }

    #[test]
    fn test_missing_labels_file() {
        let path = std::env::temp_dir().join("stable-label-dispatch-no-such-labels.txt");

        assert!(matches!(
            Vocabulary::load(&path),
            Err(ConfigError::MissingLabels(p)) if p == path
        ));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "stable-label-dispatch-labels-{}.txt",
            std::process::id()
        ));
        std::fs::write(&path, "mouse\nchain\n").unwrap();

        let vocabulary = Vocabulary::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(vocabulary.len(), 2);
        assert_eq!(vocabulary.label_at(1), Some("chain"));
    }

    #[test]
    fn test_argmax_ties_go_to_first() {
        assert_eq!(argmax(&[0.1, 0.7, 0.2, 0.7]), Some((1, 0.7)));
        assert_eq!(argmax(&[0.0, 0.0]), Some((0, 0.0)));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_argmax_does_not_need_normalized_scores() {
        assert_eq!(argmax(&[3.0, 12.5, 4.0]), Some((1, 12.5)));
    }

    #[test]
    fn test_top_returns_label_and_confidence() {
        let vocabulary = Vocabulary::from_lines("mouse\nchain\nkeyboard").unwrap();

        let (label, confidence) = vocabulary.top(&[0.2, 0.5, 0.3]).unwrap();

        assert_eq!(label, "chain");
        assert_eq!(confidence, 0.5);
    }

    #[test]
    fn test_top_rejects_wrong_length() {
        let vocabulary = Vocabulary::from_lines("mouse\nchain").unwrap();

        assert!(matches!(
            vocabulary.top(&[0.2, 0.5, 0.3]),
            Err(RunError::ProbabilityLength {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_top_rejects_empty_scores() {
        let vocabulary = Vocabulary::from_lines("mouse").unwrap();

        assert!(matches!(
            vocabulary.top(&[]),
            Err(RunError::ProbabilityLength {
                expected: 1,
                actual: 0
            })
        ));
    }
}
