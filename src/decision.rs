//! Decision rule
//!
//! Maps the network's score vector to a category label via argmax with
//! first-occurrence tie-break, matching the decision procedure used at
//! evaluation time.

use crate::error::{ClassifierError, Result};

/// Index of the highest score; the lowest index wins ties. `None` only for
/// an empty slice.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &score) in scores.iter().enumerate() {
        match best {
            None => best = Some((i, score)),
            Some((_, top)) if score > top => best = Some((i, score)),
            _ => {}
        }
    }
    best.map(|(i, _)| i)
}

/// Decode a score vector to its label.
pub fn decide<'a>(scores: &[f32], vocabulary: &[&'a str]) -> Result<&'a str> {
    if scores.len() != vocabulary.len() || scores.is_empty() {
        return Err(ClassifierError::VocabularyMismatch {
            scores: scores.len(),
            labels: vocabulary.len(),
        });
    }

    // Non-empty slice, so argmax always yields an index
    let index = argmax(scores).unwrap_or(0);
    Ok(vocabulary[index])
}
