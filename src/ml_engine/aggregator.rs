//! Batch consensus across per-record model outputs
//!
//! For each model:
//! 1. Drop sentinels and non-finite numbers
//! 2. Nothing left → `Insufficient Data`
//! 3. All survivors numeric → arithmetic mean
//! 4. Otherwise → most frequent survivor as a label, ties going to the first seen

use crate::processing::mean_of;
use crate::types::{BatchHealth, ConsensusMap, ConsensusValue, ModelOutput, RecordPredictions};

/// Aggregates per-record predictions into one value per model.
pub struct BatchAggregator;

impl BatchAggregator {
    /// Build the consensus map for `models`, in the order given.
    ///
    /// Every model name appears in the result even when no record produced
    /// a usable value for it.
    pub fn aggregate<'a, I>(
        models: I,
        predictions: &[RecordPredictions],
        overall_health: BatchHealth,
    ) -> ConsensusMap
    where
        I: IntoIterator<Item = &'a str>,
    {
        let values = models
            .into_iter()
            .map(|model| {
                let consensus = Self::consensus(predictions.iter().filter_map(|p| p.get(model)));
                tracing::debug!(model, consensus = ?consensus, "Model consensus");
                (model.to_string(), consensus)
            })
            .collect();
        ConsensusMap::new(values, overall_health)
    }

    /// Consensus of one model's outputs across the batch.
    pub fn consensus<'a, I>(outputs: I) -> ConsensusValue
    where
        I: IntoIterator<Item = &'a ModelOutput>,
    {
        let survivors: Vec<&ModelOutput> = outputs.into_iter().filter(|o| o.is_usable()).collect();
        if survivors.is_empty() {
            return ConsensusValue::InsufficientData;
        }

        let numbers: Option<Vec<f64>> = survivors
            .iter()
            .map(|o| match o {
                ModelOutput::Number(v) => Some(*v),
                _ => None,
            })
            .collect();

        match numbers {
            Some(values) => {
                mean_of(&values).map_or(ConsensusValue::InsufficientData, ConsensusValue::Number)
            }
            None => Self::majority_vote(&survivors),
        }
    }

    /// Most frequent output, always emitted as a label; on equal counts the
    /// earliest first appearance wins.
    fn majority_vote(outputs: &[&ModelOutput]) -> ConsensusValue {
        let mut tally: Vec<(&ModelOutput, usize)> = Vec::new();
        for output in outputs {
            match tally.iter_mut().find(|(seen, _)| seen == output) {
                Some((_, count)) => *count += 1,
                None => tally.push((*output, 1)),
            }
        }

        let mut winner: Option<(&ModelOutput, usize)> = None;
        for (output, count) in tally {
            if winner.map_or(true, |(_, best)| count > best) {
                winner = Some((output, count));
            }
        }

        match winner {
            Some((ModelOutput::Number(v), _)) => ConsensusValue::Label(number_label(*v)),
            Some((ModelOutput::Label(label), _)) => ConsensusValue::Label(label.clone()),
            _ => ConsensusValue::InsufficientData,
        }
    }
}

/// Text of a numeric vote winner. Whole numbers keep one decimal place so a
/// numeric `1.0` reads as `"1.0"`, not `"1"`.
fn number_label(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
