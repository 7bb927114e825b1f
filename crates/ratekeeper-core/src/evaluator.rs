//! Conjunctive evaluation of the configured rating conditions.

use serde::Serialize;

use crate::conditions::RatingCondition;
use crate::ledger::UsageLedger;

/// Outcome of one condition within an evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    pub condition: &'static str,
    pub satisfied: bool,
}

/// Result of evaluating the full condition set against a ledger snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub satisfied: bool,
    pub verdicts: Vec<Verdict>,
}

impl Evaluation {
    /// Names of the conditions that failed, in evaluation order.
    pub fn unsatisfied(&self) -> Vec<&'static str> {
        self.verdicts
            .iter()
            .filter(|verdict| !verdict.satisfied)
            .map(|verdict| verdict.condition)
            .collect()
    }
}

/// Runs every condition against a ledger snapshot and ANDs the results.
pub struct ConditionEvaluator {
    conditions: Vec<Box<dyn RatingCondition>>,
}

impl ConditionEvaluator {
    pub fn new(conditions: Vec<Box<dyn RatingCondition>>) -> Self {
        Self { conditions }
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Evaluate all conditions. Every condition runs even after a failure
    /// so the verdict list stays complete for diagnostics; an empty set is
    /// vacuously satisfied.
    pub fn evaluate(&self, ledger: &UsageLedger) -> Evaluation {
        let verdicts: Vec<Verdict> = self
            .conditions
            .iter()
            .map(|condition| Verdict {
                condition: condition.name(),
                satisfied: condition.is_satisfied(ledger),
            })
            .collect();

        Evaluation {
            satisfied: verdicts.iter().all(|verdict| verdict.satisfied),
            verdicts,
        }
    }
}
