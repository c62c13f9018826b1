//! The precondition trait and its assertion helper

use async_trait::async_trait;

use crate::{Description, MatcherError};

/// Result of evaluating a precondition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// Whether the precondition holds
    pub matched: bool,
    /// Fully-qualified names of the tables the evaluation matched,
    /// in listing order
    pub tables: Vec<String>,
    /// Tables actually dropped, in drop order
    pub dropped: Vec<String>,
}

impl Evaluation {
    pub(crate) fn new(matched: bool, tables: Vec<String>) -> Self {
        Self {
            matched,
            tables,
            dropped: Vec::new(),
        }
    }
}

/// A check (and possibly an action) run against a database before a test
#[async_trait]
pub trait Precondition: Send + Sync {
    /// Run the precondition on a fresh connection
    async fn evaluate(&self) -> Result<Evaluation, MatcherError>;

    /// Describe what the precondition expects
    fn describe_to(&self, description: &mut Description);

    /// Describe why `evaluation` did not satisfy the precondition, or
    /// anything unusual it ran into
    fn describe_mismatch(&self, evaluation: &Evaluation, description: &mut Description);
}

/// Evaluate `precondition`, failing with an `Expected: ... but: ...`
/// message when it does not hold.
pub async fn assert_precondition<P>(precondition: &P) -> Result<Evaluation, MatcherError>
where
    P: Precondition + ?Sized,
{
    let evaluation = precondition.evaluate().await?;
    if evaluation.matched {
        return Ok(evaluation);
    }

    let mut expected = Description::new();
    precondition.describe_to(&mut expected);
    let mut actual = Description::new();
    precondition.describe_mismatch(&evaluation, &mut actual);

    Err(MatcherError::AssertionFailed(format!(
        "Expected: {}\n     but: {}",
        expected, actual
    )))
}
