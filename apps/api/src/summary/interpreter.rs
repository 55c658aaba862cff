//! Reply interpreter — turns the model's free-text reply into a `SummaryResult`.
//!
//! Matching is deliberately loose: a line belongs to the first category whose
//! marker phrase it contains, and its value is everything after the first colon.
//! The model is only guided by the prompt, so exact line formats are not assumed.

use crate::summary::{Category, Interpretation, SummaryResult};

/// Interprets a model reply.
///
/// Rejects the reply outright if it is empty or mentions "error" in any case.
/// This also rejects legitimate summaries that talk about errors (e.g. a
/// restatement after an accounting error); callers see the same rejection.
pub fn interpret_reply(reply: &str) -> Interpretation {
    if reply.is_empty() || reply.to_lowercase().contains("error") {
        return Interpretation::rejected();
    }

    let mut values: [String; 5] = Default::default();

    for line in reply.split('\n') {
        let Some(index) = Category::ALL
            .iter()
            .position(|category| line.contains(category.marker()))
        else {
            continue;
        };

        // A marker line without a colon carries no value.
        if let Some((_, value)) = line.split_once(':') {
            values[index] = value.trim().to_string();
        }
    }

    for (value, category) in values.iter_mut().zip(Category::ALL) {
        if value.is_empty() {
            *value = category.placeholder();
        }
    }

    let [
        financial_performance,
        market_dynamics,
        expansion_plans,
        environmental_risks,
        regulatory_or_policy_changes,
    ] = values;

    Interpretation::Summary(SummaryResult {
        financial_performance,
        market_dynamics,
        expansion_plans,
        environmental_risks,
        regulatory_or_policy_changes,
    })
}
