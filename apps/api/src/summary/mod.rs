// Earnings-call summarization: prompt building, the single model call, and
// interpretation of the model's free-text reply.

pub mod handlers;
pub mod interpreter;
pub mod prompts;

use serde::Serialize;

use crate::llm_client::{LanguageModel, LlmError};
use crate::summary::interpreter::interpret_reply;
use crate::summary::prompts::build_summary_prompt;

/// The five summary categories, in the priority order used when scanning a reply line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    FinancialPerformance,
    MarketDynamics,
    ExpansionPlans,
    EnvironmentalRisks,
    RegulatoryOrPolicyChanges,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::FinancialPerformance,
        Category::MarketDynamics,
        Category::ExpansionPlans,
        Category::EnvironmentalRisks,
        Category::RegulatoryOrPolicyChanges,
    ];

    /// Display name; also the marker phrase searched for in reply lines.
    pub fn marker(self) -> &'static str {
        match self {
            Category::FinancialPerformance => "Financial Performance",
            Category::MarketDynamics => "Market Dynamics",
            Category::ExpansionPlans => "Expansion Plans",
            Category::EnvironmentalRisks => "Environmental Risks",
            Category::RegulatoryOrPolicyChanges => "Regulatory or Policy Changes",
        }
    }

    /// JSON field name.
    pub fn key(self) -> &'static str {
        match self {
            Category::FinancialPerformance => "financial_performance",
            Category::MarketDynamics => "market_dynamics",
            Category::ExpansionPlans => "expansion_plans",
            Category::EnvironmentalRisks => "environmental_risks",
            Category::RegulatoryOrPolicyChanges => "regulatory_or_policy_changes",
        }
    }

    /// Fallback text used when the reply yields nothing for this category.
    pub fn placeholder(self) -> String {
        format!("No information available for {}.", self.key().replace('_', " "))
    }
}

/// Five-category summary. Every field is always populated, with extracted
/// text or the category placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryResult {
    pub financial_performance: String,
    pub market_dynamics: String,
    pub expansion_plans: String,
    pub environmental_risks: String,
    pub regulatory_or_policy_changes: String,
}

impl SummaryResult {
    pub fn get(&self, category: Category) -> &str {
        match category {
            Category::FinancialPerformance => &self.financial_performance,
            Category::MarketDynamics => &self.market_dynamics,
            Category::ExpansionPlans => &self.expansion_plans,
            Category::EnvironmentalRisks => &self.environmental_risks,
            Category::RegulatoryOrPolicyChanges => &self.regulatory_or_policy_changes,
        }
    }
}

/// Message carried by a rejected reply.
pub const INVALID_SUMMARY_MESSAGE: &str = "Failed to generate valid summary from the transcript.";

/// Result of interpreting a model reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Interpretation {
    Summary(SummaryResult),
    /// Empty reply, or one mentioning "error". Serializes as `{"error": ...}`.
    Rejected { error: String },
}

impl Interpretation {
    pub fn rejected() -> Self {
        Interpretation::Rejected {
            error: INVALID_SUMMARY_MESSAGE.to_string(),
        }
    }
}

/// Builds the prompt, makes one model call, and interprets the trimmed reply.
pub async fn summarize_transcript(
    llm: &dyn LanguageModel,
    transcript_text: &str,
) -> Result<Interpretation, LlmError> {
    let prompt = build_summary_prompt(transcript_text);
    let reply = llm.generate(&prompt).await?;
    Ok(interpret_reply(reply.trim()))
}
