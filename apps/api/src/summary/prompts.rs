// LLM prompt constants for earnings-call summarization.
// The output format requested here is what `interpreter` scans for.

/// Summary prompt template. Replace `{transcript_text}` before sending.
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Please summarize the earnings call transcript below into the following categories:
1. Financial Performance
2. Market Dynamics
3. Expansion Plans
4. Environmental Risks
5. Regulatory or Policy Changes

Transcript: {transcript_text}

Format your response like this:
- Financial Performance: [summary]
- Market Dynamics: [summary]
- Expansion Plans: [summary]
- Environmental Risks: [summary]
- Regulatory or Policy Changes: [summary]
"#;

/// Renders the summary prompt with the transcript embedded verbatim.
pub fn build_summary_prompt(transcript_text: &str) -> String {
    SUMMARY_PROMPT_TEMPLATE.replace("{transcript_text}", transcript_text)
}
