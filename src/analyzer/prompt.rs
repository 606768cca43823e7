//! Prompt templates for the recommendation proxy.

use serde_json::{Map, Value};

use super::AnalysisType;

/// System instruction sent with every completion request.
pub const SYSTEM_INSTRUCTION: &str = "You are an energy efficiency expert specializing in \
     data analysis and providing actionable recommendations.";

/// Builds the prompt for the given analysis type, embedding a pretty
/// rendering of the payload. Unrecognized types were already folded into
/// `General` by the caller.
pub fn build_prompt(
    analysis_type: AnalysisType,
    data: &Map<String, Value>,
) -> Result<String, serde_json::Error> {
    let data_description = serde_json::to_string_pretty(data)?;

    Ok(match analysis_type {
        AnalysisType::General => format!(
            "As an energy analysis expert, analyze this energy consumption data and provide:\n\
             1. Key insights about energy usage patterns\n\
             2. Specific recommendations for energy savings\n\
             3. Potential cost-saving opportunities\n\
             4. Environmental impact insights\n\
             \n\
             Data: {data_description}\n\
             \n\
             Provide recommendations in a structured format with clear, actionable items."
        ),
        AnalysisType::Savings => format!(
            "Focus on cost-saving opportunities in this energy data:\n\
             1. Identify peak usage periods\n\
             2. Calculate potential savings\n\
             3. Suggest specific energy-saving measures\n\
             4. Prioritize recommendations by ROI\n\
             \n\
             Data: {data_description}"
        ),
        AnalysisType::Patterns => format!(
            "Analyze energy consumption patterns in this data:\n\
             1. Identify usage trends\n\
             2. Highlight anomalies\n\
             3. Compare with industry standards\n\
             4. Suggest optimization strategies\n\
             \n\
             Data: {data_description}"
        ),
    })
}
