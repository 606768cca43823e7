//! Energy recommendation proxy.
//!
//! Turns an arbitrary energy-usage JSON payload into a human-readable
//! recommendation block via the completion provider, falling back to
//! canned recommendations when the provider is unconfigured or fails.

pub mod mock;
pub mod prompt;
pub mod provider;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::AppConfig;
use crate::error::ApiError;
use provider::{CompletionProvider, OpenAiClient};

/// The fixed set of supported analysis types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisType {
    General,
    Savings,
    Patterns,
}

impl AnalysisType {
    pub const ALL: [AnalysisType; 3] = [
        AnalysisType::General,
        AnalysisType::Savings,
        AnalysisType::Patterns,
    ];

    /// Maps a raw selector onto a type, folding unrecognized values into
    /// `General`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "savings" => AnalysisType::Savings,
            "patterns" => AnalysisType::Patterns,
            _ => AnalysisType::General,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AnalysisType::General => "general",
            AnalysisType::Savings => "savings",
            AnalysisType::Patterns => "patterns",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AnalysisType::General => "Overall energy usage analysis and recommendations",
            AnalysisType::Savings => "Focus on cost-saving opportunities",
            AnalysisType::Patterns => "Detailed analysis of usage patterns and anomalies",
        }
    }
}

/// Catalog entry for `GET /analysis-types`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisTypeDescriptor {
    pub name: &'static str,
    pub description: &'static str,
}

/// The fixed catalog, independent of provider availability.
pub static ANALYSIS_TYPE_CATALOG: Lazy<Vec<AnalysisTypeDescriptor>> = Lazy::new(|| {
    AnalysisType::ALL
        .iter()
        .map(|analysis_type| AnalysisTypeDescriptor {
            name: analysis_type.name(),
            description: analysis_type.description(),
        })
        .collect()
});

/// One analysis request: an arbitrary JSON object plus a type selector.
#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub data: Map<String, Value>,
    #[serde(default = "default_analysis_type")]
    pub analysis_type: String,
}

fn default_analysis_type() -> String {
    "general".to_string()
}

/// Whether recommendations come from the live provider or the canned
/// fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerMode {
    Live,
    Mock,
}

#[derive(Debug, Serialize)]
pub struct DataSummary {
    pub fields_analyzed: Vec<String>,
}

/// Response payload for `POST /analyze`.
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub timestamp: DateTime<Utc>,
    pub analysis_type: String,
    pub recommendations: String,
    pub data_summary: DataSummary,
    pub mode: AnalyzerMode,
}

/// Stateless facade over the completion provider.
pub struct EnergyAnalyzer {
    provider: Option<Box<dyn CompletionProvider>>,
}

impl EnergyAnalyzer {
    /// Builds the analyzer from configuration; without a provider
    /// credential it runs permanently in mock mode.
    pub fn from_config(config: &AppConfig) -> Self {
        let provider = match &config.openai_api_key {
            Some(api_key) => match OpenAiClient::new(api_key.clone()) {
                Ok(client) => Some(Box::new(client) as Box<dyn CompletionProvider>),
                Err(e) => {
                    tracing::warn!(?e, "failed to build completion client; running in mock mode");
                    None
                }
            },
            None => {
                tracing::info!("OPENAI_API_KEY not set; analyzer running in mock mode");
                None
            }
        };

        Self { provider }
    }

    pub fn with_provider(provider: Box<dyn CompletionProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    pub fn mode(&self) -> AnalyzerMode {
        if self.provider.is_some() {
            AnalyzerMode::Live
        } else {
            AnalyzerMode::Mock
        }
    }

    /// Analyzes the payload. Empty data is rejected before any prompt is
    /// built; provider failures degrade to the canned block instead of
    /// failing the request.
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse, ApiError> {
        if request.data.is_empty() {
            return Err(ApiError::EmptyPayload);
        }

        let analysis_type = AnalysisType::parse(&request.analysis_type);
        let user_prompt = prompt::build_prompt(analysis_type, &request.data)
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        let (recommendations, mode) = match &self.provider {
            Some(provider) => {
                match provider.complete(prompt::SYSTEM_INSTRUCTION, &user_prompt).await {
                    Ok(text) => (text, AnalyzerMode::Live),
                    Err(e) => {
                        tracing::warn!(?e, "completion provider failed; using canned fallback");
                        (
                            mock::recommendations_for(analysis_type).to_string(),
                            AnalyzerMode::Mock,
                        )
                    }
                }
            }
            None => (
                mock::recommendations_for(analysis_type).to_string(),
                AnalyzerMode::Mock,
            ),
        };

        Ok(AnalysisResponse {
            timestamp: Utc::now(),
            analysis_type: request.analysis_type,
            recommendations,
            data_summary: DataSummary {
                fields_analyzed: request.data.keys().cloned().collect(),
            },
            mode,
        })
    }
}

impl Default for EnergyAnalyzer {
    /// A provider-less analyzer, i.e. permanent mock mode.
    fn default() -> Self {
        Self { provider: None }
    }
}

#[cfg(test)]
mod tests {
    use super::provider::ProviderError;
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct FixedProvider(&'static str);

    #[async_trait]
    impl CompletionProvider for FixedProvider {
        async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, ProviderError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl CompletionProvider for FailingProvider {
        async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, ProviderError> {
            Err(ProviderError::EmptyCompletion)
        }
    }

    fn request(analysis_type: &str) -> AnalysisRequest {
        let mut data = Map::new();
        data.insert("daily_kwh".to_string(), json!([10.2, 11.4]));
        data.insert("tariff".to_string(), json!("residential"));
        AnalysisRequest {
            data,
            analysis_type: analysis_type.to_string(),
        }
    }

    #[tokio::test]
    async fn empty_data_is_rejected_before_any_prompt() {
        let analyzer = EnergyAnalyzer::default();
        let result = analyzer
            .analyze(AnalysisRequest {
                data: Map::new(),
                analysis_type: "general".to_string(),
            })
            .await;
        assert!(matches!(result, Err(ApiError::EmptyPayload)));
    }

    #[tokio::test]
    async fn providerless_analyzer_answers_in_mock_mode() {
        let analyzer = EnergyAnalyzer::default();
        assert_eq!(analyzer.mode(), AnalyzerMode::Mock);

        for analysis_type in ["general", "savings", "patterns"] {
            let response = analyzer.analyze(request(analysis_type)).await.unwrap();
            assert_eq!(response.mode, AnalyzerMode::Mock);
            assert_eq!(response.analysis_type, analysis_type);
            assert!(!response.recommendations.is_empty());
        }
    }

    #[tokio::test]
    async fn provider_failure_degrades_to_mock() {
        let analyzer = EnergyAnalyzer::with_provider(Box::new(FailingProvider));
        assert_eq!(analyzer.mode(), AnalyzerMode::Live);

        let response = analyzer.analyze(request("savings")).await.unwrap();
        assert_eq!(response.mode, AnalyzerMode::Mock);
        assert!(!response.recommendations.is_empty());
    }

    #[tokio::test]
    async fn live_provider_text_passes_through() {
        let analyzer = EnergyAnalyzer::with_provider(Box::new(FixedProvider("turn it off")));
        let response = analyzer.analyze(request("general")).await.unwrap();
        assert_eq!(response.mode, AnalyzerMode::Live);
        assert_eq!(response.recommendations, "turn it off");
        assert_eq!(
            response.data_summary.fields_analyzed,
            vec!["daily_kwh".to_string(), "tariff".to_string()]
        );
    }

    #[tokio::test]
    async fn unknown_type_is_echoed_but_analyzed_as_general() {
        let analyzer = EnergyAnalyzer::default();
        let response = analyzer.analyze(request("forecast")).await.unwrap();
        assert_eq!(response.analysis_type, "forecast");
        assert_eq!(
            response.recommendations,
            mock::recommendations_for(AnalysisType::General)
        );
    }

    #[test]
    fn catalog_lists_exactly_the_supported_types() {
        let names: Vec<&str> = ANALYSIS_TYPE_CATALOG.iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["general", "savings", "patterns"]);
    }
}
