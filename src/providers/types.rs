// 3rd party crates
use serde::{Deserialize, Serialize};

/// Social engagement metrics for a tracked asset.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SocialMetrics {
    pub galaxy_score: f64,
    pub alt_rank: u32,
    pub social_volume_24h: u64,
    pub interactions_24h: u64,
    pub sentiment: f64,
    pub social_dominance: f64,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub volume_24h: Option<f64>,
    #[serde(default)]
    pub percent_change_24h: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Price outlook attached to an analysis.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AiPrediction {
    pub price_target_24h: f64,
    pub price_target_7d: f64,
    pub confidence_score: f64,
    pub risk_level: RiskLevel,
    pub reasoning: String,
    pub position_size_recommendation: f64,
}

/// Full analysis for one symbol as returned by the worker.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PredictionData {
    pub symbol: String,
    pub current_price: f64,
    pub social_metrics: SocialMetrics,
    pub ai_prediction: AiPrediction,
    pub timestamp: String,
}

/// One entry of a search response.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CryptoSearchResult {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub galaxy_score: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfidenceTrend {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum OverallTrend {
    Bullish,
    Bearish,
    Neutral,
}

/// Per-horizon prediction inside a multi-timeframe analysis.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TimeframePrediction {
    pub timeframe: String,
    pub price_target: f64,
    pub confidence_score: f64,
    pub reasoning: String,
    pub risk_level: RiskLevel,
    pub volume_expectation: f64,
}

/// Risk assessment across horizons.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RiskTimeline {
    pub short_term: RiskLevel,
    pub medium_term: RiskLevel,
    pub long_term: RiskLevel,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MultiTimeframe {
    pub predictions: Vec<TimeframePrediction>,
    pub confidence_trend: ConfidenceTrend,
    pub overall_trend: OverallTrend,
    pub best_entry_timeframe: String,
    pub risk_timeline: RiskTimeline,
}

/// Analysis extended with per-timeframe predictions.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MultiTimeframeAnalysis {
    #[serde(flatten)]
    pub base: PredictionData,
    pub multi_timeframe: MultiTimeframe,
}
