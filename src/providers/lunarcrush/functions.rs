// 3rd party crates
use futures::{stream::FuturesUnordered, StreamExt};
use reqwest::Method;
use serde_json::json;
use tracing::{debug, error, info};

// Project imports
use crate::providers::types::{CryptoSearchResult, MultiTimeframeAnalysis, PredictionData};
use crate::utility::throttle::types::RequestOptions;

// Current module imports
use super::constants::{ANALYZE_PATH, MULTI_TIMEFRAME_PATH, SEARCH_PATH};
use super::errors::LunarCrushError;
use super::types::{LunarCrush, SearchResponse};

/// Searches the worker for assets matching a free-text query.
pub async fn search_crypto(
    lunarcrush: &LunarCrush,
    query: &str,
) -> Result<Vec<CryptoSearchResult>, LunarCrushError> {
    let url = format!("{}{}", lunarcrush.config.worker_url, SEARCH_PATH);
    let options = RequestOptions {
        method: Method::POST,
        body: Some(json!({ "query": query }).to_string()),
        ..Default::default()
    };
    let key = format!("search-{}", query.to_lowercase());

    debug!(query = %query, "Searching analytics worker");

    let response: SearchResponse = lunarcrush
        .throttle
        .throttled_request_as(&url, options, Some(&key))
        .await
        .map_err(|source| LunarCrushError::SearchFailed {
            query: query.to_string(),
            source,
        })?;

    Ok(response.results)
}

/// Fetches the current analysis for a single symbol.
pub async fn get_crypto_analysis(
    lunarcrush: &LunarCrush,
    symbol: &str,
) -> Result<PredictionData, LunarCrushError> {
    let url = format!("{}{}", lunarcrush.config.worker_url, ANALYZE_PATH);
    let options = RequestOptions {
        method: Method::POST,
        body: Some(json!({ "symbol": symbol }).to_string()),
        ..Default::default()
    };
    let key = format!("analyze-{}", symbol.to_lowercase());

    debug!(symbol = %symbol, "Requesting analysis");

    lunarcrush
        .throttle
        .throttled_request_as(&url, options, Some(&key))
        .await
        .map_err(|source| LunarCrushError::AnalysisFailed {
            symbol: symbol.to_string(),
            source,
        })
}

/// Extends a base analysis with per-timeframe predictions.
pub async fn get_multi_timeframe_analysis(
    lunarcrush: &LunarCrush,
    symbol: &str,
    base: &PredictionData,
) -> Result<MultiTimeframeAnalysis, LunarCrushError> {
    let url = format!("{}{}", lunarcrush.config.worker_url, MULTI_TIMEFRAME_PATH);
    let options = RequestOptions {
        method: Method::POST,
        body: Some(json!({ "symbol": symbol, "baseAnalysis": base }).to_string()),
        ..Default::default()
    };
    let key = format!("multiframe-{}", symbol.to_lowercase());

    debug!(symbol = %symbol, "Requesting multi-timeframe analysis");

    lunarcrush
        .throttle
        .throttled_request_as(&url, options, Some(&key))
        .await
        .map_err(|source| LunarCrushError::MultiTimeframeFailed {
            symbol: symbol.to_string(),
            source,
        })
}

/// Refreshes the analysis for every configured symbol concurrently.
pub async fn process_symbols(lunarcrush: &LunarCrush) -> Result<(), LunarCrushError> {
    let mut futures = FuturesUnordered::new();

    for symbol in &lunarcrush.config.symbols {
        futures.push(async move { (symbol.as_str(), get_crypto_analysis(lunarcrush, symbol).await) });
    }

    let mut last_error: Option<LunarCrushError> = None;
    let mut refreshed = 0;

    // Collect all results, processing them as they complete.
    while let Some((symbol, result)) = futures.next().await {
        match result {
            Ok(analysis) => {
                refreshed += 1;
                info!(
                    symbol = %symbol,
                    price = analysis.current_price,
                    galaxy_score = analysis.social_metrics.galaxy_score,
                    risk = ?analysis.ai_prediction.risk_level,
                    "Analysis refreshed"
                );
            }
            Err(error) => {
                error!(symbol = %symbol, "Failed to refresh analysis: {}", error);
                last_error = Some(error);
            }
        }
    }

    if refreshed > 0 {
        info!(count = refreshed, "Refreshed {} analyses", refreshed);
    }

    if let Some(error) = last_error {
        Err(error)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use reqwest::StatusCode;

    use crate::providers::types::RiskLevel;
    use crate::utility::throttle::errors::ThrottleError;
    use crate::utility::throttle::traits::Transport;
    use crate::utility::throttle::types::{
        RequestThrottle, ThrottleConfig, TransportRequest, TransportResponse,
    };

    use super::super::types::{LcConfig, LunarCrush};
    use super::{get_crypto_analysis, get_multi_timeframe_analysis, search_crypto};

    /// Transport answering every request with one fixed JSON body.
    struct StaticTransport {
        body: &'static str,
    }

    #[async_trait]
    impl Transport for StaticTransport {
        async fn execute(
            &self,
            _request: TransportRequest,
        ) -> Result<TransportResponse, ThrottleError> {
            Ok(TransportResponse {
                status: StatusCode::OK,
                body: self.body.to_string(),
            })
        }
    }

    const ANALYSIS_BODY: &str = r#"{
        "symbol": "BTC",
        "current_price": 97250.0,
        "social_metrics": {
            "galaxy_score": 72.5,
            "alt_rank": 1,
            "social_volume_24h": 184223,
            "interactions_24h": 90812331,
            "sentiment": 81.0,
            "social_dominance": 22.4
        },
        "ai_prediction": {
            "price_target_24h": 98100.0,
            "price_target_7d": 101500.0,
            "confidence_score": 0.64,
            "risk_level": "MEDIUM",
            "reasoning": "elevated social volume with stable dominance",
            "position_size_recommendation": 0.02
        },
        "timestamp": "2025-01-20T12:00:00Z"
    }"#;

    fn provider(body: &'static str) -> LunarCrush {
        let throttle = RequestThrottle::with_transport(
            ThrottleConfig::default(),
            Arc::new(StaticTransport { body }),
        );
        let config = LcConfig {
            enabled: true,
            worker_url: "https://worker.example".to_string(),
            symbols: vec!["BTC".to_string()],
        };
        LunarCrush::new(config, throttle).unwrap()
    }

    #[tokio::test]
    async fn search_parses_worker_results() {
        let lunarcrush = provider(
            r#"{"results":[{"symbol":"BTC","name":"Bitcoin","galaxy_score":72.5}]}"#,
        );

        let results = search_crypto(&lunarcrush, "bitcoin").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].symbol, "BTC");
        assert_eq!(results[0].galaxy_score, Some(72.5));
    }

    #[tokio::test]
    async fn analysis_deserializes_the_full_payload() {
        let lunarcrush = provider(ANALYSIS_BODY);

        let analysis = get_crypto_analysis(&lunarcrush, "BTC").await.unwrap();
        assert_eq!(analysis.symbol, "BTC");
        assert_eq!(analysis.social_metrics.alt_rank, 1);
        assert_eq!(analysis.ai_prediction.risk_level, RiskLevel::Medium);
        assert!(analysis.social_metrics.market_cap.is_none());
    }

    #[tokio::test]
    async fn multi_timeframe_extends_the_base_analysis() {
        let lunarcrush = provider(
            r#"{
                "symbol": "BTC",
                "current_price": 97250.0,
                "social_metrics": {
                    "galaxy_score": 72.5,
                    "alt_rank": 1,
                    "social_volume_24h": 184223,
                    "interactions_24h": 90812331,
                    "sentiment": 81.0,
                    "social_dominance": 22.4
                },
                "ai_prediction": {
                    "price_target_24h": 98100.0,
                    "price_target_7d": 101500.0,
                    "confidence_score": 0.64,
                    "risk_level": "MEDIUM",
                    "reasoning": "elevated social volume with stable dominance",
                    "position_size_recommendation": 0.02
                },
                "timestamp": "2025-01-20T12:00:00Z",
                "multi_timeframe": {
                    "predictions": [{
                        "timeframe": "4h",
                        "price_target": 97600.0,
                        "confidence_score": 0.7,
                        "reasoning": "momentum continuation",
                        "risk_level": "LOW",
                        "volume_expectation": 1.2
                    }],
                    "confidence_trend": "INCREASING",
                    "overall_trend": "BULLISH",
                    "best_entry_timeframe": "4h",
                    "risk_timeline": {
                        "short_term": "LOW",
                        "medium_term": "MEDIUM",
                        "long_term": "MEDIUM"
                    }
                }
            }"#,
        );

        let base = get_crypto_analysis(&lunarcrush, "BTC").await.unwrap();
        let extended = get_multi_timeframe_analysis(&lunarcrush, "BTC", &base)
            .await
            .unwrap();
        assert_eq!(extended.base.symbol, "BTC");
        assert_eq!(extended.multi_timeframe.predictions.len(), 1);
        assert_eq!(extended.multi_timeframe.best_entry_timeframe, "4h");
    }
}
