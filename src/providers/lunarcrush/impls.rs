// 3rd party crates
use async_trait::async_trait;
use reqwest::Url;

// Project imports
use crate::providers::traits::AnalyticsProvider;
use crate::providers::types::{CryptoSearchResult, MultiTimeframeAnalysis, PredictionData};
use crate::utility::throttle::types::RequestThrottle;

// Current module imports
use super::constants::default_worker_url;
use super::errors::{LunarCrushError, LunarCrushValidationError};
use super::functions::{get_crypto_analysis, get_multi_timeframe_analysis, search_crypto};
use super::types::{LcConfig, LunarCrush};

impl Default for LcConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            worker_url: default_worker_url(),
            symbols: Vec::new(),
        }
    }
}

impl LcConfig {
    pub fn validate(&self) -> Result<(), LunarCrushValidationError> {
        if self.worker_url.trim().is_empty() {
            return Err(LunarCrushValidationError::MissingWorkerUrl);
        }

        if Url::parse(&self.worker_url).is_err() {
            return Err(LunarCrushValidationError::InvalidWorkerUrl(
                self.worker_url.clone(),
            ));
        }

        if self.symbols.is_empty() {
            return Err(LunarCrushValidationError::NoSymbols);
        }

        Ok(())
    }
}

impl LunarCrush {
    pub fn new(config: LcConfig, throttle: RequestThrottle) -> Result<Self, LunarCrushError> {
        config.validate()?;
        Ok(Self { config, throttle })
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }
}

#[async_trait]
impl AnalyticsProvider for LunarCrush {
    type Config = LcConfig;
    type Error = LunarCrushError;

    fn new(config: Self::Config, throttle: RequestThrottle) -> Result<Self, Self::Error> {
        LunarCrush::new(config, throttle)
    }

    async fn search(&self, query: &str) -> Result<Vec<CryptoSearchResult>, Self::Error> {
        search_crypto(self, query).await
    }

    async fn analyze(&self, symbol: &str) -> Result<PredictionData, Self::Error> {
        get_crypto_analysis(self, symbol).await
    }

    async fn analyze_timeframes(
        &self,
        symbol: &str,
        base: &PredictionData,
    ) -> Result<MultiTimeframeAnalysis, Self::Error> {
        get_multi_timeframe_analysis(self, symbol, base).await
    }

    fn validate_config(&self) -> Result<(), Self::Error> {
        self.config.validate().map_err(Into::into)
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    fn get_name(&self) -> &str {
        "lunarcrush"
    }
}

#[cfg(test)]
mod tests {
    use super::super::errors::LunarCrushValidationError;
    use super::super::types::LcConfig;

    fn enabled_config() -> LcConfig {
        LcConfig {
            enabled: true,
            symbols: vec!["BTC".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn default_worker_url_passes_validation() {
        enabled_config().validate().unwrap();
    }

    #[test]
    fn rejects_an_empty_worker_url() {
        let config = LcConfig {
            worker_url: "  ".to_string(),
            ..enabled_config()
        };
        assert!(matches!(
            config.validate(),
            Err(LunarCrushValidationError::MissingWorkerUrl)
        ));
    }

    #[test]
    fn rejects_a_malformed_worker_url() {
        let config = LcConfig {
            worker_url: "not a url".to_string(),
            ..enabled_config()
        };
        assert!(matches!(
            config.validate(),
            Err(LunarCrushValidationError::InvalidWorkerUrl(_))
        ));
    }

    #[test]
    fn rejects_an_empty_symbol_list() {
        let config = LcConfig {
            symbols: Vec::new(),
            ..enabled_config()
        };
        assert!(matches!(
            config.validate(),
            Err(LunarCrushValidationError::NoSymbols)
        ));
    }
}
