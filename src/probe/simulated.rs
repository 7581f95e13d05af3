//! Probe simulado de medição de performance.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use super::base::Probe;
use crate::types::config::ProbeConfig;
use crate::types::metrics::MetricsReport;
use crate::types::requests::AnalysisRequest;
use crate::{PulsoError, PulsoResult};

/// Probe que simula a análise de um site.
///
/// Suspende pelo atraso configurado (imitando uma chamada de rede) e
/// então produz métricas aleatórias dentro de faixas realistas. Uma
/// taxa de falha opcional permite exercitar os caminhos de erro do
/// analisador sem rede de verdade.
pub struct SimulatedProbe {
    latency: Duration,
    failure_rate: f64,
}

impl SimulatedProbe {
    /// Cria um probe com os padrões (2s de atraso, sem falhas).
    pub fn new() -> Self {
        Self {
            latency: Duration::from_secs(2),
            failure_rate: 0.0,
        }
    }

    /// Cria um probe a partir da configuração.
    pub fn from_config(config: &ProbeConfig) -> Self {
        Self {
            latency: config.latency(),
            failure_rate: config.failure_rate.clamp(0.0, 1.0),
        }
    }

    /// Define o atraso simulado.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Define a taxa de falha (0.0 - 1.0).
    #[must_use]
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        self.failure_rate = rate.clamp(0.0, 1.0);
        self
    }
}

impl Default for SimulatedProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Probe for SimulatedProbe {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn measure(&self, request: &AnalysisRequest) -> PulsoResult<MetricsReport> {
        // Simula a latência de uma análise real
        tokio::time::sleep(self.latency).await;

        let mut rng = rand::thread_rng();

        if self.failure_rate > 0.0 && rng.gen::<f64>() < self.failure_rate {
            return Err(PulsoError::ProbeFailed(
                self.name().to_string(),
                "falha simulada ao coletar métricas".to_string(),
            ));
        }

        Ok(MetricsReport {
            load_time_secs: rng.gen::<f64>() * 5.0 + 0.5,
            server_response_ms: rng.gen::<f64>() * 500.0 + 100.0,
            resource_count: rng.gen_range(10..110),
            uptime_pct: if rng.gen::<f64>() > 0.05 { 100.0 } else { 99.9 },
            performance_score: rng.gen_range(70..100),
            ..MetricsReport::new(request.request_id.clone(), request.target.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_probe() -> SimulatedProbe {
        SimulatedProbe::new().with_latency(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_measure_produces_metrics_in_range() {
        let probe = fast_probe();
        let request = AnalysisRequest::new("example.com");

        let report = probe.measure(&request).await.unwrap();

        assert_eq!(report.target, "example.com");
        assert_eq!(report.request_id, request.request_id);
        assert!(report.load_time_secs >= 0.5 && report.load_time_secs < 5.5);
        assert!(report.server_response_ms >= 100.0 && report.server_response_ms < 600.0);
        assert!(report.resource_count >= 10 && report.resource_count < 110);
        assert!(report.uptime_pct == 100.0 || report.uptime_pct == 99.9);
        assert!(report.performance_score >= 70 && report.performance_score < 100);
    }

    #[tokio::test]
    async fn test_full_failure_rate_always_fails() {
        let probe = fast_probe().with_failure_rate(1.0);
        let request = AnalysisRequest::new("example.com");

        for _ in 0..5 {
            let result = probe.measure(&request).await;
            assert!(matches!(result, Err(PulsoError::ProbeFailed(_, _))));
        }
    }

    #[tokio::test]
    async fn test_zero_failure_rate_never_fails() {
        let probe = fast_probe();
        let request = AnalysisRequest::new("example.com");

        for _ in 0..5 {
            assert!(probe.measure(&request).await.is_ok());
        }
    }

    #[test]
    fn test_failure_rate_clamped() {
        let probe = SimulatedProbe::new().with_failure_rate(7.5);
        assert!((probe.failure_rate - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_config() {
        let config = ProbeConfig {
            latency_ms: 10,
            failure_rate: 0.25,
        };
        let probe = SimulatedProbe::from_config(&config);

        assert_eq!(probe.latency, Duration::from_millis(10));
        assert!((probe.failure_rate - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_name() {
        assert_eq!(SimulatedProbe::new().name(), "simulated");
    }
}
