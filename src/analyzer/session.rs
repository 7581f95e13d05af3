//! Sessão de análise do Pulso.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::cache::{CacheStats, FreshnessCache};
use crate::history::{HistoryLog, HistoryRecord};
use crate::hooks::{Hook, HookResult, HookSystem};
use crate::probe::{Probe, SimulatedProbe};
use crate::types::config::Config;
use crate::types::metrics::MetricsReport;
use crate::types::requests::AnalysisRequest;
use crate::{PulsoError, PulsoResult};

/// Sessão de análise.
///
/// Dona exclusiva do cache de frescor e do histórico: nenhum estado de
/// análise vive fora dela. O watcher e a camada de apresentação recebem
/// a sessão por referência compartilhada (`Arc`) e interagem apenas por
/// `analyze` e pelas consultas de leitura.
pub struct AnalyzerSession {
    probe: Arc<dyn Probe>,
    cache: Mutex<FreshnessCache>,
    history: Mutex<HistoryLog>,
    hooks: HookSystem,
    freshness_window: Duration,
}

impl AnalyzerSession {
    /// Cria uma sessão com um probe específico.
    pub fn new(probe: Arc<dyn Probe>, config: &Config) -> Self {
        Self {
            probe,
            cache: Mutex::new(FreshnessCache::new()),
            history: Mutex::new(HistoryLog::new(config.history.capacity)),
            hooks: HookSystem::with_defaults(),
            freshness_window: config.cache.freshness_window(),
        }
    }

    /// Cria uma sessão com o probe simulado configurado.
    pub fn from_config(config: &Config) -> Self {
        let probe = Arc::new(SimulatedProbe::from_config(&config.probe));
        Self::new(probe, config)
    }

    /// Substitui o sistema de hooks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: HookSystem) -> Self {
        self.hooks = hooks;
        self
    }

    /// Registra um hook adicional.
    pub fn register_hook(&mut self, hook: Box<dyn Hook>) {
        self.hooks.register(hook);
    }

    /// Analisa um alvo, reutilizando o resultado em cache se ainda fresco.
    ///
    /// Retorna `Ok(None)` quando um hook de pre_analyze pula a análise.
    /// Todo resultado bem-sucedido (do cache ou recém-medido) é anexado
    /// ao histórico; falhas de medição deixam cache e histórico intactos
    /// e são propagadas ao chamador.
    pub async fn analyze(&self, target: &str) -> PulsoResult<Option<MetricsReport>> {
        let request = AnalysisRequest::new(target);
        if !request.has_valid_target() {
            return Err(PulsoError::InvalidTarget);
        }

        if self.hooks.run_pre_analyze(&request).await? == HookResult::Skip {
            tracing::debug!(target = %request.target, "Analysis skipped by hook");
            return Ok(None);
        }

        let result = {
            let probe = self.probe.clone();
            let req = request.clone();
            let mut cache = self.cache.lock().await;
            cache
                .get_or_compute(target, self.freshness_window, || async move {
                    probe.measure(&req).await
                })
                .await
        };

        match result {
            Ok(report) => {
                self.history.lock().await.capture(report.clone());
                self.hooks.run_post_analyze(&request, &report).await?;
                Ok(Some(report))
            }
            Err(error) => {
                if let Err(hook_error) = self.hooks.run_on_failure(&request, &error).await {
                    tracing::warn!(error = %hook_error, "on_failure hook failed");
                }
                Err(error)
            }
        }
    }

    /// Retorna uma cópia ordenada do histórico (mais antigo primeiro).
    pub async fn history_snapshot(&self) -> Vec<HistoryRecord> {
        self.history.lock().await.snapshot()
    }

    /// Report mais recente do histórico, se houver.
    pub async fn latest_report(&self) -> Option<MetricsReport> {
        self.history
            .lock()
            .await
            .latest()
            .map(|record| record.report.clone())
    }

    /// Estatísticas do cache.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.lock().await.stats()
    }

    /// Janela de frescor em uso.
    pub fn freshness_window(&self) -> Duration {
        self.freshness_window
    }

    /// Nome do probe em uso.
    pub fn probe_name(&self) -> &str {
        self.probe.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::{HookContext, HookEvent};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // Probe de teste que conta medições e falha sob demanda
    struct ScriptedProbe {
        calls: AtomicUsize,
        fail: std::sync::atomic::AtomicBool,
    }

    impl ScriptedProbe {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: std::sync::atomic::AtomicBool::new(false),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn set_fail(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl Probe for ScriptedProbe {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn measure(&self, request: &AnalysisRequest) -> PulsoResult<MetricsReport> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if self.fail.load(Ordering::SeqCst) {
                return Err(PulsoError::probe_failed("scripted", "falha de teste"));
            }

            Ok(MetricsReport {
                load_time_secs: 1.0,
                server_response_ms: 200.0,
                resource_count: 30,
                uptime_pct: 100.0,
                performance_score: 90,
                ..MetricsReport::new(request.request_id.clone(), request.target.clone())
            })
        }
    }

    fn test_config() -> Config {
        Config::default_config()
    }

    #[tokio::test]
    async fn test_analyze_within_window_measures_once() {
        let probe = Arc::new(ScriptedProbe::new());
        let session = AnalyzerSession::new(probe.clone(), &test_config());

        let first = session.analyze("example.com").await.unwrap().unwrap();
        let second = session.analyze("example.com").await.unwrap().unwrap();

        assert_eq!(probe.calls(), 1);
        assert_eq!(first.request_id, second.request_id);
    }

    #[tokio::test]
    async fn test_cache_hit_still_recorded_in_history() {
        let probe = Arc::new(ScriptedProbe::new());
        let session = AnalyzerSession::new(probe.clone(), &test_config());

        session.analyze("example.com").await.unwrap();
        session.analyze("example.com").await.unwrap();

        // Uma medição, mas dois registros no histórico
        assert_eq!(probe.calls(), 1);
        assert_eq!(session.history_snapshot().await.len(), 2);
    }

    #[tokio::test]
    async fn test_failure_propagates_and_records_nothing() {
        let probe = Arc::new(ScriptedProbe::new());
        let session = AnalyzerSession::new(probe.clone(), &test_config());

        probe.set_fail(true);
        let result = session.analyze("example.com").await;

        assert!(matches!(result, Err(PulsoError::ProbeFailed(_, _))));
        assert!(session.history_snapshot().await.is_empty());
        assert_eq!(session.cache_stats().await.size, 0);
    }

    #[tokio::test]
    async fn test_recovery_after_failure() {
        let probe = Arc::new(ScriptedProbe::new());
        let session = AnalyzerSession::new(probe.clone(), &test_config());

        probe.set_fail(true);
        assert!(session.analyze("example.com").await.is_err());

        // Próxima tentativa funciona normalmente
        probe.set_fail(false);
        let report = session.analyze("example.com").await.unwrap();
        assert!(report.is_some());
        assert_eq!(session.history_snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_target_rejected_without_measuring() {
        let probe = Arc::new(ScriptedProbe::new());
        let session = AnalyzerSession::new(probe.clone(), &test_config());

        let result = session.analyze("   ").await;

        assert!(matches!(result, Err(PulsoError::InvalidTarget)));
        assert_eq!(probe.calls(), 0);
    }

    #[tokio::test]
    async fn test_skip_hook_short_circuits_analysis() {
        struct AlwaysSkip;

        #[async_trait]
        impl Hook for AlwaysSkip {
            fn name(&self) -> &str {
                "always_skip"
            }

            fn event(&self) -> HookEvent {
                HookEvent::PreAnalyze
            }

            async fn execute(&self, _context: &HookContext<'_>) -> PulsoResult<HookResult> {
                Ok(HookResult::Skip)
            }
        }

        let probe = Arc::new(ScriptedProbe::new());
        let mut session = AnalyzerSession::new(probe.clone(), &test_config());
        session.register_hook(Box::new(AlwaysSkip));

        let result = session.analyze("example.com").await.unwrap();

        assert!(result.is_none());
        assert_eq!(probe.calls(), 0);
        assert!(session.history_snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_latest_report() {
        let probe = Arc::new(ScriptedProbe::new());
        let session = AnalyzerSession::new(probe, &test_config());

        assert!(session.latest_report().await.is_none());

        session.analyze("example.com").await.unwrap();
        let latest = session.latest_report().await.unwrap();
        assert_eq!(latest.target, "example.com");
    }

    #[tokio::test]
    async fn test_distinct_targets_measured_independently() {
        let probe = Arc::new(ScriptedProbe::new());
        let session = AnalyzerSession::new(probe.clone(), &test_config());

        session.analyze("a.com").await.unwrap();
        session.analyze("b.com").await.unwrap();
        session.analyze("a.com").await.unwrap(); // hit

        assert_eq!(probe.calls(), 2);
        assert_eq!(session.cache_stats().await.size, 2);
    }
}
