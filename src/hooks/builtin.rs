//! Hooks padrão do Pulso.
//!
//! Este módulo contém hooks que vêm pré-configurados com o Pulso:
//! - `LoggingHook`: Registra análises no log
//! - `SessionMetricsHook`: Coleta métricas da sessão de análise

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::types::metrics::HealthStatus;
use crate::PulsoResult;

use super::{Hook, HookContext, HookEvent, HookResult};

// ═══════════════════════════════════════════════════════════════════════════
// LoggingHook
// ═══════════════════════════════════════════════════════════════════════════

/// Hook que registra análises no log.
///
/// Executado após cada análise (post_analyze), registra informações
/// sobre o report usando o sistema de logging (tracing).
#[derive(Debug, Default)]
pub struct LoggingHook;

impl LoggingHook {
    /// Cria um novo LoggingHook.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Hook for LoggingHook {
    fn name(&self) -> &str {
        "logging"
    }

    fn event(&self) -> HookEvent {
        HookEvent::PostAnalyze
    }

    async fn execute(&self, context: &HookContext<'_>) -> PulsoResult<HookResult> {
        if let HookContext::PostAnalyze { request, report } = context {
            tracing::info!(
                request_id = %request.request_id,
                target = %report.target,
                score = report.performance_score,
                load_time_secs = report.load_time_secs,
                health = %report.health(),
                "Analysis completed"
            );

            // Log detalhado para sites em estado crítico
            if report.health() == HealthStatus::Critical {
                tracing::warn!(
                    target = %report.target,
                    load_time_secs = report.load_time_secs,
                    server_response_ms = report.server_response_ms,
                    "Site in critical state - review required"
                );
            }
        }

        Ok(HookResult::Continue)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SessionMetricsHook
// ═══════════════════════════════════════════════════════════════════════════

/// Hook que coleta métricas da sessão.
///
/// Mantém contadores de análises por classificação de saúde e o score
/// médio observado.
#[derive(Debug, Default)]
pub struct SessionMetricsHook {
    /// Total de análises.
    analyses: AtomicU64,

    /// Total com saúde ideal.
    optimal: AtomicU64,

    /// Total com avisos.
    warnings: AtomicU64,

    /// Total em estado crítico.
    criticals: AtomicU64,

    /// Soma de todos os scores (para calcular média).
    score_sum: AtomicU64,
}

impl SessionMetricsHook {
    /// Cria um novo SessionMetricsHook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retorna o total de análises.
    pub fn total_analyses(&self) -> u64 {
        self.analyses.load(Ordering::Relaxed)
    }

    /// Retorna o total de análises com saúde ideal.
    pub fn total_optimal(&self) -> u64 {
        self.optimal.load(Ordering::Relaxed)
    }

    /// Retorna o total de análises com avisos.
    pub fn total_warnings(&self) -> u64 {
        self.warnings.load(Ordering::Relaxed)
    }

    /// Retorna o total de análises críticas.
    pub fn total_criticals(&self) -> u64 {
        self.criticals.load(Ordering::Relaxed)
    }

    /// Retorna a fração de análises com saúde ideal.
    pub fn optimal_rate(&self) -> f64 {
        let total = self.total_analyses();
        if total == 0 {
            0.0
        } else {
            self.total_optimal() as f64 / total as f64
        }
    }

    /// Retorna o score médio.
    pub fn average_score(&self) -> f64 {
        let total = self.total_analyses();
        if total == 0 {
            0.0
        } else {
            self.score_sum.load(Ordering::Relaxed) as f64 / total as f64
        }
    }

    /// Retorna as métricas em formato estruturado.
    pub fn metrics(&self) -> SessionMetrics {
        SessionMetrics {
            total_analyses: self.total_analyses(),
            optimal: self.total_optimal(),
            warnings: self.total_warnings(),
            criticals: self.total_criticals(),
            optimal_rate: self.optimal_rate(),
            average_score: self.average_score(),
        }
    }
}

/// Métricas coletadas pelo SessionMetricsHook.
#[derive(Debug, Clone)]
pub struct SessionMetrics {
    pub total_analyses: u64,
    pub optimal: u64,
    pub warnings: u64,
    pub criticals: u64,
    pub optimal_rate: f64,
    pub average_score: f64,
}

#[async_trait]
impl Hook for SessionMetricsHook {
    fn name(&self) -> &str {
        "session_metrics"
    }

    fn event(&self) -> HookEvent {
        HookEvent::PostAnalyze
    }

    async fn execute(&self, context: &HookContext<'_>) -> PulsoResult<HookResult> {
        if let HookContext::PostAnalyze { report, .. } = context {
            self.analyses.fetch_add(1, Ordering::Relaxed);

            match report.health() {
                HealthStatus::Optimal => {
                    self.optimal.fetch_add(1, Ordering::Relaxed);
                }
                HealthStatus::Warning => {
                    self.warnings.fetch_add(1, Ordering::Relaxed);
                }
                HealthStatus::Critical => {
                    self.criticals.fetch_add(1, Ordering::Relaxed);
                }
            }

            self.score_sum
                .fetch_add(u64::from(report.performance_score), Ordering::Relaxed);
        }

        Ok(HookResult::Continue)
    }
}
