//! Sistema de hooks do Pulso.
//!
//! Hooks permitem observar e customizar o ciclo de vida de uma análise
//! em pontos específicos:
//!
//! - `pre_analyze`: Antes de consultar o cache ou medir
//! - `post_analyze`: Após uma análise bem-sucedida
//! - `on_failure`: Quando uma medição falha

mod builtin;

pub use builtin::{LoggingHook, SessionMetrics, SessionMetricsHook};

use async_trait::async_trait;

use crate::types::metrics::MetricsReport;
use crate::types::requests::AnalysisRequest;
use crate::{PulsoError, PulsoResult};

// ═══════════════════════════════════════════════════════════════════════════
// Tipos de eventos
// ═══════════════════════════════════════════════════════════════════════════

/// Evento que dispara um hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    /// Antes de iniciar a análise.
    PreAnalyze,

    /// Após análise completa.
    PostAnalyze,

    /// Quando a medição falha.
    OnFailure,
}

impl std::fmt::Display for HookEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HookEvent::PreAnalyze => write!(f, "pre_analyze"),
            HookEvent::PostAnalyze => write!(f, "post_analyze"),
            HookEvent::OnFailure => write!(f, "on_failure"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Contexto de hooks
// ═══════════════════════════════════════════════════════════════════════════

/// Contexto passado para hooks.
pub enum HookContext<'a> {
    /// Contexto para pre_analyze.
    PreAnalyze {
        /// Requisição de análise.
        request: &'a AnalysisRequest,
    },

    /// Contexto para post_analyze.
    PostAnalyze {
        /// Requisição original.
        request: &'a AnalysisRequest,
        /// Report produzido (do cache ou recém-medido).
        report: &'a MetricsReport,
    },

    /// Contexto para on_failure.
    OnFailure {
        /// Requisição original.
        request: &'a AnalysisRequest,
        /// Erro da medição.
        error: &'a PulsoError,
    },
}

impl<'a> HookContext<'a> {
    /// Retorna o evento correspondente ao contexto.
    pub fn event(&self) -> HookEvent {
        match self {
            HookContext::PreAnalyze { .. } => HookEvent::PreAnalyze,
            HookContext::PostAnalyze { .. } => HookEvent::PostAnalyze,
            HookContext::OnFailure { .. } => HookEvent::OnFailure,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Resultado de hooks
// ═══════════════════════════════════════════════════════════════════════════

/// Resultado da execução de um hook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HookResult {
    /// Continua normalmente.
    #[default]
    Continue,

    /// Pula a análise (apenas válido para pre_analyze).
    Skip,
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait Hook
// ═══════════════════════════════════════════════════════════════════════════

/// Trait para hooks customizáveis.
#[async_trait]
pub trait Hook: Send + Sync {
    /// Nome do hook.
    fn name(&self) -> &str;

    /// Evento que dispara este hook.
    fn event(&self) -> HookEvent;

    /// Executa o hook.
    async fn execute(&self, context: &HookContext<'_>) -> PulsoResult<HookResult>;
}

// ═══════════════════════════════════════════════════════════════════════════
// Sistema de hooks
// ═══════════════════════════════════════════════════════════════════════════

/// Gerenciador de hooks.
pub struct HookSystem {
    pre_analyze: Vec<Box<dyn Hook>>,
    post_analyze: Vec<Box<dyn Hook>>,
    on_failure: Vec<Box<dyn Hook>>,
}

impl HookSystem {
    /// Cria um novo sistema de hooks vazio.
    pub fn new() -> Self {
        Self {
            pre_analyze: Vec::new(),
            post_analyze: Vec::new(),
            on_failure: Vec::new(),
        }
    }

    /// Cria um sistema com hooks padrão (logging).
    pub fn with_defaults() -> Self {
        let mut system = Self::new();
        system.register(Box::new(LoggingHook));
        system
    }

    /// Registra um hook.
    pub fn register(&mut self, hook: Box<dyn Hook>) {
        let event = hook.event();
        tracing::debug!(
            hook_name = hook.name(),
            event = %event,
            "Registering hook"
        );

        match event {
            HookEvent::PreAnalyze => self.pre_analyze.push(hook),
            HookEvent::PostAnalyze => self.post_analyze.push(hook),
            HookEvent::OnFailure => self.on_failure.push(hook),
        }
    }

    /// Executa hooks de pre_analyze.
    ///
    /// Retorna o resultado final (Continue ou Skip).
    pub async fn run_pre_analyze(&self, request: &AnalysisRequest) -> PulsoResult<HookResult> {
        let context = HookContext::PreAnalyze { request };

        for hook in &self.pre_analyze {
            if hook.execute(&context).await? == HookResult::Skip {
                return Ok(HookResult::Skip);
            }
        }

        Ok(HookResult::Continue)
    }

    /// Executa hooks de post_analyze.
    pub async fn run_post_analyze(
        &self,
        request: &AnalysisRequest,
        report: &MetricsReport,
    ) -> PulsoResult<()> {
        let context = HookContext::PostAnalyze { request, report };

        for hook in &self.post_analyze {
            hook.execute(&context).await?;
        }

        Ok(())
    }

    /// Executa hooks de on_failure.
    pub async fn run_on_failure(
        &self,
        request: &AnalysisRequest,
        error: &PulsoError,
    ) -> PulsoResult<()> {
        let context = HookContext::OnFailure { request, error };

        for hook in &self.on_failure {
            hook.execute(&context).await?;
        }

        Ok(())
    }

    /// Retorna o número total de hooks registrados.
    pub fn count(&self) -> usize {
        self.pre_analyze.len() + self.post_analyze.len() + self.on_failure.len()
    }

    /// Retorna o número de hooks para um evento específico.
    pub fn count_for_event(&self, event: HookEvent) -> usize {
        match event {
            HookEvent::PreAnalyze => self.pre_analyze.len(),
            HookEvent::PostAnalyze => self.post_analyze.len(),
            HookEvent::OnFailure => self.on_failure.len(),
        }
    }
}

impl Default for HookSystem {
    fn default() -> Self {
        Self::new()
    }
}
