//! Tipos de requisição do Pulso.

use serde::{Deserialize, Serialize};

/// Requisição de análise de performance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// ID único da requisição.
    pub request_id: String,

    /// URL do site a ser analisado.
    pub target: String,

    /// Contexto adicional opcional.
    pub context: Option<String>,
}

impl AnalysisRequest {
    /// Cria uma nova requisição de análise.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            target: target.into(),
            context: None,
        }
    }

    /// Define o contexto.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Verifica se o alvo é válido (não vazio).
    pub fn has_valid_target(&self) -> bool {
        !self.target.trim().is_empty()
    }
}
