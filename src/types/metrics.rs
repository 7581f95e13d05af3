//! Tipos de métricas do Pulso.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot imutável das medições de performance de um site.
///
/// Produzido por um probe; uma vez criado, nunca é modificado.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    /// ID da requisição que originou a medição.
    pub request_id: String,

    /// URL analisada.
    pub target: String,

    /// Tempo de carregamento da página (segundos).
    pub load_time_secs: f64,

    /// Tempo de resposta do servidor (milissegundos).
    pub server_response_ms: f64,

    /// Número de recursos carregados.
    pub resource_count: u32,

    /// Disponibilidade (porcentagem).
    pub uptime_pct: f64,

    /// Score de performance (0-100).
    pub performance_score: u8,

    /// Momento da medição.
    pub measured_at: DateTime<Utc>,
}

impl MetricsReport {
    /// Cria um novo report com timestamp atual.
    pub fn new(request_id: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            target: target.into(),
            load_time_secs: 0.0,
            server_response_ms: 0.0,
            resource_count: 0,
            uptime_pct: 100.0,
            performance_score: 0,
            measured_at: Utc::now(),
        }
    }

    /// Classifica o tempo de carregamento.
    pub fn load_time_health(&self) -> HealthStatus {
        Thresholds::LOAD_TIME.classify(self.load_time_secs)
    }

    /// Classifica a resposta do servidor.
    pub fn server_response_health(&self) -> HealthStatus {
        Thresholds::SERVER_RESPONSE.classify(self.server_response_ms)
    }

    /// Classifica a contagem de recursos.
    pub fn resource_count_health(&self) -> HealthStatus {
        Thresholds::RESOURCE_COUNT.classify(self.resource_count as f64)
    }

    /// Classifica a disponibilidade (avaliada pelo downtime).
    pub fn uptime_health(&self) -> HealthStatus {
        Thresholds::DOWNTIME.classify(100.0 - self.uptime_pct)
    }

    /// Classifica o score de performance (avaliado pela distância de 100).
    pub fn score_health(&self) -> HealthStatus {
        Thresholds::SCORE_GAP.classify(100.0 - f64::from(self.performance_score))
    }

    /// Saúde agregada do report: a pior classificação entre as métricas.
    pub fn health(&self) -> HealthStatus {
        [
            self.load_time_health(),
            self.server_response_health(),
            self.resource_count_health(),
            self.uptime_health(),
            self.score_health(),
        ]
        .into_iter()
        .max()
        .unwrap_or(HealthStatus::Optimal)
    }
}

/// Classificação de saúde de uma métrica.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Dentro da faixa ideal.
    Optimal,
    /// Acima do ideal, ainda aceitável.
    Warning,
    /// Fora da faixa aceitável.
    Critical,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Optimal => write!(f, "OPTIMAL"),
            HealthStatus::Warning => write!(f, "WARNING"),
            HealthStatus::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Limites de classificação de uma métrica.
///
/// Valores até `optimal` são ideais; até `warning`, aceitáveis;
/// acima disso, críticos.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub optimal: f64,
    pub warning: f64,
}

impl Thresholds {
    /// Tempo de carregamento (segundos).
    pub const LOAD_TIME: Thresholds = Thresholds {
        optimal: 1.0,
        warning: 3.0,
    };

    /// Resposta do servidor (milissegundos).
    pub const SERVER_RESPONSE: Thresholds = Thresholds {
        optimal: 200.0,
        warning: 500.0,
    };

    /// Recursos carregados.
    pub const RESOURCE_COUNT: Thresholds = Thresholds {
        optimal: 30.0,
        warning: 60.0,
    };

    /// Indisponibilidade (100 - uptime, em pontos percentuais).
    pub const DOWNTIME: Thresholds = Thresholds {
        optimal: 0.1,
        warning: 0.5,
    };

    /// Distância do score perfeito (100 - score).
    pub const SCORE_GAP: Thresholds = Thresholds {
        optimal: 10.0,
        warning: 30.0,
    };

    /// Classifica um valor contra os limites.
    pub fn classify(&self, value: f64) -> HealthStatus {
        if value <= self.optimal {
            HealthStatus::Optimal
        } else if value <= self.warning {
            HealthStatus::Warning
        } else {
            HealthStatus::Critical
        }
    }
}
