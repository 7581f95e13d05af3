//! Trait base para probes de medição.

use async_trait::async_trait;

use crate::types::metrics::MetricsReport;
use crate::types::requests::AnalysisRequest;
use crate::PulsoResult;

/// Trait para provedores de medição de performance.
///
/// Cada probe encapsula uma fonte de medições (simulada ou real) e
/// fornece uma interface unificada para o analisador: recebe uma
/// requisição e devolve um report completo, ou falha. O núcleo trata
/// o probe como caixa-preta e só depende de sucesso/falha e do formato
/// do resultado.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Retorna o nome do probe.
    fn name(&self) -> &str;

    /// Mede a performance do alvo da requisição.
    async fn measure(&self, request: &AnalysisRequest) -> PulsoResult<MetricsReport>;
}
