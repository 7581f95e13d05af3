//! Cache de frescor para resultados de análise.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::types::metrics::MetricsReport;
use crate::{PulsoError, PulsoResult};

/// Resultado em cache.
#[derive(Debug, Clone)]
pub struct CachedEntry {
    /// Report da análise.
    pub value: MetricsReport,

    /// Momento em que foi computado.
    pub computed_at: DateTime<Utc>,
}

impl CachedEntry {
    /// Cria uma nova entrada em cache.
    pub fn new(value: MetricsReport) -> Self {
        Self {
            value,
            computed_at: Utc::now(),
        }
    }

    /// Verifica se a entrada ainda está fresca para a janela dada.
    ///
    /// Uma entrada é fresca enquanto `agora - computed_at < janela`;
    /// janela zero nunca é fresca.
    pub fn is_fresh(&self, window: Duration) -> bool {
        let elapsed = Utc::now()
            .signed_duration_since(self.computed_at)
            .to_std()
            .unwrap_or(Duration::MAX);
        elapsed < window
    }
}

/// Estatísticas do cache.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Número atual de entradas.
    pub size: usize,

    /// Número de acertos (cache hits).
    pub hits: u64,

    /// Número de erros (cache misses).
    pub misses: u64,
}

impl CacheStats {
    /// Calcula a taxa de acerto.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Cache de resultados limitado por frescor.
///
/// Guarda no máximo uma entrada por alvo, reutilizada enquanto estiver
/// dentro da janela de frescor. Não há eviction por tamanho nem LRU: o
/// espaço de chaves é limitado pela entrada do usuário, e apenas o tempo
/// decide se um resultado pode ser reutilizado.
pub struct FreshnessCache {
    entries: HashMap<String, CachedEntry>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl FreshnessCache {
    /// Cria um novo cache vazio.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Retorna o resultado em cache se ainda fresco, ou computa um novo.
    ///
    /// - Acerto: retorna o valor armazenado sem invocar `compute`.
    /// - Erro ou entrada vencida: invoca `compute`; em caso de sucesso,
    ///   sobrescreve a entrada do alvo com `computed_at` atual.
    /// - Falha de `compute`: o cache permanece intacto e o erro é propagado.
    ///
    /// Alvos vazios são rejeitados antes de qualquer computação.
    pub async fn get_or_compute<F, Fut>(
        &mut self,
        target: &str,
        window: Duration,
        compute: F,
    ) -> PulsoResult<MetricsReport>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = PulsoResult<MetricsReport>>,
    {
        if target.trim().is_empty() {
            return Err(PulsoError::InvalidTarget);
        }

        if let Some(entry) = self.entries.get(target) {
            if entry.is_fresh(window) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(entry.value.clone());
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);

        // Em caso de falha o `?` retorna antes de tocar no mapa
        let value = compute().await?;
        self.entries
            .insert(target.to_string(), CachedEntry::new(value.clone()));

        Ok(value)
    }

    /// Consulta a entrada de um alvo sem alterar estatísticas.
    pub fn peek(&self, target: &str) -> Option<&CachedEntry> {
        self.entries.get(target)
    }

    /// Número de alvos em cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Verifica se o cache está vazio.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retorna estatísticas do cache.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for FreshnessCache {
    fn default() -> Self {
        Self::new()
    }
}
