//! Cache de frescor para resultados de análise.
//!
//! Este módulo implementa um cache limitado por frescor (freshness-bounded)
//! para resultados de análise de performance: um resultado é reutilizado
//! enquanto sua idade for menor que a janela configurada, e recomputado
//! caso contrário. Não há eviction por tamanho.

mod freshness;

pub use freshness::{CacheStats, CachedEntry, FreshnessCache};
