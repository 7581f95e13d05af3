//! Log de histórico limitado por capacidade.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::metrics::MetricsReport;

/// Um resultado capturado no histórico.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Report capturado.
    pub report: MetricsReport,

    /// Momento da captura.
    pub captured_at: DateTime<Utc>,
}

impl HistoryRecord {
    /// Cria um registro com timestamp atual.
    pub fn new(report: MetricsReport) -> Self {
        Self {
            report,
            captured_at: Utc::now(),
        }
    }
}

/// Sequência ordenada de resultados com capacidade fixa.
///
/// Inserções são sempre no fim; quando o comprimento excede a capacidade,
/// o registro mais antigo (frente) é descartado. Não existe remoção além
/// da eviction por capacidade, e a ordem de iteração é a de inserção,
/// do mais antigo para o mais recente.
pub struct HistoryLog {
    records: VecDeque<HistoryRecord>,
    capacity: usize,
}

/// Capacidade padrão do histórico.
pub const DEFAULT_CAPACITY: usize = 20;

impl HistoryLog {
    /// Cria um log com a capacidade dada (mínimo 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.max(1)),
            capacity: capacity.max(1),
        }
    }

    /// Adiciona um registro ao fim, descartando o mais antigo se necessário.
    pub fn append(&mut self, record: HistoryRecord) {
        self.records.push_back(record);
        while self.records.len() > self.capacity {
            self.records.pop_front();
        }
    }

    /// Captura um report agora e o adiciona ao fim.
    pub fn capture(&mut self, report: MetricsReport) {
        self.append(HistoryRecord::new(report));
    }

    /// Retorna uma cópia ordenada dos registros, do mais antigo ao mais recente.
    pub fn snapshot(&self) -> Vec<HistoryRecord> {
        self.records.iter().cloned().collect()
    }

    /// Registro mais recente, se houver.
    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.records.back()
    }

    /// Número de registros retidos.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Verifica se o histórico está vazio.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Capacidade máxima.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
