//! Histórico limitado de resultados de análise.
//!
//! Sequência append-only com capacidade fixa: cada análise bem-sucedida
//! é anexada ao fim, e o registro mais antigo é descartado quando a
//! capacidade é excedida.

mod log;

pub use log::{HistoryLog, HistoryRecord, DEFAULT_CAPACITY};
