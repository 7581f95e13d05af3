//! # Pulso
//!
//! Analisador de performance de websites em tempo real.
//!
//! Pulso mede (ou simula) métricas de performance de um site, reutiliza
//! resultados recentes através de um cache limitado por frescor e mantém
//! um histórico de capacidade fixa para acompanhar a evolução ao longo
//! do tempo. Um watcher periódico reanalisa o alvo em intervalo fixo
//! enquanto estiver ativo.
//!
//! ## Módulos
//!
//! - [`cli`] - Interface de linha de comando
//! - [`analyzer`] - Sessão de análise (dona do cache e do histórico)
//! - [`cache`] - Cache de resultados limitado por frescor
//! - [`history`] - Histórico de capacidade fixa
//! - [`watcher`] - Gatilho periódico de reanálise
//! - [`probe`] - Provedores de medição (simulado por padrão)
//! - [`hooks`] - Sistema de hooks para customização
//! - [`notes`] - Caderno de notas de estudo
//! - [`types`] - Tipos compartilhados

pub mod analyzer;
pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod history;
pub mod hooks;
pub mod notes;
pub mod probe;
pub mod types;
pub mod watcher;

pub use types::config::Config;
pub use types::errors::{PulsoError, PulsoResult};
