//! Sessão de análise do Pulso.
//!
//! A sessão é a dona explícita do cache de frescor, do histórico e do
//! probe: nada disso vive em estado global. O watcher periódico e a
//! camada de apresentação recebem a sessão por referência e nunca tocam
//! os componentes internos diretamente.

mod session;

pub use session::AnalyzerSession;
