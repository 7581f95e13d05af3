//! Probes de medição do Pulso.
//!
//! Este módulo contém o contrato dos provedores de medição de
//! performance e a implementação simulada usada por padrão.

mod base;
mod simulated;

pub use base::Probe;
pub use simulated::SimulatedProbe;
