//! Watcher periódico do Pulso.
//!
//! Reanalisa um alvo em intervalo fixo enquanto estiver ativo, no estilo
//! do monitoramento contínuo do dashboard: cada tick passa pela sessão
//! (cache-ou-medição) e o resultado vai para o histórico. O agendamento
//! é um objeto explícito com `start`/`stop`, independente de qualquer
//! camada de apresentação.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::analyzer::AnalyzerSession;
use crate::{PulsoError, PulsoResult};

/// Gatilho periódico de análise.
///
/// `start` é idempotente: chamar com o watcher já ativo apenas reinicia o
/// intervalo. `stop` sinaliza o loop entre ticks e nunca cancela uma
/// análise em andamento; o resultado dela ainda é cacheado e anexado ao
/// histórico. Falhas de um tick são registradas e o agendamento continua.
pub struct PeriodicWatcher {
    session: Arc<AnalyzerSession>,
    target: String,
    handle: Option<JoinHandle<()>>,
    shutdown: Option<watch::Sender<bool>>,
}

impl PeriodicWatcher {
    /// Cria um watcher para um alvo.
    pub fn new(session: Arc<AnalyzerSession>, target: impl Into<String>) -> Self {
        Self {
            session,
            target: target.into(),
            handle: None,
            shutdown: None,
        }
    }

    /// Começa a reanalisar o alvo a cada `interval`.
    ///
    /// Alvos vazios são rejeitados antes de agendar qualquer medição.
    pub fn start(&mut self, interval: Duration) -> PulsoResult<()> {
        if self.target.trim().is_empty() {
            return Err(PulsoError::InvalidTarget);
        }

        // Reiniciar o intervalo = encerrar o loop anterior e abrir outro
        self.stop();

        let (tx, mut rx) = watch::channel(false);
        let session = self.session.clone();
        let target = self.target.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // O primeiro tick do tokio é imediato; descarta para alinhar
            // ao intervalo configurado
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = rx.changed() => break,
                    _ = ticker.tick() => {
                        // O shutdown só é consultado entre ticks: uma análise
                        // em andamento sempre completa
                        if let Err(error) = session.analyze(&target).await {
                            tracing::warn!(
                                target = %target,
                                error = %error,
                                "Scheduled analysis failed"
                            );
                        }
                    }
                }
            }

            tracing::debug!(target = %target, "Watcher stopped");
        });

        tracing::info!(
            target = %self.target,
            interval_ms = interval.as_millis() as u64,
            "Watcher started"
        );

        self.shutdown = Some(tx);
        self.handle = Some(handle);
        Ok(())
    }

    /// Interrompe o agendamento.
    ///
    /// Chamada sem watcher ativo é um no-op.
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(true);
        }
        // O loop encerra sozinho após o sinal; a task não é abortada
        self.handle = None;
    }

    /// Verifica se o watcher está ativo.
    pub fn is_active(&self) -> bool {
        self.shutdown.is_some()
    }

    /// Alvo monitorado.
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Drop for PeriodicWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::SimulatedProbe;
    use crate::types::config::Config;

    fn fast_session(failure_rate: f64) -> Arc<AnalyzerSession> {
        let mut config = Config::default_config();
        // Janela zero: cada tick mede de novo em vez de acertar o cache
        config.cache.freshness_window_secs = 0;

        let probe = Arc::new(
            SimulatedProbe::new()
                .with_latency(Duration::ZERO)
                .with_failure_rate(failure_rate),
        );
        Arc::new(AnalyzerSession::new(probe, &config))
    }

    #[tokio::test]
    async fn test_ticks_accumulate_history() {
        let session = fast_session(0.0);
        let mut watcher = PeriodicWatcher::new(session.clone(), "example.com");

        watcher.start(Duration::from_millis(20)).unwrap();
        tokio::time::sleep(Duration::from_millis(130)).await;
        watcher.stop();

        let history = session.history_snapshot().await;
        assert!(
            history.len() >= 2,
            "esperava ao menos 2 ticks, obteve {}",
            history.len()
        );
    }

    #[tokio::test]
    async fn test_stop_halts_scheduling() {
        let session = fast_session(0.0);
        let mut watcher = PeriodicWatcher::new(session.clone(), "example.com");

        watcher.start(Duration::from_millis(20)).unwrap();
        tokio::time::sleep(Duration::from_millis(90)).await;
        watcher.stop();
        assert!(!watcher.is_active());

        // Margem para um tick já em andamento terminar
        tokio::time::sleep(Duration::from_millis(60)).await;
        let after_stop = session.history_snapshot().await.len();

        tokio::time::sleep(Duration::from_millis(120)).await;
        let later = session.history_snapshot().await.len();

        assert_eq!(after_stop, later);
    }

    #[tokio::test]
    async fn test_stop_while_inactive_is_noop() {
        let session = fast_session(0.0);
        let mut watcher = PeriodicWatcher::new(session, "example.com");

        assert!(!watcher.is_active());
        watcher.stop();
        assert!(!watcher.is_active());
    }

    #[tokio::test]
    async fn test_start_twice_keeps_single_schedule_active() {
        let session = fast_session(0.0);
        let mut watcher = PeriodicWatcher::new(session.clone(), "example.com");

        watcher.start(Duration::from_millis(20)).unwrap();
        watcher.start(Duration::from_millis(20)).unwrap();
        assert!(watcher.is_active());

        tokio::time::sleep(Duration::from_millis(130)).await;
        watcher.stop();

        // Ainda agenda normalmente após o restart
        assert!(!session.history_snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_target_rejected() {
        let session = fast_session(0.0);
        let mut watcher = PeriodicWatcher::new(session, "  ");

        let result = watcher.start(Duration::from_millis(20));

        assert!(matches!(result, Err(PulsoError::InvalidTarget)));
        assert!(!watcher.is_active());
    }

    #[tokio::test]
    async fn test_tick_failures_do_not_stop_schedule() {
        let session = fast_session(1.0);
        let mut watcher = PeriodicWatcher::new(session.clone(), "example.com");

        watcher.start(Duration::from_millis(20)).unwrap();
        tokio::time::sleep(Duration::from_millis(110)).await;

        // Todos os ticks falharam, mas o watcher segue ativo
        assert!(watcher.is_active());
        assert!(session.history_snapshot().await.is_empty());

        watcher.stop();
    }
}
