//! Testes de integração do watcher periódico.

use std::sync::Arc;
use std::time::Duration;

use pulso::analyzer::AnalyzerSession;
use pulso::probe::SimulatedProbe;
use pulso::types::config::Config;
use pulso::watcher::PeriodicWatcher;
use pulso::PulsoError;

fn session_with(latency: Duration, failure_rate: f64) -> Arc<AnalyzerSession> {
    let mut config = Config::default_config();
    // Janela zero força uma medição nova a cada tick
    config.cache.freshness_window_secs = 0;

    let probe = Arc::new(
        SimulatedProbe::new()
            .with_latency(latency)
            .with_failure_rate(failure_rate),
    );
    Arc::new(AnalyzerSession::new(probe, &config))
}

#[tokio::test]
async fn test_watcher_accumulates_history_while_active() {
    let session = session_with(Duration::ZERO, 0.0);
    let mut watcher = PeriodicWatcher::new(session.clone(), "example.com");

    watcher.start(Duration::from_millis(20)).unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;
    watcher.stop();

    let history = session.history_snapshot().await;
    assert!(
        history.len() >= 2,
        "esperava ao menos 2 análises, obteve {}",
        history.len()
    );
}

#[tokio::test]
async fn test_stop_prevents_further_invocations() {
    let session = session_with(Duration::ZERO, 0.0);
    let mut watcher = PeriodicWatcher::new(session.clone(), "example.com");

    watcher.start(Duration::from_millis(20)).unwrap();
    tokio::time::sleep(Duration::from_millis(90)).await;
    watcher.stop();

    // Margem para um tick em andamento completar
    tokio::time::sleep(Duration::from_millis(60)).await;
    let after_stop = session.history_snapshot().await.len();

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(session.history_snapshot().await.len(), after_stop);
}

#[tokio::test]
async fn test_stop_does_not_cancel_in_flight_analysis() {
    // Probe mais lento que o intervalo: o stop chega com análise em voo
    let session = session_with(Duration::from_millis(60), 0.0);
    let mut watcher = PeriodicWatcher::new(session.clone(), "example.com");

    watcher.start(Duration::from_millis(20)).unwrap();
    // Primeiro tick dispara em ~20ms; a análise termina em ~80ms
    tokio::time::sleep(Duration::from_millis(40)).await;
    watcher.stop();

    tokio::time::sleep(Duration::from_millis(120)).await;

    // A análise em andamento completou e foi registrada
    let history = session.history_snapshot().await;
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn test_restart_resets_interval_and_keeps_single_schedule() {
    let session = session_with(Duration::ZERO, 0.0);
    let mut watcher = PeriodicWatcher::new(session.clone(), "example.com");

    watcher.start(Duration::from_millis(50)).unwrap();
    watcher.start(Duration::from_millis(20)).unwrap();
    assert!(watcher.is_active());

    tokio::time::sleep(Duration::from_millis(150)).await;
    watcher.stop();

    assert!(!session.history_snapshot().await.is_empty());
}

#[tokio::test]
async fn test_stop_twice_is_harmless() {
    let session = session_with(Duration::ZERO, 0.0);
    let mut watcher = PeriodicWatcher::new(session, "example.com");

    watcher.start(Duration::from_millis(20)).unwrap();
    watcher.stop();
    watcher.stop();

    assert!(!watcher.is_active());
}

#[tokio::test]
async fn test_failing_ticks_keep_schedule_alive() {
    let session = session_with(Duration::ZERO, 1.0);
    let mut watcher = PeriodicWatcher::new(session.clone(), "example.com");

    watcher.start(Duration::from_millis(20)).unwrap();
    tokio::time::sleep(Duration::from_millis(120)).await;

    // Todas as medições falharam; nada registrado, watcher segue ativo
    assert!(watcher.is_active());
    assert!(session.history_snapshot().await.is_empty());

    watcher.stop();
}

#[tokio::test]
async fn test_blank_target_rejected_before_scheduling() {
    let session = session_with(Duration::ZERO, 0.0);
    let mut watcher = PeriodicWatcher::new(session.clone(), "");

    assert!(matches!(
        watcher.start(Duration::from_millis(20)),
        Err(PulsoError::InvalidTarget)
    ));
    assert!(!watcher.is_active());

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(session.history_snapshot().await.is_empty());
}
