//! Implementação dos comandos CLI do Pulso.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use indicatif::ProgressBar;

use crate::analyzer::AnalyzerSession;
use crate::history::HistoryRecord;
use crate::types::config::Config;
use crate::types::metrics::{HealthStatus, MetricsReport};
use crate::watcher::PeriodicWatcher;
use crate::PulsoResult;

/// Initializes configuration in the specified directory.
pub async fn init(path: Option<PathBuf>) -> PulsoResult<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    // Create directory if it doesn't exist
    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)?;
        tracing::info!("Directory created: {}", target_dir.display());
    }

    let config_path = target_dir.join("pulso.toml");

    if config_path.exists() {
        println!("Configuration already exists at: {}", config_path.display());
        println!("Use 'pulso config' to modify.");
        return Ok(());
    }

    // Create default configuration
    let config = Config::default_config();
    config.save(&config_path)?;

    println!("Pulso initialized successfully!");
    println!("Configuration created at: {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Analyze a site: pulso analyze example.com");
    println!("  2. Configure options: pulso config");
    println!("  3. Watch continuously: pulso watch example.com");

    Ok(())
}

/// Analisa um site uma única vez.
pub async fn analyze(target: &str, config: &Config) -> PulsoResult<()> {
    let session = AnalyzerSession::from_config(config);

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Analisando {}...", target));

    let result = session.analyze(target).await;
    spinner.finish_and_clear();

    match result {
        Ok(Some(report)) => {
            print_report(&report);
            Ok(())
        }
        Ok(None) => {
            println!("Análise de {} pulada por hook.", target);
            Ok(())
        }
        Err(error) => {
            eprintln!("✗ Falha ao analisar {}: {}", target, error);
            eprintln!("  Tente novamente ou verifique a configuração do probe.");
            Err(error)
        }
    }
}

/// Monitora um site continuamente.
pub async fn watch(
    target: &str,
    interval_secs: Option<u64>,
    ticks: Option<usize>,
    config: &Config,
) -> PulsoResult<()> {
    let interval = interval_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.watcher.interval());

    let session = Arc::new(AnalyzerSession::from_config(config));
    let mut watcher = PeriodicWatcher::new(session.clone(), target);
    watcher.start(interval)?;

    println!(
        "Monitorando {} a cada {}s (Ctrl+C para parar)...\n",
        target,
        interval.as_secs()
    );

    let mut last_seen: Option<DateTime<Utc>> = None;
    let mut shown = 0usize;

    'watching: loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("\nEncerrando...");
                break 'watching;
            }
            _ = tokio::time::sleep(Duration::from_millis(500)) => {
                let snapshot = session.history_snapshot().await;
                let new_records: Vec<&HistoryRecord> = snapshot
                    .iter()
                    .filter(|r| last_seen.map_or(true, |t| r.captured_at > t))
                    .collect();

                for record in new_records {
                    print_tick(record);
                    shown += 1;

                    if ticks.is_some_and(|limit| shown >= limit) {
                        break 'watching;
                    }
                }

                if let Some(record) = snapshot.last() {
                    last_seen = Some(record.captured_at);
                }
            }
        }
    }

    watcher.stop();

    let stats = session.cache_stats().await;
    let history = session.history_snapshot().await;

    println!("\nResumo da sessão:");
    println!("  Análises registradas: {}", history.len());
    println!(
        "  Cache: {} alvo(s), {} hit(s), {} miss(es) ({:.0}% de acerto)",
        stats.size,
        stats.hits,
        stats.misses,
        stats.hit_rate() * 100.0
    );

    Ok(())
}

/// Configura opções interativamente.
pub async fn config_cmd(config_path: &PathBuf) -> PulsoResult<()> {
    use super::interactive::{run_interactive_config, show_config_summary};

    // Mostra resumo antes de editar
    if config_path.exists() {
        let config = Config::load(config_path)?;
        show_config_summary(&config);
    }

    // Executa configuração interativa
    run_interactive_config(config_path)
}

/// Mostra versão.
pub fn version() {
    println!("pulso {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Analisador de performance de websites em tempo real");
    println!("https://github.com/SamoraDC/pulso");
}

fn health_marker(status: HealthStatus) -> &'static str {
    match status {
        HealthStatus::Optimal => "✓",
        HealthStatus::Warning => "⚠",
        HealthStatus::Critical => "✗",
    }
}

fn print_report(report: &MetricsReport) {
    println!("Relatório de {}\n", report.target);
    println!(
        "  {} Tempo de carregamento:  {:.2} s",
        health_marker(report.load_time_health()),
        report.load_time_secs
    );
    println!(
        "  {} Resposta do servidor:   {:.0} ms",
        health_marker(report.server_response_health()),
        report.server_response_ms
    );
    println!(
        "  {} Recursos carregados:    {}",
        health_marker(report.resource_count_health()),
        report.resource_count
    );
    println!(
        "  {} Disponibilidade:        {:.2}%",
        health_marker(report.uptime_health()),
        report.uptime_pct
    );
    println!(
        "  {} Score de performance:   {}/100",
        health_marker(report.score_health()),
        report.performance_score
    );
    println!();
    println!("  Saúde geral: {}", report.health());
    println!(
        "  Medido em:   {}",
        report.measured_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}

fn print_tick(record: &HistoryRecord) {
    let report = &record.report;
    println!(
        "{}  load {:>5.2}s  srv {:>4.0}ms  rec {:>3}  up {:>5.1}%  score {:>3}  [{}]",
        record.captured_at.format("%H:%M:%S"),
        report.load_time_secs,
        report.server_response_ms,
        report.resource_count,
        report.uptime_pct,
        report.performance_score,
        report.health()
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Comandos do caderno de notas
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(feature = "sqlite")]
mod notes_commands {
    use super::*;
    use crate::notes::{Notebook, NotesStore};

    fn open_store(config: &Config) -> PulsoResult<NotesStore> {
        NotesStore::open(&config.notes.db_path)
    }

    /// Lista o conteúdo do caderno.
    pub async fn list(config: &Config) -> PulsoResult<()> {
        let store = open_store(config)?;
        let notebook = store.load_notebook()?;

        if notebook.subjects().is_empty() {
            println!("Caderno vazio. Use 'pulso notes add-subject <nome>'.");
            return Ok(());
        }

        for subject in notebook.subjects() {
            println!("{}", subject.name);
            for chapter in &subject.chapters {
                println!("  {}", chapter.name);
                for topic in &chapter.topics {
                    if topic.attachments.is_empty() {
                        println!("    {}", topic.name);
                    } else {
                        println!("    {} ({} anexo(s))", topic.name, topic.attachments.len());
                        for attachment in &topic.attachments {
                            println!(
                                "      {} {} [{}]",
                                &attachment.id[..12.min(attachment.id.len())],
                                attachment.name,
                                attachment.mime_type
                            );
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Adiciona um assunto.
    pub async fn add_subject(name: &str, config: &Config) -> PulsoResult<()> {
        with_notebook(config, |notebook| notebook.add_subject(name))?;
        println!("✓ Assunto '{}' adicionado.", name);
        Ok(())
    }

    /// Renomeia um assunto.
    pub async fn rename_subject(old_name: &str, new_name: &str, config: &Config) -> PulsoResult<()> {
        with_notebook(config, |notebook| notebook.rename_subject(old_name, new_name))?;
        println!("✓ Assunto '{}' renomeado para '{}'.", old_name, new_name);
        Ok(())
    }

    /// Adiciona um capítulo.
    pub async fn add_chapter(subject: &str, name: &str, config: &Config) -> PulsoResult<()> {
        with_notebook(config, |notebook| notebook.add_chapter(subject, name))?;
        println!("✓ Capítulo '{}' adicionado em '{}'.", name, subject);
        Ok(())
    }

    /// Adiciona um tópico.
    pub async fn add_topic(
        subject: &str,
        chapter: &str,
        name: &str,
        config: &Config,
    ) -> PulsoResult<()> {
        with_notebook(config, |notebook| notebook.add_topic(subject, chapter, name))?;
        println!("✓ Tópico '{}' adicionado em '{}/{}'.", name, subject, chapter);
        Ok(())
    }

    /// Anexa uma imagem a um tópico.
    pub async fn attach(
        subject: &str,
        chapter: &str,
        topic: &str,
        file: &PathBuf,
        config: &Config,
    ) -> PulsoResult<()> {
        let bytes = std::fs::read(file)?;
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());

        let mut id = String::new();
        with_notebook(config, |notebook| {
            id = notebook.attach(
                subject,
                chapter,
                topic,
                &file_name,
                &bytes,
                config.notes.max_attachment_bytes,
            )?;
            Ok(())
        })?;

        println!("✓ Imagem '{}' anexada (id: {}).", file_name, &id[..12]);
        Ok(())
    }

    /// Remove um anexo pelo ID.
    pub async fn remove_attachment(
        subject: &str,
        chapter: &str,
        topic: &str,
        id: &str,
        config: &Config,
    ) -> PulsoResult<()> {
        with_notebook(config, |notebook| {
            notebook
                .remove_attachment(subject, chapter, topic, id)
                .map(|_| ())
        })?;
        println!("✓ Anexo '{}' removido.", id);
        Ok(())
    }

    /// Carrega o caderno, aplica a mutação e persiste.
    fn with_notebook<F>(config: &Config, mutate: F) -> PulsoResult<()>
    where
        F: FnOnce(&mut Notebook) -> PulsoResult<()>,
    {
        let store = open_store(config)?;
        let mut notebook = store.load_notebook()?;
        mutate(&mut notebook)?;
        store.save_notebook(&notebook)
    }
}

#[cfg(feature = "sqlite")]
pub use notes_commands::{
    add_chapter, add_subject, add_topic, attach, list, remove_attachment, rename_subject,
};
