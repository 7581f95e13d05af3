//! Configuração interativa do Pulso.
//!
//! Este módulo implementa a configuração interativa usando dialoguer.

use std::path::PathBuf;

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::types::config::Config;
use crate::PulsoResult;

/// Executa a configuração interativa.
pub fn run_interactive_config(config_path: &PathBuf) -> PulsoResult<()> {
    let theme = ColorfulTheme::default();

    println!("\n🔧 Configuração Interativa do Pulso\n");

    // Carrega config existente ou cria nova
    let mut config = if config_path.exists() {
        Config::load(config_path)?
    } else {
        println!("Criando nova configuração...\n");
        Config::default_config()
    };

    // Menu principal
    loop {
        let options = vec![
            "Configurações Gerais",
            "Probe",
            "Cache de Frescor",
            "Histórico",
            "Watcher",
            "Notas",
            "Salvar e Sair",
            "Sair sem Salvar",
        ];

        let selection = Select::with_theme(&theme)
            .with_prompt("O que deseja configurar?")
            .items(&options)
            .default(0)
            .interact()?;

        match selection {
            0 => configure_general(&theme, &mut config)?,
            1 => configure_probe(&theme, &mut config)?,
            2 => configure_cache(&theme, &mut config)?,
            3 => configure_history(&theme, &mut config)?,
            4 => configure_watcher(&theme, &mut config)?,
            5 => configure_notes(&theme, &mut config)?,
            6 => {
                config.save(config_path)?;
                println!("\n✓ Configuração salva em: {}\n", config_path.display());
                break;
            }
            7 => {
                if Confirm::with_theme(&theme)
                    .with_prompt("Deseja realmente sair sem salvar?")
                    .default(false)
                    .interact()?
                {
                    println!("\nSaindo sem salvar.\n");
                    break;
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// Configura opções gerais.
fn configure_general(theme: &ColorfulTheme, config: &mut Config) -> PulsoResult<()> {
    println!("\n📋 Configurações Gerais\n");

    // Log level
    let log_levels = vec!["error", "warn", "info", "debug", "trace"];
    let current_idx = log_levels
        .iter()
        .position(|&l| l == config.general.log_level)
        .unwrap_or(2);

    let log_level_idx = Select::with_theme(theme)
        .with_prompt("Nível de log")
        .items(&log_levels)
        .default(current_idx)
        .interact()?;

    config.general.log_level = log_levels[log_level_idx].to_string();

    // Log format
    let log_formats = vec!["text", "json"];
    let current_format_idx = log_formats
        .iter()
        .position(|&f| f == config.general.log_format)
        .unwrap_or(0);

    let log_format_idx = Select::with_theme(theme)
        .with_prompt("Formato de log")
        .items(&log_formats)
        .default(current_format_idx)
        .interact()?;

    config.general.log_format = log_formats[log_format_idx].to_string();

    println!("\n✓ Configurações gerais atualizadas.\n");
    Ok(())
}

/// Configura o probe simulado.
fn configure_probe(theme: &ColorfulTheme, config: &mut Config) -> PulsoResult<()> {
    println!("\n📡 Configuração do Probe\n");

    let latency: u64 = Input::with_theme(theme)
        .with_prompt("Atraso simulado (milissegundos)")
        .default(config.probe.latency_ms)
        .interact_text()?;

    config.probe.latency_ms = latency;

    let failure_rate: f64 = Input::with_theme(theme)
        .with_prompt("Taxa de falha (0.0 - 1.0)")
        .default(config.probe.failure_rate)
        .interact_text()?;

    config.probe.failure_rate = failure_rate.clamp(0.0, 1.0);

    println!("\n✓ Probe configurado.\n");
    Ok(())
}

/// Configura o cache de frescor.
fn configure_cache(theme: &ColorfulTheme, config: &mut Config) -> PulsoResult<()> {
    println!("\n🗄️  Configuração do Cache\n");

    let window: u64 = Input::with_theme(theme)
        .with_prompt("Janela de frescor (segundos)")
        .default(config.cache.freshness_window_secs)
        .interact_text()?;

    config.cache.freshness_window_secs = window;

    println!("\n✓ Cache configurado.\n");
    Ok(())
}

/// Configura o histórico.
fn configure_history(theme: &ColorfulTheme, config: &mut Config) -> PulsoResult<()> {
    println!("\n📈 Configuração do Histórico\n");

    let capacity: usize = Input::with_theme(theme)
        .with_prompt("Capacidade máxima (registros)")
        .default(config.history.capacity)
        .interact_text()?;

    config.history.capacity = capacity.max(1);

    println!("\n✓ Histórico configurado.\n");
    Ok(())
}

/// Configura o watcher periódico.
fn configure_watcher(theme: &ColorfulTheme, config: &mut Config) -> PulsoResult<()> {
    println!("\n⏱️  Configuração do Watcher\n");

    let interval: u64 = Input::with_theme(theme)
        .with_prompt("Intervalo entre análises (segundos)")
        .default(config.watcher.interval_secs)
        .interact_text()?;

    config.watcher.interval_secs = interval.max(1);

    println!("\n✓ Watcher configurado.\n");
    Ok(())
}

/// Configura o caderno de notas.
fn configure_notes(theme: &ColorfulTheme, config: &mut Config) -> PulsoResult<()> {
    println!("\n📓 Configuração das Notas\n");

    let db_path: String = Input::with_theme(theme)
        .with_prompt("Caminho do banco SQLite")
        .default(config.notes.db_path.display().to_string())
        .interact_text()?;

    config.notes.db_path = PathBuf::from(db_path);

    let max_mb: usize = Input::with_theme(theme)
        .with_prompt("Tamanho máximo de anexo (MiB)")
        .default(config.notes.max_attachment_bytes / (1024 * 1024))
        .interact_text()?;

    config.notes.max_attachment_bytes = max_mb.max(1) * 1024 * 1024;

    println!("\n✓ Notas configuradas.\n");
    Ok(())
}

/// Mostra um resumo da configuração atual.
pub fn show_config_summary(config: &Config) {
    println!("\n📊 Resumo da Configuração\n");
    println!("┌─────────────────────────────────────────┐");
    println!("│ Geral                                   │");
    println!("├─────────────────────────────────────────┤");
    println!("│ Log level: {:<28} │", config.general.log_level);
    println!("│ Log format: {:<27} │", config.general.log_format);
    println!("├─────────────────────────────────────────┤");
    println!("│ Analisador                              │");
    println!("├─────────────────────────────────────────┤");
    println!(
        "│ Janela de frescor: {:<18}s │",
        config.cache.freshness_window_secs
    );
    println!("│ Histórico: {:<26} reg │", config.history.capacity);
    println!("│ Intervalo do watcher: {:<15}s │", config.watcher.interval_secs);
    println!("│ Atraso do probe: {:<19}ms │", config.probe.latency_ms);
    println!("└─────────────────────────────────────────┘");
    println!();
}
