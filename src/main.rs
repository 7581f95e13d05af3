use clap::Parser;
use pulso::cli::{Cli, Commands};
use pulso::types::config::Config;
use pulso::PulsoResult;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> PulsoResult<()> {
    let cli = Cli::parse();

    // Load configuration first (no logging yet)
    let config = if cli.config.exists() {
        Config::load(&cli.config).unwrap_or_else(|_| Config::default_config())
    } else {
        Config::default_config()
    };

    // Determine log level: CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        // Use config value if no flag was specified
        config.general.log_level.clone()
    };

    // Initialize logging with appropriate level
    let filter = EnvFilter::from_default_env().add_directive(
        format!("pulso={}", log_level)
            .parse()
            .unwrap_or_else(|_| "pulso=info".parse().expect("fallback directive is valid")),
    );

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    tracing::debug!("Configuration loaded from: {}", cli.config.display());

    match cli.command {
        Commands::Init { path } => {
            pulso::cli::commands::init(path).await?;
        }
        Commands::Analyze { target } => {
            pulso::cli::commands::analyze(&target, &config).await?;
        }
        Commands::Watch {
            target,
            interval,
            ticks,
        } => {
            pulso::cli::commands::watch(&target, interval, ticks, &config).await?;
        }
        Commands::Config => {
            pulso::cli::commands::config_cmd(&cli.config).await?;
        }
        Commands::Version => {
            pulso::cli::commands::version();
        }
        #[cfg(feature = "sqlite")]
        Commands::Notes { command } => {
            use pulso::cli::NotesCommands;

            match command {
                NotesCommands::List => {
                    pulso::cli::commands::list(&config).await?;
                }
                NotesCommands::AddSubject { name } => {
                    pulso::cli::commands::add_subject(&name, &config).await?;
                }
                NotesCommands::RenameSubject { old_name, new_name } => {
                    pulso::cli::commands::rename_subject(&old_name, &new_name, &config).await?;
                }
                NotesCommands::AddChapter { subject, name } => {
                    pulso::cli::commands::add_chapter(&subject, &name, &config).await?;
                }
                NotesCommands::AddTopic {
                    subject,
                    chapter,
                    name,
                } => {
                    pulso::cli::commands::add_topic(&subject, &chapter, &name, &config).await?;
                }
                NotesCommands::Attach {
                    subject,
                    chapter,
                    topic,
                    file,
                } => {
                    pulso::cli::commands::attach(&subject, &chapter, &topic, &file, &config)
                        .await?;
                }
                NotesCommands::RemoveAttachment {
                    subject,
                    chapter,
                    topic,
                    id,
                } => {
                    pulso::cli::commands::remove_attachment(&subject, &chapter, &topic, &id, &config)
                        .await?;
                }
            }
        }
    }

    Ok(())
}
