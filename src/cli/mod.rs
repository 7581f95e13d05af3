//! Interface de linha de comando do Pulso.

pub mod commands;
pub mod interactive;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pulso - Analisador de performance de websites em tempo real.
#[derive(Parser, Debug)]
#[command(name = "pulso")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Arquivo de configuração.
    #[arg(short, long, default_value = "pulso.toml")]
    pub config: PathBuf,

    /// Modo verbose.
    #[arg(short, long)]
    pub verbose: bool,

    /// Modo silencioso.
    #[arg(short, long)]
    pub quiet: bool,

    /// Comando a executar.
    #[command(subcommand)]
    pub command: Commands,
}

/// Comandos disponíveis.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inicializa configuração no diretório atual.
    Init {
        /// Diretório de destino (padrão: diretório atual).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Analisa um site uma única vez.
    Analyze {
        /// URL do site.
        target: String,
    },

    /// Monitora um site continuamente (Ctrl+C para parar).
    Watch {
        /// URL do site.
        target: String,

        /// Intervalo entre análises (segundos; padrão do config).
        #[arg(short, long)]
        interval: Option<u64>,

        /// Encerra após N análises bem-sucedidas.
        #[arg(short, long)]
        ticks: Option<usize>,
    },

    /// Configura opções interativamente.
    Config,

    /// Mostra versão.
    Version,

    /// Gerencia o caderno de notas de estudo.
    #[cfg(feature = "sqlite")]
    Notes {
        #[command(subcommand)]
        command: NotesCommands,
    },
}

/// Subcomandos do caderno de notas.
#[cfg(feature = "sqlite")]
#[derive(Subcommand, Debug)]
pub enum NotesCommands {
    /// Lista assuntos, capítulos e tópicos.
    List,

    /// Adiciona um assunto.
    AddSubject {
        /// Nome do assunto.
        name: String,
    },

    /// Renomeia um assunto.
    RenameSubject {
        /// Nome atual.
        old_name: String,
        /// Novo nome.
        new_name: String,
    },

    /// Adiciona um capítulo a um assunto.
    AddChapter {
        /// Assunto.
        subject: String,
        /// Nome do capítulo.
        name: String,
    },

    /// Adiciona um tópico a um capítulo.
    AddTopic {
        /// Assunto.
        subject: String,
        /// Capítulo.
        chapter: String,
        /// Nome do tópico.
        name: String,
    },

    /// Anexa uma imagem a um tópico.
    Attach {
        /// Assunto.
        subject: String,
        /// Capítulo.
        chapter: String,
        /// Tópico.
        topic: String,
        /// Arquivo de imagem.
        file: PathBuf,
    },

    /// Remove um anexo pelo ID.
    RemoveAttachment {
        /// Assunto.
        subject: String,
        /// Capítulo.
        chapter: String,
        /// Tópico.
        topic: String,
        /// ID do anexo.
        id: String,
    },
}
