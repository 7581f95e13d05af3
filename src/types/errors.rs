//! Tipos de erro do Pulso.

use thiserror::Error;

/// Tipo de resultado padrão do Pulso.
pub type PulsoResult<T> = Result<T, PulsoError>;

/// Erros possíveis no Pulso.
#[derive(Error, Debug)]
pub enum PulsoError {
    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro ao parsear TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Erro ao serializar TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Erro de JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Alvo de análise inválido: a URL não pode ser vazia")]
    InvalidTarget,

    #[error("Probe '{0}' falhou: {1}")]
    ProbeFailed(String, String),

    #[error("Assunto '{0}' não encontrado no caderno")]
    SubjectNotFound(String),

    #[error("Capítulo '{0}' não encontrado em '{1}'")]
    ChapterNotFound(String, String),

    #[error("Tópico '{0}' não encontrado em '{1}'")]
    TopicNotFound(String, String),

    #[error("Anexo excede o limite de {limit} bytes (recebido: {size})")]
    AttachmentTooLarge { size: usize, limit: usize },

    #[cfg(feature = "sqlite")]
    #[error("Erro no banco de notas: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[cfg(feature = "cli")]
    #[error("Erro de interação: {0}")]
    Dialog(#[from] dialoguer::Error),

    #[error("Configuração não encontrada em: {0}")]
    ConfigNotFound(String),

    #[error("{0}")]
    Other(String),
}

impl PulsoError {
    /// Cria um erro genérico.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }

    /// Cria um erro de configuração.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Cria um erro de falha de probe.
    pub fn probe_failed<S: Into<String>>(probe: S, reason: S) -> Self {
        Self::ProbeFailed(probe.into(), reason.into())
    }
}
