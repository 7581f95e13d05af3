//! Árvore tipada do caderno de notas.
//!
//! O caderno é uma hierarquia explícita (assunto → capítulo → tópico →
//! anexos) em vez de mapas aninhados sem tipo. Cada nível tem contrato
//! próprio de inserção e remoção, e os nomes funcionam como chaves únicas
//! dentro do nível.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{PulsoError, PulsoResult};

/// Assuntos semeados em um caderno novo.
pub const DEFAULT_SUBJECTS: [&str; 10] = [
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
    "History",
    "Geography",
    "Literature",
    "Computer Science",
    "Economics",
    "Psychology",
];

/// Caderno de notas completo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Notebook {
    subjects: Vec<Subject>,
}

/// Um assunto de estudo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    /// Nome do assunto (único no caderno).
    pub name: String,

    /// Capítulos do assunto.
    pub chapters: Vec<Chapter>,
}

/// Um capítulo dentro de um assunto.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    /// Nome do capítulo (único no assunto).
    pub name: String,

    /// Tópicos do capítulo.
    pub topics: Vec<Topic>,
}

/// Um tópico dentro de um capítulo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    /// Nome do tópico (único no capítulo).
    pub name: String,

    /// Imagens anexadas ao tópico, em ordem de inserção.
    pub attachments: Vec<Attachment>,
}

/// Uma imagem anexada a um tópico.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    /// ID derivado do conteúdo (SHA-256 em hex).
    pub id: String,

    /// Nome original do arquivo.
    pub name: String,

    /// Tipo MIME detectado pelo nome.
    pub mime_type: String,

    /// Bytes codificados em base64.
    pub data_base64: String,

    /// Momento da inserção.
    pub added_at: DateTime<Utc>,
}

impl Attachment {
    /// Cria um anexo a partir dos bytes crus.
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Self {
        let name = name.into();
        let mime_type = mime_guess::from_path(&name)
            .first_or_octet_stream()
            .to_string();

        let mut hasher = Sha256::new();
        hasher.update(bytes);

        Self {
            id: hex::encode(hasher.finalize()),
            name,
            mime_type,
            data_base64: BASE64.encode(bytes),
            added_at: Utc::now(),
        }
    }

    /// Decodifica os bytes originais.
    pub fn decoded_bytes(&self) -> PulsoResult<Vec<u8>> {
        BASE64
            .decode(&self.data_base64)
            .map_err(|e| PulsoError::other(format!("anexo corrompido: {}", e)))
    }

    /// Tamanho dos bytes originais.
    pub fn size_bytes(&self) -> usize {
        // 4 caracteres de base64 codificam 3 bytes
        let padding = self.data_base64.bytes().rev().take_while(|&b| b == b'=').count();
        self.data_base64.len() / 4 * 3 - padding
    }
}

impl Notebook {
    /// Cria um caderno vazio.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cria um caderno com os assuntos padrão.
    pub fn with_default_subjects() -> Self {
        Self {
            subjects: DEFAULT_SUBJECTS
                .iter()
                .map(|name| Subject {
                    name: (*name).to_string(),
                    chapters: Vec::new(),
                })
                .collect(),
        }
    }

    /// Assuntos do caderno, em ordem de inserção.
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Adiciona um assunto.
    ///
    /// Nomes vazios e duplicados são rejeitados.
    pub fn add_subject(&mut self, name: &str) -> PulsoResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PulsoError::other("nome de assunto não pode ser vazio"));
        }
        if self.subjects.iter().any(|s| s.name == name) {
            return Err(PulsoError::other(format!("assunto '{}' já existe", name)));
        }

        self.subjects.push(Subject {
            name: name.to_string(),
            chapters: Vec::new(),
        });
        Ok(())
    }

    /// Renomeia um assunto existente.
    pub fn rename_subject(&mut self, old_name: &str, new_name: &str) -> PulsoResult<()> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(PulsoError::other("nome de assunto não pode ser vazio"));
        }
        if self.subjects.iter().any(|s| s.name == new_name) {
            return Err(PulsoError::other(format!("assunto '{}' já existe", new_name)));
        }

        let subject = self.subject_mut(old_name)?;
        subject.name = new_name.to_string();
        Ok(())
    }

    /// Adiciona um capítulo a um assunto.
    pub fn add_chapter(&mut self, subject: &str, name: &str) -> PulsoResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PulsoError::other("nome de capítulo não pode ser vazio"));
        }

        let subject = self.subject_mut(subject)?;
        if subject.chapters.iter().any(|c| c.name == name) {
            return Err(PulsoError::other(format!("capítulo '{}' já existe", name)));
        }

        subject.chapters.push(Chapter {
            name: name.to_string(),
            topics: Vec::new(),
        });
        Ok(())
    }

    /// Adiciona um tópico a um capítulo.
    pub fn add_topic(&mut self, subject: &str, chapter: &str, name: &str) -> PulsoResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PulsoError::other("nome de tópico não pode ser vazio"));
        }

        let chapter_name = chapter.to_string();
        let chapter = self.chapter_mut(subject, chapter)?;
        if chapter.topics.iter().any(|t| t.name == name) {
            return Err(PulsoError::other(format!(
                "tópico '{}' já existe em '{}'",
                name, chapter_name
            )));
        }

        chapter.topics.push(Topic {
            name: name.to_string(),
            attachments: Vec::new(),
        });
        Ok(())
    }

    /// Anexa uma imagem a um tópico, respeitando o limite de tamanho.
    ///
    /// Retorna o ID do anexo (hash do conteúdo).
    pub fn attach(
        &mut self,
        subject: &str,
        chapter: &str,
        topic: &str,
        file_name: &str,
        bytes: &[u8],
        max_bytes: usize,
    ) -> PulsoResult<String> {
        if bytes.len() > max_bytes {
            return Err(PulsoError::AttachmentTooLarge {
                size: bytes.len(),
                limit: max_bytes,
            });
        }

        let topic = self.topic_mut(subject, chapter, topic)?;
        let attachment = Attachment::from_bytes(file_name, bytes);
        let id = attachment.id.clone();
        topic.attachments.push(attachment);
        Ok(id)
    }

    /// Remove um anexo pelo ID, devolvendo-o.
    pub fn remove_attachment(
        &mut self,
        subject: &str,
        chapter: &str,
        topic: &str,
        attachment_id: &str,
    ) -> PulsoResult<Attachment> {
        let topic_name = topic.to_string();
        let topic = self.topic_mut(subject, chapter, topic)?;

        let position = topic
            .attachments
            .iter()
            .position(|a| a.id == attachment_id)
            .ok_or_else(|| {
                PulsoError::other(format!(
                    "anexo '{}' não encontrado em '{}'",
                    attachment_id, topic_name
                ))
            })?;

        Ok(topic.attachments.remove(position))
    }

    fn subject_mut(&mut self, name: &str) -> PulsoResult<&mut Subject> {
        self.subjects
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| PulsoError::SubjectNotFound(name.to_string()))
    }

    fn chapter_mut(&mut self, subject: &str, chapter: &str) -> PulsoResult<&mut Chapter> {
        let subject_name = subject.to_string();
        let subject = self.subject_mut(subject)?;
        subject
            .chapters
            .iter_mut()
            .find(|c| c.name == chapter)
            .ok_or_else(|| PulsoError::ChapterNotFound(chapter.to_string(), subject_name))
    }

    fn topic_mut(&mut self, subject: &str, chapter: &str, topic: &str) -> PulsoResult<&mut Topic> {
        let chapter_name = chapter.to_string();
        let chapter = self.chapter_mut(subject, chapter)?;
        chapter
            .topics
            .iter_mut()
            .find(|t| t.name == topic)
            .ok_or_else(|| PulsoError::TopicNotFound(topic.to_string(), chapter_name))
    }
}
