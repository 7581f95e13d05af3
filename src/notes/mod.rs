//! Caderno de notas de estudo.
//!
//! Hierarquia tipada de assunto → capítulo → tópico → anexos de imagem,
//! persistida como texto serializado em um armazenamento chave-valor
//! síncrono (SQLite). O analisador não depende deste módulo.

mod tree;

#[cfg(feature = "sqlite")]
mod store;

pub use tree::{Attachment, Chapter, Notebook, Subject, Topic, DEFAULT_SUBJECTS};

#[cfg(feature = "sqlite")]
pub use store::NotesStore;
