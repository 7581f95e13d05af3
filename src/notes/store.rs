//! Persistência do caderno de notas.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use super::tree::Notebook;
use crate::PulsoResult;

/// Chave sob a qual o caderno serializado é guardado.
const NOTEBOOK_KEY: &str = "notebook";

/// Armazenamento chave-valor síncrono para o caderno.
///
/// O caderno inteiro é serializado como JSON e guardado sob uma única
/// chave em uma tabela SQLite, espelhando um armazenamento local de
/// navegador: get/set síncronos de texto, sem esquema por nó.
pub struct NotesStore {
    conn: Connection,
}

impl NotesStore {
    /// Abre (ou cria) o banco no caminho dado.
    pub fn open<P: AsRef<Path>>(path: P) -> PulsoResult<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Abre um banco em memória (útil em testes).
    pub fn open_in_memory() -> PulsoResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> PulsoResult<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
        "#,
        )?;

        Ok(Self { conn })
    }

    /// Lê o valor de uma chave.
    pub fn get(&self, key: &str) -> PulsoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Grava (ou sobrescreve) o valor de uma chave.
    pub fn set(&self, key: &str, value: &str) -> PulsoResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3
        "#,
            params![key, value, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Carrega o caderno persistido.
    ///
    /// Um banco novo devolve o caderno semeado com os assuntos padrão.
    pub fn load_notebook(&self) -> PulsoResult<Notebook> {
        match self.get(NOTEBOOK_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Notebook::with_default_subjects()),
        }
    }

    /// Persiste o caderno completo.
    pub fn save_notebook(&self, notebook: &Notebook) -> PulsoResult<()> {
        let json = serde_json::to_string(notebook)?;
        self.set(NOTEBOOK_KEY, &json)
    }
}
