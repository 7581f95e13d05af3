//! Testes de integração do caderno de notas.

#![cfg(feature = "sqlite")]

use pulso::notes::{Notebook, NotesStore};
use pulso::PulsoError;
use tempfile::TempDir;

#[test]
fn test_notebook_persists_across_reopen() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("notes.db");

    {
        let store = NotesStore::open(&db_path).unwrap();
        let mut notebook = Notebook::new();
        notebook.add_subject("Physics").unwrap();
        notebook.add_chapter("Physics", "Mechanics").unwrap();
        notebook.add_topic("Physics", "Mechanics", "Kinematics").unwrap();
        store.save_notebook(&notebook).unwrap();
    }

    // Reabre o mesmo arquivo
    let store = NotesStore::open(&db_path).unwrap();
    let loaded = store.load_notebook().unwrap();

    assert_eq!(loaded.subjects().len(), 1);
    assert_eq!(loaded.subjects()[0].chapters[0].topics[0].name, "Kinematics");
}

#[test]
fn test_fresh_database_seeds_default_subjects() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = NotesStore::open(temp_dir.path().join("notes.db")).unwrap();

    let notebook = store.load_notebook().unwrap();

    assert_eq!(notebook.subjects().len(), 10);
    assert!(notebook.subjects().iter().any(|s| s.name == "Computer Science"));
}

#[test]
fn test_open_creates_parent_directories() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let nested = temp_dir.path().join("a").join("b").join("notes.db");

    let store = NotesStore::open(&nested).unwrap();
    store.set("k", "v").unwrap();

    assert!(nested.exists());
}

#[test]
fn test_attachment_survives_persistence() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("notes.db");
    let image_bytes = b"\x89PNG\r\n\x1a\nfake image payload";

    let id = {
        let store = NotesStore::open(&db_path).unwrap();
        let mut notebook = Notebook::new();
        notebook.add_subject("Biology").unwrap();
        notebook.add_chapter("Biology", "Cells").unwrap();
        notebook.add_topic("Biology", "Cells", "Mitosis").unwrap();

        let id = notebook
            .attach("Biology", "Cells", "Mitosis", "diagram.png", image_bytes, 1024)
            .unwrap();
        store.save_notebook(&notebook).unwrap();
        id
    };

    let store = NotesStore::open(&db_path).unwrap();
    let loaded = store.load_notebook().unwrap();
    let attachment = &loaded.subjects()[0].chapters[0].topics[0].attachments[0];

    assert_eq!(attachment.id, id);
    assert_eq!(attachment.mime_type, "image/png");
    assert_eq!(attachment.decoded_bytes().unwrap(), image_bytes);
}

#[test]
fn test_oversized_attachment_rejected_and_not_persisted() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = NotesStore::open(temp_dir.path().join("notes.db")).unwrap();

    let mut notebook = Notebook::new();
    notebook.add_subject("Physics").unwrap();
    notebook.add_chapter("Physics", "Optics").unwrap();
    notebook.add_topic("Physics", "Optics", "Lenses").unwrap();

    let oversized = vec![0u8; 128];
    let result = notebook.attach("Physics", "Optics", "Lenses", "big.png", &oversized, 64);

    assert!(matches!(result, Err(PulsoError::AttachmentTooLarge { .. })));

    store.save_notebook(&notebook).unwrap();
    let loaded = store.load_notebook().unwrap();
    assert!(loaded.subjects()[0].chapters[0].topics[0].attachments.is_empty());
}

#[test]
fn test_mutations_follow_tree_contracts() {
    let mut notebook = Notebook::with_default_subjects();

    // Pai inexistente é rejeitado em todos os níveis
    assert!(matches!(
        notebook.add_chapter("Astrology", "Signs"),
        Err(PulsoError::SubjectNotFound(_))
    ));
    assert!(matches!(
        notebook.add_topic("Physics", "Nope", "Topic"),
        Err(PulsoError::ChapterNotFound(_, _))
    ));

    notebook.add_chapter("Physics", "Mechanics").unwrap();
    assert!(matches!(
        notebook.attach("Physics", "Mechanics", "Nope", "a.png", b"x", 1024),
        Err(PulsoError::TopicNotFound(_, _))
    ));
}
