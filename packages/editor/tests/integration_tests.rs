//! Integration tests for editor crate

use pagecraft_common::MockFileSystem;
use pagecraft_document::DocumentError;
use pagecraft_editor::{Catalog, DocumentNode, EditSession, EditorConfig, EditorError, Mutation};
use pagecraft_serializer::SerializeError;
use std::path::{Path, PathBuf};

fn session() -> EditSession {
    EditSession::new(Catalog::builtin().unwrap(), EditorConfig::default())
}

fn names(session: &EditSession) -> Vec<String> {
    session
        .document()
        .nodes()
        .map(|n| n.name().to_string())
        .collect()
}

#[test]
fn test_session_starts_with_skeleton() {
    let session = session();

    assert_eq!(names(&session), vec!["html", "head", "title", "link", "body"]);
    assert_eq!(session.selection(), session.document().body());
    assert_eq!(session.version(), 0);
    assert!(!session.is_dirty());
}

#[test]
fn test_catalog_palette_order() {
    let session = session();
    let palette: Vec<&str> = session.catalog().map(|t| t.name()).collect();

    assert_eq!(palette.first(), Some(&"a"));
    assert_eq!(palette.last(), Some(&"Text"));
}

#[test]
fn test_editing_workflow() {
    let mut session = session();
    let body = session.document().body().unwrap();

    let div = session.insert_child(body, "div").unwrap();
    assert_eq!(session.selection(), Some(div));

    let p = session.insert_at_selection("p").unwrap();
    assert_eq!(session.document().parent_of(p).unwrap().id(), div);

    session.set_attribute(p, "class", "lead").unwrap();
    session.set_stylesheet(".lead { font-weight: bold; }").unwrap();

    assert_eq!(session.version(), 4);
    assert!(session.is_dirty());
    assert_eq!(session.document().attribute(p, "class").unwrap(), "lead");
    assert_eq!(
        session.document().stylesheet_text(),
        ".lead { font-weight: bold; }"
    );
}

#[test]
fn test_illegal_insert_leaves_session_unchanged() {
    let mut session = session();
    let head = session.document().head().unwrap();
    let before = session.document().root().clone();

    let err = session.insert_child(head, "p").unwrap_err();

    assert!(matches!(
        err,
        EditorError::Document(DocumentError::IllegalPlacement { .. })
    ));
    assert_eq!(session.document().root(), &before);
    assert_eq!(session.version(), 0);
    assert!(!session.is_dirty());
}

#[test]
fn test_unknown_attribute_is_reported() {
    let mut session = session();
    let body = session.document().body().unwrap();
    let p = session.insert_child(body, "p").unwrap();

    assert!(matches!(
        session.set_attribute(p, "onclick", "x()"),
        Err(EditorError::Document(DocumentError::UnknownAttribute { .. }))
    ));
}

#[test]
fn test_legal_tags_for_node() {
    let session = session();
    let head = session.document().head().unwrap();

    let tags = session.legal_tags_for(head).unwrap();

    assert_eq!(tags, vec!["link", "meta"]);
}

#[test]
fn test_serialize_then_deserialize() {
    let mut session = session();
    let body = session.document().body().unwrap();
    let ul = session.insert_child(body, "ul").unwrap();
    let li = session.insert_child(ul, "li").unwrap();
    session.set_attribute(li, "id", "item-1").unwrap();
    session.set_stylesheet("li { list-style: none; }").unwrap();

    let payload = session.serialize().unwrap();
    let before: Vec<String> = names(&session);

    session.new_document();
    assert_eq!(session.document().node_count(), 5);

    session.deserialize(&payload).unwrap();

    assert_eq!(names(&session), before);
    assert_eq!(
        session.document().stylesheet_text(),
        "li { list-style: none; }"
    );
    let li = session
        .document()
        .nodes()
        .find(|n| n.name() == "li")
        .map(DocumentNode::id)
        .unwrap();
    assert_eq!(session.document().attribute(li, "id").unwrap(), "item-1");
    assert!(!session.is_dirty());
}

#[test]
fn test_rejected_payload_keeps_current_document() {
    let mut session = session();
    let body = session.document().body().unwrap();
    session.insert_child(body, "p").unwrap();

    let err = session
        .deserialize(r#"{"tag_tree": [], "css_content": ""}"#)
        .unwrap_err();

    assert!(matches!(
        err,
        EditorError::Serialize(SerializeError::CorruptTree(_))
    ));
    assert_eq!(session.document().node_count(), 6);
}

#[test]
fn test_save_and_load_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page.json");
    let mut session = session();
    let body = session.document().body().unwrap();
    let h1 = session.insert_child(body, "h1").unwrap();
    let text = session.insert_child(h1, "Text").unwrap();
    session.set_attribute(text, "text", "Hello").unwrap();

    session.save(&path).unwrap();
    assert!(!session.is_dirty());

    let mut other = self::session();
    other.load(&path).unwrap();

    assert_eq!(names(&other), names(&session));
}

#[test]
fn test_failed_save_stays_dirty() {
    let mut session = session().with_file_system(Box::new(MockFileSystem::read_only()));
    session.set_stylesheet("p {}").unwrap();

    let err = session.save(Path::new("page.json")).unwrap_err();

    assert!(matches!(
        err,
        EditorError::Serialize(SerializeError::Persistence { .. })
    ));
    assert!(session.is_dirty());
}

#[test]
fn test_export_to_configured_dir() {
    let dir = tempfile::tempdir().unwrap();
    let config = EditorConfig {
        export_dir: dir.path().display().to_string(),
        ..EditorConfig::default()
    };
    let mut session = EditSession::new(Catalog::builtin().unwrap(), config);
    let body = session.document().body().unwrap();
    session.insert_child(body, "p").unwrap();
    session.set_stylesheet("p { color: teal; }").unwrap();

    let site = session.export().unwrap();

    let html = std::fs::read_to_string(&site.html_path).unwrap();
    assert!(html.contains("<p></p>"));
    assert_eq!(
        std::fs::read_to_string(&site.css_path).unwrap(),
        "p { color: teal; }"
    );

    session.set_stylesheet("p { color: navy; }").unwrap();
    let css_path = session.export_stylesheet().unwrap();
    assert_eq!(
        std::fs::read_to_string(css_path).unwrap(),
        "p { color: navy; }"
    );
}

#[test]
fn test_from_config_loads_catalog_file() {
    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("tags.json");
    std::fs::write(
        &catalog_path,
        r#"{"tags": [{"tag": "p", "has_closing_tag": "true", "attributes": [], "legal_parents": ["body"]}]}"#,
    )
    .unwrap();

    let config = EditorConfig {
        catalog_path: catalog_path.display().to_string(),
        ..EditorConfig::default()
    };
    let session = EditSession::from_config(config).unwrap();

    assert_eq!(session.catalog().count(), 1);
}

#[test]
fn test_from_config_with_missing_catalog() {
    let config = EditorConfig {
        catalog_path: "/nonexistent/tags.json".to_string(),
        ..EditorConfig::default()
    };

    assert!(matches!(
        EditSession::from_config(config),
        Err(EditorError::Document(DocumentError::CatalogFormat(_)))
    ));
}

#[test]
fn test_mutation_wire_format() {
    let json = r#"{"InsertChild": {"parent": 4, "tag_name": "p"}}"#;
    let mutation: Mutation = serde_json::from_str(json).unwrap();

    let mut session = session();
    let result = session.apply(mutation).unwrap();

    assert_eq!(result.version, 1);
    let inserted = result.inserted.unwrap();
    assert_eq!(session.document().parent_of(inserted).unwrap().name(), "body");
}

#[test]
fn test_handles_from_before_deserialize_do_not_resolve() {
    let mut source = session();
    let body = source.document().body().unwrap();
    source.insert_child(body, "div").unwrap();
    let payload = source.serialize().unwrap();

    let mut session = session();
    let body = session.document().body().unwrap();
    let p = session.insert_child(body, "p").unwrap();

    session.deserialize(&payload).unwrap();

    assert!(session.document().node(p).is_none());
    assert!(matches!(
        session.set_attribute(p, "class", "clobbered"),
        Err(EditorError::Document(DocumentError::NodeNotFound(_)))
    ));
    assert!(!session.serialize().unwrap().contains("clobbered"));
}

#[test]
fn test_handles_from_before_load_do_not_resolve() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page.json");
    let mut source = session();
    let body = source.document().body().unwrap();
    source.insert_child(body, "div").unwrap();
    source.save(&path).unwrap();

    let mut session = session();
    let body = session.document().body().unwrap();
    let p = session.insert_child(body, "p").unwrap();

    session.load(&path).unwrap();

    assert!(!session.document().contains(p));
    assert!(!session.document().contains(body));
    assert!(session.select(p).is_err());
}

#[test]
fn test_from_config_with_mock_file_system() {
    let mut fs = MockFileSystem::new();
    fs.add_file(
        PathBuf::from("tags.json"),
        r#"{"tags": [{"tag": "p", "has_closing_tag": "true", "attributes": ["class"], "legal_parents": ["body"]}]}"#,
    );
    let config = EditorConfig {
        catalog_path: "tags.json".to_string(),
        ..EditorConfig::default()
    };

    let mut session = EditSession::from_config_with(config, Box::new(fs)).unwrap();
    let body = session.document().body().unwrap();
    session.insert_child(body, "p").unwrap();

    assert_eq!(session.catalog().count(), 1);
    session.save(Path::new("page.json")).unwrap();
    assert!(!session.is_dirty());

    let missing = EditSession::from_config_with(
        EditorConfig {
            catalog_path: "missing.json".to_string(),
            ..EditorConfig::default()
        },
        Box::new(MockFileSystem::new()),
    );
    assert!(matches!(
        missing,
        Err(EditorError::Document(DocumentError::CatalogFormat(_)))
    ));
}
