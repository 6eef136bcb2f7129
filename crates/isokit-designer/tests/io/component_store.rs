use isokit_designer::{ComponentLibrary, JsonFileStore, LibraryError, MemoryStore};
use tempfile::TempDir;

use crate::common::{abc, library};

#[test]
fn test_json_store_survives_reopen() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("library").join("components.json");
    let shapes = library();

    let id = {
        let mut lib = ComponentLibrary::open(JsonFileStore::new(&path)).expect("open empty");
        assert!(lib.is_empty());
        lib.create_component("pair", "A with B", &abc()[..2], &shapes, false)
            .expect("create")
            .id
            .clone()
    };
    assert!(path.exists());

    let reopened = ComponentLibrary::open(JsonFileStore::new(&path)).expect("reopen");
    let pair = reopened.get(&id).expect("persisted");
    assert_eq!(pair.name, "pair");
    assert_eq!(pair.description, "A with B");
    assert_eq!(pair.diagram_components.len(), 2);
    assert!(pair.diagram_components[0].relative_to_id.is_none());
    assert!(!pair.attachment_points.is_empty());
}

#[test]
fn test_every_mutation_persists() {
    let store = MemoryStore::new();
    let mut lib = ComponentLibrary::new(store.clone());
    let shapes = library();

    let id = lib
        .create_component("tower", "", &abc(), &shapes, false)
        .expect("create")
        .id
        .clone();
    lib.rename(&id, "spire").expect("rename");
    lib.update_description(&id, "tall").expect("describe");
    assert_eq!(store.save_count(), 3);
    assert_eq!(store.snapshot()[0].name, "spire");

    lib.delete(&id).expect("delete");
    assert!(store.snapshot().is_empty());
    assert!(matches!(lib.delete(&id), Err(LibraryError::NotFound { .. })));
    assert_eq!(store.save_count(), 4);
}

#[test]
fn test_persist_failure_keeps_memory_state() {
    let dir = TempDir::new().expect("tempdir");
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "file").expect("write");
    let path = blocker.join("components.json");

    let mut lib = ComponentLibrary::new(JsonFileStore::new(&path));
    let created = lib.create_component("pair", "", &abc(), &library(), false);
    assert!(created.is_ok());
    assert_eq!(lib.len(), 1);
    assert!(!path.exists());
}

#[test]
fn test_export_import_between_libraries() {
    let shapes = library();
    let mut source = ComponentLibrary::in_memory();
    source
        .create_component("tower", "", &abc(), &shapes, false)
        .expect("create");
    let json = source.export_json().expect("export");

    let mut target = ComponentLibrary::in_memory();
    assert_eq!(target.import_json(&json, false).expect("import"), 1);
    // same id again is a replacement, not a name clash
    assert_eq!(target.import_json(&json, false).expect("reimport"), 1);
    assert_eq!(target.len(), 1);

    let mut clashing = ComponentLibrary::in_memory();
    clashing
        .create_component("tower", "", &abc()[..1], &shapes, false)
        .expect("create");
    assert_eq!(clashing.import_json(&json, false).expect("skip"), 0);
    assert_eq!(clashing.import_json(&json, true).expect("overwrite"), 1);
    assert_eq!(clashing.len(), 1);
    assert_eq!(
        clashing.get_by_name("tower").map(|c| c.diagram_components.len()),
        Some(3)
    );
}
