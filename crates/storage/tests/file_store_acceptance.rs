use shared::domain::{Cylinder, CylinderKind, CylinderNumber};
use storage::{Storage, INVENTORY_KEY};

#[test]
fn truncated_inventory_file_is_ignored_on_startup() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = Storage::open(dir.path()).expect("open");

    let cylinder = Cylinder::new(
        CylinderNumber::new(150).expect("number"),
        CylinderKind::Big,
        chrono::Utc::now(),
    );
    storage.save_inventory(&[cylinder]).expect("save");

    let path = dir.path().join("cylinder_inventory.json");
    let raw = std::fs::read_to_string(&path).expect("read");
    std::fs::write(&path, &raw[..raw.len() / 2]).expect("truncate");

    let reopened = Storage::open(dir.path()).expect("reopen");
    assert!(reopened.load_inventory().is_empty());

    // A fresh save replaces the damaged document.
    reopened.save_inventory(&[]).expect("save empty");
    assert_eq!(
        reopened.snapshot(INVENTORY_KEY).expect("get").as_deref(),
        Some("[]")
    );
}
