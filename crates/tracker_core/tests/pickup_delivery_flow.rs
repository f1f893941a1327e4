use chrono::NaiveDate;
use shared::domain::{CylinderKind, CylinderNumber};
use storage::Storage;
use tracker_core::{
    message, share::DEFAULT_SHARE_BASE_URL, CustomerDirectory, DeliveryDraft, HistoryQuery,
    InventoryStore, KeypadKey, PickupDraft, ShareTarget,
};

fn type_number(draft: &mut PickupDraft, kind: CylinderKind, digits: &[u8], store: &InventoryStore) {
    let inventory = store.inventory_numbers();
    for &digit in digits {
        draft
            .press(kind, KeypadKey::Digit(digit), &inventory)
            .expect("digit");
    }
    draft
        .press(kind, KeypadKey::Add, &inventory)
        .expect("add")
        .expect("number added");
}

#[test]
fn day_of_pickups_and_deliveries_persists_across_restarts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let customers = CustomerDirectory::from_toml_str(
        r#"
        [[customers]]
        id = "sharma"
        name = "Sharma Traders"
        address = "12 Mill Road"
        "#,
    )
    .expect("customers");

    let mut store = InventoryStore::open(Storage::open(dir.path()).expect("open"));

    let mut pickup = PickupDraft::default();
    type_number(&mut pickup, CylinderKind::Small, &[5], &store);
    type_number(&mut pickup, CylinderKind::Small, &[1, 2], &store);
    type_number(&mut pickup, CylinderKind::Big, &[7], &store);

    let at = NaiveDate::from_ymd_opt(2025, 3, 5)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .expect("date");
    let text = message::pickup_message(
        pickup.numbers(CylinderKind::Small),
        pickup.numbers(CylinderKind::Big),
        at,
    );
    let link = ShareTarget::parse(DEFAULT_SHARE_BASE_URL)
        .expect("share target")
        .link(&text);
    assert!(link.starts_with("https://wa.me/?text=Date%3A%2005%2F03%2F2025%0ASmall%20Cylinder"));

    store.complete_pickup(&pickup).expect("pickup");
    assert_eq!(store.summary().small_stock, 2);
    assert_eq!(store.summary().big_stock, 1);

    let mut delivery = DeliveryDraft::default();
    delivery.select_customer(&customers, Some("sharma"));
    for value in [12, 7] {
        let number = CylinderNumber::new(value).expect("number");
        let cylinder = store.find_by_number(number).expect("in stock");
        delivery.toggle(cylinder.id);
    }
    let preview = delivery
        .preview(store.inventory(), at)
        .expect("preview");
    assert!(preview.contains("Big No.s: 7\nSmall No.s: 12\n"));

    let record = store.deliver(&delivery).expect("deliver");
    assert_eq!(record.customer_name, "Sharma Traders");
    drop(store);

    let store = InventoryStore::open(Storage::open(dir.path()).expect("reopen"));
    let remaining: Vec<_> = store.inventory().iter().map(|c| c.number.value()).collect();
    assert_eq!(remaining, [5]);

    let found = HistoryQuery {
        search: "mill".to_string(),
        ..HistoryQuery::default()
    }
    .apply(store.history());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, record.id);
    assert_eq!(
        message::record_message(found[0]),
        message::record_message(&record)
    );
}
