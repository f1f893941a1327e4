use super::*;

fn inventory(values: &[u16]) -> HashSet<CylinderNumber> {
    values
        .iter()
        .map(|v| CylinderNumber::new(*v).expect("number"))
        .collect()
}

#[test]
fn leading_zero_is_disabled() {
    let entry = KeypadEntry::default();
    assert!(!entry.is_digit_enabled(0));
    assert!(entry.is_digit_enabled(1));
}

#[test]
fn digits_that_would_exceed_199_are_disabled() {
    let mut entry = KeypadEntry::default();
    assert!(entry.push_digit(1));
    assert!(entry.push_digit(9));
    assert!(entry.is_digit_enabled(9));
    assert!(entry.push_digit(9));
    assert_eq!(entry.as_str(), "199");
    assert!(!entry.is_digit_enabled(0));

    let mut entry = KeypadEntry::default();
    assert!(entry.push_digit(2));
    assert!(entry.is_digit_enabled(0));
    assert!(entry.push_digit(0));
    assert!(!entry.is_digit_enabled(0), "200 is not reachable from the keypad");
    assert_eq!(entry.as_str(), "20");
}

#[test]
fn delete_removes_last_digit() {
    let mut entry = KeypadEntry::default();
    entry.push_digit(4);
    entry.push_digit(2);
    entry.delete();
    assert_eq!(entry.as_str(), "4");
    entry.delete();
    entry.delete();
    assert!(entry.is_empty());
}

#[test]
fn rejects_out_of_range_values() {
    let mut draft = PickupDraft::default();
    let inv = inventory(&[]);
    assert_eq!(
        draft.try_add(CylinderKind::Small, "0", &inv),
        Err(EntryRejection::OutOfRange)
    );
    assert_eq!(
        draft.try_add(CylinderKind::Small, "201", &inv),
        Err(EntryRejection::OutOfRange)
    );
    assert_eq!(
        draft.try_add(CylinderKind::Small, "", &inv),
        Err(EntryRejection::Empty)
    );
    assert_eq!(
        draft.try_add(CylinderKind::Small, "1a", &inv),
        Err(EntryRejection::NotNumeric)
    );
    assert!(draft.is_empty());
}

#[test]
fn normalizes_before_duplicate_checks() {
    let mut draft = PickupDraft::default();
    let inv = inventory(&[]);
    draft
        .try_add(CylinderKind::Small, "5", &inv)
        .expect("first add");
    assert_eq!(
        draft.try_add(CylinderKind::Small, "05", &inv),
        Err(EntryRejection::DuplicateInList)
    );
}

#[test]
fn duplicate_checks_run_in_order() {
    let mut draft = PickupDraft::default();
    let inv = inventory(&[40]);
    draft.try_add(CylinderKind::Small, "5", &inv).expect("add");
    draft.try_add(CylinderKind::Big, "6", &inv).expect("add");

    assert_eq!(
        draft.try_add(CylinderKind::Small, "5", &inv),
        Err(EntryRejection::DuplicateInList)
    );
    assert_eq!(
        draft.try_add(CylinderKind::Small, "6", &inv),
        Err(EntryRejection::DuplicateInOtherList)
    );
    assert_eq!(
        draft.try_add(CylinderKind::Big, "40", &inv),
        Err(EntryRejection::AlreadyInInventory)
    );
}

#[test]
fn cross_list_example_accepts_seven_but_not_five() {
    let mut draft = PickupDraft::default();
    let inv = inventory(&[]);
    draft.try_add(CylinderKind::Small, "5", &inv).expect("5");
    draft.try_add(CylinderKind::Small, "12", &inv).expect("12");

    assert_eq!(
        draft.try_add(CylinderKind::Big, "5", &inv),
        Err(EntryRejection::DuplicateInOtherList)
    );
    draft.try_add(CylinderKind::Big, "7", &inv).expect("7");

    assert_eq!(draft.total(), 3);
    assert_eq!(
        draft.numbers(CylinderKind::Small),
        &[
            CylinderNumber::new(5).expect("5"),
            CylinderNumber::new(12).expect("12")
        ]
    );
}

#[test]
fn keypad_add_clears_entry_only_on_success() {
    let mut draft = PickupDraft::default();
    let inv = inventory(&[12]);

    draft
        .press(CylinderKind::Small, KeypadKey::Digit(1), &inv)
        .expect("digit");
    draft
        .press(CylinderKind::Small, KeypadKey::Digit(2), &inv)
        .expect("digit");
    assert_eq!(
        draft.press(CylinderKind::Small, KeypadKey::Add, &inv),
        Err(EntryRejection::AlreadyInInventory)
    );
    assert_eq!(draft.entry(CylinderKind::Small).as_str(), "12");

    draft
        .press(CylinderKind::Small, KeypadKey::Delete, &inv)
        .expect("delete");
    draft
        .press(CylinderKind::Small, KeypadKey::Digit(3), &inv)
        .expect("digit");
    let added = draft
        .press(CylinderKind::Small, KeypadKey::Add, &inv)
        .expect("add");
    assert_eq!(added, Some(CylinderNumber::new(13).expect("13")));
    assert!(draft.entry(CylinderKind::Small).is_empty());
}

#[test]
fn add_with_empty_entry_is_a_no_op() {
    let mut draft = PickupDraft::default();
    let added = draft
        .press(CylinderKind::Big, KeypadKey::Add, &inventory(&[]))
        .expect("no-op");
    assert_eq!(added, None);
    assert!(draft.is_empty());
}

#[test]
fn delete_is_always_enabled_and_a_no_op_on_empty_entry() {
    let mut draft = PickupDraft::default();
    let entry = draft.entry(CylinderKind::Small);
    assert!(entry.is_key_enabled(KeypadKey::Delete));
    assert!(!entry.is_key_enabled(KeypadKey::Add));
    assert!(!entry.is_key_enabled(KeypadKey::Digit(0)));

    let pressed = draft
        .press(CylinderKind::Small, KeypadKey::Delete, &inventory(&[]))
        .expect("delete");
    assert_eq!(pressed, None);
    assert!(draft.entry(CylinderKind::Small).is_empty());
}

#[test]
fn layout_rows_end_with_delete_and_add() {
    assert_eq!(KeypadKey::LAYOUT.len() % KeypadKey::PER_ROW, 0);
    let last_row: Vec<_> = KeypadKey::LAYOUT
        .chunks(KeypadKey::PER_ROW)
        .last()
        .expect("rows")
        .to_vec();
    assert_eq!(
        last_row,
        [
            KeypadKey::Digit(9),
            KeypadKey::Digit(0),
            KeypadKey::Delete,
            KeypadKey::Add
        ]
    );
}

#[test]
fn entries_are_kept_per_field() {
    let mut draft = PickupDraft::default();
    let inv = inventory(&[]);
    draft
        .press(CylinderKind::Small, KeypadKey::Digit(4), &inv)
        .expect("digit");
    draft
        .press(CylinderKind::Big, KeypadKey::Digit(8), &inv)
        .expect("digit");
    assert_eq!(draft.entry(CylinderKind::Small).as_str(), "4");
    assert_eq!(draft.entry(CylinderKind::Big).as_str(), "8");
}

#[test]
fn remove_drops_pending_entry_by_index() {
    let mut draft = PickupDraft::default();
    let inv = inventory(&[]);
    draft.try_add(CylinderKind::Big, "9", &inv).expect("9");
    draft.try_add(CylinderKind::Big, "10", &inv).expect("10");

    assert_eq!(
        draft.remove(CylinderKind::Big, 0),
        Some(CylinderNumber::new(9).expect("9"))
    );
    assert_eq!(draft.remove(CylinderKind::Big, 5), None);
    assert_eq!(draft.numbers(CylinderKind::Big).len(), 1);
}

#[test]
fn rejections_map_to_tracker_error_codes() {
    use shared::error::ErrorCode;

    let err: TrackerError = EntryRejection::OutOfRange.into();
    assert_eq!(err.code, ErrorCode::Validation);
    assert_eq!(err.message, "Number must be between 1 and 200");

    let err: TrackerError = EntryRejection::DuplicateInOtherList.into();
    assert_eq!(err.code, ErrorCode::Duplicate);
}
