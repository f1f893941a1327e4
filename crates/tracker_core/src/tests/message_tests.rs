use super::*;
use chrono::NaiveDate;
use shared::domain::DeliveryId;

fn numbers(values: &[u16]) -> Vec<CylinderNumber> {
    values
        .iter()
        .map(|v| CylinderNumber::new(*v).expect("number"))
        .collect()
}

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 5)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("date")
}

#[test]
fn pickup_message_matches_template() {
    let text = pickup_message(&numbers(&[5, 12]), &numbers(&[7]), at(9, 30));
    assert_eq!(
        text,
        "Date: 05/03/2025\n\
         Small Cylinder : 2 Qty\n\
         Big Cylinder : 1 Qty\n\
         Small Cylinder No.s : 5, 12\n\
         Big Cylinder No.s: 7"
    );
}

#[test]
fn pickup_message_with_one_empty_list_keeps_the_line() {
    let text = pickup_message(&numbers(&[3]), &[], at(9, 30));
    assert!(text.ends_with("Big Cylinder No.s: "));
    assert!(text.contains("Big Cylinder : 0 Qty"));
}

#[test]
fn delivery_message_matches_template() {
    let text = delivery_message(&DeliverySummary {
        customer_name: "Acme",
        address: "",
        small: &numbers(&[5]),
        big: &[],
        at: at(14, 7),
    });
    assert_eq!(
        text,
        "Customer Name: Acme\n\
         Address: N/A\n\
         Small delivered: 1 Qty\n\
         Big delivered: 0 Qty\n\
         Big No.s: None\n\
         Small No.s: 5\n\
         Date and Time of Delivery: 05/03/2025 14:07"
    );
}

#[test]
fn record_message_uses_the_record_timestamp() {
    let timestamp = "2025-03-05T14:07:00Z".parse().expect("timestamp");
    let record = DeliveryRecord {
        id: DeliveryId::generate(),
        customer_name: "Hotel Blue".to_string(),
        address: "Station Road".to_string(),
        delivered_small: numbers(&[1, 2]),
        delivered_big: numbers(&[150]),
        timestamp,
    };

    let expected_date = local_wall_time(timestamp)
        .format(DELIVERY_DATE_FORMAT)
        .to_string();
    let text = record_message(&record);
    assert!(text.starts_with("Customer Name: Hotel Blue\nAddress: Station Road\n"));
    assert!(text.contains("Big No.s: 150\nSmall No.s: 1, 2\n"));
    assert!(text.ends_with(&format!("Date and Time of Delivery: {expected_date}")));
}

#[test]
fn history_timestamp_uses_month_abbreviation() {
    let timestamp = "2025-03-15T12:00:00Z".parse().expect("timestamp");
    let rendered = history_timestamp(timestamp);
    let expected = local_wall_time(timestamp)
        .format("%d %b %Y, %H:%M")
        .to_string();
    assert_eq!(rendered, expected);
    assert!(rendered.contains("Mar 2025"));
}
