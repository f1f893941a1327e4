//! Text payloads shared with the messaging app.

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use shared::domain::{CylinderNumber, DeliveryRecord};

pub const PICKUP_DATE_FORMAT: &str = "%d/%m/%Y";
pub const DELIVERY_DATE_FORMAT: &str = "%d/%m/%Y %H:%M";
pub const HISTORY_DATE_FORMAT: &str = "%d %b %Y, %H:%M";

pub fn join_numbers(numbers: &[CylinderNumber]) -> String {
    numbers
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_or(numbers: &[CylinderNumber], fallback: &str) -> String {
    if numbers.is_empty() {
        fallback.to_string()
    } else {
        join_numbers(numbers)
    }
}

/// Wall-clock time on this device for a stored UTC instant.
pub fn local_wall_time(timestamp: DateTime<Utc>) -> NaiveDateTime {
    timestamp.with_timezone(&Local).naive_local()
}

pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn history_timestamp(timestamp: DateTime<Utc>) -> String {
    local_wall_time(timestamp)
        .format(HISTORY_DATE_FORMAT)
        .to_string()
}

pub fn pickup_message(
    small: &[CylinderNumber],
    big: &[CylinderNumber],
    at: NaiveDateTime,
) -> String {
    format!(
        "Date: {date}\n\
         Small Cylinder : {small_qty} Qty\n\
         Big Cylinder : {big_qty} Qty\n\
         Small Cylinder No.s : {small_list}\n\
         Big Cylinder No.s: {big_list}",
        date = at.format(PICKUP_DATE_FORMAT),
        small_qty = small.len(),
        big_qty = big.len(),
        small_list = join_numbers(small),
        big_list = join_numbers(big),
    )
}

#[derive(Debug, Clone, Copy)]
pub struct DeliverySummary<'a> {
    pub customer_name: &'a str,
    pub address: &'a str,
    pub small: &'a [CylinderNumber],
    pub big: &'a [CylinderNumber],
    pub at: NaiveDateTime,
}

pub fn delivery_message(summary: &DeliverySummary<'_>) -> String {
    let address = if summary.address.is_empty() {
        "N/A"
    } else {
        summary.address
    };
    format!(
        "Customer Name: {name}\n\
         Address: {address}\n\
         Small delivered: {small_qty} Qty\n\
         Big delivered: {big_qty} Qty\n\
         Big No.s: {big_list}\n\
         Small No.s: {small_list}\n\
         Date and Time of Delivery: {date}",
        name = summary.customer_name,
        small_qty = summary.small.len(),
        big_qty = summary.big.len(),
        big_list = join_or(summary.big, "None"),
        small_list = join_or(summary.small, "None"),
        date = summary.at.format(DELIVERY_DATE_FORMAT),
    )
}

/// Rebuilds the delivery message for a stored record, dated at its own timestamp.
pub fn record_message(record: &DeliveryRecord) -> String {
    delivery_message(&DeliverySummary {
        customer_name: &record.customer_name,
        address: &record.address,
        small: &record.delivered_small,
        big: &record.delivered_big,
        at: local_wall_time(record.timestamp),
    })
}

#[cfg(test)]
#[path = "tests/message_tests.rs"]
mod tests;
