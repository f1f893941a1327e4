use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use shared::{
    domain::{Cylinder, CylinderId, CylinderKind, CylinderNumber},
    error::{TrackerError, TrackerResult},
};

use crate::{customers::CustomerDirectory, message};

pub const DELIVERY_INCOMPLETE: &str =
    "Please enter customer name and select at least one cylinder.";

/// Delivery form state: who receives it and which cylinders are picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryDraft {
    pub customer_id: Option<String>,
    pub customer_name: String,
    pub address: String,
    selected: BTreeSet<CylinderId>,
}

impl DeliveryDraft {
    /// Prefills name and address from the directory; `None` clears both.
    pub fn select_customer(&mut self, directory: &CustomerDirectory, customer_id: Option<&str>) {
        match customer_id.and_then(|id| directory.get(id)) {
            Some(customer) => {
                self.customer_id = Some(customer.id.clone());
                self.customer_name = customer.name.clone();
                self.address = customer.address.clone();
            }
            None => {
                self.customer_id = None;
                self.customer_name.clear();
                self.address.clear();
            }
        }
    }

    /// Flips the selection of `id`; returns whether it is now selected.
    pub fn toggle(&mut self, id: CylinderId) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    pub fn select(&mut self, id: CylinderId) {
        self.selected.insert(id);
    }

    pub fn is_selected(&self, id: CylinderId) -> bool {
        self.selected.contains(&id)
    }

    pub fn selection_len(&self) -> usize {
        self.selected.len()
    }

    pub fn selected_ids(&self) -> Vec<CylinderId> {
        self.selected.iter().copied().collect()
    }

    /// Drops selections whose cylinder has left the inventory.
    pub fn retain_available(&mut self, inventory: &[Cylinder]) {
        self.selected
            .retain(|id| inventory.iter().any(|cylinder| cylinder.id == *id));
    }

    pub fn validate(&self) -> TrackerResult<()> {
        if self.customer_name.trim().is_empty() || self.selected.is_empty() {
            return Err(TrackerError::validation(DELIVERY_INCOMPLETE));
        }
        Ok(())
    }

    /// Selected numbers split by kind, in inventory order.
    pub fn partition(&self, inventory: &[Cylinder]) -> (Vec<CylinderNumber>, Vec<CylinderNumber>) {
        partition_numbers(inventory, |c| self.selected.contains(&c.id))
    }

    pub fn preview(&self, inventory: &[Cylinder], at: NaiveDateTime) -> TrackerResult<String> {
        self.validate()?;
        let (small, big) = self.partition(inventory);
        Ok(message::delivery_message(&message::DeliverySummary {
            customer_name: self.customer_name.trim(),
            address: self.address.trim(),
            small: &small,
            big: &big,
            at,
        }))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

pub(crate) fn partition_numbers(
    inventory: &[Cylinder],
    mut include: impl FnMut(&Cylinder) -> bool,
) -> (Vec<CylinderNumber>, Vec<CylinderNumber>) {
    let mut small = Vec::new();
    let mut big = Vec::new();
    for cylinder in inventory {
        if !include(cylinder) {
            continue;
        }
        match cylinder.kind {
            CylinderKind::Small => small.push(cylinder.number),
            CylinderKind::Big => big.push(cylinder.number),
        }
    }
    (small, big)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::Customer;

    fn cylinder(value: u16, kind: CylinderKind) -> Cylinder {
        Cylinder::new(
            CylinderNumber::new(value).expect("number"),
            kind,
            chrono::Utc::now(),
        )
    }

    fn directory() -> CustomerDirectory {
        CustomerDirectory::new(vec![Customer {
            id: "c1".to_string(),
            name: "Sharma Traders".to_string(),
            address: "12 Mill Road".to_string(),
        }])
    }

    #[test]
    fn selecting_a_customer_prefills_and_deselecting_clears() {
        let mut draft = DeliveryDraft::default();
        draft.select_customer(&directory(), Some("c1"));
        assert_eq!(draft.customer_name, "Sharma Traders");
        assert_eq!(draft.address, "12 Mill Road");

        draft.select_customer(&directory(), None);
        assert_eq!(draft.customer_id, None);
        assert!(draft.customer_name.is_empty());
        assert!(draft.address.is_empty());
    }

    #[test]
    fn requires_name_and_selection() {
        let inventory = vec![cylinder(5, CylinderKind::Small)];
        let mut draft = DeliveryDraft::default();
        draft.toggle(inventory[0].id);
        let err = draft.validate().expect_err("missing name");
        assert_eq!(err.message, DELIVERY_INCOMPLETE);

        draft.customer_name = "Walk-in".to_string();
        draft.validate().expect("valid");

        assert!(!draft.toggle(inventory[0].id));
        assert!(draft.validate().is_err());
    }

    #[test]
    fn preview_lists_numbers_by_kind_in_inventory_order() {
        let inventory = vec![
            cylinder(12, CylinderKind::Small),
            cylinder(7, CylinderKind::Big),
            cylinder(5, CylinderKind::Small),
            cylinder(9, CylinderKind::Big),
        ];
        let mut draft = DeliveryDraft {
            customer_name: "Acme".to_string(),
            ..DeliveryDraft::default()
        };
        draft.toggle(inventory[2].id);
        draft.toggle(inventory[0].id);
        draft.toggle(inventory[1].id);

        let at = chrono::NaiveDate::from_ymd_opt(2025, 3, 5)
            .and_then(|d| d.and_hms_opt(14, 7, 0))
            .expect("date");
        let text = draft.preview(&inventory, at).expect("preview");
        assert!(text.contains("Small No.s: 12, 5"));
        assert!(text.contains("Big No.s: 7"));
        assert!(text.contains("Address: N/A"));
    }

    #[test]
    fn retain_available_drops_delivered_selections() {
        let inventory = vec![cylinder(1, CylinderKind::Small)];
        let gone = cylinder(2, CylinderKind::Big);
        let mut draft = DeliveryDraft::default();
        draft.select(inventory[0].id);
        draft.select(gone.id);

        draft.retain_available(&inventory);
        assert_eq!(draft.selected_ids(), vec![inventory[0].id]);
    }
}
