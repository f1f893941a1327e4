use std::collections::HashSet;

use chrono::Utc;
use shared::{
    domain::{
        Cylinder, CylinderId, CylinderKind, CylinderNumber, DeliveryId, DeliveryRecord,
        NewDeliveryRecord,
    },
    error::{TrackerError, TrackerResult},
};
use storage::{Storage, HISTORY_KEY};
use tracing::{error, info, warn};

pub mod config;
pub mod customers;
pub mod delivery;
pub mod history;
pub mod keypad;
pub mod message;
pub mod reset;
pub mod share;

pub use customers::CustomerDirectory;
pub use delivery::DeliveryDraft;
pub use history::{HistoryQuery, SortOrder};
pub use keypad::{EntryRejection, KeypadEntry, KeypadKey, PickupDraft};
pub use reset::ResetChallenge;
pub use share::ShareTarget;

/// Headline numbers shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InventorySummary {
    pub small_stock: usize,
    pub big_stock: usize,
    pub total_delivered: usize,
}

/// The single shared store behind every view: live inventory plus delivery history.
///
/// Every mutation writes the affected collection(s) to storage first and only then
/// updates the in-memory copy, so a failed write leaves both sides unchanged.
pub struct InventoryStore {
    storage: Storage,
    inventory: Vec<Cylinder>,
    history: Vec<DeliveryRecord>,
}

impl InventoryStore {
    pub fn open(storage: Storage) -> Self {
        let inventory = storage.load_inventory();
        let history = storage.load_history();
        info!(
            cylinders = inventory.len(),
            deliveries = history.len(),
            "inventory store loaded"
        );
        Self {
            storage,
            inventory,
            history,
        }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn inventory(&self) -> &[Cylinder] {
        &self.inventory
    }

    /// Newest delivery first.
    pub fn history(&self) -> &[DeliveryRecord] {
        &self.history
    }

    pub fn cylinders_of(&self, kind: CylinderKind) -> impl Iterator<Item = &Cylinder> + '_ {
        self.inventory.iter().filter(move |c| c.kind == kind)
    }

    pub fn inventory_numbers(&self) -> HashSet<CylinderNumber> {
        self.inventory.iter().map(|c| c.number).collect()
    }

    pub fn find_by_number(&self, number: CylinderNumber) -> Option<&Cylinder> {
        self.inventory.iter().find(|c| c.number == number)
    }

    /// Looks a delivery up by the leading characters of its id.
    pub fn find_delivery(&self, id_prefix: &str) -> TrackerResult<&DeliveryRecord> {
        let prefix = id_prefix.trim().to_ascii_lowercase();
        if prefix.is_empty() {
            return Err(TrackerError::validation("delivery id must not be empty"));
        }

        let mut matches = self
            .history
            .iter()
            .filter(|record| record.id.to_string().starts_with(&prefix));
        match (matches.next(), matches.next()) {
            (Some(record), None) => Ok(record),
            (Some(_), Some(_)) => Err(TrackerError::validation(format!(
                "delivery id prefix '{prefix}' is ambiguous"
            ))),
            (None, _) => Err(TrackerError::not_found(format!(
                "no delivery with id starting '{prefix}'"
            ))),
        }
    }

    pub fn summary(&self) -> InventorySummary {
        InventorySummary {
            small_stock: self.cylinders_of(CylinderKind::Small).count(),
            big_stock: self.cylinders_of(CylinderKind::Big).count(),
            total_delivered: self.history.iter().map(DeliveryRecord::total_delivered).sum(),
        }
    }

    pub fn add_cylinders(
        &mut self,
        numbers: &[CylinderNumber],
        kind: CylinderKind,
    ) -> TrackerResult<Vec<CylinderId>> {
        self.add_batches(&[(kind, numbers)])
    }

    /// Moves every pending number of the draft into inventory, Small before Big.
    pub fn complete_pickup(&mut self, draft: &PickupDraft) -> TrackerResult<Vec<CylinderId>> {
        if draft.is_empty() {
            return Err(TrackerError::validation(
                "Add at least one cylinder number before confirming the pickup.",
            ));
        }
        let added = self.add_batches(&[
            (CylinderKind::Small, draft.numbers(CylinderKind::Small)),
            (CylinderKind::Big, draft.numbers(CylinderKind::Big)),
        ])?;
        info!(
            small = draft.numbers(CylinderKind::Small).len(),
            big = draft.numbers(CylinderKind::Big).len(),
            "pickup added to inventory"
        );
        Ok(added)
    }

    fn add_batches(
        &mut self,
        batches: &[(CylinderKind, &[CylinderNumber])],
    ) -> TrackerResult<Vec<CylinderId>> {
        let mut seen = self.inventory_numbers();
        let now = Utc::now();
        let mut staged = Vec::new();

        for (kind, numbers) in batches {
            for &number in numbers.iter() {
                if self.find_by_number(number).is_some() {
                    return Err(TrackerError::duplicate(format!(
                        "Number {number} already in inventory"
                    )));
                }
                if !seen.insert(number) {
                    return Err(TrackerError::duplicate(format!(
                        "Number {number} is listed more than once"
                    )));
                }
                staged.push(Cylinder::new(number, *kind, now));
            }
        }

        if staged.is_empty() {
            return Ok(Vec::new());
        }

        let ids = staged.iter().map(|c| c.id).collect();
        let mut next = self.inventory.clone();
        next.extend(staged);
        self.commit_inventory(next)?;
        Ok(ids)
    }

    /// Removes exactly the cylinders carrying `ids`; unknown ids are ignored.
    pub fn remove_cylinders(&mut self, ids: &[CylinderId]) -> TrackerResult<usize> {
        let ids: HashSet<CylinderId> = ids.iter().copied().collect();
        let next: Vec<Cylinder> = self
            .inventory
            .iter()
            .filter(|c| !ids.contains(&c.id))
            .cloned()
            .collect();
        let removed = self.inventory.len() - next.len();
        self.commit_inventory(next)?;
        Ok(removed)
    }

    pub fn add_delivery_record(&mut self, record: NewDeliveryRecord) -> TrackerResult<DeliveryId> {
        let record = DeliveryRecord::from_new(DeliveryId::generate(), record);
        let id = record.id;
        let next = prepend(record, &self.history);
        self.storage.save_history(&next)?;
        self.history = next;
        Ok(id)
    }

    /// Records one delivery for the selected cylinders and takes them out of inventory.
    ///
    /// Either the new record is appended and every selected cylinder removed, or nothing
    /// changes: validation happens up front and a failed inventory write rolls the history
    /// entry back.
    pub fn complete_delivery(
        &mut self,
        customer_name: &str,
        address: &str,
        ids: &[CylinderId],
    ) -> TrackerResult<DeliveryRecord> {
        let customer_name = customer_name.trim();
        if customer_name.is_empty() || ids.is_empty() {
            return Err(TrackerError::validation(delivery::DELIVERY_INCOMPLETE));
        }

        let selected: HashSet<CylinderId> = ids.iter().copied().collect();
        if let Some(missing) = selected
            .iter()
            .find(|id| !self.inventory.iter().any(|c| c.id == **id))
        {
            return Err(TrackerError::not_found(format!(
                "cylinder {missing} is no longer in inventory"
            )));
        }

        let (delivered_small, delivered_big) =
            delivery::partition_numbers(&self.inventory, |c| selected.contains(&c.id));
        let record = DeliveryRecord {
            id: DeliveryId::generate(),
            customer_name: customer_name.to_string(),
            address: address.trim().to_string(),
            delivered_small,
            delivered_big,
            timestamp: Utc::now(),
        };

        let next_history = prepend(record.clone(), &self.history);
        let next_inventory: Vec<Cylinder> = self
            .inventory
            .iter()
            .filter(|c| !selected.contains(&c.id))
            .cloned()
            .collect();

        let history_snapshot = self.storage.snapshot(HISTORY_KEY)?;
        self.storage.save_history(&next_history)?;
        if let Err(err) = self.storage.save_inventory(&next_inventory) {
            if let Err(restore_err) = self
                .storage
                .restore(HISTORY_KEY, history_snapshot.as_deref())
            {
                error!(%restore_err, "failed to roll back delivery history after inventory write failure");
            }
            return Err(err.into());
        }

        self.history = next_history;
        self.inventory = next_inventory;
        info!(
            delivery_id = %record.id,
            customer = %record.customer_name,
            small = record.delivered_small.len(),
            big = record.delivered_big.len(),
            "delivery completed"
        );
        Ok(record)
    }

    pub fn deliver(&mut self, draft: &DeliveryDraft) -> TrackerResult<DeliveryRecord> {
        draft.validate()?;
        self.complete_delivery(&draft.customer_name, &draft.address, &draft.selected_ids())
    }

    pub fn clear_inventory(&mut self) -> TrackerResult<()> {
        self.commit_inventory(Vec::new())?;
        warn!("inventory cleared");
        Ok(())
    }

    /// End-of-day reset: wipes inventory, history and both stored entries, but only for
    /// the correct answer to `challenge`.
    pub fn reset_all(&mut self, challenge: &ResetChallenge, answer: &str) -> TrackerResult<()> {
        if let Err(err) = challenge.verify(answer) {
            warn!("reset rejected: verification answer did not match");
            return Err(err);
        }
        self.storage.clear()?;
        self.inventory.clear();
        self.history.clear();
        warn!("inventory and delivery history reset");
        Ok(())
    }

    fn commit_inventory(&mut self, next: Vec<Cylinder>) -> TrackerResult<()> {
        self.storage.save_inventory(&next)?;
        self.inventory = next;
        Ok(())
    }
}

fn prepend(record: DeliveryRecord, history: &[DeliveryRecord]) -> Vec<DeliveryRecord> {
    let mut next = Vec::with_capacity(history.len() + 1);
    next.push(record);
    next.extend_from_slice(history);
    next
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
