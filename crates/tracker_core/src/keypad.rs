//! Number entry for the pickup flow: the on-screen keypad and the two pending lists.

use std::collections::HashSet;

use shared::{
    domain::{CylinderKind, CylinderNumber, CylinderNumberError},
    error::TrackerError,
};
use thiserror::Error;

pub const MAX_ENTRY_DIGITS: usize = 3;
/// Highest value the keypad lets the operator type.
pub const MAX_KEYPAD_VALUE: u32 = 199;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadKey {
    Digit(u8),
    Delete,
    Add,
}

impl KeypadKey {
    pub const PER_ROW: usize = 4;
    /// Button order as laid out on screen, `PER_ROW` keys per row.
    pub const LAYOUT: [KeypadKey; 12] = [
        KeypadKey::Digit(1),
        KeypadKey::Digit(2),
        KeypadKey::Digit(3),
        KeypadKey::Digit(4),
        KeypadKey::Digit(5),
        KeypadKey::Digit(6),
        KeypadKey::Digit(7),
        KeypadKey::Digit(8),
        KeypadKey::Digit(9),
        KeypadKey::Digit(0),
        KeypadKey::Delete,
        KeypadKey::Add,
    ];

    pub fn label(self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Delete => "DEL".to_string(),
            Self::Add => "ADD".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryRejection {
    #[error("Enter a cylinder number")]
    Empty,
    #[error("Cylinder numbers are digits only")]
    NotNumeric,
    #[error("Number must be between 1 and 200")]
    OutOfRange,
    #[error("Number already in this list")]
    DuplicateInList,
    #[error("Number already in the other list")]
    DuplicateInOtherList,
    #[error("Number already in inventory")]
    AlreadyInInventory,
}

impl From<EntryRejection> for TrackerError {
    fn from(value: EntryRejection) -> Self {
        match value {
            EntryRejection::Empty | EntryRejection::NotNumeric | EntryRejection::OutOfRange => {
                TrackerError::validation(value.to_string())
            }
            EntryRejection::DuplicateInList
            | EntryRejection::DuplicateInOtherList
            | EntryRejection::AlreadyInInventory => TrackerError::duplicate(value.to_string()),
        }
    }
}

/// Digits typed so far for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeypadEntry {
    buffer: String,
}

impl KeypadEntry {
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// A leading zero is never allowed and the running value stays at or below 199.
    pub fn is_digit_enabled(&self, digit: u8) -> bool {
        if digit > 9 || self.buffer.len() >= MAX_ENTRY_DIGITS {
            return false;
        }
        if self.buffer.is_empty() && digit == 0 {
            return false;
        }
        let current: u32 = self.buffer.parse().unwrap_or(0);
        current * 10 + u32::from(digit) <= MAX_KEYPAD_VALUE
    }

    /// Only digits are gated by the entry; Delete always works and Add waits for a digit.
    pub fn is_key_enabled(&self, key: KeypadKey) -> bool {
        match key {
            KeypadKey::Digit(digit) => self.is_digit_enabled(digit),
            KeypadKey::Delete => true,
            KeypadKey::Add => !self.is_empty(),
        }
    }

    pub fn push_digit(&mut self, digit: u8) -> bool {
        if !self.is_digit_enabled(digit) {
            return false;
        }
        self.buffer.push(char::from(b'0' + digit));
        true
    }

    pub fn delete(&mut self) {
        self.buffer.pop();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

/// The two pending lists of a pickup before it is confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupDraft {
    small: Vec<CylinderNumber>,
    big: Vec<CylinderNumber>,
    small_entry: KeypadEntry,
    big_entry: KeypadEntry,
    active: Option<CylinderKind>,
}

impl Default for PickupDraft {
    fn default() -> Self {
        Self {
            small: Vec::new(),
            big: Vec::new(),
            small_entry: KeypadEntry::default(),
            big_entry: KeypadEntry::default(),
            active: Some(CylinderKind::Small),
        }
    }
}

impl PickupDraft {
    pub fn numbers(&self, kind: CylinderKind) -> &[CylinderNumber] {
        match kind {
            CylinderKind::Small => &self.small,
            CylinderKind::Big => &self.big,
        }
    }

    fn numbers_mut(&mut self, kind: CylinderKind) -> &mut Vec<CylinderNumber> {
        match kind {
            CylinderKind::Small => &mut self.small,
            CylinderKind::Big => &mut self.big,
        }
    }

    pub fn entry(&self, kind: CylinderKind) -> &KeypadEntry {
        match kind {
            CylinderKind::Small => &self.small_entry,
            CylinderKind::Big => &self.big_entry,
        }
    }

    fn entry_mut(&mut self, kind: CylinderKind) -> &mut KeypadEntry {
        match kind {
            CylinderKind::Small => &mut self.small_entry,
            CylinderKind::Big => &mut self.big_entry,
        }
    }

    pub fn active(&self) -> Option<CylinderKind> {
        self.active
    }

    pub fn set_active(&mut self, kind: Option<CylinderKind>) {
        self.active = kind;
    }

    pub fn is_empty(&self) -> bool {
        self.small.is_empty() && self.big.is_empty()
    }

    pub fn total(&self) -> usize {
        self.small.len() + self.big.len()
    }

    /// Validates `input` and appends the normalized number to the `kind` list.
    ///
    /// Checks run in order: range, same list, sibling list, live inventory.
    pub fn try_add(
        &mut self,
        kind: CylinderKind,
        input: &str,
        inventory: &HashSet<CylinderNumber>,
    ) -> Result<CylinderNumber, EntryRejection> {
        let number = parse_entry(input)?;

        if self.numbers(kind).contains(&number) {
            return Err(EntryRejection::DuplicateInList);
        }
        if self.numbers(kind.sibling()).contains(&number) {
            return Err(EntryRejection::DuplicateInOtherList);
        }
        if inventory.contains(&number) {
            return Err(EntryRejection::AlreadyInInventory);
        }

        self.numbers_mut(kind).push(number);
        Ok(number)
    }

    /// Applies a keypad press to the `kind` field.
    ///
    /// Returns the number added by `Add`, `None` for every other accepted key. A rejected
    /// `Add` keeps the typed digits so the operator can correct them.
    pub fn press(
        &mut self,
        kind: CylinderKind,
        key: KeypadKey,
        inventory: &HashSet<CylinderNumber>,
    ) -> Result<Option<CylinderNumber>, EntryRejection> {
        match key {
            KeypadKey::Digit(d) => {
                self.entry_mut(kind).push_digit(d);
                Ok(None)
            }
            KeypadKey::Delete => {
                self.entry_mut(kind).delete();
                Ok(None)
            }
            KeypadKey::Add => {
                if self.entry(kind).is_empty() {
                    return Ok(None);
                }
                let input = self.entry(kind).as_str().to_string();
                let number = self.try_add(kind, &input, inventory)?;
                self.entry_mut(kind).clear();
                Ok(Some(number))
            }
        }
    }

    pub fn remove(&mut self, kind: CylinderKind, index: usize) -> Option<CylinderNumber> {
        let numbers = self.numbers_mut(kind);
        (index < numbers.len()).then(|| numbers.remove(index))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn parse_entry(input: &str) -> Result<CylinderNumber, EntryRejection> {
    if input.trim().is_empty() {
        return Err(EntryRejection::Empty);
    }
    input.parse().map_err(|err| match err {
        CylinderNumberError::OutOfRange(_) => EntryRejection::OutOfRange,
        CylinderNumberError::NotNumeric(_) | CylinderNumberError::UnknownKind(_) => {
            EntryRejection::NotNumeric
        }
    })
}

#[cfg(test)]
#[path = "tests/keypad_tests.rs"]
mod tests;
