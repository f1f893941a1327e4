use std::{fs, io, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use shared::domain::Customer;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
struct CustomerFile {
    #[serde(default)]
    customers: Vec<Customer>,
}

/// Known customers offered in the delivery form.
///
/// Loaded from a TOML file of the form:
///
/// ```toml
/// [[customers]]
/// id = "sharma"
/// name = "Sharma Traders"
/// address = "12 Mill Road"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDirectory {
    customers: Vec<Customer>,
}

impl CustomerDirectory {
    pub fn new(customers: Vec<Customer>) -> Self {
        Self { customers }
    }

    /// A missing file yields an empty directory; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no customer directory file");
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read customers from '{}'", path.display()))
            }
        };
        Self::from_toml_str(&raw)
            .with_context(|| format!("failed to parse customers in '{}'", path.display()))
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let file: CustomerFile = toml::from_str(raw)?;
        let mut seen = std::collections::HashSet::new();
        for customer in &file.customers {
            if customer.name.trim().is_empty() {
                anyhow::bail!("customer '{}' has an empty name", customer.id);
            }
            if !seen.insert(customer.id.as_str()) {
                anyhow::bail!("customer id '{}' appears more than once", customer.id);
            }
        }
        Ok(Self::new(file.customers))
    }

    pub fn get(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Customer> + '_ {
        self.customers.iter()
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_directory_and_looks_up_by_id() {
        let directory = CustomerDirectory::from_toml_str(
            r#"
            [[customers]]
            id = "sharma"
            name = "Sharma Traders"
            address = "12 Mill Road"

            [[customers]]
            id = "walkin"
            name = "Walk-in"
            "#,
        )
        .expect("parse");

        assert_eq!(directory.len(), 2);
        let walkin = directory.get("walkin").expect("walk-in");
        assert_eq!(walkin.address, "");
        assert!(directory.get("missing").is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = CustomerDirectory::from_toml_str(
            r#"
            [[customers]]
            id = "a"
            name = "One"
            [[customers]]
            id = "a"
            name = "Two"
            "#,
        )
        .expect_err("duplicate");
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn missing_file_is_an_empty_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let directory =
            CustomerDirectory::load(&dir.path().join("customers.toml")).expect("load");
        assert!(directory.is_empty());
    }
}
