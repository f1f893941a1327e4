use shared::domain::DeliveryRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            Self::NewestFirst => Self::OldestFirst,
            Self::OldestFirst => Self::NewestFirst,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NewestFirst => "Newest",
            Self::OldestFirst => "Oldest",
        }
    }
}

/// Search and ordering applied to the delivery history view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    pub search: String,
    pub order: SortOrder,
}

impl HistoryQuery {
    pub fn matches(&self, record: &DeliveryRecord) -> bool {
        let term = self.search.trim().to_lowercase();
        term.is_empty()
            || record.customer_name.to_lowercase().contains(&term)
            || record.address.to_lowercase().contains(&term)
    }

    pub fn apply<'a>(&self, history: &'a [DeliveryRecord]) -> Vec<&'a DeliveryRecord> {
        let mut result: Vec<&DeliveryRecord> =
            history.iter().filter(|record| self.matches(record)).collect();
        match self.order {
            SortOrder::NewestFirst => result.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
            SortOrder::OldestFirst => result.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::{CylinderNumber, DeliveryId};

    fn record(name: &str, address: &str, timestamp: &str) -> DeliveryRecord {
        DeliveryRecord {
            id: DeliveryId::generate(),
            customer_name: name.to_string(),
            address: address.to_string(),
            delivered_small: vec![CylinderNumber::new(1).expect("number")],
            delivered_big: Vec::new(),
            timestamp: timestamp.parse().expect("timestamp"),
        }
    }

    #[test]
    fn searches_name_and_address_case_insensitively() {
        let history = vec![
            record("Sharma Traders", "12 Mill Road", "2025-03-05T10:00:00Z"),
            record("Hotel Blue", "Station Road", "2025-03-04T10:00:00Z"),
            record("Walk-in", "", "2025-03-03T10:00:00Z"),
        ];

        let by_name = HistoryQuery {
            search: "SHARMA".to_string(),
            ..HistoryQuery::default()
        };
        assert_eq!(by_name.apply(&history).len(), 1);

        let by_address = HistoryQuery {
            search: "road".to_string(),
            ..HistoryQuery::default()
        };
        assert_eq!(by_address.apply(&history).len(), 2);

        assert_eq!(HistoryQuery::default().apply(&history).len(), 3);
    }

    #[test]
    fn orders_by_timestamp_in_both_directions() {
        let history = vec![
            record("b", "", "2025-03-04T10:00:00Z"),
            record("c", "", "2025-03-05T10:00:00Z"),
            record("a", "", "2025-03-03T10:00:00Z"),
        ];

        let mut query = HistoryQuery::default();
        let names: Vec<_> = query
            .apply(&history)
            .iter()
            .map(|r| r.customer_name.as_str())
            .collect();
        assert_eq!(names, ["c", "b", "a"]);

        query.order = query.order.toggled();
        let names: Vec<_> = query
            .apply(&history)
            .iter()
            .map(|r| r.customer_name.as_str())
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(query.order.label(), "Oldest");
    }
}
