use crate::domain::{
    Account, Bank, Beneficiary, Branch, Card, CardStatement, Customer, Employee, Loan,
    LoanStatement, PenaltyRate, Transaction,
};
use serde::de::{DeserializeOwned, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

/// An entity table keyed by integer id.
///
/// The on-disk format keys records by strings; keys composed entirely of
/// decimal digits become integer ids, anything else is ignored rather than
/// rejected. Iteration is in ascending id order, which is the deterministic
/// order used wherever "first match wins".
#[derive(Debug, Clone, PartialEq)]
pub struct Table<T> {
    rows: BTreeMap<u32, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next id: `max(existing ids) + 1`, or 1 when empty.
    /// Not safe under concurrent callers; the engine runs operations to
    /// completion one at a time.
    pub fn next_id(&self) -> u32 {
        self.rows.keys().next_back().map_or(1, |max| max + 1)
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut T> {
        self.rows.get_mut(&id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn insert(&mut self, id: u32, row: T) {
        self.rows.insert(id, row);
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.rows.values_mut()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T: Serialize> Serialize for Table<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Integer keys render as JSON strings, matching the source format.
        self.rows.serialize(serializer)
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Table<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor<T>(PhantomData<T>);

        impl<'de, T: DeserializeOwned> Visitor<'de> for TableVisitor<T> {
            type Value = Table<T>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of numeric string ids to records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut rows = BTreeMap::new();
                while let Some(key) = map.next_key::<String>()? {
                    if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
                        if let Ok(id) = key.parse::<u32>() {
                            rows.insert(id, map.next_value()?);
                            continue;
                        }
                    }
                    map.next_value::<IgnoredAny>()?;
                }
                Ok(Table { rows })
            }
        }

        deserializer.deserialize_map(TableVisitor(PhantomData))
    }
}

/// The in-memory dataset the engine mutates in place. Owned by the calling
/// environment for the duration of one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub customers: Table<Customer>,
    #[serde(default)]
    pub accounts: Table<Account>,
    #[serde(default)]
    pub cards: Table<Card>,
    #[serde(default)]
    pub loans: Table<Loan>,
    #[serde(default)]
    pub beneficiaries: Table<Beneficiary>,
    #[serde(default)]
    pub transactions: Table<Transaction>,
    #[serde(default)]
    pub card_statements: Table<CardStatement>,
    #[serde(default)]
    pub loan_statements: Table<LoanStatement>,
    #[serde(default)]
    pub penalty_rates: Table<PenaltyRate>,
    #[serde(default)]
    pub branches: Table<Branch>,
    #[serde(default)]
    pub banks: Table<Bank>,
    #[serde(default)]
    pub employees: Table<Employee>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_id_is_one_for_empty_table() {
        let table: Table<u32> = Table::new();
        assert_eq!(table.next_id(), 1);
    }

    #[test]
    fn next_id_is_max_plus_one() {
        let mut table = Table::new();
        table.insert(3, "a");
        table.insert(7, "b");
        table.insert(5, "c");
        assert_eq!(table.next_id(), 8);
    }

    #[test]
    fn sequential_allocations_are_strictly_increasing() {
        let mut table = Table::new();
        let mut previous = 0;
        for _ in 0..5 {
            let id = table.next_id();
            assert_eq!(id, previous + 1);
            table.insert(id, ());
            previous = id;
        }
    }

    #[test]
    fn deserialize_ignores_non_numeric_keys() {
        let json = r#"{"1": 10, "two": 20, "3": 30, "": 40, "4x": 50}"#;
        let table: Table<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1), Some(&10));
        assert_eq!(table.get(3), Some(&30));
        assert_eq!(table.next_id(), 4);
    }

    #[test]
    fn serialize_writes_string_keys() {
        let mut table = Table::new();
        table.insert(2, 20);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"2":20}"#);
    }

    #[test]
    fn dataset_tables_default_to_empty() {
        let data: Dataset = serde_json::from_str(r#"{"accounts": {}}"#).unwrap();
        assert!(data.accounts.is_empty());
        assert!(data.loans.is_empty());
        assert_eq!(data.transactions.next_id(), 1);
    }
}
