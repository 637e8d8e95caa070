//! Record stores and the JSON dataset snapshot.
//!
//! Mutations are whole-record replacements with last-write-wins semantics. The calculation core
//! never touches a store; callers hand it the listed slices.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LedgerError, Result};
use crate::records::{Client, Expense, Loan, Record};

/// list/add/update/delete over one record kind
pub trait RecordStore<T: Record> {
    /// records in insertion order
    fn list(&self) -> &[T];
    fn get(&self, id: Uuid) -> Option<&T>;
    fn add(&mut self, record: T) -> Result<()>;
    /// all or nothing: a duplicate anywhere in the batch rejects the whole batch
    fn add_many(&mut self, records: Vec<T>) -> Result<()>;
    /// full replacement of the record with the same id
    fn update(&mut self, record: T) -> Result<()>;
    fn delete(&mut self, id: Uuid) -> Result<T>;

    fn len(&self) -> usize {
        self.list().len()
    }

    fn is_empty(&self) -> bool {
        self.list().is_empty()
    }

    fn contains(&self, id: Uuid) -> bool {
        self.get(id).is_some()
    }
}

/// vector-backed store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemoryStore<T> {
    records: Vec<T>,
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self { records: Vec::new() }
    }
}

impl<T: Record> InMemoryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<T>) -> Result<Self> {
        let mut store = Self::new();
        store.add_many(records)?;
        Ok(store)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut T> {
        self.records.iter_mut().find(|r| r.id() == id)
    }

    pub fn into_records(self) -> Vec<T> {
        self.records
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }
}

impl<T: Record> RecordStore<T> for InMemoryStore<T> {
    fn list(&self) -> &[T] {
        &self.records
    }

    fn get(&self, id: Uuid) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    fn add(&mut self, record: T) -> Result<()> {
        let (kind, id) = (T::KIND, record.id());
        if self.contains(id) {
            return Err(LedgerError::DuplicateId { kind, id });
        }
        self.records.push(record);
        tracing::info!(kind = %kind, %id, "record added");
        Ok(())
    }

    fn add_many(&mut self, records: Vec<T>) -> Result<()> {
        let mut seen: HashSet<Uuid> = self.records.iter().map(Record::id).collect();
        for record in &records {
            let id = record.id();
            if !seen.insert(id) {
                return Err(LedgerError::DuplicateId { kind: T::KIND, id });
            }
        }
        let (kind, count) = (T::KIND, records.len());
        self.records.extend(records);
        tracing::info!(kind = %kind, count, "records added");
        Ok(())
    }

    fn update(&mut self, record: T) -> Result<()> {
        let (kind, id) = (T::KIND, record.id());
        let slot = self
            .get_mut(id)
            .ok_or(LedgerError::NotFound { kind, id })?;
        *slot = record;
        tracing::info!(kind = %kind, %id, "record updated");
        Ok(())
    }

    fn delete(&mut self, id: Uuid) -> Result<T> {
        let kind = T::KIND;
        let index = self
            .position(id)
            .ok_or(LedgerError::NotFound { kind, id })?;
        let removed = self.records.remove(index);
        tracing::info!(kind = %kind, %id, "record deleted");
        Ok(removed)
    }
}

/// every stored collection, as persisted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub loans: Vec<Loan>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl Dataset {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// write to a sibling temp file, then rename it over `path`; a failed save leaves the
    /// previous file untouched
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = self.to_json()?;
        let tmp = tmp_path(path);
        write_file(&tmp, &json)?;
        if let Err(err) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }
        tracing::info!(
            path = %path.display(),
            clients = self.clients.len(),
            loans = self.loans.len(),
            expenses = self.expenses.len(),
            "dataset saved"
        );
        Ok(())
    }

    /// a file that does not exist yet loads as an empty dataset
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no dataset file, starting empty");
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)?;
        let dataset = Self::from_json(&data)?;
        for warning in dataset.warnings() {
            tracing::warn!(path = %path.display(), "{warning}");
        }
        Ok(dataset)
    }

    /// dangling references and payment anomalies; none of them block loading
    pub fn warnings(&self) -> Vec<String> {
        let client_ids: HashSet<Uuid> = self.clients.iter().map(|c| c.id).collect();
        let mut warnings = Vec::new();

        for loan in &self.loans {
            if !client_ids.contains(&loan.client_id) {
                warnings.push(format!(
                    "loan {} references unknown client {}",
                    loan.id, loan.client_id
                ));
            }
            if loan.is_paid() && loan.paid_at.is_none() {
                warnings.push(format!("loan {} is paid without a payment date", loan.id));
            }
        }
        warnings
    }
}

const TMP_SUFFIX: &str = "tmp";

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;
    use crate::records::LoanTerms;
    use crate::types::{LoanStatus, RecordKind};
    use chrono::{NaiveDate, Utc};
    use tempfile::tempdir;

    fn client(name: &str) -> Client {
        Client::new(name, "11 99999-0000", Utc::now())
    }

    #[test]
    fn test_add_list_preserves_order() {
        let mut store = InMemoryStore::new();
        store.add(client("Ana")).unwrap();
        store.add(client("Bia")).unwrap();
        store.add(client("Caio")).unwrap();

        let names: Vec<&str> = store.list().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Bia", "Caio"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut store = InMemoryStore::new();
        let ana = client("Ana");
        store.add(ana.clone()).unwrap();
        let err = store.add(ana).unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateId { kind: RecordKind::Client, .. }));
    }

    #[test]
    fn test_add_many_is_all_or_nothing() {
        let mut store = InMemoryStore::new();
        let ana = client("Ana");
        let result = store.add_many(vec![ana.clone(), client("Bia"), ana]);
        assert!(result.is_err());
        assert!(store.is_empty());

        store.add_many(vec![client("Caio"), client("Duda")]).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_update_replaces_whole_record() {
        let mut store = InMemoryStore::new();
        let ana = client("Ana").with_address("Rua A");
        let id = ana.id;
        store.add(ana).unwrap();

        let mut replacement = client("Ana Maria");
        replacement.id = id;
        store.update(replacement).unwrap();

        let stored = store.get(id).unwrap();
        assert_eq!(stored.name, "Ana Maria");
        assert!(stored.address.is_none());
    }

    #[test]
    fn test_update_and_delete_missing() {
        let mut store: InMemoryStore<Client> = InMemoryStore::new();
        assert!(matches!(store.update(client("x")), Err(LedgerError::NotFound { .. })));
        assert!(matches!(store.delete(Uuid::new_v4()), Err(LedgerError::NotFound { .. })));
    }

    #[test]
    fn test_delete_returns_record() {
        let mut store = InMemoryStore::new();
        let ana = client("Ana");
        let id = ana.id;
        store.add(ana).unwrap();
        store.add(client("Bia")).unwrap();

        assert_eq!(store.delete(id).unwrap().name, "Ana");
        assert!(!store.contains(id));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_dataset_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("loanbook.json");

        let ana = client("Ana");
        let terms = LoanTerms::new(Money::from_major(500), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        let mut loan = Loan::new(ana.id, terms, Utc::now());
        loan.mark_paid(Utc::now());
        let dataset = Dataset {
            clients: vec![ana],
            loans: vec![loan],
            expenses: Vec::new(),
        };

        dataset.save_to_path(&path).unwrap();
        let loaded = Dataset::load_from_path(&path).unwrap();
        assert_eq!(loaded, dataset);
        assert_eq!(loaded.loans[0].status, LoanStatus::Paid);
    }

    #[test]
    fn test_save_replaces_without_leftovers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("loanbook.json");

        let first = Dataset {
            clients: vec![client("Ana")],
            ..Dataset::default()
        };
        first.save_to_path(&path).unwrap();
        let second = Dataset {
            clients: vec![client("Bia"), client("Caio")],
            ..Dataset::default()
        };
        second.save_to_path(&path).unwrap();

        assert_eq!(Dataset::load_from_path(&path).unwrap(), second);
        assert_eq!(tmp_path(&path), dir.path().join("loanbook.json.tmp"));
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn test_failed_save_keeps_previous_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("loanbook.json");

        let saved = Dataset {
            clients: vec![client("Ana")],
            ..Dataset::default()
        };
        saved.save_to_path(&path).unwrap();

        // a directory squatting on the temp path makes the next write fail
        fs::create_dir(tmp_path(&path)).unwrap();
        let replacement = Dataset {
            clients: vec![client("Bia")],
            ..Dataset::default()
        };
        assert!(matches!(replacement.save_to_path(&path), Err(LedgerError::Io(_))));

        assert_eq!(Dataset::load_from_path(&path).unwrap(), saved);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let loaded = Dataset::load_from_path(&dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, Dataset::default());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let loaded = Dataset::from_json(r#"{ "clients": [] }"#).unwrap();
        assert!(loaded.loans.is_empty());
        assert!(loaded.expenses.is_empty());
    }

    #[test]
    fn test_warnings_flag_dangling_client() {
        let terms = LoanTerms::new(Money::from_major(1), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let mut loan = Loan::new(Uuid::new_v4(), terms, Utc::now());
        loan.status = LoanStatus::Paid;
        let dataset = Dataset {
            loans: vec![loan],
            ..Default::default()
        };
        assert_eq!(dataset.warnings().len(), 2);
    }
}
