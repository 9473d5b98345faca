//! Record Store Invariant Tests
//!
//! Round-trip fidelity, read idempotence, identifier uniqueness under
//! concurrency, and the swallow-and-report policy for bad units, all
//! against the filesystem backend.

use std::fs;
use std::sync::Arc;
use std::thread;

use appealdesk::appeal::{validate, AppealDraft, ValidationPolicy};
use appealdesk::store::{AppealStore, LocalBackend, MemoryDiagnostics};
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

fn draft(surname: &str, phone: &str) -> AppealDraft {
    AppealDraft {
        surname: surname.to_string(),
        name: "Иван".to_string(),
        birth_date: "1990-01-01".to_string(),
        phone: phone.to_string(),
        email: "ivan@example.com".to_string(),
        reason: "нет доступа к сети".to_string(),
        problem_detected_at: "2025-07-05T14:27:50".to_string(),
    }
}

fn open_store(temp: &TempDir) -> (AppealStore<LocalBackend>, Arc<MemoryDiagnostics>) {
    let diagnostics = Arc::new(MemoryDiagnostics::new());
    let store = AppealStore::open(
        LocalBackend::new(temp.path().join("appeals")),
        ValidationPolicy::default(),
        diagnostics.clone(),
    )
    .unwrap();
    (store, diagnostics)
}

// =============================================================================
// Round-trip fidelity
// =============================================================================

#[test]
fn test_append_then_list_returns_equal_record() {
    let temp = TempDir::new().unwrap();
    let (store, diagnostics) = open_store(&temp);

    let record = validate(&draft("Иванов", "+79001234567"), store.policy()).unwrap();
    let id = store.append(&record).unwrap();
    assert_eq!(id.value(), 1);

    let listed = store.list_all().unwrap();
    assert_eq!(listed, vec![record]);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_unit_on_disk_is_flat_json_with_iso_dates() {
    let temp = TempDir::new().unwrap();
    let (store, _) = open_store(&temp);

    let record = validate(&draft("Иванов", "+79001234567"), store.policy()).unwrap();
    store.append(&record).unwrap();

    let unit_path = temp.path().join("appeals").join("appeal_1.json");
    let content = fs::read_to_string(&unit_path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();

    assert_eq!(json["surname"], "Иванов");
    assert_eq!(json["birth_date"], "1990-01-01");
    assert_eq!(json["problem_detected_at"], "2025-07-05T14:27:50");
    assert_eq!(json["reason"], "нет доступа к сети");
    // non-ASCII stays readable in the stored unit
    assert!(content.contains("Иванов"));
}

#[test]
fn test_round_trip_survives_reopen() {
    let temp = TempDir::new().unwrap();

    let record = {
        let (store, _) = open_store(&temp);
        let record = validate(&draft("Иванов", "+79001234567"), store.policy()).unwrap();
        store.append(&record).unwrap();
        record
    };

    let (reopened, _) = open_store(&temp);
    assert_eq!(reopened.list_all().unwrap(), vec![record]);

    // the sequence continues, it does not restart
    let next = validate(&draft("Петров", "+79001234568"), reopened.policy()).unwrap();
    assert_eq!(reopened.append(&next).unwrap().value(), 2);
}

// =============================================================================
// Read idempotence and ordering
// =============================================================================

#[test]
fn test_list_twice_yields_identical_sequences() {
    let temp = TempDir::new().unwrap();
    let (store, _) = open_store(&temp);

    for (surname, phone) in [("Иванов", "+79001234567"), ("Петров", "+79001234568")] {
        let record = validate(&draft(surname, phone), store.policy()).unwrap();
        store.append(&record).unwrap();
    }

    let first = store.list_all().unwrap();
    let second = store.list_all().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_list_follows_sequence_order_past_ten() {
    let temp = TempDir::new().unwrap();
    let (store, _) = open_store(&temp);

    // Unit 10+ would sort before unit 2 lexicographically; sequence
    // order must win.
    for i in 0..12 {
        let surname = format!("Иванов{}", "а".repeat(i));
        let record = validate(&draft(&surname, "+79001234567"), store.policy()).unwrap();
        store.append(&record).unwrap();
    }

    let listed = store.list_all().unwrap();
    assert_eq!(listed.len(), 12);
    assert_eq!(listed[0].surname, "Иванов");
    assert_eq!(listed[11].surname, format!("Иванов{}", "а".repeat(11)));
}

// =============================================================================
// Bad units degrade, never fail
// =============================================================================

#[test]
fn test_corrupted_unit_is_skipped_and_reported() {
    let temp = TempDir::new().unwrap();
    let (store, diagnostics) = open_store(&temp);

    for (surname, phone) in [("Иванов", "+79001234567"), ("Петров", "+79001234568")] {
        let record = validate(&draft(surname, phone), store.policy()).unwrap();
        store.append(&record).unwrap();
    }

    // Corrupt one unit behind the store's back.
    fs::write(temp.path().join("appeals").join("appeal_1.json"), b"garbage").unwrap();

    let listed = store.list_all().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].surname, "Петров");

    let events = diagnostics.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, "appeal_1.json");
}

#[test]
fn test_unit_violating_field_rules_is_skipped_on_read() {
    let temp = TempDir::new().unwrap();
    let (store, diagnostics) = open_store(&temp);

    let record = validate(&draft("Иванов", "+79001234567"), store.policy()).unwrap();
    store.append(&record).unwrap();

    // Hand-edit the stored unit into a rule violation.
    let unit_path = temp.path().join("appeals").join("appeal_1.json");
    let edited = fs::read_to_string(&unit_path)
        .unwrap()
        .replace("Иванов", "ivanov");
    fs::write(&unit_path, edited).unwrap();

    assert!(store.list_all().unwrap().is_empty());
    assert_eq!(diagnostics.events().len(), 1);
    assert!(diagnostics.events()[0].1.contains("re-validation failed"));
}

// =============================================================================
// Identifier uniqueness
// =============================================================================

#[test]
fn test_store_never_overwrites_an_existing_unit() {
    let temp = TempDir::new().unwrap();

    // A foreign file already occupies the next unit name.
    let appeals_dir = temp.path().join("appeals");
    fs::create_dir_all(&appeals_dir).unwrap();
    fs::write(appeals_dir.join("appeal_1.json"), b"occupied").unwrap();

    let (store, _) = open_store(&temp);

    // The counter seeds past the occupied name.
    let record = validate(&draft("Иванов", "+79001234567"), store.policy()).unwrap();
    let id = store.append(&record).unwrap();
    assert_eq!(id.value(), 2);
    assert_eq!(fs::read(appeals_dir.join("appeal_1.json")).unwrap(), b"occupied");
}

#[test]
fn test_concurrent_appends_both_succeed_with_distinct_units() {
    let temp = TempDir::new().unwrap();
    let diagnostics = Arc::new(MemoryDiagnostics::new());
    let store = Arc::new(
        AppealStore::open(
            LocalBackend::new(temp.path().join("appeals")),
            ValidationPolicy::default(),
            diagnostics,
        )
        .unwrap(),
    );

    let mut handles = Vec::new();
    for i in 0..2 {
        let store = store.clone();
        handles.push(thread::spawn(move || {
            let (surname, phone) = if i == 0 {
                ("Иванов", "+79001234567")
            } else {
                ("Петров", "+79001234568")
            };
            let record = validate(&draft(surname, phone), store.policy()).unwrap();
            store.append(&record).unwrap()
        }));
    }

    let mut ids: Vec<u64> = handles
        .into_iter()
        .map(|h| h.join().unwrap().value())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2]);

    let listed = store.list_all().unwrap();
    assert_eq!(listed.len(), 2);
}
