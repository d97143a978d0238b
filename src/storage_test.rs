use super::*;

// =============================================================
// Storage adapter
// =============================================================

#[test]
fn missing_key_reads_none() {
    let storage = Storage::in_memory();
    assert_eq!(storage.get(Scope::Durable, keys::LAST_OPEN_UNIT), None);
}

#[test]
fn set_then_get_round_trips_per_scope() {
    let storage = Storage::in_memory();
    storage.set(Scope::Durable, "k", "durable");
    storage.set(Scope::Session, "k", "session");
    assert_eq!(storage.get(Scope::Durable, "k").as_deref(), Some("durable"));
    assert_eq!(storage.get(Scope::Session, "k").as_deref(), Some("session"));
}

#[test]
fn remove_only_affects_named_scope() {
    let storage = Storage::in_memory();
    storage.set(Scope::Durable, "k", "a");
    storage.set(Scope::Session, "k", "b");
    storage.remove(Scope::Durable, "k");
    assert_eq!(storage.get(Scope::Durable, "k"), None);
    assert_eq!(storage.get(Scope::Session, "k").as_deref(), Some("b"));
}

#[test]
fn remove_missing_key_is_noop() {
    let storage = Storage::in_memory();
    storage.remove(Scope::Session, "never-set");
    assert_eq!(storage.get(Scope::Session, "never-set"), None);
}

#[test]
fn unavailable_storage_never_fails_callers() {
    let storage = Storage::unavailable();
    storage.set(Scope::Durable, "k", "v");
    storage.remove(Scope::Durable, "k");
    assert_eq!(storage.get(Scope::Durable, "k"), None);
    assert_eq!(storage.read_int(Scope::Session, "k"), None);
}

#[test]
fn memory_backend_clones_share_items_across_reloads() {
    let durable = MemoryBackend::new();
    let session = MemoryBackend::new();
    let first = Storage::new(Box::new(durable.clone()), Box::new(session.clone()));
    first.set(Scope::Durable, keys::LAST_OPEN_UNIT, "unit-3");

    let reloaded = Storage::new(Box::new(durable.clone()), Box::new(session));
    assert_eq!(reloaded.get(Scope::Durable, keys::LAST_OPEN_UNIT).as_deref(), Some("unit-3"));
    assert_eq!(durable.snapshot().len(), 1);
}

#[test]
fn read_int_parses_stored_value() {
    let storage = Storage::in_memory();
    storage.set(Scope::Durable, keys::REFRESH_TIMESTAMP, "1700000000000");
    assert_eq!(storage.read_int(Scope::Durable, keys::REFRESH_TIMESTAMP), Some(1_700_000_000_000));
}

// =============================================================
// parse_int_prefix
// =============================================================

#[test]
fn parse_int_prefix_accepts_plain_integers() {
    assert_eq!(parse_int_prefix("250"), Some(250));
    assert_eq!(parse_int_prefix("-12"), Some(-12));
    assert_eq!(parse_int_prefix("+7"), Some(7));
}

#[test]
fn parse_int_prefix_stops_at_first_non_digit() {
    assert_eq!(parse_int_prefix("250.5"), Some(250));
    assert_eq!(parse_int_prefix("  42px"), Some(42));
}

#[test]
fn parse_int_prefix_rejects_non_numeric() {
    assert_eq!(parse_int_prefix(""), None);
    assert_eq!(parse_int_prefix("abc"), None);
    assert_eq!(parse_int_prefix("-"), None);
    assert_eq!(parse_int_prefix(".5"), None);
}

#[test]
fn scope_display_names() {
    assert_eq!(Scope::Durable.to_string(), "durable");
    assert_eq!(Scope::Session.to_string(), "session");
}
