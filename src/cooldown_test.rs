use super::*;
use crate::storage::keys;

// =============================================================
// Helpers
// =============================================================

const NOW: u64 = 1_700_000_000_000;

fn elements() -> CooldownElements {
    CooldownElements {
        button_id: "refresh-dmoj-btn".into(),
        message_id: "dmoj-cooldown-msg".into(),
        form_id: "refresh-dmoj-form".into(),
    }
}

fn throttle() -> CooldownThrottle {
    CooldownThrottle::attach(30, keys::REFRESH_TIMESTAMP, Some(elements())).unwrap()
}

fn storage_with_last(last_ms: u64) -> Storage {
    let storage = Storage::in_memory();
    storage.set(Scope::Durable, keys::REFRESH_TIMESTAMP, &last_ms.to_string());
    storage
}

// =============================================================
// Evaluation
// =============================================================

#[test]
fn ten_seconds_after_use_twenty_remain() {
    let view = throttle().evaluate(NOW, &storage_with_last(NOW - 10_000));
    assert_eq!(view.remaining_secs, Some(20));
    assert!(view.disabled());
    assert!(view.message.ends_with("0m 20s"));
    assert_eq!(view.message, "Try again in 0m 20s");
}

#[test]
fn forty_seconds_after_use_is_available() {
    let view = throttle().evaluate(NOW, &storage_with_last(NOW - 40_000));
    assert_eq!(view.remaining_secs, None);
    assert!(!view.disabled());
    assert_eq!(view.message, "");
}

#[test]
fn exactly_at_window_end_is_available() {
    let view = throttle().evaluate(NOW, &storage_with_last(NOW - 30_000));
    assert!(!view.disabled());
}

#[test]
fn partial_seconds_round_elapsed_down() {
    let view = throttle().evaluate(NOW, &storage_with_last(NOW - 10_999));
    assert_eq!(view.remaining_secs, Some(20));
}

#[test]
fn missing_timestamp_fails_open() {
    let view = throttle().evaluate(NOW, &Storage::in_memory());
    assert!(!view.disabled());
}

#[test]
fn malformed_timestamp_fails_open() {
    let storage = Storage::in_memory();
    storage.set(Scope::Durable, keys::REFRESH_TIMESTAMP, "not-a-number");
    assert!(!throttle().evaluate(NOW, &storage).disabled());
}

#[test]
fn unavailable_storage_fails_open() {
    assert!(!throttle().evaluate(NOW, &Storage::unavailable()).disabled());
}

#[test]
fn long_windows_render_minutes() {
    let t = CooldownThrottle::attach(300, keys::REFRESH_TIMESTAMP, Some(elements())).unwrap();
    let view = t.evaluate(NOW, &storage_with_last(NOW - 5_000));
    assert_eq!(view.message, "Try again in 4m 55s");
}

#[test]
fn format_countdown_splits_minutes_and_seconds() {
    assert_eq!(format_countdown(20), "0m 20s");
    assert_eq!(format_countdown(61), "1m 1s");
    assert_eq!(format_countdown(120), "2m 0s");
}

// =============================================================
// Rendering and submission
// =============================================================

#[test]
fn tick_disables_button_and_sets_message() {
    let patches = throttle().tick(NOW, &storage_with_last(NOW - 10_000));
    assert_eq!(
        patches,
        vec![
            DomPatch::SetDisabled { id: "refresh-dmoj-btn".into(), disabled: true },
            DomPatch::SetText { id: "dmoj-cooldown-msg".into(), text: "Try again in 0m 20s".into() },
        ]
    );
}

#[test]
fn tick_enables_button_and_clears_message() {
    let patches = throttle().tick(NOW, &storage_with_last(NOW - 40_000));
    assert_eq!(
        patches,
        vec![
            DomPatch::SetDisabled { id: "refresh-dmoj-btn".into(), disabled: false },
            DomPatch::SetText { id: "dmoj-cooldown-msg".into(), text: String::new() },
        ]
    );
}

#[test]
fn submit_writes_fresh_timestamp_and_next_tick_locks() {
    let storage = storage_with_last(NOW - 40_000);
    let t = throttle();
    t.on_submit(NOW, &storage);

    assert_eq!(storage.get(Scope::Durable, keys::REFRESH_TIMESTAMP), Some(NOW.to_string()));
    assert_eq!(t.tick(NOW, &storage)[0], DomPatch::SetDisabled { id: "refresh-dmoj-btn".into(), disabled: true });
    assert!(t.evaluate(NOW + 500, &storage).disabled());
    assert!(!t.evaluate(NOW + 30_000, &storage).disabled());
}

#[test]
fn future_timestamp_locks_for_at_most_one_window() {
    let t = throttle();
    let view = t.evaluate(NOW, &storage_with_last(NOW + 86_400_000));
    assert_eq!(view.remaining_secs, Some(30));
    assert_eq!(view.message, "Try again in 0m 30s");

    let storage = storage_with_last(NOW + 5_000);
    assert!(t.evaluate(NOW, &storage).remaining_secs.is_some_and(|r| r <= 30));
}

#[test]
fn missing_elements_leave_throttle_inert() {
    assert!(CooldownThrottle::attach(30, keys::REFRESH_TIMESTAMP, None).is_none());
}
