use super::*;

fn session(storage: &Storage, key: &str) -> Option<String> {
    storage.get(Scope::Session, key)
}

// =============================================================
// Surface selection
// =============================================================

#[test]
fn container_takes_priority_over_window() {
    assert_eq!(ScrollSurface::select(true), ScrollSurface::Container);
    assert_eq!(ScrollSurface::select(false), ScrollSurface::Window);
}

#[test]
fn each_surface_has_its_own_key() {
    assert_eq!(ScrollSurface::Container.storage_key(), "containerScrollY");
    assert_eq!(ScrollSurface::Window.storage_key(), "windowScrollY");
}

// =============================================================
// Restore
// =============================================================

#[test]
fn saved_offset_scrolls_container() {
    let storage = Storage::in_memory();
    storage.set(Scope::Session, keys::CONTAINER_SCROLL_Y, "250");
    let tracker = ScrollTracker::new(ScrollSurface::Container, 100);
    assert_eq!(
        tracker.restore(&storage),
        Some(DomPatch::ScrollTo { surface: ScrollSurface::Container, offset: 250 })
    );
}

#[test]
fn zero_offset_is_treated_as_absent() {
    let storage = Storage::in_memory();
    storage.set(Scope::Session, keys::CONTAINER_SCROLL_Y, "0");
    let tracker = ScrollTracker::new(ScrollSurface::Container, 100);
    assert_eq!(tracker.restore(&storage), None);
}

#[test]
fn empty_missing_or_garbage_offset_is_ignored() {
    let tracker = ScrollTracker::new(ScrollSurface::Window, 100);
    let storage = Storage::in_memory();
    assert_eq!(tracker.restore(&storage), None);
    storage.set(Scope::Session, keys::WINDOW_SCROLL_Y, "");
    assert_eq!(tracker.restore(&storage), None);
    storage.set(Scope::Session, keys::WINDOW_SCROLL_Y, "top");
    assert_eq!(tracker.restore(&storage), None);
}

#[test]
fn window_restore_reads_only_window_key() {
    let storage = Storage::in_memory();
    storage.set(Scope::Session, keys::CONTAINER_SCROLL_Y, "900");
    storage.set(Scope::Session, keys::WINDOW_SCROLL_Y, "120.7");
    let tracker = ScrollTracker::new(ScrollSurface::Window, 100);
    assert_eq!(
        tracker.restore(&storage),
        Some(DomPatch::ScrollTo { surface: ScrollSurface::Window, offset: 120 })
    );
}

// =============================================================
// Debounced capture
// =============================================================

#[test]
fn scroll_burst_persists_last_offset_once() {
    let storage = Storage::in_memory();
    let mut tracker = ScrollTracker::new(ScrollSurface::Container, 100);
    tracker.on_scroll(0, 40);
    tracker.on_scroll(30, 80);
    tracker.on_scroll(60, 120);

    assert_eq!(tracker.flush_due(159, &storage), None);
    assert_eq!(session(&storage, keys::CONTAINER_SCROLL_Y), None);

    assert_eq!(tracker.flush_due(160, &storage), Some(120));
    assert_eq!(session(&storage, keys::CONTAINER_SCROLL_Y).as_deref(), Some("120"));
    assert_eq!(tracker.next_flush_at(), None);
}

#[test]
fn capture_writes_session_scope_only() {
    let storage = Storage::in_memory();
    let mut tracker = ScrollTracker::new(ScrollSurface::Window, 100);
    tracker.on_scroll(0, 10);
    tracker.flush_due(100, &storage);
    assert_eq!(storage.get(Scope::Durable, keys::WINDOW_SCROLL_Y), None);
    assert_eq!(session(&storage, keys::WINDOW_SCROLL_Y).as_deref(), Some("10"));
}

#[test]
fn cancel_drops_pending_write() {
    let storage = Storage::in_memory();
    let mut tracker = ScrollTracker::new(ScrollSurface::Window, 100);
    tracker.on_scroll(0, 10);
    tracker.cancel();
    assert_eq!(tracker.flush_due(1_000, &storage), None);
    assert_eq!(session(&storage, keys::WINDOW_SCROLL_Y), None);
}
