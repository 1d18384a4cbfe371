mod common;
use common::{dt, entry, exit, loan, store_with};
use hwcontrol::core::RecordActions;
use hwcontrol::db::RecordStore;
use hwcontrol::errors::AppError;

#[test]
fn return_closes_loan_once() {
    let (_dir, store) = store_with(vec![loan(1, "01/10/2025 12:00")]);

    let r = RecordActions::mark_returned(&store, 1).unwrap();
    assert!(r.returned);

    let err = RecordActions::mark_returned(&store, 1).unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition { id: 1, .. }));
    assert!(store.get(1).unwrap().returned);
}

#[test]
fn exits_and_hidden_records_cannot_be_returned() {
    let mut hidden = entry(2, "01/10/2025 12:00");
    hidden.hidden = true;
    let (_dir, store) = store_with(vec![exit(1, ""), hidden]);

    assert!(matches!(
        RecordActions::mark_returned(&store, 1),
        Err(AppError::InvalidTransition { .. })
    ));
    assert!(matches!(
        RecordActions::mark_returned(&store, 2),
        Err(AppError::InvalidTransition { .. })
    ));
}

#[test]
fn unknown_id_is_not_found() {
    let (_dir, store) = store_with(vec![]);
    assert!(matches!(RecordActions::hide(&store, 42), Err(AppError::NotFound(42))));
}

#[test]
fn hide_is_idempotent_and_sticky() {
    let (_dir, store) = store_with(vec![entry(1, "01/10/2025 12:00")]);

    RecordActions::hide(&store, 1).unwrap();
    RecordActions::hide(&store, 1).unwrap();

    let r = store.get(1).unwrap();
    assert!(r.hidden);
    assert!(matches!(
        RecordActions::toggle_stock(&store, 1),
        Err(AppError::InvalidTransition { .. })
    ));
}

#[test]
fn extend_moves_due_date_of_open_loans_only() {
    let mut closed = loan(2, "01/10/2025 12:00");
    closed.returned = true;
    let (_dir, store) = store_with(vec![loan(1, "01/10/2025 12:00"), closed, entry(3, "")]);

    let r = RecordActions::extend_due(&store, 1, "2025-10-30 17:45").unwrap();
    assert_eq!(r.due_at(), Some("30/10/2025 17:45"));

    assert!(matches!(
        RecordActions::extend_due(&store, 1, "soon"),
        Err(AppError::InvalidDate(_))
    ));
    assert!(matches!(
        RecordActions::extend_due(&store, 2, "30/10/2025 17:45"),
        Err(AppError::InvalidTransition { .. })
    ));
    assert!(matches!(
        RecordActions::extend_due(&store, 3, "30/10/2025 17:45"),
        Err(AppError::InvalidTransition { .. })
    ));
}

#[test]
fn stock_toggles_on_entries() {
    let (_dir, store) = store_with(vec![entry(1, "01/10/2025 12:00"), loan(2, "")]);

    assert!(RecordActions::toggle_stock(&store, 1).unwrap().in_stock());
    assert!(!RecordActions::toggle_stock(&store, 1).unwrap().in_stock());
    assert!(matches!(
        RecordActions::toggle_stock(&store, 2),
        Err(AppError::InvalidTransition { .. })
    ));
}

#[test]
fn notes_are_appended_in_order_and_bounded() {
    let (_dir, store) = store_with(vec![entry(1, "01/10/2025 12:00")]);

    RecordActions::append_note(&store, 1, "first", 10, dt("02/10/2025 08:00")).unwrap();
    let r = RecordActions::append_note(&store, 1, " second ", 10, dt("03/10/2025 08:00")).unwrap();

    let texts: Vec<&str> = r.notes.iter().map(|n| n.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second"]);
    assert_eq!(r.notes[1].recorded_at, "03/10/2025 08:00");

    assert!(matches!(
        RecordActions::append_note(&store, 1, "   ", 10, dt("03/10/2025 08:00")),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        RecordActions::append_note(&store, 1, "eleven chars", 10, dt("03/10/2025 08:00")),
        Err(AppError::Validation(_))
    ));
    assert_eq!(store.get(1).unwrap().notes.len(), 2);
}
