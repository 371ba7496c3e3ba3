use crate::{mock_dao, silent_logs};
use std::{cell::RefCell, rc::Rc};
use wharf_core::Driver;

pub fn transactions<D: Driver + Clone + Default>(driver: &D) {
    let mut dao = mock_dao(driver);
    let recorded = Rc::new(RefCell::new(Vec::<String>::new()));
    let sink = recorded.clone();
    dao.set_error_sink(move |e: &wharf_core::Error| sink.borrow_mut().push(e.to_string()));

    assert!(!dao.transaction_active());
    dao.begin_transaction().expect("Failed to begin");
    assert!(dao.transaction_active());

    // Nesting is rejected and leaves the transaction open
    let result = silent_logs! { dao.begin_transaction() };
    assert!(result.is_err());
    assert!(dao.transaction_active());
    assert_eq!(recorded.borrow().len(), 1);

    dao.commit_transaction().expect("Failed to commit");
    assert!(!dao.transaction_active());

    // Ending twice is rejected
    let result = silent_logs! { dao.commit_transaction() };
    assert!(result.is_err());
    let result = silent_logs! { dao.rollback_transaction() };
    assert!(result.is_err());
    assert_eq!(recorded.borrow().len(), 3);

    dao.begin_transaction().expect("Failed to begin again");
    dao.rollback_transaction().expect("Failed to rollback");
    assert!(!dao.transaction_active());
    assert_eq!(
        dao.connection().transactions,
        ["begin", "commit", "begin", "rollback"]
    );

    // Engine failing to begin
    dao.connection_mut().fail_transactions = true;
    let result = silent_logs! { dao.begin_transaction() };
    assert!(result.is_err());
    assert!(!dao.transaction_active());
    assert_eq!(dao.last_error(), Some("Cannot begin the transaction"));
    assert_eq!(
        recorded.borrow().last().map(String::as_str),
        Some("Cannot begin the transaction")
    );
}
