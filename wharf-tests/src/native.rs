use crate::{mock_dao, silent_logs};
use wharf_core::{AsValue, Driver, ParamType, Params, RowLabeled, SqlWriter, Value};

pub fn native<D: Driver + Clone + Default>(driver: &D) {
    let mut dao = mock_dao(driver);

    // Modify statement with a list parameter
    dao.connection_mut().respond_affected(3);
    let affected = dao
        .sql_update(
            "UPDATE employees SET status = 'inactive' WHERE employee_id IN (:ids)",
            Params::from([
                ("ids".to_string(), vec![1i64, 2, 3].as_value()),
                ("unused".to_string(), Value::from("x")),
            ]),
        )
        .expect("Failed to run the native update");
    assert_eq!(affected, 3);
    let statement = dao.connection().native.last().expect("No native statement");
    assert_eq!(statement.param_type("ids"), ParamType::List);
    assert_eq!(statement.param_type("unused"), ParamType::Scalar);

    // Query without pagination
    dao.connection_mut()
        .respond([RowLabeled::from_iter([("full_name", Value::from("Ada"))])]);
    let rows = dao
        .sql_query(
            "SELECT full_name FROM employees WHERE status = :status",
            Params::from([("status".to_string(), Value::from("active"))]),
            None,
            Some(10),
        )
        .expect("Failed to run the native query");
    assert_eq!(rows.len(), 1);
    assert_eq!(
        dao.connection().native.last().map(|v| v.sql.as_str()),
        Some("SELECT full_name FROM employees WHERE status = :status")
    );

    // Pagination follows the product syntax, or fails when the product has none
    let mut expected = "SELECT full_name FROM employees".to_string();
    let supported = driver
        .sql_writer()
        .write_limit_offset(&mut expected, 20, 10)
        .is_ok();
    let statements = dao.connection().native.len();
    let result = silent_logs! {
        dao.sql_query("SELECT full_name FROM employees", Params::new(), Some(20), Some(10))
    };
    if supported {
        result.expect("Failed to run the paginated native query");
        assert_eq!(
            dao.connection().native.last().map(|v| v.sql.as_str()),
            Some(expected.as_str())
        );
    } else {
        assert!(result.is_err());
        assert_eq!(dao.connection().native.len(), statements);
    }
}
