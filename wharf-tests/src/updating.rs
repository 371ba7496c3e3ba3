use crate::{Employee, mock_dao, silent_logs};
use wharf_core::{Driver, ListQuery, Params, Value};

pub fn updating<D: Driver + Clone + Default>(driver: &D) {
    let mut dao = mock_dao(driver);

    // Nothing to set
    let affected = dao
        .update_by_filter::<Employee>(&Params::new(), &ListQuery::new().filter("id = 1"))
        .expect("Empty update must not fail");
    assert_eq!(affected, 0);
    assert!(dao.connection().queries.is_empty());
    assert_eq!(dao.connection().cleared, 0);

    // Set through a joined filter
    dao.connection_mut().respond_affected(4);
    let values = Params::from([("status".to_string(), Value::from("inactive"))]);
    let affected = dao
        .update_by_filter::<Employee>(
            &values,
            &ListQuery::new()
                .filter("department.name = :department")
                .param("department", "Sales"),
        )
        .expect("Failed to update the employees");
    assert_eq!(affected, 4);
    assert_eq!(dao.connection().cleared, 1);
    let query = dao.connection().queries.last().expect("No query was issued");
    assert_eq!(
        query.text,
        "UPDATE Employee _t_0 \
         JOIN _t_0.department _department_1 \
         SET _t_0.status = :_set_status_1 \
         WHERE _department_1.name = :department"
    );
    assert_eq!(query.params.get("_set_status_1"), Some(&Value::from("inactive")));
    assert_eq!(query.params.get("department"), Some(&Value::from("Sales")));

    // Generated keys never shadow the caller parameters
    let values = Params::from([
        ("name".to_string(), Value::from("Unknown")),
        ("salary".to_string(), Value::Decimal(None)),
    ]);
    dao.update_by_filter::<Employee>(
        &values,
        &ListQuery::new()
            .filter("status = :_set_name_1")
            .param("_set_name_1", "hidden"),
    )
    .expect("Failed to update with colliding parameters");
    let query = dao.connection().queries.last().expect("No query was issued");
    assert_eq!(
        query.text,
        "UPDATE Employee _t_0 \
         SET _t_0.name = :_set_name_2, _t_0.salary = :_set_salary_1 \
         WHERE _t_0.status = :_set_name_1"
    );
    assert_eq!(query.params.len(), 3);
    assert_eq!(query.params.get("_set_name_1"), Some(&Value::from("hidden")));
    assert_eq!(query.params.get("_set_name_2"), Some(&Value::from("Unknown")));

    // Unknown fields are rejected before reaching the engine
    let values = Params::from([("nickname".to_string(), Value::from("Ace"))]);
    let result = silent_logs! {
        dao.update_by_filter::<Employee>(&values, &ListQuery::new())
    };
    assert!(result.is_err());
    assert_eq!(dao.connection().queries.len(), 2);
    assert!(
        dao.last_error()
            .is_some_and(|v| v.contains("nickname")),
        "{:?}",
        dao.last_error()
    );
}
