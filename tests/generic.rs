#[cfg(test)]
mod tests {
    use wharf::{Dao, DaoConfig, Entity, GenericDriver, ListQuery, Params, Value};
    use wharf_tests::{Employee, MockConnection, execute_tests, init_logs, schema, silent_logs};

    #[test]
    fn generic() {
        init_logs();
        execute_tests(GenericDriver::new());
    }

    #[test]
    fn verbose_queries() {
        init_logs();
        let mut dao = Dao::with_config(
            MockConnection::new(GenericDriver::new()),
            schema(),
            DaoConfig {
                root_alias: "e".into(),
                max_join_depth: 1,
                log_queries: true,
            },
        );
        dao.connection_mut()
            .respond([Employee::new(1, "Ada", "active", 100).row()]);
        let employees = dao
            .list::<Employee>(
                &ListQuery::new()
                    .filter("department.name = :name OR manager.department.name = :name")
                    .param("name", "R&D"),
            )
            .expect("Failed to list the employees");
        assert_eq!(employees, [Employee::new(1, "Ada", "active", 100)]);
        assert_eq!(
            dao.connection().last_query(),
            Some(
                "SELECT e, _department_1 FROM Employee e \
                 LEFT JOIN e.department _department_1 \
                 WHERE _department_1.name = :name OR manager.department.name = :name"
            )
        );

        let result = silent_logs! {
            dao.sql_query("SELECT * FROM employees", Params::new(), Some(0), Some(5))
        };
        assert!(result.is_err());
        assert!(
            dao.last_error()
                .is_some_and(|v| v.contains("cannot paginate"))
        );
        dao.connection_mut().respond_affected(2);
        let affected = dao
            .sql_update(
                "DELETE FROM employees WHERE status = :status",
                Params::from([("status".to_string(), Value::from("inactive"))]),
            )
            .expect("Failed to run the native statement");
        assert_eq!(affected, 2);
    }
}
