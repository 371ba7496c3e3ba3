#[cfg(test)]
mod tests {
    use wharf::{Dao, Function, GenericDriver, Mapping, Value};
    use wharf_tests::{MockConnection, schema};

    #[test]
    fn names() {
        let metadata = schema();
        let mapping = Mapping::new(&metadata);
        assert_eq!(mapping.table_name("Employee").unwrap(), "employees");
        assert_eq!(
            mapping.field_names("Employee").unwrap(),
            ["id", "name", "status", "salary"]
        );
        assert_eq!(
            mapping.column_names("Project").unwrap(),
            ["project_code", "project_year", "title"]
        );
        assert_eq!(mapping.column_name("Employee", "name").unwrap(), "full_name");
        assert_eq!(mapping.column_name("Employee", "id").unwrap(), "employee_id");
        assert_eq!(mapping.field_name("Company", "company_name").unwrap(), "name");
        assert_eq!(
            mapping.field_type("Project", "year").unwrap(),
            &Value::Int32(None)
        );
        assert!(mapping.column_name("Employee", "department").is_err());
        assert!(mapping.field_name("Employee", "name").is_err());
        assert!(mapping.table_name("Nobody").is_err());
    }

    #[test]
    fn sql_expression() {
        let metadata = schema();
        let mapping = Mapping::new(&metadata);
        assert_eq!(
            mapping
                .map_sql_expression("Employee", "name = :name AND status = 'name'", Some("e"))
                .unwrap(),
            "e.full_name = :name AND e.status = 'name'"
        );
        assert_eq!(
            mapping
                .map_sql_expression("Employee", "id IN (:id) ORDER BY name DESC", None)
                .unwrap(),
            "employee_id IN (:id) ORDER BY full_name DESC"
        );
        assert_eq!(
            mapping
                .map_sql_expression("Employee", "names = \"name\" OR x.name = 1", Some(""))
                .unwrap(),
            "names = \"name\" OR x.name = 1"
        );
        assert!(
            mapping
                .map_sql_expression("Nobody", "name = 1", None)
                .is_err()
        );
    }

    #[test]
    fn functions() {
        let dao = Dao::new(MockConnection::new(GenericDriver::new()), schema());
        let mapping = dao.mapping();
        assert_eq!(mapping.function_name(Function::BitAnd), "BIT_AND");
        assert_eq!(mapping.table_name("Badge").unwrap(), "badges");
    }
}
