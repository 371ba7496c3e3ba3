#[cfg(test)]
mod tests {
    use indoc::indoc;
    use wharf::{
        GenericSqlWriter, JoinPathEntry, JoinType, Projection, SelectItem, SqlWriter, Statement,
        printable_query, truncate_long,
    };

    const WRITER: GenericSqlWriter = GenericSqlWriter::new();

    fn entry(path: &str, join: &str, alias: &str) -> JoinPathEntry {
        JoinPathEntry {
            path: path.into(),
            join: join.into(),
            alias: alias.into(),
        }
    }

    #[test]
    fn select() {
        let department = entry("department", "_t_0.department", "_department_1");
        let company = entry("department.company", "_department_1.company", "_company_2");
        let statement = Statement {
            entity: "Employee",
            root_alias: "_t_0",
            join_type: JoinType::Left,
            joins: vec![&department, &company],
            filter: "_company_2.name = :company",
            group_by: "",
            order_by: "_t_0.name",
        };
        let mut out = String::new();
        WRITER.write_select(&mut out, &Projection::Entities, &statement);
        assert_eq!(
            printable_query(&out),
            indoc! {"
                SELECT _t_0, _department_1, _company_2
                FROM Employee _t_0
                LEFT JOIN _t_0.department _department_1
                LEFT JOIN _department_1.company _company_2
                WHERE _company_2.name = :company
                ORDER BY _t_0.name
            "}
            .trim()
        );

        let mut out = String::new();
        WRITER.write_select(
            &mut out,
            &Projection::Columns(vec![
                SelectItem::Aggregate {
                    function: "AVG".into(),
                    expression: "_t_0.salary".into(),
                    alias: "salary".into(),
                },
                SelectItem::Column("_department_1.name".into()),
            ]),
            &Statement {
                joins: vec![&department],
                filter: "  ",
                group_by: "_department_1.name",
                order_by: "",
                ..statement.clone()
            },
        );
        assert_eq!(
            printable_query(&out),
            indoc! {"
                SELECT AVG(_t_0.salary) AS salary, _department_1.name
                FROM Employee _t_0
                LEFT JOIN _t_0.department _department_1
                GROUP BY _department_1.name
            "}
            .trim()
        );
    }

    #[test]
    fn count() {
        let mut out = String::new();
        WRITER.write_select(
            &mut out,
            &Projection::Count("e.id".into()),
            &Statement {
                entity: "Employee",
                root_alias: "e",
                ..Default::default()
            },
        );
        assert_eq!(out, "SELECT COUNT(e.id) FROM Employee e");
    }

    #[test]
    fn update_and_delete() {
        let badge = entry("badge", "_t_0.badge", "_badge_3");
        let statement = Statement {
            entity: "Employee",
            root_alias: "_t_0",
            joins: vec![&badge],
            filter: "_badge_3.code IS NULL",
            ..Default::default()
        };
        let mut out = String::new();
        WRITER.write_update(
            &mut out,
            &statement,
            &[
                ("status", "_set_status_1".to_string()),
                ("salary", "_set_salary_1".to_string()),
            ],
        );
        assert_eq!(
            out,
            "UPDATE Employee _t_0 JOIN _t_0.badge _badge_3 \
             SET _t_0.status = :_set_status_1, _t_0.salary = :_set_salary_1 \
             WHERE _badge_3.code IS NULL"
        );
        let mut out = String::new();
        WRITER.write_delete(&mut out, &statement);
        assert_eq!(
            printable_query(&out),
            indoc! {"
                DELETE
                FROM Employee _t_0
                JOIN _t_0.badge _badge_3
                WHERE _badge_3.code IS NULL
            "}
            .trim()
        );
    }

    #[test]
    fn generic_pagination_fails() {
        let mut out = "SELECT * FROM employees".to_string();
        let error = WRITER
            .write_limit_offset(&mut out, 10, 5)
            .expect_err("The generic writer has no pagination syntax");
        assert!(error.to_string().contains("GenericSqlWriter"));
        assert_eq!(out, "SELECT * FROM employees");
    }

    #[test]
    fn long_queries() {
        let short = "SELECT _t_0 FROM Employee _t_0";
        assert_eq!(printable_query(short), "SELECT _t_0\nFROM Employee _t_0");
        assert_eq!(printable_query("COMMIT"), "COMMIT");
        assert_eq!(
            printable_query(
                "SELECT COUNT(_t_0.id) AS id, _department_1.name FROM Employee _t_0 \
                 JOIN _t_0.department _department_1 LEFT JOIN _t_0.badge _badge_3 \
                 GROUP BY _department_1.name"
            ),
            indoc! {"
                SELECT COUNT(_t_0.id) AS id, _department_1.name
                FROM Employee _t_0
                JOIN _t_0.department _department_1
                LEFT JOIN _t_0.badge _badge_3
                GROUP BY _department_1.name
            "}
            .trim()
        );
        assert_eq!(format!("{}", truncate_long!(short)), short);
        let long = format!("SELECT {} FROM Employee _t_0", "é".repeat(300));
        let truncated = format!("{}", truncate_long!(long));
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 500);
    }
}
