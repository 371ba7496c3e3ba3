use crate::{Employee, mock_dao};
use rust_decimal::Decimal;
use wharf_core::{Aggregate, AsValue, Driver, GroupQuery, RowLabeled};

pub fn grouping<D: Driver + Clone + Default>(driver: &D) {
    let mut dao = mock_dao(driver);

    // Nothing to compute
    let result = dao
        .group::<Employee>(&GroupQuery::new().filter("status = :status"))
        .expect("Empty group must not fail");
    assert_eq!(result, None);
    assert!(dao.connection().queries.is_empty());

    // Aggregates and group fields
    dao.connection_mut().respond([
        RowLabeled::from_iter([
            ("salary", Decimal::from(10000).as_value()),
            ("employees", 2i64.as_value()),
            ("name", "Research".to_string().as_value()),
        ]),
        RowLabeled::from_iter([
            ("salary", Decimal::from(4500).as_value()),
            ("employees", 1i64.as_value()),
            ("name", "Sales".to_string().as_value()),
        ]),
    ]);
    let rows = dao
        .group::<Employee>(
            &GroupQuery::new()
                .aggregate(Aggregate::new("SUM", "salary"))
                .aggregate(Aggregate::new("COUNT", "id").alias("employees"))
                .group_field("department.name")
                .filter("status = :status")
                .param("status", "active")
                .order_by("department.name"),
        )
        .expect("Failed to group the employees")
        .expect("Aggregation was skipped");
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0].get_as::<Decimal>("salary").unwrap(),
        Decimal::from(10000)
    );
    assert_eq!(rows[1].get_as::<String>("name").unwrap(), "Sales");
    assert_eq!(
        dao.connection().last_query(),
        Some(
            "SELECT SUM(_t_0.salary) AS salary, COUNT(_t_0.id) AS employees, _department_1.name \
             FROM Employee _t_0 \
             JOIN _t_0.department _department_1 \
             WHERE _t_0.status = :status \
             GROUP BY _department_1.name \
             ORDER BY _department_1.name"
        )
    );

    // Aggregate over a joined field, labeled after its path
    dao.group::<Employee>(
        &GroupQuery::new()
            .aggregate(Aggregate::new("MAX", "manager.salary"))
            .aggregate(Aggregate::new("BIT_AND", "badge.id").alias("badges")),
    )
    .expect("Failed to aggregate over joined fields");
    assert_eq!(
        dao.connection().last_query(),
        Some(
            "SELECT MAX(_manager_4.salary) AS manager_salary, BIT_AND(_badge_3.id) AS badges \
             FROM Employee _t_0 \
             JOIN _t_0.badge _badge_3 \
             JOIN _t_0.manager _manager_4"
        )
    );

    // Group fields only
    dao.group::<Employee>(
        &GroupQuery::new()
            .group_field("status")
            .group_field("manager.department.name"),
    )
    .expect("Failed to group without aggregates");
    assert_eq!(
        dao.connection().last_query(),
        Some(
            "SELECT _t_0.status, _department_5.name FROM Employee _t_0 \
             JOIN _t_0.manager _manager_4 \
             JOIN _manager_4.department _department_5 \
             GROUP BY _t_0.status, _department_5.name"
        )
    );

    // Default labels keep only the word characters of the aggregated expression
    dao.group::<Employee>(
        &GroupQuery::new()
            .aggregate(Aggregate::new("COUNT", "*"))
            .aggregate(Aggregate::new("SUM", "salary * 2"))
            .group_field("status"),
    )
    .expect("Failed to aggregate over expressions");
    assert_eq!(
        dao.connection().last_query(),
        Some(
            "SELECT COUNT(*) AS count_all, SUM(_t_0.salary * 2) AS salary_2, _t_0.status \
             FROM Employee _t_0 \
             GROUP BY _t_0.status"
        )
    );
    assert_eq!(dao.connection().queries.len(), 4);
}
