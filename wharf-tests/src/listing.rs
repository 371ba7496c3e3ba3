use crate::{Employee, mock_dao};
use wharf_core::{Driver, Entity, ListQuery};

pub fn listing<D: Driver + Clone + Default>(driver: &D) {
    let mut dao = mock_dao(driver);

    // Root fields and a single join
    dao.connection_mut().respond([
        Employee::new(1, "Ada", "active", 5200).row(),
        Employee::new(2, "Alan", "active", 4800).row(),
    ]);
    let employees = dao
        .list::<Employee>(
            &ListQuery::new()
                .filter("status = :status AND department.name = :department")
                .param("status", "active")
                .param("department", "Research")
                .order_by("name ASC"),
        )
        .expect("Failed to list the employees");
    assert_eq!(
        employees,
        [
            Employee::new(1, "Ada", "active", 5200),
            Employee::new(2, "Alan", "active", 4800),
        ]
    );
    let query = dao.connection().queries.last().expect("No query was issued");
    assert_eq!(
        query.text,
        "SELECT _t_0, _department_1 FROM Employee _t_0 \
         LEFT JOIN _t_0.department _department_1 \
         WHERE _t_0.status = :status AND _department_1.name = :department \
         ORDER BY _t_0.name ASC"
    );
    assert_eq!(query.params.len(), 2);
    assert!(!query.is_paginated());

    // Deep path brings every ancestor join along
    dao.list::<Employee>(
        &ListQuery::new()
            .filter("manager.department.company.name = :company")
            .param("company", "Initech"),
    )
    .expect("Failed to list by company of the manager");
    assert_eq!(
        dao.connection().last_query(),
        Some(
            "SELECT _t_0, _manager_4, _department_5, _company_6 FROM Employee _t_0 \
             LEFT JOIN _t_0.manager _manager_4 \
             LEFT JOIN _manager_4.department _department_5 \
             LEFT JOIN _department_5.company _company_6 \
             WHERE _company_6.name = :company"
        )
    );

    // Paths across to-many associations are not joined
    dao.list::<Employee>(&ListQuery::new().filter("projects.title = :title"))
        .expect("Failed to list with an unresolved path");
    assert_eq!(
        dao.connection().last_query(),
        Some("SELECT _t_0 FROM Employee _t_0 WHERE projects.title = :title")
    );

    // Field and parameter with the same name
    dao.list::<Employee>(
        &ListQuery::new()
            .filter("status = :status OR LOWER(name) LIKE :name")
            .order_by("salary DESC, id"),
    )
    .expect("Failed to list with a parameter named like a field");
    assert_eq!(
        dao.connection().last_query(),
        Some(
            "SELECT _t_0 FROM Employee _t_0 \
             WHERE _t_0.status = :status OR LOWER(_t_0.name) LIKE :name \
             ORDER BY _t_0.salary DESC, _t_0.id"
        )
    );

    // Pagination
    dao.list::<Employee>(&ListQuery::new().page(20, 10))
        .expect("Failed to list a page");
    let query = dao.connection().queries.last().expect("No query was issued");
    assert_eq!(query.text, "SELECT _t_0 FROM Employee _t_0");
    assert_eq!(query.first_result, Some(20));
    assert_eq!(query.max_results, Some(10));
    dao.list::<Employee>(&ListQuery::new().offset(5))
        .expect("Failed to list with only an offset");
    assert!(!dao.connection().queries.last().unwrap().is_paginated());
    dao.list::<Employee>(&ListQuery::new().limit(5))
        .expect("Failed to list with only a limit");
    assert!(!dao.connection().queries.last().unwrap().is_paginated());

    // Group by a joined field
    dao.list::<Employee>(&ListQuery::new().group_by("badge.code"))
        .expect("Failed to list grouped");
    assert_eq!(
        dao.connection().last_query(),
        Some(
            "SELECT _t_0, _badge_3 FROM Employee _t_0 \
             LEFT JOIN _t_0.badge _badge_3 \
             GROUP BY _badge_3.code"
        )
    );

    // First element
    dao.connection_mut()
        .respond([Employee::new(7, "Grace", "retired", 6100).row()]);
    let employee = dao
        .get_one::<Employee>(&ListQuery::new().filter("id = 7"))
        .expect("Failed to get one employee");
    assert_eq!(employee, Some(Employee::new(7, "Grace", "retired", 6100)));
    let employee = dao
        .get_one::<Employee>(&ListQuery::new().filter("id = 8"))
        .expect("Failed to get a missing employee");
    assert_eq!(employee, None);

    assert_eq!(dao.connection().queries.len(), 10);
    assert_eq!(dao.last_error(), None);
}
