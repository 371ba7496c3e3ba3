use crate::{Employee, Project, mock_dao, silent_logs};
use wharf_core::{Driver, ListQuery};

pub fn deleting<D: Driver + Clone + Default>(driver: &D) {
    let mut dao = mock_dao(driver);

    dao.connection_mut().respond_affected(2);
    let affected = dao
        .delete_by_filter::<Employee>(
            &ListQuery::new()
                .filter("salary < :min AND badge.code IS NULL")
                .param("min", 1000),
        )
        .expect("Failed to delete the employees");
    assert_eq!(affected, 2);
    assert_eq!(
        dao.connection().last_query(),
        Some(
            "DELETE FROM Employee _t_0 \
             JOIN _t_0.badge _badge_3 \
             WHERE _t_0.salary < :min AND _badge_3.code IS NULL"
        )
    );

    // Without filter every record goes
    dao.connection_mut().respond_affected(11);
    let affected = dao
        .delete_by_filter::<Project>(&ListQuery::new())
        .expect("Failed to delete the projects");
    assert_eq!(affected, 11);
    assert_eq!(
        dao.connection().last_query(),
        Some("DELETE FROM Project _t_0")
    );

    // Engine failures are recorded and returned unchanged
    dao.connection_mut().fail("Lock wait timeout exceeded");
    let result = silent_logs! {
        dao.delete_by_filter::<Employee>(&ListQuery::new().filter("status = 'gone'"))
    };
    let error = result.expect_err("The failure was swallowed");
    assert_eq!(error.to_string(), "Lock wait timeout exceeded");
    assert_eq!(dao.last_error(), Some("Lock wait timeout exceeded"));
    assert_eq!(
        dao.connection().last_query(),
        Some("DELETE FROM Employee _t_0 WHERE _t_0.status = 'gone'")
    );
}
