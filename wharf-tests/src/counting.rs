use crate::{Employee, Project, mock_dao, silent_logs};
use wharf_core::{AsValue, Driver, ListQuery, RowLabeled};

pub fn counting<D: Driver + Clone + Default>(driver: &D) {
    let mut dao = mock_dao(driver);

    dao.connection_mut()
        .respond([RowLabeled::from_iter([("COUNT", 3i64.as_value())])]);
    let count = dao
        .count::<Employee>(
            &ListQuery::new()
                .filter("badge.code LIKE :code")
                .param("code", "R-%")
                .order_by("name"),
        )
        .expect("Failed to count the employees");
    assert_eq!(count, 3);
    assert_eq!(
        dao.connection().last_query(),
        Some(
            "SELECT COUNT(_t_0.id) FROM Employee _t_0 \
             LEFT JOIN _t_0.badge _badge_3 \
             WHERE _badge_3.code LIKE :code"
        )
    );

    // Without filter, counted by the first identifier field
    dao.connection_mut()
        .respond([RowLabeled::from_iter([("COUNT", 12u32.as_value())])]);
    let count = dao
        .count::<Project>(&ListQuery::new())
        .expect("Failed to count the projects");
    assert_eq!(count, 12);
    assert_eq!(
        dao.connection().last_query(),
        Some("SELECT COUNT(_t_0.code) FROM Project _t_0")
    );

    // A statement without result is an error
    let result = silent_logs! { dao.count::<Employee>(&ListQuery::new()) };
    assert!(result.is_err());
    assert!(dao.last_error().is_some());
}
