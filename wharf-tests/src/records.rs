use crate::{Department, Employee, Project, mock_dao, silent_logs};
use wharf_core::{AsValue, Driver, Identifier};

pub fn records<D: Driver + Clone + Default>(driver: &D) {
    let mut dao = mock_dao(driver);

    // Persist and get
    let ada = Employee::new(1, "Ada", "active", 5200);
    dao.persist(&ada).expect("Failed to persist Ada");
    dao.persist(&Employee::new(2, "Alan", "active", 4800))
        .expect("Failed to persist Alan");
    assert_eq!(dao.connection().records("Employee").len(), 2);
    let found = dao
        .get::<Employee>(1i64)
        .expect("Failed to get the employee 1");
    assert_eq!(found.as_ref(), Some(&ada));
    let missing = dao
        .get::<Employee>(99i64)
        .expect("Failed to get the employee 99");
    assert_eq!(missing, None);

    // Persisting again updates in place
    let mut promoted = ada.clone();
    promoted.status = "lead".into();
    dao.persist(&promoted).expect("Failed to update Ada");
    assert_eq!(dao.connection().records("Employee").len(), 2);

    // Load by identifier
    let mut stale = ada.clone();
    assert!(dao.load(&mut stale, None).expect("Failed to load Ada"));
    assert_eq!(stale.status, "lead");

    // Load by a unique field set
    let mut by_name = Employee::new(0, "Alan", "", 0);
    assert!(
        dao.load(&mut by_name, Some(&["name"][..]))
            .expect("Failed to load Alan by name")
    );
    assert_eq!(by_name, Employee::new(2, "Alan", "active", 4800));
    let mut nobody = Employee::new(0, "Nobody", "", 0);
    assert!(
        !dao.load(&mut nobody, Some(&["name", "status"][..]))
            .expect("Failed to load a missing employee")
    );
    assert_eq!(nobody.name, "Nobody");
    let result = silent_logs! { dao.load(&mut nobody, Some(&["nickname"][..])) };
    assert!(result.is_err());

    // Composite identifiers
    let project = Project {
        code: "WHARF".into(),
        year: 2025,
        title: "Data access".into(),
    };
    dao.persist(&project).expect("Failed to persist the project");
    let found = dao
        .get::<Project>(Identifier::composite([
            ("code", "WHARF".to_string().as_value()),
            ("year", 2025i32.as_value()),
        ]))
        .expect("Failed to get the project");
    assert_eq!(found, Some(project.clone()));

    // Delete
    dao.delete(&project).expect("Failed to delete the project");
    assert!(dao.connection().records("Project").is_empty());
    let removed = dao
        .delete_by_id::<Employee>(2i64)
        .expect("Failed to delete the employee 2");
    assert_eq!(removed, Some(Employee::new(2, "Alan", "active", 4800)));
    assert_eq!(dao.connection().records("Employee").len(), 1);
    let removed = dao
        .delete_by_id::<Employee>(2i64)
        .expect("Failed to delete a missing employee");
    assert_eq!(removed, None);
    let result = silent_logs! { dao.delete(&Department { id: 3, name: "Legal".into() }) };
    assert!(result.is_err());
    assert!(dao.last_error().is_some());

    // Record operations never compile expressions
    assert!(dao.connection().queries.is_empty());
}
