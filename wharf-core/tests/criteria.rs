#[cfg(test)]
mod tests {
    use wharf_core::{Aggregate, GroupQuery, ListQuery, Session};

    #[test]
    fn aggregate_labels() {
        assert_eq!(Aggregate::new("SUM", "salary").label(), "salary");
        assert_eq!(
            Aggregate::new("MAX", " department.name ").label(),
            "department_name"
        );
        assert_eq!(Aggregate::new("SUM", "salary * 2").label(), "salary_2");
        assert_eq!(Aggregate::new("COUNT", "*").label(), "count_all");
        assert_eq!(Aggregate::new("count", "").label(), "count_all");
        assert_eq!(
            Aggregate::new("COUNT", "*").alias("employees").label(),
            "employees"
        );
    }

    #[test]
    fn pagination() {
        assert_eq!(ListQuery::new().page(20, 10).pagination(), Some((20, 10)));
        assert_eq!(ListQuery::new().offset(20).pagination(), None);
        assert_eq!(ListQuery::new().limit(10).pagination(), None);
        assert!(GroupQuery::new().filter("status = :status").is_empty());
        assert!(!GroupQuery::new().group_field("status").is_empty());
    }

    #[test]
    fn session_transaction() {
        let mut session = Session::new();
        assert!(session.end("commit").is_err());
        session.begin().expect("Failed to begin");
        assert!(session.begin().is_err());
        assert!(session.transaction_active());
        session.reset();
        assert!(!session.transaction_active());
        session.begin().expect("Failed to begin after the reset");
        session.end("rollback").expect("Failed to roll back");
        assert!(!session.transaction_active());
    }
}
