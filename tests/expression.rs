#[cfg(test)]
mod tests {
    use wharf::{
        Cardinality, EntityMetadata, ExpressionCompiler, JoinResolver, StaticMetadata, Token,
        UsedPaths, Value, tokenize,
    };
    use wharf_tests::schema;

    fn compile(expression: &str) -> (String, Vec<String>) {
        let metadata = schema();
        let joins = JoinResolver::new(&metadata, "_t_0", 4)
            .resolve("Employee")
            .expect("Failed to resolve the joins");
        let compiler = ExpressionCompiler::new(&metadata, "Employee", "_t_0", &joins)
            .expect("Failed to create the compiler");
        let compiled = compiler.compile(Some(expression));
        (
            compiled.text,
            compiled.paths.iter().map(String::from).collect(),
        )
    }

    #[test]
    fn empty() {
        let metadata = schema();
        let joins = JoinResolver::new(&metadata, "_t_0", 4)
            .resolve("Employee")
            .unwrap();
        let compiler = ExpressionCompiler::new(&metadata, "Employee", "_t_0", &joins).unwrap();
        let compiled = compiler.compile(None);
        assert!(compiled.is_empty());
        assert!(compiled.paths.is_empty());
        let compiled = compiler.compile(Some(""));
        assert_eq!(compiled.text, "");
        assert!(compiled.paths.is_empty());
        let compiled = compiler.compile(Some("   "));
        assert_eq!(compiled.text, "   ");
        assert!(compiled.paths.is_empty());
    }

    #[test]
    fn root_fields_and_parameters() {
        assert_eq!(
            compile("status = :status"),
            ("_t_0.status = :status".into(), vec![])
        );
        assert_eq!(
            compile("name=:name AND salary>=:salary"),
            ("_t_0.name=:name AND _t_0.salary>=:salary".into(), vec![])
        );
        assert_eq!(
            compile("(id IN (:id) OR id_card = :id)"),
            ("(_t_0.id IN (:id) OR id_card = :id)".into(), vec![])
        );
    }

    #[test]
    fn whole_tokens_only() {
        assert_eq!(compile("valid = 1").0, "valid = 1");
        assert_eq!(compile("names = 'name'").0, "names = 'name'");
        assert_eq!(
            compile("name = 'it''s the name' AND status <> \"status\"").0,
            "_t_0.name = 'it''s the name' AND _t_0.status <> \"status\""
        );
        assert_eq!(compile("salary > 1.5").0, "_t_0.salary > 1.5");
        assert_eq!(compile("name::text = :name").0, "_t_0.name::text = :name");
    }

    #[test]
    fn joined_paths() {
        assert_eq!(
            compile("name = :n AND department.name = :t"),
            (
                "_t_0.name = :n AND _department_1.name = :t".into(),
                vec!["department".into()]
            )
        );
        assert_eq!(
            compile("manager.department.name LIKE :name"),
            (
                "_department_5.name LIKE :name".into(),
                vec!["manager".into(), "manager.department".into()]
            )
        );
        assert_eq!(
            compile("badge.id = manager.badge.id"),
            (
                "_badge_3.id = _badge_7.id".into(),
                vec!["badge".into(), "manager".into(), "manager.badge".into()]
            )
        );
    }

    #[test]
    fn unresolved_paths() {
        assert_eq!(compile("x.y = 1"), ("x.y = 1".into(), vec![]));
        assert_eq!(
            compile("projects.title = :title"),
            ("projects.title = :title".into(), vec![])
        );
        assert_eq!(
            compile("_t_0.name = :name"),
            ("_t_0.name = :name".into(), vec![])
        );
    }

    #[test]
    fn function_calls() {
        let metadata = StaticMetadata::new().with(
            EntityMetadata::new("Reading", "readings")
                .id("id", "id", Value::Int64(None))
                .field("max", "max_value", Value::Float64(None))
                .association("sensor", Cardinality::ManyToOne, "Sensor"),
        );
        let metadata = metadata.with(EntityMetadata::new("Sensor", "sensors"));
        let joins = JoinResolver::new(&metadata, "r", 4).resolve("Reading").unwrap();
        let compiler = ExpressionCompiler::new(&metadata, "Reading", "r", &joins).unwrap();
        assert_eq!(compiler.compile(Some("max(max) > 3")).text, "max(r.max) > 3");
        assert_eq!(compiler.compile(Some("COUNT(id)")).text, "COUNT(r.id)");
    }

    #[test]
    fn shared_used_paths() {
        let metadata = schema();
        let joins = JoinResolver::new(&metadata, "_t_0", 4)
            .resolve("Employee")
            .unwrap();
        let compiler = ExpressionCompiler::new(&metadata, "Employee", "_t_0", &joins).unwrap();
        let mut used = UsedPaths::new();
        let filter = compiler.compile_into("badge.code = :code", &mut used);
        let order = compiler.compile_into("department.company.name DESC", &mut used);
        assert_eq!(filter, "_badge_3.code = :code");
        assert_eq!(order, "_company_2.name DESC");
        assert_eq!(
            used.iter().collect::<Vec<_>>(),
            ["badge", "department", "department.company"]
        );
    }

    #[test]
    fn unknown_entity() {
        let metadata = schema();
        let joins = Default::default();
        assert!(ExpressionCompiler::new(&metadata, "Nobody", "_t_0", &joins).is_err());
    }

    #[test]
    fn tokens() {
        let input = "a.b >= :p AND c::int <> 'x''y' OR `q` = 1.25. ";
        let tokens = tokenize(input);
        assert_eq!(tokens.iter().map(Token::as_str).collect::<String>(), input);
        assert_eq!(
            tokens
                .iter()
                .filter(|v| !matches!(v, Token::Whitespace(..)))
                .copied()
                .collect::<Vec<_>>(),
            [
                Token::Word("a.b"),
                Token::Symbol(">"),
                Token::Symbol("="),
                Token::Parameter(":p"),
                Token::Word("AND"),
                Token::Word("c"),
                Token::Symbol("::"),
                Token::Word("int"),
                Token::Symbol("<"),
                Token::Symbol(">"),
                Token::Literal("'x''y'"),
                Token::Word("OR"),
                Token::Literal("`q`"),
                Token::Symbol("="),
                Token::Number("1.25"),
                Token::Symbol("."),
            ]
        );
        assert_eq!(
            tokenize("'open"),
            [Token::Literal("'open")],
        );
        assert_eq!(tokenize("a."), [Token::Word("a"), Token::Symbol(".")]);
        assert_eq!(tokenize(": x"), [Token::Symbol(":"), Token::Whitespace(" "), Token::Word("x")]);
    }
}
