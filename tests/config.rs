#[cfg(test)]
mod tests {
    use url::Url;
    use wharf::DaoConfig;

    fn parse(url: &str) -> wharf::Result<DaoConfig> {
        DaoConfig::from_url(&Url::parse(url).expect("Invalid test URL"))
    }

    #[test]
    fn defaults() {
        let config = DaoConfig::default();
        assert_eq!(config.root_alias, "_t_0");
        assert_eq!(config.max_join_depth, 4);
        assert!(!config.log_queries);
        assert_eq!(parse("mysql://localhost/shop").unwrap(), config);
    }

    #[test]
    fn options() {
        let config =
            parse("sqlite://shop.db?root_alias=root&max_join_depth=7&log_queries=yes&mode=rwc")
                .expect("Failed to read the options");
        assert_eq!(
            config,
            DaoConfig {
                root_alias: "root".into(),
                max_join_depth: 7,
                log_queries: true,
            }
        );
        assert!(!parse("mysql://localhost/shop?log_queries=0").unwrap().log_queries);
    }

    #[test]
    fn invalid_options() {
        assert!(parse("mysql://localhost/shop?max_join_depth=-1").is_err());
        assert!(parse("mysql://localhost/shop?max_join_depth=deep").is_err());
        assert!(parse("mysql://localhost/shop?log_queries=maybe").is_err());
        assert!(parse("mysql://localhost/shop?root_alias=").is_err());
        assert!(parse("mysql://localhost/shop?root_alias=a%20b").is_err());
    }

    #[test]
    fn connection_url() {
        let config = DaoConfig::from_connection_url("mysql://localhost/shop?max_join_depth=1", "mysql")
            .expect("Failed to read the connection URL");
        assert_eq!(config.max_join_depth, 1);
        let error = DaoConfig::from_connection_url("sqlite://shop.db", "mysql")
            .expect_err("The scheme does not match");
        assert!(error.to_string().contains("`sqlite`"));
        let error = DaoConfig::from_connection_url("//user:secret@localhost/shop", "mysql")
            .expect_err("The URL is not valid");
        assert!(!format!("{:#}", error).contains("secret"));
    }
}
