#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use time::{Date, Month};
    use uuid::Uuid;
    use wharf_core::{AsValue, Identifier, RowLabeled, Value};

    #[test]
    fn value_none() {
        assert_eq!(Value::Null, Value::Null);
        assert_ne!(Value::Float32(Some(1.0)), Value::Null);
        assert!(Value::Varchar(None).is_null());
        assert!(!Value::Varchar(Some("".into())).is_null());
        assert_eq!(Value::Int32(Some(3)).as_type(), Value::Int32(None));
    }

    #[test]
    fn value_bool() {
        let val: Value = true.into();
        assert_eq!(val, Value::Boolean(Some(true)));
        assert_ne!(val, Value::Boolean(Some(false)));
        assert_ne!(val, Value::Boolean(None));
        assert_ne!(val, Value::Varchar(Some("true".into())));
        assert_eq!(bool::try_from_value(val).unwrap(), true);
        assert_eq!(bool::try_from_value((1 as i8).into()).unwrap(), true);
        assert_eq!(bool::try_from_value((0 as i32).into()).unwrap(), false);
        assert_eq!(bool::try_from_value((2 as u64).into()).unwrap(), true);
        assert!(bool::try_from_value((0.5 as f32).into()).is_err());
    }

    #[test]
    fn value_integers() {
        let val: Value = (-32768 as i16).into();
        assert_eq!(val, Value::Int16(Some(-32768)));
        assert_ne!(val, Value::Int32(Some(-32768)));
        assert_eq!(i16::try_from_value(val).unwrap(), -32768);
        assert_eq!(i8::try_from_value((99 as u8).into()).unwrap(), 99);
        assert_eq!(i64::try_from_value((-1 as i32).into()).unwrap(), -1);
        assert_eq!(
            i64::try_from_value((12345678901234 as u64).into()).unwrap(),
            12345678901234
        );
        assert_eq!(u64::try_from_value((77 as i64).into()).unwrap(), 77);
        assert!(i8::try_from_value((0.1 as f64).into()).is_err());
        assert!(i8::try_from_value((300 as i32).into()).is_err());
        assert!(u32::try_from_value((-1 as i64).into()).is_err());
        assert!(i32::try_from_value(Value::Varchar(Some("1".into()))).is_err());
    }

    #[test]
    fn value_integer_from_decimal() {
        assert_eq!(
            i64::try_from_value(Decimal::from(42).as_value()).unwrap(),
            42
        );
        assert_eq!(
            u8::try_from_value(Decimal::from_str("7.00").unwrap().as_value()).unwrap(),
            7
        );
        assert!(i32::try_from_value(Decimal::from_str("7.5").unwrap().as_value()).is_err());
    }

    #[test]
    fn value_floats_and_decimals() {
        assert_eq!(f64::try_from_value((1.5 as f32).into()).unwrap(), 1.5);
        assert_eq!(f32::try_from_value((3 as i16).into()).unwrap(), 3.0);
        assert_eq!(f32::try_from_value((0.25 as f32).into()).unwrap(), 0.25);
        assert_eq!(f32::try_from_value((0.75 as f64).into()).unwrap(), 0.75);
        assert_eq!(f64::try_from_value((8.5 as f64).into()).unwrap(), 8.5);
        assert_eq!(
            f64::try_from_value(Decimal::from_str("2.25").unwrap().as_value()).unwrap(),
            2.25
        );
        assert_eq!(
            Decimal::try_from_value((12 as u32).into()).unwrap(),
            Decimal::from(12)
        );
        assert_eq!(
            Decimal::try_from_value((0.5 as f64).into()).unwrap(),
            Decimal::from_str("0.5").unwrap()
        );
        assert!(Decimal::try_from_value(Value::Boolean(Some(true))).is_err());
    }

    #[test]
    fn value_plain() {
        let date = Date::from_calendar_date(2025, Month::March, 14).unwrap();
        assert_eq!(Date::try_from_value(date.as_value()).unwrap(), date);
        let uuid = Uuid::from_str("5e915574-bb30-4430-98cf-c5854f61fbbd").unwrap();
        assert_eq!(Uuid::try_from_value(uuid.into()).unwrap(), uuid);
        assert_eq!(Value::from("hello"), Value::Varchar(Some("hello".into())));
        assert!(String::try_from_value(Value::Int32(Some(1))).is_err());
    }

    #[test]
    fn value_option() {
        assert_eq!(None::<i32>.as_value(), Value::Int32(None));
        assert_eq!(Some(5i32).as_value(), Value::Int32(Some(5)));
        assert_eq!(Option::<String>::try_from_value(Value::Null).unwrap(), None);
        assert_eq!(
            Option::<String>::try_from_value(Value::Varchar(None)).unwrap(),
            None
        );
        assert_eq!(
            Option::<i64>::try_from_value(Value::Int8(Some(4))).unwrap(),
            Some(4)
        );
    }

    #[test]
    fn value_list() {
        let val = vec![1i64, 2, 3].as_value();
        assert!(val.is_list());
        assert!(val.same_type(&Vec::<i64>::as_empty_value()));
        assert!(!val.same_type(&Vec::<String>::as_empty_value()));
        assert_eq!(Vec::<i64>::try_from_value(val).unwrap(), [1, 2, 3]);
        assert!(Vec::<i64>::try_from_value(Value::Int64(Some(1))).is_err());
    }

    #[test]
    fn row_labeled() {
        let row = RowLabeled::from_iter([
            ("id", 7i64.as_value()),
            ("name", Value::from("Ada")),
            ("manager", Value::Int64(None)),
        ]);
        assert_eq!(row.names(), ["id", "name", "manager"]);
        assert_eq!(row.get_as::<i64>("id").unwrap(), 7);
        assert_eq!(row.get_as::<String>("name").unwrap(), "Ada");
        assert_eq!(row.get_as::<Option<i64>>("manager").unwrap(), None);
        assert!(row.get_as::<i64>("salary").is_err());
        assert!(row.get_as::<i64>("name").is_err());
        assert_eq!(
            row.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            ["id", "name", "manager"]
        );
    }

    #[test]
    fn identifier() {
        assert_eq!(Identifier::from(3i64), Identifier::Single(Value::Int64(Some(3))));
        assert_eq!(
            Identifier::from_params([("id".to_string(), Value::from("a"))].into()),
            Identifier::Single(Value::from("a"))
        );
        let composite = Identifier::composite([("code", Value::from("X")), ("year", 2025i32.into())]);
        assert!(matches!(composite, Identifier::Composite(ref v) if v.len() == 2));
        assert_eq!(
            Identifier::from_params(
                [
                    ("code".to_string(), Value::from("X")),
                    ("year".to_string(), Value::Int32(Some(2025))),
                ]
                .into()
            ),
            composite
        );
    }
}
