#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use slate::{AsValue, ColumnDef, Value};
    use std::str::FromStr;
    use time::{
        Date, OffsetDateTime, PrimitiveDateTime, Time,
        macros::{date, datetime, time},
    };
    use uuid::Uuid;

    #[test]
    fn prototypes() {
        assert_eq!(i32::as_empty_value(), Value::Int32(None));
        assert_eq!(Option::<String>::as_empty_value(), Value::Varchar(None));
        assert_eq!(
            Vec::<u8>::as_empty_value(),
            Value::List(None, Box::new(Value::UInt8(None)))
        );
        assert!(Value::Decimal(None, 10, 2).is_null());
        assert!(!Value::Boolean(Some(false)).is_null());
        assert!(Value::Int64(Some(3)).same_type(&Value::Int64(None)));
        assert!(!Value::Int64(Some(3)).same_type(&Value::Int32(None)));
        assert!(!Value::Decimal(None, 10, 2).same_type(&Value::Decimal(None, 12, 2)));

        let column = ColumnDef::new("amount", Value::Int16(Some(5)));
        assert_eq!(column.value, Value::Int16(None));
        assert!(column.nullable);
        assert_eq!(column.property(), "amount");
        assert_eq!(column.clone().alias("total").property(), "total");
    }

    #[test]
    fn integers() {
        assert_eq!(i64::try_from_value(Value::Int8(Some(-3))).unwrap(), -3);
        assert_eq!(u8::try_from_value(Value::Int64(Some(200))).unwrap(), 200);
        assert_eq!(i32::try_from_value(" 42 ".into()).unwrap(), 42);
        assert!(u8::try_from_value(Value::Int64(Some(256))).is_err());
        assert!(u32::try_from_value(Value::Int32(Some(-1))).is_err());
        assert!(i64::try_from_value(Value::Int64(None)).is_err());
        assert!(i64::try_from_value(Value::Float64(Some(1.0))).is_err());
        assert_eq!(
            u64::try_from_value(Value::Int64(Some(i64::MAX))).unwrap(),
            i64::MAX as u64
        );
    }

    #[test]
    fn booleans() {
        assert!(bool::try_from_value(Value::Int64(Some(1))).unwrap());
        assert!(!bool::try_from_value(Value::Int32(Some(0))).unwrap());
        assert!(bool::try_from_value("true".into()).unwrap());
        assert!(!bool::try_from_value("0".into()).unwrap());
        assert!(bool::try_from_value("yes".into()).is_err());
    }

    #[test]
    fn floats_and_decimals() {
        assert_eq!(f64::try_from_value(Value::Int64(Some(3))).unwrap(), 3.0);
        assert_eq!(f32::try_from_value(Value::Float64(Some(0.5))).unwrap(), 0.5);
        assert_eq!(f64::try_from_value("2.25".into()).unwrap(), 2.25);
        assert_eq!(
            f64::try_from_value(Value::Decimal(Some(Decimal::new(125, 2)), 0, 0)).unwrap(),
            1.25
        );
        let decimal = Decimal::from_str("1234.56").unwrap();
        assert_eq!(Decimal::try_from_value("1234.56".into()).unwrap(), decimal);
        assert_eq!(
            Decimal::try_from_value(Value::Int64(Some(7))).unwrap(),
            Decimal::from(7)
        );
        assert_eq!(
            Decimal::try_from_value(Value::Float64(Some(0.5))).unwrap(),
            Decimal::new(5, 1)
        );
        assert!(Decimal::try_from_value("abc".into()).is_err());
    }

    #[test]
    fn temporal() {
        assert_eq!(
            Date::try_from_value("2024-02-29".into()).unwrap(),
            date!(2024 - 02 - 29)
        );
        assert_eq!(
            Date::try_from_value(Value::Timestamp(Some(datetime!(2020 - 01 - 02 03:04:05))))
                .unwrap(),
            date!(2020 - 01 - 02)
        );
        assert_eq!(
            Time::try_from_value("23:59:58".into()).unwrap(),
            time!(23:59:58)
        );
        assert_eq!(
            Time::try_from_value("08:30:00.25".into()).unwrap(),
            time!(08:30:00.25)
        );
        assert_eq!(
            PrimitiveDateTime::try_from_value("1999-12-31 23:59:59".into()).unwrap(),
            datetime!(1999 - 12 - 31 23:59:59)
        );
        assert_eq!(
            PrimitiveDateTime::try_from_value("1999-12-31T23:59:59".into()).unwrap(),
            datetime!(1999 - 12 - 31 23:59:59)
        );
        assert_eq!(
            PrimitiveDateTime::try_from_value(Value::TimestampWithTimezone(Some(datetime!(
                2024 - 06 - 01 10:30:00 +02:00
            ))))
            .unwrap(),
            datetime!(2024 - 06 - 01 08:30:00)
        );
        assert_eq!(
            OffsetDateTime::try_from_value("2024-06-01T08:30:00Z".into()).unwrap(),
            datetime!(2024 - 06 - 01 08:30:00 UTC)
        );
        assert_eq!(
            OffsetDateTime::try_from_value(Value::Timestamp(Some(datetime!(
                2024 - 06 - 01 08:30:00
            ))))
            .unwrap(),
            datetime!(2024 - 06 - 01 08:30:00 UTC)
        );
        assert!(Date::try_from_value("31/12/1999".into()).is_err());
    }

    #[test]
    fn uuid_and_blob() {
        let text = "5e915574-bb30-4430-98cf-c5854f61fbbd";
        let uuid = Uuid::parse_str(text).unwrap();
        assert_eq!(Uuid::try_from_value(text.into()).unwrap(), uuid);
        assert_eq!(
            Uuid::try_from_value(Value::Blob(Some(uuid.as_bytes().to_vec().into()))).unwrap(),
            uuid
        );
        assert!(Uuid::try_from_value("not-a-uuid".into()).is_err());
        assert_eq!(
            Box::<[u8]>::try_from_value("abc".into()).unwrap().as_ref(),
            b"abc"
        );
    }

    #[test]
    fn options() {
        assert_eq!(
            Option::<i32>::try_from_value(Value::Int32(None)).unwrap(),
            None
        );
        assert_eq!(Option::<i32>::try_from_value(Value::Null).unwrap(), None);
        assert_eq!(
            Option::<String>::try_from_value("x".into()).unwrap(),
            Some("x".to_string())
        );
        assert!(Option::<i32>::try_from_value("x".into()).is_err());
        assert_eq!(Some(5i16).as_value(), Value::Int16(Some(5)));
        assert_eq!(None::<i16>.as_value(), Value::Int16(None));
        assert_eq!(
            vec![1u16, 2].as_value(),
            Value::List(
                Some(vec![Value::UInt16(Some(1)), Value::UInt16(Some(2))]),
                Box::new(Value::UInt16(None))
            )
        );
        assert_eq!(
            Vec::<u16>::try_from_value(Value::List(
                Some(vec![Value::Int64(Some(1)), Value::Int32(Some(2))]),
                Box::new(Value::Int64(None))
            ))
            .unwrap(),
            [1, 2]
        );
    }
}
