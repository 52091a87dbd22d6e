use rust_decimal::Decimal;
use slate::{ColumnDef, Database, Executor, Repository, TableDef, entity};
use std::str::FromStr;
use time::{
    Date, Month, OffsetDateTime, PrimitiveDateTime, Time,
    macros::{date, datetime, time},
};
use uuid::Uuid;

#[derive(Default, Debug, Clone, PartialEq)]
struct Sample {
    id: i64,
    flag: bool,
    small: i16,
    unsigned: u32,
    ratio: f64,
    amount: Option<Decimal>,
    balance: Option<Decimal>,
    day: Option<Date>,
    clock: Option<Time>,
    moment: Option<PrimitiveDateTime>,
    zoned: Option<OffsetDateTime>,
    key: Option<Uuid>,
    payload: Option<Box<[u8]>>,
    note: Option<String>,
}
entity!(Sample {
    id,
    flag,
    small,
    unsigned,
    ratio,
    amount,
    balance,
    day,
    clock,
    moment,
    zoned,
    key,
    payload,
    note,
});

pub async fn types<E: Executor>(executor: &mut E, database: &mut Database) {
    database
        .create_or_alter(
            TableDef::new("sample")
                .column(ColumnDef::of::<i64>("id").primary_key())
                .column(ColumnDef::of::<bool>("flag").not_null())
                .column(ColumnDef::of::<i16>("small").not_null())
                .column(ColumnDef::of::<u32>("unsigned").not_null())
                .column(ColumnDef::of::<f64>("ratio").not_null())
                .column(ColumnDef::of::<Decimal>("amount").precision(10, 2))
                .column(ColumnDef::of::<Decimal>("balance").precision(28, 4))
                .column(ColumnDef::of::<Date>("day"))
                .column(ColumnDef::of::<Time>("clock"))
                .column(ColumnDef::of::<PrimitiveDateTime>("moment"))
                .column(ColumnDef::of::<OffsetDateTime>("zoned"))
                .column(ColumnDef::of::<Uuid>("key"))
                .column(ColumnDef::of::<Box<[u8]>>("payload"))
                .column(ColumnDef::of::<String>("note")),
        )
        .commit(executor)
        .await
        .expect("Failed to create sample");
    let repository =
        Repository::<Sample>::new(database, "sample").expect("Failed to build the repository");

    let full = Sample {
        id: 1,
        flag: true,
        small: -32000,
        unsigned: 4_000_000_000,
        ratio: 0.125,
        amount: Some(Decimal::from_str("1234.5").expect("Invalid decimal")),
        // More digits than a double holds
        balance: Some(Decimal::from_str("1234567890123456.7891").expect("Invalid decimal")),
        day: Some(date!(2024 - 02 - 29)),
        clock: Some(time!(23:59:58)),
        moment: Some(datetime!(1999 - 12 - 31 23:59:59)),
        zoned: Some(datetime!(2024 - 06 - 01 08:30:00 UTC)),
        key: Some(
            Uuid::parse_str("5e915574-bb30-4430-98cf-c5854f61fbbd").expect("Invalid uuid"),
        ),
        payload: Some([0u8, 1, 2, 254, 255].into()),
        note: Some("complete".into()),
    };
    let empty = Sample {
        id: 2,
        flag: false,
        ratio: -1.5,
        day: Date::from_calendar_date(1970, Month::January, 1).ok(),
        ..Default::default()
    };
    assert_eq!(
        repository
            .insert_batch(executor, [&full, &empty], None)
            .await
            .expect("Failed to insert the samples"),
        2
    );
    for expected in [&full, &empty] {
        let found = repository
            .find_by_id(executor, expected.id)
            .await
            .expect("Failed to find the sample")
            .expect("The sample is missing");
        assert_eq!(&found, expected);
    }
}
