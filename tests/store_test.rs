//! `DatabaseStore` against sea-orm's mock MySQL connection.
//!
//! Run with: cargo test --test store_test

use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, Value};

use iot_dashboard_api::entity::device;
use iot_dashboard_api::store::{DatabaseStore, DeviceStore};

fn logged_sql(store: DatabaseStore) -> String {
    format!("{:?}", store.into_connection().into_transaction_log())
}

#[tokio::test]
async fn list_devices_decodes_rows_and_orders_by_id() {
    let db = MockDatabase::new(DatabaseBackend::MySql)
        .append_query_results([vec![
            device::Model {
                device_id: 1,
                device_name: "jetson-robot".into(),
                device_type: "robot".into(),
                description: Some("AGV".into()),
            },
            device::Model {
                device_id: 5,
                device_name: "gripper-servo".into(),
                device_type: "servo".into(),
                description: None,
            },
        ]])
        .into_connection();
    let store = DatabaseStore::new(db);

    let devices = store.list_devices().await.unwrap();
    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].device_name, "jetson-robot");
    assert_eq!(devices[1].description, None);

    let sql = logged_sql(store);
    assert!(sql.contains("FROM `device`"));
    assert!(sql.contains("ORDER BY `device`.`device_id` ASC"));
}

#[tokio::test]
async fn find_device_returns_none_for_empty_result() {
    let db = MockDatabase::new(DatabaseBackend::MySql)
        .append_query_results([Vec::<device::Model>::new()])
        .into_connection();
    let store = DatabaseStore::new(db);

    assert_eq!(store.find_device(77).await.unwrap(), None);
}

#[tokio::test]
async fn recent_events_join_device_and_limit() {
    let time = Utc.with_ymd_and_hms(2025, 5, 20, 9, 30, 0).unwrap();
    let row = BTreeMap::from([
        ("event_id", Value::from(101)),
        ("device_id", Value::from(1)),
        ("device_name", Value::from("jetson-robot")),
        ("event_time", Value::from(time)),
        ("event_type", Value::from("pick_up")),
        ("note", Value::from(Option::<String>::None)),
    ]);
    let db = MockDatabase::new(DatabaseBackend::MySql)
        .append_query_results([vec![row]])
        .into_connection();
    let store = DatabaseStore::new(db);

    let events = store.recent_events(100).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].device_name, "jetson-robot");
    assert_eq!(events[0].event_time, time);
    assert_eq!(events[0].note, None);

    let sql = logged_sql(store);
    assert!(sql.contains("INNER JOIN `device`"));
    assert!(sql.contains("ORDER BY `event`.`event_time` DESC"));
    assert!(sql.contains("LIMIT"));
}

#[tokio::test]
async fn latest_device_readings_filter_by_device() {
    let time = Utc.with_ymd_and_hms(2025, 5, 20, 9, 30, 0).unwrap();
    let row = BTreeMap::from([
        ("reading_id", Value::from(201)),
        ("reading_time", Value::from(time)),
        ("metric", Value::from("battery")),
        ("value_float", Value::from(87.5)),
        ("threshold", Value::from(Some(20.0))),
        ("unit", Value::from("%")),
    ]);
    let db = MockDatabase::new(DatabaseBackend::MySql)
        .append_query_results([vec![row]])
        .into_connection();
    let store = DatabaseStore::new(db);

    let readings = store.latest_device_readings(1, 10).await.unwrap();
    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0].threshold, Some(20.0));
    assert_eq!(readings[0].unit.as_deref(), Some("%"));

    let sql = logged_sql(store);
    assert!(sql.contains("WHERE `sensor_reading`.`device_id` = ?"));
    assert!(sql.contains("ORDER BY `sensor_reading`.`reading_time` DESC"));
}

#[tokio::test]
async fn event_type_counts_group_by_type() {
    let rows = vec![
        BTreeMap::from([
            ("event_type", Value::from("pick_up")),
            ("count", Value::from(5i64)),
        ]),
        BTreeMap::from([
            ("event_type", Value::from("power_on")),
            ("count", Value::from(3i64)),
        ]),
    ];
    let db = MockDatabase::new(DatabaseBackend::MySql)
        .append_query_results([rows])
        .into_connection();
    let store = DatabaseStore::new(db);

    let counts = store.event_type_counts(1).await.unwrap();
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].event_type, "pick_up");
    assert_eq!(counts[0].count, 5);

    let sql = logged_sql(store);
    assert!(sql.contains("COUNT(*) AS `count`"));
    assert!(sql.contains("GROUP BY `event`.`event_type`"));
}

#[tokio::test]
async fn query_errors_propagate() {
    let db = MockDatabase::new(DatabaseBackend::MySql)
        .append_query_errors([DbErr::Custom("lost connection".into())])
        .into_connection();
    let store = DatabaseStore::new(db);

    assert!(store.recent_readings(100).await.is_err());
}
