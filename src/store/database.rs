use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, RuntimeErr, SqlxMySqlConnector,
};

use crate::config::Config;
use crate::entity::{device, event, sensor_reading};

use super::types::{
    Device, DeviceEvent, DeviceReading, EventTypeCount, EventWithDevice, ReadingWithDevice,
};
use super::DeviceStore;

/// Open the bounded MySQL pool described by `config`.
///
/// Credentials go through `MySqlConnectOptions` rather than a URL, so
/// passwords containing `@`, `/` or `:` need no escaping.
///
/// # Errors
///
/// Returns `DbErr::Conn` if the first connection cannot be established.
pub async fn connect(config: &Config) -> Result<DatabaseConnection, DbErr> {
    let options = MySqlConnectOptions::new()
        .host(&config.db_host)
        .port(config.db_port)
        .username(&config.db_user)
        .password(&config.db_password)
        .database(&config.db_name);

    let pool = MySqlPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_with(options)
        .await
        .map_err(|e| DbErr::Conn(RuntimeErr::SqlxError(e)))?;

    Ok(SqlxMySqlConnector::from_sqlx_mysql_pool(pool))
}

/// [`DeviceStore`] backed by a sea-orm connection pool.
pub struct DatabaseStore {
    db: DatabaseConnection,
}

impl DatabaseStore {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    #[must_use]
    pub fn into_connection(self) -> DatabaseConnection {
        self.db
    }
}

#[async_trait]
impl DeviceStore for DatabaseStore {
    async fn list_devices(&self) -> Result<Vec<Device>, DbErr> {
        device::Entity::find()
            .order_by_asc(device::Column::DeviceId)
            .into_model::<Device>()
            .all(&self.db)
            .await
    }

    async fn find_device(&self, device_id: i32) -> Result<Option<Device>, DbErr> {
        device::Entity::find_by_id(device_id)
            .into_model::<Device>()
            .one(&self.db)
            .await
    }

    async fn recent_events(&self, limit: u64) -> Result<Vec<EventWithDevice>, DbErr> {
        event::Entity::find()
            .select_only()
            .column(event::Column::EventId)
            .column(event::Column::DeviceId)
            .column(device::Column::DeviceName)
            .column(event::Column::EventTime)
            .column(event::Column::EventType)
            .column(event::Column::Note)
            .join(JoinType::InnerJoin, event::Relation::Device.def())
            .order_by_desc(event::Column::EventTime)
            .limit(limit)
            .into_model::<EventWithDevice>()
            .all(&self.db)
            .await
    }

    async fn recent_readings(&self, limit: u64) -> Result<Vec<ReadingWithDevice>, DbErr> {
        sensor_reading::Entity::find()
            .select_only()
            .column(sensor_reading::Column::ReadingId)
            .column(sensor_reading::Column::DeviceId)
            .column(device::Column::DeviceName)
            .column(sensor_reading::Column::Metric)
            .column(sensor_reading::Column::ReadingTime)
            .column(sensor_reading::Column::ValueFloat)
            .column(sensor_reading::Column::Threshold)
            .column(sensor_reading::Column::Unit)
            .join(JoinType::InnerJoin, sensor_reading::Relation::Device.def())
            .order_by_desc(sensor_reading::Column::ReadingTime)
            .limit(limit)
            .into_model::<ReadingWithDevice>()
            .all(&self.db)
            .await
    }

    async fn latest_device_events(
        &self,
        device_id: i32,
        limit: u64,
    ) -> Result<Vec<DeviceEvent>, DbErr> {
        event::Entity::find()
            .select_only()
            .columns([
                event::Column::EventId,
                event::Column::EventTime,
                event::Column::EventType,
                event::Column::Note,
            ])
            .filter(event::Column::DeviceId.eq(device_id))
            .order_by_desc(event::Column::EventTime)
            .limit(limit)
            .into_model::<DeviceEvent>()
            .all(&self.db)
            .await
    }

    async fn latest_device_readings(
        &self,
        device_id: i32,
        limit: u64,
    ) -> Result<Vec<DeviceReading>, DbErr> {
        sensor_reading::Entity::find()
            .select_only()
            .columns([
                sensor_reading::Column::ReadingId,
                sensor_reading::Column::ReadingTime,
                sensor_reading::Column::Metric,
                sensor_reading::Column::ValueFloat,
                sensor_reading::Column::Threshold,
                sensor_reading::Column::Unit,
            ])
            .filter(sensor_reading::Column::DeviceId.eq(device_id))
            .order_by_desc(sensor_reading::Column::ReadingTime)
            .limit(limit)
            .into_model::<DeviceReading>()
            .all(&self.db)
            .await
    }

    async fn event_type_counts(&self, device_id: i32) -> Result<Vec<EventTypeCount>, DbErr> {
        event::Entity::find()
            .select_only()
            .column(event::Column::EventType)
            .column_as(Expr::cust("COUNT(*)"), "count")
            .filter(event::Column::DeviceId.eq(device_id))
            .group_by(event::Column::EventType)
            .order_by_asc(event::Column::EventType)
            .into_model::<EventTypeCount>()
            .all(&self.db)
            .await
    }
}
