use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ========== DEVICE ==========
        manager
            .create_table(
                Table::create()
                    .table(Device::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Device::DeviceId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Device::DeviceName).string_len(100).not_null())
                    .col(ColumnDef::new(Device::DeviceType).string_len(50).not_null())
                    .col(ColumnDef::new(Device::Description).text())
                    .to_owned(),
            )
            .await?;

        // ========== EVENT ==========
        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Event::EventId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Event::DeviceId).integer().not_null())
                    .col(ColumnDef::new(Event::EventTime).date_time().not_null())
                    .col(ColumnDef::new(Event::EventType).string_len(50).not_null())
                    .col(ColumnDef::new(Event::Note).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_device")
                            .from(Event::Table, Event::DeviceId)
                            .to(Device::Table, Device::DeviceId),
                    )
                    .to_owned(),
            )
            .await?;

        // Per-device "latest N" and GROUP BY lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_event_device_time")
                    .table(Event::Table)
                    .col(Event::DeviceId)
                    .col(Event::EventTime)
                    .to_owned(),
            )
            .await?;

        // ========== SENSOR_READING ==========
        manager
            .create_table(
                Table::create()
                    .table(SensorReading::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SensorReading::ReadingId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SensorReading::DeviceId).integer().not_null())
                    .col(ColumnDef::new(SensorReading::Metric).string_len(50).not_null())
                    .col(ColumnDef::new(SensorReading::ReadingTime).date_time().not_null())
                    .col(ColumnDef::new(SensorReading::ValueFloat).double().not_null())
                    .col(ColumnDef::new(SensorReading::Threshold).double())
                    .col(ColumnDef::new(SensorReading::Unit).string_len(20))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sensor_reading_device")
                            .from(SensorReading::Table, SensorReading::DeviceId)
                            .to(Device::Table, Device::DeviceId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sensor_reading_device_time")
                    .table(SensorReading::Table)
                    .col(SensorReading::DeviceId)
                    .col(SensorReading::ReadingTime)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SensorReading::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Device::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Device {
    Table,
    DeviceId,
    DeviceName,
    DeviceType,
    Description,
}

#[derive(DeriveIden)]
enum Event {
    Table,
    EventId,
    DeviceId,
    EventTime,
    EventType,
    Note,
}

#[derive(DeriveIden)]
enum SensorReading {
    Table,
    ReadingId,
    DeviceId,
    Metric,
    ReadingTime,
    ValueFloat,
    Threshold,
    Unit,
}
