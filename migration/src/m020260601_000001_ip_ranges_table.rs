use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 ip_ranges 表
        manager
            .create_table(
                Table::create()
                    .table(IpRange::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IpRange::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(IpRange::StartIp).string().not_null())
                    .col(ColumnDef::new(IpRange::EndIp).string().not_null())
                    .col(
                        ColumnDef::new(IpRange::StartIpInt)
                            .char_len(39)
                            .not_null(),
                    )
                    .col(ColumnDef::new(IpRange::EndIpInt).char_len(39).not_null())
                    .col(ColumnDef::new(IpRange::Country).string().null())
                    .col(ColumnDef::new(IpRange::CountryName).string().null())
                    .col(ColumnDef::new(IpRange::ContinentName).string().null())
                    .col(ColumnDef::new(IpRange::Asn).big_integer().null())
                    .col(ColumnDef::new(IpRange::AsName).string().null())
                    .col(ColumnDef::new(IpRange::IpVersion).integer().null())
                    .to_owned(),
            )
            .await?;

        // 复合升序索引：包含查询先按 start_ip_int <= X 缩小范围，
        // 再用 end_ip_int >= X 过滤，避免全表扫描
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_range_bounds")
                    .table(IpRange::Table)
                    .col(IpRange::StartIpInt)
                    .col(IpRange::EndIpInt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_range_bounds")
                    .table(IpRange::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(IpRange::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum IpRange {
    #[sea_orm(iden = "ip_ranges")]
    Table,
    Id,
    StartIp,
    EndIp,
    StartIpInt,
    EndIpInt,
    Country,
    CountryName,
    ContinentName,
    Asn,
    AsName,
    IpVersion,
}
