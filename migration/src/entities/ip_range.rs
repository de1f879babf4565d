use sea_orm::entity::prelude::*;

/// ip_ranges 表：`start_ip_int` / `end_ip_int` 为 39 位零填充十进制字符串，
/// 字典序与 128 位无符号整数的数值序完全一致。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "ip_ranges")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub start_ip: String,
    pub end_ip: String,
    pub start_ip_int: String,
    pub end_ip_int: String,
    pub country: Option<String>,
    pub country_name: Option<String>,
    pub continent_name: Option<String>,
    pub asn: Option<i64>,
    pub as_name: Option<String>,
    pub ip_version: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
