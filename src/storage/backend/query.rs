//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::trace;

use super::SeaOrmStorage;
use super::converters::model_to_range;
use crate::errors::{IpdbError, Result};
use crate::storage::models::{IndexState, IpRange};

use migration::entities::ip_range;

impl SeaOrmStorage {
    /// 包含查询：找到覆盖 `addr_int` 的区间记录
    ///
    /// `addr_int` 必须是 `utils::to_precision_string` 的输出，
    /// 此时字符串比较等价于数值比较，复合索引
    /// `(start_ip_int, end_ip_int)` 让查询保持亚线性。
    /// 区间嵌套时按 `start_ip_int` 降序取第一条，即最内层的区间。
    /// 未命中是正常结果，返回 `Ok(None)`。
    pub async fn locate(&self, addr_int: &str) -> Result<Option<IpRange>> {
        // Empty 状态下短路返回未命中，不访问数据库
        if self.state() == IndexState::Empty {
            trace!("locate() against empty index, returning no match");
            return Ok(None);
        }

        let model = ip_range::Entity::find()
            .filter(ip_range::Column::StartIpInt.lte(addr_int))
            .filter(ip_range::Column::EndIpInt.gte(addr_int))
            .order_by_desc(ip_range::Column::StartIpInt)
            .one(&self.db)
            .await
            .map_err(|e| IpdbError::database_operation(format!("包含查询失败: {}", e)))?;

        Ok(model.map(model_to_range))
    }

    /// 当前记录总数（健康检查用，不加载数据）
    pub async fn count(&self) -> Result<u64> {
        ip_range::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| IpdbError::database_operation(format!("统计记录数失败: {}", e)))
    }
}
