//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations. 写路径只有两个入口：
//! 全量清空和批量插入，二者共同构成装载器的 full-replace 语义。

use sea_orm::EntityTrait;
use tracing::{info, warn};

use super::SeaOrmStorage;
use super::converters::range_to_active_model;
use crate::errors::{IpdbError, Result};
use crate::storage::IpRange;

use migration::entities::ip_range;

impl SeaOrmStorage {
    /// 清空全部区间记录（full replace 的第一步）
    ///
    /// 清空后索引状态回到 `Empty`，直到装载器调用 `mark_ready`。
    pub async fn clear_all(&self) -> Result<u64> {
        self.mark_empty();

        let result = ip_range::Entity::delete_many()
            .exec(&self.db)
            .await
            .map_err(|e| IpdbError::database_operation(format!("清空 ip_ranges 失败: {}", e)))?;

        info!("Cleared {} existing ip ranges", result.rows_affected);
        Ok(result.rows_affected)
    }

    /// 无序批量插入，返回成功提交的记录数
    ///
    /// 批次内部不保证顺序。整批插入失败时退回逐条插入，
    /// 单条记录的失败不会阻塞同批次的其他记录。
    pub async fn insert_batch(&self, ranges: &[IpRange]) -> Result<u64> {
        if ranges.is_empty() {
            return Ok(0);
        }

        let active_models: Vec<ip_range::ActiveModel> =
            ranges.iter().map(range_to_active_model).collect();

        match ip_range::Entity::insert_many(active_models)
            .exec(&self.db)
            .await
        {
            Ok(_) => Ok(ranges.len() as u64),
            Err(batch_err) => {
                warn!(
                    "Batch insert of {} ranges failed ({}), falling back to per-record inserts",
                    ranges.len(),
                    batch_err
                );

                let mut committed = 0u64;
                for range in ranges {
                    match ip_range::Entity::insert(range_to_active_model(range))
                        .exec(&self.db)
                        .await
                    {
                        Ok(_) => committed += 1,
                        Err(e) => {
                            warn!(
                                "Skipping range {} - {}: insert failed: {}",
                                range.start_ip, range.end_ip, e
                            );
                        }
                    }
                }

                // 整批都没能提交时按操作失败上抛，让装载器中止并上报
                if committed == 0 {
                    return Err(IpdbError::database_operation(format!(
                        "批量插入失败且逐条回退全部失败: {}",
                        batch_err
                    )));
                }
                Ok(committed)
            }
        }
    }

    /// 标记装载完成，索引进入 Ready 状态
    pub fn finish_load(&self) {
        self.mark_ready();
        info!("Bulk load committed, range index is ready");
    }
}
