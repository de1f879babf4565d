use serde::{Deserialize, Serialize};

/// 一条区间记录：规范化后的上下界 + 地理负载字段
///
/// `start_ip_int` / `end_ip_int` 永远由 `utils::to_precision_string`
/// 重新计算，绝不信任输入数据里已有的值。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpRange {
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

/// 装载索引的两种对外可见状态
///
/// `Empty`：初始状态，或一次装载开始（清表）之后；
/// `Ready`：装载提交完成、索引就位之后。
/// 对 `Empty` 状态的查询一律返回未命中，而不是报错。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexState {
    Empty,
    Ready,
}

/// 一次批量装载的结果汇总
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct LoadReport {
    /// 成功提交的记录数
    pub committed: u64,
    /// 被跳过的行数（非 JSON 行、字段缺失、地址解析失败、插入失败）
    pub skipped: u64,
}
