//! 地址精度字符串
//!
//! 把任意合法的 IPv4 / IPv6 字面量规范化为 39 位零填充十进制字符串。
//! IPv4 先通过 IPv4-mapped 形式（`::ffff:0:0/96`）嵌入 128 位空间，
//! 因此两个地址族共享同一个排序域：字符串的字典序即数值序。
//!
//! 装载路径和查询路径必须共用本函数，两侧编码一旦不一致，
//! 区间匹配会静默失效。

use std::net::IpAddr;

use crate::errors::{IpdbError, Result};

/// u128 最大值的十进制位数，即规范化字符串的固定宽度
pub const PRECISION_WIDTH: usize = 39;

/// 把 IP 字面量转换为 39 位零填充十进制字符串
///
/// 解析失败返回 `InvalidAddress`，这是唯一的失败方式。
pub fn to_precision_string(literal: &str) -> Result<String> {
    let addr: IpAddr = literal.parse().map_err(|e| {
        IpdbError::invalid_address(format!("无法解析 IP 字面量 '{}': {}", literal, e))
    })?;

    let mapped = match addr {
        IpAddr::V4(v4) => v4.to_ipv6_mapped(),
        IpAddr::V6(v6) => v6,
    };

    let value = u128::from_be_bytes(mapped.octets());
    Ok(format!("{:0width$}", value, width = PRECISION_WIDTH))
}
