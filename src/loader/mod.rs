//! 批量装载管线
//!
//! 从行分隔 JSON 文件读入区间记录，经统一的地址规范化函数重算
//! `start_ip_int` / `end_ip_int`，按批提交到存储。装载是 full-replace：
//! 先清空旧表，再写入新记录；装载期间句柄处于 `Empty` 状态，
//! 调用方必须把一次重载视为服务下线。
//!
//! 行格式非常宽松：空行、不以 `{` 开头的行、JSON 解析失败的行、
//! 地址字面量解析失败的行都只计入 skipped，绝不中止整个装载。

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::errors::{IpdbError, Result};
use crate::storage::{IpRange, LoadReport, SeaOrmStorage};
use crate::utils::to_precision_string;

pub struct RangeLoader {
    storage: Arc<SeaOrmStorage>,
    batch_size: usize,
}

impl RangeLoader {
    pub fn new(storage: Arc<SeaOrmStorage>, batch_size: usize) -> Self {
        Self {
            storage,
            batch_size: batch_size.max(1),
        }
    }

    /// 装载一个 JSONL 文件，返回提交/跳过的统计
    pub async fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<LoadReport> {
        let path = path.as_ref();
        let file = File::open(path).await.map_err(|e| {
            IpdbError::file_operation(format!("无法打开输入文件 {}: {}", path.display(), e))
        })?;

        info!("Starting bulk load from {}", path.display());
        let started = Instant::now();

        // full replace：旧表整体废弃
        self.storage.clear_all().await?;

        let mut report = LoadReport::default();
        let mut batch: Vec<IpRange> = Vec::with_capacity(self.batch_size);

        let mut lines = BufReader::new(file).lines();
        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| IpdbError::file_operation(format!("读取输入行失败: {}", e)))?
        {
            match parse_record(&line) {
                Some(range) => batch.push(range),
                None => report.skipped += 1,
            }

            if batch.len() >= self.batch_size {
                self.flush(&mut batch, &mut report).await?;
            }
        }

        if !batch.is_empty() {
            self.flush(&mut batch, &mut report).await?;
        }

        // 复合索引由迁移在建表时创建，提交完成即进入 Ready
        self.storage.finish_load();

        info!(
            "Bulk load finished in {:.2?}: {} committed, {} skipped",
            started.elapsed(),
            report.committed,
            report.skipped
        );
        Ok(report)
    }

    async fn flush(&self, batch: &mut Vec<IpRange>, report: &mut LoadReport) -> Result<()> {
        let submitted = batch.len() as u64;
        let committed = self.storage.insert_batch(batch).await?;

        report.committed += committed;
        report.skipped += submitted - committed;
        debug!("Batch committed: {}/{} records", committed, submitted);

        batch.clear();
        Ok(())
    }
}

/// 解析并规范化一行输入，失败时返回 None（带诊断日志）
///
/// 身份字段（`_id` 等）在这里被丢弃：提交时由数据库重新分配。
fn parse_record(line: &str) -> Option<IpRange> {
    let trimmed = line.trim();
    if trimmed.is_empty() || !trimmed.starts_with('{') {
        if !trimmed.is_empty() {
            let head: String = trimmed.chars().take(20).collect();
            debug!("Skipping non-JSON line: {}...", head);
        }
        return None;
    }

    let raw: Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(e) => {
            warn!("Skipping malformed JSON line: {}", e);
            return None;
        }
    };

    let obj = raw.as_object()?;

    let start_ip = match obj.get("start_ip").and_then(Value::as_str) {
        Some(ip) => ip.to_string(),
        None => {
            warn!("Skipping record without string start_ip");
            return None;
        }
    };
    let end_ip = match obj.get("end_ip").and_then(Value::as_str) {
        Some(ip) => ip.to_string(),
        None => {
            warn!("Skipping record without string end_ip");
            return None;
        }
    };

    // 上下界永远重算，输入里已有的 *_int 字段不可信
    let start_ip_int = match to_precision_string(&start_ip) {
        Ok(s) => s,
        Err(e) => {
            warn!("Skipping record, bad start_ip '{}': {}", start_ip, e);
            return None;
        }
    };
    let end_ip_int = match to_precision_string(&end_ip) {
        Ok(s) => s,
        Err(e) => {
            warn!("Skipping record, bad end_ip '{}': {}", end_ip, e);
            return None;
        }
    };

    Some(IpRange {
        start_ip,
        end_ip,
        start_ip_int,
        end_ip_int,
        country: string_field(obj.get("country")),
        country_name: string_field(obj.get("country_name")),
        continent_name: string_field(obj.get("continent_name")),
        asn: normalize_asn(obj.get("asn")),
        as_name: normalize_as_name(obj.get("as_name")),
        ip_version: obj
            .get("ip_version")
            .and_then(Value::as_i64)
            .map(|v| v as i32),
    })
}

fn string_field(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

/// ASN 字段脏数据很多：对象一律归一化为 null，
/// 数字直接取值，数字字符串尝试解析
fn normalize_asn(value: Option<&Value>) -> Option<i64> {
    match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim_start_matches("AS").parse().ok(),
        _ => None,
    }
}

/// 对象类型的 as_name 归一化为 "Unknown"
fn normalize_as_name(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Object(_)) => Some("Unknown".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_basic() {
        let line = r#"{"start_ip":"1.0.0.0","end_ip":"1.0.0.255","country":"AU","country_name":"Australia","continent_name":"Oceania","asn":13335,"as_name":"Cloudflare","ip_version":4}"#;
        let range = parse_record(line).unwrap();

        assert_eq!(range.start_ip, "1.0.0.0");
        assert_eq!(range.start_ip_int.len(), 39);
        assert!(range.start_ip_int < range.end_ip_int);
        assert_eq!(range.asn, Some(13335));
        assert_eq!(range.ip_version, Some(4));
    }

    #[test]
    fn test_parse_record_recomputes_ints() {
        // 输入自带的 *_int 字段是错的，必须被重算覆盖
        let line = r#"{"start_ip":"8.8.8.0","end_ip":"8.8.8.255","start_ip_int":"42","end_ip_int":"43"}"#;
        let range = parse_record(line).unwrap();

        assert_ne!(range.start_ip_int, "42");
        assert_eq!(range.start_ip_int, to_precision_string("8.8.8.0").unwrap());
        assert_eq!(range.end_ip_int, to_precision_string("8.8.8.255").unwrap());
    }

    #[test]
    fn test_parse_record_drops_identity() {
        let line = r#"{"_id":{"$oid":"deadbeef"},"start_ip":"1.1.1.0","end_ip":"1.1.1.255"}"#;
        let range = parse_record(line).unwrap();
        assert_eq!(range.start_ip, "1.1.1.0");
    }

    #[test]
    fn test_parse_record_skips_junk_lines() {
        assert!(parse_record("").is_none());
        assert!(parse_record("   ").is_none());
        assert!(parse_record("# some comment").is_none());
        assert!(parse_record("{not json at all").is_none());
        assert!(parse_record(r#"["array","not","object"]"#).is_none());
    }

    #[test]
    fn test_parse_record_skips_bad_addresses() {
        assert!(parse_record(r#"{"start_ip":"999.999.999.999","end_ip":"1.0.0.255"}"#).is_none());
        assert!(parse_record(r#"{"start_ip":"1.0.0.0","end_ip":"garbage"}"#).is_none());
        assert!(parse_record(r#"{"end_ip":"1.0.0.255"}"#).is_none());
        assert!(parse_record(r#"{"start_ip":123,"end_ip":"1.0.0.255"}"#).is_none());
    }

    #[test]
    fn test_normalize_asn_variants() {
        let obj_line = r#"{"start_ip":"1.0.0.0","end_ip":"1.0.0.255","asn":{},"as_name":{}}"#;
        let range = parse_record(obj_line).unwrap();
        assert_eq!(range.asn, None);
        assert_eq!(range.as_name.as_deref(), Some("Unknown"));

        let str_line = r#"{"start_ip":"1.0.0.0","end_ip":"1.0.0.255","asn":"AS13335"}"#;
        let range = parse_record(str_line).unwrap();
        assert_eq!(range.asn, Some(13335));
    }

    #[test]
    fn test_parse_record_ipv6() {
        let line = r#"{"start_ip":"2001:db8::","end_ip":"2001:db8::ffff","ip_version":6}"#;
        let range = parse_record(line).unwrap();
        assert_eq!(range.ip_version, Some(6));
        // IPv6 区间与 IPv4-mapped 区间共享同一排序域
        let v4 = to_precision_string("255.255.255.255").unwrap();
        assert!(range.start_ip_int > v4);
    }
}
