// ==========================================
// 多渠道拣货单对账系统 - 运行报告
// ==========================================
// 用途: 成功运行后的信息性统计（未映射数量等）
// ==========================================

use crate::domain::record::AggregateRow;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 单次运行的统计报告
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub files_processed: usize,
    pub records_normalized: usize,
    pub records_unmapped: usize,
    pub unmapped_channel_skus: Vec<String>, // 去重 + 排序
    pub mapping_entries: usize,
    pub duplicate_mapping_keys: usize, // 被忽略的重复映射键
    pub total_qty: u64,
    pub output_rows: usize,
}

/// 流水线输出: 聚合结果 + 报告
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    pub rows: Vec<AggregateRow>,
    pub report: RunReport,
}
