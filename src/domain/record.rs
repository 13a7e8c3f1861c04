// ==========================================
// 多渠道拣货单对账系统 - 记录领域模型
// ==========================================
// 流转: RawRow → NormalizedRecord → ReconciledRecord → AggregateRow
// 生命周期: 单次运行内有效，不跨运行保留
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// 未映射记录的合成主 SKU 前缀
pub const UNMAPPED_PREFIX: &str = "UNMAPPED-";

// ==========================================
// 输入文件 (已上传、已驻留内存)
// ==========================================

/// 渠道导出文件：(渠道, 账号, 文件内容) 三元组
#[derive(Debug, Clone)]
pub struct ChannelFile {
    pub channel_id: String,
    pub account_id: String,
    pub source_name: String, // 文件名（扩展名决定解析格式）
    pub content: Vec<u8>,
}

impl ChannelFile {
    pub fn new(
        channel_id: impl Into<String>,
        account_id: impl Into<String>,
        source_name: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            channel_id: channel_id.into(),
            account_id: account_id.into(),
            source_name: source_name.into(),
            content,
        }
    }

    /// 从磁盘读取渠道文件
    pub fn from_path(
        channel_id: impl Into<String>,
        account_id: impl Into<String>,
        path: &Path,
    ) -> std::io::Result<Self> {
        let content = std::fs::read(path)?;
        Ok(Self::new(
            channel_id,
            account_id,
            path.display().to_string(),
            content,
        ))
    }
}

/// 用户上传的 SKU 映射文件
#[derive(Debug, Clone)]
pub struct MappingFile {
    pub source_name: String,
    pub content: Vec<u8>,
}

impl MappingFile {
    pub fn new(source_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            source_name: source_name.into(),
            content,
        }
    }

    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read(path)?;
        Ok(Self::new(path.display().to_string(), content))
    }
}

// ==========================================
// RawRow / RawTable - 原始行
// ==========================================

/// 文件中的一行原始数据（列名 → 单元格文本）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub row_number: usize, // 源文件行号（表头为第 1 行）
    pub values: HashMap<String, String>,
}

impl RawRow {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }
}

/// 一个文件解析后的完整表格
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>, // 表头（保持文件中的顺序）
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn has_column(&self, label: &str) -> bool {
        self.headers.iter().any(|h| h == label)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ==========================================
// NormalizedRecord - 标准化记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub channel_id: String,
    pub account_id: String,
    pub channel_sku: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub qty: u64,
    pub row_number: usize,
}

// ==========================================
// MappingEntry - 映射表条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub channel_sku: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub account_id: String,
    pub master_sku: String,
    pub row_number: usize,
}

// ==========================================
// ReconciledRecord - 对账后记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciledRecord {
    pub record: NormalizedRecord,
    pub master_sku: String,
    pub mapped: bool, // false = 走了 UNMAPPED 兜底分支
}

// ==========================================
// AggregateRow - 聚合输出行
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateRow {
    pub master_sku: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub total_qty: u64,
}
