// ==========================================
// 多渠道拣货单对账系统 - 领域类型定义
// ==========================================
// 职责: 维度开关 / 聚合模式 / 输入格式
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 匹配维度 (Dimensions)
// ==========================================
// 决定复合键宽度: (sku, account) / (sku, size, account) /
// (sku, color, account) / (sku, size, color, account)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default = "default_true")]
    pub size: bool, // 是否跟踪尺码
    #[serde(default = "default_true")]
    pub color: bool, // 是否跟踪颜色
}

fn default_true() -> bool {
    true
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            size: true,
            color: true,
        }
    }
}

impl Dimensions {
    /// 仅按 (sku, account) 匹配
    pub fn sku_only() -> Self {
        Self {
            size: false,
            color: false,
        }
    }

    /// 复合键的组成部分数量（2/3/4）
    pub fn key_width(&self) -> usize {
        2 + usize::from(self.size) + usize::from(self.color)
    }
}

// ==========================================
// 聚合模式 (Grouping Mode)
// ==========================================
// 序列化格式: snake_case (与配置文件一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingMode {
    #[default]
    MasterSku, // 仅按主 SKU 聚合
    MasterSkuWithAttributes, // 按 (主 SKU, 尺码, 颜色) 聚合
}

impl fmt::Display for GroupingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupingMode::MasterSku => write!(f, "master_sku"),
            GroupingMode::MasterSkuWithAttributes => write!(f, "master_sku_with_attributes"),
        }
    }
}

// ==========================================
// 输入文件格式 (Input Format)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Spreadsheet,
}

impl InputFormat {
    /// 根据文件名扩展名判定格式（大小写不敏感）
    pub fn from_source_name(source_name: &str) -> Option<Self> {
        let ext = std::path::Path::new(source_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Some(InputFormat::Csv),
            "xlsx" | "xlsm" | "xls" => Some(InputFormat::Spreadsheet),
            _ => None,
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Csv => write!(f, "CSV"),
            InputFormat::Spreadsheet => write!(f, "SPREADSHEET"),
        }
    }
}
