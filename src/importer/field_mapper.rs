// ==========================================
// 多渠道拣货单对账系统 - 列标准化器实现
// ==========================================
// 阶段 2: 渠道列 → 标准列 映射 + 数量转换
// 红线: 声明列缺失即失败，数量非法即失败（不默认为 0）
// ==========================================

use crate::config::ChannelSchema;
use crate::domain::{Dimensions, NormalizedRecord, RawRow, RawTable};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::picklist_importer_trait::FieldMapper as FieldMapperTrait;

pub struct ColumnNormalizer;

impl FieldMapperTrait for ColumnNormalizer {
    fn normalize(
        &self,
        table: &RawTable,
        schema: &ChannelSchema,
        account_id: &str,
        dimensions: Dimensions,
    ) -> ImportResult<Vec<NormalizedRecord>> {
        // 表头检查（即使没有数据行也要检查）
        for label in schema.required_columns(dimensions) {
            if !table.has_column(label) {
                return Err(ImportError::MissingColumn {
                    channel_id: schema.channel_id.clone(),
                    account_id: account_id.to_string(),
                    expected_label: label.to_string(),
                });
            }
        }

        let size_column = schema.size_column.as_deref().filter(|_| dimensions.size);
        let color_column = schema.color_column.as_deref().filter(|_| dimensions.color);

        table
            .rows
            .iter()
            .map(|row| -> ImportResult<NormalizedRecord> {
                Ok(NormalizedRecord {
                    channel_id: schema.channel_id.clone(),
                    account_id: account_id.to_string(),
                    channel_sku: row.get(&schema.sku_column).unwrap_or("").to_string(),
                    size: size_column.and_then(|c| self.get_optional(row, c)),
                    color: color_column.and_then(|c| self.get_optional(row, c)),
                    qty: self.parse_qty(row, schema, account_id)?,
                    row_number: row.row_number,
                })
            })
            .collect()
    }
}

impl ColumnNormalizer {
    /// 提取可选维度字段（空单元格 → None，非空值保持原样）
    fn get_optional(&self, row: &RawRow, column: &str) -> Option<String> {
        row.get(column)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// 解析数量（非负整数；"3.0" 这类整值小数也接受）
    fn parse_qty(
        &self,
        row: &RawRow,
        schema: &ChannelSchema,
        account_id: &str,
    ) -> ImportResult<u64> {
        let raw = row.get(&schema.qty_column).unwrap_or("");

        parse_quantity(raw).ok_or_else(|| ImportError::InvalidQuantity {
            channel_id: schema.channel_id.clone(),
            account_id: account_id.to_string(),
            row: row.row_number,
            column: schema.qty_column.clone(),
            value: raw.to_string(),
        })
    }
}

/// 数量文本 → 非负整数；负数、小数、非数字返回 None
pub fn parse_quantity(raw: &str) -> Option<u64> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(qty) = value.parse::<u64>() {
        return Some(qty);
    }

    // "3.0" / "3." 按整数部分精确解析，避免经过 f64 丢精度
    if let Some((int_part, frac)) = value.split_once('.') {
        if !int_part.is_empty() && frac.bytes().all(|b| b == b'0') {
            return int_part.parse::<u64>().ok();
        }
    }

    // u64::MAX as f64 会进位到 2^64，必须用严格小于
    let float = value.parse::<f64>().ok()?;
    if float.is_finite() && float >= 0.0 && float.fract() == 0.0 && float < u64::MAX as f64 {
        Some(float as u64)
    } else {
        None
    }
}
