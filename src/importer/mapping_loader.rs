// ==========================================
// 多渠道拣货单对账系统 - 映射文件加载器
// ==========================================
// 职责: 映射文件 → MappingEntry 列表
// 红线: 值按原文保留（不 TRIM、不改大小写）
// ==========================================

use crate::config::MappingColumns;
use crate::domain::{Dimensions, MappingEntry, MappingFile, RawRow};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::picklist_importer_trait::FileParser;
use tracing::{debug, warn};

pub struct MappingLoader<'a> {
    columns: &'a MappingColumns,
    dimensions: Dimensions,
}

impl<'a> MappingLoader<'a> {
    pub fn new(columns: &'a MappingColumns, dimensions: Dimensions) -> Self {
        Self {
            columns,
            dimensions,
        }
    }

    /// 解析映射文件
    ///
    /// # 返回
    /// - Ok(Vec<MappingEntry>): 映射条目（保持文件行序）
    /// - Err(UnreadableMappingFile): 文件无法解析
    /// - Err(MissingMappingColumn): 缺少必需列
    pub fn load(&self, file: &MappingFile) -> ImportResult<Vec<MappingEntry>> {
        let table = UniversalFileParser
            .parse_table(&file.source_name, &file.content)
            .map_err(|e| match e {
                ImportError::UnreadableFile {
                    source_name,
                    message,
                } => ImportError::UnreadableMappingFile {
                    source_name,
                    message,
                },
                other => other,
            })?;

        for label in self.columns.required_columns(self.dimensions) {
            if !table.has_column(label) {
                return Err(ImportError::MissingMappingColumn {
                    expected_label: label.to_string(),
                });
            }
        }

        let mut entries = Vec::with_capacity(table.len());
        for row in &table.rows {
            match self.map_row(row) {
                Some(entry) => entries.push(entry),
                None => {
                    warn!(row_number = row.row_number, "映射行缺少渠道 SKU 或主 SKU，已忽略");
                }
            }
        }

        debug!(
            source = %file.source_name,
            entries = entries.len(),
            key_width = self.dimensions.key_width(),
            "映射文件解析完成"
        );

        Ok(entries)
    }

    fn map_row(&self, row: &RawRow) -> Option<MappingEntry> {
        let non_blank = |column: &str| {
            row.get(column)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let channel_sku = non_blank(&self.columns.channel_sku)?;
        let master_sku = non_blank(&self.columns.master_sku)?;

        Some(MappingEntry {
            channel_sku,
            size: if self.dimensions.size {
                non_blank(&self.columns.size)
            } else {
                None
            },
            color: if self.dimensions.color {
                non_blank(&self.columns.color)
            } else {
                None
            },
            account_id: row.get(&self.columns.account).unwrap_or("").to_string(),
            master_sku,
            row_number: row.row_number,
        })
    }
}
