// ==========================================
// 多渠道拣货单对账系统 - 拣货单导出
// ==========================================
// 输出列: Our SKU [, Size] [, Color], Total Pick Quantity
// 支持: CSV (.csv) / Excel (.xlsx)
// ==========================================

use crate::config::PipelineConfig;
use crate::domain::{AggregateRow, GroupingMode, InputFormat};
use crate::importer::error::{ImportError, ImportResult};
use csv::WriterBuilder;
use rust_xlsxwriter::Workbook;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub const MASTER_SKU_HEADER: &str = "Our SKU";
pub const SIZE_HEADER: &str = "Size";
pub const COLOR_HEADER: &str = "Color";
pub const TOTAL_QTY_HEADER: &str = "Total Pick Quantity";

const SHEET_NAME: &str = "Pick List";

/// f64 可精确表示的最大整数 (2^53)
const MAX_EXACT_NUMBER: u64 = 1 << 53;

// ==========================================
// PickListWriter
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickListWriter {
    include_size: bool,
    include_color: bool,
}

impl PickListWriter {
    /// 按配置确定输出列：仅当按属性聚合且维度被跟踪时输出尺码/颜色
    pub fn from_config(config: &PipelineConfig) -> Self {
        let with_attributes = config.grouping == GroupingMode::MasterSkuWithAttributes;
        Self {
            include_size: with_attributes && config.dimensions.size,
            include_color: with_attributes && config.dimensions.color,
        }
    }

    pub fn headers(&self) -> Vec<&'static str> {
        let mut headers = vec![MASTER_SKU_HEADER];
        if self.include_size {
            headers.push(SIZE_HEADER);
        }
        if self.include_color {
            headers.push(COLOR_HEADER);
        }
        headers.push(TOTAL_QTY_HEADER);
        headers
    }

    fn cells(&self, row: &AggregateRow) -> Vec<String> {
        let mut cells = vec![row.master_sku.clone()];
        if self.include_size {
            cells.push(row.size.clone().unwrap_or_default());
        }
        if self.include_color {
            cells.push(row.color.clone().unwrap_or_default());
        }
        cells.push(row.total_qty.to_string());
        cells
    }

    /// 写出 CSV
    pub fn write_csv<W: Write>(&self, rows: &[AggregateRow], writer: W) -> ImportResult<()> {
        let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

        csv_writer
            .write_record(self.headers())
            .map_err(|e| ImportError::ExportError(e.to_string()))?;
        for row in rows {
            csv_writer
                .write_record(self.cells(row))
                .map_err(|e| ImportError::ExportError(e.to_string()))?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// 生成 CSV 字节
    pub fn to_csv_bytes(&self, rows: &[AggregateRow]) -> ImportResult<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_csv(rows, &mut buffer)?;
        Ok(buffer)
    }

    /// 生成 XLSX 工作簿
    fn build_workbook(&self, rows: &[AggregateRow]) -> ImportResult<Workbook> {
        let export_err = |e: rust_xlsxwriter::XlsxError| ImportError::ExportError(e.to_string());

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME).map_err(export_err)?;

        for (col, header) in self.headers().iter().enumerate() {
            worksheet
                .write_string(0, col as u16, *header)
                .map_err(export_err)?;
        }

        for (idx, row) in rows.iter().enumerate() {
            let sheet_row = (idx + 1) as u32;
            let mut col: u16 = 0;

            worksheet
                .write_string(sheet_row, col, &row.master_sku)
                .map_err(export_err)?;
            col += 1;

            if self.include_size {
                worksheet
                    .write_string(sheet_row, col, row.size.as_deref().unwrap_or(""))
                    .map_err(export_err)?;
                col += 1;
            }
            if self.include_color {
                worksheet
                    .write_string(sheet_row, col, row.color.as_deref().unwrap_or(""))
                    .map_err(export_err)?;
                col += 1;
            }

            // 超过 2^53 的合计在 f64 中不精确，改写为文本
            if row.total_qty <= MAX_EXACT_NUMBER {
                worksheet
                    .write_number(sheet_row, col, row.total_qty as f64)
                    .map_err(export_err)?;
            } else {
                worksheet
                    .write_string(sheet_row, col, row.total_qty.to_string())
                    .map_err(export_err)?;
            }
        }

        Ok(workbook)
    }

    /// 生成 XLSX 字节
    pub fn to_xlsx_bytes(&self, rows: &[AggregateRow]) -> ImportResult<Vec<u8>> {
        let mut workbook = self.build_workbook(rows)?;
        workbook
            .save_to_buffer()
            .map_err(|e| ImportError::ExportError(e.to_string()))
    }

    /// 按扩展名写出到文件
    pub fn write_to_path(&self, rows: &[AggregateRow], path: &Path) -> ImportResult<()> {
        let shown = path.display().to_string();
        let bytes = match InputFormat::from_source_name(&shown) {
            Some(InputFormat::Csv) => self.to_csv_bytes(rows)?,
            Some(InputFormat::Spreadsheet) if shown.to_lowercase().ends_with(".xlsx") => {
                self.to_xlsx_bytes(rows)?
            }
            _ => {
                return Err(ImportError::ExportError(format!(
                    "不支持的输出格式: {}（仅支持 .csv/.xlsx）",
                    shown
                )))
            }
        };

        std::fs::write(path, bytes)?;
        info!(path = %shown, rows = rows.len(), "拣货单已导出");
        Ok(())
    }
}
