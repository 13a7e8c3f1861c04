// ==========================================
// 多渠道拣货单对账系统 - 文件解析器实现
// ==========================================
// 阶段 1: 文件摄取（单次读取，内存内完成）
// 支持: Excel (.xlsx/.xlsm/.xls) / CSV (.csv)
// ==========================================

use crate::domain::{InputFormat, RawRow, RawTable};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::picklist_importer_trait::FileParser;
use calamine::{open_workbook_auto_from_rs, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::io::Cursor;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 单元格按表头归位；表头为空的列不入值表，超出表头的单元格丢弃
/// 整行空白（含仅空格）时返回 None
fn row_values(
    headers: &[String],
    cells: impl Iterator<Item = String>,
) -> Option<HashMap<String, String>> {
    let values: HashMap<String, String> = headers
        .iter()
        .zip(cells)
        .filter(|(header, _)| !header.is_empty())
        .map(|(header, value)| (header.clone(), value))
        .collect();

    if values.values().all(|v| v.trim().is_empty()) {
        None
    } else {
        Some(values)
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_table(&self, source_name: &str, content: &[u8]) -> ImportResult<RawTable> {
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(content);

        // 读取表头（列名不做 TRIM，按原文精确匹配）
        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ImportError::unreadable(source_name, e))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result.map_err(|e| ImportError::unreadable(source_name, e))?;
            let row_number = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 2);

            if let Some(values) = row_values(&headers, record.iter().map(str::to_string)) {
                rows.push(RawRow { row_number, values });
            }
        }

        Ok(RawTable { headers, rows })
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
// 只读取第一个工作表
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_table(&self, source_name: &str, content: &[u8]) -> ImportResult<RawTable> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(content.to_vec()))
            .map_err(|e| ImportError::unreadable(source_name, e))?;

        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::unreadable(source_name, "Excel 文件无工作表"))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::unreadable(source_name, e))?;

        // 工作表起始行（0 基），用于还原源文件行号
        let first_row = range.start().map(|(r, _)| r as usize).unwrap_or(0);

        let mut sheet_rows = range.rows();
        let header_row = match sheet_rows.next() {
            Some(row) => row,
            None => return Ok(RawTable::default()),
        };

        let headers: Vec<String> = header_row.iter().map(|cell| cell.to_string()).collect();

        let mut rows = Vec::new();
        for (idx, data_row) in sheet_rows.enumerate() {
            if let Some(values) = row_values(&headers, data_row.iter().map(|cell| cell.to_string())) {
                rows.push(RawRow {
                    row_number: first_row + idx + 2,
                    values,
                });
            }
        }

        Ok(RawTable { headers, rows })
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_table(&self, source_name: &str, content: &[u8]) -> ImportResult<RawTable> {
        match InputFormat::from_source_name(source_name) {
            Some(InputFormat::Csv) => CsvParser.parse_table(source_name, content),
            Some(InputFormat::Spreadsheet) => ExcelParser.parse_table(source_name, content),
            None => Err(ImportError::unreadable(
                source_name,
                "文件格式不支持（仅支持 .xlsx/.xlsm/.xls/.csv）",
            )),
        }
    }
}
