// ==========================================
// 多渠道拣货单对账系统 - 导入层
// ==========================================
// 职责: 外部文件摄取 + 渠道列标准化 + 映射文件加载
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod mapping_loader;
pub mod picklist_importer_trait;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::{parse_quantity, ColumnNormalizer};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use mapping_loader::MappingLoader;

// 重导出 Trait 接口
pub use picklist_importer_trait::{FieldMapper, FileParser};
