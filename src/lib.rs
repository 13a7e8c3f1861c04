// ==========================================
// 多渠道拣货单对账系统 - 核心库
// ==========================================
// 技术栈: Rust + csv + calamine
// 系统定位: 多渠道/多账号拣货单 → 主 SKU 数量汇总
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与类型
pub mod domain;

// 配置层 - 渠道列定义与流水线配置
pub mod config;

// 导入层 - 文件摄取与列标准化
pub mod importer;

// 引擎层 - 映射 / 对账 / 聚合
pub mod engine;

// 导出层 - 结果文件
pub mod exporter;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::{ChannelRegistry, ChannelSchema, ConfigManager, MappingColumns, PipelineConfig};
pub use domain::{
    AggregateRow, ChannelFile, Dimensions, GroupingMode, MappingFile, NormalizedRecord,
    PipelineOutcome, ReconciledRecord, RunReport,
};
pub use engine::{Aggregator, MappingTable, PickListPipeline, Reconciler};
pub use exporter::PickListWriter;
pub use importer::{ImportError, ImportResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "多渠道拣货单对账系统";
