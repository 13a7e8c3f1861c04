// ==========================================
// 多渠道拣货单对账系统 - 引擎层
// ==========================================
// 职责: 映射索引 / 对账 / 聚合 / 流水线编排
// 红线: 引擎不做文件 IO，所有输入显式传入
// ==========================================

pub mod aggregator;
pub mod mapping_table;
pub mod orchestrator;
pub mod reconciler;

// 重导出核心引擎
pub use aggregator::Aggregator;
pub use mapping_table::{MappingKey, MappingTable};
pub use orchestrator::PickListPipeline;
pub use reconciler::{unmapped_sku, Reconciler};
