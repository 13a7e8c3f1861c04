// ==========================================
// 多渠道拣货单对账系统 - 领域模型层
// ==========================================
// 职责: 定义记录实体、维度类型、运行报告
// 红线: 不含解析逻辑,不含对账逻辑
// ==========================================

pub mod record;
pub mod report;
pub mod types;

// 重导出核心类型
pub use record::{
    AggregateRow, ChannelFile, MappingEntry, MappingFile, NormalizedRecord, RawRow, RawTable,
    ReconciledRecord, UNMAPPED_PREFIX,
};
pub use report::{PipelineOutcome, RunReport};
pub use types::{Dimensions, GroupingMode, InputFormat};
