// ==========================================
// 多渠道拣货单对账系统 - 导出层
// ==========================================
// 职责: 聚合结果 → 输出文件（CSV / XLSX）
// ==========================================

pub mod picklist_writer;

pub use picklist_writer::{PickListWriter, TOTAL_QTY_HEADER};
