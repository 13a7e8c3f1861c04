// ==========================================
// 多渠道拣货单对账系统 - 对账器
// ==========================================
// 语义: 标准化记录 LEFT JOIN 映射表
// 红线: 每条输入记录恰好产生一条输出记录，不丢弃
// ==========================================

use crate::domain::{NormalizedRecord, ReconciledRecord, UNMAPPED_PREFIX};
use crate::engine::mapping_table::MappingTable;

pub struct Reconciler<'a> {
    table: &'a MappingTable,
}

impl<'a> Reconciler<'a> {
    pub fn new(table: &'a MappingTable) -> Self {
        Self { table }
    }

    /// 对账全部记录（记录数不变）
    pub fn reconcile(&self, records: Vec<NormalizedRecord>) -> Vec<ReconciledRecord> {
        records
            .into_iter()
            .map(|record| self.reconcile_one(record))
            .collect()
    }

    fn reconcile_one(&self, record: NormalizedRecord) -> ReconciledRecord {
        let matched = self
            .table
            .lookup(
                &record.channel_sku,
                record.size.as_deref(),
                record.color.as_deref(),
                &record.account_id,
            )
            .map(str::to_string);

        match matched {
            Some(master_sku) => ReconciledRecord {
                record,
                master_sku,
                mapped: true,
            },
            None => {
                // 兜底: 未映射数量保持可见且按渠道 SKU 区分
                let master_sku = unmapped_sku(&record.channel_sku);
                ReconciledRecord {
                    record,
                    master_sku,
                    mapped: false,
                }
            }
        }
    }
}

/// 未映射记录的合成主 SKU
pub fn unmapped_sku(channel_sku: &str) -> String {
    format!("{}{}", UNMAPPED_PREFIX, channel_sku)
}
