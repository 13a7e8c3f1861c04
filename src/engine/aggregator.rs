// ==========================================
// 多渠道拣货单对账系统 - 聚合器
// ==========================================
// 分组键: master_sku 或 (master_sku, size, color)
// 排序: master_sku 升序（字典序），其次 size、color（空值在前）
// ==========================================

use crate::domain::{AggregateRow, GroupingMode, ReconciledRecord};
use crate::importer::error::{ImportError, ImportResult};
use std::collections::BTreeMap;

type GroupKey = (String, Option<String>, Option<String>);

pub struct Aggregator {
    mode: GroupingMode,
}

impl Aggregator {
    pub fn new(mode: GroupingMode) -> Self {
        Self { mode }
    }

    /// 分组求和；空输入返回空结果，组内合计溢出时报错
    pub fn aggregate(&self, records: &[ReconciledRecord]) -> ImportResult<Vec<AggregateRow>> {
        let mut groups: BTreeMap<GroupKey, u64> = BTreeMap::new();

        for reconciled in records {
            let total = groups.entry(self.group_key(reconciled)).or_insert(0);
            *total = total
                .checked_add(reconciled.record.qty)
                .ok_or_else(|| overflow(reconciled))?;
        }

        Ok(groups
            .into_iter()
            .map(|((master_sku, size, color), total_qty)| AggregateRow {
                master_sku,
                size,
                color,
                total_qty,
            })
            .collect())
    }

    fn group_key(&self, reconciled: &ReconciledRecord) -> GroupKey {
        match self.mode {
            GroupingMode::MasterSku => (reconciled.master_sku.clone(), None, None),
            GroupingMode::MasterSkuWithAttributes => (
                reconciled.master_sku.clone(),
                reconciled.record.size.clone(),
                reconciled.record.color.clone(),
            ),
        }
    }
}

fn overflow(reconciled: &ReconciledRecord) -> ImportError {
    ImportError::QuantityOverflow {
        channel_id: reconciled.record.channel_id.clone(),
        account_id: reconciled.record.account_id.clone(),
        row: reconciled.record.row_number,
    }
}
