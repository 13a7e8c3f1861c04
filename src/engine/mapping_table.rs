// ==========================================
// 多渠道拣货单对账系统 - 映射表索引
// ==========================================
// 键: (channel_sku, size?, color?, account) → master_sku
// 规则: 精确匹配、区分大小写；重复键保留首次出现
// ==========================================

use crate::domain::{Dimensions, MappingEntry};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::warn;

// ==========================================
// MappingKey - 复合键
// ==========================================
// 未跟踪的维度恒为 None，因此键宽度由 Dimensions 决定
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MappingKey {
    pub channel_sku: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub account_id: String,
}

impl MappingKey {
    pub fn new(
        channel_sku: &str,
        size: Option<&str>,
        color: Option<&str>,
        account_id: &str,
        dimensions: Dimensions,
    ) -> Self {
        Self {
            channel_sku: channel_sku.to_string(),
            size: size.filter(|_| dimensions.size).map(str::to_string),
            color: color.filter(|_| dimensions.color).map(str::to_string),
            account_id: account_id.to_string(),
        }
    }
}

// ==========================================
// MappingTable - 单次运行内的映射索引
// ==========================================
#[derive(Debug, Clone)]
pub struct MappingTable {
    dimensions: Dimensions,
    index: HashMap<MappingKey, String>,
    duplicate_keys: usize,
}

impl MappingTable {
    /// 从映射条目构建索引
    pub fn build(entries: &[MappingEntry], dimensions: Dimensions) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        let mut duplicate_keys = 0;

        for entry in entries {
            let key = MappingKey::new(
                &entry.channel_sku,
                entry.size.as_deref(),
                entry.color.as_deref(),
                &entry.account_id,
                dimensions,
            );

            match index.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(entry.master_sku.clone());
                }
                Entry::Occupied(slot) => {
                    duplicate_keys += 1;
                    warn!(
                        row_number = entry.row_number,
                        channel_sku = %entry.channel_sku,
                        account_id = %entry.account_id,
                        kept = %slot.get(),
                        ignored = %entry.master_sku,
                        "映射键重复，保留首次出现的主 SKU"
                    );
                }
            }
        }

        Self {
            dimensions,
            index,
            duplicate_keys,
        }
    }

    /// 查找主 SKU
    pub fn lookup(
        &self,
        channel_sku: &str,
        size: Option<&str>,
        color: Option<&str>,
        account_id: &str,
    ) -> Option<&str> {
        let key = MappingKey::new(channel_sku, size, color, account_id, self.dimensions);
        self.index.get(&key).map(String::as_str)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// 被忽略的重复键数量
    pub fn duplicate_keys(&self) -> usize {
        self.duplicate_keys
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
