// ==========================================
// 多渠道拣货单对账系统 - 渠道列定义注册表
// ==========================================
// 职责: 渠道 ID → (SKU/尺码/颜色/数量) 列名
// 红线: 运行开始前确定，运行期间只读
// ==========================================

use crate::domain::Dimensions;
use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// ChannelSchema - 单个渠道的列定义
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSchema {
    pub channel_id: String,
    pub sku_column: String,
    #[serde(default)]
    pub size_column: Option<String>,
    #[serde(default)]
    pub color_column: Option<String>,
    pub qty_column: String,
    /// 已声明的账号；为空表示不限制
    #[serde(default)]
    pub accounts: Vec<String>,
}

impl ChannelSchema {
    pub fn new(
        channel_id: &str,
        sku_column: &str,
        size_column: Option<&str>,
        color_column: Option<&str>,
        qty_column: &str,
    ) -> Self {
        Self {
            channel_id: channel_id.to_string(),
            sku_column: sku_column.to_string(),
            size_column: size_column.map(str::to_string),
            color_column: color_column.map(str::to_string),
            qty_column: qty_column.to_string(),
            accounts: Vec::new(),
        }
    }

    pub fn with_accounts(mut self, accounts: &[&str]) -> Self {
        self.accounts = accounts.iter().map(|a| a.to_string()).collect();
        self
    }

    /// 账号是否允许（未声明账号列表时全部允许）
    pub fn accepts_account(&self, account_id: &str) -> bool {
        self.accounts.is_empty() || self.accounts.iter().any(|a| a == account_id)
    }

    /// 当前维度下必须存在的列（按检查顺序）
    pub fn required_columns(&self, dimensions: Dimensions) -> Vec<&str> {
        let mut columns = vec![self.sku_column.as_str()];
        if dimensions.size {
            if let Some(size) = &self.size_column {
                columns.push(size);
            }
        }
        if dimensions.color {
            if let Some(color) = &self.color_column {
                columns.push(color);
            }
        }
        columns.push(self.qty_column.as_str());
        columns
    }

    /// 校验列定义本身的完整性
    pub fn validate(&self, dimensions: Dimensions) -> ImportResult<()> {
        if self.channel_id.trim().is_empty() {
            return Err(ImportError::ConfigError("渠道 ID 不能为空".to_string()));
        }

        let blank = |label: &str| label.trim().is_empty();
        if blank(&self.sku_column) || blank(&self.qty_column) {
            return Err(ImportError::ConfigError(format!(
                "渠道 {}: SKU 列与数量列不能为空",
                self.channel_id
            )));
        }

        if dimensions.size && self.size_column.as_deref().map_or(true, blank) {
            return Err(ImportError::ConfigError(format!(
                "渠道 {}: 已启用尺码维度，但未声明尺码列",
                self.channel_id
            )));
        }

        if dimensions.color && self.color_column.as_deref().map_or(true, blank) {
            return Err(ImportError::ConfigError(format!(
                "渠道 {}: 已启用颜色维度，但未声明颜色列",
                self.channel_id
            )));
        }

        Ok(())
    }
}

// ==========================================
// ChannelRegistry - 渠道注册表
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRegistry {
    schemas: BTreeMap<String, ChannelSchema>,
}

impl ChannelRegistry {
    /// 从列定义列表构建，渠道 ID 必须唯一
    pub fn from_schemas(schemas: Vec<ChannelSchema>) -> ImportResult<Self> {
        let mut map = BTreeMap::new();
        for schema in schemas {
            let id = schema.channel_id.clone();
            if map.insert(id.clone(), schema).is_some() {
                return Err(ImportError::ConfigError(format!("渠道 ID 重复: {}", id)));
            }
        }
        Ok(Self { schemas: map })
    }

    /// 内置渠道列定义
    pub fn builtin() -> Self {
        let schemas = builtin_schemas()
            .into_iter()
            .map(|s| (s.channel_id.clone(), s))
            .collect();
        Self { schemas }
    }

    pub fn get(&self, channel_id: &str) -> Option<&ChannelSchema> {
        self.schemas.get(channel_id)
    }

    /// 查找渠道并校验账号
    pub fn resolve(&self, channel_id: &str, account_id: &str) -> ImportResult<&ChannelSchema> {
        let schema = self
            .get(channel_id)
            .ok_or_else(|| ImportError::UnknownChannel(channel_id.to_string()))?;

        if !schema.accepts_account(account_id) {
            return Err(ImportError::UnknownAccount {
                channel_id: channel_id.to_string(),
                account_id: account_id.to_string(),
            });
        }

        Ok(schema)
    }

    pub fn validate(&self, dimensions: Dimensions) -> ImportResult<()> {
        self.schemas
            .values()
            .try_for_each(|schema| schema.validate(dimensions))
    }

    pub fn channel_ids(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn schemas(&self) -> impl Iterator<Item = &ChannelSchema> {
        self.schemas.values()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// 各市场导出报表的列名（需与实际报表表头核对）
pub fn builtin_schemas() -> Vec<ChannelSchema> {
    vec![
        ChannelSchema::new("Meesho", "SKU", Some("Size"), Some("Color"), "Qty"),
        ChannelSchema::new(
            "Amazon",
            "item-sku",
            Some("size-attribute"),
            Some("color-attribute"),
            "quantity-purchased",
        ),
        ChannelSchema::new(
            "Flipkart",
            "Seller SKU ID",
            Some("Size"),
            Some("Color"),
            "quantity-purchased",
        ),
        ChannelSchema::new(
            "Myntra",
            "Seller SKU",
            Some("Style Size"),
            Some("Color Name"),
            "Quantity",
        ),
        ChannelSchema::new("Nykaa", "Seller Code", Some("Size"), Some("Color"), "Inventory Qty"),
        ChannelSchema::new("JioMart", "Product SKU", Some("Size"), Some("Color"), "Order Qty"),
        ChannelSchema::new("Ajio", "Seller SKU", Some("Size"), Some("Color"), "Unit Qty"),
        ChannelSchema::new("Tatacliq", "Item Code", Some("Size"), Some("Color"), "Units"),
    ]
}
