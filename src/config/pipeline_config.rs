// ==========================================
// 多渠道拣货单对账系统 - 流水线配置
// ==========================================
// 职责: 维度开关 / 聚合模式 / 映射文件列名 / 渠道列定义
// 存储: JSON 配置文件（缺省时使用内置默认值）
// ==========================================

use crate::config::channel_schema::{builtin_schemas, ChannelRegistry, ChannelSchema};
use crate::domain::{Dimensions, GroupingMode};
use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};

// ==========================================
// MappingColumns - 映射文件列名
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingColumns {
    #[serde(default = "default_channel_sku")]
    pub channel_sku: String,
    #[serde(default = "default_size")]
    pub size: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_master_sku")]
    pub master_sku: String,
    #[serde(default = "default_account")]
    pub account: String,
}

fn default_channel_sku() -> String {
    "Channel SKU".to_string()
}

fn default_size() -> String {
    "Channel Size".to_string()
}

fn default_color() -> String {
    "Channel Color".to_string()
}

fn default_master_sku() -> String {
    "Our SKU".to_string()
}

fn default_account() -> String {
    "Account name".to_string()
}

impl Default for MappingColumns {
    fn default() -> Self {
        Self {
            channel_sku: default_channel_sku(),
            size: default_size(),
            color: default_color(),
            master_sku: default_master_sku(),
            account: default_account(),
        }
    }
}

impl MappingColumns {
    /// 当前维度下映射文件必须包含的列（按检查顺序）
    pub fn required_columns(&self, dimensions: Dimensions) -> Vec<&str> {
        let mut columns = vec![self.channel_sku.as_str()];
        if dimensions.size {
            columns.push(&self.size);
        }
        if dimensions.color {
            columns.push(&self.color);
        }
        columns.push(&self.master_sku);
        columns.push(&self.account);
        columns
    }
}

// ==========================================
// PipelineConfig - 流水线配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub dimensions: Dimensions,
    #[serde(default)]
    pub grouping: GroupingMode,
    #[serde(default)]
    pub mapping_columns: MappingColumns,
    #[serde(default = "builtin_schemas")]
    pub channels: Vec<ChannelSchema>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::default(),
            grouping: GroupingMode::default(),
            mapping_columns: MappingColumns::default(),
            channels: builtin_schemas(),
        }
    }
}

impl PipelineConfig {
    /// 从 JSON 文本解析
    pub fn from_json(raw: &str) -> ImportResult<Self> {
        let config: PipelineConfig = serde_json::from_str(raw)?;
        Ok(config)
    }

    /// 序列化为带缩进的 JSON
    pub fn to_json_pretty(&self) -> ImportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 构建渠道注册表并校验配置
    pub fn registry(&self) -> ImportResult<ChannelRegistry> {
        let registry = ChannelRegistry::from_schemas(self.channels.clone())?;
        registry.validate(self.dimensions)?;
        Ok(registry)
    }

    /// 校验全部配置项
    pub fn validate(&self) -> ImportResult<()> {
        for label in self.mapping_columns.required_columns(self.dimensions) {
            if label.trim().is_empty() {
                return Err(ImportError::ConfigError(
                    "映射文件列名不能为空".to_string(),
                ));
            }
        }
        self.registry().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.mapping_columns.master_sku, "Our SKU");
        assert_eq!(config.grouping, GroupingMode::MasterSku);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = PipelineConfig::from_json(
            r#"{ "dimensions": { "size": false, "color": false }, "grouping": "master_sku_with_attributes" }"#,
        )
        .unwrap();

        assert_eq!(config.dimensions, Dimensions::sku_only());
        assert_eq!(config.grouping, GroupingMode::MasterSkuWithAttributes);
        assert_eq!(config.mapping_columns, MappingColumns::default());
        assert_eq!(config.channels.len(), 8);
    }

    #[test]
    fn test_custom_channels_replace_builtin() {
        let config = PipelineConfig::from_json(
            r#"{
                "dimensions": { "size": false, "color": false },
                "channels": [
                    { "channel_id": "Shop", "sku_column": "Item", "qty_column": "Count" }
                ]
            }"#,
        )
        .unwrap();

        let registry = config.registry().unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("Shop").unwrap().size_column, None);
    }

    #[test]
    fn test_dimension_without_column_is_config_error() {
        let config = PipelineConfig::from_json(
            r#"{ "channels": [ { "channel_id": "Shop", "sku_column": "Item", "qty_column": "Count" } ] }"#,
        )
        .unwrap();

        assert!(matches!(config.validate(), Err(ImportError::ConfigError(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            PipelineConfig::from_json("{ not json"),
            Err(ImportError::ConfigError(_))
        ));
    }

    #[test]
    fn test_mapping_required_columns() {
        let columns = MappingColumns::default();
        assert_eq!(
            columns.required_columns(Dimensions::sku_only()),
            vec!["Channel SKU", "Our SKU", "Account name"]
        );
        assert_eq!(columns.required_columns(Dimensions::default()).len(), 5);
    }
}
