// ==========================================
// 多渠道拣货单对账系统 - 配置层
// ==========================================
// 职责: 渠道列定义注册表 + 流水线配置加载
// 存储: JSON 配置文件 / 内置默认值
// ==========================================

pub mod channel_schema;
pub mod config_manager;
pub mod pipeline_config;

// 重导出核心配置类型
pub use channel_schema::{builtin_schemas, ChannelRegistry, ChannelSchema};
pub use config_manager::{get_default_config_path, ConfigManager};
pub use pipeline_config::{MappingColumns, PipelineConfig};
