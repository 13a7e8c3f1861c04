// ==========================================
// 多渠道拣货单对账系统 - 配置管理器
// ==========================================
// 职责: 配置加载（显式路径 > 默认路径 > 内置默认值）
// ==========================================

use crate::config::pipeline_config::PipelineConfig;
use crate::importer::error::{ImportError, ImportResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 默认配置文件名
pub const CONFIG_FILE_NAME: &str = "config.json";

/// 默认配置目录名（位于系统配置目录下）
pub const CONFIG_DIR_NAME: &str = "picklist-recon";

/// 获取默认配置文件路径
///
/// # 返回
/// - Some(PathBuf): <config_dir>/picklist-recon/config.json
/// - None: 无法确定系统配置目录
pub fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    source: Option<PathBuf>,
    config: PipelineConfig,
}

impl ConfigManager {
    /// 使用内置默认值
    pub fn builtin() -> Self {
        Self {
            source: None,
            config: PipelineConfig::default(),
        }
    }

    /// 从指定文件加载（文件必须存在）
    pub fn from_file(path: &Path) -> ImportResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ImportError::ConfigError(format!("配置文件读取失败 ({}): {}", path.display(), e))
        })?;

        let config = PipelineConfig::from_json(&raw).map_err(|e| {
            ImportError::ConfigError(format!("配置文件格式错误 ({}): {}", path.display(), e))
        })?;
        config.validate()?;

        info!(path = %path.display(), channels = config.channels.len(), "配置文件加载完成");

        Ok(Self {
            source: Some(path.to_path_buf()),
            config,
        })
    }

    /// 加载配置
    ///
    /// # 参数
    /// - explicit: 命令行指定的配置路径
    ///
    /// # 规则
    /// 1. 指定了路径 → 必须能读取
    /// 2. 未指定且默认路径存在 → 读取默认路径
    /// 3. 否则使用内置默认值
    pub fn load(explicit: Option<&Path>) -> ImportResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match get_default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                debug!("未找到配置文件，使用内置默认配置");
                Ok(Self::builtin())
            }
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn into_config(self) -> PipelineConfig {
        self.config
    }

    /// 配置来源（None 表示内置默认值）
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
