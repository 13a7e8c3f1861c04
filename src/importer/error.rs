// ==========================================
// 多渠道拣货单对账系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分级: 文件级 / 列级 / 行级 错误均为运行级致命错误
// ==========================================

use thiserror::Error;

/// 导入与对账流水线错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("文件无法解析为表格 ({source_name}): {message}")]
    UnreadableFile {
        source_name: String,
        message: String,
    },

    #[error("映射文件无法解析 ({source_name}): {message}")]
    UnreadableMappingFile {
        source_name: String,
        message: String,
    },

    // ===== 列缺失错误 =====
    #[error("缺少列 (渠道 {channel_id}, 账号 {account_id}): 期望列名 '{expected_label}'")]
    MissingColumn {
        channel_id: String,
        account_id: String,
        expected_label: String,
    },

    #[error("映射文件缺少列: 期望列名 '{expected_label}'")]
    MissingMappingColumn { expected_label: String },

    // ===== 行级错误 =====
    #[error(
        "数量无效 (渠道 {channel_id}, 账号 {account_id}, 行 {row}, 列 '{column}'): '{value}'"
    )]
    InvalidQuantity {
        channel_id: String,
        account_id: String,
        row: usize,
        column: String,
        value: String,
    },

    #[error("数量合计溢出 (渠道 {channel_id}, 账号 {account_id}, 行 {row})")]
    QuantityOverflow {
        channel_id: String,
        account_id: String,
        row: usize,
    },

    // ===== 配置错误 =====
    #[error("未注册的渠道: {0}")]
    UnknownChannel(String),

    #[error("渠道 {channel_id} 未声明账号: {account_id}")]
    UnknownAccount {
        channel_id: String,
        account_id: String,
    },

    #[error("配置错误: {0}")]
    ConfigError(String),

    // ===== 输出错误 =====
    #[error("结果导出失败: {0}")]
    ExportError(String),
}

impl ImportError {
    /// 包装解析器错误为文件级错误
    pub fn unreadable(source_name: &str, err: impl std::fmt::Display) -> Self {
        ImportError::UnreadableFile {
            source_name: source_name.to_string(),
            message: err.to_string(),
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::ConfigError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
