// ==========================================
// 多渠道拣货单对账系统 - 导入接口 Trait
// ==========================================
// 职责: 定义文件解析与列标准化接口（不包含实现）
// ==========================================

use crate::config::ChannelSchema;
use crate::domain::{Dimensions, NormalizedRecord, RawTable};
use crate::importer::error::ImportResult;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 1: 摄取）
// 实现者: CsvParser, ExcelParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    /// 解析文件内容为原始表格
    ///
    /// # 参数
    /// - source_name: 文件名（用于报错与格式判定）
    /// - content: 文件字节内容
    ///
    /// # 返回
    /// - Ok(RawTable): 表头 + 行记录
    /// - Err(UnreadableFile): 内容无法解析为表格
    fn parse_table(&self, source_name: &str, content: &[u8]) -> ImportResult<RawTable>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 渠道列 → 标准列 映射接口（阶段 2: 标准化）
// 实现者: ColumnNormalizer
pub trait FieldMapper: Send + Sync {
    /// 将渠道原始表格映射为标准化记录
    ///
    /// # 参数
    /// - table: 原始表格
    /// - schema: 该渠道的列定义
    /// - account_id: 所属账号
    /// - dimensions: 当前部署跟踪的维度
    ///
    /// # 返回
    /// - Ok(Vec<NormalizedRecord>): 每行一条
    /// - Err(MissingColumn): 首个缺失的声明列
    /// - Err(InvalidQuantity): 首个非法数量单元格
    fn normalize(
        &self,
        table: &RawTable,
        schema: &ChannelSchema,
        account_id: &str,
        dimensions: Dimensions,
    ) -> ImportResult<Vec<NormalizedRecord>>;
}
