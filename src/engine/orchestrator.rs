// ==========================================
// 多渠道拣货单对账系统 - 流水线编排器
// ==========================================
// 流程: 映射加载 → 摄取 → 标准化 → 对账 → 聚合
// 红线: 同步单线程；任一结构性错误中止整次运行
// ==========================================

use crate::config::{ChannelRegistry, ChannelSchema, PipelineConfig};
use crate::domain::{ChannelFile, MappingFile, NormalizedRecord, PipelineOutcome, RunReport};
use crate::engine::aggregator::Aggregator;
use crate::engine::mapping_table::MappingTable;
use crate::engine::reconciler::Reconciler;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::mapping_loader::MappingLoader;
use crate::importer::picklist_importer_trait::{FieldMapper, FileParser};
use crate::importer::{ColumnNormalizer, UniversalFileParser};
use chrono::Utc;
use std::collections::BTreeSet;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// PickListPipeline - 拣货单对账流水线
// ==========================================
pub struct PickListPipeline {
    config: PipelineConfig,
    registry: ChannelRegistry,

    // 导入组件
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
}

impl PickListPipeline {
    /// 使用默认组件创建流水线（配置在此校验）
    pub fn new(config: PipelineConfig) -> ImportResult<Self> {
        Self::with_components(
            config,
            Box::new(UniversalFileParser),
            Box::new(ColumnNormalizer),
        )
    }

    /// 使用自定义解析器/标准化器创建流水线
    pub fn with_components(
        config: PipelineConfig,
        file_parser: Box<dyn FileParser>,
        field_mapper: Box<dyn FieldMapper>,
    ) -> ImportResult<Self> {
        config.validate()?;
        let registry = config.registry()?;

        Ok(Self {
            config,
            registry,
            file_parser,
            field_mapper,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }

    /// 执行一次完整对账
    ///
    /// # 参数
    /// - files: (渠道, 账号, 文件) 三元组
    /// - mapping: SKU 映射文件
    ///
    /// # 返回
    /// - Ok(PipelineOutcome): 聚合结果 + 运行报告
    /// - Err: 运行级错误（包含渠道/账号/文件/期望列名）
    #[instrument(skip_all, fields(run_id = tracing::field::Empty, files = files.len()))]
    pub fn run(&self, files: &[ChannelFile], mapping: &MappingFile) -> ImportResult<PipelineOutcome> {
        let run_id = Uuid::new_v4().to_string();
        let started_at = Utc::now();
        tracing::Span::current().record("run_id", tracing::field::display(&run_id));

        info!(mapping = %mapping.source_name, "开始拣货单对账");

        // === 步骤 0: 渠道/账号校验 ===
        let schemas = files
            .iter()
            .map(|file| self.registry.resolve(&file.channel_id, &file.account_id))
            .collect::<ImportResult<Vec<&ChannelSchema>>>()
            .map_err(|e| {
                error!(error = %e, "渠道或账号未注册");
                e
            })?;

        // === 步骤 1: 映射表 ===
        debug!("步骤 1: 加载映射文件");
        let loader = MappingLoader::new(&self.config.mapping_columns, self.config.dimensions);
        let entries = loader.load(mapping).map_err(|e| {
            error!(error = %e, "映射文件加载失败");
            e
        })?;
        let table = MappingTable::build(&entries, self.config.dimensions);
        if table.duplicate_keys() > 0 {
            warn!(duplicates = table.duplicate_keys(), "映射文件存在重复键");
        }
        info!(entries = table.len(), "映射表构建完成");

        // === 步骤 2: 摄取 + 标准化 ===
        debug!("步骤 2: 摄取渠道文件");
        let mut records: Vec<NormalizedRecord> = Vec::new();
        for (file, schema) in files.iter().zip(schemas) {
            let normalized = self.ingest_file(file, schema).map_err(|e| {
                error!(
                    channel_id = %file.channel_id,
                    account_id = %file.account_id,
                    source = %file.source_name,
                    error = %e,
                    "渠道文件处理失败"
                );
                e
            })?;
            records.extend(normalized);
        }
        let records_normalized = records.len();
        let total_qty = checked_total(&records).map_err(|e| {
            error!(error = %e, "数量合计溢出");
            e
        })?;

        // === 步骤 3: 对账 ===
        debug!("步骤 3: 对账");
        let reconciled = Reconciler::new(&table).reconcile(records);
        let unmapped: Vec<_> = reconciled.iter().filter(|r| !r.mapped).collect();
        let unmapped_channel_skus: BTreeSet<String> = unmapped
            .iter()
            .map(|r| r.record.channel_sku.clone())
            .collect();
        if !unmapped.is_empty() {
            info!(
                unmapped = unmapped.len(),
                distinct_skus = unmapped_channel_skus.len(),
                "存在未映射记录，已归入 UNMAPPED 分组"
            );
        }
        let records_unmapped = unmapped.len();

        // === 步骤 4: 聚合 ===
        debug!("步骤 4: 聚合");
        let rows = Aggregator::new(self.config.grouping).aggregate(&reconciled)?;
        debug_assert_eq!(
            rows.iter().try_fold(0u64, |acc, r| acc.checked_add(r.total_qty)),
            Some(total_qty)
        );

        let report = RunReport {
            run_id,
            started_at,
            files_processed: files.len(),
            records_normalized,
            records_unmapped,
            unmapped_channel_skus: unmapped_channel_skus.into_iter().collect(),
            mapping_entries: table.len(),
            duplicate_mapping_keys: table.duplicate_keys(),
            total_qty,
            output_rows: rows.len(),
        };

        info!(
            output_rows = report.output_rows,
            total_qty = report.total_qty,
            unmapped = report.records_unmapped,
            "拣货单对账完成"
        );

        Ok(PipelineOutcome { rows, report })
    }

    /// 单个渠道文件: 解析 → 标准化
    fn ingest_file(
        &self,
        file: &ChannelFile,
        schema: &ChannelSchema,
    ) -> ImportResult<Vec<NormalizedRecord>> {
        let table = self
            .file_parser
            .parse_table(&file.source_name, &file.content)?;

        let records =
            self.field_mapper
                .normalize(&table, schema, &file.account_id, self.config.dimensions)?;

        debug!(
            channel_id = %file.channel_id,
            account_id = %file.account_id,
            rows = records.len(),
            "渠道文件标准化完成"
        );

        Ok(records)
    }
}

/// 全部记录数量合计；溢出时指向使合计越界的那一行
fn checked_total(records: &[NormalizedRecord]) -> ImportResult<u64> {
    records.iter().try_fold(0u64, |acc, record| {
        acc.checked_add(record.qty)
            .ok_or_else(|| ImportError::QuantityOverflow {
                channel_id: record.channel_id.clone(),
                account_id: record.account_id.clone(),
                row: record.row_number,
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChannelSchema;
    use crate::domain::Dimensions;

    fn config() -> PipelineConfig {
        PipelineConfig {
            dimensions: Dimensions::sku_only(),
            channels: vec![ChannelSchema::new("Meesho", "SKU", None, None, "Qty")],
            ..PipelineConfig::default()
        }
    }

    fn mapping(body: &str) -> MappingFile {
        MappingFile::new("mapping.csv", body.as_bytes().to_vec())
    }

    #[test]
    fn test_run_reports_unmapped_count() {
        let pipeline = PickListPipeline::new(config()).unwrap();
        let files = vec![ChannelFile::new(
            "Meesho",
            "X",
            "meesho.csv",
            b"SKU,Qty\nA,5\nZ,2\nZ,1\n".to_vec(),
        )];

        let outcome = pipeline
            .run(&files, &mapping("Channel SKU,Our SKU,Account name\nA,M1,X\n"))
            .unwrap();

        assert_eq!(outcome.rows.len(), 2);
        assert_eq!(outcome.report.records_normalized, 3);
        assert_eq!(outcome.report.records_unmapped, 2);
        assert_eq!(outcome.report.unmapped_channel_skus, vec!["Z".to_string()]);
        assert_eq!(outcome.report.total_qty, 8);
    }

    #[test]
    fn test_unknown_channel_aborts() {
        let pipeline = PickListPipeline::new(config()).unwrap();
        let files = vec![ChannelFile::new("Amazon", "X", "a.csv", b"SKU,Qty\n".to_vec())];

        let result = pipeline.run(&files, &mapping("Channel SKU,Our SKU,Account name\n"));

        assert!(matches!(result, Err(ImportError::UnknownChannel(_))));
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let bad = PipelineConfig {
            channels: vec![ChannelSchema::new("Meesho", "SKU", None, None, "Qty")],
            ..PipelineConfig::default()
        };

        assert!(matches!(
            PickListPipeline::new(bad),
            Err(ImportError::ConfigError(_))
        ));
    }

    #[test]
    fn test_total_overflow_across_files_aborts() {
        let pipeline = PickListPipeline::new(config()).unwrap();
        let files = vec![
            ChannelFile::new(
                "Meesho",
                "X",
                "x.csv",
                b"SKU,Qty\nA,18446744073709551615\n".to_vec(),
            ),
            ChannelFile::new("Meesho", "Y", "y.csv", b"SKU,Qty\nB,1\n".to_vec()),
        ];

        let result = pipeline.run(&files, &mapping("Channel SKU,Our SKU,Account name\n"));

        match result {
            Err(ImportError::QuantityOverflow {
                account_id, row, ..
            }) => {
                assert_eq!(account_id, "Y");
                assert_eq!(row, 2);
            }
            other => panic!("unexpected result: {:?}", other.map(|o| o.rows)),
        }
    }
}
