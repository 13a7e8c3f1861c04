// ==========================================
// 集成测试 - 磁盘文件 → 流水线 → 导出
// ==========================================
// 覆盖: 配置文件加载 / 从路径读取输入 / CSV 与 XLSX 导出
// ==========================================


use picklist_recon::config::ConfigManager;
use picklist_recon::domain::{ChannelFile, MappingFile};
use picklist_recon::importer::{ExcelParser, FileParser};
use picklist_recon::{ImportError, PickListPipeline, PickListWriter};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};
use test_helpers::*;

fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("写入测试文件失败");
    path
}

#[test]
fn test_files_on_disk_with_config_file() {
    let dir = TempDir::new().unwrap();

    let mut config_file = NamedTempFile::new().unwrap();
    writeln!(
        config_file,
        r#"{{
            "dimensions": {{ "size": false, "color": false }},
            "mapping_columns": {{ "master_sku": "Master" }},
            "channels": [
                {{ "channel_id": "Shop", "sku_column": "Item", "qty_column": "Count", "accounts": ["North", "South"] }}
            ]
        }}"#
    )
    .unwrap();

    let north = write_file(&dir, "north.csv", &csv_bytes(&["Item", "Count"], &[&["I-1", "4"]]));
    let south = write_file(&dir, "south.csv", &csv_bytes(&["Item", "Count"], &[&["I-9", "6"]]));
    let mapping = write_file(
        &dir,
        "mapping.csv",
        &csv_bytes(
            &["Channel SKU", "Master", "Account name"],
            &[&["I-1", "P-100", "North"], &["I-9", "P-100", "South"]],
        ),
    );

    let manager = ConfigManager::load(Some(config_file.path())).unwrap();
    let config = manager.into_config();
    let writer = PickListWriter::from_config(&config);
    let pipeline = PickListPipeline::new(config).unwrap();

    let files = vec![
        ChannelFile::from_path("Shop", "North", &north).unwrap(),
        ChannelFile::from_path("Shop", "South", &south).unwrap(),
    ];
    let mapping = MappingFile::from_path(&mapping).unwrap();

    let outcome = pipeline.run(&files, &mapping).unwrap();
    assert_eq!(outcome.rows.len(), 1);
    assert_eq!(outcome.rows[0].total_qty, 10);

    let out_csv = dir.path().join("picklist.csv");
    writer.write_to_path(&outcome.rows, &out_csv).unwrap();
    assert_eq!(
        std::fs::read_to_string(&out_csv).unwrap(),
        "Our SKU,Total Pick Quantity\nP-100,10\n"
    );

    let out_xlsx = dir.path().join("picklist.xlsx");
    writer.write_to_path(&outcome.rows, &out_xlsx).unwrap();
    let table = ExcelParser
        .parse_table("picklist.xlsx", &std::fs::read(&out_xlsx).unwrap())
        .unwrap();
    assert_eq!(table.rows[0].get("Our SKU"), Some("P-100"));
}

#[test]
fn test_undeclared_account_rejected() {
    let mut config_file = NamedTempFile::new().unwrap();
    writeln!(
        config_file,
        r#"{{
            "dimensions": {{ "size": false, "color": false }},
            "channels": [
                {{ "channel_id": "Shop", "sku_column": "Item", "qty_column": "Count", "accounts": ["North"] }}
            ]
        }}"#
    )
    .unwrap();

    let config = ConfigManager::load(Some(config_file.path()))
        .unwrap()
        .into_config();
    let pipeline = PickListPipeline::new(config).unwrap();

    let files = vec![ChannelFile::new(
        "Shop",
        "West",
        "west.csv",
        csv_bytes(&["Item", "Count"], &[&["I-1", "1"]]),
    )];
    let mapping = sku_only_mapping(&[]);

    match pipeline.run(&files, &mapping) {
        Err(ImportError::UnknownAccount {
            channel_id,
            account_id,
        }) => {
            assert_eq!(channel_id, "Shop");
            assert_eq!(account_id, "West");
        }
        other => panic!("unexpected result: {:?}", other.map(|o| o.rows)),
    }
}

#[test]
fn test_header_only_channel_file_contributes_nothing() {
    let files = vec![meesho_csv("X", &[])];
    let mapping = sku_only_mapping(&[&["A", "M1", "X"]]);

    let outcome = PickListPipeline::new(sku_only_config())
        .unwrap()
        .run(&files, &mapping)
        .unwrap();

    assert!(outcome.rows.is_empty());
    assert_eq!(outcome.report.files_processed, 1);
}

#[test]
fn test_missing_input_path_is_io_error() {
    let result = ChannelFile::from_path("Meesho", "X", std::path::Path::new("/nonexistent/m.csv"));
    assert!(result.is_err());
}
