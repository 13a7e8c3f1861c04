// ==========================================
// 多渠道拣货单对账系统 - 命令行入口
// ==========================================
// 用法: picklist-recon run -i Meesho:Drench:meesho.csv -m mapping.xlsx -o picklist.csv
// ==========================================

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use picklist_recon::logging::{self, LogFormat};
use picklist_recon::{ChannelFile, ConfigManager, MappingFile, PickListPipeline, PickListWriter};
use std::io::Write;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "picklist-recon", version, about = "多渠道拣货单对账汇总")]
struct Cli {
    /// 配置文件路径（默认: <config_dir>/picklist-recon/config.json）
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// 以 JSON 格式输出日志
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// 执行对账并输出拣货单
    Run(RunArgs),
    /// 列出已注册的渠道及列名
    Channels,
    /// 打印生效配置（JSON）
    ShowConfig,
}

#[derive(Debug, Args)]
struct RunArgs {
    /// 渠道文件，格式 CHANNEL:ACCOUNT:PATH（可重复）
    #[arg(long = "input", short = 'i', value_parser = parse_channel_input)]
    inputs: Vec<ChannelInput>,

    /// SKU 映射文件（.csv/.xlsx/.xls）
    #[arg(long, short = 'm')]
    mapping: PathBuf,

    /// 输出文件（.csv/.xlsx）；缺省时 CSV 写到 stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// 运行报告输出路径（JSON）
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Debug, Clone)]
struct ChannelInput {
    channel_id: String,
    account_id: String,
    path: PathBuf,
}

fn parse_channel_input(raw: &str) -> Result<ChannelInput, String> {
    let mut parts = raw.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(channel), Some(account), Some(path))
            if !channel.is_empty() && !account.is_empty() && !path.is_empty() =>
        {
            Ok(ChannelInput {
                channel_id: channel.to_string(),
                account_id: account.to_string(),
                path: PathBuf::from(path),
            })
        }
        _ => Err(format!("期望 CHANNEL:ACCOUNT:PATH，实际: {}", raw)),
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    });

    if let Err(err) = run(cli) {
        error!(error = %err, "命令执行失败");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "原因");
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let manager = ConfigManager::load(cli.config.as_deref()).context("配置加载失败")?;
    match manager.source() {
        Some(path) => info!(config = %path.display(), "使用配置文件"),
        None => info!("使用内置默认配置"),
    }

    match cli.command {
        Commands::Run(args) => run_pipeline(manager, args),
        Commands::Channels => list_channels(manager),
        Commands::ShowConfig => {
            println!("{}", manager.config().to_json_pretty()?);
            Ok(())
        }
    }
}

fn run_pipeline(manager: ConfigManager, args: RunArgs) -> Result<()> {
    info!("系统版本: {}", picklist_recon::VERSION);

    let files = args
        .inputs
        .iter()
        .map(|input| {
            ChannelFile::from_path(&input.channel_id, &input.account_id, &input.path)
                .with_context(|| format!("渠道文件读取失败: {}", input.path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mapping = MappingFile::from_path(&args.mapping)
        .with_context(|| format!("映射文件读取失败: {}", args.mapping.display()))?;

    let config = manager.into_config();
    let writer = PickListWriter::from_config(&config);
    let pipeline = PickListPipeline::new(config)?;

    let outcome = pipeline.run(&files, &mapping)?;

    if outcome.rows.is_empty() {
        // 空结果不是错误，由使用方决定如何处理
        info!("未产生任何拣货行");
    }

    match &args.output {
        Some(path) => writer.write_to_path(&outcome.rows, path)?,
        None => {
            let bytes = writer.to_csv_bytes(&outcome.rows)?;
            std::io::stdout()
                .write_all(&bytes)
                .map_err(|e| anyhow!("stdout 写入失败: {}", e))?;
        }
    }

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&outcome.report)?;
        std::fs::write(path, json)
            .with_context(|| format!("运行报告写入失败: {}", path.display()))?;
    }

    info!(
        records_unmapped = outcome.report.records_unmapped,
        output_rows = outcome.report.output_rows,
        "完成"
    );
    Ok(())
}

fn list_channels(manager: ConfigManager) -> Result<()> {
    let registry = manager.config().registry()?;
    for schema in registry.schemas() {
        println!(
            "{}\tsku={}\tsize={}\tcolor={}\tqty={}",
            schema.channel_id,
            schema.sku_column,
            schema.size_column.as_deref().unwrap_or("-"),
            schema.color_column.as_deref().unwrap_or("-"),
            schema.qty_column
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_channel_input() {
        let input = parse_channel_input("Meesho:Drench:reports/meesho.csv").unwrap();
        assert_eq!(input.channel_id, "Meesho");
        assert_eq!(input.account_id, "Drench");
        assert_eq!(input.path, PathBuf::from("reports/meesho.csv"));
    }

    #[test]
    fn test_parse_channel_input_keeps_colons_in_path() {
        let input = parse_channel_input("Amazon:Sparsh:C:/reports/amazon.csv").unwrap();
        assert_eq!(input.path, PathBuf::from("C:/reports/amazon.csv"));
    }

    #[test]
    fn test_parse_channel_input_rejects_short_form() {
        assert!(parse_channel_input("Meesho:meesho.csv").is_err());
    }
}
