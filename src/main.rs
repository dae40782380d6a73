use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pdf2qa::utils::logging;
use pdf2qa::{App, Config};

#[derive(Debug, Parser)]
#[command(name = "pdf2qa", version, about = "把 PDF 文档转换为问答对")]
struct Cli {
    /// TOML 配置文件路径
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 显示详细日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 启动 HTTP 上传服务
    Serve {
        /// 监听地址，覆盖配置文件
        #[arg(long)]
        addr: Option<String>,
    },
    /// 转换单个 PDF 文件
    Convert {
        /// 输入的 PDF 文件
        input: PathBuf,
        /// 输出的 JSON 文件（默认 <输入>.qa.json）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let mut config = Config::load(cli.config.as_deref()).context("加载配置失败")?;
    if cli.verbose {
        config.verbose_logging = true;
    }

    // 初始化日志
    logging::init(config.verbose_logging);

    match cli.command {
        Command::Serve { addr } => {
            if let Some(addr) = addr {
                config.server_addr = addr;
            }
            App::initialize(config)?.serve().await?;
        }
        Command::Convert { input, output } => {
            App::initialize(config)?
                .convert(&input, output)
                .await
                .with_context(|| format!("转换失败: {}", input.display()))?;
        }
    }

    Ok(())
}
