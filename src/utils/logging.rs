/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::ConversionReport;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择默认级别。重复调用是安全的。
pub fn init(verbose: bool) {
    let default_directives = if verbose {
        "pdf2qa=debug,info"
    } else {
        "pdf2qa=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `mode`: 运行模式（serve / convert）
/// - `config`: 配置
pub fn log_startup(mode: &str, config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 PDF2QA 启动 - {} 模式", mode);
    info!(
        "🤖 模型: {} @ {}",
        config.generation.model, config.generation.endpoint
    );
    info!(
        "📏 段落预算: {} tokens | 📊 最大并发数: {} | 策略: {:?}",
        config.paragraph_token_budget, config.max_concurrent_paragraphs, config.failure_policy
    );
    info!("{}", "=".repeat(60));
}

/// 记录文本提取结果
pub fn log_text_extracted(bytes: usize, chars: usize) {
    info!("📄 文本提取完成: {} 字节 → {} 字符", bytes, chars);
}

/// 记录段落切分结果
pub fn log_paragraphs_ready(sentences: usize, paragraphs: usize, budget: usize) {
    info!(
        "✂️ 切分完成: {} 个句子 → {} 个段落 (预算 {} tokens)",
        sentences, paragraphs, budget
    );
}

/// 打印最终统计信息
pub fn print_final_stats(report: &ConversionReport) {
    info!("\n{}", "=".repeat(60));
    info!("📊 文档处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📄 段落总数: {}", report.paragraph_count);
    info!("✅ 问答记录: {}", report.records.len());
    info!("⏭️ 跳过记录: {}", report.skipped_records.len());
    info!("❌ 失败段落: {}", report.failed_paragraphs.len());
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
