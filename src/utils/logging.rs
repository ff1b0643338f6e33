/// 日志工具模块
///
/// 提供日志初始化以及格式化输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::models::Schedule;

/// 初始化日志
///
/// `RUST_LOG` 优先；未设置时按 `verbose` 选择 debug 或 info 级别。
/// 重复调用不会报错（测试中常见）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `input_count`: 待处理的课表数量
/// - `enhance`: 是否启用 OCR 纠错
pub fn log_startup(input_count: usize, enhance: bool) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 课表解析启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📊 待处理课表: {} 份", input_count);
    info!("🔧 OCR 纠错: {}", if enhance { "开启" } else { "关闭" });
    info!("{}", "=".repeat(60));
}

/// 记录一份课表的解析摘要
pub fn log_schedule_summary(name: &str, schedule: &Schedule) {
    info!("\n{}", "─".repeat(60));
    info!("📅 {} 的课表", name);
    for (day, sessions) in schedule.iter() {
        info!("  {}: {} 节课", day, sessions.len());
    }
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(success: usize, failed: usize, total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!("✅ 成功: {}/{}", success, total);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
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
