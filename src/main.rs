use std::path::Path;

use anyhow::{Context, Result};
use routine_parser::models::{load_all_routine_files, load_routine_file};
use routine_parser::services::timetable::{slot_labels, Cell};
use routine_parser::services::RoutineReport;
use routine_parser::{
    logging, Config, LlmService, OutputFormat, RoutineInput, RoutineService, Timetable,
};
use tokio::io::AsyncReadExt;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load().context("加载配置失败")?;

    // 初始化日志
    logging::init(config.verbose_logging);

    let inputs = collect_inputs(&config).await?;
    if inputs.is_empty() {
        warn!("⚠️ 没有找到待处理的课表文本，程序结束");
        return Ok(());
    }

    let enhance = config.enhance_ocr && config.has_llm();
    if config.enhance_ocr && !enhance {
        warn!("⚠️ 已开启 OCR 纠错但未配置 LLM_API_KEY，将直接解析原文");
    }
    logging::log_startup(inputs.len(), enhance);

    let llm = LlmService::new(&config);
    if enhance {
        info!("🤖 OCR 纠错模型: {}", llm.model_name());
    }

    let service = RoutineService::new(llm)
        .with_max_concurrent(config.max_concurrent_inputs);
    let results = service.process_batch(&inputs, enhance).await;

    let mut success = 0;
    for (input, result) in inputs.iter().zip(results) {
        match result {
            Ok(report) => {
                success += 1;
                logging::log_schedule_summary(&report.name, &report.schedule);
                print_report(&report, config.output_format)?;
            }
            Err(e) if e.is_user_facing() => warn!("[{}] {}", input.source(), e),
            Err(e) => error!("[{}] 处理失败: {}", input.source(), e),
        }
    }

    logging::print_final_stats(success, inputs.len() - success, inputs.len());

    Ok(())
}

/// 收集输入：命令行给出的文件（`-` 表示标准输入），否则读取配置中的目录
async fn collect_inputs(config: &Config) -> Result<Vec<RoutineInput>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        return load_all_routine_files(&config.input_folder)
            .await
            .with_context(|| format!("无法读取课表目录: {}", config.input_folder));
    }

    let mut inputs = Vec::with_capacity(args.len());
    for arg in args {
        if arg == "-" {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("读取标准输入失败")?;
            inputs.push(RoutineInput::from_text("stdin", text));
        } else {
            let input = load_routine_file(Path::new(&arg))
                .await
                .with_context(|| format!("无法读取课表文件: {}", arg))?;
            inputs.push(input);
        }
    }
    Ok(inputs)
}

fn print_report(report: &RoutineReport, format: OutputFormat) -> Result<()> {
    for (day, sessions) in report.schedule.iter() {
        for s in sessions.iter().filter(|s| s.is_degenerate()) {
            warn!(
                "[{}] {} 的课程 {} 时间无法识别 ({})，已排在当天最前",
                report.name, day, s.code, s.display_time
            );
        }
    }

    let timetable = Timetable::build(&report.schedule);
    for unplaced in &timetable.unplaced {
        warn!(
            "[{}] {} 的课程 {} 与其他课程重叠或不在整点/半点，表格视图中无法显示",
            report.name, unplaced.day, unplaced.id
        );
    }

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "name": report.name,
                "grammar": format!("{:?}", report.grammar),
                "schedule": report.schedule,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("# {}", report.name);
            for (day, sessions) in report.schedule.iter() {
                println!("{}", day);
                for s in sessions {
                    println!(
                        "  {:<22} {:<14} {:<32} {}",
                        s.display_time, s.code, s.title, s.room
                    );
                }
            }
            print_grid(report, &timetable);
            println!();
        }
    }
    Ok(())
}

/// 以文本形式打印表格视图，每个单元格用 `|` 分隔
fn print_grid(report: &RoutineReport, timetable: &Timetable) {
    if timetable.rows.is_empty() {
        return;
    }

    println!();
    println!("  {:<10} {}", "", slot_labels().join(" | "));
    for row in &timetable.rows {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|cell| match cell {
                Cell::Session { id, span, .. } => {
                    let code = report
                        .schedule
                        .find_session(id)
                        .map(|(_, s)| s.code.as_str())
                        .unwrap_or(id.as_str());
                    format!("{} ({})", code, span)
                }
                Cell::Empty { is_break: true, .. } => "午休".to_string(),
                Cell::Empty { .. } => "-".to_string(),
            })
            .collect();
        println!("  {:<10} {}", row.day, cells.join(" | "));
    }
}
