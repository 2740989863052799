//! json2xlsx command-line driver
//!
//! Converts every `.json` file in the `input` directory beside the executable
//! into an `.xlsx` report in the `output` directory beside it.

use std::path::Path;
use std::process;

use json2xlsx::{BatchBuilder, BatchEvent, BatchOutcome, FileOutcome, JsonToXlsxError};
use tracing_subscriber::{fmt, EnvFilter};

/// Log filter environment variable (e.g. `JSON2XLSX_LOG=debug`)
const LOG_ENV: &str = "JSON2XLSX_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = fmt().with_env_filter(filter).with_target(false).finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("Tracing subscriber already set; skipping re-initialization.");
    }
}

fn main() {
    init_tracing();

    let converter = match BatchBuilder::new().build() {
        Ok(converter) => converter,
        Err(e) => {
            handle_error(e);
            process::exit(1);
        }
    };

    match converter.run(print_event) {
        Ok(BatchOutcome::InputCreated(dir)) => {
            println!("已创建输入目录: {}", dir.display());
            println!("请将JSON文件放入input目录后重新运行程序。");
        }
        Ok(BatchOutcome::NoInputFiles(dir)) => {
            println!("\n在 '{}' 目录中未找到JSON文件。", dir.display());
        }
        Ok(BatchOutcome::Completed(summary)) => {
            if summary.succeeded() == 0 {
                println!("\n没有JSON文件被成功处理，请检查错误信息。");
            } else {
                println!(
                    "\n处理完成。共成功处理了 {} / {} 个JSON文件。",
                    summary.succeeded(),
                    summary.total()
                );
            }
        }
        Err(e) => {
            handle_error(e);
            process::exit(1);
        }
    }
}

fn print_event(event: BatchEvent<'_>) {
    match event {
        BatchEvent::OutputDirCreated(dir) => {
            println!("已创建输出目录: {}", dir.display());
        }
        BatchEvent::Processing(input) => {
            println!("\n正在处理: {} ...", file_name(input));
        }
        BatchEvent::Finished(input, outcome) => print_outcome(input, outcome),
    }
}

fn print_outcome(input: &Path, outcome: &FileOutcome) {
    match outcome {
        FileOutcome::Converted { output, warnings } => {
            println!("成功转换: {}", output.display());
            if *warnings > 0 {
                println!("  已跳过 {} 个无法解析的效果值。", warnings);
            }
        }
        FileOutcome::InvalidJson(_) => {
            println!("  错误: 文件 {} 不是有效的JSON格式。跳过。", file_name(input));
        }
        FileOutcome::NotFound => {
            println!("  错误: 文件 {} 未找到。", input.display());
        }
        FileOutcome::ReadFailed(detail) => {
            println!(
                "  错误: 读取或解析文件 {} 时发生意外错误: {}。跳过。",
                file_name(input),
                detail
            );
        }
        FileOutcome::MissingField { output, key } => {
            println!(
                "  错误: 文件 {} 的源JSON缺少关键字段 '{}'。跳过此文件。",
                file_name(output),
                key
            );
        }
        FileOutcome::ConvertFailed { output, detail } => {
            println!(
                "  错误: 处理文件生成 {} 时发生意外错误: {}。跳过此文件。",
                file_name(output),
                detail
            );
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn handle_error(error: JsonToXlsxError) {
    match error {
        JsonToXlsxError::Io(io_err) => {
            eprintln!("I/O Error: {}", io_err);
            eprintln!("Please check that the input and output directories are accessible.");
        }
        JsonToXlsxError::Config(msg) => {
            eprintln!("Configuration Error: {}", msg);
            eprintln!("Please check the location of the executable.");
        }
        other => {
            eprintln!("Error: {}", other);
        }
    }
}
