use clap::Parser;
use material_excel::{cli, config, error, export, logging, merger, validator};
use cli::{Cli, Commands};
use config::Config;
use error::{MaterialExcelError, Result};
use std::process::ExitCode;
use validator::ValidationReport;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = logging::init(cli.verbose);
    let config = Config::load(cli.config.as_deref());

    match run(cli.command, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config: &Config) -> Result<ExitCode> {
    match command {
        Commands::Convert { input, output } => {
            let input = input.ok_or_else(|| MaterialExcelError::MissingArgument("-i/--input".into()))?;

            println!("📊 material-excel - Excel変換\n");
            let path = export::process_json_to_excel(&input, output.as_deref(), config)?;
            println!("✅ 出力: {}", path.display());
        }

        Commands::Validate { input, json } => {
            let input = input.ok_or_else(|| MaterialExcelError::MissingArgument("-i/--input".into()))?;

            let report = validator::validate_excel_format(&input);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }

            // 検証結果の正否は終了コードに反映しない
        }

        Commands::Merge { files, output } => {
            if files.len() < 2 {
                return Err(MaterialExcelError::MissingArgument(
                    "--files には2つ以上のファイルが必要です".into(),
                ));
            }

            println!("🔗 material-excel - Excel統合\n");
            let path = merger::merge_excel_files(&files, output.as_deref())?;
            println!("✅ 出力: {}", path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_report(report: &ValidationReport) {
    println!("🔍 material-excel - Excel検証\n");

    for detail in &report.details {
        println!("- {}: {}筆, {}欄", detail.sheet, detail.rows, detail.columns);
    }

    if !report.warnings.is_empty() {
        println!("\n⚠ 警告 ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  {}", warning);
        }
    }

    if !report.errors.is_empty() {
        println!("\n✖ エラー ({}):", report.errors.len());
        for error in &report.errors {
            println!("  {}", error);
        }
    }

    if report.valid {
        println!("\n✅ 検証OK");
    } else {
        println!("\n❌ 検証NG");
    }
}
