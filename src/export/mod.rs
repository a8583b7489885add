//! 申請JSON → SAP匯入用Excel

use crate::config::{strip_bom, Config};
use crate::error::Result;
use chrono::Local;
use material_excel_common::export::excel_core::{
    generate_workbook_buffer, SheetData, SummaryData,
};
use material_excel_common::{columns_for, project_row, Category, MaterialApplication};
use std::path::{Path, PathBuf};

pub const EXPORT_FILE_PREFIX: &str = "SAP_Material_Import";

/// 同じ大類の核准済み申請（入力順）
#[derive(Debug, Clone)]
pub struct CategoryGroup<'a> {
    pub category: Category,
    pub applications: Vec<&'a MaterialApplication>,
}

/// `<prefix>_<YYYYmmdd_HHMMSS>.xlsx`
pub fn timestamped_file_name(prefix: &str) -> String {
    format!("{}_{}.xlsx", prefix, Local::now().format("%Y%m%d_%H%M%S"))
}

/// 出力先を決定（未指定またはディレクトリならタイムスタンプ付きファイル名）
pub fn resolve_output_path(output: Option<&Path>, prefix: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(timestamped_file_name(prefix)),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(timestamped_file_name(prefix)),
    }
}

/// 入力を読み込む（既存ファイルのパス、またはJSON文字列そのもの）
pub fn load_applications(input: &str, config: &Config) -> Result<Vec<MaterialApplication>> {
    let path = Path::new(input);

    let parsed = if path.is_file() {
        tracing::debug!("JSONファイルを読み込み: {}", path.display());
        std::fs::read_to_string(path)
            .map_err(Into::into)
            .and_then(|content| parse_applications(&content, config))
    } else {
        parse_applications(input, config)
    };

    parsed.inspect_err(|e| tracing::error!("JSON解析失敗: {}", e))
}

fn parse_applications(content: &str, config: &Config) -> Result<Vec<MaterialApplication>> {
    let content = if config.strips_bom() { strip_bom(content) } else { content };
    Ok(serde_json::from_str(content)?)
}

/// 核准済みの申請を大類ごとに分類
///
/// 大類は初出順、各大類内は入力順を保つ。
pub fn categorize(applications: &[MaterialApplication]) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();

    for app in applications.iter().filter(|a| a.is_approved()) {
        let category = Category::from_code(app.category_code());
        match groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.applications.push(app),
            None => groups.push(CategoryGroup {
                category,
                applications: vec![app],
            }),
        }
    }

    groups
}

/// 大類シートを作成（行数上限を超えた分は `<シート名>_2` 以降へ）
pub fn build_category_sheets(groups: &[CategoryGroup<'_>], config: &Config) -> Vec<SheetData> {
    let options = config.projection_options();
    let chunk_size = config.max_rows_per_sheet.max(1);
    let mut sheets = Vec::new();

    for group in groups {
        let columns = columns_for(group.category);
        let headers: Vec<String> = columns.iter().map(|c| c.to_string()).collect();

        for (part, chunk) in group.applications.chunks(chunk_size).enumerate() {
            let name = if part == 0 {
                group.category.sheet_name().to_string()
            } else {
                format!("{}_{}", group.category.sheet_name(), part + 1)
            };

            tracing::info!("建立工作表: {} ({} 筆資料)", name, chunk.len());

            sheets.push(SheetData {
                name,
                headers: headers.clone(),
                rows: chunk
                    .iter()
                    .map(|app| project_row(app, &columns, &options))
                    .collect(),
            });
        }
    }

    sheets
}

pub fn build_summary(applications: &[MaterialApplication], groups: &[CategoryGroup<'_>]) -> SummaryData {
    SummaryData {
        exported_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        total: applications.len(),
        approved: applications.iter().filter(|a| a.is_approved()).count(),
        categories: groups
            .iter()
            .map(|g| (g.category.sheet_name().to_string(), g.applications.len()))
            .collect(),
    }
}

/// 申請一覧をExcelに書き出す
pub fn export_applications(
    applications: &[MaterialApplication],
    output: Option<&Path>,
    config: &Config,
) -> Result<PathBuf> {
    let output_path = resolve_output_path(output, EXPORT_FILE_PREFIX);

    let groups = categorize(applications);
    let sheets = build_category_sheets(&groups, config);
    let summary = config
        .include_summary
        .then(|| build_summary(applications, &groups));

    let buffer = generate_workbook_buffer(summary.as_ref(), &sheets, &config.sheet_options())
        .inspect_err(|e| tracing::error!("Excel生成失敗: {}", e))?;

    std::fs::write(&output_path, buffer)
        .inspect_err(|e| tracing::error!("儲存檔案失敗 {}: {}", output_path.display(), e))?;

    tracing::info!("Excel檔案已成功產生: {}", output_path.display());
    Ok(output_path)
}

/// JSON（ファイルパスまたは文字列）をExcelに変換
pub fn process_json_to_excel(input: &str, output: Option<&Path>, config: &Config) -> Result<PathBuf> {
    tracing::info!("開始處理JSON資料");

    let applications = load_applications(input, config)?;
    tracing::info!("解析到 {} 筆申請資料", applications.len());

    export_applications(&applications, output, config)
}
