//! レポートフォームの対話入力（カレンダー/ドロップダウンの代わり）

use crate::error::{AppError, Result};
use comprobantes_common::report::{format_date, normalize_folio, parse_date, utc_date};
use comprobantes_common::{ReportForm, FOLIOS};
use dialoguer::{Input, Select};

const ALL_FOLIOS_LABEL: &str = "(todos)";

/// コマンドライン引数からフォームを組み立てる
pub fn form_from_args(
    start: Option<&str>,
    end: Option<&str>,
    folio: Option<&str>,
) -> Result<ReportForm> {
    Ok(ReportForm {
        start: start.map(parse_date).transpose()?,
        end: end.map(parse_date).transpose()?,
        folio: match folio {
            Some(f) => normalize_folio(f)?,
            None => None,
        },
    })
}

/// 未入力の日付と folio を尋ねる
pub fn fill_missing(form: &mut ReportForm, ask_folio: bool) -> Result<()> {
    if form.start.is_none() {
        form.start = Some(parse_date(&ask_text("Fecha Inicio (AAAA-MM-DD)")?)?);
    }
    if form.end.is_none() {
        // 既定は今日（UTCの日付）
        let today = format_date(utc_date(&chrono::Local::now()));
        form.end = Some(parse_date(&ask_text_with_default("Fecha Fin (AAAA-MM-DD)", today)?)?);
    }
    if ask_folio && form.folio.is_none() {
        form.folio = ask_folio_choice()?;
    }
    Ok(())
}

fn ask_text(prompt: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .interact_text()
        .map_err(|e| AppError::Prompt(e.to_string()))
}

fn ask_text_with_default(prompt: &str, default: String) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .default(default)
        .interact_text()
        .map_err(|e| AppError::Prompt(e.to_string()))
}

fn ask_folio_choice() -> Result<Option<String>> {
    let mut items = vec![ALL_FOLIOS_LABEL];
    items.extend(FOLIOS.iter().copied());

    let index = Select::new()
        .with_prompt("Selecciona un folio")
        .items(&items)
        .default(0)
        .interact()
        .map_err(|e| AppError::Prompt(e.to_string()))?;

    Ok(match index {
        0 => None,
        i => Some(FOLIOS[i - 1].to_string()),
    })
}
