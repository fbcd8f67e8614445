//! 旅費（viáticos）Excelレポートのフォーム
//!
//! 日付は YYYY-MM-DD（UTCの日付部分）でパスに埋め込む。
//! folio 未指定は空文字列で「全件」を意味する。

use crate::error::{Result, ValidationError};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// 選択可能な folio
pub const FOLIOS: [&str; 7] = ["SP", "DA", "IVJ", "IVAIS", "AS", "UG", "UT"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// 日付を YYYY-MM-DD に整形
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// YYYY-MM-DD をパース
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(text.to_string()).into())
}

/// タイムスタンプのUTC日付部分
pub fn utc_date<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> NaiveDate {
    timestamp.with_timezone(&Utc).date_naive()
}

/// folio を正規化（大文字化して候補と照合）
pub fn normalize_folio(folio: &str) -> Result<Option<String>> {
    let folio = folio.trim();
    if folio.is_empty() {
        return Ok(None);
    }
    let upper = folio.to_uppercase();
    if FOLIOS.contains(&upper.as_str()) {
        Ok(Some(upper))
    } else {
        Err(ValidationError::UnknownFolio(folio.to_string()).into())
    }
}

/// 画面上の入力状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportForm {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub folio: Option<String>,
}

impl ReportForm {
    /// 入力を検証してリクエストを作る
    pub fn request(&self) -> Result<ReportRequest> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(ValidationError::MissingDates.into());
        };
        ReportRequest::new(start, end, self.folio.as_deref())
    }

    /// ダウンロード成功後のリセット
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 検証済みのレポート要求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    start: NaiveDate,
    end: NaiveDate,
    folio: String,
}

impl ReportRequest {
    pub fn new(start: NaiveDate, end: NaiveDate, folio: Option<&str>) -> Result<Self> {
        if start > end {
            return Err(ValidationError::InvalidDateRange {
                start: format_date(start),
                end: format_date(end),
            }
            .into());
        }
        let folio = match folio {
            Some(f) => normalize_folio(f)?.unwrap_or_default(),
            None => String::new(),
        };
        Ok(Self { start, end, folio })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// 空文字列は全件
    pub fn folio(&self) -> &str {
        &self.folio
    }

    pub fn path(&self) -> String {
        format!(
            "viaticos/reporte-excel/{}/{}/{}",
            format_date(self.start),
            format_date(self.end),
            self.folio
        )
    }

    /// reporte_viaticos_<inicio>_a_<fin>_folio_<folio>.xlsx
    pub fn file_name(&self) -> String {
        format!(
            "reporte_viaticos_{}_a_{}_folio_{}.xlsx",
            format_date(self.start),
            format_date(self.end),
            self.folio
        )
    }
}
