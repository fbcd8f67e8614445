//! Comprobantes Common Library
//!
//! CLIと他のフロントエンドで共有される型と状態機械（IOなし）

pub mod types;
pub mod error;
pub mod selection;
pub mod query;
pub mod preview;
pub mod endpoints;
pub mod report;

pub use types::{Comprobante, ItemKey};
pub use error::{Error, Result, ValidationError};
pub use selection::SelectionSet;
pub use query::{
    InputOutcome, QueryState, Resolution, SearchSettings, SearchTicket, TimerToken,
    DEBOUNCE_DELAY, MIN_SEARCH_LENGTH,
};
pub use preview::{fallback_file_name, PreviewState, LOAD_ERROR_MESSAGE};
pub use endpoints::{join_filenames, Endpoints, DOWNLOAD_ARCHIVE_NAME};
pub use report::{ReportForm, ReportRequest, FOLIOS};
