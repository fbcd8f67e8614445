use clap::Parser;
use comprobantes::{cli, config, dispatcher, error, logging, notify, progress, prompt, report, session, shell};
use comprobantes::api::{FileApi, HttpClient};
use cli::{Cli, Commands};
use comprobantes_common::ValidationError;
use config::Config;
use error::Result;
use notify::Notification;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config::load()?;
    let endpoints = config.endpoints_for(cli.api_url.as_deref());
    let download_dir = cli.output_dir.clone().unwrap_or_else(|| config.download_dir());

    match cli.command {
        Commands::Search { term } => {
            let settings = config.search_settings();
            if !settings.is_searchable(&term) {
                let err = ValidationError::QueryTooShort { min: settings.min_length };
                println!("⚠ {}", err);
                return Ok(());
            }

            let client = HttpClient::new(endpoints.clone(), config.timeout())?;
            let spinner = progress::spinner(&format!("Buscando «{}»...", term));
            let result = client.search(&term).await;
            spinner.finish_and_clear();

            match result {
                Ok(items) if items.is_empty() => println!("No se encontraron resultados"),
                Ok(items) => {
                    for (i, item) in items.iter().enumerate() {
                        println!("  {:>3}. {}  {}", i + 1, item.folio, item.resource_path);
                    }
                    println!("\n✔ {} resultados", items.len());
                }
                Err(e) => {
                    tracing::warn!("search failed: {}", e);
                    println!("{}", Notification::search_failed());
                }
            }
        }

        Commands::Browse => {
            let client = Arc::new(HttpClient::new(endpoints.clone(), config.timeout())?);
            let mut session = session::SearchSession::new(Arc::clone(&client), config.search_settings());
            let dispatcher = dispatcher::Dispatcher::new(client, endpoints.clone(), download_dir);
            shell::run(&mut session, &dispatcher).await?;
        }

        Commands::Preview { resource_path, save } => {
            let client = Arc::new(HttpClient::new(endpoints.clone(), config.timeout())?);
            let dispatcher = dispatcher::Dispatcher::new(client, endpoints.clone(), download_dir);
            let item = comprobantes_common::Comprobante::new(0, "", resource_path);

            println!("PDF FACTURA: {}", dispatcher.preview_url(&item));
            let spinner = progress::spinner("Cargando documento...");
            let document = dispatcher.load_preview(&item).await;
            spinner.finish_and_clear();

            if let Some(label) = document.state.page_label() {
                println!("✔ {}", label);
            }
            if let Some(message) = document.state.error_message() {
                println!("⚠ {}", message);
            }
            if save || document.state.error_message().is_some() {
                match dispatcher.download_instead(&document).await {
                    Ok(path) => println!("✔ Descargado: {}", path.display()),
                    Err(e) => {
                        tracing::warn!("download failed: {}", e);
                        println!("{}", Notification::download_failed());
                    }
                }
            }
        }

        Commands::Report { start, end, folio, no_prompt, inspect } => {
            let mut form = match prompt::form_from_args(start.as_deref(), end.as_deref(), folio.as_deref()) {
                Ok(form) => form,
                Err(e) => {
                    println!("{}", Notification::for_error(&e, Notification::report_failed));
                    return Ok(());
                }
            };
            if !no_prompt {
                if let Err(e) = prompt::fill_missing(&mut form, folio.is_none()) {
                    println!("{}", Notification::for_error(&e, Notification::report_failed));
                    return Ok(());
                }
            }

            let client = Arc::new(HttpClient::new(endpoints.clone(), config.timeout())?);
            let exporter = report::ReportExporter::new(client, download_dir);

            let spinner = progress::spinner("Descargando...");
            let result = exporter.export(&mut form, inspect).await;
            spinner.finish_and_clear();

            match result {
                Ok(saved) => {
                    println!("{}", Notification::report_downloaded());
                    println!("  {} ({} bytes)", saved.path.display(), saved.size);
                    for sheet in saved.sheets.iter().flatten() {
                        println!("  hoja «{}»: {} filas", sheet.name, sheet.rows);
                    }
                }
                Err(e) if e.is_validation() => {
                    println!("{}", Notification::for_error(&e, Notification::missing_dates));
                }
                Err(e) => {
                    tracing::warn!("report download failed: {}", e);
                    println!("{}", Notification::report_failed());
                }
            }
        }

        Commands::Config { set_api_url, set_report_url, set_download_dir, show } => {
            // --api-url は一時的な上書きなので保存しない
            let mut config = config;
            let mut changed = false;

            if let Some(url) = set_api_url {
                config.api_base_url = url;
                changed = true;
            }
            if let Some(url) = set_report_url {
                config.report_base_url = url;
                changed = true;
            }
            if let Some(dir) = set_download_dir {
                config.download_dir = Some(dir);
                changed = true;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  API: {}", config.api_base_url());
                println!("  レポートAPI: {}", config.report_base_url());
                println!("  最小文字数: {}", config.min_search_length);
                println!("  デバウンス: {}ms", config.debounce_ms);
                match config.timeout_seconds {
                    Some(secs) => println!("  タイムアウト: {}秒", secs),
                    None => println!("  タイムアウト: 既定"),
                }
                println!("  保存先: {}", config.download_dir().display());
            }
        }
    }

    Ok(())
}
