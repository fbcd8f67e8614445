//! 対話モード（browse）
//!
//! 1行 = 入力欄の値。`:` で始まる行はコマンド。
//! 標準入力とセッションのイベントを同じループで待つので、
//! 入力中でも検索結果は届いた時点で表示される。

use crate::api::FileApi;
use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::notify::Notification;
use crate::progress;
use crate::session::{SearchSession, SessionEvent};
use comprobantes_common::{Comprobante, InputOutcome, SelectionSet};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// 入力欄の値を変える
    Input(String),
    /// 結果の n 番目（1始まり）を選択/解除
    Toggle(usize),
    /// 選択の n 番目（1始まり）を外す
    Remove(usize),
    ClearSelection,
    ShowSelection,
    /// 選択の n 番目をプレビュー
    Preview(usize),
    Download,
    Help,
    Quit,
    Unknown(String),
}

impl ShellCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(command) = line.strip_prefix(':') else {
            return Self::Input(line.to_string());
        };

        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let index = parts.next().and_then(|n| n.parse::<usize>().ok()).filter(|n| *n > 0);

        match (name, index) {
            ("sel", Some(n)) => Self::Toggle(n),
            ("quitar", Some(n)) => Self::Remove(n),
            ("ver", Some(n)) => Self::Preview(n),
            ("limpiar", _) => Self::ClearSelection,
            ("seleccion", _) => Self::ShowSelection,
            ("descargar", _) => Self::Download,
            ("ayuda", _) => Self::Help,
            ("salir", _) => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

const HELP: &str = "\
Escriba para buscar un folio. Comandos:
  :sel N        seleccionar / quitar el resultado N
  :quitar N     quitar el archivo N de la selección
  :limpiar      limpiar selección
  :seleccion    mostrar archivos seleccionados
  :ver N        previsualizar el archivo seleccionado N
  :descargar    descargar la selección como ZIP
  :salir";

pub async fn run<A: FileApi>(session: &mut SearchSession<A>, dispatcher: &Dispatcher<A>) -> Result<()> {
    println!("🔎 Gestor de Archivos");
    println!("{}\n", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match ShellCommand::parse(&line) {
                    ShellCommand::Quit => break,
                    command => handle(command, session, dispatcher).await,
                }
            }
            Some(event) = session.next_event(), if !session.is_idle() => {
                render_event(&event, session);
            }
        }
    }

    Ok(())
}

async fn handle<A: FileApi>(
    command: ShellCommand,
    session: &mut SearchSession<A>,
    dispatcher: &Dispatcher<A>,
) {
    match command {
        ShellCommand::Input(term) => {
            if session.input(&term) == InputOutcome::Cleared && !term.trim().is_empty() {
                println!("Ingrese al menos {} caracteres", session.settings().min_length);
            }
        }
        ShellCommand::Toggle(n) => match session.toggle_result(n - 1) {
            Some(true) => println!("[x] agregado ({} seleccionados)", session.selection().len()),
            Some(false) => println!("[ ] quitado ({} seleccionados)", session.selection().len()),
            None => println!("No existe el resultado {}", n),
        },
        ShellCommand::Remove(n) => {
            let item = session.selection().get(n - 1).cloned();
            match item {
                Some(item) => {
                    session.selection_mut().remove(&item);
                    print_selection(session.selection());
                }
                None => println!("No existe el archivo seleccionado {}", n),
            }
        }
        ShellCommand::ClearSelection => {
            session.selection_mut().clear();
            println!("Selección vacía");
        }
        ShellCommand::ShowSelection => print_selection(session.selection()),
        ShellCommand::Preview(n) => match session.selection().get(n - 1) {
            Some(item) => show_preview(dispatcher, item).await,
            None => println!("No existe el archivo seleccionado {}", n),
        },
        ShellCommand::Download => download(dispatcher, session.selection()).await,
        ShellCommand::Help => println!("{}", HELP),
        ShellCommand::Unknown(line) => println!("Comando desconocido: {} (:ayuda)", line),
        ShellCommand::Quit => {}
    }
}

fn render_event<A: FileApi>(event: &SessionEvent, session: &SearchSession<A>) {
    match event {
        SessionEvent::SearchIssued(ticket) => println!("⏳ Buscando «{}»...", ticket.term),
        SessionEvent::ResultsReplaced { .. } => print_results(session),
        SessionEvent::SearchFailed(notification) => println!("{}", notification),
        SessionEvent::StaleDiscarded(_) => {}
    }
}

fn print_results<A: FileApi>(session: &SearchSession<A>) {
    match session.results() {
        Some(results) if !results.is_empty() => {
            for (i, item) in results.iter().enumerate() {
                let mark = if session.selection().contains(item) { "x" } else { " " };
                println!("  {:>3}. [{}] {}  {}", i + 1, mark, item.folio, item.resource_path);
            }
        }
        Some(_) => println!("No se encontraron resultados"),
        None => {}
    }
}

fn print_selection(selection: &SelectionSet) {
    println!("Archivos seleccionados para ZIP ({})", selection.len());
    for (i, item) in selection.values().iter().enumerate() {
        println!("  {:>3}. {}  {}", i + 1, item.folio, item.resource_path);
    }
}

async fn show_preview<A: FileApi>(dispatcher: &Dispatcher<A>, item: &Comprobante) {
    let url = dispatcher.preview_url(item);
    println!("PDF FACTURA: {}", url);

    let spinner = progress::spinner("Cargando documento...");
    let document = dispatcher.load_preview(item).await;
    spinner.finish_and_clear();

    if let Some(label) = document.state.page_label() {
        println!("  {}", label);
        return;
    }
    if let Some(message) = document.state.error_message() {
        println!("⚠ {}", message);
        match dispatcher.download_instead(&document).await {
            Ok(path) => println!("✔ Descargado: {}", path.display()),
            Err(e) => {
                tracing::warn!("fallback download failed: {}", e);
                println!("{}", Notification::download_failed());
            }
        }
    }
}

async fn download<A: FileApi>(dispatcher: &Dispatcher<A>, selection: &SelectionSet) {
    let items = selection.values();
    let spinner = progress::spinner("Descargando ZIP...");
    let result = dispatcher.download_selection(&items).await;
    spinner.finish_and_clear();

    match result {
        Ok(saved) => {
            println!("✔ ZIP guardado: {} ({} bytes)", saved.path.display(), saved.size);
            for entry in &saved.entries {
                println!("    {}", entry);
            }
        }
        Err(e) => println!("{}", Notification::for_error(&e, Notification::download_failed)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_is_input() {
        assert_eq!(ShellCommand::parse("ABC"), ShellCommand::Input("ABC".into()));
        assert_eq!(ShellCommand::parse(" AB \r\n"), ShellCommand::Input(" AB ".into()));
        assert_eq!(ShellCommand::parse(""), ShellCommand::Input(String::new()));
    }

    #[test]
    fn test_indexed_commands() {
        assert_eq!(ShellCommand::parse(":sel 2"), ShellCommand::Toggle(2));
        assert_eq!(ShellCommand::parse(":quitar 1"), ShellCommand::Remove(1));
        assert_eq!(ShellCommand::parse(":ver 3"), ShellCommand::Preview(3));
    }

    #[test]
    fn test_index_must_be_positive() {
        assert!(matches!(ShellCommand::parse(":sel 0"), ShellCommand::Unknown(_)));
        assert!(matches!(ShellCommand::parse(":sel x"), ShellCommand::Unknown(_)));
        assert!(matches!(ShellCommand::parse(":sel"), ShellCommand::Unknown(_)));
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(ShellCommand::parse(":limpiar"), ShellCommand::ClearSelection);
        assert_eq!(ShellCommand::parse(":seleccion"), ShellCommand::ShowSelection);
        assert_eq!(ShellCommand::parse(":descargar"), ShellCommand::Download);
        assert_eq!(ShellCommand::parse(":ayuda"), ShellCommand::Help);
        assert_eq!(ShellCommand::parse(":salir"), ShellCommand::Quit);
        assert!(matches!(ShellCommand::parse(":otro"), ShellCommand::Unknown(_)));
    }
}
