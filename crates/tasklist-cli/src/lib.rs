pub mod cli;
pub mod file_store;
pub mod output;
pub mod paths;

use std::ffi::OsString;
use std::io::{self, IsTerminal, Write};

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tasklist_core::{Filter, TaskListController};
use tracing::{debug, info, warn};

use crate::cli::{Command, GlobalCli, join_words};
use crate::file_store::JsonFileStore;
use crate::output::Printer;

#[tracing::instrument(skip_all)]
pub fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let cli = GlobalCli::parse_from(raw_args);

    cli::init_tracing(cli.verbose, cli.quiet)?;

    info!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        "starting tasklist CLI"
    );

    let now_millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
    let printer = Printer::new(io::stdout().is_terminal());
    let mut out = io::stdout().lock();

    execute(cli, now_millis, &printer, &mut out)?;

    info!("done");
    Ok(())
}

/// Runs one command against the on-disk store and prints the resulting
/// list. `theme` prints only the theme.
#[tracing::instrument(skip(cli, printer, out))]
pub fn execute(
    cli: GlobalCli,
    now_millis: u64,
    printer: &Printer,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let cfg = paths::load_config(cli.config.as_deref())?;
    let data_dir = paths::resolve_data_dir(cli.data.as_deref())
        .context("failed to resolve data directory")?;
    let store = JsonFileStore::open(&data_dir)
        .with_context(|| format!("failed to open store at {}", data_dir.display()))?;
    let mut app = TaskListController::open(store, &cfg);

    let command = cli.command.unwrap_or(Command::List {
        filter: cli::FilterArg::All,
    });
    debug!(?command, "dispatching");

    match command {
        Command::Add { text } => {
            let text = join_words(&text);
            match app.add(Some(text.as_str()), now_millis)? {
                Some(id) => writeln!(out, "Added task {id}.")?,
                None => warn!("nothing to add: task text is blank"),
            }
        }
        Command::Toggle { id } => {
            if !app.toggle(id)? {
                warn!(id, "no task with this id");
            }
        }
        Command::Edit { id, text } => {
            let text = join_words(&text);
            if !app.edit(id, Some(text.as_str()))? {
                warn!(id, "task not edited: unknown id or blank text");
            }
        }
        Command::Delete { id } => {
            if !app.delete(id)? {
                warn!(id, "no task with this id");
            }
        }
        Command::ClearCompleted => {
            let removed = app.clear_completed()?;
            writeln!(out, "Removed {removed} completed task(s).")?;
        }
        Command::List { filter } => {
            app.set_filter(Filter::from(filter));
        }
        Command::Theme { theme } => {
            if let Some(theme) = theme {
                app.set_theme(theme.into())?;
            }
            writeln!(out, "{}", app.theme())?;
            return Ok(());
        }
    }

    printer.print_view(out, app.view())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tasklist_core::{KeyValueStore, Theme};
    use tempfile::tempdir;

    use super::*;

    fn run_in(dir: &Path, args: &[&str], now_millis: u64) -> String {
        let config = dir.join("tasklist.toml");
        if !config.exists() {
            fs::write(&config, "").expect("write config");
        }
        let data = dir.join("data");
        let mut argv = vec![
            "tasklist".to_string(),
            "--data".to_string(),
            data.display().to_string(),
            "--config".to_string(),
            config.display().to_string(),
        ];
        argv.extend(args.iter().map(|a| (*a).to_string()));

        let cli = GlobalCli::try_parse_from(argv).expect("parse");
        let mut buf = Vec::new();
        execute(cli, now_millis, &Printer::new(false), &mut buf).expect("execute");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn add_toggle_and_filter_across_invocations() {
        let temp = tempdir().expect("tempdir");

        let out = run_in(temp.path(), &["add", "Buy", "milk"], 100);
        assert_eq!(out, "Added task 100.\n[ ] 100  Buy milk\n1 item left (filter: all)\n");

        run_in(temp.path(), &["toggle", "100"], 200);

        let active = run_in(temp.path(), &["list", "--filter", "active"], 300);
        assert_eq!(active, "No tasks pending.\n0 items left (filter: active)\n");

        let completed = run_in(temp.path(), &["list", "--filter", "completed"], 300);
        assert_eq!(completed, "[x] 100  Buy milk\n0 items left (filter: completed)\n");
    }

    #[test]
    fn store_file_holds_the_tasks_json() {
        let temp = tempdir().expect("tempdir");
        run_in(temp.path(), &["add", "one"], 5);
        run_in(temp.path(), &["edit", "5", "  uno "], 6);

        let store = JsonFileStore::open(&temp.path().join("data")).expect("open");
        assert_eq!(
            store.get_item("tasks").expect("get").as_deref(),
            Some(r#"[{"id":5,"text":"uno","done":false}]"#)
        );
    }

    #[test]
    fn unknown_id_is_not_an_error() {
        let temp = tempdir().expect("tempdir");
        let out = run_in(temp.path(), &["delete", "999"], 1);
        assert_eq!(out, "No tasks pending.\n0 items left (filter: all)\n");
    }

    #[test]
    fn clear_completed_reports_count() {
        let temp = tempdir().expect("tempdir");
        run_in(temp.path(), &["add", "a"], 1);
        run_in(temp.path(), &["add", "b"], 2);
        run_in(temp.path(), &["toggle", "1"], 3);

        let out = run_in(temp.path(), &["clear-completed"], 4);
        assert_eq!(
            out,
            "Removed 1 completed task(s).\n[ ] 2  b\n1 item left (filter: all)\n"
        );
    }

    #[test]
    fn theme_defaults_dark_and_persists_light() {
        let temp = tempdir().expect("tempdir");
        assert_eq!(run_in(temp.path(), &["theme"], 1), "dark\n");
        assert_eq!(run_in(temp.path(), &["theme", "light"], 2), "light\n");
        assert_eq!(run_in(temp.path(), &["theme"], 3), "light\n");

        let store = JsonFileStore::open(&temp.path().join("data")).expect("open");
        assert_eq!(
            store.get_item("theme").expect("get").as_deref(),
            Some(Theme::Light.storage_value())
        );
    }
}
