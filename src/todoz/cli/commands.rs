use super::render::{print_config, print_full_todos, print_messages, print_todo_list};
use super::setup::{
    print_grouped_help, print_help_for_command, print_subcommand_help, Cli, Commands,
    CoreCommands, DataCommands, MiscCommands, TodoCommands,
};
use clap::Parser;
use directories::ProjectDirs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use todoz::api::{ConfigAction, ImportMode, TodozApi};
use todoz::config::TodozConfig;
use todoz::error::{Result, TodozError};
use todoz::model::FilterType;
use todoz::store::fs::FileBackend;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Overrides the data directory, like `--data-dir`.
pub const HOME_ENV: &str = "TODOZ_HOME";

struct AppContext {
    api: TodozApi<FileBackend>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.help {
        if cli.command.is_none() {
            print_grouped_help();
        } else {
            print_subcommand_help(&cli.command);
        }
        return Ok(());
    }

    init_logging(cli.verbose);

    if let Some(Commands::Misc(MiscCommands::Help { command })) = &cli.command {
        handle_help(command.as_deref());
        return Ok(());
    }

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Core(cmd)) => match cmd {
            CoreCommands::List { filter } => handle_list(&mut ctx, filter),
            CoreCommands::Add {
                today,
                backlog,
                title,
            } => handle_add(&mut ctx, today, backlog, title),
        },
        Some(Commands::Todo(cmd)) => match cmd {
            TodoCommands::View { selectors } => handle_view(&mut ctx, selectors),
            TodoCommands::Edit {
                selector,
                title,
                description,
            } => handle_edit(&mut ctx, selector, title, description),
            TodoCommands::Done { selectors } => {
                let result = ctx.api.mark_done(&selectors)?;
                print_messages(&result.messages);
                Ok(())
            }
            TodoCommands::Undone { selectors } => {
                let result = ctx.api.unmark_done(&selectors)?;
                print_messages(&result.messages);
                Ok(())
            }
            TodoCommands::Today { selectors } => {
                let result = ctx.api.move_to_today(&selectors)?;
                print_messages(&result.messages);
                Ok(())
            }
            TodoCommands::Backlog { selectors } => {
                let result = ctx.api.move_to_backlog(&selectors)?;
                print_messages(&result.messages);
                Ok(())
            }
            TodoCommands::Delete { selectors } => {
                let result = ctx.api.delete_todos(&selectors)?;
                print_messages(&result.messages);
                Ok(())
            }
        },
        Some(Commands::Data(cmd)) => match cmd {
            DataCommands::ClearDone => {
                let result = ctx.api.clear_done();
                print_messages(&result.messages);
                Ok(())
            }
            DataCommands::Purge { selectors, yes } => handle_purge(&mut ctx, selectors, yes),
            DataCommands::Export { dir } => handle_export(&ctx, dir),
            DataCommands::Import { file, merge } => handle_import(&mut ctx, &file, merge),
        },
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Config { key, value } => handle_config(&ctx, key, value),
            MiscCommands::Help { command } => {
                handle_help(command.as_deref());
                Ok(())
            }
        },
        None => handle_list(&mut ctx, None),
    }
}

/// Logs go to stderr. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "todoz", "todoz")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| TodozError::Config("Could not determine a data directory".to_string()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let dir = data_dir(cli)?;
    let config = TodozConfig::load(&dir)?;
    debug!(data_dir = %dir.display(), storage_key = %config.storage_key, "opening store");

    let api = TodozApi::new(FileBackend::new(&dir), config, dir);
    Ok(AppContext { api })
}

fn handle_list(ctx: &mut AppContext, filter: Option<FilterType>) -> Result<()> {
    if let Some(filter) = filter {
        ctx.api.set_filter(filter)?;
    }
    let filter = ctx.api.filter();
    let result = ctx.api.list(filter);
    print_todo_list(filter, &result.listed_todos);
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &mut AppContext, today: bool, backlog: bool, title: Vec<String>) -> Result<()> {
    let for_today = match (today, backlog) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };
    let result = ctx.api.add_todo(&title.join(" "), for_today)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &mut AppContext, selectors: Vec<String>) -> Result<()> {
    let result = ctx.api.view_todos(&selectors)?;
    print_full_todos(&result.listed_todos);
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    selector: String,
    title: Option<String>,
    description: Option<String>,
) -> Result<()> {
    if title.is_none() && description.is_none() {
        return Err(TodozError::Api(
            "Nothing to change: pass --title and/or --description".into(),
        ));
    }
    let result = ctx
        .api
        .edit_todo(&selector, title.as_deref(), description.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_purge(ctx: &mut AppContext, selectors: Vec<String>, yes: bool) -> Result<()> {
    if !yes {
        let what = if selectors.is_empty() {
            "every deleted todo".to_string()
        } else {
            format!("{} todo(s)", selectors.len())
        };
        if !confirm(&format!("Permanently remove {}?", what))? {
            println!("Aborted.");
            return Ok(());
        }
    }
    let result = ctx.api.purge_todos(&selectors)?;
    print_messages(&result.messages);
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush().map_err(TodozError::Io)?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(TodozError::Io)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn handle_export(ctx: &AppContext, dir: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.export(dir.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_import(ctx: &mut AppContext, file: &Path, merge: bool) -> Result<()> {
    let mode = if merge {
        ImportMode::Merge
    } else {
        ImportMode::Overwrite
    };
    let result = ctx.api.import(file, mode)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let show_all = key.is_none();
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if let (true, Some(config)) = (show_all, &result.config) {
        print_config(config);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_help(command: Option<&str>) {
    match command {
        Some(name) => print_help_for_command(name),
        None => print_grouped_help(),
    }
}
