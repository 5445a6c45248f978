use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use todoz::model::FilterType;

#[derive(Parser, Debug)]
#[command(
    name = "todoz",
    bin_name = "todoz",
    version,
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "Today and backlog todo list for the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding todos.json, state.json and config.json
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Core,
    Todo,
    Data,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Core => "Core Commands:",
            CommandGroup::Todo => "Per-Todo Commands:",
            CommandGroup::Data => "Data Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "list" | "add" => Some(CommandGroup::Core),
            "view" | "edit" | "done" | "undone" | "today" | "backlog" | "delete" => {
                Some(CommandGroup::Todo)
            }
            "clear-done" | "purge" | "export" | "import" => Some(CommandGroup::Data),
            "config" | "help" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::Core,
            CommandGroup::Todo,
            CommandGroup::Data,
            CommandGroup::Misc,
        ]
    }
}

/// Returns the custom grouped help output as a string
pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("todoz {version}\n"));
    output.push_str("Today and backlog todo list for the command line\n");
    output.push('\n');
    output.push_str("Usage: todoz [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("      --data-dir <DIR>  Directory holding the todo data\n");
    output.push_str("  -v, --verbose         Verbose output\n");
    output.push_str("  -h, --help            Print help\n");
    output.push_str("  -V, --version         Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints help for a command by name, falling back to the grouped help.
pub fn print_help_for_command(name: &str) {
    let mut cmd = Cli::command();

    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name {
            let help = subcmd.render_help();
            print!("{}", help);
            return;
        }
    }

    eprintln!("Unknown command: {}", name);
    eprintln!();
    print_grouped_help();
}

/// Prints help for the subcommand that was parsed along with `--help`.
pub fn print_subcommand_help(command: &Option<Commands>) {
    let name = match command {
        Some(Commands::Core(c)) => match c {
            CoreCommands::List { .. } => "list",
            CoreCommands::Add { .. } => "add",
        },
        Some(Commands::Todo(c)) => match c {
            TodoCommands::View { .. } => "view",
            TodoCommands::Edit { .. } => "edit",
            TodoCommands::Done { .. } => "done",
            TodoCommands::Undone { .. } => "undone",
            TodoCommands::Today { .. } => "today",
            TodoCommands::Backlog { .. } => "backlog",
            TodoCommands::Delete { .. } => "delete",
        },
        Some(Commands::Data(c)) => match c {
            DataCommands::ClearDone => "clear-done",
            DataCommands::Purge { .. } => "purge",
            DataCommands::Export { .. } => "export",
            DataCommands::Import { .. } => "import",
        },
        Some(Commands::Misc(c)) => match c {
            MiscCommands::Config { .. } => "config",
            MiscCommands::Help { .. } => "help",
        },
        None => {
            print_grouped_help();
            return;
        }
    };

    print_help_for_command(name);
}

fn parse_filter(s: &str) -> Result<FilterType, String> {
    s.parse()
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Core(CoreCommands),

    #[command(flatten)]
    Todo(TodoCommands),

    #[command(flatten)]
    Data(DataCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum CoreCommands {
    /// List todos in a view (remembers the view)
    #[command(alias = "ls", display_order = 1)]
    List {
        /// today, backlog, all, done or deleted
        #[arg(value_parser = parse_filter)]
        filter: Option<FilterType>,
    },

    /// Add a todo
    #[command(alias = "a", display_order = 2)]
    Add {
        /// Add to today
        #[arg(long, conflicts_with = "backlog")]
        today: bool,

        /// Add to the backlog
        #[arg(long)]
        backlog: bool,

        /// Title words (joined with spaces)
        #[arg(required = true, trailing_var_arg = true)]
        title: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TodoCommands {
    /// Show todos in full, including the description
    #[command(alias = "v", display_order = 10)]
    View {
        /// Positions in the current view, or ids (e.g. 1 3 a1b2c3d4)
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Change the title or description of a todo
    #[command(alias = "e", display_order = 11)]
    Edit {
        /// Position in the current view, or id
        selector: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Mark todos as done
    #[command(display_order = 12)]
    Done {
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Mark todos as not done
    #[command(display_order = 13)]
    Undone {
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Move todos to today (also restores deleted ones)
    #[command(display_order = 14)]
    Today {
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Move todos to the backlog (also restores deleted ones)
    #[command(display_order = 15)]
    Backlog {
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Delete todos (they can still be restored)
    #[command(alias = "rm", display_order = 16)]
    Delete {
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Delete every done todo
    #[command(display_order = 20)]
    ClearDone,

    /// Permanently remove deleted todos
    #[command(display_order = 21)]
    Purge {
        /// Todos to remove - if omitted, removes every deleted todo
        #[arg(required = false, num_args = 0..)]
        selectors: Vec<String>,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Write a backup of the stored todos
    #[command(display_order = 22)]
    Export {
        /// Target directory (defaults to the configured export_dir, then the current directory)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Restore todos from a backup file
    #[command(display_order = 23)]
    Import {
        file: PathBuf,

        /// Keep existing todos and only add new ones
        #[arg(long)]
        merge: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Show or set configuration
    #[command(display_order = 30)]
    Config {
        /// storage_key, default_filter or export_dir
        key: Option<String>,

        value: Option<String>,
    },

    /// Print help for a command
    #[command(display_order = 31)]
    Help { command: Option<String> },
}
