use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parses a 1-based position from the command line into a 0-based index.
fn position(s: &str) -> Result<usize, String> {
    let n: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("`{}` is not a position", s))?;
    n.checked_sub(1)
        .ok_or_else(|| "positions start at 1".to_string())
}

#[derive(Parser, Debug)]
#[command(
    name = "linkboard",
    bin_name = "linkboard",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Your links in ordered sections, synced through a gist", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding linkboard.toml and sync.json
    #[arg(
        long,
        global = true,
        env = "LINKBOARD_CONFIG_DIR",
        value_name = "DIR",
        help_heading = "Options"
    )]
    pub config_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all sections and their links
    #[command(alias = "ls", display_order = 1)]
    List,

    /// Show one section
    #[command(display_order = 2)]
    Show {
        /// Section position or id
        section: String,
    },

    /// Add, rename, delete or move sections
    #[command(alias = "s", display_order = 3)]
    Section {
        #[command(subcommand)]
        action: SectionCommands,
    },

    /// Add, edit, delete or move links
    #[command(alias = "l", display_order = 4)]
    Link {
        #[command(subcommand)]
        action: LinkCommands,
    },

    /// Configure syncing through a GitHub gist
    #[command(display_order = 5)]
    Sync {
        #[command(subcommand)]
        action: SyncCommands,
    },

    /// Print the collection as JSON
    #[command(display_order = 6)]
    Export {
        /// Indent the output
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum SectionCommands {
    /// Append a new section
    #[command(alias = "n")]
    Add {
        /// Title words (joined with spaces)
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        title: Vec<String>,
    },

    /// Rename a section
    Rename {
        #[arg(value_parser = position)]
        section: usize,

        /// Title words (joined with spaces)
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        title: Vec<String>,
    },

    /// Delete a section and all its links
    #[command(alias = "rm")]
    Delete {
        #[arg(value_parser = position)]
        section: usize,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Drop a section onto another one
    #[command(alias = "mv")]
    Move {
        #[arg(value_parser = position)]
        source: usize,

        #[arg(value_parser = position)]
        target: usize,

        /// Drop below the target (only meaningful on the last section)
        #[arg(long)]
        below: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum LinkCommands {
    /// Append a link to a section
    #[command(alias = "n")]
    Add {
        #[arg(value_parser = position)]
        section: usize,
        name: String,
        url: String,
    },

    /// Replace a link's name and url
    Edit {
        #[arg(value_parser = position)]
        section: usize,

        #[arg(value_parser = position)]
        link: usize,
        name: String,
        url: String,
    },

    /// Delete a link
    #[command(alias = "rm")]
    Delete {
        #[arg(value_parser = position)]
        section: usize,

        #[arg(value_parser = position)]
        link: usize,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Drop a link onto another link of the same section
    #[command(alias = "mv")]
    Move {
        #[arg(value_parser = position)]
        section: usize,

        #[arg(value_parser = position)]
        source: usize,

        #[arg(value_parser = position)]
        target: usize,

        /// Drop below the target (only meaningful on the last link)
        #[arg(long)]
        below: bool,
    },

    /// Drop a link onto a link of another section (links stay in their section)
    MoveTo {
        #[arg(value_parser = position)]
        from_section: usize,

        #[arg(value_parser = position)]
        source: usize,

        #[arg(value_parser = position)]
        to_section: usize,

        #[arg(value_parser = position)]
        target: usize,

        /// Drop below the target
        #[arg(long)]
        below: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum SyncCommands {
    /// Sync with a gist using a personal access token
    Set { gist_id: String, token: String },

    /// Stop syncing
    Clear,

    /// Show the sync settings (token masked)
    Show,

    /// Reload and report where the data came from
    Pull,
}
