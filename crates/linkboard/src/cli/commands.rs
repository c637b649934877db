//! # CLI Layer
//!
//! The only place in linkboard that:
//! - Knows about terminal I/O (stdout, stderr, prompts)
//! - Installs the tracing subscriber
//! - Decides the process outcome
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: clap, see `setup.rs`
//! 2. **Context Setup**: resolve directories and config, open the API
//! 3. **Dispatch**: route each command to its handler
//! 4. **Output Formatting**: `render.rs`
//! 5. **Sync Completion**: wait for background pushes before returning

use super::render::{render_messages, render_outline, render_section, render_sections};
use super::setup::{Cli, Commands, LinkCommands, SectionCommands, SyncCommands};
use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use console::Term;
use linkboardapp::api::LinkboardApi;
use linkboardapp::commands::sync::SyncAction;
use linkboardapp::commands::{CmdMessage, CmdResult};
use linkboardapp::config::{default_config_dir, LinkboardConfig};
use linkboardapp::reorder::{DragItem, PointerPosition};
use linkboardapp::store::fs_cache::FsCache;
use linkboardapp::store::gist::GistRemote;
use linkboardapp::store::layered::SyncOutcome;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "LINKBOARD_LOG";

struct AppContext {
    api: LinkboardApi<FsCache, GistRemote>,
    term: Term,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context(&cli)?;
    let outcome = dispatch(&mut ctx, cli.command);
    report_sync(&mut ctx);
    outcome
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("linkboard=debug,linkboardapp=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // Fails only if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => default_config_dir()?,
    };
    let config = LinkboardConfig::load(&config_dir)
        .with_context(|| format!("Could not load config from {}", config_dir.display()))?;
    let paths = config.resolve_paths(config_dir)?;
    debug!(
        data_dir = %paths.data_dir.display(),
        config_dir = %paths.config_dir.display(),
        "resolved paths"
    );

    let mut api = LinkboardApi::open(paths, &config)?;
    debug!(source = %api.load_source(), "collection loaded");
    api.subscribe(|collection| {
        debug!(
            sections = collection.len(),
            links = collection.sections().iter().map(|s| s.links.len()).sum::<usize>(),
            "collection changed"
        );
    });

    Ok(AppContext {
        api,
        term: Term::stdout(),
    })
}

fn dispatch(ctx: &mut AppContext, command: Option<Commands>) -> Result<()> {
    match command {
        None | Some(Commands::List) => handle_list(ctx),
        Some(Commands::Show { section }) => handle_show(ctx, &section),
        Some(Commands::Section { action }) => handle_section(ctx, action),
        Some(Commands::Link { action }) => handle_link(ctx, action),
        Some(Commands::Sync { action }) => handle_sync(ctx, action),
        Some(Commands::Export { pretty }) => handle_export(ctx, pretty),
    }
}

fn handle_list(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.list();
    print!("{}", render_sections(&result.listed_sections));
    Ok(())
}

fn handle_show(ctx: &mut AppContext, section: &str) -> Result<()> {
    // A number is a position, anything else an id.
    let result = match section.trim().parse::<usize>() {
        Ok(n) if n >= 1 => {
            let index = n - 1;
            match ctx.api.list().listed_sections.into_iter().nth(index) {
                Some(entry) => CmdResult::default().with_listed(vec![entry]),
                None => CmdResult::noop(format!("No section at position {}", n)),
            }
        }
        _ => ctx.api.find_section(section.trim_start_matches('#')),
    };
    print!("{}", render_messages(&result.messages));
    for entry in &result.listed_sections {
        print!("{}", render_section(entry));
    }
    Ok(())
}

fn handle_section(ctx: &mut AppContext, action: SectionCommands) -> Result<()> {
    match action {
        SectionCommands::Add { title } => {
            let result = ctx.api.add_section(title.join(" "))?;
            print!("{}", render_messages(&result.messages));
        }
        SectionCommands::Rename { section, title } => {
            let result = ctx.api.rename_section(section, title.join(" "))?;
            print!("{}", render_messages(&result.messages));
        }
        SectionCommands::Delete { section, yes } => {
            if let Some(existing) = ctx.api.collection().section(section) {
                let prompt = format!(
                    "Delete section \"{}\" and its {} link(s)?",
                    existing.title,
                    existing.links.len()
                );
                if !yes && !confirm(&ctx.term, &prompt)? {
                    print!("{}", render_messages(&[CmdMessage::info("Operation cancelled.")]));
                    return Ok(());
                }
            }
            let result = ctx.api.delete_section(section)?;
            print!("{}", render_messages(&result.messages));
        }
        SectionCommands::Move {
            source,
            target,
            below,
        } => {
            let result = drag_and_drop(
                ctx,
                DragItem::Section { index: source },
                DragItem::Section { index: target },
                below,
            )?;
            print!("{}", render_messages(&result.messages));
            if result.changed {
                print!("{}", render_outline(&ctx.api.list().listed_sections));
            }
        }
    }
    Ok(())
}

fn handle_link(ctx: &mut AppContext, action: LinkCommands) -> Result<()> {
    let result = match action {
        LinkCommands::Add { section, name, url } => ctx.api.add_link(section, name, url)?,
        LinkCommands::Edit {
            section,
            link,
            name,
            url,
        } => ctx.api.edit_link(section, link, name, url)?,
        LinkCommands::Delete { section, link, yes } => {
            let existing = ctx
                .api
                .collection()
                .section(section)
                .and_then(|s| s.links.get(link))
                .map(|l| l.name.clone());
            if let Some(name) = existing {
                if !yes && !confirm(&ctx.term, &format!("Delete link \"{}\"?", name))? {
                    print!("{}", render_messages(&[CmdMessage::info("Operation cancelled.")]));
                    return Ok(());
                }
            }
            ctx.api.delete_link(section, link)?
        }
        LinkCommands::Move {
            section,
            source,
            target,
            below,
        } => drag_and_drop(
            ctx,
            DragItem::Link {
                section,
                index: source,
            },
            DragItem::Link {
                section,
                index: target,
            },
            below,
        )?,
        LinkCommands::MoveTo {
            from_section,
            source,
            to_section,
            target,
            below,
        } => {
            let mut result = drag_and_drop(
                ctx,
                DragItem::Link {
                    section: from_section,
                    index: source,
                },
                DragItem::Link {
                    section: to_section,
                    index: target,
                },
                below,
            )?;
            if from_section != to_section {
                result = CmdResult::noop("Links can only be moved within their own section");
            }
            result
        }
    };

    print!("{}", render_messages(&result.messages));
    if result.changed {
        for entry in &result.affected_sections {
            print!("{}", render_section(entry));
        }
    }
    Ok(())
}

fn handle_sync(ctx: &mut AppContext, action: SyncCommands) -> Result<()> {
    let result = match action {
        SyncCommands::Set { gist_id, token } => {
            ctx.api.sync(SyncAction::Set { gist_id, token })?
        }
        SyncCommands::Clear => ctx.api.sync(SyncAction::Clear)?,
        SyncCommands::Show => ctx.api.sync(SyncAction::Show)?,
        SyncCommands::Pull => ctx.api.reload(),
    };
    print!("{}", render_messages(&result.messages));
    Ok(())
}

fn handle_export(ctx: &mut AppContext, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(ctx.api.collection())?
    } else {
        ctx.api.snapshot()?
    };
    println!("{}", out);
    Ok(())
}

/// Runs a move through the drag-and-drop engine, as a pointer UI would.
fn drag_and_drop(
    ctx: &mut AppContext,
    source: DragItem,
    target: DragItem,
    below: bool,
) -> Result<CmdResult> {
    let pointer = if below {
        PointerPosition::below()
    } else {
        PointerPosition::above()
    };
    ctx.api.begin_drag(source);
    let marker = ctx.api.drag_over(target, pointer);
    debug!(?source, ?target, ?marker, "dropping");
    let result = ctx.api.drop_on(target, pointer);
    ctx.api.end_drag();
    Ok(result?)
}

fn confirm(term: &Term, prompt: &str) -> Result<bool> {
    term.write_str(&format!("{} [y/N] ", prompt))?;
    let answer = term.read_line()?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn report_sync(ctx: &mut AppContext) {
    for outcome in ctx.api.wait_for_sync() {
        match outcome {
            SyncOutcome::Pushed { seq, file_name } => {
                debug!(seq, file = %file_name, "sync complete");
            }
            SyncOutcome::Failed { reason, .. } => {
                eprintln!("{}", format!("Sync failed: {}", reason).yellow());
            }
        }
    }
}
