use clap::Parser;
use colored::*;
use logcabinet::api::{CabinetInfo, CmdMessage, ConfigAction, MessageLevel, SheetListing};
use logcabinet::config::{CabinetConfig, CONFIG_KEYS};
use logcabinet::error::{CabinetError, Result};
use logcabinet::init::{initialize, CabinetContext};
use logcabinet::sheet::SheetContents;
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod args;
use args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays usable in pipelines. `RUST_LOG` wins
/// over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "logcabinet=warn,lcab=warn",
        1 => "logcabinet=info,lcab=info",
        _ => "logcabinet=debug,lcab=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let ctx = initialize(&cwd, cli.root)?;

    match cli.command {
        Commands::Create { name, description } => handle_create(&ctx, &name, &description),
        Commands::Info { name } => handle_info(&ctx, &name),
        Commands::List { name } => handle_list(&ctx, &name),
        Commands::Sheet {
            cabinet,
            sheet,
            description,
            sync,
            entries,
        } => handle_sheet(&ctx, &cabinet, &sheet, &description, sync, entries),
        Commands::Show { cabinet, sheet } => handle_show(&ctx, &cabinet, &sheet),
        Commands::Remove { name } => handle_remove(&ctx, &name),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
    }
}

fn handle_create(ctx: &CabinetContext, name: &str, description: &str) -> Result<()> {
    let result = ctx.api.create_cabinet(name, description)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_info(ctx: &CabinetContext, name: &str) -> Result<()> {
    let result = ctx.api.cabinet_info(name)?;
    if let Some(info) = &result.cabinet {
        print_cabinet(info);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &CabinetContext, name: &str) -> Result<()> {
    let result = ctx.api.list_sheets(name)?;
    print_sheets(&result.sheets);
    print_messages(&result.messages);
    Ok(())
}

fn handle_sheet(
    ctx: &CabinetContext,
    cabinet: &str,
    sheet: &str,
    description: &str,
    sync: bool,
    entries: Vec<String>,
) -> Result<()> {
    let entries = if entries.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<String>>>()
            .map_err(CabinetError::Io)?
    } else {
        entries
    };

    let auto_sync = sync || ctx.config.auto_sync;
    let result = ctx
        .api
        .write_sheet(cabinet, sheet, description, &entries, auto_sync)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &CabinetContext, cabinet: &str, sheet: &str) -> Result<()> {
    let result = ctx.api.show_sheet(cabinet, sheet)?;
    if let Some(contents) = &result.contents {
        print_contents(contents);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_remove(ctx: &CabinetContext, name: &str) -> Result<()> {
    let result = ctx.api.remove_cabinet(name)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &CabinetContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config)?;
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

fn print_cabinet(info: &CabinetInfo) {
    println!("{}  {}", "name:".dimmed(), info.name.bold());
    println!("{}  {}", "description:".dimmed(), info.description);
    println!("{}  {}", "sheets:".dimmed(), info.count);
    println!("{}  {}", "directory:".dimmed(), info.directory.display());
}

const NAME_WIDTH: usize = 32;

fn print_sheets(sheets: &[SheetListing]) {
    for sheet in sheets {
        let modified = sheet
            .modified
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
        println!("{:<width$} {}", sheet.name, modified.dimmed(), width = NAME_WIDTH);
    }
}

fn print_contents(contents: &SheetContents) {
    println!("{}", contents.description.bold());
    for entry in &contents.entries {
        let mut lines = entry.text.split('\n');
        let first = lines.next().unwrap_or_default();
        println!("{} {}", format!("{:>6}", entry.number).yellow(), first);
        for rest in lines {
            println!("{:>6} {}", "", rest);
        }
    }
}

fn print_config(config: &CabinetConfig) -> Result<()> {
    for key in CONFIG_KEYS {
        println!("{} = {}", key, config.get(key)?);
    }
    Ok(())
}
