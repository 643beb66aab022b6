use chrono::{Local, NaiveDateTime};
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use snapvault::api::VaultApi;
use snapvault::config::VaultConfig;
use snapvault::controller::AutosaveController;
use snapvault::error::{Result, VaultError};
use snapvault::host::FileCopyHost;
use snapvault::model::{VersionEntry, VersionStatus};
use snapvault::ops::{MessageLevel, OpMessage};
use snapvault::paths::ProjectLayout;
use snapvault::vault::Vault;
use std::path::PathBuf;
use std::sync::Arc;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: VaultApi<FileCopyHost>,
    config: VaultConfig,
    root: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let ctx = init_context(&cli)?;

    match cli.command {
        Commands::Snapshot => handle_snapshot(&ctx),
        Commands::Backup { dir } => handle_backup(&ctx, dir),
        Commands::List { deleted } => handle_list(&ctx, deleted),
        Commands::Delete { names } => handle_delete(&ctx, names),
        Commands::Restore { names } => handle_restore(&ctx, names),
        Commands::Compress { keep } => handle_compress(&ctx, keep),
        Commands::Purge { days } => handle_purge(&ctx, days),
        Commands::Watch { interval } => handle_watch(ctx, interval),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "snapvault=debug"
    } else {
        "snapvault=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let root = match &cli.root {
        Some(root) => root.clone(),
        None => ProjectDirs::from("com", "snapvault", "snapvault")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| VaultError::Config("could not determine a data directory".into()))?,
    };
    // A missing config.json yields defaults; an unreadable one is an error,
    // not a silent reset of every setting.
    let config = VaultConfig::load(&root).map_err(|e| {
        VaultError::Config(format!(
            "could not read config.json under {}: {}",
            root.display(),
            e
        ))
    })?;

    let layout = ProjectLayout::resolve(cli.file.as_deref(), &root)?
        .with_file_ext(config.get_file_ext());
    let vault = Arc::new(Vault::with_layout(layout));
    let host = FileCopyHost::new(cli.file.clone());
    let api = VaultApi::new(vault, host);

    Ok(AppContext { api, config, root })
}

fn handle_snapshot(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.create_snapshot("manual")?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_backup(ctx: &AppContext, dir: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.manual_backup(dir.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext, deleted: bool) -> Result<()> {
    let result = ctx.api.list_versions(deleted)?;
    print_versions(&result.listed);
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &AppContext, names: Vec<String>) -> Result<()> {
    for name in &names {
        let result = ctx.api.move_to_deleted(name)?;
        print_messages(&result.messages);
    }
    Ok(())
}

fn handle_restore(ctx: &AppContext, names: Vec<String>) -> Result<()> {
    for name in &names {
        let result = ctx.api.restore_deleted(name)?;
        print_messages(&result.messages);
    }
    Ok(())
}

fn handle_compress(ctx: &AppContext, keep: Option<usize>) -> Result<()> {
    let keep = keep.unwrap_or(ctx.config.keep_uncompressed);
    let result = ctx.api.compress_old(keep)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_purge(ctx: &AppContext, days: Option<u64>) -> Result<()> {
    let days = days.unwrap_or(ctx.config.purge_days);
    let result = ctx.api.purge_older_than(days)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_watch(ctx: AppContext, interval: Option<u64>) -> Result<()> {
    let mut config = ctx.config.clone();
    if let Some(secs) = interval {
        config.autosave_interval_secs = secs;
    }

    let vault = Arc::clone(ctx.api.vault());
    let host = ctx.api.host().clone();
    println!(
        "Autosaving {} every {}s into {} (Ctrl-C to stop)",
        vault.layout().identity().bold(),
        config.autosave_interval_secs,
        vault.layout().dir().display()
    );

    let mut controller = AutosaveController::new(vault, host, config);
    controller.enable();
    loop {
        std::thread::park();
    }
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let mut config = ctx.config.clone();
    let Some(key) = key else {
        println!("interval   = {}s", config.autosave_interval_secs);
        println!("keep       = {}", config.keep_uncompressed);
        println!("purge-days = {}", config.purge_days);
        println!("file-ext   = {}", config.get_file_ext());
        return Ok(());
    };

    match (key.as_str(), value) {
        ("interval", Some(v)) => {
            config.autosave_interval_secs = parse_number(&key, &v)?;
        }
        ("keep", Some(v)) => {
            config.keep_uncompressed = parse_number(&key, &v)?;
        }
        ("purge-days", Some(v)) => {
            config.purge_days = parse_number(&key, &v)?;
        }
        ("file-ext", Some(v)) => config.set_file_ext(&v),
        ("interval", None) => {
            println!("{}", config.autosave_interval_secs);
            return Ok(());
        }
        ("keep", None) => {
            println!("{}", config.keep_uncompressed);
            return Ok(());
        }
        ("purge-days", None) => {
            println!("{}", config.purge_days);
            return Ok(());
        }
        ("file-ext", None) => {
            println!("{}", config.get_file_ext());
            return Ok(());
        }
        (other, _) => {
            println!("Unknown config key: {}", other);
            return Ok(());
        }
    }

    config.save(&ctx.root)?;
    println!("{}", "Configuration saved.".green());
    Ok(())
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| VaultError::Config(format!("invalid value for {}: {}", key, value)))
}

fn print_messages(messages: &[OpMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn print_versions(entries: &[VersionEntry]) {
    if entries.is_empty() {
        println!("No versions recorded.");
        return;
    }
    for entry in entries {
        let status = match entry.status {
            VersionStatus::Active => "active ".green(),
            VersionStatus::Deleted => "deleted".red(),
            VersionStatus::Purged => "purged ".dimmed(),
        };
        let size = entry
            .size_mb
            .map(|s| format!("{:.2} MB", s))
            .unwrap_or_else(|| "-".to_string());
        let marker = if entry.compressed { "gz" } else { "  " };
        println!(
            "{:<52} {:>10} {} {} {:<8} {}",
            entry.file,
            size,
            marker.dimmed(),
            status,
            entry.note,
            format_time_ago(entry.timestamp).dimmed()
        );
    }
}

fn format_time_ago(timestamp: NaiveDateTime) -> String {
    let now = Local::now().naive_local();
    let duration = now.signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    formatter.convert(duration.to_std().unwrap_or_default())
}
