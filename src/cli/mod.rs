//! # CLI Module
//!
//! Command-line front end. Local paths stand in for the browser's inputs:
//! `--input drop` traverses them as a dropped entry tree, `--input files`
//! treats each as a picked file, `--input folder` walks each as a picked
//! folder.
//!
//! ## Usage
//! ```bash
//! # Sort by type into ziplifica.zip
//! ziplifica organize ~/Downloads
//!
//! # By year and month, with an ISO date prefix, preview only
//! ziplifica organize ~/Photos --mode year-month --date-mode prefix-iso-underscore --dry-run
//!
//! # Suggest a layout for a project and unpack it into a directory
//! ziplifica blueprint ./site --extract ./site-restructured
//!
//! # Custom extension rules
//! ziplifica rules add psd DESIGN
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use ziplifica::core::archive::{
    ArchiveBuilder, ArchiveManifest, ArchiveReport, DirectoryArchive, ZipArchive, DEFAULT_ARCHIVE_NAME,
};
use ziplifica::core::blueprint::{analyze, BlueprintId, BlueprintPlan, BlueprintPlanner, BlueprintSelector, ProjectInsights, Ranking};
use ziplifica::core::ingest::{
    drop_from_paths, files_from_paths, folders_from_paths, ingest_drop, ingest_selection, FsByteSource,
    FsIngestConfig, IngestResult, WorkingSet, WorkingSetStatus, Workspace,
};
use ziplifica::core::placement::{OrganizeMode, OrganizeOptions, OrganizePlan, OrganizePlanner, RenameCharMode, RenameDateMode};
use ziplifica::core::rules::{RuleStore, SqliteStore};
use ziplifica::error::{Result, ZiplificaError};
use ziplifica::events::{ArchiveEvent, Event, EventChannel, EventReceiver, IngestEvent, IngestTrigger};

/// Ziplifica - sort files into folders and pack them into a ZIP
#[derive(Parser, Debug)]
#[command(name = "ziplifica")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Organize files by type, date or size and pack them
    Organize {
        /// Files or directories to ingest
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// How the paths are read
        #[arg(short, long, default_value = "drop")]
        input: InputKind,

        /// Folder layout: type, year, month, year-month, year-type, size
        #[arg(short, long, default_value = "type")]
        mode: OrganizeMode,

        /// Date stamp added to file names
        #[arg(long, default_value = "none")]
        date_mode: RenameDateMode,

        /// Character transform applied to file names
        #[arg(long, default_value = "none")]
        char_mode: RenameCharMode,

        #[command(flatten)]
        target: TargetArgs,

        /// Custom rules database path
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Analyze a project and export it in a suggested layout
    Blueprint {
        /// Files or directories to ingest
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// How the paths are read
        #[arg(short, long, default_value = "drop")]
        input: InputKind,

        /// Use this blueprint instead of the suggested one
        #[arg(short, long)]
        select: Option<BlueprintId>,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Manage custom extension → folder rules
    Rules {
        #[command(subcommand)]
        action: RulesAction,

        /// Custom rules database path
        #[arg(long, global = true)]
        store: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum RulesAction {
    /// Show all rules
    List,
    /// Add or replace a rule
    Add {
        /// Extension, with or without the leading dot
        extension: String,
        /// Folder name (stored uppercase)
        folder: String,
    },
    /// Remove a rule
    Remove {
        extension: String,
    },
}

/// Output options shared by `organize` and `blueprint`
#[derive(clap::Args, Debug)]
struct TargetArgs {
    /// ZIP file to write
    #[arg(short, long, conflicts_with = "extract")]
    output: Option<PathBuf>,

    /// Write the layout into this directory instead of a ZIP
    #[arg(long)]
    extract: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "pretty")]
    format: OutputFormat,

    /// Show the plan without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Files per directory read when traversing dropped folders
    #[arg(long, default_value = "100")]
    batch_size: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum InputKind {
    /// Traverse paths as a dropped entry tree (detects empty folders)
    Drop,
    /// Treat every path as a picked file
    Files,
    /// Walk every path as a picked folder
    Folder,
}

impl From<InputKind> for IngestTrigger {
    fn from(kind: InputKind) -> Self {
        match kind {
            InputKind::Drop => IngestTrigger::Drop,
            InputKind::Files => IngestTrigger::FilePicker,
            InputKind::Folder => IngestTrigger::FolderPicker,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (target paths only)
    Minimal,
}

impl OutputFormat {
    fn is_pretty(&self) -> bool {
        matches!(self, OutputFormat::Pretty)
    }
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Organize {
            paths,
            input,
            mode,
            date_mode,
            char_mode,
            target,
            store,
        } => {
            ziplifica::init_tracing_with(log_level(target.verbose));
            let options = OrganizeOptions {
                mode,
                date_mode,
                char_mode,
            };
            run_organize(paths, input, options, target, store)
        }
        Commands::Blueprint {
            paths,
            input,
            select,
            target,
        } => {
            ziplifica::init_tracing_with(log_level(target.verbose));
            run_blueprint(paths, input, select, target)
        }
        Commands::Rules { action, store } => {
            ziplifica::init_tracing();
            run_rules(action, store)
        }
    }
}

fn log_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

fn run_organize(
    paths: Vec<PathBuf>,
    input: InputKind,
    options: OrganizeOptions,
    target: TargetArgs,
    store_path: Option<PathBuf>,
) -> Result<()> {
    let term = Term::stderr();
    print_header(&term, target.format, "Organize");

    let rules = open_rules(store_path)?;
    let set = ingest(&paths, input, &target)?;
    if set.status() == WorkingSetStatus::Waiting {
        return Err(ZiplificaError::Config(
            "nothing to organize: no files or folders were found".to_string(),
        ));
    }

    let plan = OrganizePlanner::create_plan(&set, options, rules.rules());

    let archive = if target.dry_run {
        None
    } else {
        let default_path = PathBuf::from(DEFAULT_ARCHIVE_NAME);
        Some(write_archive(&plan.to_manifest(), &target, &default_path)?)
    };

    match target.format {
        OutputFormat::Pretty => print_organize_pretty(&term, &plan, archive.as_ref(), target.verbose),
        OutputFormat::Json => print_json(&serde_json::json!({
            "plan": plan,
            "archive": archive.as_ref().map(|(path, report)| serde_json::json!({
                "path": path,
                "report": report,
            })),
        }))?,
        OutputFormat::Minimal => {
            for entry in &plan.entries {
                println!("{}", entry.target_path);
            }
            for directory in &plan.directories {
                println!("{}/", directory);
            }
        }
    }

    Ok(())
}

fn run_blueprint(
    paths: Vec<PathBuf>,
    input: InputKind,
    select: Option<BlueprintId>,
    target: TargetArgs,
) -> Result<()> {
    let term = Term::stderr();
    print_header(&term, target.format, "Blueprint");

    let set = ingest(&paths, input, &target)?;
    if set.status() != WorkingSetStatus::Ready {
        return Err(ZiplificaError::Config(
            "nothing to analyze: no files were found".to_string(),
        ));
    }

    let insights = analyze(&set, &FsByteSource);
    let mut selector = BlueprintSelector::new();
    let ranking = selector.recompute(&insights).clone();
    if let Some(id) = select {
        selector.select(id);
    }
    let chosen = selector.selected().unwrap_or_else(|| ranking.suggested());

    let plan = BlueprintPlanner::create_plan(&set, chosen);

    let archive = if target.dry_run {
        None
    } else {
        let default_path = PathBuf::from(plan.archive_name());
        Some(write_archive(&plan.to_manifest(), &target, &default_path)?)
    };

    match target.format {
        OutputFormat::Pretty => {
            print_blueprint_pretty(&term, &insights, &ranking, &plan, archive.as_ref(), target.verbose)
        }
        OutputFormat::Json => print_json(&serde_json::json!({
            "insights": insights,
            "ranking": ranking.entries().iter().map(|r| serde_json::json!({
                "id": r.id(),
                "title": r.blueprint.title,
                "score": r.score,
            })).collect::<Vec<_>>(),
            "suggested": ranking.suggested(),
            "selected": chosen,
            "plan": plan,
            "archive": archive.as_ref().map(|(path, report)| serde_json::json!({
                "path": path,
                "report": report,
            })),
        }))?,
        OutputFormat::Minimal => {
            for entry in &plan.entries {
                println!("{}", entry.target_path);
            }
            for directory in &plan.directories {
                println!("{}/", directory);
            }
        }
    }

    Ok(())
}

fn run_rules(action: RulesAction, store_path: Option<PathBuf>) -> Result<()> {
    let term = Term::stdout();
    let mut rules = open_rules(store_path)?;

    match action {
        RulesAction::List => {
            if rules.rules().is_empty() {
                term.write_line(&format!("{}", style("No custom rules.").dim())).ok();
            }
            for (extension, folder) in rules.rules().iter() {
                term.write_line(&format!(".{:<10} → {}", extension, style(folder).cyan()))
                    .ok();
            }
        }
        RulesAction::Add { extension, folder } => {
            let (extension, folder) = rules.add(&extension, &folder)?;
            term.write_line(&format!(
                "{} .{} → {}",
                style("✓").green().bold(),
                extension,
                style(folder).cyan()
            ))
            .ok();
        }
        RulesAction::Remove { extension } => {
            if rules.remove(&extension)? {
                term.write_line(&format!("{} Removed .{}", style("✓").green().bold(), extension.trim_start_matches('.')))
                    .ok();
            } else {
                term.write_line(&format!("{}", style(format!("No rule for .{}", extension.trim_start_matches('.'))).dim()))
                    .ok();
            }
        }
    }

    Ok(())
}

fn open_rules(store_path: Option<PathBuf>) -> Result<RuleStore> {
    let path = store_path.unwrap_or_else(SqliteStore::default_path);
    let store = SqliteStore::open(&path)?;
    Ok(RuleStore::load(Box::new(store))?)
}

fn print_header(term: &Term, format: OutputFormat, title: &str) {
    if format.is_pretty() {
        term.write_line(&format!(
            "{} {} {}",
            style("Ziplifica").bold().cyan(),
            style(title).bold(),
            style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        term.write_line("").ok();
    }
}

/// Run one ingestion pass over `paths` and install it as the live Working Set
fn ingest(paths: &[PathBuf], input: InputKind, target: &TargetArgs) -> Result<Arc<WorkingSet>> {
    let workspace = Workspace::new();
    let ticket = workspace.begin();
    let (sender, receiver) = EventChannel::new();

    let spinner = target.format.is_pretty().then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });
    let event_thread = spawn_ingest_listener(receiver, spinner.clone(), target.verbose);

    let (result, pre_errors) = match input {
        InputKind::Drop => {
            let config = FsIngestConfig {
                batch_size: target.batch_size,
            };
            let (payload, errors) = drop_from_paths(paths, &config);
            (ingest_drop(payload, &sender), errors)
        }
        InputKind::Files => {
            let (selected, errors) = files_from_paths(paths);
            (ingest_selection(selected, input.into(), &sender), errors)
        }
        InputKind::Folder => {
            let (selected, errors) = folders_from_paths(paths);
            (ingest_selection(selected, input.into(), &sender), errors)
        }
    };

    drop(sender);
    event_thread.join().ok();

    let IngestResult { items, errors } = result;
    let skipped = pre_errors.len() + errors.len();
    for error in pre_errors.iter().chain(errors.iter()) {
        tracing::warn!(%error, "input skipped");
    }
    if skipped > 0 && target.format.is_pretty() {
        Term::stderr()
            .write_line(&format!(
                "{} {} input(s) could not be read and were skipped",
                style("!").yellow().bold(),
                skipped
            ))
            .ok();
    }

    Ok(workspace.commit(ticket, WorkingSet::new(items))?)
}

fn spawn_ingest_listener(
    receiver: EventReceiver,
    spinner: Option<ProgressBar>,
    verbose: bool,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for event in receiver.iter() {
            let Some(ref pb) = spinner else { continue };
            match event {
                Event::Ingest(IngestEvent::Started { trigger }) => {
                    pb.set_message(format!("Reading {}...", trigger));
                }
                Event::Ingest(IngestEvent::ItemFound {
                    relative_path,
                    discovered,
                    ..
                }) => {
                    if verbose {
                        pb.set_message(format!("{} items · {}", discovered, relative_path));
                    } else {
                        pb.set_message(format!("{} items", discovered));
                    }
                }
                Event::Ingest(IngestEvent::Completed { .. }) => pb.finish_and_clear(),
                _ => {}
            }
        }
    })
}

/// Write `manifest` as a ZIP, or into a directory with `--extract`
fn write_archive(
    manifest: &ArchiveManifest,
    target: &TargetArgs,
    default_path: &Path,
) -> Result<(PathBuf, ArchiveReport)> {
    let (sender, receiver) = EventChannel::new();
    let progress = target.format.is_pretty().then(|| {
        let pb = ProgressBar::new(manifest.files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        pb
    });
    let event_thread = spawn_archive_listener(receiver, progress.clone());

    let result = match &target.extract {
        Some(directory) => DirectoryArchive::create(directory).and_then(|mut archive| {
            let report = ArchiveBuilder::build(manifest, &FsByteSource, &mut archive, &sender)?;
            Ok((directory.clone(), report))
        }),
        None => {
            let path = target.output.clone().unwrap_or_else(|| default_path.to_path_buf());
            ZipArchive::create(&path).and_then(|mut archive| {
                let report = ArchiveBuilder::build(manifest, &FsByteSource, &mut archive, &sender)?;
                Ok((archive.finish()?, report))
            })
        }
    };

    drop(sender);
    event_thread.join().ok();
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    Ok(result?)
}

fn spawn_archive_listener(receiver: EventReceiver, progress: Option<ProgressBar>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for event in receiver.iter() {
            let Some(ref pb) = progress else { continue };
            match event {
                Event::Archive(ArchiveEvent::EntryWritten { path, completed, .. }) => {
                    pb.set_position(completed as u64);
                    pb.set_message(path);
                }
                Event::Archive(ArchiveEvent::EntryFailed { name, .. }) => {
                    pb.inc(1);
                    pb.println(format!("  {} {}", style("✗").red(), name));
                }
                _ => {}
            }
        }
    })
}

fn print_organize_pretty(
    term: &Term,
    plan: &OrganizePlan,
    archive: Option<&(PathBuf, ArchiveReport)>,
    verbose: bool,
) {
    term.write_line(&format!(
        "  {} files in {} folders · {}",
        style(plan.total_files).cyan(),
        style(plan.folder_count).cyan(),
        style(format_bytes(plan.total_size_bytes)).yellow()
    ))
    .ok();
    if plan.conflict_count > 0 {
        term.write_line(&format!(
            "  {} name collisions renamed with a numeric suffix",
            style(plan.conflict_count).yellow()
        ))
        .ok();
    }
    term.write_line("").ok();

    for entry in &plan.entries {
        let name = if entry.is_renamed() {
            format!(
                "{} {} {}",
                style(&entry.source.name).dim(),
                style("→").dim(),
                style(&entry.renamed_name).bold()
            )
        } else {
            style(&entry.source.name).bold().to_string()
        };
        let mime = if entry.source.mime_type.is_empty() {
            "unknown"
        } else {
            entry.source.mime_type.as_str()
        };
        term.write_line(&format!(
            "  {} {}  {} · {}",
            style(format!("[{}]", entry.folder)).cyan(),
            name,
            format_bytes(entry.source.size),
            style(mime).dim()
        ))
        .ok();

        if entry.relative_path != entry.source.name {
            term.write_line(&format!("      {} {}", style("from").dim(), style(&entry.relative_path).dim()))
                .ok();
        }
        if verbose {
            term.write_line(&format!("      {} {}", style("→").dim(), entry.target_path)).ok();
        }
    }

    for directory in &plan.directories {
        term.write_line(&format!("  {} {}/", style("[dir]").dim(), directory)).ok();
    }

    print_archive_outcome(term, archive);
}

fn print_blueprint_pretty(
    term: &Term,
    insights: &ProjectInsights,
    ranking: &Ranking,
    plan: &BlueprintPlan,
    archive: Option<&(PathBuf, ArchiveReport)>,
    verbose: bool,
) {
    term.write_line(&format!("  {}", style(insights.summary()).bold())).ok();
    term.write_line(&format!(
        "  {} · {}",
        style(format!("{} files", insights.total_files)).cyan(),
        style(format_bytes(insights.total_size)).yellow()
    ))
    .ok();

    for (language, count) in insights.top_languages(4) {
        term.write_line(&format!(
            "    {:<14} {:>3}%  ({})",
            language.label(),
            insights.percent(count),
            count
        ))
        .ok();
    }

    let frameworks = if insights.frameworks.is_empty() {
        "Nenhum".to_string()
    } else {
        insights.frameworks.iter().copied().collect::<Vec<_>>().join(", ")
    };
    term.write_line(&format!("  {} {}", style("Frameworks:").dim(), frameworks)).ok();
    if !insights.tooling.is_empty() {
        term.write_line(&format!(
            "  {} {}",
            style("Tooling:").dim(),
            insights.tooling.iter().copied().collect::<Vec<_>>().join(", ")
        ))
        .ok();
    }
    if !insights.package_managers.is_empty() {
        term.write_line(&format!(
            "  {} {}",
            style("Package managers:").dim(),
            insights.package_managers.iter().copied().collect::<Vec<_>>().join(", ")
        ))
        .ok();
    }
    term.write_line("").ok();

    term.write_line(&format!("{}", style("Blueprints:").bold().underlined())).ok();
    for ranked in ranking.entries() {
        let marker = if ranked.id() == plan.blueprint {
            style("★").green().to_string()
        } else {
            style("○").dim().to_string()
        };
        let suggested = if ranked.id() == ranking.suggested() {
            style(" (suggested)").dim().to_string()
        } else {
            String::new()
        };
        term.write_line(&format!(
            "  {} {:>3} {} [{}]{}",
            marker,
            ranked.score.round(),
            style(ranked.blueprint.title).bold(),
            ranked.blueprint.badges.join(", "),
            suggested
        ))
        .ok();
        if verbose {
            term.write_line(&format!("        {}", style(ranked.blueprint.description).dim()))
                .ok();
        }
    }
    term.write_line("").ok();

    let selected = plan.blueprint.blueprint();
    term.write_line(&format!("{}", style(selected.title).bold().underlined())).ok();
    for line in selected.tree_lines() {
        term.write_line(&format!("  {}", line)).ok();
    }
    term.write_line("").ok();

    for folder in &plan.mapping {
        term.write_line(&format!("  {:<12} {} files", style(&folder.folder).cyan(), folder.count))
            .ok();
    }
    if verbose {
        for entry in &plan.entries {
            term.write_line(&format!(
                "    {} {} {}",
                style(&entry.relative_path).dim(),
                style("→").dim(),
                entry.target_path
            ))
            .ok();
        }
    }

    print_archive_outcome(term, archive);
}

fn print_archive_outcome(term: &Term, archive: Option<&(PathBuf, ArchiveReport)>) {
    term.write_line("").ok();
    match archive {
        Some((path, report)) => {
            let mark = if report.has_failures() {
                style("!").yellow().bold()
            } else {
                style("✓").green().bold()
            };
            term.write_line(&format!("{} {}", mark, report.status())).ok();
            term.write_line(&format!(
                "  {} files, {} folders → {}",
                style(report.files_written).cyan(),
                style(report.directories_written).cyan(),
                path.display()
            ))
            .ok();
            for name in &report.failed {
                term.write_line(&format!("  {} {}", style("✗").red(), name)).ok();
            }
        }
        None => {
            term.write_line(&format!(
                "{}",
                style("Dry run: nothing was written.").dim()
            ))
            .ok();
        }
    }
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| ZiplificaError::Config(format!("could not render JSON: {}", e)))?;
    println!("{}", text);
    Ok(())
}

/// Human-readable size, base 1024 with one decimal
fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}
