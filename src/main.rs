// src/main.rs

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use portview::catalog::flags;
use portview::installed::{InstalledLister, PkgDbLister, DEFAULT_PKG_DB_ROOT};
use portview::report::Column;
use portview::tree::NodeId;
use portview::{Collection, Session};

#[derive(Parser)]
#[command(name = "portview")]
#[command(author, version, about = "Browse a merged view of available and installed packages", long_about = None)]
struct Cli {
    /// Path to a JSON dump of the availability catalog
    #[arg(short, long)]
    catalog: PathBuf,

    /// Root of the installed-package database
    #[arg(long, default_value = DEFAULT_PKG_DB_ROOT)]
    pkg_db: PathBuf,

    /// Search term the catalog dump was generated with, if any
    #[arg(long)]
    search: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the category tree with package counts
    Categories,
    /// Print the package report for one category or category group
    Report {
        /// Category name, e.g. "dev-qt", or a group, e.g. "dev"
        category: String,
    },
    /// Print per-version details for one package
    Details {
        /// Category name, e.g. "dev-qt"
        category: String,
        /// Package name, e.g. "qt-creator"
        package: String,
    },
    /// List packages installed on disk but unknown to the catalog
    Zombies,
}

/// Resolve a category argument to a tree node: "group-subgroup" descends two
/// levels, anything else is looked up directly under "All".
fn find_category_node(session: &Session, category: &str) -> Option<NodeId> {
    let tree = session.category_tree();
    match category.split_once('-') {
        Some((group, subgroup)) => {
            let top = tree.find_child(tree.all(), group)?;
            tree.find_child(top, subgroup)
        }
        None => tree.find_child(tree.all(), category),
    }
}

fn print_categories(session: &Session, node: NodeId, depth: usize) {
    let tree = session.category_tree();
    println!(
        "{:indent$}{} ({})",
        "",
        tree.name(node),
        tree.package_count(node),
        indent = depth * 2
    );
    for row in 0..tree.child_count(node) {
        if let Some(child) = tree.child(node, row) {
            print_categories(session, child, depth + 1);
        }
    }
}

fn print_report(session: &Session) {
    for item in session.report().rows() {
        let marker = item.cell(Column::Installed);
        println!(
            "{:8} {}/{} {} [{}] {}",
            marker,
            item.category(),
            item.name(),
            item.version_names().join(", "),
            item.available_version(),
            item.description()
        );
    }
}

fn print_details(session: &Session, category: &str, package: &str) -> Result<()> {
    let entry = session
        .catalog()
        .categories
        .iter()
        .find(|c| c.name == category)
        .and_then(|c| c.packages.iter().find(|p| p.name == package));
    let Some(entry) = entry else {
        bail!("package not found in catalog: {}/{}", category, package);
    };

    println!("{}/{}: {}", category, package, entry.description);
    if !entry.homepage.is_empty() {
        println!("  homepage: {}", entry.homepage);
    }
    if !entry.license.is_empty() {
        println!("  license: {}", entry.license);
    }
    if session.packages().is_zombie(category, package) {
        println!("  ** not in the availability catalog - obsolete install?");
    }

    for version in &entry.versions {
        let stability = if version.is_stable() { "" } else { "~" };
        print!("  {}{}", stability, version.id);
        if let Some(repository) = &version.repository {
            print!(" ::{}", repository);
        }
        if let Some(record) = &version.installed {
            match &record.date {
                Some(date) => print!(" (installed {})", date.format("%Y-%m-%d")),
                None => print!(" (installed)"),
            }
        }
        println!();

        let keys = flags::format_key_flags(&version.local_key_flags);
        if !keys.is_empty() {
            println!("    keywords: {}", keys);
        }
        let masks = flags::format_mask_flags(&version.local_mask_flags);
        if !masks.is_empty() {
            println!("    masks: {}", masks);
        }
        let uses = version.use_flag_summary();
        if !uses.is_empty() {
            println!("    use: {}", uses);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let catalog = Collection::load(&cli.catalog)
        .with_context(|| format!("loading catalog from {}", cli.catalog.display()))?;
    let entries = PkgDbLister::new(&cli.pkg_db)
        .list()
        .with_context(|| format!("scanning package database at {}", cli.pkg_db.display()))?;

    let mut session = Session::new();
    if let Some(search) = &cli.search {
        session.set_search(search.clone());
    }
    session.load_catalog(catalog, entries);

    match cli.command {
        Commands::Categories => {
            print_categories(&session, session.category_tree().all(), 0);
        }
        Commands::Report { category } => {
            let Some(node) = find_category_node(&session, &category) else {
                bail!("unknown category: {}", category);
            };
            session.populate_report(node);
            print_report(&session);
        }
        Commands::Details { category, package } => {
            print_details(&session, &category, &package)?;
        }
        Commands::Zombies => {
            for zombie in session.packages().zombie_list() {
                println!("{}", zombie);
            }
        }
    }

    Ok(())
}
