// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Partledger CLI - revision ledger for a Formula-Student parts catalog

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use partledger::commands;

#[derive(Parser)]
#[command(name = "partledger")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,

    /// Data directory override
    #[arg(long, env = "PARTLEDGER_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage catalog parts
    Part {
        /// Action: add, edit, list, show, history
        action: String,

        /// Part number or ID
        part: Option<String>,

        /// Owning department; also filters 'list'
        #[arg(long)]
        department: Option<String>,

        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Free-form description
        #[arg(long)]
        description: Option<String>,

        /// Sourcing (manufactured, purchased)
        #[arg(long)]
        sourcing: Option<String>,

        /// Manufacturing process
        #[arg(long)]
        manufacturing_type: Option<String>,

        /// Material
        #[arg(long)]
        material: Option<String>,

        /// Responsible person
        #[arg(long)]
        responsible_person: Option<String>,

        /// Responsible company
        #[arg(long)]
        responsible_company: Option<String>,

        /// Approver
        #[arg(long)]
        approver: Option<String>,

        /// Designer
        #[arg(long)]
        designer: Option<String>,

        /// Vehicle system
        #[arg(long)]
        system: Option<String>,

        /// Assembly
        #[arg(long)]
        assembly: Option<String>,

        /// Sub-assembly
        #[arg(long)]
        sub_assembly: Option<String>,

        /// Quantity per vehicle
        #[arg(long)]
        quantity: Option<u32>,

        /// Cost of a single part
        #[arg(long)]
        cost_per_part: Option<f64>,

        /// Emissions of a single part
        #[arg(long)]
        emissions_per_part: Option<f64>,

        /// Status (draft, in_manufacturing, done, awaiting_approval, rejected);
        /// also filters 'list'
        #[arg(long)]
        status: Option<String>,

        /// Part-level version label
        #[arg(long)]
        part_version: Option<String>,

        /// Who is making the change
        #[arg(long)]
        by: Option<String>,
    },

    /// Manage file revisions
    Revision {
        /// Action: add, list, suggest, highest
        action: String,

        /// Part number or ID
        part: Option<String>,

        /// Artifact category (cad_model, technical_drawing, documentation)
        #[arg(long)]
        category: Option<String>,

        /// Revision version (major.minor.patch)
        #[arg(long)]
        file_version: Option<String>,

        /// Artifact file name
        #[arg(long)]
        file: Option<String>,

        /// Who is uploading
        #[arg(long)]
        by: Option<String>,
    },

    /// Compare two history entries of a part
    Compare {
        /// Part number or ID
        part: String,

        /// First entry index, 1-based, as listed by 'part history'
        #[arg(long)]
        first: usize,

        /// Second entry index, 1-based
        #[arg(long)]
        second: usize,
    },

    /// Import artifact files from a directory as revisions
    Import {
        /// Directory to scan
        path: std::path::PathBuf,

        /// Part number or ID to attach artifacts to
        #[arg(long)]
        part: String,

        /// Who is importing
        #[arg(long)]
        by: Option<String>,
    },

    /// Export the catalog to various formats
    Export {
        /// Output format (json, toml)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key
        key: String,

        /// Value to set (omit to get)
        value: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => tracing::Level::ERROR,
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Make the override visible to command modules
    if let Some(dir) = &cli.data_dir {
        std::env::set_var("PARTLEDGER_DATA_DIR", dir);
    }

    // Execute command
    match cli.command {
        Commands::Part {
            action,
            part,
            department,
            name,
            description,
            sourcing,
            manufacturing_type,
            material,
            responsible_person,
            responsible_company,
            approver,
            designer,
            system,
            assembly,
            sub_assembly,
            quantity,
            cost_per_part,
            emissions_per_part,
            status,
            part_version,
            by,
        } => commands::part::run(commands::part::PartArgs {
            action,
            part,
            department,
            name,
            description,
            sourcing,
            manufacturing_type,
            material,
            responsible_person,
            responsible_company,
            approver,
            designer,
            system,
            assembly,
            sub_assembly,
            quantity,
            cost_per_part,
            emissions_per_part,
            status,
            part_version,
            by,
        }),
        Commands::Revision {
            action,
            part,
            category,
            file_version,
            file,
            by,
        } => commands::revision::run(&action, part, category, file_version, file, by),
        Commands::Compare { part, first, second } => {
            commands::compare::run(&part, first, second, cli.no_color)
        }
        Commands::Import { path, part, by } => commands::import::run(&path, &part, by),
        Commands::Export { format, output } => commands::export::run(&format, output),
        Commands::Config { key, value } => commands::config::run(&key, value),
        Commands::Completions { shell } => {
            commands::completions::run(shell, &mut Cli::command())
        }
    }
}
