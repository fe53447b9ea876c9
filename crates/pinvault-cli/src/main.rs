//! Pinvault CLI: pin creative assets to IPFS through Pinata and keep a local catalog.
//!
//! Set PINATA_API_KEY and PINATA_SECRET_API_KEY for `upload` and `lookup`.
//! The catalog lives under PINVAULT_DATA_DIR (default `.pinvault`).

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use pinvault_api_client::{PinataClient, Pinner};
use pinvault_cli::form::FormArgs;
use pinvault_cli::init_tracing;
use pinvault_cli::output::{
    gallery, print_gallery_table, print_json, print_record_table, print_usage_table,
    OutputFormat,
};
use pinvault_core::{LocalSettings, PinataSettings, PinvaultConfig, UploadPolicy};
use pinvault_services::{read_upload_file, DraftStore, UploadOutcome, UploadWorkflow};
use pinvault_storage::{open_store, Catalog};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "pinvault", about = "Pin creative assets to IPFS and track them locally")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pin a file with descriptive metadata (only the first file is uploaded)
    Upload {
        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        form: FormArgs,

        /// Start from the metadata saved by the last failed upload
        #[arg(long)]
        from_draft: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// List uploaded assets, oldest first
    List {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Show storage usage against the configured limit
    Stats {
        /// Storage limit in MB (overrides PINVAULT_STORAGE_LIMIT_MB)
        #[arg(long)]
        limit_mb: Option<f64>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Look up the pin status of a content hash
    Lookup {
        /// Content hash (CID)
        hash: String,
    },
    /// Saved metadata draft operations
    Draft {
        #[command(subcommand)]
        sub: DraftCommands,
    },
}

#[derive(Subcommand)]
enum DraftCommands {
    /// Print the saved draft
    Show,
    /// Remove the saved draft
    Clear,
}

async fn upload(
    files: Vec<PathBuf>,
    form: FormArgs,
    from_draft: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let config = PinvaultConfig::from_env()
        .context("Invalid configuration. Set PINATA_API_KEY and PINATA_SECRET_API_KEY")?;

    let store = open_store(&config.local).await?;
    let drafts = DraftStore::new(store.clone());
    let catalog = Catalog::load(store).await;
    let client = PinataClient::new(&config.pinata)?;
    let workflow = UploadWorkflow::new(
        Arc::new(client),
        catalog,
        UploadPolicy::new(config.local.max_upload_mb),
    );

    let base = if from_draft {
        match drafts.load().await {
            Some(draft) => draft,
            None => {
                tracing::warn!("No saved draft, starting from an empty form");
                Default::default()
            }
        }
    } else {
        Default::default()
    };
    workflow.set_form(form.apply(base)?);

    let mut selected = Vec::with_capacity(files.len());
    for path in &files {
        let file = read_upload_file(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        selected.push(file);
    }

    let outcome = workflow.submit(selected).await?;
    workflow.acknowledge();

    match outcome {
        UploadOutcome::Pinned(record) => {
            if let Err(e) = drafts.clear().await {
                tracing::warn!(error = %e, "Failed to clear metadata draft");
            }
            match format {
                OutputFormat::Json => print_json(&record)?,
                OutputFormat::Table => print_record_table(&record),
            }
            Ok(())
        }
        UploadOutcome::Failed { message } => {
            match drafts.save(&workflow.form()).await {
                Ok(()) => eprintln!("Metadata saved; retry with --from-draft"),
                Err(e) => tracing::warn!(error = %e, "Failed to save metadata draft"),
            }
            bail!("Upload failed: {}", message)
        }
    }
}

async fn list(format: OutputFormat) -> anyhow::Result<()> {
    let settings = LocalSettings::from_env()?;
    let catalog = Catalog::load(open_store(&settings).await?).await;
    let items = gallery(catalog.records());

    match format {
        OutputFormat::Json => print_json(&items),
        OutputFormat::Table => {
            print_gallery_table(&items);
            Ok(())
        }
    }
}

async fn stats(limit_mb: Option<f64>, format: OutputFormat) -> anyhow::Result<()> {
    let settings = LocalSettings::from_env()?;
    let limit_mb = limit_mb.unwrap_or(settings.storage_limit_mb);
    if limit_mb.is_nan() || limit_mb <= 0.0 {
        bail!("--limit-mb must be positive");
    }

    let catalog = Catalog::load(open_store(&settings).await?).await;
    let usage = catalog.usage(limit_mb);

    match format {
        OutputFormat::Json => print_json(&usage),
        OutputFormat::Table => {
            print_usage_table(&usage);
            Ok(())
        }
    }
}

async fn lookup(hash: &str) -> anyhow::Result<()> {
    let settings = PinataSettings::from_env()
        .context("Invalid configuration. Set PINATA_API_KEY and PINATA_SECRET_API_KEY")?;
    let client = PinataClient::new(&settings)?;

    match client.lookup(hash).await {
        Some(listing) if !listing.rows.is_empty() => print_json(&listing),
        _ => {
            println!("{} not found", hash);
            Ok(())
        }
    }
}

async fn draft(sub: DraftCommands) -> anyhow::Result<()> {
    let settings = LocalSettings::from_env()?;
    let drafts = DraftStore::new(open_store(&settings).await?);

    match sub {
        DraftCommands::Show => match drafts.load().await {
            Some(form) => print_json(&form)?,
            None => println!("No saved draft"),
        },
        DraftCommands::Clear => {
            drafts.clear().await?;
            println!("Draft cleared");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Upload {
            files,
            form,
            from_draft,
            format,
        } => upload(files, form, from_draft, format).await,
        Commands::List { format } => list(format).await,
        Commands::Stats { limit_mb, format } => stats(limit_mb, format).await,
        Commands::Lookup { hash } => lookup(&hash).await,
        Commands::Draft { sub } => draft(sub).await,
    }
}
