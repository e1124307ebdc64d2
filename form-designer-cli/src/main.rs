use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use form_designer::engine::{ContainerRef, MemoryEngine};
use form_designer::{
    AnnotationKind, FormDesigner, InsertionDefaults, Position, ViewerProps,
    INSERTABLE_ANNOTATIONS,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "formdesigner",
    about = "Place form fields and text labels on PDF documents",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the insertable annotations
    Catalog {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Insert annotations into a document and print the created objects
    Insert {
        /// Annotation types to insert (text-anno, text-field, signature-field)
        #[arg(required = true)]
        kinds: Vec<String>,

        /// Document URL
        #[arg(short, long)]
        document: String,

        /// Base URL for viewer assets
        #[arg(long)]
        base_url: Option<String>,

        /// Container the viewer mounts into
        #[arg(long, default_value = "viewer")]
        container: String,

        /// Drop position as LEFT,TOP (defaults to the configured origin)
        #[arg(short, long)]
        at: Option<String>,

        /// Page to insert on (0-based)
        #[arg(short, long, default_value = "0")]
        page: u32,

        /// JSON file with insertion defaults
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for form field names
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn parse_position(value: &str) -> Result<Position> {
    let Some((left, top)) = value.split_once(',') else {
        bail!("Position must be LEFT,TOP, got '{value}'");
    };
    let left: f64 = left
        .trim()
        .parse()
        .with_context(|| format!("Invalid left coordinate '{left}'"))?;
    let top: f64 = top
        .trim()
        .parse()
        .with_context(|| format!("Invalid top coordinate '{top}'"))?;
    Ok(Position::new(left, top))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "form_designer=info,formdesigner=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Catalog { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&INSERTABLE_ANNOTATIONS)?);
            } else {
                for entry in INSERTABLE_ANNOTATIONS.iter() {
                    println!("{:<16} {}", entry.kind, entry.label);
                    println!("{:<16} {}", "", entry.description);
                    println!("{:<16} icon: {}", "", entry.icon_path());
                }
            }
        }

        Commands::Insert {
            kinds,
            document,
            base_url,
            container,
            at,
            page,
            config,
            seed,
        } => {
            // Validate everything before touching the engine
            let kinds = kinds
                .iter()
                .map(|k| k.parse::<AnnotationKind>())
                .collect::<Result<Vec<_>, _>>()?;
            let position = at.as_deref().map(parse_position).transpose()?;
            let defaults = match &config {
                Some(path) => InsertionDefaults::from_json_file(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?,
                None => InsertionDefaults::default(),
            };

            let engine = MemoryEngine::new();
            let container = ContainerRef::new(container);
            let mut props = ViewerProps::new(document);
            if let Some(base_url) = base_url {
                props = props.with_base_url(base_url);
            }

            let mut builder = FormDesigner::builder(engine.clone(), container.clone(), props)
                .defaults(defaults);
            if let Some(seed) = seed {
                builder = builder.seed(seed);
            }
            let mut designer = builder.build();

            designer.mount().await?;
            if let Some(session) = designer.viewer().session() {
                session.set_current_page_index(page);
            }

            for kind in kinds {
                let batch = designer.insert_annotation(kind, position)?;
                info!(kind = %kind, objects = batch.len(), "Inserted");
            }

            let snapshot = engine
                .document(&container)
                .context("Document is no longer mounted")?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);

            designer.unmount();
        }
    }

    Ok(())
}
