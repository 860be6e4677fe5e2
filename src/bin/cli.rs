//! Sleuthline CLI
//!
//! Command-line interface working directly on the timeline directory:
//! - Create and list timelines
//! - Add and show records
//! - Query, chart and relate events
//! - Export artifacts

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use sleuthline::chronology::Chronology;
use sleuthline::config::Config;
use sleuthline::export::ExportFormat;
use sleuthline::graph::{build_graph, GraphOptions};
use sleuthline::query::RecordQuery;
use sleuthline::storage::{Field, Record, RecordSet};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sleuthline-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Investigation timelines for OSINT work")]
#[command(long_about = "Sleuthline keeps investigative events in CSV timelines.\nQuery them, order them in time and derive who relates to whom, when.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: first of the standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Timeline directory, overrides the config
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format for records (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List timelines
    List,

    /// Create an empty timeline
    Create {
        /// Timeline name
        name: String,
    },

    /// Append a record to a timeline
    Add {
        /// Timeline name
        name: String,
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Show all records of a timeline
    Show {
        /// Timeline name
        name: String,
    },

    /// Filter records by case-insensitive substrings
    Query {
        /// Timeline name
        name: String,
        #[command(flatten)]
        filters: FieldArgs,
    },

    /// Order events in time and write chart data
    Chart {
        /// Timeline name
        name: String,
        #[command(flatten)]
        filters: FieldArgs,
    },

    /// Derive entity relationships and write graph data
    Graph {
        /// Timeline name
        name: String,
        /// Collapse identical edges
        #[arg(long)]
        dedup: bool,
        /// Drop edges where a record matched itself
        #[arg(long)]
        no_self_edges: bool,
        #[command(flatten)]
        filters: FieldArgs,
    },

    /// Export records (csv, xlsx, pdf, tabular, spreadsheet, paginated-text)
    Export {
        /// Timeline name
        name: String,
        /// Export format
        #[arg(value_name = "FORMAT")]
        kind: String,
        #[command(flatten)]
        filters: FieldArgs,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// One optional value per record field
#[derive(Args)]
pub struct FieldArgs {
    /// Date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
    /// Time (HH:MM)
    #[arg(long)]
    pub time: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    /// Person or entity the event is about
    #[arg(long)]
    pub person: Option<String>,
    #[arg(long)]
    pub image: Option<String>,
    #[arg(long)]
    pub video: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub source: Option<String>,
    #[arg(long)]
    pub source_link: Option<String>,
    /// Related entities, separated by ';'
    #[arg(long)]
    pub related: Option<String>,
    #[arg(long)]
    pub relationship: Option<String>,
}

impl FieldArgs {
    /// Fields that were given on the command line
    fn values(&self) -> Vec<(Field, &str)> {
        [
            (Field::Date, &self.date),
            (Field::Time, &self.time),
            (Field::Location, &self.location),
            (Field::PersonEntity, &self.person),
            (Field::Image, &self.image),
            (Field::Video, &self.video),
            (Field::Description, &self.description),
            (Field::Source, &self.source),
            (Field::SourceLink, &self.source_link),
            (Field::RelatedEntities, &self.related),
            (Field::RelationshipType, &self.relationship),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }

    fn to_record(&self) -> Record {
        self.values()
            .into_iter()
            .fold(Record::new(), |record, (field, value)| record.with(field, value))
    }

    fn to_query(&self) -> RecordQuery {
        self.values()
            .into_iter()
            .fold(RecordQuery::new(), |query, (field, value)| query.contains(field, value))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(data_dir) = &cli.data_dir {
        config.storage.data_dir = data_dir.to_string_lossy().to_string();
    }
    if !cli.verbose {
        config.logging.level = "warn".to_string();
    }
    sleuthline::logging::init(&config.logging)?;

    let directory = config.storage.directory();
    let exporter = config.export.exporter();

    match cli.command {
        Commands::List => {
            let names = directory.list()?;

            if names.is_empty() {
                println!("No timelines in {:?}", directory.root());
                println!();
                println!("Create your first timeline with:");
                println!("  sleuthline-cli create my-case");
            } else {
                for name in names {
                    println!("{}", name);
                }
            }
        }

        Commands::Create { name } => {
            if directory.exists(&name)? {
                anyhow::bail!("Timeline {:?} already exists", name);
            }
            let store = directory.create(&name)?;
            println!("Created timeline {} ({} schema)", store.name(), store.schema());
        }

        Commands::Add { name, fields } => {
            let mut store = directory
                .load(&name)
                .with_context(|| format!("Cannot add to timeline {:?}", name))?;
            store.append(fields.to_record());
            directory.save(&store)?;
            println!("Added record #{} to {}", store.len() - 1, store.name());
        }

        Commands::Show { name } => {
            let store = directory.load(&name)?;
            print_records(&store.as_set(), &cli.format)?;
        }

        Commands::Query { name, filters } => {
            let store = directory.load(&name)?;
            let result = store.query(&filters.to_query());
            print_records(&result, &cli.format)?;
        }

        Commands::Chart { name, filters } => {
            let store = directory.load(&name)?;
            let chronology = Chronology::build(&store.query(&filters.to_query()))?;
            let path = exporter.write_chart(&chronology.chart())?;

            match chronology.span() {
                Some((first, last)) => {
                    println!("{} events from {} to {}", chronology.len(), first, last)
                }
                None => println!("No events"),
            }
            println!("Chart data written to {:?}", path);
        }

        Commands::Graph {
            name,
            dedup,
            no_self_edges,
            filters,
        } => {
            let options = GraphOptions {
                dedup_edges: dedup || config.graph.dedup_edges,
                include_self_edges: !no_self_edges && config.graph.include_self_edges,
            };

            let store = directory.load(&name)?;
            let chronology = Chronology::build(&store.query(&filters.to_query()))?;
            let graph = build_graph(&chronology, &options)?;
            let path = exporter.write_graph(&graph)?;

            println!(
                "{} entities, {} events, {} edges",
                graph.entities.len(),
                graph.nodes.len(),
                graph.edges.len()
            );
            for edge in &graph.edges {
                let relationship = if edge.relationship.is_empty() {
                    "-"
                } else {
                    edge.relationship.as_str()
                };
                println!(
                    "  {} ({}) -> {} ({})  [{}]",
                    edge.source, edge.source_instant, edge.target, edge.target_instant, relationship
                );
            }
            println!("Graph data written to {:?}", path);
        }

        Commands::Export {
            name,
            kind,
            filters,
        } => {
            // Check the format before loading anything
            let format: ExportFormat = kind.parse()?;

            let store = directory.load(&name)?;
            let result = store.query(&filters.to_query());
            let artifact = exporter.export(&result, format)?;

            println!(
                "Exported {} records as {} to {:?}",
                result.len(),
                artifact.format,
                artifact.path
            );
        }

        Commands::Config { output } => {
            let config = sleuthline::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn print_records(set: &RecordSet<'_>, format: &str) -> anyhow::Result<()> {
    match format {
        "json" => {
            let rows: Vec<serde_json::Value> = set
                .rows()
                .iter()
                .map(|row| {
                    serde_json::json!({
                        "position": row.position,
                        "record": row.record,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        _ => print_table(set),
    }
    Ok(())
}

fn print_table(set: &RecordSet<'_>) {
    if set.is_empty() {
        println!("No records");
        return;
    }

    println!(
        "{:<5} {:<10} {:<5} {:<18} {:<18} {}",
        "#", "Date", "Time", "Person/Entity", "Location", "Description"
    );
    println!("{}", "-".repeat(90));

    for row in set.rows() {
        let record = row.record;
        println!(
            "{:<5} {:<10} {:<5} {:<18} {:<18} {}",
            row.position,
            record.get(Field::Date),
            record.get(Field::Time),
            truncate(record.get(Field::PersonEntity), 18),
            truncate(record.get(Field::Location), 18),
            truncate(record.get(Field::Description), 40),
        );
    }

    println!();
    println!("{} records", set.len());
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let cut: String = value.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
