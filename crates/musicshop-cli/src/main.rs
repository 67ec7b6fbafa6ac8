//! Music shop inventory CLI.
//!
//! Provides the `musicshop` binary, a command-line front end over the same
//! client facade a UI would use. By default it talks to the HTTP API;
//! `--local-dir` switches to the directory-backed local store.
//!
//! Results are printed to stdout as pretty JSON.

use std::process;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;

use musicshop_client::{ClientConfig, ClientError, ShopBackend, ShopClient};
use musicshop_core::{PartyDraft, PartyKind, RecordId, SongDraft};

/// Music shop inventory tools.
#[derive(Parser)]
#[command(name = "musicshop", about = "Music shop inventory")]
struct Cli {
    /// Base URL of the shop HTTP API.
    #[arg(long, global = true, conflicts_with = "local_dir")]
    api_url: Option<String>,

    /// Use the local store kept in this directory instead of the API.
    #[arg(long, global = true)]
    local_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// A collection segment: one of the four party kinds, or songs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Collection {
    Party(PartyKind),
    Songs,
}

#[derive(Subcommand)]
enum Commands {
    /// List a collection (singers, composers, record-companies, customers, songs).
    List {
        #[arg(value_parser = parse_collection)]
        collection: Collection,
    },

    /// Add a singer, composer, record company or customer.
    Add {
        #[arg(value_parser = parse_party_kind)]
        kind: PartyKind,
        #[command(flatten)]
        party: PartyArgs,
    },

    /// Replace the fields of an existing party.
    Update {
        #[arg(value_parser = parse_party_kind)]
        kind: PartyKind,
        id: i64,
        #[command(flatten)]
        party: PartyArgs,
    },

    /// Delete a record from any collection.
    Delete {
        #[arg(value_parser = parse_collection)]
        collection: Collection,
        id: i64,
    },

    /// Add a song.
    AddSong {
        #[command(flatten)]
        song: SongArgs,
    },

    /// Replace the fields of an existing song.
    UpdateSong {
        id: i64,
        #[command(flatten)]
        song: SongArgs,
    },

    /// Search songs by title, movie or related names. No term lists all songs.
    Search { term: Option<String> },
}

#[derive(Args, Debug)]
struct PartyArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    contact: Option<String>,
    #[arg(long)]
    address: Option<String>,
}

impl From<PartyArgs> for PartyDraft {
    fn from(args: PartyArgs) -> Self {
        PartyDraft {
            name: args.name,
            contact: args.contact,
            address: args.address,
        }
    }
}

/// Song fields as typed on the command line. Numbers and ids stay text and
/// are coerced with the same rules the API applies to request bodies.
#[derive(Args, Debug)]
struct SongArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    movie_name: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    duration: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    available_as: Option<String>,
    #[arg(long)]
    size: Option<String>,
    #[arg(long)]
    singer_id: Option<String>,
    #[arg(long)]
    composer_id: Option<String>,
    #[arg(long)]
    record_company_id: Option<String>,
}

impl From<SongArgs> for SongDraft {
    fn from(args: SongArgs) -> Self {
        SongDraft {
            title: args.title,
            movie_name: args.movie_name,
            price: args.price.map(Value::String),
            duration: args.duration,
            category: args.category,
            available_as: args.available_as,
            size: args.size.map(Value::String),
            singer_id: args.singer_id.map(Value::String),
            composer_id: args.composer_id.map(Value::String),
            record_company_id: args.record_company_id.map(Value::String),
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    process::exit(run(cli).await);
}

/// Execute one command.
///
/// Returns exit code: 0 = success, 1 = invalid input or unknown id,
/// 2 = store, network or configuration failure.
async fn run(cli: Cli) -> i32 {
    let config = match client_config(cli.api_url, cli.local_dir) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return 2;
        }
    };

    let client = match ShopClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: failed to open backend: {}", e);
            return 2;
        }
    };

    match cli.command {
        Commands::List { collection } => match collection {
            Collection::Party(kind) => report(client.list_parties(kind).await),
            Collection::Songs => report(client.list_songs().await),
        },
        Commands::Add { kind, party } => report(client.create_party(kind, &party.into()).await),
        Commands::Update { kind, id, party } => report(
            client
                .update_party(kind, RecordId(id), &party.into())
                .await,
        ),
        Commands::Delete { collection, id } => match collection {
            Collection::Party(kind) => report(client.delete_party(kind, RecordId(id)).await),
            Collection::Songs => report(client.delete_song(RecordId(id)).await),
        },
        Commands::AddSong { song } => report(client.create_song(&song.into()).await),
        Commands::UpdateSong { id, song } => {
            report(client.update_song(RecordId(id), &song.into()).await)
        }
        Commands::Search { term } => {
            report(client.search_songs(term.as_deref().unwrap_or("")).await)
        }
    }
}

/// Flags win over the environment; with neither flag set the environment
/// (or its defaults) decides.
fn client_config(
    api_url: Option<String>,
    local_dir: Option<String>,
) -> Result<ClientConfig, String> {
    match (api_url, local_dir) {
        (_, Some(dir)) => Ok(ClientConfig::local(dir)),
        (Some(url), None) => Ok(ClientConfig::http(url)),
        (None, None) => ClientConfig::from_env().map_err(|e| e.to_string()),
    }
}

/// Print a result and map it to an exit code.
fn report<T: Serialize>(result: Result<T, ClientError>) -> i32 {
    match result {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(json) => {
                println!("{}", json);
                0
            }
            Err(e) => {
                eprintln!("Error: failed to serialize result: {}", e);
                2
            }
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.is_user_error() {
                1
            } else {
                2
            }
        }
    }
}

fn parse_collection(s: &str) -> Result<Collection, String> {
    if s == "songs" {
        return Ok(Collection::Songs);
    }
    PartyKind::from_collection(s)
        .map(Collection::Party)
        .ok_or_else(|| {
            format!(
                "unknown collection '{}', expected \
                 singers/composers/record-companies/customers/songs",
                s
            )
        })
}

/// Accepts the collection segment or its singular form ("singer", "record-company").
fn parse_party_kind(s: &str) -> Result<PartyKind, String> {
    PartyKind::from_collection(s)
        .or_else(|| PartyKind::from_collection(&format!("{}s", s)))
        .or_else(|| PartyKind::from_collection(&format!("{}ies", s.trim_end_matches('y'))))
        .ok_or_else(|| {
            format!(
                "unknown kind '{}', expected singer/composer/record-company/customer",
                s
            )
        })
}
