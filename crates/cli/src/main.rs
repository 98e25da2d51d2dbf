use becc_core::config::{
    list_limits_from_env_values, media_dir_from_env_value, site_data_dir_from_env_value,
};
use becc_core::constants::{
    BLOG_COLLECTION, DONATIONS_COLLECTION, EVENTS_COLLECTION, GALLERY_COLLECTION,
    MESSAGES_COLLECTION, PARTNERS_COLLECTION, PILLARS_COLLECTION, PROJECTS_COLLECTION,
    TEAM_COLLECTION, VOLUNTEERS_COLLECTION,
};
use becc_core::entities::{
    BlogPost, ContactMessage, CoreValue, Donation, Event, GalleryPhoto, MediaItem, Partner,
    Pillar, Project, TeamMember, VolunteerApplication,
};
use becc_core::{CoreConfig, FormData, ListItem, RecordId, SiteService};
use clap::{Parser, Subcommand, ValueEnum};
use list_field::ListFieldResult;
use serde::Serialize;
use std::env;
use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

/// Field name reported in codec errors raised from the command line.
const CLI_FIELD: &str = "items";

const COLLECTIONS: [&str; 10] = [
    PILLARS_COLLECTION,
    PROJECTS_COLLECTION,
    EVENTS_COLLECTION,
    PARTNERS_COLLECTION,
    TEAM_COLLECTION,
    BLOG_COLLECTION,
    GALLERY_COLLECTION,
    VOLUNTEERS_COLLECTION,
    DONATIONS_COLLECTION,
    MESSAGES_COLLECTION,
];

#[derive(Parser)]
#[command(name = "becc")]
#[command(about = "BECC site data CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the records of a collection as JSON
    List {
        /// Collection name (pillars, projects, events, ...)
        collection: String,
    },
    /// Show the organisation profile
    ShowOrg,
    /// Encode items into a list field transport string
    EncodeList {
        /// Items, in order; blank items are dropped
        items: Vec<String>,
    },
    /// Decode a list field transport string and print the normalised items
    DecodeList {
        /// The raw transport string, e.g. '["a","b"]'
        raw: String,
        /// Shape of each item
        #[arg(long, value_enum, default_value_t = ItemKind::Text)]
        kind: ItemKind,
    },
    /// Print the initial edit-form values of a stored record
    SeedForm {
        /// Collection name
        collection: String,
        /// Record id (32 lowercase hex characters)
        id: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ItemKind {
    /// Plain strings (activities, impact)
    Text,
    /// `{"title", "description"}` objects
    CoreValue,
    /// `{"mediaRef", "caption", "title", "order"}` objects
    Media,
}

type CliResult<T> = Result<T, Box<dyn Error>>;

/// Runs `$body` with `$R` bound to the record type of the named collection.
macro_rules! with_collection {
    ($name:expr, $R:ident => $body:expr) => {
        match $name {
            PILLARS_COLLECTION => { type $R = Pillar; $body }
            PROJECTS_COLLECTION => { type $R = Project; $body }
            EVENTS_COLLECTION => { type $R = Event; $body }
            PARTNERS_COLLECTION => { type $R = Partner; $body }
            TEAM_COLLECTION => { type $R = TeamMember; $body }
            BLOG_COLLECTION => { type $R = BlogPost; $body }
            GALLERY_COLLECTION => { type $R = GalleryPhoto; $body }
            VOLUNTEERS_COLLECTION => { type $R = VolunteerApplication; $body }
            DONATIONS_COLLECTION => { type $R = Donation; $body }
            MESSAGES_COLLECTION => { type $R = ContactMessage; $body }
            other => Err(format!(
                "unknown collection '{}'; expected one of: {}",
                other,
                COLLECTIONS.join(", ")
            )
            .into()),
        }
    };
}

fn site_from_env() -> CliResult<SiteService> {
    let site_data_dir = site_data_dir_from_env_value(env::var("SITE_DATA_DIR").ok());
    let media_dir = media_dir_from_env_value(&site_data_dir, env::var("BECC_MEDIA_DIR").ok());
    let list_limits = list_limits_from_env_values(
        env::var("BECC_MAX_LIST_ITEMS").ok(),
        env::var("BECC_MAX_LIST_ITEM_CHARS").ok(),
    )?;
    let cfg = CoreConfig::new(site_data_dir, media_dir, list_limits)?;
    Ok(SiteService::new(Arc::new(cfg)))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_form(form: &FormData) {
    for (name, value) in form.iter() {
        println!("{name}={value}");
    }
}

/// Normalises then encodes command-line items.
fn encode_items(items: Vec<String>) -> ListFieldResult<String> {
    list_field::encode(CLI_FIELD, &list_field::normalize(items))
}

fn decode_items<T: ListItem>(raw: &str) -> ListFieldResult<Vec<T>> {
    list_field::decode(CLI_FIELD, raw).map(list_field::normalize)
}

fn run(command: Commands) -> CliResult<()> {
    match command {
        Commands::List { collection } => {
            let site = site_from_env()?;
            with_collection!(collection.as_str(), R => {
                let records = site.list::<R>()?;
                if records.is_empty() {
                    println!("No {collection} found.");
                    Ok(())
                } else {
                    print_json(&records)
                }
            })
        }
        Commands::ShowOrg => match site_from_env()?.organisation()? {
            Some(info) => print_json(&info),
            None => {
                println!("No organisation profile saved.");
                Ok(())
            }
        },
        Commands::EncodeList { items } => {
            println!("{}", encode_items(items)?);
            Ok(())
        }
        Commands::DecodeList { raw, kind } => match kind {
            ItemKind::Text => print_json(&decode_items::<String>(&raw)?),
            ItemKind::CoreValue => print_json(&decode_items::<CoreValue>(&raw)?),
            ItemKind::Media => print_json(&decode_items::<MediaItem>(&raw)?),
        },
        Commands::SeedForm { collection, id } => {
            let site = site_from_env()?;
            let id = RecordId::parse(&id)?;
            with_collection!(collection.as_str(), R => {
                print_form(&site.edit_form::<R>(&id)?);
                Ok(())
            })
        }
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'becc --help' for commands");
        return ExitCode::SUCCESS;
    };

    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
