//! Document subcommands.

use std::io::Write;

use docket_core::{Attributes, DocumentId, Error as CoreError, UuidVersion};
use docket_query::ListQuery;
use docket_resource::Resource;
use docket_storage::FileStore;
use serde::Serialize;
use serde_json::Value;

use crate::cli::Command;
use crate::config::DocketConfig;
use crate::error::{Error, Result};
use crate::session::CliSession;

/// The resource every document subcommand runs against.
pub type CliResource = Resource<Attributes, CliSession>;

/// Open the configured resource: a file store guarded by the configured
/// policy.
pub async fn open_resource(config: &DocketConfig) -> Result<CliResource> {
    let path = config.data_file()?;
    let store = FileStore::open(&path).await?;
    tracing::debug!(
        resource = %config.resource.name,
        path = %path.display(),
        "opened resource"
    );
    Ok(Resource::new(
        config.resource.name.clone(),
        store,
        config.policy.clone().into_controller(),
    ))
}

/// Run a document subcommand, printing JSON results to `out`.
///
/// `config` subcommands are handled elsewhere and rejected here.
pub async fn execute<W: Write>(
    resource: &CliResource,
    session: &CliSession,
    command: Command,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::Create { attributes } => {
            let created = resource.create(session, parse_attributes(&attributes)?).await?;
            print_json(out, &created)
        }
        Command::Read { id } => {
            let document = resource.read(session, &parse_id(&id)?).await?;
            print_json(out, &document)
        }
        Command::Replace { id, attributes } => {
            let document = resource
                .replace(session, &parse_id(&id)?, parse_attributes(&attributes)?)
                .await?;
            print_json(out, &document)
        }
        Command::Patch { id, attributes } => {
            let document = resource
                .patch(session, &parse_id(&id)?, parse_attributes(&attributes)?)
                .await?;
            print_json(out, &document)
        }
        Command::Destroy { id } => {
            resource.destroy(session, &parse_id(&id)?).await?;
            Ok(())
        }
        Command::List { filter, conditions } => {
            let query = parse_query(filter.as_deref(), &conditions)?;
            let documents = resource.list(session, &query).await?;
            print_json(out, &documents)
        }
        Command::Config { .. } => Err(Error::config("config subcommands need no resource")),
    }
}

/// Parse a JSON object of attributes.
pub fn parse_attributes(raw: &str) -> Result<Attributes> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        _ => Err(CoreError::bad_request("attributes must be a JSON object").into()),
    }
}

/// Parse a document id. Ids are UUIDs of any version.
pub fn parse_id(raw: &str) -> Result<DocumentId> {
    Ok(DocumentId::parse_uuid(raw.trim(), UuidVersion::Any)?)
}

/// Build a list query from `--filter` JSON and `--where key=value` pairs.
pub fn parse_query(filter: Option<&str>, conditions: &[String]) -> Result<ListQuery> {
    let mut query = match filter {
        Some(raw) => ListQuery::from_json(&serde_json::from_str(raw)?)?,
        None => ListQuery::new(),
    };

    let pairs = conditions
        .iter()
        .map(|c| {
            c.split_once('=').ok_or_else(|| {
                CoreError::bad_request(format!("condition '{c}' is not KEY=VALUE"))
            })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    for expression in ListQuery::from_pairs(pairs)?.filters() {
        query = query.with(expression.clone());
    }
    Ok(query)
}

fn print_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    writeln!(out, "{json}").map_err(|e| Error::io_with_path(e, "<stdout>"))
}
