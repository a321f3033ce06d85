//! Resource command handlers
//!
//! Listing, viewing and editing installs, leads and customers. Every
//! resource kind shares the same subcommands; the kind decides the endpoint,
//! the searchable fields and the status field.

use anyhow::{Context, Result};
use bpm_client::BpmClient;
use bpm_core::domain::log::LogEntry;
use bpm_core::domain::record::{RawRecord, Record};
use bpm_core::domain::resource::ResourceKind;
use bpm_core::query::{FilterCondition, ListOptions, QueryResult, SortSpec};
use clap::Subcommand;
use colored::*;
use serde_json::Value;

use crate::config::Config;
use crate::types::{parse_assignment, parse_filter};

/// Subcommands available for every resource kind
#[derive(Subcommand)]
pub enum ResourceCommands {
    /// List one page of records
    List {
        /// Free-text search across name, contact and address fields
        #[arg(short, long)]
        query: Option<String>,

        /// Status bucket to show ("all" shows every status)
        #[arg(short, long)]
        view: Option<String>,

        /// Field filter as FIELD:OPERATOR:VALUE (repeatable)
        #[arg(short, long, value_parser = parse_filter)]
        filter: Vec<FilterCondition>,

        /// Field to sort by
        #[arg(short, long)]
        sort_by: Option<String>,

        /// Sort descending
        #[arg(long, requires = "sort_by")]
        desc: bool,

        /// Compare text case-insensitively when sorting
        #[arg(long, requires = "sort_by")]
        ignore_case: bool,

        /// Zero-based page index
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        page: i64,

        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one record
    Get {
        /// Record ID
        id: String,

        /// Print the raw record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a record from a JSON object
    Create {
        /// Record body, e.g. '{"name": "Jane Doe"}'
        #[arg(short, long)]
        data: String,
    },
    /// Change fields of a record
    Update {
        /// Record ID
        id: String,

        /// Field assignment as FIELD=value (repeatable)
        #[arg(short, long = "set", value_parser = parse_assignment, required = true)]
        set: Vec<(String, Value)>,
    },
    /// Append an audit log entry
    Log {
        /// Record ID
        id: String,

        /// Entry text
        #[arg(short, long)]
        content: String,

        /// Action the entry records (e.g. "call", "note")
        #[arg(short, long)]
        action: String,
    },
    /// Show the audit log
    Logs {
        /// Record ID
        id: String,
    },
}

/// Handle resource commands
///
/// # Arguments
/// * `kind` - The resource kind the command targets
/// * `command` - The resource command to execute
/// * `client` - The API client
/// * `config` - The CLI configuration
pub async fn handle_resource_command(
    kind: ResourceKind,
    command: ResourceCommands,
    client: &BpmClient,
    config: &Config,
) -> Result<()> {
    match command {
        ResourceCommands::List {
            query,
            view,
            filter,
            sort_by,
            desc,
            ignore_case,
            page,
            json,
        } => {
            let sort = sort_by.map(|field| {
                let spec = if desc {
                    SortSpec::desc(field)
                } else {
                    SortSpec::asc(field)
                };
                if ignore_case { spec.ignore_case() } else { spec }
            });
            let options = ListOptions {
                query,
                view,
                filters: filter,
                sort,
                page,
                page_size: config.page_size,
            };
            list_records(client, kind, &options, json).await
        }
        ResourceCommands::Get { id, json } => get_record(client, kind, &id, json).await,
        ResourceCommands::Create { data } => create_record(client, kind, &data).await,
        ResourceCommands::Update { id, set } => update_record(client, kind, &id, set).await,
        ResourceCommands::Log {
            id,
            content,
            action,
        } => append_log(client, kind, &id, &content, &action).await,
        ResourceCommands::Logs { id } => list_logs(client, kind, &id).await,
    }
}

/// List one page of records
async fn list_records(
    client: &BpmClient,
    kind: ResourceKind,
    options: &ListOptions,
    json: bool,
) -> Result<()> {
    let result = client.list_page(kind, options).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_page(kind, options, &result);
    Ok(())
}

/// Get and display a single record
async fn get_record(client: &BpmClient, kind: ResourceKind, id: &str, json: bool) -> Result<()> {
    let Some(record) = client.get_by_id(kind, id).await? else {
        println!("{}", format!("No {} found with ID {}.", kind, id).yellow());
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print_record_details(kind, &record);
    }

    Ok(())
}

/// Create a record from a JSON object
async fn create_record(client: &BpmClient, kind: ResourceKind, data: &str) -> Result<()> {
    let body: Value = serde_json::from_str(data).context("Record body is not valid JSON")?;
    let Value::Object(body) = body else {
        anyhow::bail!("Record body must be a JSON object");
    };

    let created = client.create(kind, &body).await?;

    println!("{}", format!("✓ Created {}", kind).green().bold());
    if let Some(id) = created.get("id") {
        println!("  ID: {}", display_value(id).cyan());
    }

    Ok(())
}

/// Send changed fields and report whether the backend applied them
async fn update_record(
    client: &BpmClient,
    kind: ResourceKind,
    id: &str,
    set: Vec<(String, Value)>,
) -> Result<()> {
    let changes: RawRecord = set.into_iter().collect();
    let meta = client.update(kind, id, &changes).await?;

    if !meta.is_updated() {
        anyhow::bail!("{} {} was not updated (status {})", kind, id, meta.status);
    }

    println!("{}", format!("✓ Updated {} {}", kind, id).green().bold());
    for (field, value) in &changes {
        println!("  {} = {}", field.cyan(), display_value(value));
    }

    Ok(())
}

/// Append an audit log entry
async fn append_log(
    client: &BpmClient,
    kind: ResourceKind,
    id: &str,
    content: &str,
    action: &str,
) -> Result<()> {
    let meta = client.append_log(kind, id, content, action).await?;

    println!(
        "{} {}",
        format!("✓ Logged {} on {} {}", action, kind, id).green(),
        format!("(status {})", meta.status).dimmed()
    );

    Ok(())
}

/// Show the audit log of a record
async fn list_logs(client: &BpmClient, kind: ResourceKind, id: &str) -> Result<()> {
    let logs = client.list_logs(kind, id).await?;

    if logs.is_empty() {
        println!("{}", format!("No log entries for {} {}.", kind, id).yellow());
    } else {
        println!("{}", format!("Log for {} {}:", kind, id).bold());
        println!("{}", "─".repeat(80).dimmed());
        for entry in &logs {
            print_log_entry(entry);
        }
        println!("{}", "─".repeat(80).dimmed());
    }

    Ok(())
}

/// Number of pages needed for `total` rows
fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size).max(1)
}

/// Display name of a record: `name`, or first and last name for leads
pub fn record_title(fields: &RawRecord) -> String {
    if let Some(name) = fields.get("name").and_then(Value::as_str) {
        return name.to_string();
    }

    let first = fields.get("first_name").and_then(Value::as_str).unwrap_or("");
    let last = fields.get("last_name").and_then(Value::as_str).unwrap_or("");
    let full = format!("{} {}", first, last).trim().to_string();

    if full.is_empty() {
        "(unnamed)".to_string()
    } else {
        full
    }
}

/// Render a JSON scalar without quotes
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

fn print_page(kind: ResourceKind, options: &ListOptions, result: &QueryResult) {
    if result.items.is_empty() {
        if result.total_count == 0 {
            println!("{}", format!("No {}s found.", kind).yellow());
        } else {
            println!(
                "{}",
                format!(
                    "Page {} is past the end ({} matching {}s).",
                    options.page + 1,
                    result.total_count,
                    kind
                )
                .yellow()
            );
        }
        return;
    }

    println!(
        "{}",
        format!(
            "Showing {} of {} {}(s), page {} of {}:",
            result.items.len(),
            result.total_count,
            kind,
            options.page + 1,
            page_count(result.total_count, options.page_size)
        )
        .bold()
    );
    println!();
    for record in &result.items {
        print_record_summary(kind, record);
    }
}

fn print_record_summary(kind: ResourceKind, record: &Record) {
    let id = record.id().map(display_value).unwrap_or_else(|| "-".to_string());
    let status = record
        .raw(kind.profile().status_field)
        .map(display_value)
        .unwrap_or_else(|| "-".to_string());

    println!("  {} {} {}", "▸".cyan(), id.dimmed(), record_title(record.fields()).bold());
    println!("    Status:  {}", status.cyan());
    if let Some(address) = record.text("address") {
        println!("    Address: {}", address);
    }
    println!(
        "    Updated: {}",
        record
            .last_updated()
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    println!();
}

fn print_record_details(kind: ResourceKind, record: &RawRecord) {
    println!("{}", format!("{} {}", kind, record_title(record)).bold());
    for (field, value) in record {
        println!("  {:<20} {}", format!("{}:", field), display_value(value));
    }
}

fn print_log_entry(entry: &LogEntry) {
    let when = entry
        .extra
        .get("create_date")
        .and_then(Value::as_str)
        .unwrap_or("");

    println!(
        "{} [{}] {}",
        when.dimmed(),
        entry.action.to_uppercase().cyan(),
        entry.content
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> RawRecord {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_record_title_prefers_name() {
        assert_eq!(
            record_title(&fields(json!({ "name": "Smith Residence", "first_name": "Al" }))),
            "Smith Residence"
        );
    }

    #[test]
    fn test_record_title_for_leads() {
        assert_eq!(
            record_title(&fields(json!({ "first_name": "Mary", "last_name": "Brown" }))),
            "Mary Brown"
        );
        assert_eq!(record_title(&fields(json!({ "id": 4 }))), "(unnamed)");
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(5, 2), 3);
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("PTC")), "PTC");
        assert_eq!(display_value(&json!(12)), "12");
        assert_eq!(display_value(&Value::Null), "-");
    }
}
