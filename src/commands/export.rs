use crate::api::{self, Mode, Receivables};
use crate::args::ExportArgs;
use crate::commands::Out;
use crate::export::{default_file_name, write_spreadsheet};
use crate::model::TARGET_COLUMNS;
use crate::normalize::normalize;
use crate::{CompanyCredential, Config, Result};
use anyhow::Context;
use chrono::{Days, Local, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// How dates travel on the wire and in the CLI.
const DATE_FORMAT: &str = "%d/%m/%Y";

/// Structured result of a successful export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    company: String,
    operations: usize,
    columns: usize,
    path: PathBuf,
}

/// Runs the whole sequence for one company: resolve credentials, log in, fetch the operations
/// for the due-date window, normalize them, and write the remittance spreadsheet.
///
/// An empty fetch result is not an error: the command returns a "nothing to export" message and
/// no file is written.
pub async fn export(config: &Config, mode: Mode, args: ExportArgs) -> Result<Out<ExportSummary>> {
    let credential = config.company(args.company())?;
    let mut client = api::receivables(credential, mode)?;
    export_inner(credential, &args, client.as_mut(), Local::now().naive_local()).await
}

async fn export_inner(
    credential: &CompanyCredential,
    args: &ExportArgs,
    client: &mut (dyn Receivables + Send),
    now: NaiveDateTime,
) -> Result<Out<ExportSummary>> {
    let (start, end) = resolve_window(args.start(), args.end(), now.date())?;

    info!("Authenticating as '{}'", credential.label());
    client.login().await?;

    info!(
        "Fetching operations due between {start} and {end}, write-off flag {}",
        args.write_off()
    );
    let payload = client.fetch(&start, &end, args.write_off()).await?;

    let rows = normalize(&payload);
    debug!("Normalized {} operations", rows.len());
    if rows.is_empty() {
        return Ok("Nothing to export: the API returned no operations for this window".into());
    }

    let path = match args.output() {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(default_file_name(credential.name(), now)),
    };
    write_spreadsheet(&rows, credential.code(), &path, now)?;

    let summary = ExportSummary {
        company: credential.label().to_string(),
        operations: rows.len(),
        columns: TARGET_COLUMNS.len(),
        path: path.clone(),
    };
    Ok(Out::new(
        format!(
            "Exported {} operations to '{}'. Remember to manually remove the operations that \
            already exist downstream (PROCV).",
            rows.len(),
            path.display()
        ),
        summary,
    ))
}

/// Resolves the due-date window. Both bounds are `dd/mm/yyyy`; when omitted, the end of the
/// window is 120 days before `today` and the start is one week before the end.
fn resolve_window(
    start: Option<&str>,
    end: Option<&str>,
    today: NaiveDate,
) -> Result<(String, String)> {
    let end_date = match end {
        Some(s) => parse_date(s).context("Invalid --end date")?,
        None => today - Days::new(120),
    };
    let start_date = match start {
        Some(s) => parse_date(s).context("Invalid --start date")?,
        None => end_date - Days::new(7),
    };
    if start_date > end_date {
        anyhow::bail!(
            "The start of the window ({}) is after its end ({})",
            start_date.format(DATE_FORMAT),
            end_date.format(DATE_FORMAT)
        );
    }
    Ok((
        start_date.format(DATE_FORMAT).to_string(),
        end_date.format(DATE_FORMAT).to_string(),
    ))
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .with_context(|| format!("'{s}' does not parse as dd/mm/yyyy"))
}
