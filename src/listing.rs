//! Fetch-and-render glue for the host's entity listings. No decision logic:
//! each call is one proxied request decoded into records for a table.

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::capability::{Capability, FetchOptions};

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    data: Option<T>,
}

#[derive(Debug, Default, Deserialize)]
struct TeamsPayload {
    #[serde(default)]
    teams: Vec<TeamRecord>,
}

#[derive(Debug, Default, Deserialize)]
struct ListPayload<T> {
    #[serde(default)]
    list: Vec<T>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TeamRecord {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub owner: String,

    /// Epoch microseconds, as the host reports it.
    #[serde(rename = "createTime", default)]
    pub create_time: i64,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub email: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ProjectRecord {
    pub id: String,
    pub name: String,

    #[serde(rename = "createTime", default)]
    pub create_time: i64,
}

pub async fn fetch_teams(capability: &dyn Capability) -> Result<Vec<TeamRecord>> {
    let payload: Envelope<TeamsPayload> =
        fetch_decoded(capability, "/v2/account/teams").await?;
    Ok(payload.data.unwrap_or_default().teams)
}

pub async fn fetch_users(capability: &dyn Capability, team_id: &str) -> Result<Vec<UserRecord>> {
    let payload: Envelope<ListPayload<UserRecord>> = fetch_decoded(
        capability,
        &format!("/v2/account/users/search?teamID={team_id}"),
    )
    .await?;
    Ok(payload.data.unwrap_or_default().list)
}

pub async fn fetch_projects(
    capability: &dyn Capability,
    team_id: &str,
) -> Result<Vec<ProjectRecord>> {
    let payload: Envelope<ListPayload<ProjectRecord>> = fetch_decoded(
        capability,
        &format!("/v2/project/projects?teamID={team_id}"),
    )
    .await?;
    Ok(payload.data.unwrap_or_default().list)
}

async fn fetch_decoded<T: serde::de::DeserializeOwned>(
    capability: &dyn Capability,
    path: &str,
) -> Result<T> {
    let resp = capability
        .fetch(path, FetchOptions::default())
        .await
        .with_context(|| format!("fetch {path}"))?;
    ensure!(
        resp.status() < 400,
        "{path} failed: {} {}",
        resp.status(),
        resp.status_text()
    );
    let body = resp.json().with_context(|| format!("decode {path}"))?;
    serde_json::from_value(body).with_context(|| format!("decode {path}"))
}

/// Render the host's epoch-microsecond timestamps as `YYYY-MM-DD HH:MM`.
pub fn format_create_time(micros: i64) -> String {
    match OffsetDateTime::from_unix_timestamp(micros / 1_000_000) {
        Ok(dt) => format!(
            "{:04}-{:02}-{:02} {:02}:{:02}",
            dt.year(),
            dt.month() as u8,
            dt.day(),
            dt.hour(),
            dt.minute()
        ),
        Err(_) => "-".to_string(),
    }
}

/// Plain column-aligned text table.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    let fmt_row = |cells: &[String], widths: &[usize]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{:<width$}", c, width = widths.get(i).copied().unwrap_or(0)))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    out.push_str(&fmt_row(&header_cells, &widths));
    out.push('\n');
    for row in rows {
        out.push_str(&fmt_row(row, &widths));
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "tests/listing_tests.rs"]
mod tests;
