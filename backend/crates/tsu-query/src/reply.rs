use crate::{QueryError, QueryResult, unescape};

use std::collections::HashMap;

/// One `key=value key=value` entry of a reply. Entries are separated by `|`.
pub type Record = HashMap<String, String>;

/// Parse the data lines of a reply into records.
pub fn parse_records(data: &str) -> Vec<Record> {
    data.split('|')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .split(' ')
                .filter(|param| !param.is_empty())
                .map(|param| match param.split_once('=') {
                    Some((key, value)) => (key.to_string(), unescape(value)),
                    None => (param.to_string(), String::new()),
                })
                .collect()
        })
        .collect()
}

/// Status line closing every reply: `error id=0 msg=ok`.
pub(crate) fn parse_status(line: &str) -> QueryResult<()> {
    let Some(params) = line.strip_prefix("error ") else {
        return Err(QueryError::protocol(format!(
            "expected status line, got '{}'",
            line
        )));
    };

    let record = parse_records(params).into_iter().next().unwrap_or_default();

    let id = record
        .get("id")
        .ok_or_else(|| QueryError::missing_field("id"))?
        .parse::<u32>()
        .map_err(|_| QueryError::protocol(format!("invalid status id in '{}'", line)))?;

    if id != 0 {
        return Err(QueryError::server(
            id,
            record.get("msg").cloned().unwrap_or_default(),
        ));
    }

    Ok(())
}

/// Reply to the `version` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerVersion {
    pub version: String,
    pub build: Option<String>,
    pub platform: Option<String>,
}

impl ServerVersion {
    pub fn from_records(records: &[Record]) -> QueryResult<Self> {
        let record = records
            .first()
            .ok_or_else(|| QueryError::protocol("empty version reply"))?;

        let version = record
            .get("version")
            .filter(|v| !v.is_empty())
            .cloned()
            .ok_or_else(|| QueryError::missing_field("version"))?;

        Ok(Self {
            version,
            build: record.get("build").cloned(),
            platform: record.get("platform").cloned(),
        })
    }
}
