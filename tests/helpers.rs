// Shared test helpers for resolver fakes, record builders and database setup.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::path::{Path, PathBuf};

use subresolve::{BulkResolver, Reason, Record, ResolveError, ResolveJob, ResolveState};

/// Resolver that writes canned massdns output instead of spawning a process.
#[allow(dead_code)] // Used by other test files
pub struct CannedResolver {
    output: String,
}

#[allow(dead_code)]
impl CannedResolver {
    pub fn new(lines: &[&str]) -> Self {
        let mut output = lines.join("\n");
        output.push('\n');
        CannedResolver { output }
    }
}

impl BulkResolver for CannedResolver {
    async fn resolve(&self, job: &ResolveJob) -> Result<(), ResolveError> {
        std::fs::write(&job.output, &self.output).map_err(|source| ResolveError::ArtifactWrite {
            path: job.output.clone(),
            source,
        })
    }
}

/// massdns output line answering `name` with one A record.
#[allow(dead_code)]
pub fn a_line(name: &str, ip: &str, ttl: u32) -> String {
    format!(
        r#"{{"name":"{name}.","status":"NOERROR","data":{{"answers":[{{"ttl":{ttl},"type":"A","class":"IN","name":"{name}.","data":"{ip}"}}]}},"resolver":"8.8.8.8:53"}}"#
    )
}

/// A record that already carries resolution data.
#[allow(dead_code)]
pub fn resolved_record(name: &str, ip: &str) -> Record {
    Record {
        ip: ip.into(),
        cname: name.into(),
        ttl: "600".into(),
        resolve: ResolveState::Success,
        reason: Some(Reason::Ok),
        source: Some("CrtshQuery".into()),
        ..Record::new(name)
    }
}

/// Writes records as JSON Lines to `dir/name` and returns the path.
#[allow(dead_code)]
pub fn write_input(dir: &Path, name: &str, records: &[Record]) -> PathBuf {
    let path = dir.join(name);
    let body: String = records
        .iter()
        .map(|r| serde_json::to_string(r).expect("Failed to serialize record") + "\n")
        .collect();
    std::fs::write(&path, body).expect("Failed to write input file");
    path
}
