//! Resolver output classification.
//!
//! massdns (`--output J`) writes one JSON object per resolved query:
//!
//! ```text
//! {"name":"www.example.com.","type":"A","class":"IN","status":"NOERROR",
//!  "data":{"answers":[{"ttl":600,"type":"A","class":"IN","name":"www.example.com.","data":"192.0.2.1"}]},
//!  "resolver":"4.2.2.4:53"}
//! ```
//!
//! Each line is turned into at most one [`Classification`], keyed by the query
//! name without its trailing root dot.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use serde::Deserialize;

use crate::config::{ADDRESS_RECORD_TYPE, DNS_STATUS_NOERROR};
use crate::error_handling::{OutcomeType, ResolveError, ResolveStats};
use crate::models::Reason;

#[derive(Debug, Deserialize)]
struct OutputLine {
    name: String,
    status: String,
    #[serde(default)]
    data: Option<ResponseData>,
    #[serde(default)]
    resolver: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(default)]
    answers: Option<Vec<Answer>>,
}

#[derive(Debug, Deserialize)]
struct Answer {
    #[serde(default)]
    ttl: u64,
    #[serde(rename = "type")]
    record_type: String,
    name: String,
    data: String,
}

/// Address answers of one output line, kept in lock-step.
///
/// The only way to add to it is [`AddressAnswers::push`], so `cname`, `ip` and
/// `ttl` always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressAnswers {
    cname: Vec<String>,
    ip: Vec<String>,
    ttl: Vec<String>,
}

impl AddressAnswers {
    /// Appends one A answer: the name it was found under, its address and TTL.
    pub fn push(&mut self, cname: String, ip: String, ttl: String) {
        self.cname.push(cname);
        self.ip.push(ip);
        self.ttl.push(ttl);
    }

    /// True when no A answer was pushed.
    pub fn is_empty(&self) -> bool {
        self.ip.is_empty()
    }

    /// Owner names of the A answers, lowercased without the root dot.
    pub fn cname(&self) -> &[String] {
        &self.cname
    }

    /// IPv4 addresses, aligned with [`AddressAnswers::cname`].
    pub fn ip(&self) -> &[String] {
        &self.ip
    }

    /// TTLs as decimal strings, aligned with [`AddressAnswers::ip`].
    pub fn ttl(&self) -> &[String] {
        &self.ttl
    }
}

/// Resolution outcome for one hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// At least one A answer.
    Ok {
        /// Upstream server that answered (`address:port`)
        resolver: Option<String>,
        /// The A answers
        answers: AddressAnswers,
    },
    /// NOERROR without an answer section.
    NoAnswer {
        /// Upstream server that answered
        resolver: Option<String>,
    },
    /// Answer section present but no A answers in it (e.g. a bare CNAME chain).
    NoARecord {
        /// Upstream server that answered
        resolver: Option<String>,
    },
}

impl Classification {
    /// Reason stored on the record.
    pub fn reason(&self) -> Reason {
        match self {
            Classification::Ok { .. } => Reason::Ok,
            Classification::NoAnswer { .. } => Reason::NoAnswer,
            Classification::NoARecord { .. } => Reason::NoARecord,
        }
    }

    /// Counter bumped when this classification is merged.
    pub fn outcome(&self) -> OutcomeType {
        match self {
            Classification::Ok { .. } => OutcomeType::Ok,
            Classification::NoAnswer { .. } => OutcomeType::NoAnswer,
            Classification::NoARecord { .. } => OutcomeType::NoARecord,
        }
    }

    /// Upstream server that answered, if massdns reported one.
    pub fn resolver(&self) -> Option<&str> {
        match self {
            Classification::Ok { resolver, .. }
            | Classification::NoAnswer { resolver }
            | Classification::NoARecord { resolver } => resolver.as_deref(),
        }
    }
}

/// Hostname → classification map of one resolution attempt.
///
/// Ordered by hostname. When the resolver reports the same name more than once,
/// the later line replaces the earlier one entirely; nothing is merged across lines.
#[derive(Debug, Default)]
pub struct Classifications {
    entries: BTreeMap<String, Classification>,
    stats: ResolveStats,
}

impl Classifications {
    /// Empty map with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `classification` for `name`, returning the entry it replaced.
    pub fn record(&mut self, name: String, classification: Classification) -> Option<Classification> {
        self.entries.insert(name, classification)
    }

    /// Classification for `name` (without trailing dot).
    pub fn get(&self, name: &str) -> Option<&Classification> {
        self.entries.get(name)
    }

    /// Number of distinct hostnames classified.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no line produced a classification.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Line-level outcomes (malformed lines, skipped statuses).
    pub fn stats(&self) -> &ResolveStats {
        &self.stats
    }
}

/// What a single output line contributed.
#[derive(Debug, PartialEq, Eq)]
pub enum LineOutcome {
    /// Empty or whitespace-only line
    Blank,
    /// Not a valid output object; carries the parse error
    Malformed(String),
    /// Query answered with a status other than NOERROR
    SkippedStatus {
        /// Query name without trailing dot
        name: String,
        /// DNS status, e.g. `NXDOMAIN`
        status: String,
    },
    /// A classification for `name`
    Classified {
        /// Query name without trailing dot
        name: String,
        /// What the line says about `name`
        classification: Classification,
    },
}

/// Strips one trailing root-label dot.
pub fn normalize_name(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Classifies one line of resolver output.
pub fn classify_line(line: &[u8]) -> LineOutcome {
    let trimmed = line.trim_ascii();
    if trimmed.is_empty() {
        return LineOutcome::Blank;
    }

    let parsed: OutputLine = match serde_json::from_slice(trimmed) {
        Ok(parsed) => parsed,
        Err(e) => return LineOutcome::Malformed(e.to_string()),
    };

    let name = normalize_name(&parsed.name).to_string();
    if parsed.status != DNS_STATUS_NOERROR {
        return LineOutcome::SkippedStatus {
            name,
            status: parsed.status,
        };
    }

    let resolver = parsed.resolver;
    let Some(answers) = parsed.data.and_then(|d| d.answers) else {
        return LineOutcome::Classified {
            name,
            classification: Classification::NoAnswer { resolver },
        };
    };

    let mut addresses = AddressAnswers::default();
    for answer in answers
        .into_iter()
        .filter(|a| a.record_type == ADDRESS_RECORD_TYPE)
    {
        addresses.push(
            normalize_name(&answer.name).to_lowercase(),
            answer.data,
            answer.ttl.to_string(),
        );
    }

    let classification = if addresses.is_empty() {
        Classification::NoARecord { resolver }
    } else {
        Classification::Ok {
            resolver,
            answers: addresses,
        }
    };
    LineOutcome::Classified {
        name,
        classification,
    }
}

/// Classifies a whole resolver output stream.
///
/// Malformed lines are logged and skipped; only I/O failures abort.
pub fn classify_lines<R: BufRead>(mut reader: R) -> std::io::Result<Classifications> {
    let mut classifications = Classifications::new();
    let mut buf = Vec::with_capacity(512);
    let mut line_no = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        match classify_line(&buf) {
            LineOutcome::Blank => {}
            LineOutcome::Malformed(e) => {
                log::error!(
                    "Error parsing resolver output line {line_no} ({e}): {}, skip this line",
                    String::from_utf8_lossy(buf.trim_ascii())
                );
                classifications.stats.increment(OutcomeType::MalformedLine);
            }
            LineOutcome::SkippedStatus { name, status } => {
                log::debug!("Resolving {name}: {status}");
                classifications.stats.increment(OutcomeType::SkippedStatus);
            }
            LineOutcome::Classified {
                name,
                classification,
            } => {
                match &classification {
                    Classification::NoAnswer { .. } => {
                        log::debug!("Resolving {name}: no answers")
                    }
                    Classification::NoARecord { .. } => {
                        log::debug!("Resolving {name}: no A record")
                    }
                    Classification::Ok { .. } => {}
                }
                if let Some(previous) = classifications.record(name.clone(), classification) {
                    log::debug!(
                        "Resolving {name}: later result replaces earlier {}",
                        previous.reason()
                    );
                }
            }
        }
    }

    Ok(classifications)
}

/// Opens and classifies the resolver output artifact.
///
/// A missing artifact is read as empty output (massdns may skip creating the
/// file when nothing was answered).
pub fn classify_output(path: &Path) -> Result<Classifications, ResolveError> {
    log::info!("Processing resolved results");
    let to_err = |source| ResolveError::OutputRead {
        path: path.to_path_buf(),
        source,
    };

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("Resolver output {} does not exist", path.display());
            return Ok(Classifications::new());
        }
        Err(e) => return Err(to_err(e)),
    };
    let classifications = classify_lines(BufReader::new(file)).map_err(to_err)?;
    log::info!("Classified {} hostnames", classifications.len());
    Ok(classifications)
}
