//! Bulk resolver invocation.
//!
//! Writes the candidate artifact and drives the external bulk resolver (massdns)
//! to completion. The process is reached only through [`BulkResolver`], so tests
//! can substitute an in-memory implementation that never spawns anything.

use std::ffi::OsString;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::{
    MassDnsConfig, ADDRESS_RECORD_TYPE, ARTIFACT_TIMESTAMP_FORMAT, MASSDNS_BINARY,
};
use crate::error_handling::ResolveError;

/// Artifact locations for one domain's resolution attempt.
///
/// Names are qualified by domain and timestamp so runs for different domains
/// never collide. Nothing prevents two concurrent runs for the same domain in the
/// same second from colliding; callers must not do that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveJob {
    /// Newline-delimited candidate hostnames (resolver input)
    pub candidates: PathBuf,
    /// Line-delimited JSON written by the resolver
    pub output: PathBuf,
    /// Resolver error log, kept apart from normal output
    pub error_log: PathBuf,
}

impl ResolveJob {
    /// Artifact paths for `domain`: candidates and output under `temp_dir`, the
    /// massdns error log under `log_dir`.
    pub fn for_domain(temp_dir: &Path, log_dir: &Path, domain: &str, timestamp: &str) -> Self {
        ResolveJob {
            candidates: temp_dir.join(format!("collected_subdomains_{domain}_{timestamp}.txt")),
            output: temp_dir.join(format!("resolved_result_{domain}_{timestamp}.json")),
            error_log: log_dir.join(format!("massdns_{domain}_{timestamp}.log")),
        }
    }

    /// Same as [`ResolveJob::for_domain`], stamped with the current local time.
    pub fn timestamped(temp_dir: &Path, log_dir: &Path, domain: &str) -> Self {
        let timestamp = chrono::Local::now()
            .format(ARTIFACT_TIMESTAMP_FORMAT)
            .to_string();
        Self::for_domain(temp_dir, log_dir, domain, &timestamp)
    }
}

/// An external bulk resolver.
///
/// `resolve` reads `job.candidates`, writes `job.output` and must not return
/// before the resolver has finished writing.
pub trait BulkResolver {
    /// Resolves every hostname in `job.candidates` into `job.output`.
    fn resolve(&self, job: &ResolveJob) -> impl Future<Output = Result<(), ResolveError>> + Send;
}

/// massdns driven as a child process with a fixed flag set.
#[derive(Debug, Clone)]
pub struct MassDns {
    config: MassDnsConfig,
}

impl MassDns {
    /// Creates a resolver that runs massdns with `config`.
    pub fn new(config: MassDnsConfig) -> Self {
        MassDns { config }
    }

    /// Locates the massdns binary.
    ///
    /// An explicitly configured path must exist as a file; otherwise `PATH` is searched.
    pub fn locate_binary(&self) -> Result<PathBuf, ResolveError> {
        if let Some(binary) = &self.config.binary {
            return if binary.is_file() {
                Ok(binary.clone())
            } else {
                Err(ResolveError::ResolverBinaryMissing(binary.clone()))
            };
        }

        let file_name = format!("{MASSDNS_BINARY}{}", std::env::consts::EXE_SUFFIX);
        std::env::var_os("PATH")
            .and_then(|paths| {
                std::env::split_paths(&paths)
                    .map(|dir| dir.join(&file_name))
                    .find(|candidate| candidate.is_file())
            })
            .ok_or_else(|| ResolveError::ResolverBinaryMissing(PathBuf::from(file_name)))
    }

    /// Builds the massdns argument list for `job`.
    ///
    /// Only A queries, successful answers only, JSON (`J`) output, socket buffers
    /// left at the system default.
    pub fn build_args(&self, job: &ResolveJob) -> Vec<OsString> {
        let c = &self.config;
        vec![
            "--quiet".into(),
            "--status-format".into(),
            "ansi".into(),
            "--processes".into(),
            c.processes.to_string().into(),
            "--socket-count".into(),
            c.socket_count.to_string().into(),
            "--hashmap-size".into(),
            c.hashmap_size.to_string().into(),
            "--resolvers".into(),
            c.resolvers.clone().into(),
            "--resolve-count".into(),
            c.resolve_count.to_string().into(),
            "--type".into(),
            ADDRESS_RECORD_TYPE.into(),
            "--flush".into(),
            "--output".into(),
            "J".into(),
            "--outfile".into(),
            job.output.clone().into(),
            "--root".into(),
            "--error-log".into(),
            job.error_log.clone().into(),
            job.candidates.clone().into(),
            "--filter".into(),
            "OK".into(),
            "--sndbuf".into(),
            "0".into(),
            "--rcvbuf".into(),
            "0".into(),
        ]
    }
}

impl BulkResolver for MassDns {
    async fn resolve(&self, job: &ResolveJob) -> Result<(), ResolveError> {
        let binary = self.locate_binary()?;
        let args = self.build_args(job);
        log::info!("Running massdns to resolve subdomains");
        log::debug!("{} {:?}", binary.display(), args);

        let status = Command::new(&binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| ResolveError::InvocationFailed {
                binary: binary.clone(),
                source,
            })?;

        if !status.success() {
            return Err(ResolveError::ResolverExited { binary, status });
        }
        Ok(())
    }
}

/// Writes the candidate artifact: one hostname per line, newline-terminated.
///
/// The parent directory is created if it does not exist yet.
pub async fn write_candidates(path: &Path, candidates: &[String]) -> Result<(), ResolveError> {
    log::debug!("Saving {} candidate subdomains", candidates.len());
    let to_err = |source| ResolveError::ArtifactWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(to_err)?;
    }

    let mut body = String::with_capacity(candidates.iter().map(|c| c.len() + 1).sum());
    for candidate in candidates {
        body.push_str(candidate);
        body.push('\n');
    }

    let mut file = tokio::fs::File::create(path).await.map_err(to_err)?;
    file.write_all(body.as_bytes()).await.map_err(to_err)?;
    file.flush().await.map_err(to_err)?;
    Ok(())
}

/// Writes the candidates and runs the resolver to completion.
///
/// Returns the output artifact path; it is only handed out after the resolver
/// has exited, so no parsing can start early.
pub async fn invoke_resolver<R: BulkResolver>(
    resolver: &R,
    job: &ResolveJob,
    candidates: &[String],
) -> Result<PathBuf, ResolveError> {
    write_candidates(&job.candidates, candidates).await?;
    if let Some(parent) = job.error_log.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| ResolveError::ArtifactWrite {
                path: job.error_log.clone(),
                source,
            })?;
    }
    resolver.resolve(job).await?;
    Ok(job.output.clone())
}
