//! Resolve pipeline tests.
//!
//! These drive `run_resolve` with an in-memory resolver that writes canned
//! massdns output instead of spawning a process.

use super::*;
use crate::models::{Reason, ResolveState};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tempfile::TempDir;

/// Writes fixed output and remembers what it was asked to resolve.
struct CannedResolver {
    output: String,
    calls: AtomicUsize,
    seen_candidates: Mutex<Option<String>>,
}

impl CannedResolver {
    fn new(lines: &[&str]) -> Self {
        let mut output = lines.join("\n");
        output.push('\n');
        CannedResolver {
            output,
            calls: AtomicUsize::new(0),
            seen_candidates: Mutex::new(None),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl BulkResolver for CannedResolver {
    async fn resolve(&self, job: &ResolveJob) -> Result<(), ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let candidates = std::fs::read_to_string(&job.candidates).unwrap();
        *self.seen_candidates.lock().unwrap() = Some(candidates);
        std::fs::write(&job.output, &self.output).unwrap();
        Ok(())
    }
}

/// Fails the way a missing massdns binary does.
struct MissingResolver;

impl BulkResolver for MissingResolver {
    async fn resolve(&self, _job: &ResolveJob) -> Result<(), ResolveError> {
        Err(ResolveError::ResolverBinaryMissing("massdns".into()))
    }
}

fn job(dir: &TempDir) -> ResolveJob {
    ResolveJob::for_domain(&dir.path().join("temp"), dir.path(), "x.com", "20240101_000000")
}

fn resolved(name: &str, ip: &str) -> Record {
    Record {
        ip: ip.into(),
        cname: name.into(),
        ttl: "600".into(),
        resolve: ResolveState::Success,
        reason: Some(Reason::Ok),
        resolver: Some("4.2.2.4:53".into()),
        source: Some("CrtshQuery".into()),
        ..Record::new(name)
    }
}

const A_LINE: &str = r#"{"name":"a.x.com.","status":"NOERROR","data":{"answers":[{"type":"A","name":"a.x.com.","data":"1.2.3.4","ttl":300}]}}"#;

#[tokio::test]
async fn test_scenario_a_single_address() {
    let dir = TempDir::new().unwrap();
    let resolver = CannedResolver::new(&[A_LINE]);
    let mut records = vec![Record::new("a.x.com")];

    let summary = run_resolve("x.com", &mut records, &resolver, &job(&dir))
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    let r = &records[0];
    assert_eq!(r.subdomain, "a.x.com");
    assert_eq!(r.ip, "1.2.3.4");
    assert_eq!(r.cname, "a.x.com");
    assert_eq!(r.ttl, "300");
    assert_eq!(r.resolve, ResolveState::Success);
    assert_eq!(r.reason, Some(Reason::Ok));
    assert_eq!(summary.ok, 1);
    assert_eq!(summary.candidates, 1);
    assert!(summary.resolver_invoked);
}

#[tokio::test]
async fn test_scenario_b_unanswered_name_is_dropped() {
    let dir = TempDir::new().unwrap();
    let resolver = CannedResolver::new(&[A_LINE]);
    let mut records = vec![Record::new("b.x.com"), Record::new("a.x.com")];

    let summary = run_resolve("x.com", &mut records, &resolver, &job(&dir))
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].subdomain, "a.x.com");
    assert!(records.iter().all(|r| r.subdomain != "b.x.com"));
    assert_eq!(summary.dropped, 1);
}

#[tokio::test]
async fn test_scenario_c_no_answers_key() {
    let dir = TempDir::new().unwrap();
    let resolver = CannedResolver::new(&[r#"{"name":"c.x.com.","status":"NOERROR","data":{}}"#]);
    let mut records = vec![Record::new("c.x.com")];

    run_resolve("x.com", &mut records, &resolver, &job(&dir))
        .await
        .unwrap();

    assert_eq!(records[0].resolve, ResolveState::Failure);
    assert_eq!(records[0].reason, Some(Reason::NoAnswer));
    assert_eq!(records[0].ip, "");
}

#[tokio::test]
async fn test_scenario_d_alias_only_answers() {
    let dir = TempDir::new().unwrap();
    let resolver = CannedResolver::new(&[
        r#"{"name":"d.x.com.","status":"NOERROR","data":{"answers":[{"ttl":300,"type":"CNAME","name":"d.x.com.","data":"edge.cdn.net."}]},"resolver":"1.1.1.1:53"}"#,
    ]);
    let mut records = vec![Record::new("d.x.com")];

    let summary = run_resolve("x.com", &mut records, &resolver, &job(&dir))
        .await
        .unwrap();

    assert_eq!(records[0].resolve, ResolveState::Failure);
    assert_eq!(records[0].reason, Some(Reason::NoARecord));
    assert_eq!(records[0].resolver.as_deref(), Some("1.1.1.1:53"));
    assert_eq!(summary.no_a_record, 1);
}

#[tokio::test]
async fn test_all_resolved_never_invokes_resolver() {
    let dir = TempDir::new().unwrap();
    let resolver = CannedResolver::new(&[A_LINE]);
    let original = vec![resolved("a.x.com", "1.1.1.1"), resolved("b.x.com", "2.2.2.2")];
    let mut records = original.clone();

    let summary = run_resolve("x.com", &mut records, &resolver, &job(&dir))
        .await
        .unwrap();

    assert_eq!(resolver.calls(), 0);
    assert_eq!(records, original);
    assert!(!summary.resolver_invoked);
    assert_eq!(summary.passthrough, 2);
    assert!(!job(&dir).candidates.exists());
}

#[tokio::test]
async fn test_resolved_records_pass_through_identically() {
    let dir = TempDir::new().unwrap();
    // The resolver claims a different answer for the already-resolved name.
    let resolver = CannedResolver::new(&[
        A_LINE,
        r#"{"name":"keep.x.com.","status":"NOERROR","data":{}}"#,
    ]);
    let keep = resolved("keep.x.com", "9.9.9.9");
    let mut records = vec![keep.clone(), Record::new("a.x.com")];

    run_resolve("x.com", &mut records, &resolver, &job(&dir))
        .await
        .unwrap();

    assert_eq!(records[0], keep);
    assert_eq!(records[1].ip, "1.2.3.4");
}

#[tokio::test]
async fn test_candidate_file_lists_only_unresolved_in_order() {
    let dir = TempDir::new().unwrap();
    let resolver = CannedResolver::new(&[A_LINE]);
    let mut records = vec![
        Record::new("z.x.com"),
        resolved("keep.x.com", "9.9.9.9"),
        Record::new("a.x.com"),
    ];

    run_resolve("x.com", &mut records, &resolver, &job(&dir))
        .await
        .unwrap();

    assert_eq!(resolver.calls(), 1);
    assert_eq!(
        resolver.seen_candidates.lock().unwrap().as_deref(),
        Some("z.x.com\na.x.com\n")
    );
}

#[tokio::test]
async fn test_duplicate_lines_last_one_wins() {
    let dir = TempDir::new().unwrap();
    let resolver = CannedResolver::new(&[
        A_LINE,
        r#"{"name":"a.x.com.","status":"NOERROR","data":{"answers":[{"type":"CNAME","name":"a.x.com.","data":"b.x.com."}]}}"#,
    ]);
    let mut records = vec![Record::new("a.x.com")];

    run_resolve("x.com", &mut records, &resolver, &job(&dir))
        .await
        .unwrap();

    assert_eq!(records[0].reason, Some(Reason::NoARecord));
    assert_eq!(records[0].ip, "");
}

#[tokio::test]
async fn test_failed_status_after_success_keeps_success() {
    // Non-NOERROR lines record nothing, so they cannot overwrite an earlier result.
    let dir = TempDir::new().unwrap();
    let resolver = CannedResolver::new(&[A_LINE, r#"{"name":"a.x.com.","status":"SERVFAIL"}"#]);
    let mut records = vec![Record::new("a.x.com")];

    let summary = run_resolve("x.com", &mut records, &resolver, &job(&dir))
        .await
        .unwrap();

    assert_eq!(records[0].reason, Some(Reason::Ok));
    assert_eq!(summary.skipped_status, 1);
}

#[tokio::test]
async fn test_no_usable_output_returns_input_unchanged() {
    let dir = TempDir::new().unwrap();
    let resolver = CannedResolver::new(&[
        "not json at all",
        r#"{"name":"a.x.com.","status":"NXDOMAIN"}"#,
    ]);
    let original = vec![Record::new("a.x.com"), resolved("keep.x.com", "9.9.9.9")];
    let mut records = original.clone();

    let summary = run_resolve("x.com", &mut records, &resolver, &job(&dir))
        .await
        .unwrap();

    assert_eq!(records, original);
    assert!(summary.empty_output);
    assert_eq!(summary.malformed_lines, 1);
    assert_eq!(summary.dropped, 0);
}

#[tokio::test]
async fn test_invocation_failure_leaves_records_untouched() {
    let dir = TempDir::new().unwrap();
    let original = vec![Record::new("a.x.com"), resolved("keep.x.com", "9.9.9.9")];
    let mut records = original.clone();

    let err = run_resolve("x.com", &mut records, &MissingResolver, &job(&dir))
        .await
        .unwrap_err();

    assert!(matches!(err, ResolveError::ResolverBinaryMissing(_)));
    assert_eq!(records, original);
}

#[tokio::test]
async fn test_ok_lists_stay_aligned() {
    let dir = TempDir::new().unwrap();
    let resolver = CannedResolver::new(&[
        r#"{"name":"m.x.com.","status":"NOERROR","data":{"answers":[{"ttl":600,"type":"CNAME","name":"m.x.com.","data":"m.cdn.net."},{"ttl":60,"type":"A","name":"m.cdn.net.","data":"10.0.0.1"},{"ttl":30,"type":"A","name":"m.cdn.net.","data":"10.0.0.2"}]}}"#,
    ]);
    let mut records = vec![Record::new("m.x.com")];

    run_resolve("x.com", &mut records, &resolver, &job(&dir))
        .await
        .unwrap();

    let r = &records[0];
    let n = r.ip.split(',').count();
    assert_eq!(n, 2);
    assert_eq!(r.cname.split(',').count(), n);
    assert_eq!(r.ttl.split(',').count(), n);
    assert_eq!(r.ttl, "60,30");
}
