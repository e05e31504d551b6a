#![allow(clippy::unwrap_used)]
// Integration tests for the provisioning flow and instance-port completion
// against in-memory collaborators.

use std::collections::BTreeSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use pretty_assertions::assert_eq;
use tunnelctl_core::{
    CandidateSetResolver, CoreError, InstancePortCompleter, InstancePortInventory, Provisioner,
    TunnelCreationService, TunnelDescriptor, TunnelId, TunnelRequest, TunnelType,
    TunnelTypeRegistry,
};

// ── Doubles ─────────────────────────────────────────────────────────

/// Records every descriptor it receives and answers with a fixed outcome.
struct RecordingService {
    calls: AtomicUsize,
    seen: Mutex<Vec<TunnelDescriptor>>,
    fail_with_status: Option<u16>,
}

impl RecordingService {
    fn ok() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            fail_with_status: None,
        }
    }

    fn failing(status: u16) -> Self {
        Self {
            fail_with_status: Some(status),
            ..Self::ok()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TunnelCreationService for RecordingService {
    async fn create(&self, descriptor: &TunnelDescriptor) -> Result<TunnelId, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(descriptor.clone());
        match self.fail_with_status {
            None => Ok(TunnelId::new("42")),
            Some(status) => Err(CoreError::CreationService {
                message: "group exhausted".into(),
                code: Some("exhausted".into()),
                status: Some(status),
            }),
        }
    }
}

enum Behaviour {
    Answer(Vec<&'static str>),
    Fail,
    Hang,
}

struct FakeInventory {
    calls: AtomicUsize,
    behaviour: Behaviour,
}

impl FakeInventory {
    fn new(behaviour: Behaviour) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            behaviour,
        }
    }
}

impl InstancePortInventory for FakeInventory {
    async fn list_all(&self) -> Result<BTreeSet<String>, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behaviour {
            Behaviour::Answer(ids) => Ok(ids.iter().map(|s| (*s).to_owned()).collect()),
            Behaviour::Fail => Err(CoreError::InventoryQuery {
                message: "store unavailable".into(),
            }),
            Behaviour::Hang => std::future::pending().await,
        }
    }
}

fn provisioner(service: &RecordingService) -> Provisioner<&RecordingService> {
    Provisioner::new(TunnelTypeRegistry::default(), service)
}

// ── Provisioning ────────────────────────────────────────────────────

#[tokio::test]
async fn valid_request_is_submitted_exactly_once() {
    let service = RecordingService::ok();
    let id = provisioner(&service)
        .provision(&TunnelRequest::new("10.0.0.1", "10.0.0.2", "VXLAN", "3"))
        .await
        .unwrap();

    assert_eq!(id.as_str(), "42");
    assert_eq!(service.calls(), 1);

    let seen = service.seen.lock().unwrap();
    assert_eq!(seen[0].tunnel_type(), TunnelType::Vxlan);
    assert_eq!(seen[0].annotations().bandwidth(), Some("0"));
}

#[tokio::test]
async fn validation_failures_never_reach_the_service() {
    let service = RecordingService::ok();
    let p = provisioner(&service);

    let bad = [
        TunnelRequest::new("10.0.0.1", "10.0.0.2", "IPSEC", "1"),
        TunnelRequest::new("not-an-ip", "10.0.0.2", "MPLS", "1"),
        TunnelRequest::new("10.0.0.1", "nope", "GRE", "1"),
        TunnelRequest::new("dev1-1", "dev2", "OCH", "1"),
        TunnelRequest::new("10.0.0.1", "10.0.0.2", "VLAN", "-4"),
    ];
    for request in &bad {
        let err = p.provision(request).await.unwrap_err();
        assert!(err.is_validation(), "{request:?} gave {err:?}");
    }

    assert_eq!(service.calls(), 0);
}

#[tokio::test]
async fn backend_error_is_surfaced_without_retry() {
    let service = RecordingService::failing(409);
    let err = provisioner(&service)
        .provision(&TunnelRequest::new("dev1-1", "dev2-2", "ODUK", "9"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CoreError::CreationService { status: Some(409), ref message, .. } if message == "group exhausted"
    ));
    assert_eq!(service.calls(), 1);
}

#[test]
fn prepare_builds_without_submitting() {
    let service = RecordingService::ok();
    let d = provisioner(&service)
        .prepare(&TunnelRequest::new("dev1-1", "dev2-2", "OCH", "9").with_name("t1"))
        .unwrap();

    assert_eq!(d.name().unwrap().as_str(), "t1");
    assert_eq!(service.calls(), 0);
}

// ── Completion ──────────────────────────────────────────────────────

#[tokio::test]
async fn resolver_queries_inventory_on_every_call() {
    let inventory = FakeInventory::new(Behaviour::Answer(vec!["p2", "p1"]));
    let resolver = CandidateSetResolver::new(&inventory, Duration::from_secs(1));

    let first = resolver.resolve().await;
    let second = resolver.resolve().await;

    let expected: BTreeSet<String> = ["p1".to_owned(), "p2".to_owned()].into();
    assert_eq!(first, expected);
    assert_eq!(second, expected);
    assert_eq!(inventory.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn completion_merges_live_and_static_candidates() {
    let inventory = FakeInventory::new(Behaviour::Answer(vec!["port-b", "port-a"]));
    let completer = InstancePortCompleter::new(CandidateSetResolver::new(
        &inventory,
        Duration::from_secs(1),
    ))
    .with_static(["port-a", "port-z"]);

    assert_eq!(
        completer.complete("port-", 5).await,
        vec!["port-a", "port-b", "port-z"]
    );
    assert_eq!(completer.complete("port-b", 6).await, vec!["port-b"]);
}

#[tokio::test]
async fn failing_inventory_degrades_to_static_candidates() {
    let inventory = FakeInventory::new(Behaviour::Fail);
    let completer = InstancePortCompleter::new(CandidateSetResolver::new(
        &inventory,
        Duration::from_secs(1),
    ))
    .with_static(["port-static"]);

    assert_eq!(completer.pool().await.len(), 1);
    assert_eq!(completer.complete("", 0).await, vec!["port-static"]);
}

#[tokio::test(start_paused = true)]
async fn hanging_inventory_is_cut_off_by_the_timeout() {
    let inventory = FakeInventory::new(Behaviour::Hang);
    let resolver = CandidateSetResolver::new(&inventory, Duration::from_millis(200));

    let ids = resolver.resolve().await;

    assert!(ids.is_empty());
    assert_eq!(inventory.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_inventory_gives_no_candidates() {
    let inventory = FakeInventory::new(Behaviour::Answer(Vec::new()));
    let completer = InstancePortCompleter::new(CandidateSetResolver::new(
        &inventory,
        Duration::from_secs(1),
    ));

    assert!(completer.complete("p", 1).await.is_empty());
}
