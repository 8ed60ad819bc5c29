use std::sync::Arc;
use std::time::Duration;

use campaign_content::ContentFactory;
use campaign_core::{
    BaseId, CampaignEvent, ItemId, ItemOracle, OracleSnapshot, TransferId,
};
use runtime::{
    ClockEvent, ContainmentCommand, ContainmentReply, ControllerError, Event, FileSaveRepository,
    InMemorySaveRepository, Runtime, RuntimeConfig, RuntimeError, RuntimeHandle, SaveFormat, SaveRepository,
    Topic, TransferReply, TransferRequest,
};

const HQ: &str = "Headquarters";
const OUTPOST: &str = "Outpost";
const TWO_DAYS: u64 = 2 * 86_400;

fn oracles() -> OracleSnapshot {
    ContentFactory::bundled()
        .load_oracles()
        .expect("bundled content should load")
}

fn medikit(oracles: &OracleSnapshot) -> ItemId {
    oracles.items.resolve("medikit").expect("medikit in catalog")
}

async fn start(repository: Option<Arc<dyn SaveRepository>>) -> (Runtime, RuntimeHandle) {
    start_with(repository, RuntimeConfig::default()).await
}

async fn start_with(
    repository: Option<Arc<dyn SaveRepository>>,
    config: RuntimeConfig,
) -> (Runtime, RuntimeHandle) {
    let oracles = oracles();
    let breathing = oracles.config.breathing_tech.clone();
    let mut builder = Runtime::builder().oracles(oracles).config(config);
    if let Some(repository) = repository {
        builder = builder.repository(repository);
    }
    let runtime = builder.build().await.expect("runtime should build");
    let handle = runtime.handle();
    handle.mark_researched(breathing).await.unwrap();
    (runtime, handle)
}

/// Ten-millisecond ticks covering `time_scale / 100` campaign seconds each.
fn fast_clock(time_scale: u64) -> RuntimeConfig {
    RuntimeConfig {
        time_scale,
        tick_interval: Duration::from_millis(10),
        ..RuntimeConfig::default()
    }
}

async fn add(handle: &RuntimeHandle, species: &str, dead: bool) {
    let reply = handle
        .containment(ContainmentCommand::AddOne {
            base: HQ.into(),
            species: species.into(),
            dead,
        })
        .await
        .unwrap();
    assert_eq!(reply, ContainmentReply::Added);
}

#[tokio::test]
async fn containment_commands_update_the_summary() {
    let (runtime, handle) = start(None).await;

    add(&handle, "ortnok", false).await;
    add(&handle, "ortnok", false).await;
    add(&handle, "taman", true).await;

    let summary = handle.base_summary(HQ).await.unwrap();
    assert!(summary.has_containment);
    assert_eq!(summary.alive, 2);
    assert_eq!(summary.dead, 1);
    assert_eq!(summary.capacity.current, 2);

    let reply = handle
        .containment(ContainmentCommand::KillOne {
            base: "headquarters".into(),
            species: "ortnok".into(),
        })
        .await
        .unwrap();
    assert_eq!(reply, ContainmentReply::Killed(1));

    let summary = handle.base_summary("0").await.unwrap();
    assert_eq!(summary.alive, 1);
    assert_eq!(summary.dead, 2);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn unknown_names_are_rejected() {
    let (_runtime, handle) = start(None).await;

    let err = handle
        .containment(ContainmentCommand::AddOne {
            base: "Atlantis".into(),
            species: "ortnok".into(),
            dead: false,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Controller(ControllerError::UnknownBase(_))
    ));

    let err = handle
        .containment(ContainmentCommand::AddOne {
            base: HQ.into(),
            species: "muton".into(),
            dead: false,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Controller(ControllerError::UnknownSpecies(_))
    ));
    assert_eq!(handle.base_summary(HQ).await.unwrap().alive, 0);
}

#[tokio::test]
async fn transfer_is_delivered_by_the_clock() {
    let (_runtime, handle) = start(None).await;
    let medikit = medikit(&oracles());
    let mut transfers = handle.subscribe(Topic::Transfer);
    let mut clock = handle.subscribe(Topic::Clock);

    let reply = handle
        .start_transfer(HQ, OUTPOST, TransferRequest::new().item("medikit", 3))
        .await
        .unwrap();
    assert_eq!(reply, TransferReply::Started(TransferId(0)));
    assert!(matches!(
        transfers.recv().await.unwrap(),
        Event::Campaign(CampaignEvent::TransferStarted { .. })
    ));

    let listed = handle.list_transfers().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].destination, OUTPOST);
    assert_eq!(listed[0].items, vec![("medikit".to_owned(), 3)]);

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.base(BaseId(0)).unwrap().item_count(medikit), 5);
    assert_eq!(state.base(BaseId(1)).unwrap().item_count(medikit), 0);

    let report = handle.advance(TWO_DAYS).await.unwrap();
    assert!(report.advanced);
    assert_eq!(report.resolved.map(|outcome| outcome.delivered), Some(true));
    assert!(matches!(
        transfers.recv().await.unwrap(),
        Event::Campaign(CampaignEvent::TransferResolved {
            delivered: true,
            ..
        })
    ));
    assert!(matches!(
        clock.recv().await.unwrap(),
        Event::Clock(ClockEvent::Advanced { .. })
    ));

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.base(BaseId(1)).unwrap().item_count(medikit), 3);
    assert!(handle.list_transfers().await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_request_starts_nothing() {
    let (_runtime, handle) = start(None).await;
    let reply = handle
        .start_transfer(HQ, OUTPOST, TransferRequest::new())
        .await
        .unwrap();
    assert_eq!(reply, TransferReply::Empty);
    assert!(handle.list_transfers().await.unwrap().is_empty());
}

#[tokio::test]
async fn saves_restore_containment_and_transfers() {
    let repository: Arc<dyn SaveRepository> = Arc::new(InMemorySaveRepository::new());
    let (_runtime, handle) = start(Some(Arc::clone(&repository))).await;

    add(&handle, "ortnok", false).await;
    add(&handle, "taman", true).await;
    handle
        .start_transfer(HQ, OUTPOST, TransferRequest::new().item("medikit", 2))
        .await
        .unwrap();
    handle.save("slot1").await.unwrap();
    assert!(repository.exists("slot1"));

    handle
        .containment(ContainmentCommand::KillAll { base: HQ.into() })
        .await
        .unwrap();
    handle.advance(TWO_DAYS).await.unwrap();
    assert!(handle.list_transfers().await.unwrap().is_empty());

    let mut clock = handle.subscribe(Topic::Clock);
    let report = handle.load("slot1").await.unwrap();
    assert!(report.is_clean());
    assert!(matches!(
        clock.recv().await.unwrap(),
        Event::Clock(ClockEvent::Loaded { warnings: 0, .. })
    ));

    let summary = handle.base_summary(HQ).await.unwrap();
    assert_eq!(summary.alive, 1);
    assert_eq!(summary.dead, 1);
    assert_eq!(summary.capacity.current, 1);
    let listed = handle.list_transfers().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].items, vec![("medikit".to_owned(), 2)]);
}

#[tokio::test]
async fn file_saves_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let repository: Arc<dyn SaveRepository> =
        Arc::new(FileSaveRepository::new(dir.path(), SaveFormat::Bincode).unwrap());

    let (runtime, handle) = start(Some(Arc::clone(&repository))).await;
    add(&handle, "ortnok", false).await;
    handle.save("campaign").await.unwrap();
    drop(handle);
    runtime.shutdown().await.unwrap();

    let (_runtime, handle) = start(Some(repository)).await;
    assert_eq!(handle.base_summary(HQ).await.unwrap().alive, 0);
    handle.load("campaign").await.unwrap();
    assert_eq!(handle.base_summary(HQ).await.unwrap().alive, 1);
}

#[tokio::test]
async fn loading_needs_a_repository_and_a_slot() {
    let (_runtime, handle) = start(None).await;
    assert!(matches!(
        handle.load("missing").await,
        Err(RuntimeError::NoRepository)
    ));

    let repository: Arc<dyn SaveRepository> = Arc::new(InMemorySaveRepository::new());
    let (_runtime, handle) = start(Some(repository)).await;
    assert!(matches!(
        handle.load("missing").await,
        Err(RuntimeError::SaveNotFound(slot)) if slot == "missing"
    ));
}

#[tokio::test]
async fn stepping_the_runtime_delivers_a_transfer() {
    let (runtime, handle) = start_with(None, fast_clock(TWO_DAYS * 100)).await;
    assert_eq!(runtime.config().seconds_per_tick(), TWO_DAYS);
    let medikit = medikit(&oracles());

    handle
        .start_transfer(HQ, OUTPOST, TransferRequest::new().item("medikit", 3))
        .await
        .unwrap();
    let report = runtime.step().await.unwrap().expect("clock is running");
    assert!(report.advanced);
    assert_eq!(report.resolved.map(|outcome| outcome.delivered), Some(true));

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.base(BaseId(1)).unwrap().item_count(medikit), 3);
    assert!(handle.list_transfers().await.unwrap().is_empty());
}

#[tokio::test]
async fn paused_clock_does_not_step() {
    let (runtime, handle) = start_with(None, fast_clock(0)).await;
    handle
        .start_transfer(HQ, OUTPOST, TransferRequest::new().item("medikit", 1))
        .await
        .unwrap();

    assert!(runtime.step().await.unwrap().is_none());
    assert_eq!(handle.list_transfers().await.unwrap().len(), 1);
}

#[tokio::test]
async fn running_clock_resolves_transfers_on_its_own() {
    let (runtime, handle) = start_with(None, fast_clock(TWO_DAYS * 100)).await;
    let mut transfers = handle.subscribe(Topic::Transfer);
    handle
        .start_transfer(HQ, OUTPOST, TransferRequest::new().item("medikit", 2))
        .await
        .unwrap();
    assert!(matches!(
        transfers.recv().await.unwrap(),
        Event::Campaign(CampaignEvent::TransferStarted { .. })
    ));

    let stopped = tokio::time::timeout(Duration::from_millis(200), runtime.run()).await;
    assert!(stopped.is_err(), "run only returns when a command fails");
    assert!(matches!(
        transfers.recv().await.unwrap(),
        Event::Campaign(CampaignEvent::TransferResolved {
            delivered: true,
            ..
        })
    ));
    assert!(handle.list_transfers().await.unwrap().is_empty());
}
