// ABOUTME: Workflow tests with a fake runtime that records every facade call.
// ABOUTME: Covers no-op, first activation, swap ordering, and stage-attributed failures.

use crate::output::{Output, OutputMode};
use crate::runtime::traits::sealed::Sealed;
use crate::runtime::{
    ContainerError, ContainerFilters, ContainerOps, EngineContainer, ImageError, ImageHandle,
    ImageOps, MANAGED_LABEL, MANAGED_LABEL_VALUE, TaskError, TaskInfo, TaskOps, TaskSpec,
    TaskStatus,
};
use crate::types::{ContainerId, EngineRef, TaskId};
use crate::update::health::{HealthCheckError, HealthProbe};
use crate::update::{UpdateOutcome, UpdateRequest, activate_engine, do_update};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Clone, Copy)]
enum ImageLookup {
    Present,
    Missing,
    Broken(&'static str),
}

#[derive(Clone, Copy)]
enum PullResult {
    Succeeds,
    Fails(&'static str),
}

#[derive(Clone, Copy)]
enum TaskLookup {
    Running,
    Missing,
}

/// Facade double. Records every call; `strict()` panics on any call at all,
/// which proves a path never touched the runtime.
struct FakeRuntime {
    containers: Vec<EngineContainer>,
    image_reference: Option<String>,
    labels: Option<HashMap<String, String>>,
    image_lookup: ImageLookup,
    pull: PullResult,
    task_lookup: TaskLookup,
    strict: bool,
    calls: Mutex<Vec<&'static str>>,
    started: Mutex<Option<TaskSpec>>,
}

impl Sealed for FakeRuntime {}

impl FakeRuntime {
    fn new() -> Self {
        Self {
            containers: Vec::new(),
            image_reference: None,
            labels: Some(HashMap::new()),
            image_lookup: ImageLookup::Missing,
            pull: PullResult::Succeeds,
            task_lookup: TaskLookup::Running,
            strict: false,
            calls: Mutex::new(Vec::new()),
            started: Mutex::new(None),
        }
    }

    fn strict() -> Self {
        Self {
            strict: true,
            ..Self::new()
        }
    }

    fn with_container(mut self, image_reference: &str) -> Self {
        self.containers = vec![EngineContainer {
            id: ContainerId::new("c-engine-1".to_string()),
            name: "engine-live".to_string(),
        }];
        self.image_reference = Some(image_reference.to_string());
        self
    }

    fn image_present(mut self) -> Self {
        self.image_lookup = ImageLookup::Present;
        self
    }

    fn image_broken(mut self, message: &'static str) -> Self {
        self.image_lookup = ImageLookup::Broken(message);
        self
    }

    fn pull_fails(mut self, message: &'static str) -> Self {
        self.pull = PullResult::Fails(message);
        self
    }

    fn task_missing(mut self) -> Self {
        self.task_lookup = TaskLookup::Missing;
        self
    }

    fn labels(mut self, labels: HashMap<String, String>) -> Self {
        self.labels = Some(labels);
        self
    }

    fn labels_missing(mut self) -> Self {
        self.labels = None;
        self
    }

    fn record(&self, call: &'static str) {
        if self.strict {
            panic!("unexpected facade call: {call}");
        }
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn started(&self) -> TaskSpec {
        self.started
            .lock()
            .unwrap()
            .clone()
            .expect("no task was started")
    }
}

#[async_trait]
impl ContainerOps for FakeRuntime {
    async fn list_containers(
        &self,
        _filters: &ContainerFilters,
    ) -> Result<Vec<EngineContainer>, ContainerError> {
        self.record("list_containers");
        Ok(self.containers.clone())
    }

    async fn container_image(&self, _id: &ContainerId) -> Result<String, ContainerError> {
        self.record("container_image");
        self.image_reference
            .clone()
            .ok_or_else(|| ContainerError::NotFound("container is gone".to_string()))
    }

    async fn container_labels(
        &self,
        _id: &ContainerId,
    ) -> Result<HashMap<String, String>, ContainerError> {
        self.record("container_labels");
        self.labels
            .clone()
            .ok_or_else(|| ContainerError::NotFound("container is gone".to_string()))
    }
}

#[async_trait]
impl TaskOps for FakeRuntime {
    async fn lookup_task(&self, container: &ContainerId) -> Result<TaskInfo, TaskError> {
        self.record("lookup_task");
        match self.task_lookup {
            TaskLookup::Running => Ok(TaskInfo {
                id: TaskId::new("t-1".to_string()),
                container: container.clone(),
                status: TaskStatus::Running,
            }),
            TaskLookup::Missing => Err(TaskError::NotFound("no running task".to_string())),
        }
    }

    async fn stop_task(
        &self,
        _container: &ContainerId,
        _timeout: Duration,
    ) -> Result<(), TaskError> {
        self.record("stop_task");
        Ok(())
    }

    async fn start_task(&self, spec: &TaskSpec) -> Result<TaskInfo, TaskError> {
        self.record("start_task");
        *self.started.lock().unwrap() = Some(spec.clone());
        Ok(TaskInfo {
            id: TaskId::new("t-2".to_string()),
            container: ContainerId::new(spec.container_name.clone()),
            status: TaskStatus::Running,
        })
    }
}

#[async_trait]
impl ImageOps for FakeRuntime {
    async fn get_image(&self, reference: &EngineRef) -> Result<ImageHandle, ImageError> {
        self.record("get_image");
        match self.image_lookup {
            ImageLookup::Present => Ok(ImageHandle {
                id: None,
                reference: reference.to_string(),
            }),
            ImageLookup::Missing => Err(ImageError::NotFound(reference.to_string())),
            ImageLookup::Broken(message) => Err(ImageError::Runtime(message.to_string())),
        }
    }

    async fn pull_image(
        &self,
        reference: &EngineRef,
        _auth: Option<&crate::runtime::RegistryAuth>,
    ) -> Result<ImageHandle, ImageError> {
        self.record("pull_image");
        match self.pull {
            PullResult::Succeeds => Ok(ImageHandle {
                id: None,
                reference: reference.to_string(),
            }),
            PullResult::Fails(message) => Err(ImageError::PullFailed(message.to_string())),
        }
    }
}

#[derive(Default)]
struct CountingProbe {
    checks: Mutex<u32>,
}

impl CountingProbe {
    fn count(&self) -> u32 {
        *self.checks.lock().unwrap()
    }
}

#[async_trait]
impl HealthProbe for CountingProbe {
    async fn check(&self, _container: &ContainerId) -> Result<(), HealthCheckError> {
        *self.checks.lock().unwrap() += 1;
        Ok(())
    }
}

fn request(version: &str) -> UpdateRequest {
    UpdateRequest {
        target_version: version.to_string(),
        registry_prefix: "registry.example.com/acme".to_string(),
        config_file: PathBuf::from("/etc/engine/daemon.json"),
        engine_image: "engine-ee".to_string(),
    }
}

fn output() -> Output {
    Output::new(OutputMode::Quiet)
}

#[tokio::test]
async fn empty_version_fails_before_any_facade_call() {
    let runtime = FakeRuntime::strict();
    let probe = CountingProbe::default();

    let err = do_update(&runtime, &request(""), None, &probe, &output())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("please pick the version you"));

    let err = activate_engine(&runtime, &request(""), None, &probe, &output())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("please pick the version you"));
    assert_eq!(probe.count(), 0);
}

#[tokio::test]
async fn matching_version_is_a_noop_without_image_calls() {
    let runtime = FakeRuntime::new().with_container("registry.example.com/acme/engine-ee:2.1.0");
    let probe = CountingProbe::default();

    let outcome = do_update(&runtime, &request("2.1.0"), None, &probe, &output())
        .await
        .unwrap();

    assert_eq!(outcome, UpdateOutcome::NoChangeNeeded);
    let calls = runtime.calls();
    assert!(!calls.contains(&"get_image"));
    assert!(!calls.contains(&"pull_image"));
    assert!(!calls.contains(&"start_task"));
    assert_eq!(probe.count(), 0);
}

#[tokio::test]
async fn activation_health_checks_even_when_nothing_changes() {
    let runtime = FakeRuntime::new().with_container("registry.example.com/acme/engine-ee:2.1.0");
    let probe = CountingProbe::default();

    let outcome = activate_engine(&runtime, &request("2.1.0"), None, &probe, &output())
        .await
        .unwrap();

    assert_eq!(outcome, UpdateOutcome::NoChangeNeeded);
    assert!(!runtime.calls().contains(&"start_task"));
    assert_eq!(probe.count(), 1);
}

#[tokio::test]
async fn foreign_image_is_updated_not_an_error() {
    let runtime = FakeRuntime::new()
        .with_container("docker.io/library/nginx:latest")
        .image_present();
    let probe = CountingProbe::default();

    let outcome = do_update(&runtime, &request("2.1.0"), None, &probe, &output())
        .await
        .unwrap();

    assert_eq!(
        outcome,
        UpdateOutcome::Updated(EngineRef::resolve(
            "registry.example.com/acme",
            "engine-ee",
            "2.1.0"
        ))
    );
    assert!(runtime.calls().contains(&"start_task"));
}

#[tokio::test]
async fn image_lookup_failure_is_attributed() {
    let runtime = FakeRuntime::new()
        .with_container("registry.example.com/acme/engine-ee:2.0.9")
        .image_broken("something went wrong");
    let probe = CountingProbe::default();

    let err = do_update(&runtime, &request("2.1.0"), None, &probe, &output())
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("check for image"));
    assert!(message.contains("something went wrong"));
    assert_eq!(probe.count(), 0);
}

#[tokio::test]
async fn pull_failure_is_attributed() {
    let runtime = FakeRuntime::new()
        .with_container("registry.example.com/acme/engine-ee:2.0.9")
        .pull_fails("pull failure");
    let probe = CountingProbe::default();

    let err = do_update(&runtime, &request("2.1.0"), None, &probe, &output())
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("unable to pull"));
    assert!(message.contains("pull failure"));
}

#[tokio::test]
async fn missing_task_still_swaps() {
    let runtime = FakeRuntime::new()
        .with_container("registry.example.com/acme/engine-ee:2.0.9")
        .task_missing();
    let probe = CountingProbe::default();

    let outcome = do_update(&runtime, &request("2.1.0"), None, &probe, &output())
        .await
        .unwrap();

    assert!(matches!(outcome, UpdateOutcome::Updated(_)));
    let calls = runtime.calls();
    assert!(calls.contains(&"start_task"));
    assert!(!calls.contains(&"stop_task"));
}

#[tokio::test]
async fn first_activation_runs_the_full_chain() {
    let runtime = FakeRuntime::new();
    let probe = CountingProbe::default();

    let outcome = activate_engine(&runtime, &request("2.1.0"), None, &probe, &output())
        .await
        .unwrap();

    assert!(matches!(outcome, UpdateOutcome::Updated(_)));
    assert_eq!(
        runtime.calls(),
        vec!["list_containers", "get_image", "pull_image", "start_task"]
    );
    assert_eq!(probe.count(), 1);

    let spec = runtime.started();
    assert_eq!(spec.container_name, crate::update::ENGINE_CONTAINER_NAME);
    assert_eq!(
        spec.labels.get(MANAGED_LABEL).map(String::as_str),
        Some(MANAGED_LABEL_VALUE)
    );
    assert_eq!(
        spec.config_file,
        Some(PathBuf::from("/etc/engine/daemon.json"))
    );
}

#[tokio::test]
async fn local_image_hit_swaps_without_pull() {
    let runtime = FakeRuntime::new()
        .with_container("registry.example.com/acme/ce-engine:2.0.9")
        .image_present();
    let probe = CountingProbe::default();

    let outcome = do_update(&runtime, &request("2.1.0"), None, &probe, &output())
        .await
        .unwrap();

    assert!(matches!(outcome, UpdateOutcome::Updated(_)));
    let calls = runtime.calls();
    assert!(calls.contains(&"get_image"));
    assert!(!calls.contains(&"pull_image"));
    assert!(calls.contains(&"stop_task"));
    assert!(calls.contains(&"start_task"));
    assert_eq!(probe.count(), 1);
}

#[tokio::test]
async fn swap_preserves_labels_and_container_name() {
    let mut labels = HashMap::new();
    labels.insert("team".to_string(), "infra".to_string());
    labels.insert(MANAGED_LABEL.to_string(), MANAGED_LABEL_VALUE.to_string());

    let runtime = FakeRuntime::new()
        .with_container("registry.example.com/acme/engine-ee:2.0.9")
        .image_present()
        .labels(labels.clone());
    let probe = CountingProbe::default();

    do_update(&runtime, &request("2.1.0"), None, &probe, &output())
        .await
        .unwrap();

    let spec = runtime.started();
    assert_eq!(spec.labels, labels);
    assert_eq!(spec.container_name, "engine-live");
    assert_eq!(spec.image.to_string(), "registry.example.com/acme/engine-ee:2.1.0");
}

#[tokio::test]
async fn missing_labels_swap_with_an_empty_map() {
    let runtime = FakeRuntime::new()
        .with_container("registry.example.com/acme/engine-ee:2.0.9")
        .image_present()
        .labels_missing();
    let probe = CountingProbe::default();

    do_update(&runtime, &request("2.1.0"), None, &probe, &output())
        .await
        .unwrap();

    assert!(runtime.started().labels.is_empty());
}

#[tokio::test]
async fn update_without_container_creates_a_fresh_engine() {
    let runtime = FakeRuntime::new().image_present();
    let probe = CountingProbe::default();

    let outcome = do_update(&runtime, &request("2.1.0"), None, &probe, &output())
        .await
        .unwrap();

    assert!(matches!(outcome, UpdateOutcome::Updated(_)));
    assert_eq!(
        runtime.started().container_name,
        crate::update::ENGINE_CONTAINER_NAME
    );
}
