//! Tokio runtime and inference-runtime mock helpers for integration tests.
//!
//! The aspect extractor uses a blocking HTTP client, so steps call it from
//! the test thread and only enter the runtime to drive the mock server.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use rstest_bdd::Slot;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer};

/// Shared runtime wrapper that can be stored in an `rstest-bdd` Slot.
#[derive(Clone)]
pub struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    pub fn new(runtime: Runtime) -> Self {
        Self(Rc::new(RefCell::new(runtime)))
    }

    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

/// Ensures a Tokio runtime and Wiremock server are initialised.
///
/// # Errors
///
/// Returns an error if the Tokio runtime cannot be created or if the slots behave unexpectedly.
pub fn ensure_runtime_and_server(
    runtime: &Slot<SharedRuntime>,
    server: &Slot<MockServer>,
) -> Result<SharedRuntime, io::Error> {
    if runtime.with_ref(|_| ()).is_none() {
        runtime.set(SharedRuntime::new(Runtime::new()?));
    }

    let shared_runtime = runtime
        .get()
        .ok_or_else(|| io::Error::other("runtime not initialised after set"))?;

    if server.with_ref(|_| ()).is_none() {
        server.set(shared_runtime.block_on(MockServer::start()));
    }

    Ok(shared_runtime)
}

/// Mounts `mock` on the server held in `server`.
///
/// # Errors
///
/// Returns an error if the runtime or server cannot be initialised.
pub fn mount(
    runtime: &Slot<SharedRuntime>,
    server: &Slot<MockServer>,
    mock: Mock,
) -> Result<(), io::Error> {
    let shared_runtime = ensure_runtime_and_server(runtime, server)?;
    server
        .with_ref(|mock_server| shared_runtime.block_on(mock.mount(mock_server)))
        .ok_or_else(|| io::Error::other("mock server not initialised"))
}

/// Counts requests the server received for `request_path`.
///
/// # Errors
///
/// Returns an error if the runtime or server is missing, or if request
/// recording is disabled.
pub fn received_count(
    runtime: &Slot<SharedRuntime>,
    server: &Slot<MockServer>,
    request_path: &str,
) -> Result<usize, io::Error> {
    let shared_runtime = runtime
        .get()
        .ok_or_else(|| io::Error::other("runtime not initialised"))?;
    let requests = server
        .with_ref(|mock_server| shared_runtime.block_on(mock_server.received_requests()))
        .ok_or_else(|| io::Error::other("mock server not initialised"))?
        .ok_or_else(|| io::Error::other("request recording is disabled"))?;

    Ok(requests
        .iter()
        .filter(|request| request.url.path() == request_path)
        .count())
}

/// Returns the base URI of the mock server.
///
/// # Errors
///
/// Returns an error if the server has not been started.
pub fn server_uri(server: &Slot<MockServer>) -> Result<String, io::Error> {
    server
        .with_ref(MockServer::uri)
        .ok_or_else(|| io::Error::other("mock server not initialised"))
}
