//! # Mock Gateway
//!
//! [`MockGateway`] implements [`TryOnGateway`] entirely in memory. Tests script
//! one answer per expected call, optionally delayed, and the mock records every
//! call it receives.
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tryon_studio::gateway::{MockGateway, TryOnGateway};
//! use tryon_studio::model::{GenerationRequest, GenerationResult};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockGateway::new();
//!     mock.expect_generate()
//!         .after(Duration::from_millis(5))
//!         .return_ok(GenerationResult::completed("t1", "t1.png"));
//!
//!     let gateway: Arc<dyn TryOnGateway> = Arc::new(mock.clone());
//!     let request = GenerationRequest { model_id: "m1".into(), garment_id: "g1".into() };
//!     let result = gateway.generate(&request).await.unwrap();
//!
//!     assert_eq!(result.id.as_str(), "t1");
//!     assert_eq!(mock.generate_calls(), 1);
//!     mock.verify();
//! }
//! ```
//!
//! Delays run on the tokio clock, so tests using `start_paused = true` can
//! script a slow backend without waiting for it.
//!
//! A call with no scripted answer panics, like an unmet expectation in any mock.

use crate::gateway::{GatewayError, TryOnGateway};
use crate::model::{
    BatchRequest, BatchResult, GenerationId, GenerationRequest, GenerationResult, HistoryPage,
    HistoryQuery, PhotoGenerationRequest,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One call received by the mock.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Generate(GenerationRequest),
    GenerateWithPhoto(PhotoGenerationRequest),
    GenerateBatch(BatchRequest),
    ListHistory(HistoryQuery),
    GetSession(GenerationId),
    SetFavorite { id: GenerationId, is_favorite: bool },
}

struct Scripted<T> {
    response: Result<T, GatewayError>,
    delay: Option<Duration>,
}

#[derive(Default)]
struct MockState {
    generate: VecDeque<Scripted<GenerationResult>>,
    generate_with_photo: VecDeque<Scripted<GenerationResult>>,
    generate_batch: VecDeque<Scripted<BatchResult>>,
    list_history: VecDeque<Scripted<HistoryPage>>,
    get_session: VecDeque<Scripted<GenerationResult>>,
    set_favorite: VecDeque<Scripted<GenerationResult>>,
    calls: Vec<GatewayCall>,
}

impl MockState {
    fn remaining(&self) -> usize {
        self.generate.len()
            + self.generate_with_photo.len()
            + self.generate_batch.len()
            + self.list_history.len()
            + self.get_session.len()
            + self.set_favorite.len()
    }
}

type Queue<T> = fn(&mut MockState) -> &mut VecDeque<Scripted<T>>;

/// Scripted in-memory gateway. Clones share the same script and call log.
#[derive(Clone, Default)]
pub struct MockGateway {
    state: Arc<Mutex<MockState>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `generate` call.
    pub fn expect_generate(&self) -> ExpectationBuilder<GenerationResult> {
        self.builder(|s| &mut s.generate)
    }

    /// Expects a `generate_with_photo` call.
    pub fn expect_generate_with_photo(&self) -> ExpectationBuilder<GenerationResult> {
        self.builder(|s| &mut s.generate_with_photo)
    }

    /// Expects a `generate_batch` call.
    pub fn expect_generate_batch(&self) -> ExpectationBuilder<BatchResult> {
        self.builder(|s| &mut s.generate_batch)
    }

    /// Expects a `list_history` call.
    pub fn expect_list_history(&self) -> ExpectationBuilder<HistoryPage> {
        self.builder(|s| &mut s.list_history)
    }

    /// Expects a `get_session` call.
    pub fn expect_get_session(&self) -> ExpectationBuilder<GenerationResult> {
        self.builder(|s| &mut s.get_session)
    }

    /// Expects a `set_favorite` call.
    pub fn expect_set_favorite(&self) -> ExpectationBuilder<GenerationResult> {
        self.builder(|s| &mut s.set_favorite)
    }

    fn builder<T>(&self, queue: Queue<T>) -> ExpectationBuilder<T> {
        ExpectationBuilder {
            state: self.state.clone(),
            queue,
            delay: None,
        }
    }

    /// Every call received so far, in arrival order.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn generate_calls(&self) -> usize {
        self.count(|c| matches!(c, GatewayCall::Generate(_)))
    }

    pub fn generate_with_photo_calls(&self) -> usize {
        self.count(|c| matches!(c, GatewayCall::GenerateWithPhoto(_)))
    }

    pub fn generate_batch_calls(&self) -> usize {
        self.count(|c| matches!(c, GatewayCall::GenerateBatch(_)))
    }

    pub fn list_history_calls(&self) -> usize {
        self.count(|c| matches!(c, GatewayCall::ListHistory(_)))
    }

    pub fn get_session_calls(&self) -> usize {
        self.count(|c| matches!(c, GatewayCall::GetSession(_)))
    }

    pub fn set_favorite_calls(&self) -> usize {
        self.count(|c| matches!(c, GatewayCall::SetFavorite { .. }))
    }

    fn count(&self, filter: impl Fn(&GatewayCall) -> bool) -> usize {
        self.state.lock().unwrap().calls.iter().filter(|c| filter(c)).count()
    }

    /// Verifies that every scripted answer was consumed.
    pub fn verify(&self) {
        let remaining = self.state.lock().unwrap().remaining();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    async fn answer<T>(&self, call: GatewayCall, queue: Queue<T>) -> Result<T, GatewayError> {
        let scripted = {
            let mut state = self.state.lock().unwrap();
            let next = queue(&mut state).pop_front();
            let Some(next) = next else {
                panic!("Unexpected gateway call: {:?}", call);
            };
            state.calls.push(call);
            next
        };
        if let Some(delay) = scripted.delay {
            tokio::time::sleep(delay).await;
        }
        scripted.response
    }
}

#[async_trait]
impl TryOnGateway for MockGateway {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GatewayError> {
        self.answer(GatewayCall::Generate(request.clone()), |s| &mut s.generate)
            .await
    }

    async fn generate_with_photo(
        &self,
        request: &PhotoGenerationRequest,
    ) -> Result<GenerationResult, GatewayError> {
        let call = GatewayCall::GenerateWithPhoto(request.clone());
        self.answer(call, |s| &mut s.generate_with_photo).await
    }

    async fn generate_batch(&self, request: &BatchRequest) -> Result<BatchResult, GatewayError> {
        self.answer(GatewayCall::GenerateBatch(request.clone()), |s| &mut s.generate_batch)
            .await
    }

    async fn list_history(&self, query: HistoryQuery) -> Result<HistoryPage, GatewayError> {
        self.answer(GatewayCall::ListHistory(query), |s| &mut s.list_history)
            .await
    }

    async fn get_session(&self, id: &GenerationId) -> Result<GenerationResult, GatewayError> {
        self.answer(GatewayCall::GetSession(id.clone()), |s| &mut s.get_session)
            .await
    }

    async fn set_favorite(
        &self,
        id: &GenerationId,
        is_favorite: bool,
    ) -> Result<GenerationResult, GatewayError> {
        let call = GatewayCall::SetFavorite {
            id: id.clone(),
            is_favorite,
        };
        self.answer(call, |s| &mut s.set_favorite).await
    }
}

/// Builder for one scripted answer.
pub struct ExpectationBuilder<T> {
    state: Arc<Mutex<MockState>>,
    queue: Queue<T>,
    delay: Option<Duration>,
}

impl<T> ExpectationBuilder<T> {
    /// Delays the answer by `delay`.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: GatewayError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T, GatewayError>) {
        let mut state = self.state.lock().unwrap();
        (self.queue)(&mut state).push_back(Scripted {
            response,
            delay: self.delay,
        });
    }
}
