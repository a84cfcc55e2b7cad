//! Use cases: one remote backend operation each.
//!
//! A use case is observed as a short result stream: [`Resource::Loading`]
//! first, then exactly one terminal [`Resource::Success`] or
//! [`Resource::Error`].

mod crud;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::RemoteError;

pub use crud::*;

/// Tri-state result of an asynchronous call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource<T> {
    Loading,
    Success(T),
    Error(RemoteError),
}

impl<T> Resource<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resource<U> {
        match self {
            Resource::Loading => Resource::Loading,
            Resource::Success(value) => Resource::Success(f(value)),
            Resource::Error(error) => Resource::Error(error),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Resource::Loading)
    }
}

impl<T> From<Result<T, RemoteError>> for Resource<T> {
    fn from(result: Result<T, RemoteError>) -> Self {
        match result {
            Ok(value) => Resource::Success(value),
            Err(error) => Resource::Error(error),
        }
    }
}

/// One backend operation.
#[async_trait]
pub trait UseCase: Send + Sync {
    type Request: Send + 'static;
    type Response: Send + 'static;

    async fn execute(&self, request: Self::Request) -> Result<Self::Response, RemoteError>;
}

pub type SharedUseCase<Req, Resp> = Arc<dyn UseCase<Request = Req, Response = Resp>>;

type PendingCall<T> = Pin<Box<dyn Future<Output = Result<T, RemoteError>> + Send>>;

/// Result stream of a single use case invocation.
///
/// Nothing is sent to the backend until the second call to [`next`](Self::next).
pub struct ResourceCall<T> {
    pending: Option<PendingCall<T>>,
    timeout: Option<Duration>,
    started: bool,
}

impl<T: Send + 'static> ResourceCall<T> {
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn next(&mut self) -> Option<Resource<T>> {
        if !self.started {
            self.started = true;
            return Some(Resource::Loading);
        }
        let pending = self.pending.take()?;
        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, pending).await {
                Ok(result) => result,
                Err(_) => Err(timeout_error(limit)),
            },
            None => pending.await,
        };
        Some(Resource::from(result))
    }

    /// Drains the stream and returns its terminal item as a `Result`.
    pub async fn outcome(mut self) -> Result<T, RemoteError> {
        while let Some(item) = self.next().await {
            match item {
                Resource::Loading => continue,
                Resource::Success(value) => return Ok(value),
                Resource::Error(error) => return Err(error),
            }
        }
        Err(RemoteError::Unavailable("call already consumed".to_string()))
    }
}

/// Limits past `u64::MAX` milliseconds saturate.
fn timeout_error(limit: Duration) -> RemoteError {
    RemoteError::Timeout(u64::try_from(limit.as_millis()).unwrap_or(u64::MAX))
}

/// Starts observing `use_case` for `request`.
pub fn observe<Req, Resp>(use_case: SharedUseCase<Req, Resp>, request: Req) -> ResourceCall<Resp>
where
    Req: Send + 'static,
    Resp: Send + 'static,
{
    ResourceCall {
        pending: Some(Box::pin(async move { use_case.execute(request).await })),
        timeout: None,
        started: false,
    }
}
