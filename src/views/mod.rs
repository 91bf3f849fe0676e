//! View state for the pages. Each network-backed piece of a page is a
//! `RequestSlot`: idle, loading, success or error, with stale answers dropped.

mod global_calendar;
mod social;

use std::future::Future;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::calendar::{FetchError, FetchErrorKind};

pub use global_calendar::{CalendarMode, GlobalCalendarView, WishModal};
pub use social::{ContactsView, FeedView, ProfileStats, ProfileView};

/// What a page shows for one request type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Handle for one started request. Only the most recently issued ticket of a
/// slot can change that slot's state.
#[derive(Debug)]
pub struct RequestTicket {
    id: u64,
    cancel: CancellationToken,
}

impl RequestTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Drive `fut` unless a newer request on the same slot cancels this one first.
    pub async fn run<T, F>(&self, fut: F) -> Result<T, FetchError>
    where
        F: Future<Output = Result<T, FetchError>>,
    {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(FetchError::new(
                FetchErrorKind::Cancelled,
                "Request cancelled.",
                format!("request {} superseded", self.id),
            )),
            result = fut => result,
        }
    }
}

type BoxedFetch<T> = Pin<Box<dyn Future<Output = Result<T, FetchError>> + Send>>;

/// A started request that no longer borrows its view. Resolve it anywhere,
/// then hand the outcome back to the view that began it.
pub struct PendingRequest<T> {
    ticket: RequestTicket,
    fetch: BoxedFetch<T>,
}

impl<T> PendingRequest<T> {
    pub fn id(&self) -> u64 {
        self.ticket.id
    }

    /// Await the request. A request superseded in the meantime resolves to
    /// `Cancelled` without waiting for the model.
    pub async fn resolve(self) -> FinishedRequest<T> {
        let Self { ticket, fetch } = self;
        let result = ticket.run(fetch).await;
        FinishedRequest { ticket, result }
    }
}

/// Outcome of a `PendingRequest`, ready to be applied to its slot.
pub struct FinishedRequest<T> {
    ticket: RequestTicket,
    result: Result<T, FetchError>,
}

impl<T> FinishedRequest<T> {
    pub fn id(&self) -> u64 {
        self.ticket.id
    }

    pub fn result(&self) -> &Result<T, FetchError> {
        &self.result
    }
}

/// One request type's state plus the id of the latest outstanding request.
#[derive(Debug)]
pub struct RequestSlot<T> {
    state: LoadState<T>,
    latest: u64,
    in_flight: Option<CancellationToken>,
}

impl<T> Default for RequestSlot<T> {
    fn default() -> Self {
        Self {
            state: LoadState::Idle,
            latest: 0,
            in_flight: None,
        }
    }
}

impl<T> RequestSlot<T> {
    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    /// Enter `Loading` under a fresh request id, cancelling any request
    /// still in flight.
    pub fn begin(&mut self) -> RequestTicket {
        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
        }
        self.latest += 1;
        let cancel = CancellationToken::new();
        self.in_flight = Some(cancel.clone());
        self.state = LoadState::Loading;
        RequestTicket {
            id: self.latest,
            cancel,
        }
    }

    /// Apply a finished request. Returns false (and changes nothing) when the
    /// ticket is stale. An error replaces any previous data.
    pub fn finish(&mut self, ticket: RequestTicket, result: Result<T, FetchError>) -> bool {
        if ticket.id != self.latest || ticket.is_cancelled() {
            debug!(
                ticket = ticket.id,
                latest = self.latest,
                "Discarding stale response"
            );
            return false;
        }
        self.in_flight = None;
        self.state = match result {
            Ok(data) => LoadState::Success(data),
            Err(e) => LoadState::Error(e.message),
        };
        true
    }

    /// `begin` plus the future that will produce the result.
    pub fn start<F>(&mut self, fetch: F) -> PendingRequest<T>
    where
        F: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        PendingRequest {
            ticket: self.begin(),
            fetch: Box::pin(fetch),
        }
    }

    pub fn apply(&mut self, finished: FinishedRequest<T>) -> bool {
        self.finish(finished.ticket, finished.result)
    }

    /// Back to `Idle`; whatever is in flight becomes stale.
    pub fn reset(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
        }
        self.latest += 1;
        self.state = LoadState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure() -> FetchError {
        FetchError::new(FetchErrorKind::Transport, "Could not load.", "boom")
    }

    #[test]
    fn begin_enters_loading_with_increasing_ids() {
        let mut slot: RequestSlot<u32> = RequestSlot::default();
        assert_eq!(slot.state(), &LoadState::Idle);
        let first = slot.begin();
        let second = slot.begin();
        assert!(slot.state().is_loading());
        assert!(second.id() > first.id());
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
    }

    #[test]
    fn success_replaces_prior_success() {
        let mut slot = RequestSlot::default();
        let t = slot.begin();
        assert!(slot.finish(t, Ok(1)));
        let t = slot.begin();
        assert!(slot.finish(t, Ok(2)));
        assert_eq!(slot.state().data(), Some(&2));
    }

    #[test]
    fn error_clears_prior_success() {
        let mut slot = RequestSlot::default();
        let t = slot.begin();
        slot.finish(t, Ok(7));
        let t = slot.begin();
        assert!(slot.finish(t, Err(failure())));
        assert_eq!(slot.state(), &LoadState::Error("Could not load.".to_string()));
        assert!(slot.state().data().is_none());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut slot = RequestSlot::default();
        let older = slot.begin();
        let newer = slot.begin();
        assert!(!slot.finish(older, Ok("old")));
        assert!(slot.state().is_loading());
        assert!(slot.finish(newer, Ok("new")));
        assert_eq!(slot.state().data(), Some(&"new"));
    }

    #[test]
    fn reset_makes_in_flight_request_stale() {
        let mut slot = RequestSlot::default();
        let t = slot.begin();
        slot.reset();
        assert!(!slot.finish(t, Ok(1)));
        assert_eq!(slot.state(), &LoadState::Idle);
    }

    #[tokio::test]
    async fn cancelled_ticket_stops_waiting() {
        let mut slot: RequestSlot<u32> = RequestSlot::default();
        let first = slot.begin();
        let _second = slot.begin();
        let result = first
            .run(std::future::pending::<Result<u32, FetchError>>())
            .await;
        assert_eq!(result.unwrap_err().kind, FetchErrorKind::Cancelled);
    }

    #[tokio::test]
    async fn started_request_resolves_outside_the_slot() {
        let mut slot: RequestSlot<u32> = RequestSlot::default();
        let pending = slot.start(async { Ok(3) });
        assert!(slot.state().is_loading());
        let finished = pending.resolve().await;
        assert_eq!(finished.result().as_ref().ok(), Some(&3));
        assert!(slot.apply(finished));
        assert_eq!(slot.state().data(), Some(&3));
    }

    #[tokio::test]
    async fn live_ticket_returns_future_output() {
        let mut slot: RequestSlot<u32> = RequestSlot::default();
        let ticket = slot.begin();
        let result = ticket.run(async { Ok(5) }).await;
        assert!(slot.finish(ticket, result));
        assert_eq!(slot.state().data(), Some(&5));
    }
}
