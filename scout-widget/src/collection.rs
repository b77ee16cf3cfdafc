use std::sync::{Arc, Mutex};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::AbortHandle;
use tracing::{debug, warn};

use scout_api::request::SearchRequest;
use scout_api::response::SearchResponse;
use scout_api::result::SearchResult;
use scout_api::status;

use crate::events::SearchEvent;
use crate::transport::SearchClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    Search,
    NextPage,
}

/// The exclusive in-flight request slot. A completing request may only
/// apply its outcome while its ticket is still the current one; issuing
/// a new request replaces the slot and aborts the previous task, so a
/// superseded response can never mutate state or emit events.
struct InFlight {
    ticket: u64,
    kind: RequestKind,
    abort: AbortHandle,
}

#[derive(Default)]
struct State {
    term: String,
    page: u32,
    total_count: u64,
    items: Vec<SearchResult>,
    next_ticket: u64,
    in_flight: Option<InFlight>,
    subscribers: Vec<UnboundedSender<SearchEvent>>,
}

impl State {
    fn emit(&mut self, event: SearchEvent) {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    fn supersede(&mut self) {
        if let Some(prev) = self.in_flight.take() {
            debug!("superseding in-flight search request (ticket {})", prev.ticket);
            prev.abort.abort();
        }
    }
}

/// Result collection: owns paging and cancellation state, issues search
/// requests, and notifies subscribers through [`SearchEvent`]s.
///
/// Handles are cheap to clone and share one underlying state. Request
/// futures run as spawned tasks, so every issuing operation must be
/// called from within a tokio runtime. Failures are never returned to
/// the caller; they surface solely as [`SearchEvent::Error`].
#[derive(Clone)]
pub struct SearchCollection {
    state: Arc<Mutex<State>>,
    client: SearchClient,
    endpoint: String,
}

impl SearchCollection {
    pub fn new(client: SearchClient, endpoint: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Registers a subscriber for collection lifecycle events. Closed
    /// receivers are pruned on the next emission.
    pub fn subscribe(&self) -> UnboundedReceiver<SearchEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.state.lock().unwrap().subscribers.push(tx);
        rx
    }

    /// Starts a new search for `term`: paging state resets, accumulated
    /// items are discarded, and any in-flight request is superseded. On
    /// success emits `Search`; on any failure emits `Error`.
    pub fn perform_search(&self, term: &str) {
        let mut st = self.state.lock().unwrap();
        st.term = term.to_string();
        st.page = 0;
        st.total_count = 0;
        st.items.clear();
        let request = SearchRequest::new(term, 0);
        self.issue_locked(&mut st, request, RequestKind::Search);
    }

    /// Requests the page after the last loaded one with the retained
    /// term. A second call while a next-page request is already in
    /// flight is a no-op; any other in-flight request is superseded. On
    /// success the page counter advances, items are appended, and `Next`
    /// is emitted.
    pub fn load_next_page(&self) {
        let mut st = self.state.lock().unwrap();
        if matches!(
            st.in_flight,
            Some(InFlight {
                kind: RequestKind::NextPage,
                ..
            })
        ) {
            debug!("next-page request already in flight");
            return;
        }
        let request = SearchRequest::new(st.term.clone(), st.page + 1);
        self.issue_locked(&mut st, request, RequestKind::NextPage);
    }

    /// Aborts any in-flight request and resets paging state. The search
    /// term is retained for a later `load_next_page`. No event is
    /// emitted; a pending response arriving later is ignored.
    pub fn cancel_search(&self) {
        let mut st = self.state.lock().unwrap();
        st.supersede();
        st.page = 0;
        st.total_count = 0;
        st.items.clear();
    }

    /// True iff the accumulated item count is below the server-reported
    /// total.
    pub fn has_next_page(&self) -> bool {
        let st = self.state.lock().unwrap();
        (st.items.len() as u64) < st.total_count
    }

    pub fn items(&self) -> Vec<SearchResult> {
        self.state.lock().unwrap().items.clone()
    }

    pub fn page(&self) -> u32 {
        self.state.lock().unwrap().page
    }

    pub fn total_count(&self) -> u64 {
        self.state.lock().unwrap().total_count
    }

    pub fn term(&self) -> String {
        self.state.lock().unwrap().term.clone()
    }

    /// Issues `request` under the caller's lock: the previous slot is
    /// superseded, the task is spawned, and the new slot is installed
    /// before the lock is released, so the task cannot observe a
    /// half-updated slot.
    fn issue_locked(&self, st: &mut State, request: SearchRequest, kind: RequestKind) {
        st.supersede();
        let ticket = st.next_ticket;
        st.next_ticket += 1;

        let state = self.state.clone();
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let handle = tokio::spawn(async move {
            let outcome = match request.to_json() {
                Ok(body) => client.post_json(&endpoint, &body).await.map(Some),
                Err(err) => {
                    warn!("failed to encode search request: {err}");
                    Ok(None)
                }
            };

            let mut st = state.lock().unwrap();
            if st.in_flight.as_ref().map(|f| f.ticket) != Some(ticket) {
                debug!("dropping superseded search response (ticket {ticket})");
                return;
            }
            st.in_flight = None;

            let response = match outcome {
                Ok(Some(resp)) => resp,
                Ok(None) => {
                    st.emit(SearchEvent::Error);
                    return;
                }
                Err(err) => {
                    warn!("search request failed: {err:?}");
                    st.emit(SearchEvent::Error);
                    return;
                }
            };
            if !status::is_success(response.code) {
                warn!("search endpoint returned status {}", response.code);
                st.emit(SearchEvent::Error);
                return;
            }
            let parsed = match SearchResponse::from_slice(&response.body) {
                Ok(parsed) => parsed,
                Err(err) => {
                    warn!("search endpoint returned an unreadable body: {err}");
                    st.emit(SearchEvent::Error);
                    return;
                }
            };

            st.total_count = parsed.total;
            match kind {
                RequestKind::Search => {
                    st.items = parsed.into_results();
                    st.emit(SearchEvent::Search);
                }
                RequestKind::NextPage => {
                    st.page += 1;
                    st.items.extend(parsed.into_results());
                    st.emit(SearchEvent::Next);
                }
            }
        });

        st.in_flight = Some(InFlight {
            ticket,
            kind,
            abort: handle.abort_handle(),
        });
    }
}
