//! Member list session tying the filter store to the backend

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::debug;

use roster_api::filter::MemberFilter;
use roster_api::{ListResult, Member};
use roster_client::{ApiFailure, MemberApi};

use crate::feedback;
use crate::store::{FilterStore, FnFilterChangeListener};

/// Source of member pages, implemented by the HTTP facade and by test
/// doubles.
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Fetch one page of members matching the filter.
    async fn fetch_page(&self, filter: &MemberFilter) -> Result<ListResult<Member>, ApiFailure>;
}

#[async_trait]
impl MemberDirectory for MemberApi {
    async fn fetch_page(&self, filter: &MemberFilter) -> Result<ListResult<Member>, ApiFailure> {
        self.filter(filter).await
    }
}

/// What the view renders: the latest page, or why there is none yet.
#[derive(Clone, Debug, Default)]
pub enum ListSnapshot {
    /// No fetch has completed.
    #[default]
    Empty,
    /// The most recent published fetch succeeded.
    Loaded(ListResult<Member>),
    /// The most recent published fetch failed; the text is ready for
    /// display.
    Failed(String),
}

/// One logical list view over the member directory.
///
/// Every [`refresh`](Self::refresh) takes a fresh ticket and snapshots the
/// filter it is fetching for. A response only publishes when its ticket is
/// still the newest one and the store still holds the filter it was
/// fetched with; anything else is dropped on arrival. Nothing here retries
/// on its own, calling `refresh` again is the retry path.
pub struct MemberListSession {
    directory: Arc<dyn MemberDirectory>,
    store: Arc<FilterStore>,
    ticket: AtomicU64,
    snapshot: RwLock<ListSnapshot>,
    dirty: Arc<AtomicBool>,
}

impl MemberListSession {
    pub fn new(directory: Arc<dyn MemberDirectory>, store: Arc<FilterStore>) -> Self {
        let dirty = Arc::new(AtomicBool::new(true));
        let flag = dirty.clone();
        store.subscribe(Arc::new(FnFilterChangeListener::new(
            move |_: &MemberFilter| {
                flag.store(true, Ordering::SeqCst);
            },
        )));
        Self {
            directory,
            store,
            ticket: AtomicU64::new(0),
            snapshot: RwLock::new(ListSnapshot::default()),
            dirty,
        }
    }

    /// The store this session renders.
    pub fn store(&self) -> &FilterStore {
        &self.store
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> ListSnapshot {
        self.snapshot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Whether the snapshot no longer reflects the current filter.
    pub fn is_stale(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Fetch the page for the current filter and publish the outcome.
    pub async fn refresh(&self) -> ListSnapshot {
        let ticket = self.ticket.fetch_add(1, Ordering::SeqCst) + 1;
        let filter = self.store.current();
        self.dirty.store(false, Ordering::SeqCst);

        let outcome = self.directory.fetch_page(&filter).await;

        if self.ticket.load(Ordering::SeqCst) != ticket || self.store.current() != filter {
            debug!("dropping superseded member page for ticket {}", ticket);
            return self.snapshot();
        }
        let snapshot = match outcome {
            Ok(page) => ListSnapshot::Loaded(page),
            Err(failure) => ListSnapshot::Failed(feedback::user_message(&failure)),
        };
        *self
            .snapshot
            .write()
            .unwrap_or_else(|e| e.into_inner()) = snapshot.clone();
        snapshot
    }

    /// Line under the table header, "showing 21-40 of 120" style.
    pub fn showing_line(&self) -> Option<String> {
        match self.snapshot() {
            ListSnapshot::Loaded(page) => {
                let (from, to) = page.showing_range()?;
                Some(format!("showing {}-{} of {}", from, to, page.total))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use chrono::NaiveDate;
    use reqwest::StatusCode;
    use roster_api::model::{Gender, MemberStatus};

    fn member(login_id: &str) -> Member {
        Member {
            id: format!("id-{login_id}"),
            login_id: login_id.to_string(),
            name: "Jane Roe".to_string(),
            email: "jane@example.com".to_string(),
            gender: Gender::Female,
            phone: "0912345678".to_string(),
            alt_phone: None,
            date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 1).unwrap(),
            membership_fee_rate: 1.5,
            referral_fee_rate: 0.5,
            transaction_count: 0,
            last_transaction_at: None,
            referrer_id: None,
            referrer: None,
            agent_id: None,
            status: MemberStatus::Valid,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    /// Answers the n-th call after the n-th configured delay, labelling
    /// rows by call order.
    struct ScriptedDirectory {
        delays_ms: Vec<u64>,
        calls: AtomicU64,
        seen: Mutex<Vec<MemberFilter>>,
    }

    impl ScriptedDirectory {
        fn new(delays_ms: Vec<u64>) -> Self {
            Self {
                delays_ms,
                calls: AtomicU64::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MemberDirectory for ScriptedDirectory {
        async fn fetch_page(
            &self,
            filter: &MemberFilter,
        ) -> Result<ListResult<Member>, ApiFailure> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) as usize;
            self.seen.lock().unwrap().push(filter.clone());
            tokio::time::sleep(Duration::from_millis(self.delays_ms[call])).await;
            Ok(ListResult::new(
                vec![member(&format!("call-{call}"))],
                1,
                filter.current_page,
                filter.limit,
            ))
        }
    }

    struct FailingDirectory;

    #[async_trait]
    impl MemberDirectory for FailingDirectory {
        async fn fetch_page(
            &self,
            _filter: &MemberFilter,
        ) -> Result<ListResult<Member>, ApiFailure> {
            Err(ApiFailure::protocol(
                StatusCode::SERVICE_UNAVAILABLE,
                "Failed to filter members",
            ))
        }
    }

    #[tokio::test]
    async fn test_newer_refresh_wins_over_slower_older_one() {
        let directory = Arc::new(ScriptedDirectory::new(vec![80, 5]));
        let store = Arc::new(FilterStore::new());
        let session = MemberListSession::new(directory, store);

        let (first, second) = tokio::join!(session.refresh(), session.refresh());

        let visible = match session.snapshot() {
            ListSnapshot::Loaded(page) => page.rows[0].login_id.clone(),
            other => panic!("expected a loaded page, got {other:?}"),
        };
        assert_eq!(visible, "call-1");

        // The superseded refresh hands back whatever is published
        for outcome in [first, second] {
            match outcome {
                ListSnapshot::Loaded(page) => assert_eq!(page.rows[0].login_id, "call-1"),
                other => panic!("expected a loaded page, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_refresh_fetches_the_current_filter() {
        let directory = Arc::new(ScriptedDirectory::new(vec![1]));
        let store = Arc::new(FilterStore::new());
        let session = MemberListSession::new(directory.clone(), store.clone());

        store.set_page(2);
        session.refresh().await;

        let seen = directory.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].current_page, 2);
    }

    #[tokio::test]
    async fn test_result_for_a_replaced_filter_is_dropped() {
        let directory = Arc::new(ScriptedDirectory::new(vec![100, 1]));
        let store = Arc::new(FilterStore::new());
        let session = Arc::new(MemberListSession::new(directory, store.clone()));

        let slow = tokio::spawn({
            let session = session.clone();
            async move { session.refresh().await }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        store.set_page(2);

        let outcome = slow.await.unwrap();
        assert!(matches!(outcome, ListSnapshot::Empty));
        assert!(session.is_stale());

        // The explicit follow-up settles the view on the new page
        session.refresh().await;
        assert!(!session.is_stale());
        match session.snapshot() {
            ListSnapshot::Loaded(page) => assert_eq!(page.page, 2),
            other => panic!("expected a loaded page, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_fetch_publishes_user_facing_text() {
        let store = Arc::new(FilterStore::new());
        let session = MemberListSession::new(Arc::new(FailingDirectory), store);

        match session.refresh().await {
            ListSnapshot::Failed(text) => assert_eq!(text, feedback::GENERIC_ERROR),
            other => panic!("expected a failure, got {other:?}"),
        }
        assert!(session.showing_line().is_none());
    }

    #[tokio::test]
    async fn test_showing_line_comes_from_the_paging_counter() {
        let directory = Arc::new(ScriptedDirectory::new(vec![1]));
        let store = Arc::new(FilterStore::new());
        let session = MemberListSession::new(directory, store.clone());

        assert!(session.is_stale());
        session.refresh().await;
        assert!(!session.is_stale());

        // One row on page one
        assert_eq!(session.showing_line().as_deref(), Some("showing 1-1 of 1"));
    }
}
