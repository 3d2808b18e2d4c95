use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use tracing::{debug, instrument, warn};

use crate::contract::{client::DirectoryGateway, error::GatewayError, model::Member};

/// Members last confirmed by the gateway.
///
/// Only [`CanonicalCollection::refresh`] writes, and it always swaps in a whole
/// new list. Mutations never patch it; they trigger a refresh instead.
#[derive(Debug)]
pub struct CanonicalCollection {
    members: ArcSwap<Vec<Member>>,
    issued: AtomicU64,
    applied: Mutex<u64>,
    last_error: Mutex<Option<String>>,
}

impl Default for CanonicalCollection {
    fn default() -> Self {
        Self {
            members: ArcSwap::from_pointee(Vec::new()),
            issued: AtomicU64::new(0),
            applied: Mutex::new(0),
            last_error: Mutex::new(None),
        }
    }
}

impl CanonicalCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Arc<Vec<Member>> {
        self.members.load_full()
    }

    /// Message of the most recent failed fetch, cleared by the next success.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().clone()
    }

    /// Fetch from the gateway and replace the collection.
    ///
    /// On failure the previous collection stays in place. When fetches overlap,
    /// a result older than the last applied one is dropped.
    #[instrument(name = "members_directory.collection.refresh", skip_all)]
    pub async fn refresh(
        &self,
        gateway: &dyn DirectoryGateway,
    ) -> Result<Arc<Vec<Member>>, GatewayError> {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        match gateway.list().await {
            Ok(list) => {
                let mut applied = self.applied.lock();
                if ticket < *applied {
                    debug!(ticket, applied = *applied, "Discarding stale fetch result");
                    return Ok(self.snapshot());
                }
                *applied = ticket;
                let fresh = Arc::new(list);
                self.members.store(Arc::clone(&fresh));
                *self.last_error.lock() = None;
                debug!(count = fresh.len(), "Canonical collection replaced");
                Ok(fresh)
            }
            Err(e) => {
                warn!(error = %e, "Fetching members failed; keeping last known collection");
                if ticket >= *self.applied.lock() {
                    *self.last_error.lock() = Some(e.to_string());
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::model::{MemberId, MemberPatch, NewMember, Role};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    fn member(id: u64, name: &str) -> Member {
        Member {
            id: MemberId::from(id),
            name: name.to_string(),
            email: format!("{id}@x.com"),
            role: Role::Member,
        }
    }

    /// First `list` waits for `release` and returns `slow`; later ones return `fast`.
    struct RacingGateway {
        calls: AtomicUsize,
        release: Notify,
        slow: Vec<Member>,
        fast: Result<Vec<Member>, GatewayError>,
    }

    #[async_trait]
    impl DirectoryGateway for RacingGateway {
        async fn list(&self) -> Result<Vec<Member>, GatewayError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                self.release.notified().await;
                return Ok(self.slow.clone());
            }
            self.fast.clone()
        }

        async fn create(&self, _draft: NewMember) -> Result<Member, GatewayError> {
            unimplemented!()
        }

        async fn update(&self, _id: &MemberId, _patch: MemberPatch) -> Result<Member, GatewayError> {
            unimplemented!()
        }
    }

    fn racing(fast: Result<Vec<Member>, GatewayError>) -> Arc<RacingGateway> {
        Arc::new(RacingGateway {
            calls: AtomicUsize::new(0),
            release: Notify::new(),
            slow: vec![member(1, "Old")],
            fast,
        })
    }

    #[tokio::test]
    async fn older_fetch_finishing_last_is_discarded() {
        let collection = Arc::new(CanonicalCollection::new());
        let gateway = racing(Ok(vec![member(1, "New"), member(2, "Second")]));

        let slow = {
            let (collection, gateway) = (Arc::clone(&collection), Arc::clone(&gateway));
            tokio::spawn(async move { collection.refresh(gateway.as_ref()).await })
        };
        while gateway.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        collection.refresh(gateway.as_ref()).await.unwrap();
        gateway.release.notify_one();
        slow.await.unwrap().unwrap();

        let names: Vec<_> = collection.snapshot().iter().map(|m| m.name.clone()).collect();
        assert_eq!(names, vec!["New", "Second"]);
    }

    #[tokio::test]
    async fn failure_keeps_previous_members_and_records_error() {
        let collection = CanonicalCollection::new();
        let gateway = racing(Err(GatewayError::server(502)));

        // first call succeeds once released
        gateway.release.notify_one();
        collection.refresh(gateway.as_ref()).await.unwrap();
        assert_eq!(collection.last_error(), None);

        let err = collection.refresh(gateway.as_ref()).await.unwrap_err();
        assert_eq!(err, GatewayError::server(502));
        assert_eq!(*collection.snapshot(), vec![member(1, "Old")]);
        assert!(collection.last_error().unwrap().contains("502"));
    }
}
