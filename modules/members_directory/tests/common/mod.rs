#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use members_directory::contract::{
    client::DirectoryGateway,
    error::GatewayError,
    model::{Member, MemberId, MemberPatch, NewMember, Role},
};
use members_directory::domain::role_gate::RoleGate;
use members_directory::infra::InMemoryDirectoryGateway;
use members_directory::DirectoryView;

pub fn member(id: u64, name: &str, email: &str, role: Role) -> Member {
    Member {
        id: MemberId::from(id),
        name: name.to_string(),
        email: email.to_string(),
        role,
    }
}

pub fn ana() -> Member {
    member(1, "Ana Silva", "ana@x.com", Role::Member)
}

/// Gateway fake: delegates to the in-memory backend, counts calls, and can be
/// told to fail or to hold a call until released.
#[derive(Default)]
pub struct ScriptedGateway {
    inner: InMemoryDirectoryGateway,
    pub list_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    fail_list: Mutex<Option<GatewayError>>,
    fail_create: Mutex<Option<GatewayError>>,
    fail_update: Mutex<Option<GatewayError>>,
    hold_writes: Mutex<Option<Arc<Notify>>>,
}

impl ScriptedGateway {
    pub fn with_members(members: Vec<Member>) -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryDirectoryGateway::with_members(members),
            ..Default::default()
        })
    }

    pub fn fail_list_with(&self, e: GatewayError) {
        *self.fail_list.lock() = Some(e);
    }

    pub fn fail_create_with(&self, e: GatewayError) {
        *self.fail_create.lock() = Some(e);
    }

    pub fn fail_update_with(&self, e: GatewayError) {
        *self.fail_update.lock() = Some(e);
    }

    /// Block create/update until the returned handle is notified.
    pub fn hold_writes(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.hold_writes.lock() = Some(Arc::clone(&notify));
        notify
    }

    pub fn lists(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn creates(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    async fn maybe_hold(&self) {
        let hold = self.hold_writes.lock().clone();
        if let Some(notify) = hold {
            notify.notified().await;
        }
    }
}

#[async_trait]
impl DirectoryGateway for ScriptedGateway {
    async fn list(&self) -> Result<Vec<Member>, GatewayError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let failure = self.fail_list.lock().clone();
        if let Some(e) = failure {
            return Err(e);
        }
        self.inner.list().await
    }

    async fn create(&self, draft: NewMember) -> Result<Member, GatewayError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_hold().await;
        let failure = self.fail_create.lock().clone();
        if let Some(e) = failure {
            return Err(e);
        }
        self.inner.create(draft).await
    }

    async fn update(&self, id: &MemberId, patch: MemberPatch) -> Result<Member, GatewayError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_hold().await;
        let failure = self.fail_update.lock().clone();
        if let Some(e) = failure {
            return Err(e);
        }
        self.inner.update(id, patch).await
    }
}

pub fn view_over(gateway: &Arc<ScriptedGateway>) -> DirectoryView {
    let gateway: Arc<dyn DirectoryGateway> = gateway.clone();
    DirectoryView::new(gateway, RoleGate::default())
}
