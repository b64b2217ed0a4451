//! # Dependency Node Resolver
//!
//! Resolves identifiers into modules, dependencies first, inserting every
//! valid plugin into the shared [`PluginList`] as soon as its whole subtree
//! has settled.
//!
//! Each identifier is fetched at most once per resolver run. The ledger
//! maps identifiers to either an in-flight [`Shared`] resolution or the
//! completed module, so concurrent branches that need the same node await
//! one future and observe one result (or one failure).
//!
//! Cycles are broken with a wait-for graph kept next to the ledger: a node
//! records every dependency it is waiting on. Before waiting on an
//! in-flight node, the resolver checks whether that node is (transitively)
//! waiting on the requester; if so, waiting would deadlock, and the
//! dependency is treated as already satisfied instead.
//!
//! All branches are driven from one task. The ledger and the plugin list
//! are only touched in short synchronous sections, never across an
//! `.await`.
use std::collections::{HashMap, HashSet};
use std::mem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockWriteGuard, Weak};

use futures::future::{self, BoxFuture, FutureExt, Shared};

use crate::plugin_system::assembler::PluginList;
use crate::plugin_system::error::LoadError;
use crate::plugin_system::identifier::ModuleId;
use crate::plugin_system::module::{ModuleSource, ResolvedModule};
use crate::plugin_system::traits::Host;
use crate::plugin_system::validator::{self, Classification};

type NodeOutput = Result<Arc<ResolvedModule>, LoadError>;
type SharedNode = Shared<BoxFuture<'static, NodeOutput>>;

/// `None` when the dependency is part of a cycle that is still being resolved
pub type Requirement = Result<Option<Arc<ResolvedModule>>, LoadError>;

enum LedgerEntry {
    InProgress {
        node: SharedNode,
        /// Dependencies this node is currently waiting on
        waiting_on: HashSet<ModuleId>,
    },
    Complete(Arc<ResolvedModule>),
}

#[derive(Default)]
struct Ledger {
    entries: HashMap<ModuleId, LedgerEntry>,
}

impl Ledger {
    /// Whether `from` is, directly or transitively, waiting on `target`.
    fn waits_on(&self, from: &ModuleId, target: &ModuleId) -> bool {
        let mut stack = vec![from];
        let mut seen = HashSet::new();
        while let Some(current) = stack.pop() {
            if current == target {
                return true;
            }
            if !seen.insert(current) {
                continue;
            }
            if let Some(LedgerEntry::InProgress { waiting_on, .. }) = self.entries.get(current) {
                stack.extend(waiting_on.iter());
            }
        }
        false
    }

    fn add_wait(&mut self, parent: &ModuleId, dependency: &ModuleId) {
        if let Some(LedgerEntry::InProgress { waiting_on, .. }) = self.entries.get_mut(parent) {
            waiting_on.insert(dependency.clone());
        }
    }

    fn remove_wait(&mut self, parent: &ModuleId, dependency: &ModuleId) {
        if let Some(LedgerEntry::InProgress { waiting_on, .. }) = self.entries.get_mut(parent) {
            waiting_on.remove(dependency);
        }
    }

    /// Mark `id` complete, returning the replaced entry so the caller can
    /// drop it outside the lock.
    fn complete(&mut self, id: &ModuleId, module: Arc<ResolvedModule>) -> Option<LedgerEntry> {
        self.entries.insert(id.clone(), LedgerEntry::Complete(module))
    }
}

struct ResolverState {
    source: Arc<dyn ModuleSource>,
    owner: Weak<dyn Host>,
    plugins: Arc<RwLock<PluginList>>,
    ledger: Mutex<Ledger>,
}

impl ResolverState {
    fn lock_ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_plugins(&self) -> RwLockWriteGuard<'_, PluginList> {
        self.plugins.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Require `id` on behalf of `parent` (`None` for a top-level request).
    ///
    /// The ledger is updated synchronously, before the returned future is
    /// first polled, so sibling requirements created in the same batch
    /// already see each other.
    fn require(self: &Arc<Self>, parent: Option<&ModuleId>, id: ModuleId) -> BoxFuture<'static, Requirement> {
        let node = {
            let mut guard = self.lock_ledger();
            let ledger = &mut *guard;
            let node = match ledger.entries.get(&id) {
                Some(LedgerEntry::Complete(module)) => {
                    log::debug!("Module '{}' already resolved", id.key());
                    return future::ready(Ok(Some(Arc::clone(module)))).boxed();
                }
                Some(LedgerEntry::InProgress { node, .. }) => {
                    if let Some(parent) = parent {
                        if ledger.waits_on(&id, parent) {
                            log::debug!(
                                "Cycle: '{}' is still resolving and waits on '{}', treating it as satisfied",
                                id.key(),
                                parent.key()
                            );
                            return future::ready(Ok(None)).boxed();
                        }
                    }
                    node.clone()
                }
                None => {
                    let node = self.resolve_node(id.clone()).shared();
                    ledger.entries.insert(
                        id.clone(),
                        LedgerEntry::InProgress { node: node.clone(), waiting_on: HashSet::new() },
                    );
                    node
                }
            };
            if let Some(parent) = parent {
                ledger.add_wait(parent, &id);
            }
            node
        };

        let state = Arc::clone(self);
        let parent = parent.cloned();
        async move {
            let outcome = node.await;
            if let Some(parent) = parent {
                state.lock_ledger().remove_wait(&parent, &id);
            }
            outcome.map(Some)
        }
        .boxed()
    }

    /// Fetch, validate, resolve dependencies, then insert.
    fn resolve_node(self: &Arc<Self>, id: ModuleId) -> BoxFuture<'static, NodeOutput> {
        let state = Arc::clone(self);
        async move {
            let key = id.key();
            log::debug!("Fetching module '{}'", key);
            let module = state
                .source
                .fetch(&key)
                .await
                .map_err(|source| LoadError::Fetch { id: id.clone(), source })?;
            let module = Arc::new(module);
            log::debug!("Fetched '{}' ({} declared deps)", key, module.deps.len());

            // Reject before touching dependencies or constructing anything.
            let classification = validator::classify(&id, &module).check(&id)?;

            let dependencies = module.deps.iter().map(|dep| state.require(Some(&id), dep.clone()));
            future::try_join_all(dependencies).await?;

            if let Classification::Valid(factory) = classification {
                let plugin = validator::instantiate(&id, &module, factory.as_ref(), &state.owner);
                if state.write_plugins().insert(plugin) {
                    log::debug!("Added plugin '{}'", id.name());
                } else {
                    log::debug!("Plugin '{}' is already in the collection", id.name());
                }
            }

            let replaced = state.lock_ledger().complete(&id, Arc::clone(&module));
            drop(replaced);
            Ok(module)
        }
        .boxed()
    }
}

/// Clears the ledger when a run ends, however it ends. In-flight entries
/// hold futures that reference the resolver state.
struct LedgerReset<'a>(&'a ResolverState);

impl Drop for LedgerReset<'_> {
    fn drop(&mut self) {
        let drained = mem::take(&mut *self.0.lock_ledger());
        drop(drained);
    }
}

/// Resolves plugin graphs into a shared [`PluginList`].
pub struct DependencyResolver {
    state: Arc<ResolverState>,
}

impl DependencyResolver {
    pub fn new(source: Arc<dyn ModuleSource>, owner: Weak<dyn Host>, plugins: Arc<RwLock<PluginList>>) -> Self {
        Self {
            state: Arc::new(ResolverState {
                source,
                owner,
                plugins,
                ledger: Mutex::new(Ledger::default()),
            }),
        }
    }

    /// Resolve one identifier and its transitive dependencies.
    pub async fn resolve(&self, id: ModuleId) -> Requirement {
        let mut resolved = self.resolve_all(vec![id]).await?;
        Ok(resolved.pop().flatten())
    }

    /// Resolve every identifier concurrently. Fails with the first error;
    /// the remaining branches are dropped without touching the plugin list.
    pub async fn resolve_all(&self, ids: Vec<ModuleId>) -> Result<Vec<Option<Arc<ResolvedModule>>>, LoadError> {
        let _reset = LedgerReset(&self.state);
        let branches = ids.into_iter().map(|id| self.state.require(None, id));
        future::try_join_all(branches).await
    }
}
