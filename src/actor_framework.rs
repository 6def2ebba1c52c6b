use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, DTOs and Filters)
// =============================================================================

/// Trait that any backend table row must implement to be managed by ResourceActor
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    /// Table name, used in logs.
    const NAME: &'static str;

    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;
    type Filter: Send + Sync + Debug;

    fn id(&self) -> &Self::Id;

    /// Construct the full row from the generated ID and the insert payload.
    /// Returning an error rejects the insert; nothing is stored.
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, String>;

    /// Row-level filter used by list queries.
    fn matches(&self, _filter: &Self::Filter) -> bool {
        true
    }

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), String> {
        Ok(())
    }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), String>;
    fn on_delete(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Errors surfaced by the generic actor and client.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Rejected(String),
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T::Id>,
    },
    CreateBatch {
        params: Vec<T::CreateParams>,
        respond_to: Response<Vec<T::Id>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        filter: T::Filter,
        respond_to: Response<Vec<T>>,
    },
    Count {
        respond_to: Response<usize>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// In-process stand-in for one backend table.
///
/// Requests are handled one at a time, so every request (including a batch
/// insert) is atomic with respect to the table. Rows are listed in insertion
/// order.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    insertion_order: Vec<T::Id>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            insertion_order: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient { sender };
        (actor, client)
    }

    #[instrument(name = "resource_actor", skip(self), fields(table = T::NAME))]
    pub async fn run(mut self) {
        info!("Resource actor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params));
                }
                ResourceRequest::CreateBatch { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create_batch(params));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get(&id).cloned()));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_list(&filter)));
                }
                ResourceRequest::Count { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.len()));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, patch));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
            }
        }

        info!("Resource actor stopped");
    }

    fn build(&self, params: T::CreateParams) -> Result<T, FrameworkError> {
        let id = (self.next_id_fn)();
        let mut item = T::from_create_params(id, params).map_err(FrameworkError::Rejected)?;
        item.on_create().map_err(FrameworkError::Rejected)?;
        Ok(item)
    }

    fn insert(&mut self, item: T) -> T::Id {
        let id = item.id().clone();
        if self.store.insert(id.clone(), item).is_none() {
            self.insertion_order.push(id.clone());
        }
        id
    }

    fn handle_create(&mut self, params: T::CreateParams) -> Result<T::Id, FrameworkError> {
        match self.build(params) {
            Ok(item) => {
                let id = self.insert(item);
                debug!(id = %id, "Row created");
                Ok(id)
            }
            Err(e) => {
                warn!(error = %e, "Insert rejected");
                Err(e)
            }
        }
    }

    /// All rows are built before any is stored; one rejection stores nothing.
    fn handle_create_batch(
        &mut self,
        params: Vec<T::CreateParams>,
    ) -> Result<Vec<T::Id>, FrameworkError> {
        let items = params
            .into_iter()
            .map(|p| self.build(p))
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| warn!(error = %e, "Batch insert rejected"))?;

        let ids: Vec<T::Id> = items.into_iter().map(|item| self.insert(item)).collect();
        debug!(rows = ids.len(), "Batch created");
        Ok(ids)
    }

    fn handle_list(&self, filter: &T::Filter) -> Vec<T> {
        let rows: Vec<T> = self
            .insertion_order
            .iter()
            .filter_map(|id| self.store.get(id))
            .filter(|item| item.matches(filter))
            .cloned()
            .collect();
        debug!(rows = rows.len(), "Listed rows");
        rows
    }

    fn handle_update(&mut self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        let item = self
            .store
            .get_mut(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_update(patch).map_err(FrameworkError::Rejected)?;
        debug!(id = %id, "Row updated");
        Ok(item.clone())
    }

    fn handle_delete(&mut self, id: T::Id) -> Result<(), FrameworkError> {
        let item = self
            .store
            .get(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_delete().map_err(FrameworkError::Rejected)?;
        self.store.remove(&id);
        self.insertion_order.retain(|existing| existing != &id);
        debug!(id = %id, "Row deleted");
        Ok(())
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn create_batch(
        &self,
        params: Vec<T::CreateParams>,
    ) -> Result<Vec<T::Id>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::CreateBatch { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self, filter: T::Filter) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { filter, respond_to })
            .await
    }

    pub async fn count(&self) -> Result<usize, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Count { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to })
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }
}
