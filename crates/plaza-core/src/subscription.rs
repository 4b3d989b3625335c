use futures::stream::BoxStream;
use futures::StreamExt;
use std::any::TypeId;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// A long-lived event source managed by the runtime.
///
/// Subscriptions are declared in [`Model::subscriptions`](crate::Model::subscriptions)
/// and started or stopped by diffing: each update cycle the runtime compares
/// the returned set with the active one, starting new entries and aborting
/// the ones that disappeared. A widget that only returns a subscription while
/// it is open therefore listens exactly for the duration of that state.
pub struct Subscription<Msg: Send + 'static> {
    pub(crate) id: SubscriptionId,
    pub(crate) spawn: Box<dyn FnOnce(mpsc::UnboundedSender<Msg>) -> AbortHandle + Send>,
}

/// Identity for diffing subscriptions between update cycles.
///
/// Composed of a Rust [`TypeId`] and a numeric discriminant, so two widgets
/// of the same type can hold distinct listeners.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    type_id: TypeId,
    discriminant: u64,
}

impl SubscriptionId {
    /// Create an ID from a type and a numeric discriminant.
    pub fn new<T: 'static>(discriminant: u64) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            discriminant,
        }
    }

    /// Create an ID from a type alone (for singletons).
    pub fn of<T: 'static>() -> Self {
        Self::new::<T>(0)
    }

    /// Create an ID from a type and a string discriminant.
    pub fn with_str<T: 'static>(s: &str) -> Self {
        let mut hasher = std::hash::DefaultHasher::new();
        s.hash(&mut hasher);
        Self::new::<T>(hasher.finish())
    }
}

impl<Msg: Send + 'static> Subscription<Msg> {
    /// Create from a raw stream and id. The stream is polled on its own task
    /// until it ends or the subscription is removed.
    pub fn from_stream(id: SubscriptionId, stream: BoxStream<'static, Msg>) -> Self {
        Subscription {
            id,
            spawn: Box::new(move |tx| {
                let handle = tokio::spawn(forward(stream, tx));
                handle.abort_handle()
            }),
        }
    }

    /// The identity used for diffing.
    pub fn id(&self) -> &SubscriptionId {
        &self.id
    }

    /// Transform the message type (for component composition).
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Subscription<NewMsg> {
        let f = Arc::new(f);
        Subscription {
            id: self.id,
            spawn: Box::new(move |new_tx: mpsc::UnboundedSender<NewMsg>| {
                let (inner_tx, mut inner_rx) = mpsc::unbounded_channel::<Msg>();
                let abort = (self.spawn)(inner_tx);

                // Ends on its own once the source task is aborted and drops
                // its sender.
                tokio::spawn(async move {
                    while let Some(msg) = inner_rx.recv().await {
                        if new_tx.send(f(msg)).is_err() {
                            break;
                        }
                    }
                });

                abort
            }),
        }
    }
}

pub(crate) async fn forward<Msg: Send + 'static>(
    mut stream: BoxStream<'static, Msg>,
    tx: mpsc::UnboundedSender<Msg>,
) {
    while let Some(msg) = stream.next().await {
        if tx.send(msg).is_err() {
            break;
        }
    }
}

/// Manages active subscriptions, performing diffing between cycles.
pub(crate) struct SubscriptionManager<Msg: Send + 'static> {
    active: HashMap<SubscriptionId, AbortHandle>,
    msg_tx: mpsc::UnboundedSender<Msg>,
}

impl<Msg: Send + 'static> SubscriptionManager<Msg> {
    pub fn new(msg_tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self {
            active: HashMap::new(),
            msg_tx,
        }
    }

    /// Start new subscriptions, stop removed ones, keep unchanged ones.
    pub fn reconcile(&mut self, new_subs: Vec<Subscription<Msg>>) {
        let mut incoming: HashMap<SubscriptionId, Subscription<Msg>> = new_subs
            .into_iter()
            .map(|sub| (sub.id.clone(), sub))
            .collect();

        self.active.retain(|id, handle| {
            let keep = incoming.contains_key(id);
            if !keep {
                tracing::trace!(?id, "stopping subscription");
                handle.abort();
            }
            keep
        });

        for (id, sub) in incoming.drain() {
            if !self.active.contains_key(&id) {
                tracing::trace!(?id, "starting subscription");
                let handle = (sub.spawn)(self.msg_tx.clone());
                self.active.insert(id, handle);
            }
        }
    }

    /// Abort all active subscriptions.
    pub fn shutdown(&mut self) {
        for (_, handle) in self.active.drain() {
            handle.abort();
        }
    }

    #[cfg(test)]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}
