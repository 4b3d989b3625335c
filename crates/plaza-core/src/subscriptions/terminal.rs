use crate::event::TerminalEvent;
use crate::subscription::{forward, Subscription, SubscriptionId};
use crossterm::event::{EventStream, MouseEvent};
use futures::StreamExt;
use std::sync::{Arc, OnceLock};
use tokio::sync::broadcast;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio_stream::wrappers::BroadcastStream;

const HUB_CAPACITY: usize = 256;

static HUB: OnceLock<broadcast::Sender<TerminalEvent>> = OnceLock::new();

/// Marker type for the application-wide terminal event subscription.
pub struct TerminalEvents;

/// Marker type for keyed pointer-down subscriptions.
pub struct PointerEvents;

/// Sender side of the shared event pump.
///
/// The crossterm `EventStream` is created lazily on the first call, inside
/// the runtime, and lives for the rest of the process. Creating several
/// `EventStream`s would make them compete for the same input, so every
/// subscription receives a copy through a broadcast channel instead.
pub(crate) fn event_hub() -> broadcast::Sender<TerminalEvent> {
    HUB.get_or_init(|| {
        let (tx, _) = broadcast::channel(HUB_CAPACITY);
        let pump = tx.clone();
        tokio::spawn(async move {
            let mut stream = EventStream::new();
            while let Some(result) = stream.next().await {
                match result {
                    // No receivers is fine: nobody is listening right now.
                    Ok(event) => {
                        let _ = pump.send(TerminalEvent::from(event));
                    }
                    Err(err) => tracing::warn!(%err, "terminal event stream error"),
                }
            }
        });
        tx
    })
    .clone()
}

fn hub_subscription<Msg: Send + 'static>(
    id: SubscriptionId,
    map: Arc<dyn Fn(TerminalEvent) -> Option<Msg> + Send + Sync>,
) -> Subscription<Msg> {
    Subscription {
        id,
        spawn: Box::new(move |tx: mpsc::UnboundedSender<Msg>| -> AbortHandle {
            let rx = event_hub().subscribe();
            let stream = BroadcastStream::new(rx).filter_map(move |received| {
                let map = map.clone();
                // A lagged receiver skips what it missed.
                async move { received.ok().and_then(|event| map(event)) }
            });
            tokio::spawn(forward(Box::pin(stream), tx)).abort_handle()
        }),
    }
}

/// Create a terminal events subscription that maps each event through a
/// user-provided function.
///
/// The `map` closure receives every [`TerminalEvent`] and returns `Some(Msg)`
/// to forward it to the runtime or `None` to discard it.
///
/// # Example
///
/// ```rust,ignore
/// fn subscriptions(&self) -> Vec<Subscription<Msg>> {
///     vec![terminal_events(|event| match event {
///         TerminalEvent::Key(key) => Some(Msg::KeyPress(key)),
///         TerminalEvent::Mouse(mouse) => Some(Msg::Mouse(mouse)),
///         _ => None,
///     })]
/// }
/// ```
pub fn terminal_events<Msg: Send + 'static>(
    map: impl Fn(TerminalEvent) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    hub_subscription(SubscriptionId::of::<TerminalEvents>(), Arc::new(map))
}

/// Create a pointer-down subscription identified by `key`.
///
/// Only left-button presses are delivered. Distinct keys produce distinct
/// subscriptions, so two widgets can listen at the same time; returning the
/// same key on consecutive cycles keeps the existing listener alive.
pub fn pointer_events<Msg: Send + 'static>(
    key: &str,
    map: impl Fn(MouseEvent) -> Msg + Send + Sync + 'static,
) -> Subscription<Msg> {
    hub_subscription(
        SubscriptionId::with_str::<PointerEvents>(key),
        Arc::new(move |event: TerminalEvent| event.pointer_down().map(&map)),
    )
}
