use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;

/// A side effect returned from [`Model::update`](crate::Model::update) or
/// [`Component::update`](crate::Component::update).
///
/// Widgets use [`Command::message`] to report outcomes to their parent (a
/// select emitting its new value, for instance); applications use
/// [`Command::perform`] to load data in the background.
///
/// # Examples
///
/// ```rust,ignore
/// // Do nothing:
/// let cmd = Command::none();
///
/// // Reload a catalog and map the rows to a message:
/// let cmd = Command::perform(
///     async { fetch_cost_centers().await },
///     |rows| Msg::CostCentersLoaded(rows),
/// );
///
/// // Quit the program:
/// let cmd = Command::quit();
/// ```
pub struct Command<Msg: Send + 'static> {
    pub(crate) inner: CommandInner<Msg>,
}

pub(crate) enum CommandInner<Msg: Send + 'static> {
    None,
    Action(Action<Msg>),
    Future(BoxFuture<'static, Msg>),
    Batch(Vec<Command<Msg>>),
}

/// Actions handled synchronously by the runtime, without spawning a task.
pub enum Action<Msg> {
    /// Deliver a message on the next loop iteration.
    Message(Msg),
    /// Quit the program.
    Quit,
}

impl<Msg: Send + 'static> Command<Msg> {
    /// No-op command.
    pub fn none() -> Self {
        Command {
            inner: CommandInner::None,
        }
    }

    /// Run an async future, map the result to a message.
    pub fn perform<F, T>(future: F, map: impl FnOnce(T) -> Msg + Send + 'static) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Command {
            inner: CommandInner::Future(Box::pin(async move { map(future.await) })),
        }
    }

    /// Send a message immediately.
    pub fn message(msg: Msg) -> Self {
        Command {
            inner: CommandInner::Action(Action::Message(msg)),
        }
    }

    /// Quit the program.
    pub fn quit() -> Self {
        Command {
            inner: CommandInner::Action(Action::Quit),
        }
    }

    /// Run several commands. Empty input collapses to [`Command::none`] and a
    /// single command is returned as is.
    pub fn batch(cmds: impl IntoIterator<Item = Command<Msg>>) -> Self {
        let mut cmds: Vec<_> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Command::none(),
            1 => cmds.pop().map_or_else(Command::none, |cmd| cmd),
            _ => Command {
                inner: CommandInner::Batch(cmds),
            },
        }
    }

    /// Transform the message type (for component composition).
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Command<NewMsg> {
        self.map_with(Arc::new(f))
    }

    fn map_with<NewMsg: Send + 'static>(
        self,
        f: Arc<dyn Fn(Msg) -> NewMsg + Send + Sync>,
    ) -> Command<NewMsg> {
        match self.inner {
            CommandInner::None => Command::none(),
            CommandInner::Action(Action::Message(msg)) => Command::message(f(msg)),
            CommandInner::Action(Action::Quit) => Command::quit(),
            CommandInner::Future(fut) => Command {
                inner: CommandInner::Future(Box::pin(async move { f(fut.await) })),
            },
            CommandInner::Batch(cmds) => Command {
                inner: CommandInner::Batch(
                    cmds.into_iter()
                        .map(|cmd| cmd.map_with(f.clone()))
                        .collect(),
                ),
            },
        }
    }

    // --- Inspection methods (useful for testing) ---

    /// Returns `true` if this is a no-op command.
    pub fn is_none(&self) -> bool {
        matches!(self.inner, CommandInner::None)
    }

    /// If this command is an immediate message action, return it.
    pub fn into_message(self) -> Option<Msg> {
        match self.inner {
            CommandInner::Action(Action::Message(msg)) => Some(msg),
            _ => None,
        }
    }

    /// Collect every immediate message carried by this command, descending
    /// into batches. Futures and quit actions are skipped.
    pub fn into_messages(self) -> Vec<Msg> {
        match self.inner {
            CommandInner::Action(Action::Message(msg)) => vec![msg],
            CommandInner::Batch(cmds) => cmds.into_iter().flat_map(Command::into_messages).collect(),
            _ => Vec::new(),
        }
    }
}
