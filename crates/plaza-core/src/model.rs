use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::Frame;

/// The top-level application trait, following the [Elm Architecture].
///
/// The runtime drives an **init -> update -> view** cycle:
///
/// 1. [`init`](Model::init) creates the initial state and may return a
///    [`Command`], typically the first catalog load.
/// 2. [`view`](Model::view) renders the current state to a [`ratatui::Frame`].
/// 3. Events arrive as messages through [`Subscription`]s.
/// 4. [`update`](Model::update) processes each message and optionally returns
///    a [`Command`].
/// 5. Steps 2--4 repeat until the program exits.
///
/// # Example
///
/// ```rust,ignore
/// use plaza_core::{Command, Model};
/// use ratatui::widgets::Paragraph;
/// use ratatui::Frame;
///
/// struct Summary {
///     assigned: i64,
/// }
///
/// #[derive(Debug)]
/// enum Msg {
///     Assign(i64),
/// }
///
/// impl Model for Summary {
///     type Message = Msg;
///     type Flags = ();
///
///     fn init(_flags: ()) -> (Self, Command<Msg>) {
///         (Summary { assigned: 0 }, Command::none())
///     }
///
///     fn update(&mut self, msg: Msg) -> Command<Msg> {
///         match msg {
///             Msg::Assign(id) => self.assigned = id,
///         }
///         Command::none()
///     }
///
///     fn view(&self, frame: &mut Frame) {
///         frame.render_widget(
///             Paragraph::new(format!("Cost center: {}", self.assigned)),
///             frame.area(),
///         );
///     }
/// }
/// ```
///
/// [Elm Architecture]: https://guide.elm-lang.org/architecture/
pub trait Model: Sized + Send + 'static {
    /// The application's message type.
    type Message: Send + 'static;

    /// Initialization data passed to [`Model::init`].
    ///
    /// Use `()` when no startup data is needed.
    type Flags: Send + 'static;

    /// Create the initial model state and an optional startup command.
    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    /// Process a message, mutate state, and return a command for side effects.
    ///
    /// After `update` returns, the runtime re-renders and reconciles
    /// [`subscriptions`](Model::subscriptions).
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render the current state. Must be a pure function of `&self`.
    fn view(&self, frame: &mut Frame);

    /// Declare active subscriptions.  Called after every update.
    ///
    /// The runtime diffs the returned list against the previously active
    /// set: new subscriptions are started and removed ones are cancelled.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }
}
