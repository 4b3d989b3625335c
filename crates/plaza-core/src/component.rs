use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::{layout::Rect, Frame};

/// A reusable sub-model that renders into a given [`Rect`] area.
///
/// `Component` mirrors [`Model`](crate::Model) except that
/// [`view`](Component::view) receives the area to draw into, so a parent
/// decides where each child goes. Form fields such as the searchable select
/// are components.
///
/// # Composition pattern
///
/// Wrap the component's message type in a variant of the parent message and
/// use [`Command::map`] to lift commands:
///
/// ```rust,ignore
/// use plaza_core::{Command, Component, Model};
/// use plaza_widgets::searchable_select::{self, SearchableSelect};
///
/// struct Form { cost_center: SearchableSelect<CostCenter>, cost_center_id: i64 }
///
/// #[derive(Debug)]
/// enum Msg { CostCenter(searchable_select::Message) }
///
/// impl Model for Form {
///     // ...
///     fn update(&mut self, msg: Msg) -> Command<Msg> {
///         match msg {
///             Msg::CostCenter(searchable_select::Message::Changed(id)) => {
///                 self.cost_center_id = id;
///                 self.cost_center.set_value(id);
///                 Command::none()
///             }
///             Msg::CostCenter(m) => self.cost_center.update(m).map(Msg::CostCenter),
///         }
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's internal message type.
    ///
    /// Parent models typically wrap this in one of their own message variants
    /// so that events can be routed to the correct child.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`] for side effects.
    ///
    /// The returned command uses the component's own `Message` type; the
    /// parent calls [`.map()`](Command::map) to lift it.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into `area`. Implementations confine drawing to the rectangle,
    /// except for overlays that deliberately extend below their anchor.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Declare active subscriptions for this component.
    ///
    /// The parent collects these and returns them, mapped, from its own
    /// [`Model::subscriptions`](crate::Model::subscriptions). Because the
    /// runtime diffs subscriptions every cycle, a component can tie a
    /// listener to its own state simply by returning it only while that
    /// state holds.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }

    /// Whether this component currently has focus.
    fn focused(&self) -> bool {
        false
    }
}
