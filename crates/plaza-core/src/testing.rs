use crate::command::{Action, Command, CommandInner};
use crate::model::Model;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;

/// A headless test harness that drives a [`Model`] without a real terminal.
///
/// Synchronous commands ([`Command::message`]) are queued and flushed with
/// [`drain_messages`](TestProgram::drain_messages); futures are dropped, so
/// tests feed "loaded" messages by hand.
///
/// # Example
///
/// ```rust,ignore
/// use plaza_core::testing::TestProgram;
///
/// let mut prog = TestProgram::<PlazaForm>::new(catalogs);
/// prog.send(Msg::CostCenter(searchable_select::Message::Focus));
/// prog.drain_messages();
/// assert!(prog.model().cost_center.is_open());
///
/// let output = prog.render_string(60, 20);
/// assert!(output.contains("Cost center"));
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending_messages: Vec<M::Message>,
    quit: bool,
}

impl<M: Model> TestProgram<M> {
    /// Create a test program by calling [`Model::init`] with the given flags.
    pub fn new(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        let mut program = Self {
            model,
            pending_messages: Vec::new(),
            quit: false,
        };
        program.collect_sync_messages(init_cmd);
        program
    }

    /// Send a message, triggering a single update cycle. Produced messages
    /// are queued, not processed.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.collect_sync_messages(cmd);
    }

    /// Process pending messages until no new ones are produced.
    pub fn drain_messages(&mut self) {
        while !self.pending_messages.is_empty() {
            let messages: Vec<_> = self.pending_messages.drain(..).collect();
            for msg in messages {
                let cmd = self.model.update(msg);
                self.collect_sync_messages(cmd);
            }
        }
    }

    /// Messages produced by the last updates and not yet drained.
    pub fn pending(&self) -> &[M::Message] {
        &self.pending_messages
    }

    /// Whether any update returned [`Command::quit`].
    pub fn has_quit(&self) -> bool {
        self.quit
    }

    /// Get a shared reference to the model for assertions.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the model for direct test setup.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Render the model to a ratatui [`Buffer`] of the given dimensions.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                self.model.view(frame);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    /// Render the model and return the visible content as a plain string,
    /// one line per row.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        buffer_to_string(&self.render(width, height))
    }

    fn collect_sync_messages(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => {
                self.pending_messages.push(msg);
            }
            CommandInner::Action(Action::Quit) => {
                self.quit = true;
            }
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.collect_sync_messages(cmd);
                }
            }
            // Async commands can't be executed synchronously in tests
            CommandInner::Future(_) => {}
        }
    }
}

/// Flatten a buffer into rows of symbols separated by newlines.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let area: Rect = buf.area;
    let mut output = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            output.push_str(buf[(x, y)].symbol());
        }
        if y + 1 < area.bottom() {
            output.push('\n');
        }
    }
    output
}
