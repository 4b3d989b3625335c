use crate::command::{Action, Command, CommandInner};
use crate::model::Model;
use crate::subscription::SubscriptionManager;
use crossterm::{
    cursor,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter used by [`init_file_logging`].
pub const LOG_FILTER_ENV: &str = "PLAZA_LOG";

/// Errors that can occur while initializing or running a [`Program`].
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// An I/O error from terminal setup, rendering, or teardown.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The log file could not be opened.
    #[error("cannot open log file {path}: {source}")]
    LogFile {
        /// Path given in [`ProgramOptions::log_file`].
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}

/// Configuration options for a [`Program`].
///
/// Use struct update syntax to override only what you need:
///
/// ```rust,ignore
/// use plaza_core::ProgramOptions;
///
/// let opts = ProgramOptions {
///     mouse_capture: true,
///     title: Some("Plazas".into()),
///     log_file: Some("plaza.log".into()),
///     ..ProgramOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ProgramOptions {
    /// Target frames per second (default: 60, clamped to 1..=120).
    pub fps: u32,
    /// Start in alternate screen (default: true).
    pub alt_screen: bool,
    /// Capture mouse clicks and wheel events (default: true). Selects need
    /// this for click-to-open and outside-click dismissal.
    pub mouse_capture: bool,
    /// Enable bracketed paste (default: true).
    pub bracketed_paste: bool,
    /// Set terminal title.
    pub title: Option<String>,
    /// Restore the terminal from a panic hook (default: true).
    pub catch_panics: bool,
    /// Quit on Ctrl+C signals (default: true).
    pub handle_signals: bool,
    /// Write `tracing` output to this file. A TUI owns the screen, so logs
    /// cannot go to stdout.
    pub log_file: Option<PathBuf>,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            fps: 60,
            alt_screen: true,
            mouse_capture: true,
            bracketed_paste: true,
            title: None,
            catch_panics: true,
            handle_signals: true,
            log_file: None,
        }
    }
}

/// The program runtime.  Manages terminal setup, the event loop, and the
/// full [`Model`] lifecycle.
///
/// # Example
///
/// ```rust,ignore
/// use plaza_core::{Program, ProgramError};
///
/// #[tokio::main]
/// async fn main() -> Result<(), ProgramError> {
///     let form = Program::<PlazaForm>::new(())?.run().await?;
///     println!("cost center: {}", form.cost_center_id);
///     Ok(())
/// }
/// ```
pub struct Program<M: Model> {
    model: M,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    msg_tx: mpsc::UnboundedSender<M::Message>,
    msg_rx: mpsc::UnboundedReceiver<M::Message>,
    subscriptions: SubscriptionManager<M::Message>,
    options: ProgramOptions,
    dirty: bool,
    quitting: bool,
}

impl<M: Model> Program<M> {
    /// Create a new program with default options.
    pub fn new(flags: M::Flags) -> Result<Self, ProgramError> {
        Self::with_options(flags, ProgramOptions::default())
    }

    /// Create a new program with custom options.
    ///
    /// Returns an error if the log file or the terminal cannot be set up.
    pub fn with_options(flags: M::Flags, options: ProgramOptions) -> Result<Self, ProgramError> {
        if let Some(path) = &options.log_file {
            init_file_logging(path)?;
        }

        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (model, init_cmd) = M::init(flags);
        let terminal = init_terminal(&options)?;
        let subscriptions = SubscriptionManager::new(msg_tx.clone());

        let mut program = Self {
            model,
            terminal,
            msg_tx,
            msg_rx,
            subscriptions,
            options,
            dirty: true,
            quitting: false,
        };
        tracing::debug!(fps = program.options.fps, mouse = program.options.mouse_capture, "program initialized");

        program.execute(init_cmd);
        program.reconcile();
        Ok(program)
    }

    /// Run the program until the model quits. Returns the final model.
    pub async fn run(mut self) -> Result<M, ProgramError> {
        let result = self.event_loop().await;

        tracing::debug!(ok = result.is_ok(), "shutting down");
        self.subscriptions.shutdown();
        restore_terminal(self.options.alt_screen)?;

        result.map(|()| self.model)
    }

    async fn event_loop(&mut self) -> Result<(), ProgramError> {
        self.draw()?;

        let fps = self.options.fps.clamp(1, 120);
        let mut frames = tokio::time::interval(Duration::from_secs_f64(1.0 / f64::from(fps)));
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let handle_signals = self.options.handle_signals;

        while !self.quitting {
            tokio::select! {
                biased;

                _ = tokio::signal::ctrl_c(), if handle_signals => {
                    tracing::debug!("received ctrl+c signal");
                    return Ok(());
                }

                Some(msg) = self.msg_rx.recv() => {
                    self.process(msg);
                    self.drain_queued();
                }

                _ = frames.tick() => {
                    if self.dirty {
                        self.draw()?;
                        self.dirty = false;
                    }
                }
            }
        }
        Ok(())
    }

    /// Process what is already queued behind the current message, so a burst
    /// of input (a paste, a fast wheel) costs one frame. Bounded in time and
    /// count.
    fn drain_queued(&mut self) {
        let deadline = Instant::now() + Duration::from_micros(100);
        for _ in 0..100 {
            if self.quitting || Instant::now() >= deadline {
                return;
            }
            match self.msg_rx.try_recv() {
                Ok(msg) => self.process(msg),
                Err(_) => return,
            }
        }
    }

    fn process(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.execute(cmd);
        self.reconcile();
        self.dirty = true;
    }

    /// Start and stop subscriptions to match what the model wants now. An
    /// open select gains its outside-click listener here.
    fn reconcile(&mut self) {
        let wanted = self.model.subscriptions();
        self.subscriptions.reconcile(wanted);
    }

    fn execute(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => {
                let _ = self.msg_tx.send(msg);
            }
            CommandInner::Action(Action::Quit) => {
                tracing::debug!("quit requested");
                self.quitting = true;
            }
            CommandInner::Future(fut) => {
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let msg = fut.await;
                    let _ = tx.send(msg);
                });
            }
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.execute(cmd);
                }
            }
        }
    }

    fn draw(&mut self) -> Result<(), ProgramError> {
        self.terminal.draw(|frame| self.model.view(frame))?;
        Ok(())
    }
}

/// Route `tracing` output to `path`, appending.
///
/// The filter comes from the [`LOG_FILTER_ENV`] variable and defaults to
/// `debug`. If a global subscriber is already installed the call leaves it in
/// place.
pub fn init_file_logging(path: impl AsRef<Path>) -> Result<(), ProgramError> {
    let path = path.as_ref();
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| ProgramError::LogFile {
            path: path.to_path_buf(),
            source,
        })?;

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("debug"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    if installed.is_err() {
        tracing::debug!(path = %path.display(), "log subscriber already installed");
    }
    Ok(())
}

fn init_terminal(options: &ProgramOptions) -> Result<Terminal<CrosstermBackend<Stdout>>, ProgramError> {
    // Installed once so hooks do not stack across programs.
    if options.catch_panics {
        static HOOK_INSTALLED: Once = Once::new();
        let alt_screen = options.alt_screen;
        HOOK_INSTALLED.call_once(|| {
            let previous = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let _ = restore_terminal(alt_screen);
                previous(info);
            }));
        });
    }

    enable_raw_mode()?;
    let mut out = stdout();
    if options.alt_screen {
        execute!(out, EnterAlternateScreen)?;
    }
    if options.bracketed_paste {
        execute!(out, EnableBracketedPaste)?;
    }
    if options.mouse_capture {
        execute!(out, EnableMouseCapture)?;
    }
    if let Some(title) = &options.title {
        execute!(out, SetTitle(title))?;
    }
    execute!(out, cursor::Hide)?;

    Ok(Terminal::new(CrosstermBackend::new(out))?)
}

/// Undo [`init_terminal`]. Every step is attempted; the raw-mode result is
/// reported.
fn restore_terminal(alt_screen: bool) -> Result<(), std::io::Error> {
    let raw = disable_raw_mode();
    let mut out = stdout();
    execute!(out, DisableBracketedPaste).ok();
    execute!(out, DisableMouseCapture).ok();
    execute!(out, cursor::Show).ok();
    if alt_screen {
        execute!(out, LeaveAlternateScreen).ok();
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_capture_mouse() {
        let opts = ProgramOptions::default();
        assert!(opts.mouse_capture);
        assert_eq!(opts.fps, 60);
        assert!(opts.log_file.is_none());
    }

    #[test]
    fn log_file_error_names_path() {
        let err = init_file_logging("/nonexistent-dir/plaza/debug.log").unwrap_err();
        assert!(err.to_string().contains("/nonexistent-dir/plaza/debug.log"));
    }
}
