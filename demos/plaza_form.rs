//! # Plaza assignment form
//!
//! Three searchable selects: cost center, accounting account and
//! authorizer. Choosing a cost center reloads its accounts after a short
//! delay; the account field stays disabled until they arrive. Authorizers
//! are parsed from a JSON payload and resolved through field fallbacks.
//!
//! Run with: `cargo run --example plaza_form`
//!
//! Set `PLAZA_LOG_FILE=/tmp/plaza.log` to capture debug logs (filter with
//! `PLAZA_LOG`, e.g. `PLAZA_LOG=plaza_widgets=debug`).

use plaza::crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use plaza::ratatui::layout::{Constraint, Layout, Rect};
use plaza::ratatui::style::{Color, Modifier, Style};
use plaza::ratatui::text::{Line, Span};
use plaza::ratatui::widgets::Paragraph;
use plaza::ratatui::Frame;
use plaza::widgets::focus::{FocusGroup, FocusMove};
use plaza::widgets::key::{help_line, KeyMap};
use plaza::widgets::searchable_select::{Message as Select, SearchableSelect};
use plaza::widgets::{FieldResolver, Record, SelectItem};
use plaza::{terminal_events, Command, Component, Model, ProgramOptions, Subscription, TerminalEvent};
use std::borrow::Cow;
use std::path::PathBuf;
use std::time::Duration;

const COST_CENTER: usize = 0;
const ACCOUNT: usize = 1;
const AUTHORIZER: usize = 2;

const COST_CENTERS: &[(i64, &str)] = &[
    (101, "Dirección General"),
    (102, "Administración"),
    (103, "Contabilidad"),
    (104, "Tesorería"),
    (105, "Recursos Humanos"),
    (106, "Nóminas"),
    (107, "Compras"),
    (108, "Almacén Central"),
    (109, "Almacén Norte"),
    (110, "Ventas Norte"),
    (111, "ventas sur"),
    (112, "Ventas Occidente"),
    (113, "Mercadotecnia"),
    (114, "Jurídico"),
    (115, "Auditoría Interna"),
    (116, "Sistemas"),
    (117, "Soporte Técnico"),
    (118, "Mantenimiento"),
    (119, "Logística"),
    (120, "Atención a Clientes"),
    (121, "Calidad"),
    (122, "Ñuñoa"),
    (123, "Nogales"),
    (124, "Úrsula Planta 1"),
    (125, "Ursula Planta 2"),
    (126, "Capacitación"),
    (127, "Seguridad e Higiene"),
    (128, "Proyectos Especiales"),
];

const ACCOUNT_TITLES: &[&str] = &[
    "Sueldos y salarios",
    "Honorarios",
    "Viáticos",
    "Papelería",
    "Energía eléctrica",
    "Mantenimiento de equipo",
    "Capacitación",
    "Arrendamiento",
    "Teléfono e internet",
    "Seguros y fianzas",
    "Combustibles",
    "Depreciación",
];

const AUTHORIZERS_JSON: &str = r#"[
    {"id": 301, "nombre_completo": "Óscar Núñez Ibáñez", "puesto": "Director"},
    {"id": 302, "nombre_completo": "Ana María Gómez", "puesto": "Gerente"},
    {"id": 303, "nombre_completo": "ana maria gomez", "puesto": "Suplente"},
    {"id": 304, "name": "Zoe Martínez"},
    {"id": 305, "nombre_completo": "Íñigo Peña", "puesto": "Contralor"},
    {"id": 306, "nombre_completo": "Nicolás Ortega"},
    {"id": 307, "nombre_completo": "Ñeco Salinas"},
    {"id": 308, "nombre_completo": "", "description": "Comité de compras"},
    {"id": 309, "nombre_completo": 42},
    {"id": 310, "nombre_completo": "Beatriz Alcántara"},
    {"id": 311, "nombre_completo": "Úrsula Treviño"},
    {"id": 312, "nombre_completo": "Carlos Ávila"}
]"#;

#[derive(Debug, Clone)]
struct Account {
    id: i64,
    number: String,
    title: &'static str,
}

impl SelectItem for Account {
    fn label(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{} · {}", self.number, self.title))
    }

    fn value(&self) -> i64 {
        self.id
    }
}

/// Stand-in for the accounts endpoint.
async fn fetch_accounts(cost_center: i64) -> Vec<Account> {
    tokio::time::sleep(Duration::from_millis(400)).await;
    (1..=24)
        .map(|i: i64| Account {
            id: cost_center * 100 + i,
            number: format!("{}-{:02}", 6000 + cost_center, i),
            title: ACCOUNT_TITLES[i as usize % ACCOUNT_TITLES.len()],
        })
        .collect()
}

fn cost_center_records() -> Vec<Record> {
    COST_CENTERS
        .iter()
        .map(|&(id, name)| {
            Record::with_id(id)
                .with("nombre", name)
                .with("clave", format!("CC-{id}"))
        })
        .collect()
}

struct PlazaForm {
    cost_center: SearchableSelect,
    account: SearchableSelect<Account>,
    authorizer: SearchableSelect,
    focus: FocusGroup<3>,
    loading_accounts: bool,
    status: String,
}

#[derive(Debug)]
enum Msg {
    CostCenter(Select),
    Account(Select),
    Authorizer(Select),
    AccountsLoaded {
        cost_center: i64,
        accounts: Vec<Account>,
    },
    Key(KeyEvent),
    Mouse(MouseEvent),
    Paste(String),
    Submit,
    Quit,
}

impl PlazaForm {
    fn route(&mut self, slot: usize, msg: Select) -> Command<Msg> {
        match slot {
            COST_CENTER => self.cost_center.update(msg).map(Msg::CostCenter),
            ACCOUNT => self.account.update(msg).map(Msg::Account),
            _ => self.authorizer.update(msg).map(Msg::Authorizer),
        }
    }

    fn enabled(&self) -> [bool; 3] {
        [
            !self.cost_center.is_disabled(),
            !self.account.is_disabled(),
            !self.authorizer.is_disabled(),
        ]
    }

    fn is_open(&self, slot: usize) -> bool {
        match slot {
            COST_CENTER => self.cost_center.is_open(),
            ACCOUNT => self.account.is_open(),
            _ => self.authorizer.is_open(),
        }
    }

    fn popup_contains(&self, slot: usize, mouse: &MouseEvent) -> bool {
        match slot {
            COST_CENTER => self.cost_center.popup_contains(mouse),
            ACCOUNT => self.account.popup_contains(mouse),
            _ => self.authorizer.popup_contains(mouse),
        }
    }

    fn move_focus(&mut self, change: Option<FocusMove>) -> Command<Msg> {
        let Some(FocusMove { from, to }) = change else {
            return Command::none();
        };
        Command::batch([self.route(from, Select::Blur), self.route(to, Select::Focus)])
    }

    fn cost_center_changed(&mut self, id: i64) -> Command<Msg> {
        self.cost_center.set_value(id);
        self.account.set_value(0);
        self.account.set_options(Vec::new());
        self.account.set_disabled(true);
        if id == 0 {
            self.loading_accounts = false;
            return Command::none();
        }
        self.loading_accounts = true;
        Command::perform(fetch_accounts(id), move |accounts| Msg::AccountsLoaded {
            cost_center: id,
            accounts,
        })
    }

    fn submit(&mut self) {
        self.cost_center.set_show_errors(true);
        self.account.set_show_errors(true);
        self.authorizer.set_show_errors(true);
        self.status = match self.summary() {
            Some(summary) => summary,
            None => "Complete the required fields".to_string(),
        };
    }

    fn summary(&self) -> Option<String> {
        if !(self.cost_center.is_valid() && self.account.is_valid() && self.authorizer.is_valid()) {
            return None;
        }
        Some(format!(
            "Plaza assigned to {} / {} authorized by {}",
            self.cost_center.selected_label()?,
            self.account.selected_label()?,
            self.authorizer.selected_label()?,
        ))
    }
}

impl Model for PlazaForm {
    type Message = Msg;
    type Flags = Vec<Record>;

    fn init(authorizers: Vec<Record>) -> (Self, Command<Msg>) {
        let cost_center = SearchableSelect::records(cost_center_records())
            .with_fields(FieldResolver::new().with_display_field("nombre"))
            .with_id("cost-center")
            .with_label("Cost center")
            .with_required(true);
        let account = SearchableSelect::items(Vec::new())
            .with_id("account")
            .with_label("Accounting account")
            .with_placeholder("Choose a cost center first")
            .with_required(true)
            .with_disabled(true);
        let authorizer = SearchableSelect::records(authorizers)
            .with_fields(
                FieldResolver::new()
                    .with_display_field("nombre_completo")
                    .with_empty_label("Sin nombre"),
            )
            .with_id("authorizer")
            .with_label("Authorizer")
            .with_required(true)
            .with_initial_visible_count(5)
            .with_page_step(5);
        (
            PlazaForm {
                cost_center,
                account,
                authorizer,
                focus: FocusGroup::new(),
                loading_accounts: false,
                status: String::new(),
            },
            Command::message(Msg::CostCenter(Select::Focus)),
        )
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::CostCenter(Select::Changed(id)) => self.cost_center_changed(id),
            Msg::Account(Select::Changed(id)) => {
                self.account.set_value(id);
                Command::none()
            }
            Msg::Authorizer(Select::Changed(id)) => {
                self.authorizer.set_value(id);
                Command::none()
            }
            Msg::CostCenter(m) => self.route(COST_CENTER, m),
            Msg::Account(m) => self.route(ACCOUNT, m),
            Msg::Authorizer(m) => self.route(AUTHORIZER, m),
            Msg::AccountsLoaded {
                cost_center,
                accounts,
            } => {
                // A slower response for a previous cost center is stale.
                if cost_center == self.cost_center.value() {
                    self.account.set_options(accounts);
                    self.account.set_disabled(false);
                    self.loading_accounts = false;
                }
                Command::none()
            }
            Msg::Key(key) => {
                let enabled = self.enabled();
                match (key.code, key.modifiers) {
                    (KeyCode::Tab, _) => {
                        let change = self.focus.focus_next(|i| enabled[i]);
                        self.move_focus(change)
                    }
                    (KeyCode::BackTab, _) => {
                        let change = self.focus.focus_prev(|i| enabled[i]);
                        self.move_focus(change)
                    }
                    (KeyCode::Char('s'), m) if m == KeyModifiers::CONTROL => {
                        Command::message(Msg::Submit)
                    }
                    (KeyCode::Char('c' | 'q'), m) if m == KeyModifiers::CONTROL => {
                        Command::message(Msg::Quit)
                    }
                    _ => self.route(self.focus.focused(), Select::KeyPress(key)),
                }
            }
            Msg::Mouse(mouse) => {
                // An open popup is drawn over the fields below it and owns
                // the clicks that land on it.
                let routed = match (0..3).find(|&slot| self.popup_contains(slot, &mouse)) {
                    Some(owner) => self.route(owner, Select::Mouse(mouse)),
                    None => Command::batch([
                        self.route(COST_CENTER, Select::Mouse(mouse)),
                        self.route(ACCOUNT, Select::Mouse(mouse)),
                        self.route(AUTHORIZER, Select::Mouse(mouse)),
                    ]),
                };
                let current = self.focus.focused();
                let clicked = (0..3).find(|&slot| slot != current && self.is_open(slot));
                let blur = match clicked.and_then(|slot| self.focus.focus(slot)) {
                    Some(FocusMove { from, .. }) => self.route(from, Select::Blur),
                    None => Command::none(),
                };
                Command::batch([routed, blur])
            }
            Msg::Paste(text) => self.route(self.focus.focused(), Select::Paste(text)),
            Msg::Submit => {
                self.submit();
                Command::none()
            }
            Msg::Quit => Command::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let [title_area, cost_area, account_area, authorizer_area, status_area, _, help_area] =
            Layout::vertical([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Fill(1),
                Constraint::Length(1),
            ])
            .areas(frame.area());

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Plaza assignment",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))),
            title_area,
        );

        let status = if self.loading_accounts {
            "Loading accounts…".to_string()
        } else {
            self.status.clone()
        };
        frame.render_widget(
            Paragraph::new(Span::styled(status, Style::default().fg(Color::Green))),
            status_area,
        );

        let mut help = self.cost_center.key_bindings().short_help();
        help.truncate(4);
        let help = format!("{} • tab next field • ctrl+s submit • ctrl+q quit", help_line(&help));
        frame.render_widget(
            Paragraph::new(Span::styled(help, Style::default().fg(Color::DarkGray))),
            help_area,
        );

        // An open popup overlaps the fields below it, so it is drawn last.
        let fields: [(&dyn Component<Message = Select>, Rect, bool); 3] = [
            (&self.cost_center, cost_area, self.cost_center.is_open()),
            (&self.account, account_area, self.account.is_open()),
            (&self.authorizer, authorizer_area, self.authorizer.is_open()),
        ];
        let closed = fields.iter().filter(|(_, _, open)| !open);
        let open = fields.iter().filter(|(_, _, open)| *open);
        for (field, area, _) in closed.chain(open) {
            field.view(frame, *area);
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let mut subs = vec![terminal_events(|event| match event {
            TerminalEvent::Key(key) => Some(Msg::Key(key)),
            TerminalEvent::Mouse(mouse) => Some(Msg::Mouse(mouse)),
            TerminalEvent::Paste(text) => Some(Msg::Paste(text)),
            _ => None,
        })];
        subs.extend(
            self.cost_center
                .subscriptions()
                .into_iter()
                .map(|s| s.map(Msg::CostCenter)),
        );
        subs.extend(
            self.account
                .subscriptions()
                .into_iter()
                .map(|s| s.map(Msg::Account)),
        );
        subs.extend(
            self.authorizer
                .subscriptions()
                .into_iter()
                .map(|s| s.map(Msg::Authorizer)),
        );
        subs
    }
}

#[plaza::tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let authorizers = Record::parse_list(AUTHORIZERS_JSON)?;
    let options = ProgramOptions {
        title: Some("Plaza assignment".to_string()),
        log_file: std::env::var_os("PLAZA_LOG_FILE").map(PathBuf::from),
        ..ProgramOptions::default()
    };
    let form = plaza::run_with::<PlazaForm>(authorizers, options).await?;
    if let Some(summary) = form.summary() {
        println!("{summary}");
    }
    Ok(())
}
