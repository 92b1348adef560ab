use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers, poll},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

pub mod domain;
pub mod ui;

use self::domain::models::{Mode, SearchPane, Tab};
use self::ui::{
    app_state::AppState, commands::Command, components::Component, events::Message,
    renderer::Renderer,
};
use crate::client::api::ApiClient;
use crate::export::ExportSink;
use crate::orchestrator::{ApiRequest, ApiResponse, execute_request};

const STATUS_CLEAR_DELAY_MS: u64 = 3000;

pub struct InteractiveApp {
    state: AppState,
    renderer: Renderer,
    client: Option<ApiClient>,
    export: ExportSink,
    request_sender: Option<Sender<ApiRequest>>,
    response_receiver: Option<Receiver<ApiResponse>>,
    status_timer: Option<Instant>,
    last_ctrl_c_press: Option<Instant>,
}

impl InteractiveApp {
    pub fn new(client: ApiClient, export: ExportSink) -> Self {
        Self {
            state: AppState::new(),
            renderer: Renderer::new(),
            client: Some(client),
            export,
            request_sender: None,
            response_receiver: None,
            status_timer: None,
            last_ctrl_c_press: None,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = self.setup_terminal()?;

        if let Some(client) = self.client.take() {
            let (tx, rx) = start_worker(client);
            self.request_sender = Some(tx);
            self.response_receiver = Some(rx);
        }

        let result = self.run_app(&mut terminal);

        self.cleanup_terminal(&mut terminal)?;
        result
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn cleanup_terminal(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    fn run_app(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                self.renderer.render(f, &self.state);
            })?;

            // Completions from the worker; stale ones die in the lifecycle.
            if let Some(receiver) = &self.response_receiver {
                if let Ok(response) = receiver.try_recv() {
                    self.handle_message(Message::ApiCompleted(response));
                }
            }

            // Scheduled clear of transient status messages.
            if let Some(timer) = self.status_timer {
                if timer.elapsed() >= Duration::from_millis(STATUS_CLEAR_DELAY_MS) {
                    self.status_timer = None;
                    self.handle_message(Message::ClearStatus);
                }
            }

            if poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    let should_quit = self.handle_input(key)?;
                    if should_quit {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_input(&mut self, key: KeyEvent) -> Result<bool> {
        // Global Ctrl+C handling for exit
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            if let Some(last_press) = self.last_ctrl_c_press {
                if last_press.elapsed() < Duration::from_secs(1) {
                    return Ok(true);
                }
            }
            self.last_ctrl_c_press = Some(Instant::now());
            self.set_transient_status("Press Ctrl+C again to exit".to_string());
            return Ok(false);
        }

        match self.state.mode {
            Mode::Help => {
                if let Some(message) = self.renderer.get_help_dialog_mut().handle_key(key) {
                    self.handle_message(message);
                }
                return Ok(false);
            }
            Mode::Detail => {
                if let Some(message) = self.renderer.get_message_detail_mut().handle_key(key) {
                    self.handle_message(message);
                }
                return Ok(false);
            }
            Mode::Main => {}
        }

        // Global keys on the main screen
        match key.code {
            KeyCode::Char('?') => {
                self.handle_message(Message::ShowHelp);
                return Ok(false);
            }
            KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.handle_message(Message::NextTab);
                return Ok(false);
            }
            KeyCode::Esc => return Ok(true),
            _ => {}
        }

        let message = match self.state.tab {
            Tab::Search => match self.state.search.pane {
                SearchPane::Form => self.renderer.get_search_form_mut().handle_key(key),
                SearchPane::Results => self.renderer.get_result_list_mut().handle_key(key),
            },
            Tab::Analysis => self.renderer.get_analysis_view_mut().handle_key(key),
            Tab::Guard => self.renderer.get_guard_panel_mut().handle_key(key),
        };
        if let Some(message) = message {
            self.handle_message(message);
        }

        Ok(false)
    }

    fn handle_message(&mut self, message: Message) {
        let command = self.state.update(message);
        self.execute_command(command);
    }

    fn execute_command(&mut self, command: Command) {
        match command {
            Command::None => {}
            Command::Dispatch(request) => {
                if let Some(sender) = &self.request_sender {
                    let _ = sender.send(request);
                }
            }
            Command::Export { stem, payload } => match self.export.save_json(&payload, &stem) {
                Ok(Some(path)) => {
                    self.set_transient_status(format!("Saved {}", path.display()));
                }
                Ok(None) => {}
                Err(error) => {
                    tracing::warn!("export failed: {error:#}");
                    self.set_transient_status(format!("Export failed (result kept): {error:#}"));
                }
            },
        }
    }

    fn set_transient_status(&mut self, message: String) {
        self.state.ui.message = Some(message);
        self.status_timer = Some(Instant::now());
    }
}

fn start_worker(client: ApiClient) -> (Sender<ApiRequest>, Receiver<ApiResponse>) {
    let (request_tx, request_rx) = mpsc::channel::<ApiRequest>();
    let (response_tx, response_rx) = mpsc::channel::<ApiResponse>();

    thread::spawn(move || {
        while let Ok(request) = request_rx.recv() {
            let _ = response_tx.send(execute_request(&client, request));
        }
    });

    (request_tx, response_rx)
}
