pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::{
    event::{KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::app::{AppContext, Result, TrendAlertError};
use crate::config::ColorConfig;
use crate::controller::{Interaction, InteractionController, Outcome, RenderFrame, RenderSink};
use crate::domain::SortMode;
use crate::fetcher::LoadedFeed;
use crate::theme::ThemeController;

use self::app::{cycle_pill, InputMode, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Draws frames onto the terminal.
pub struct TerminalSink<'t> {
    terminal: &'t mut Tui,
    app: &'t mut TuiApp,
    colors: &'t ColorConfig,
}

impl RenderSink for TerminalSink<'_> {
    fn present(&mut self, frame: &RenderFrame<'_>) -> Result<()> {
        let app = &mut *self.app;
        let colors = self.colors;
        self.terminal
            .draw(|f| layout::render(f, frame, app, colors))?;
        Ok(())
    }
}

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let mut app = TuiApp::new();
    let mut controller = ctx.controller();
    let mut theme = ctx.theme_controller();
    let event_handler = EventHandler::new(Duration::from_millis(50));

    // Input is live while the feed loads; early keys act on an empty list.
    let (tx, rx) = oneshot::channel::<Result<LoadedFeed>>();
    let loader = ctx.loader.clone();
    let source = ctx.source.clone();
    tokio::spawn(async move {
        let _ = tx.send(loader.load(&source).await);
    });
    let mut pending_load = Some(rx);

    loop {
        if let Some(rx) = pending_load.as_mut() {
            match rx.try_recv() {
                Ok(result) => {
                    controller.on_loaded(result);
                    app.reset_selection();
                    pending_load = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Closed) => {
                    controller.on_loaded(Err(TrendAlertError::Other(
                        "Feed loader stopped before finishing".into(),
                    )));
                    pending_load = None;
                }
            }
        }

        if controller.tick(Instant::now()) == Outcome::Rerender {
            app.reset_selection();
        }

        let colors = ctx.config.colors.for_theme(theme.current());
        controller.render(
            &mut TerminalSink {
                terminal: &mut *terminal,
                app: &mut app,
                colors,
            },
            Utc::now(),
        )?;

        if let AppEvent::Key(key) = event_handler.next()? {
            match app.mode {
                InputMode::Search => handle_search_key(key, &mut app, &mut controller),
                InputMode::Normal => {
                    let action = ctx.config.keybindings.get_action(&key);
                    handle_action(action, &mut app, &mut controller, &mut theme);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_search_key(key: KeyEvent, app: &mut TuiApp, controller: &mut InteractionController) {
    let now = Instant::now();
    match key.code {
        KeyCode::Enter => {
            app.mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.search_buffer.clear();
            controller.handle(Interaction::SearchInput(String::new()), now);
            app.mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.search_buffer.pop();
            controller.handle(Interaction::SearchInput(app.search_buffer.clone()), now);
        }
        KeyCode::Char(c) => {
            app.search_buffer.push(c);
            controller.handle(Interaction::SearchInput(app.search_buffer.clone()), now);
        }
        _ => {}
    }
}

fn handle_action(
    action: Action,
    app: &mut TuiApp,
    controller: &mut InteractionController,
    theme: &mut ThemeController,
) {
    let now = Instant::now();
    app.clear_status();

    match action {
        Action::Quit => {
            app.should_quit = true;
        }
        Action::MoveUp => {
            app.move_up();
        }
        Action::MoveDown => {
            app.move_down(controller.visible_topics().len());
        }
        Action::NextFilter | Action::PrevFilter => {
            let step = if action == Action::NextFilter { 1 } else { -1 };
            let next = cycle_pill(controller.pills(), &controller.view().filter, step)
                .map(|pill| pill.filter.clone());
            if let Some(filter) = next {
                controller.handle(Interaction::SelectFilter(filter), now);
                app.reset_selection();
            }
        }
        Action::SortTrending => {
            controller.handle(Interaction::SelectSort(SortMode::Trending), now);
            app.reset_selection();
        }
        Action::SortRecent => {
            controller.handle(Interaction::SelectSort(SortMode::Recent), now);
            app.reset_selection();
        }
        Action::Search => {
            app.search_buffer = controller.view().search_query.clone();
            app.mode = InputMode::Search;
        }
        Action::LoadMore => {
            if controller.handle(Interaction::LoadMore, now) == Outcome::Unchanged {
                app.set_status("No more topics".to_string());
            }
        }
        Action::ToggleCard => {
            controller.handle(Interaction::ToggleCard(app.selected), now);
        }
        Action::ShowMore => {
            controller.handle(Interaction::ShowMoreArticles(app.selected), now);
        }
        Action::OpenArticle => {
            let link = controller
                .visible_topic(app.selected)
                .and_then(|topic| topic.articles.first())
                .map(|article| article.url.clone());
            match link {
                Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
                    if let Err(e) = open::that(&url) {
                        app.set_status(format!("Failed to open browser: {}", e));
                    }
                }
                Some(url) => app.set_status(format!("Refusing to open {}", url)),
                None => app.set_status("No article to open".to_string()),
            }
        }
        Action::ToggleTheme => {
            let next = theme.toggle();
            app.set_status(format!("Theme: {}", next));
        }
        Action::None => {}
    }

    app.clamp_selection(controller.visible_topics().len());
}
