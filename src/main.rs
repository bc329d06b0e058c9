//! Agent App Store storefront - terminal client for the on-chain app store
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Chain Layer (Tokio) - async contract reads and wallet writes

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use ember_storefront::app::workflow::Step;
use ember_storefront::app::{AppActor, AppState};
use ember_storefront::config::Config;
use ember_storefront::constants::{APP_NAME, APP_VERSION, LOG_FILE_NAME, TOKEN_SYMBOL};
use ember_storefront::messages::render::{CatalogView, WorkflowView};
use ember_storefront::messages::ui_events::{key_to_ui_event, InputMode, View};
use ember_storefront::messages::{ChainCommand, ChainResponse, RenderState, UiEvent};
use ember_storefront::models::{Audience, Category, DraftField};
use ember_storefront::network::rpc::{create_client, create_wallet_client, HttpTransport};
use ember_storefront::network::{ChainActor, StoreClient};
use ember_storefront::ui::{self, action_button, category_color, render_input, render_pills, tier_badge, token_amount};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let config = Config::load().context("loading configuration")?;
    let contracts = config.contracts()?;
    tracing::info!(
        version = APP_VERSION,
        network = config.network.label(),
        rpc = config.rpc_url(),
        wallet = %config.wallet_url,
        store = %contracts.app_store,
        source = ?config.catalog_source,
        "Starting storefront"
    );

    // Chain client
    let node_http = create_client(config.request_timeout());
    let wallet_http = create_wallet_client(config.request_timeout(), config.wallet_timeout());
    let node = Arc::new(HttpTransport::new(node_http, config.rpc_url()));
    let wallet = Arc::new(HttpTransport::new(wallet_http, config.wallet_url.clone()));
    let client = StoreClient::new(node, wallet, contracts, config.network.chain_id())
        .with_receipt_timing(config.receipt_poll(), config.receipt_timeout());

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (chain_cmd_tx, chain_cmd_rx) = mpsc::unbounded_channel::<ChainCommand>();
    let (chain_resp_tx, chain_resp_rx) = mpsc::unbounded_channel::<ChainResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn chain actor
    let chain_actor = ChainActor::new(client, config.catalog_source, chain_resp_tx);
    tokio::spawn(chain_actor.run(chain_cmd_rx));

    // Spawn app actor
    let state = AppState::new(config.network.label(), config.page_size);
    let app_actor = AppActor::new(state, chain_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, chain_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.view,
                    current_state.input_mode,
                    current_state.show_help,
                ) {
                    let quit = event == UiEvent::Quit;
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_header(f, state, main_chunks[0]);

    match state.view {
        View::Catalog => draw_catalog(f, &state.catalog, main_chunks[1]),
        View::Submit => match &state.workflow {
            Some(workflow) if workflow.step == Step::Success => draw_success(f, workflow, main_chunks[1]),
            Some(workflow) => draw_form(f, workflow, state.input_mode, main_chunks[1]),
            None => draw_connect_prompt(f, state, main_chunks[1]),
        },
    }

    draw_status_bar(f, state, main_chunks[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_header(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(0), Constraint::Length(40)])
        .split(area);

    let selected = match state.view {
        View::Catalog => 0,
        View::Submit => 1,
    };
    f.render_widget(ui::render_tabs(&[" 1:Browse ", " 2:Submit "], selected), chunks[0]);

    let title = Line::from(vec![
        Span::styled("🔥 ", Style::default()),
        Span::styled(APP_NAME, Style::default().fg(Color::Rgb(255, 120, 40)).bold()),
    ]);
    f.render_widget(Paragraph::new(title).alignment(Alignment::Center), chunks[1]);

    let wallet_style = if state.wallet_connected {
        Style::default().fg(Color::Green)
    } else if state.wallet_connecting {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let wallet = Line::from(vec![
        Span::styled(format!("{} ", state.network), Style::default().fg(Color::Blue)),
        Span::styled(format!("[{}]", state.wallet_label), wallet_style),
    ])
    .right_aligned();
    f.render_widget(Paragraph::new(wallet), chunks[2]);
}

fn draw_catalog(f: &mut Frame, catalog: &CatalogView, area: Rect) {
    let featured_height = if catalog.featured.is_empty() {
        0
    } else {
        catalog.featured.len().min(3) as u16 + 2
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),               // Stats
            Constraint::Length(4),               // Filters
            Constraint::Length(featured_height), // Featured
            Constraint::Min(5),                  // Listings
        ])
        .split(area);

    // Stats
    let stats = match &catalog.stats {
        Some(stats) => Line::from(vec![
            Span::styled(format!(" {} ", stats.total_apps), Style::default().fg(Color::Rgb(255, 120, 40)).bold()),
            Span::raw("apps listed   "),
            Span::styled(
                format!("{} ", token_amount(Some(stats.total_burned))),
                Style::default().fg(Color::Rgb(255, 120, 40)).bold(),
            ),
            Span::raw("burned 🔥"),
        ]),
        None => Line::from(Span::styled(" Loading stats…", Style::default().fg(Color::DarkGray))),
    };
    f.render_widget(
        Paragraph::new(stats).block(Block::default().borders(Borders::ALL).title(" The App Store for the Agent Economy ")),
        chunks[0],
    );

    // Filters
    let categories: Vec<String> = Category::ALL.iter().map(|c| format!("{} {}", c.emoji(), c.as_str())).collect();
    let audiences: Vec<String> = [Audience::Humans, Audience::AIs]
        .iter()
        .map(|a| format!("{} {}", a.emoji(), a.as_str()))
        .collect();
    let category_idx = catalog.filter.category.map(|c| c.as_u8() as usize);
    let audience_idx = match catalog.filter.audience {
        Some(Audience::Humans) => Some(0),
        Some(Audience::AIs) => Some(1),
        Some(Audience::Both) | None => None,
    };
    let filters = vec![
        render_pills(&categories, category_idx),
        render_pills(&audiences, audience_idx),
    ];
    f.render_widget(
        Paragraph::new(filters).block(Block::default().borders(Borders::ALL).title(" Filters (c:category a:audience x:clear) ")),
        chunks[1],
    );

    // Featured
    if !catalog.featured.is_empty() {
        let lines: Vec<Line> = catalog
            .featured
            .iter()
            .take(3)
            .map(|app| {
                Line::from(vec![
                    Span::raw(format!(" {} ", app.icon())),
                    Span::styled(app.name.clone(), Style::default().bold()),
                    Span::styled(format!("  {}", app.description), Style::default().fg(Color::Gray)),
                ])
            })
            .collect();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(255, 120, 40)))
            .title(" ⭐ Featured Apps ");
        f.render_widget(Paragraph::new(lines).block(block), chunks[2]);
    }

    // Listings
    let loading = if catalog.is_loading { " [loading…]" } else { "" };
    let pager = if catalog.has_next_page { " n:next" } else { "" };
    let title = format!(" Apps ({}) page {}{}{} ", catalog.listings.len(), catalog.page, pager, loading);
    let block = Block::default().borders(Borders::ALL).title(title);

    if catalog.listings.is_empty() {
        let empty = if catalog.is_loading {
            vec![Line::from(Span::styled("Loading apps…", Style::default().fg(Color::DarkGray)))]
        } else {
            vec![
                Line::from(""),
                Line::from(Span::styled("📭 No apps found", Style::default().bold())),
                Line::from(""),
                Line::from("Be the first to list an app in this category!"),
                Line::from(Span::styled("Press 's' to submit your app", Style::default().fg(Color::Rgb(255, 120, 40)))),
            ]
        };
        f.render_widget(Paragraph::new(empty).alignment(Alignment::Center).block(block), chunks[3]);
        return;
    }

    let items: Vec<ListItem> = catalog
        .listings
        .iter()
        .map(|app| {
            let mut header = vec![
                Span::raw(format!("{} ", app.icon())),
                Span::styled(app.name.clone(), Style::default().bold()),
                Span::raw("  "),
                Span::styled(
                    format!("{} {}", app.category.emoji(), app.category.as_str()),
                    Style::default().fg(category_color(app.category)),
                ),
                Span::styled(
                    format!("  {} {}", app.audience.emoji(), app.audience.as_str()),
                    Style::default().fg(Color::Gray),
                ),
            ];
            if let Some((badge, color)) = tier_badge(app.tier) {
                header.push(Span::styled(format!("  {}", badge), Style::default().fg(color)));
            }
            ListItem::new(vec![
                Line::from(header),
                Line::from(Span::styled(format!("   {}", app.description), Style::default().fg(Color::Gray))),
                Line::from(Span::styled(format!("   {}", app.url), Style::default().fg(Color::Blue))),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 40)))
        .highlight_symbol("▶ ");

    let mut list_state = ListState::default();
    list_state.select(Some(catalog.selected));
    f.render_stateful_widget(list, chunks[3], &mut list_state);
}

fn draw_connect_prompt(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(60, 40, area);
    let action = if state.wallet_connecting {
        Line::from(Span::styled("Waiting for your wallet…", Style::default().fg(Color::Yellow)))
    } else {
        Line::from(Span::styled("Press 'w' to connect your wallet", Style::default().fg(Color::Rgb(255, 120, 40)).bold()))
    };
    let content = vec![
        Line::from(""),
        Line::from(Span::styled("🔌 Connect Your Wallet", Style::default().bold())),
        Line::from(""),
        Line::from("Connect your wallet to submit an app to the store."),
        Line::from(""),
        action,
    ];
    let block = Block::default().borders(Borders::ALL).title(" Submit Your App ");
    f.render_widget(Paragraph::new(content).alignment(Alignment::Center).block(block), popup_area);
}

fn draw_form(f: &mut Frame, workflow: &WorkflowView, input_mode: InputMode, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(columns[0]);

    let fields = [
        DraftField::Name,
        DraftField::Description,
        DraftField::Url,
        DraftField::IconUrl,
        DraftField::Category,
        DraftField::Audience,
    ];
    let editing = input_mode == InputMode::Editing;

    for (field, row) in fields.iter().zip(rows.iter()) {
        let focused = workflow.focus == *field;
        let content = match field {
            DraftField::Category => format!("◀ {} {} ▶", workflow.draft.category.emoji(), workflow.draft.category.as_str()),
            DraftField::Audience => format!("◀ {} {} ▶", workflow.draft.audience.emoji(), workflow.draft.audience.as_str()),
            _ => workflow.draft.text(*field).to_string(),
        };
        let title = format!(" {} ", field.label());
        f.render_widget(render_input(&content, &title, focused, focused && editing), *row);

        if focused && editing && field.is_text() {
            let text = workflow.draft.text(*field);
            let column = text[..workflow.cursor.min(text.len())].chars().count() as u16;
            let max_x = row.x + row.width.saturating_sub(2);
            let cursor_x = (row.x + column + 1).min(max_x);
            f.set_cursor_position(Position::new(cursor_x, row.y + 1));
        }
    }

    draw_fee_panel(f, workflow, columns[1]);
}

fn draw_fee_panel(f: &mut Frame, workflow: &WorkflowView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let basic = workflow.prices.map(|p| p.basic);
    let mut lines = vec![
        Line::from(vec![Span::raw(" Listing fee (Basic): "), Span::styled(token_amount(basic), Style::default().bold())]),
        Line::from(vec![
            Span::raw(" Featured: "),
            Span::raw(token_amount(workflow.prices.map(|p| p.featured))),
            Span::raw("  Premium: "),
            Span::raw(token_amount(workflow.prices.map(|p| p.premium))),
        ]),
        Line::from(vec![Span::raw(" Your balance: "), Span::raw(token_amount(workflow.balance))]),
        Line::from(vec![Span::raw(" Approved: "), Span::raw(token_amount(workflow.allowance))]),
    ];
    if workflow.insufficient_balance {
        lines.push(Line::from(Span::styled(
            format!(" ⚠ Insufficient {} balance for the listing fee", TOKEN_SYMBOL),
            Style::default().fg(Color::Yellow),
        )));
    }
    lines.push(Line::from(Span::styled(
        " 🔥 The listing fee is burned",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Fees ")),
        chunks[0],
    );

    let (label, style) = action_button(workflow.action);
    f.render_widget(
        Paragraph::new(label)
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        chunks[1],
    );

    let mut notes = Vec::new();
    if let Some(tx_hash) = workflow.pending_tx {
        notes.push(Line::from(Span::styled(format!(" tx {}", tx_hash), Style::default().fg(Color::Gray))));
    }
    if let Some(error) = &workflow.last_error {
        notes.push(Line::from(Span::styled(format!(" {}", error), Style::default().fg(Color::Red))));
    }
    f.render_widget(Paragraph::new(notes).wrap(Wrap { trim: false }), chunks[2]);
}

fn draw_success(f: &mut Frame, workflow: &WorkflowView, area: Rect) {
    let popup_area = centered_rect(70, 50, area);
    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled("🎉 App Submitted!", Style::default().fg(Color::Green).bold())),
        Line::from(""),
        Line::from("Your app has been submitted for review."),
        Line::from("You'll be notified once it's approved."),
        Line::from(""),
    ];
    if let Some(tx_hash) = workflow.confirmed_tx {
        content.push(Line::from(Span::styled(tx_hash.to_string(), Style::default().fg(Color::Gray))));
        content.push(Line::from(""));
    }
    content.push(Line::from(Span::styled(
        "Press 'b' to go back to the store",
        Style::default().fg(Color::Rgb(255, 120, 40)),
    )));
    let block = Block::default().borders(Borders::ALL).title(" Submit Your App ");
    f.render_widget(Paragraph::new(content).alignment(Alignment::Center).block(block), popup_area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let hint = if state.input_mode == InputMode::Editing {
        " Esc/Enter:stop editing | ←/→:move | Tab:next field "
    } else {
        match state.view {
            View::Catalog => " ↑/↓:select | c/a/x:filters | n/p:page | r:refresh | s:submit | w:wallet | ?:help | q:quit ",
            View::Submit => " Tab:field | e:edit | ←/→:cycle | a:approve | s:submit | b:back | w:wallet | ?:help ",
        }
    };

    let line = match &state.status_message {
        Some(message) => Line::from(vec![
            Span::styled(format!(" {} ", message), Style::default().fg(Color::Yellow)),
            Span::styled("|", Style::default().fg(Color::DarkGray)),
            Span::styled(hint, Style::default().fg(Color::DarkGray)),
        ]),
        None => Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 AGENT APP STORE - Keyboard Shortcuts

 GENERAL
   1 / 2              Browse / Submit
   w                  Connect wallet
   d                  Disconnect wallet
   r                  Refresh
   ?                  Toggle this help
   q / Ctrl+C         Quit

 BROWSE
   ↑ / ↓              Select app
   c                  Cycle category filter
   a                  Cycle audience filter
   x                  Clear filters
   n / p              Next / previous page
   s                  Submit your app

 SUBMIT
   Tab / Shift+Tab    Next / previous field
   e / Enter          Edit field (or cycle selector)
   ← / →              Cycle category / audience
   a                  Approve EMBER spend
   s                  Submit listing
   b / Esc            Back to the store

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text).block(block).wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
