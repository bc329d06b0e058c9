use primitive_types::U256;
use ratatui::{prelude::*, widgets::*};

use crate::app::workflow::Action;
use crate::constants::TOKEN_SYMBOL;
use crate::models::{format_units, Category, ListingTier};

/// Renders a form field with a focus/editing border
pub fn render_input<'a>(content: &'a str, title: &'a str, is_focused: bool, is_editing: bool) -> Paragraph<'a> {
    let style = if is_focused && is_editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title);

    Paragraph::new(content).block(block)
}

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// A row of filter pills; `selected = None` highlights the leading "All"
pub fn render_pills(labels: &[String], selected: Option<usize>) -> Line<'static> {
    let mut spans = Vec::with_capacity(labels.len() * 2 + 2);
    let all = std::iter::once(("All".to_string(), selected.is_none()));
    let rest = labels.iter().enumerate().map(|(i, l)| (l.clone(), selected == Some(i)));

    for (label, active) in all.chain(rest) {
        let style = if active {
            Style::default().fg(Color::Black).bg(Color::Rgb(255, 120, 40)).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", label), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Category color
pub fn category_color(category: Category) -> Color {
    match category {
        Category::Tools => Color::Blue,
        Category::Games => Color::Magenta,
        Category::DeFi => Color::Green,
        Category::Social => Color::Cyan,
        Category::Utils => Color::Yellow,
        Category::Other => Color::Gray,
    }
}

/// Tier badge text and color
pub fn tier_badge(tier: ListingTier) -> Option<(&'static str, Color)> {
    match tier {
        ListingTier::Basic => None,
        ListingTier::Featured => Some(("⭐ Featured", Color::Rgb(255, 120, 40))),
        ListingTier::Premium => Some(("💎 Premium", Color::Rgb(180, 120, 255))),
    }
}

/// Token amount with symbol, or a placeholder while unknown
pub fn token_amount(amount: Option<U256>) -> String {
    match amount {
        Some(value) => format!("{} {}", format_units(value), TOKEN_SYMBOL),
        None => String::from("…"),
    }
}

/// Label and style of the workflow's action control
pub fn action_button(action: Action) -> (&'static str, Style) {
    let active = Style::default().fg(Color::Black).bg(Color::Rgb(255, 120, 40)).bold();
    let inactive = Style::default().fg(Color::DarkGray).bg(Color::Rgb(40, 40, 40));
    match action {
        Action::Unknown => ("Checking allowance…", inactive),
        Action::Approve { busy: true, .. } => ("Approving…", inactive),
        Action::Approve { enabled: true, .. } => ("Approve EMBER (a)", active),
        Action::Approve { enabled: false, .. } => ("Approve EMBER", inactive),
        Action::Submit { busy: true, .. } => ("Submitting…", inactive),
        Action::Submit { enabled: true, .. } => ("Submit App (s)", active),
        Action::Submit { enabled: false, .. } => ("Submit App (fill in name and URL)", inactive),
        Action::Done => ("Submitted", inactive),
    }
}
