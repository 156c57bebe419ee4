use crate::calendar::month_grid;
use crate::color_utils::{is_dark, legend, parse_hex};
use crate::config::ViewMode;
use crate::model::CalendarItem;
use crate::tui::state::AppState;
use chrono::{Datelike, NaiveDate};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

fn hex_color(hex: &str) -> Color {
    match parse_hex(hex) {
        Some((r, g, b)) => Color::Rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8),
        None => Color::White,
    }
}

fn item_line(item: &CalendarItem) -> ListItem<'static> {
    ListItem::new(Line::from(vec![Span::styled(
        item.to_line(),
        Style::default().fg(hex_color(&item.color)),
    )]))
}

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(v_chunks[0]);

    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(8)])
        .split(h_chunks[1]);

    match state.view {
        ViewMode::Month => draw_month(f, state, h_chunks[0]),
        ViewMode::Week => draw_week(f, state, h_chunks[0]),
        ViewMode::Day => draw_day(f, state, h_chunks[0]),
    }
    draw_details(f, state, side_chunks[0]);
    draw_legend(f, state, side_chunks[1]);

    // --- Footer ---
    let f_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(v_chunks[1]);
    let status_color = if state.message.starts_with("Error") {
        Color::Red
    } else {
        Color::Cyan
    };
    let status = Paragraph::new(state.message.clone())
        .style(Style::default().fg(status_color))
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                .title(" Status "),
        );
    let help_text = "Tab:View | hjkl:Move | n/p:Period | t:Today | c:Colors | x:Export | r:Reload";
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                .title(" Actions "),
        );
    f.render_widget(status, f_chunks[0]);
    f.render_widget(help, f_chunks[1]);
}

fn period_title(state: &AppState, name: String) -> String {
    if state.loading {
        format!(" {} (Loading...) ", name)
    } else {
        format!(" {} | {} ", name, state.period_summary())
    }
}

fn draw_month(f: &mut Frame, state: &AppState, area: Rect) {
    let view = state.month_view();
    let mut lines = vec![Line::from(Span::styled(
        "  Su    Mo    Tu    We    Th    Fr    Sa",
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    for row in month_grid(view.year, view.month) {
        let spans: Vec<Span> = row
            .iter()
            .map(|cell| match cell {
                None => Span::raw("      "),
                Some(date) => {
                    let items = view.items_on(date.day());
                    let marker = match items.len() {
                        0 => " ".to_string(),
                        n if n > 9 => "+".to_string(),
                        n => n.to_string(),
                    };
                    let mut style = match items.first() {
                        Some(first) => Style::default().fg(hex_color(&first.color)),
                        None => Style::default(),
                    };
                    if *date == state.today {
                        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                    }
                    if *date == state.focus {
                        style = style.bg(Color::DarkGray);
                    }
                    Span::styled(format!(" {:>2}·{} ", date.day(), marker), style)
                }
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(spans));
    }

    let grid = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(period_title(state, view.title()))
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(grid, area);
}

fn draw_week(f: &mut Frame, state: &AppState, area: Rect) {
    let view = state.week_view();
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(period_title(
            state,
            format!(
                "{} – {}",
                view.start.format("%b %d"),
                view.end().format("%b %d %Y")
            ),
        ))
        .border_style(Style::default().fg(Color::Yellow));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 7); 7])
        .split(inner);

    for (i, date) in view.dates().iter().enumerate() {
        let mut entries: Vec<CalendarItem> = view.days[i].clone();
        entries.sort_by(CalendarItem::chronological);
        let items: Vec<ListItem> = entries.iter().map(item_line).collect();
        let border = if *date == state.focus {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let title_style = if *date == state.today {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let column = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(Span::styled(day_heading(*date), title_style)),
        );
        f.render_widget(column, columns[i]);
    }
}

fn day_heading(date: NaiveDate) -> String {
    format!(" {} ", date.format("%a %d"))
}

fn draw_day(f: &mut Frame, state: &mut AppState, area: Rect) {
    let items: Vec<ListItem> = state.day_items().iter().map(item_line).collect();
    let title = period_title(state, state.focus.format("%A %d %B %Y").to_string());
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        );
    f.render_stateful_widget(list, area, &mut state.list_state);
}

fn draw_details(f: &mut Frame, state: &AppState, area: Rect) {
    let text = match state.selected_item() {
        Some(item) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    item.title.clone(),
                    Style::default()
                        .fg(hex_color(&item.color))
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("{} {}", item.kind.icon(), item.kind.label())),
                Line::from(item.date.format("%a %d %b %Y").to_string()),
            ];
            if let Some(t) = &item.time {
                lines.push(Line::from(format!("Time: {}", t)));
            }
            if let Some(loc) = &item.location {
                lines.push(Line::from(format!("Where: {}", loc)));
            }
            lines.push(Line::from(Span::styled(
                item.link.clone(),
                Style::default().fg(Color::DarkGray),
            )));
            let others = state.day_items().len().saturating_sub(1);
            if others > 0 {
                lines.push(Line::from(""));
                lines.push(Line::from(format!("+{} more this day ([ / ])", others)));
            }
            lines
        }
        None => vec![Line::from("Nothing scheduled.")],
    };

    let details = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(day_heading(state.focus)),
        );
    f.render_widget(details, area);
}

fn draw_legend(f: &mut Frame, state: &AppState, area: Rect) {
    let lines: Vec<Line> = legend(state.color_mode)
        .into_iter()
        .map(|(label, hex)| {
            let fg = match parse_hex(hex) {
                Some((r, g, b)) if is_dark(r, g, b) => Color::White,
                _ => Color::Black,
            };
            Line::from(vec![
                Span::styled(" Aa ", Style::default().bg(hex_color(hex)).fg(fg)),
                Span::raw(format!(" {}", label)),
            ])
        })
        .collect();
    let block = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Legend "));
    f.render_widget(block, area);
}
