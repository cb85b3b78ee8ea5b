//! Drawing the list viewer with ratatui.

use super::model::{Mode, StackItem, ViewModel};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

const TITLE_FG: Color = Color::Rgb(0xFF, 0xFD, 0xF5);
const TITLE_BG: Color = Color::Rgb(0x25, 0xA0, 0x65);
const STATUS_FG: Color = Color::Rgb(0x04, 0xB5, 0x75);
const SELECTED_FG: Color = Color::Rgb(0xEE, 0x6F, 0xF8);
const DIM_FG: Color = Color::Rgb(0x77, 0x77, 0x77);
const MATCH_FG: Color = Color::Rgb(0xFF, 0xD7, 0x00);

/// Render the whole viewer
pub fn draw(f: &mut Frame, model: &mut ViewModel, list_state: &mut ListState) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Entry list
            Constraint::Length(1), // Status / filter input
            Constraint::Length(1), // Help
        ])
        .split(f.area());

    let title = Paragraph::new(Line::from(Span::styled(
        format!(" {} ", model.title()),
        Style::default().fg(TITLE_FG).bg(TITLE_BG),
    )));
    f.render_widget(title, layout[0]);

    model.set_viewport_rows(layout[2].height as usize);

    let items: Vec<ListItem> = model
        .visible()
        .iter()
        .filter_map(|rank| {
            model
                .items()
                .get(rank.index)
                .map(|item| entry_item(item, &rank.matched, model.detail_height()))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().fg(SELECTED_FG))
        .highlight_symbol("│ ");

    list_state.select(model.selected());
    f.render_stateful_widget(list, layout[2], list_state);

    f.render_widget(status_line(model), layout[3]);

    let help = Paragraph::new(Line::from(Span::styled(
        format!(
            "↑/↓ move • / filter • +/- detail height ({}) • q quit",
            model.detail_height()
        ),
        Style::default().fg(DIM_FG),
    )));
    f.render_widget(help, layout[4]);
}

/// Filter input while typing, otherwise a count of what is shown
fn status_line(model: &ViewModel) -> Paragraph<'static> {
    let text = match model.mode() {
        Mode::Filtering => format!("Filter: {}_", model.query()),
        Mode::Browsing if !model.query().is_empty() => format!(
            "\"{}\" matched {} of {} stacks",
            model.query(),
            model.visible().len(),
            model.items().len()
        ),
        Mode::Browsing => format!(
            "{} stacks, {} goroutines",
            model.items().len(),
            model.total_goroutines()
        ),
    };

    Paragraph::new(Line::from(Span::styled(text, Style::default().fg(STATUS_FG))))
}

/// Title line plus the first `detail_height` call-stack lines
///
/// `matched` holds character offsets into `item.filter_value()`.
fn entry_item(item: &StackItem, matched: &[usize], detail_height: usize) -> ListItem<'static> {
    let title_style = Style::default().add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(DIM_FG);

    let mut lines = vec![highlight(&item.title, 0, matched, title_style)];

    // Description offsets start after the title and the joining space
    let mut base = item.title.chars().count() + 1;
    for text in item.description.split('\n').take(detail_height) {
        lines.push(highlight(text, base, matched, desc_style));
        base += text.chars().count() + 1;
    }
    lines.push(Line::default());

    ListItem::new(Text::from(lines))
}

/// Split `text` into spans, styling characters whose offset is in `matched`
fn highlight(text: &str, base: usize, matched: &[usize], style: Style) -> Line<'static> {
    let hit_style = style.fg(MATCH_FG).add_modifier(Modifier::UNDERLINED);

    let mut spans = Vec::new();
    let mut current = String::new();
    let mut current_hit = false;

    for (i, ch) in text.chars().enumerate() {
        let is_hit = matched.binary_search(&(base + i)).is_ok();
        if is_hit != current_hit && !current.is_empty() {
            let run_style = if current_hit { hit_style } else { style };
            spans.push(Span::styled(std::mem::take(&mut current), run_style));
        }
        current_hit = is_hit;
        current.push(ch);
    }

    if !current.is_empty() {
        let run_style = if current_hit { hit_style } else { style };
        spans.push(Span::styled(current, run_style));
    }

    Line::from(spans)
}
