use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::app::actions::help_text;
use crate::app::{FilterState, ModeController, NoteBuffer, NoteList};
use crate::app::{FilenameInput, Mode};
use crate::highlight::{filter_regex, highlight_matches};

const ACCENT: Color = Color::Indexed(205);
const IDLE_GLYPH: &str = "🦚";

pub fn draw_app(frame: &mut Frame, controller: &ModeController) {
    let inner = Layout::default()
        .horizontal_margin(2)
        .vertical_margin(1)
        .constraints([Constraint::Min(0)])
        .split(frame.size())[0];

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let welcome = Span::styled(
        "  Welcome to Gotion  ",
        Style::default()
            .fg(Color::Rgb(0xFA, 0xFA, 0xFA))
            .bg(Color::Rgb(0x7D, 0x56, 0xF4))
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(Paragraph::new(Line::from(welcome)), rows[0]);

    let body = rows[2];
    match controller.mode() {
        Mode::Idle => frame.render_widget(Paragraph::new(IDLE_GLYPH), body),
        Mode::CreatePrompt => draw_filename_prompt(frame, controller.filename_input(), body),
        Mode::Editing(handle) => {
            let title = handle
                .path()
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            draw_editor(frame, controller.editor(), &title, body);
        }
        Mode::Browsing => draw_list(frame, controller.list(), body),
    }

    let help = Paragraph::new(Span::styled(
        help_text(),
        Style::default()
            .fg(Color::Rgb(0x88, 0x88, 0x88))
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(help, rows[4]);
    frame.render_widget(Paragraph::new(build_status_line(controller)), rows[5]);
}

fn build_status_line(controller: &ModeController) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("[{}]", controller.mode()),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )];
    if let Some(message) = controller.status_message() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Gray),
        ));
    }
    Line::from(spans)
}

fn draw_filename_prompt(frame: &mut Frame, input: &FilenameInput, area: Rect) {
    let prompt = Span::styled("> ", Style::default().fg(ACCENT));
    let value = if input.value().is_empty() {
        Span::styled(
            FilenameInput::PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::raw(input.value().to_string())
    };
    frame.render_widget(Paragraph::new(Line::from(vec![prompt, value])), area);

    let offset = u16::try_from(input.value().width()).unwrap_or(u16::MAX);
    let x = area
        .x
        .saturating_add(2)
        .saturating_add(offset)
        .min(area.right().saturating_sub(1));
    frame.set_cursor(x, area.y);
}

fn draw_editor(frame: &mut Frame, editor: &NoteBuffer, title: &str, area: Rect) {
    let label = if editor.is_dirty() {
        format!("{title}*")
    } else {
        title.to_string()
    };
    let block = Block::default()
        .title(label)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    let text_area = block.inner(area);

    let (line, _) = editor.cursor_line_col();
    let line = u16::try_from(line).unwrap_or(u16::MAX);
    let scroll = line.saturating_sub(text_area.height.saturating_sub(1));

    let paragraph = if editor.value().is_empty() {
        Paragraph::new(Span::styled(
            NoteBuffer::PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Paragraph::new(editor.value().to_string()).scroll((scroll, 0))
    };
    frame.render_widget(paragraph.block(block), area);

    if text_area.width > 0 && text_area.height > 0 {
        let before_cursor = &editor.value()[..editor.cursor()];
        let line_prefix = before_cursor
            .rsplit('\n')
            .next()
            .unwrap_or_default();
        let column = u16::try_from(line_prefix.width()).unwrap_or(u16::MAX);
        let x = text_area
            .x
            .saturating_add(column)
            .min(text_area.right().saturating_sub(1));
        let y = text_area.y.saturating_add(line - scroll);
        frame.set_cursor(x, y);
    }
}

fn draw_list(frame: &mut Frame, list: &NoteList, area: Rect) {
    let (filter_area, list_area) = if list.filter_state() == FilterState::Unfiltered {
        (None, area)
    } else {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(area);
        (Some(split[0]), split[1])
    };

    if let Some(filter_area) = filter_area {
        let mut spans = vec![
            Span::styled("Filter: ", Style::default().fg(ACCENT)),
            Span::raw(list.filter().to_string()),
        ];
        if list.is_filtering() {
            spans.push(Span::styled("▏", Style::default().fg(ACCENT)));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), filter_area);
    }

    let regex = filter_regex(list.filter());
    let highlight_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut items: Vec<ListItem> = list
        .visible_items()
        .into_iter()
        .map(|note| {
            let title = Line::from(highlight_matches(
                &note.title,
                regex.as_ref(),
                highlight_style,
                Style::default(),
            ));
            let description = Line::from(Span::styled(
                note.description(),
                Style::default().fg(Color::Gray),
            ));
            ListItem::new(vec![title, description])
        })
        .collect();
    if items.is_empty() {
        let message = if list.filter().is_empty() {
            "No notes yet. Press ctrl+n to create one."
        } else {
            "No notes match the filter."
        };
        items.push(ListItem::new(message));
    }

    let widget = List::new(items)
        .block(
            Block::default().title(Span::styled(
                format!(" {} ", NoteList::TITLE),
                Style::default()
                    .fg(Color::Indexed(16))
                    .bg(Color::Indexed(254)),
            )),
        )
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .highlight_symbol("│ ");

    let mut state = ListState::default();
    state.select(list.selected_index());
    frame.render_stateful_widget(widget, list_area, &mut state);
}
