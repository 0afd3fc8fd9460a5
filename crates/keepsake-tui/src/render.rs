//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects. `page_layout` is shared with the reducer
//! so mouse clicks land on the same slider the user sees.

use keepsake_core::pages::{Block as PageBlock, MAX_TAPS, PageView, Tone};
use keepsake_core::sequence::PageId;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::state::AppState;

/// Widest the slider gets, in cells.
const SLIDER_MAX_WIDTH: u16 = 48;

/// Ticks per caret blink phase.
const CARET_BLINK_TICKS: u64 = 8;

/// Accent at the first page and at the last; the frame drifts between them.
const ACCENT_START: (u8, u8, u8) = (170, 160, 255);
const ACCENT_END: (u8, u8, u8) = (255, 120, 165);

/// Pointer glow strength while the pointer moves, and while it rests.
const GLOW_ACTIVE: f32 = 0.8;
const GLOW_IDLE: f32 = 0.2;

/// Screen regions inside the frame border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub content: Rect,
    pub slider: Rect,
    pub button: Rect,
    pub footer: Rect,
}

/// Splits the terminal area into the regions every page draws into.
pub fn page_layout(area: Rect) -> PageLayout {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let [content, slider_row, _, button, _, footer] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let slider_width = SLIDER_MAX_WIDTH.min(slider_row.width.saturating_sub(4));
    let slider = Rect {
        x: slider_row.x + (slider_row.width.saturating_sub(slider_width)) / 2,
        width: slider_width,
        ..slider_row
    };

    PageLayout {
        content,
        slider,
        button,
        footer,
    }
}

/// Maps a column inside the slider to a value in `0..=100`.
pub fn slider_value(slider: Rect, column: u16) -> i32 {
    if slider.width <= 1 {
        return 100;
    }
    let offset = i32::from(column) - i32::from(slider.x);
    (offset * 100 / i32::from(slider.width - 1)).clamp(0, 100)
}

/// Renders the whole presentation.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let view = app.session.view();
    let layout = page_layout(area);
    let accent = accent(app.session.depth());

    let border_color = if app.is_flashing() {
        Color::White
    } else {
        scale(accent, 0.4 + 0.6 * app.session.calmness())
    };
    let border = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .title(Line::from(" keepsake ").style(Style::default().fg(accent)))
        .title_bottom(progress_dots(app.session.index(), accent));
    frame.render_widget(border, area);

    let content_lines = content_lines(&view, app, accent, layout.content);
    let padding = layout
        .content
        .height
        .saturating_sub(wrapped_height(&content_lines, layout.content.width))
        / 2;
    let mut lines = vec![Line::default(); padding as usize];
    lines.extend(content_lines);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        layout.content,
    );

    if let Some(progress) = view.blocks.iter().find_map(|b| match b {
        PageBlock::Slider { progress } => Some(*progress),
        _ => None,
    }) {
        frame.render_widget(
            Paragraph::new(slider_line(progress, layout.slider.width, accent)),
            layout.slider,
        );
    }

    if let Some(button) = view.button.as_ref().filter(|b| b.visible) {
        let label = Span::styled(
            format!("[ {} ]", button.label),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        );
        frame.render_widget(
            Paragraph::new(Line::from(label)).alignment(Alignment::Center),
            layout.button,
        );
    }

    frame.render_widget(
        Paragraph::new(Line::from(footer_hint(app, &view)).style(Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Center),
        layout.footer,
    );

    render_pointer_glow(app, &view, accent, frame);
}

/// Tints the cell under the pointer. The final page has no glow.
fn render_pointer_glow(app: &AppState, view: &PageView, accent: Color, frame: &mut Frame) {
    if view.id == PageId::FinalLetter {
        return;
    }
    let Some((x, y)) = app.session.ambient().pointer() else {
        return;
    };
    if !frame.area().contains(Position::new(x, y)) {
        return;
    }
    let strength = if app.session.ambient().idle() {
        GLOW_IDLE
    } else {
        GLOW_ACTIVE
    };
    frame.buffer_mut()[(x, y)].set_bg(scale(accent, strength));
}

// ============================================================================
// Content
// ============================================================================

/// Lines for the content area. Pages taller than the area keep their newest
/// blocks, so a long letter scrolls as it types.
fn content_lines(view: &PageView, app: &AppState, accent: Color, area: Rect) -> Vec<Line<'static>> {
    let mut rendered: Vec<Vec<Line<'static>>> = view
        .blocks
        .iter()
        .filter_map(|block| block_lines(block, app, accent))
        .collect();

    let mut used = 0;
    let mut keep = 0;
    for block in rendered.iter().rev() {
        let height = wrapped_height(block, area.width) + 1;
        if used + height > area.height && keep > 0 {
            break;
        }
        used += height;
        keep += 1;
    }
    rendered.drain(..rendered.len() - keep);

    let mut lines = Vec::new();
    for (i, block) in rendered.into_iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.extend(block);
    }
    lines
}

fn block_lines(block: &PageBlock, app: &AppState, accent: Color) -> Option<Vec<Line<'static>>> {
    let lines = match block {
        PageBlock::Text { text, tone } => vec![Line::styled(text.clone(), tone_style(*tone, accent))],
        PageBlock::Words { words, revealed } => {
            let mut spans = Vec::with_capacity(words.len() * 2);
            for (i, word) in words.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                if i < *revealed {
                    spans.push(Span::styled(
                        word.clone(),
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    ));
                } else {
                    // Hidden words keep their width so the sentence doesn't jump.
                    spans.push(Span::styled(
                        "·".repeat(word.width()),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            }
            vec![Line::from(spans)]
        }
        PageBlock::Heart { taps, threshold } => {
            let shown = (*threshold).min(MAX_TAPS);
            let filled = (*taps).min(shown) as usize;
            let hearts: Vec<&str> = (0..shown as usize)
                .map(|i| if i < filled { "♥" } else { "♡" })
                .collect();
            vec![Line::styled(
                hearts.join(" "),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )]
        }
        // Drawn in its own row.
        PageBlock::Slider { .. } => return None,
        PageBlock::Typed { text, tone, typing } => {
            let mut spans = vec![Span::styled(text.clone(), tone_style(*tone, accent))];
            if *typing && (app.frame / CARET_BLINK_TICKS) % 2 == 0 {
                spans.push(Span::styled("▌", Style::default().fg(accent)));
            }
            vec![Line::from(spans)]
        }
    };
    Some(lines)
}

fn tone_style(tone: Tone, accent: Color) -> Style {
    match tone {
        Tone::Title => Style::default().fg(accent).add_modifier(Modifier::BOLD),
        Tone::Primary => Style::default().fg(Color::White),
        Tone::Secondary => Style::default().fg(Color::Gray),
        Tone::Whisper => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
        Tone::Emphasis => Style::default()
            .fg(accent)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    }
}

/// Rows the lines take once wrapped to `width`.
fn wrapped_height(lines: &[Line<'_>], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(width) as u16)
        .sum()
}

fn slider_line(progress: u8, width: u16, accent: Color) -> Line<'static> {
    let width = usize::from(width);
    if width == 0 {
        return Line::default();
    }
    let knob = (usize::from(progress) * (width - 1)) / 100;
    let filled = "━".repeat(knob);
    let rest = "─".repeat(width - 1 - knob);
    Line::from(vec![
        Span::styled(filled, Style::default().fg(accent)),
        Span::styled("●", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        Span::styled(rest, Style::default().fg(Color::DarkGray)),
    ])
}

fn progress_dots(index: usize, accent: Color) -> Line<'static> {
    let dots: Vec<Span<'static>> = PageId::ALL
        .iter()
        .map(|page| {
            if page.index() <= index {
                Span::styled(" ●", Style::default().fg(accent))
            } else {
                Span::styled(" ○", Style::default().fg(Color::DarkGray))
            }
        })
        .chain(std::iter::once(Span::raw(" ")))
        .collect();
    Line::from(dots).alignment(Alignment::Center)
}

fn footer_hint(app: &AppState, view: &PageView) -> &'static str {
    if app.finished {
        return "q to close";
    }
    match view.id {
        PageId::Heart => "enter or click to tap the heart",
        PageId::DragReveal => "drag the slider, or use ← →",
        _ if view.button.as_ref().is_some_and(|b| b.visible) => "enter or click to continue",
        _ => "",
    }
}

// ============================================================================
// Colour
// ============================================================================

/// Accent colour for a presentation depth in `0.0..=1.0`.
fn accent(depth: f32) -> Color {
    let t = depth.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
    Color::Rgb(
        mix(ACCENT_START.0, ACCENT_END.0),
        mix(ACCENT_START.1, ACCENT_END.1),
        mix(ACCENT_START.2, ACCENT_END.2),
    )
}

/// Dims an RGB colour by `factor` in `0.0..=1.0`; other colours pass through.
fn scale(color: Color, factor: f32) -> Color {
    let factor = factor.clamp(0.0, 1.0);
    match color {
        Color::Rgb(r, g, b) => {
            let s = |c: u8| (f32::from(c) * factor).round() as u8;
            Color::Rgb(s(r), s(g), s(b))
        }
        other => other,
    }
}
