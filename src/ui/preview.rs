use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend, TestBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};

use super::strip::PaletteStrip;
use crate::palette::{Palette, Rgb};

/// Show `palette` full screen until a key is pressed
pub fn show(palette: &Palette, show_ribbon: bool, show_hex: bool) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
        EnterAlternateScreen
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let truecolor = super::supports_true_color();
    let result = run(&mut terminal, palette, show_ribbon, show_hex, truecolor);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;

    result
}

fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    palette: &Palette,
    show_ribbon: bool,
    show_hex: bool,
    truecolor: bool,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, palette, show_ribbon, show_hex, truecolor))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(()),
                // redraw on the next pass
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }
}

fn draw(frame: &mut Frame, palette: &Palette, show_ribbon: bool, show_hex: bool, truecolor: bool) {
    let area = frame.area();
    let (strip_area, footer_area) = if area.height >= 3 {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    let strip = PaletteStrip::new(palette)
        .ribbon(show_ribbon)
        .hex(show_hex)
        .truecolor(truecolor);
    frame.render_widget(strip, strip_area);

    if let Some(footer) = footer_area {
        draw_footer(frame, footer, palette, truecolor);
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, palette: &Palette, truecolor: bool) {
    let color = |hex: &str| Rgb::parse(hex).ok().map(|c| c.to_color(truecolor));
    let mut style = Style::default();
    if let Some(bg) = color(palette.background()) {
        style = style.bg(bg);
    }
    if let Some(fg) = color(palette.base_text()) {
        style = style.fg(fg);
    }

    let line = Line::from(vec![
        Span::raw(format!(" {} ", palette.theme())),
        Span::raw(format!("({} colors)", palette.len())),
        Span::raw("  any key: close"),
    ]);
    frame.render_widget(Paragraph::new(line).style(style), area);
}

/// Render into an in-memory terminal and return its rows as text
pub fn snapshot(
    palette: &Palette,
    width: u16,
    height: u16,
    show_ribbon: bool,
    show_hex: bool,
) -> io::Result<Vec<String>> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend)?;
    terminal.draw(|f| draw(f, palette, show_ribbon, show_hex, true))?;

    let buffer = terminal.backend().buffer();
    let lines = (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect();
    Ok(lines)
}
