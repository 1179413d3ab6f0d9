pub mod field;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use field::Canvas;

pub fn render(frame: &mut Frame, app: &App) {
    let border = if app.flashing() {
        Color::Rgb(255, 120, 60)
    } else {
        Color::Rgb(80, 255, 80)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(" Space Invaders ")
        .title_style(Style::default().fg(Color::Rgb(100, 255, 100)).add_modifier(Modifier::BOLD));

    let area = frame.area();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(8),    // Play field
            Constraint::Length(1), // Help / banner
        ])
        .split(inner);

    render_status(frame, app, chunks[0]);
    render_field(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let hud = app.game.hud();
    let lives_str = "\u{2666} ".repeat(hud.lives as usize);
    let status = Line::from(vec![
        Span::styled(" \u{1f47e} ", Style::default()),
        Span::styled(
            format!("SCORE {} ", hud.score_text()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("HIGH-SCORE {} ", hud.highscore_text()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Lives: {}", lives_str),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Aliens: {} ", app.game.formation().len()),
            Style::default().fg(Color::Rgb(255, 80, 80)),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Shots: {} ", app.shots_fired),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(status), area);
}

fn render_field(frame: &mut Frame, app: &App, area: Rect) {
    let (w, h) = (area.width as usize, area.height as usize);
    if w == 0 || h == 0 {
        return;
    }
    let screen = app.game.screen();
    let mut canvas = Canvas::new(
        w,
        h,
        screen.screen_width + screen.offset,
        screen.screen_height,
    );
    let anim_frame = (app.frame() / 15) % 2 == 0;
    for item in app.game.render_list() {
        canvas.draw(&item, anim_frame);
    }
    frame.render_widget(Paragraph::new(canvas.into_lines()), area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = if !app.game.is_running() {
        Line::from(vec![
            Span::styled(
                " GAME OVER! We're under their control now! ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled("Press ENTER to restart, Q to quit", Style::default().fg(Color::Gray)),
        ])
    } else if app.paused {
        Line::from(vec![Span::styled(
            " PAUSED - Press P to resume ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )])
    } else {
        let sep = || Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60)));
        Line::from(vec![
            Span::styled(" \u{2190}\u{2192} Move ", Style::default().fg(Color::DarkGray)),
            sep(),
            Span::styled("Space Shoot ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            sep(),
            Span::styled("P Pause ", Style::default().fg(Color::DarkGray)),
            sep(),
            Span::styled("Q Quit", Style::default().fg(Color::DarkGray)),
        ])
    };
    frame.render_widget(Paragraph::new(line), area);
}
