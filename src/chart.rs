use crate::review::YearInReview;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Direction},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{
        block::{Position, Title},
        Bar as BarItem, BarChart, BarGroup, Block, Borders,
    },
    Terminal,
};
use std::io;

const TOTAL_LABEL: &str = "Total";
const X_LABEL: &str = "Playtime (hours)";
const Y_LABEL: &str = "Games";
const CLOSE_HINT: &str = " press any key to close ";

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub hours: f64,
}

/// Horizontal bar chart of hours played: the total first, then each game in the order Steam
/// ranked them.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub bars: Vec<Bar>,
}

impl Chart {
    pub fn from_review(review: &YearInReview, year: u32) -> Self {
        let bars = std::iter::once(Bar {
            label: TOTAL_LABEL.to_string(),
            hours: review.total.hours(),
        })
        .chain(review.games.iter().map(|game| Bar {
            label: game.name.clone(),
            hours: game.playtime.hours(),
        }))
        .collect();

        Self {
            title: format!("Playtime by games ({})", year),
            x_label: X_LABEL,
            y_label: Y_LABEL,
            bars,
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.bars.iter().map(|bar| bar.label.as_str()).collect()
    }

    pub fn hours(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.hours).collect()
    }
}

pub trait ChartRenderer {
    fn render(&mut self, chart: &Chart) -> Result<()>;
}

impl<R: ChartRenderer + ?Sized> ChartRenderer for &mut R {
    fn render(&mut self, chart: &Chart) -> Result<()> {
        (**self).render(chart)
    }
}

/// Bar lengths are integers, so hours are scaled to hundredths.
fn bar_value(hours: f64) -> u64 {
    (hours * 100.).round() as u64
}

/// Builds the widget drawn for `chart`: one horizontal bar per entry, each annotated with its
/// hours to two decimals.
pub fn bar_chart(chart: &Chart, color: bool) -> BarChart<'_> {
    let bars = chart
        .bars
        .iter()
        .map(|bar| {
            BarItem::default()
                .label(Line::from(bar.label.as_str()))
                .value(bar_value(bar.hours))
                .text_value(format!("{:.2}", bar.hours))
        })
        .collect::<Vec<_>>();
    let max = chart.bars.iter().map(|bar| bar_value(bar.hours)).max().unwrap_or(0);

    let bar_style = if color {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Title::from(chart.y_label).alignment(Alignment::Left))
                .title(
                    Title::from(Line::from(chart.title.as_str()).style(
                        Style::default().add_modifier(Modifier::BOLD),
                    ))
                    .alignment(Alignment::Center),
                )
                .title(
                    Title::from(chart.x_label)
                        .position(Position::Bottom)
                        .alignment(Alignment::Center),
                )
                .title(
                    Title::from(CLOSE_HINT)
                        .position(Position::Bottom)
                        .alignment(Alignment::Right),
                ),
        )
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .bar_style(bar_style)
        .value_style(Style::default().add_modifier(Modifier::BOLD))
        .max(max.max(1))
        .data(BarGroup::default().bars(&bars))
}

/// Shows the chart full screen and blocks until a key is pressed.
#[derive(Debug)]
pub struct TuiRenderer {
    color: bool,
}

impl TuiRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn show<B: Backend>(&self, terminal: &mut Terminal<B>, chart: &Chart) -> Result<()> {
        loop {
            terminal.draw(|frame| frame.render_widget(bar_chart(chart, self.color), frame.size()))?;

            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(()),
                _ => {}
            }
        }
    }
}

impl ChartRenderer for TuiRenderer {
    fn render(&mut self, chart: &Chart) -> Result<()> {
        log::debug!("Rendering {} bars", chart.bars.len());

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let shown = self.show(&mut terminal, chart);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        shown
    }
}
