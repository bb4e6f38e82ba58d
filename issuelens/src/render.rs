//! Rendering sinks for chart requests.
//!
//! Three sinks consume the analyzer's charts:
//! - [`TuiSink`] draws each chart fullscreen in the terminal and blocks
//!   until a key is pressed, then returns control for the next chart
//! - [`TextSink`] prints each chart as aligned key/value rows
//! - [`JsonSink`] collects all charts and emits them as one JSON document

use std::io;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use issuelens_core::analytics::{Chart, ChartKind, ChartSink, SeriesColor};
use issuelens_core::format::format_value;
use issuelens_core::Result;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, BorderType, Borders, Chart as ChartWidget, Dataset, GraphType, Paragraph},
    Frame, Terminal,
};

const SKY_BLUE: Color = Color::Rgb(135, 206, 235);
const SALMON: Color = Color::Rgb(250, 128, 114);
const DIM: Color = Color::DarkGray;

fn series_color(color: SeriesColor) -> Color {
    match color {
        SeriesColor::SkyBlue => SKY_BLUE,
        SeriesColor::Blue => Color::Blue,
        SeriesColor::Red => Color::Red,
        SeriesColor::Salmon => SALMON,
    }
}

// ============================================
// Terminal sink
// ============================================

/// Fullscreen terminal chart renderer.
///
/// Owns the terminal for its lifetime: raw mode and the alternate screen
/// are entered on construction and restored on drop, so a failed run still
/// leaves the shell usable.
pub struct TuiSink {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TuiSink {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TuiSink {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

impl ChartSink for TuiSink {
    fn render(&mut self, chart: &Chart) -> Result<()> {
        loop {
            self.terminal.draw(|frame| draw_chart(frame, chart))?;

            // Redraw on resize, move on after a key press
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    break;
                }
            }
        }
        Ok(())
    }
}

fn draw_chart(frame: &mut Frame, chart: &Chart) {
    let chunks = Layout::vertical([
        Constraint::Min(1),    // chart body
        Constraint::Length(1), // footer hint
    ])
    .split(frame.area());

    match chart.kind {
        ChartKind::Bar => draw_bar_chart(frame, chart, chunks[0]),
        ChartKind::Line => draw_line_chart(frame, chart, chunks[0]),
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        format!(
            " {} by {} | press any key for the next chart ",
            chart.y_label, chart.x_label
        ),
        Style::default().fg(DIM),
    )));
    frame.render_widget(footer, chunks[1]);
}

fn draw_bar_chart(frame: &mut Frame, chart: &Chart, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            format!(" {} ", chart.title),
            Style::default().bold(),
        ));

    // Single-series categorical chart; the series color drives the bars
    let Some(series) = chart.series.first() else {
        frame.render_widget(block, area);
        return;
    };
    let color = series_color(series.color);

    // Bar values are drawn in tenths so fractional day means keep their
    // relative heights; the printed value is the real one.
    let bars: Vec<Bar> = series
        .points
        .iter()
        .map(|(label, value)| {
            Bar::default()
                .label(Line::from(label.clone()))
                .value((value * 10.0).round().max(0.0) as u64)
                .text_value(format_value(*value))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect();

    let bar_count = series.points.len().max(1) as u16;
    let bar_width = ((area.width.saturating_sub(2)) / bar_count)
        .saturating_sub(1)
        .clamp(3, 12);

    let widget = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1);

    frame.render_widget(widget, area);
}

fn draw_line_chart(frame: &mut Frame, chart: &Chart, area: Rect) {
    // Series may cover different month sets; plot against their union
    let mut months: Vec<&str> = chart
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|(month, _)| month.as_str()))
        .collect();
    months.sort_unstable();
    months.dedup();

    let max_x = months.len().saturating_sub(1).max(1) as f64;
    let max_y = chart
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|(_, value)| *value))
        .fold(1.0_f64, f64::max);

    let series_data: Vec<Vec<(f64, f64)>> = chart
        .series
        .iter()
        .map(|s| {
            s.points
                .iter()
                .filter_map(|(month, value)| {
                    let idx = months.binary_search(&month.as_str()).ok()?;
                    Some((idx as f64, *value))
                })
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset> = chart
        .series
        .iter()
        .zip(&series_data)
        .map(|(s, data)| {
            Dataset::default()
                .name(s.name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(series_color(s.color)))
                .data(data)
        })
        .collect();

    let x_labels: Vec<Line> = axis_labels(&months)
        .into_iter()
        .map(|l| Line::from(l.to_string()))
        .collect();
    let x_axis = Axis::default()
        .title(chart.x_label.clone())
        .style(Style::default().fg(DIM))
        .bounds([0.0, max_x])
        .labels(x_labels);

    let y_axis = Axis::default()
        .title(chart.y_label.clone())
        .style(Style::default().fg(DIM))
        .bounds([0.0, max_y])
        .labels(vec![
            Line::from("0"),
            Line::from(format_value(max_y / 2.0)),
            Line::from(format_value(max_y)),
        ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            format!(" {} ", chart.title),
            Style::default().bold(),
        ));

    let widget = ChartWidget::new(datasets)
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(widget, area);
}

/// First, middle and last keys of a sorted axis.
fn axis_labels<'a>(keys: &[&'a str]) -> Vec<&'a str> {
    match keys.len() {
        0 => vec![],
        1 => vec![keys[0]],
        2 => vec![keys[0], keys[1]],
        n => vec![keys[0], keys[n / 2], keys[n - 1]],
    }
}

// ============================================
// Plain text sink
// ============================================

/// Prints each chart as aligned key/value rows.
pub struct TextSink;

impl ChartSink for TextSink {
    fn render(&mut self, chart: &Chart) -> Result<()> {
        println!("\n{}", chart.title);
        println!("{}", "-".repeat(chart.title.len()));

        for series in &chart.series {
            if chart.series.len() > 1 {
                println!("[{}]", series.name);
            }
            for (key, value) in &series.points {
                println!("  {:<24} {}", key, format_value(*value));
            }
        }

        Ok(())
    }
}

// ============================================
// JSON sink
// ============================================

/// Collects charts and emits them as a single JSON document on finish.
pub struct JsonSink {
    charts: Vec<serde_json::Value>,
}

impl JsonSink {
    pub fn new() -> Self {
        Self { charts: Vec::new() }
    }

    /// Print the collected charts to stdout.
    pub fn finish(self) -> Result<()> {
        let output = serde_json::json!({ "charts": self.charts });
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}

impl ChartSink for JsonSink {
    fn render(&mut self, chart: &Chart) -> Result<()> {
        self.charts.push(serde_json::to_value(chart)?);
        Ok(())
    }
}
