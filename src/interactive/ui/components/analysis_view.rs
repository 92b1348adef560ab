use crate::interactive::ui::components::Component;
use crate::interactive::ui::events::Message;
use crate::schemas::{AnalysisPayload, ChartKind, ChartSeries, KNOWN_SERIES, SeriesSpec, extract_series};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Paragraph, Sparkline, Wrap},
};

/// Chart grid over the latest analysis payload. Rendering is driven purely
/// by which known series extract; missing keys produce no panel.
#[derive(Default)]
pub struct AnalysisView {
    payload: Option<AnalysisPayload>,
    pending: bool,
    error: Option<String>,
}

impl AnalysisView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_payload(&mut self, payload: Option<AnalysisPayload>) {
        self.payload = payload;
    }

    pub fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    fn render_notice(&self, f: &mut Frame, area: Rect, text: &str, style: Style) {
        let paragraph = Paragraph::new(Line::from(Span::styled(text.to_string(), style)))
            .block(Block::default().title("Analysis").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_panel(f: &mut Frame, area: Rect, spec: &SeriesSpec, series: &ChartSeries) {
        match spec.kind {
            ChartKind::Bar => Self::render_bar(f, area, spec, series),
            ChartKind::TopList => Self::render_top_list(f, area, spec, series),
            ChartKind::Line => Self::render_line(f, area, spec, series),
        }
    }

    fn render_bar(f: &mut Frame, area: Rect, spec: &SeriesSpec, series: &ChartSeries) {
        let data: Vec<(&str, u64)> = series
            .labels
            .iter()
            .zip(&series.values)
            .map(|(label, value)| (label.as_str(), u64::try_from(*value).unwrap_or(0)))
            .collect();
        let chart = BarChart::default()
            .block(Block::default().title(spec.title).borders(Borders::ALL))
            .bar_width(9)
            .bar_gap(1)
            .bar_style(Style::default().fg(Color::Green))
            .value_style(Style::default().fg(Color::Black).bg(Color::Green))
            .data(data.as_slice());
        f.render_widget(chart, area);
    }

    fn render_top_list(f: &mut Frame, area: Rect, spec: &SeriesSpec, series: &ChartSeries) {
        let rows = spec.top.unwrap_or(series.labels.len()).min(series.labels.len());
        let lines: Vec<Line> = (0..rows)
            .map(|i| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<20} ", series.labels[i]),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::raw(series.values.get(i).copied().unwrap_or_default().to_string()),
                ])
            })
            .collect();
        let paragraph = Paragraph::new(lines)
            .block(Block::default().title(spec.title).borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_line(f: &mut Frame, area: Rect, spec: &SeriesSpec, series: &ChartSeries) {
        let title = match (series.labels.first(), series.labels.last()) {
            (Some(first), Some(last)) if series.labels.len() > 1 => {
                format!("{} ({first} .. {last})", spec.title)
            }
            _ => spec.title.to_string(),
        };
        let values: Vec<u64> = series
            .values
            .iter()
            .map(|value| u64::try_from(*value).unwrap_or(0))
            .collect();
        let sparkline = Sparkline::default()
            .block(Block::default().title(title).borders(Borders::ALL))
            .style(Style::default().fg(Color::Blue))
            .data(&values);
        f.render_widget(sparkline, area);
    }
}

impl Component for AnalysisView {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        if self.pending {
            self.render_notice(
                f,
                area,
                "Running full-dataset aggregation...",
                Style::default().fg(Color::Yellow),
            );
            return;
        }
        if let Some(error) = &self.error {
            let text = format!("Analyze failed: {error}");
            self.render_notice(f, area, &text, Style::default().fg(Color::Red));
            return;
        }
        let Some(payload) = &self.payload else {
            self.render_notice(
                f,
                area,
                "Press Enter to aggregate the whole dataset.",
                Style::default(),
            );
            return;
        };

        let panels: Vec<(&SeriesSpec, ChartSeries)> = KNOWN_SERIES
            .iter()
            .filter_map(|spec| extract_series(Some(payload), spec.key).map(|series| (spec, series)))
            .collect();
        if panels.is_empty() {
            self.render_notice(
                f,
                area,
                "The analysis payload contained no renderable series.",
                Style::default(),
            );
            return;
        }

        let row_count = panels.len().div_ceil(2);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Ratio(1, row_count as u32); row_count])
            .split(area);
        for (row_index, pair) in panels.chunks(2).enumerate() {
            match pair {
                [only] => Self::render_panel(f, rows[row_index], only.0, &only.1),
                [left, right] => {
                    let cells = Layout::default()
                        .direction(Direction::Horizontal)
                        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                        .split(rows[row_index]);
                    Self::render_panel(f, cells[0], left.0, &left.1);
                    Self::render_panel(f, cells[1], right.0, &right.1);
                }
                _ => {}
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Enter => Some(Message::SubmitAnalyze),
            _ => None,
        }
    }
}
