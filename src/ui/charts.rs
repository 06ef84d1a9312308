use std::f32::consts::TAU;

use eframe::egui::{
    self, Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Ui, Vec2,
};
use egui_extras::{Column, TableBuilder};
use egui_plot::{uniform_grid_spacer, Bar, BarChart, Plot, PlotPoint, Text};

use crate::color::{ColorMap, LIKERT_BAR, SHARE_BAR};
use crate::data::likert::{Distribution, LikertCategory};
use crate::data::shares::ValueShare;
use crate::report::{ChartData, ChartResult, SectionReport};
use crate::sections::ChartKind;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// Central panel: the selected section
// ---------------------------------------------------------------------------

/// Render the selected section in the central panel.
pub fn section_view(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a survey file to view the dashboard  (File → Open…)");
        });
        return;
    }

    let Some(report) = &state.report else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new("This section could not be summarised.").color(Color32::RED));
        });
        return;
    };

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            section_body(ui, report);
        });
}

fn section_body(ui: &mut Ui, report: &SectionReport) {
    ui.heading(report.heading);
    ui.label(format!("{} respondents", report.respondents));
    ui.separator();

    for chart in &report.charts {
        ui.add_space(8.0);
        ui.strong(chart.title);
        ui.push_id(chart.column, |ui: &mut Ui| {
            ui.columns(2, |cols: &mut [Ui]| {
                draw_chart(&mut cols[0], chart);
                numbers_table(&mut cols[1], chart);
            });
        });
        ui.separator();
    }
}

fn draw_chart(ui: &mut Ui, chart: &ChartResult) {
    match (&chart.data, chart.kind) {
        (ChartData::Likert(dist), _) => likert_bar_chart(ui, chart.column, dist),
        (ChartData::Shares(shares), ChartKind::Pie) => pie_chart(ui, shares),
        (ChartData::Shares(shares), _) => share_bar_chart(ui, chart.column, shares),
    }
}

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

/// Bars over the five response categories, y fixed to 0–100 and each bar
/// annotated with its rounded value.
pub fn likert_bar_chart(ui: &mut Ui, id: &str, dist: &Distribution) {
    let labels: Vec<String> = LikertCategory::ALL
        .iter()
        .map(|c| c.label().to_string())
        .collect();
    let values: Vec<f64> = dist.0.to_vec();
    labelled_bars(ui, id, "Response Categories", labels, &values, LIKERT_BAR);
}

/// One bar per distinct value of a nominal column.
pub fn share_bar_chart(ui: &mut Ui, id: &str, shares: &[ValueShare]) {
    if shares.is_empty() {
        ui.label("No answers.");
        return;
    }
    let labels: Vec<String> = shares.iter().map(|s| s.label.clone()).collect();
    let values: Vec<f64> = shares.iter().map(|s| s.percent).collect();
    labelled_bars(ui, id, id, labels, &values, SHARE_BAR);
}

fn labelled_bars(
    ui: &mut Ui,
    id: &str,
    x_title: &str,
    labels: Vec<String>,
    values: &[f64],
    fill: Color32,
) {
    let bars: Vec<Bar> = labels
        .iter()
        .zip(values)
        .enumerate()
        .map(|(i, (label, &value))| {
            Bar::new((i + 1) as f64, value)
                .name(label)
                .fill(fill)
                .width(0.7)
        })
        .collect();

    let tick_labels = labels.clone();
    Plot::new(("bars", id))
        .height(CHART_HEIGHT)
        .x_axis_label(x_title)
        .y_axis_label("Percentage (%)")
        .include_y(0.0)
        .include_y(100.0)
        .include_x(0.4)
        .include_x(labels.len() as f64 + 0.6)
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(move |mark, _range| {
            let pos = mark.value.round();
            if (mark.value - pos).abs() > 1e-6 || pos < 1.0 {
                return String::new();
            }
            tick_labels
                .get(pos as usize - 1)
                .cloned()
                .unwrap_or_default()
        })
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
            for (i, &value) in values.iter().enumerate() {
                let anchor = PlotPoint::new((i + 1) as f64, value + 1.0);
                plot_ui.text(Text::new(anchor, format!("{value:.1}")).anchor(Align2::CENTER_BOTTOM));
            }
        });
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Slices with percentage labels and a legend.
pub fn pie_chart(ui: &mut Ui, shares: &[ValueShare]) {
    if shares.is_empty() {
        ui.label("No answers.");
        return;
    }

    let colors = ColorMap::new(shares.iter().map(|s| s.label.as_str()));
    let size = Vec2::new(ui.available_width(), CHART_HEIGHT);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;

    let radius = (rect.height() * 0.45).min(rect.width() * 0.3);
    let center = Pos2::new(rect.left() + radius + 10.0, rect.center().y);

    let mut start = -TAU / 4.0;
    for share in shares {
        let sweep = (share.percent / 100.0) as f32 * TAU;
        let color = colors.color_for(&share.label);
        for wedge in wedges(center, radius, start, sweep) {
            painter.add(Shape::convex_polygon(wedge, color, Stroke::NONE));
        }
        if share.percent >= 4.0 {
            let mid = start + sweep / 2.0;
            let pos = center + Vec2::angled(mid) * radius * 0.65;
            painter.text(
                pos,
                Align2::CENTER_CENTER,
                format!("{:.1}%", share.percent),
                FontId::proportional(12.0),
                Color32::BLACK,
            );
        }
        start += sweep;
    }

    // Legend
    let text_color = ui.visuals().text_color();
    let mut y = rect.top() + 10.0;
    let x = center.x + radius + 24.0;
    for (label, color) in colors.legend_entries() {
        let swatch = egui::Rect::from_min_size(Pos2::new(x, y), Vec2::splat(12.0));
        painter.rect_filled(swatch, 2.0, color);
        painter.text(
            Pos2::new(x + 18.0, y + 6.0),
            Align2::LEFT_CENTER,
            label,
            FontId::proportional(13.0),
            text_color,
        );
        y += 18.0;
    }
}

/// Split an arc sector into convex polygons of at most a quarter turn.
fn wedges(center: Pos2, radius: f32, start: f32, sweep: f32) -> Vec<Vec<Pos2>> {
    const MAX_WEDGE: f32 = TAU / 4.0;
    const STEP: f32 = TAU / 180.0;

    let mut out = Vec::new();
    let mut from = start;
    let end = start + sweep;
    while end - from > 1e-4 {
        let to = (from + MAX_WEDGE).min(end);
        let steps = ((to - from) / STEP).ceil().max(1.0) as usize;
        let mut poly = Vec::with_capacity(steps + 2);
        poly.push(center);
        for k in 0..=steps {
            let angle = from + (to - from) * k as f32 / steps as f32;
            poly.push(center + Vec2::angled(angle) * radius);
        }
        out.push(poly);
        from = to;
    }
    out
}

// ---------------------------------------------------------------------------
// Numbers next to each chart
// ---------------------------------------------------------------------------

fn numbers_table(ui: &mut Ui, chart: &ChartResult) {
    let rows: Vec<(String, f64)> = match &chart.data {
        // Total falls below 100 when some answers were outside 1..=5.
        ChartData::Likert(dist) => dist
            .iter()
            .map(|(category, pct)| (category.label().to_string(), pct))
            .chain(std::iter::once(("Total".to_string(), dist.total())))
            .collect(),
        ChartData::Shares(shares) => shares
            .iter()
            .map(|s| (s.label.clone(), s.percent))
            .collect(),
    };

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(60.0))
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Response");
            });
            header.col(|ui| {
                ui.strong("%");
            });
        })
        .body(|mut body| {
            for (label, pct) in &rows {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(label);
                    });
                    row.col(|ui| {
                        ui.label(format!("{pct:.1}"));
                    });
                });
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wedges_cover_the_sweep() {
        let center = Pos2::new(0.0, 0.0);
        assert_eq!(wedges(center, 10.0, 0.0, TAU).len(), 4);
        assert_eq!(wedges(center, 10.0, 0.0, TAU / 8.0).len(), 1);
        assert!(wedges(center, 10.0, 0.0, 0.0).is_empty());
    }

    #[test]
    fn test_wedge_ends_on_arc() {
        let center = Pos2::new(5.0, 5.0);
        let wedge = &wedges(center, 10.0, 0.0, TAU / 4.0)[0];
        assert_eq!(wedge[0], center);
        let last = *wedge.last().unwrap();
        assert!((last.distance(center) - 10.0).abs() < 1e-3);
        assert!((last.x - 5.0).abs() < 1e-3);
    }
}
