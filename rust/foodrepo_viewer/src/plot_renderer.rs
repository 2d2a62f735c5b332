use eframe::egui;
use egui_plot::{
    Corner,
    Legend,
    Line,
    Plot,
    PlotPoint,
};
use foodrepo::{
    CompositionBuckets,
    SampleProfile,
};
use std::f32::consts::PI;

use tracing::instrument;

pub const OVERLAY_TITLE: &str = "Chromatograms for Selected Samples (Relative Intensity)";
pub const OVERLAY_X_LABEL: &str = "Retention Time (RT)";
pub const OVERLAY_Y_LABEL: &str = "Relative Intensity (%)";

pub const PIE_LABELS: [&str; 5] = ["0-20 min", "20-40 min", "40-60 min", "60-80 min", "80+ min"];
/// Side length of a pie chart cell, in points.
pub const PIE_SIZE: f32 = 250.0;
/// Radius of the donut hole relative to the outer radius.
pub const PIE_HOLE: f32 = 0.3;
pub const PIE_GRID_COLUMNS: usize = 5;

const LEGEND_BACKGROUND_ALPHA: f32 = 0.5;

pub struct LineData {
    points: Vec<PlotPoint>,
    name: String,
    stroke: egui::Stroke,
}

impl LineData {
    fn to_plot_line<'a>(&'a self) -> Line<'a> {
        Line::new(self.name(), self.points()).stroke(self.stroke)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[PlotPoint] {
        &self.points
    }
}

/// All selected samples as relative-intensity lines on shared axes.
pub struct OverlayChart {
    lines: Vec<LineData>,
    rt_range: (f64, f64),
}

impl OverlayChart {
    #[instrument(skip_all, fields(num_profiles = profiles.len()))]
    pub(crate) fn from_profiles(profiles: &[SampleProfile]) -> Self {
        let lines = profiles
            .iter()
            .enumerate()
            .map(|(i, profile)| {
                let points = profile
                    .histogram
                    .bins
                    .iter()
                    .map(|bin| PlotPoint::new(bin.center, bin.relative_intensity))
                    .collect();
                LineData {
                    points,
                    name: profile.label.clone(),
                    stroke: egui::Stroke::new(2.0, get_series_color(i)),
                }
            })
            .collect();

        let rt_range = profiles
            .iter()
            .flat_map(|p| p.histogram.edges.iter().copied())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
                (lo.min(x), hi.max(x))
            });

        Self { lines, rt_range }
    }

    pub fn lines(&self) -> &[LineData] {
        &self.lines
    }

    pub fn rt_range(&self) -> (f64, f64) {
        self.rt_range
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

pub struct PieSlice {
    pub label: &'static str,
    pub value: f64,
    pub color: egui::Color32,
}

/// Composition of one sample over the fixed retention-time buckets.
///
/// Slices keep bucket order; they are never sorted by value.
pub struct PieChart {
    title: String,
    slices: Vec<PieSlice>,
}

impl PieChart {
    pub(crate) fn from_buckets(title: String, buckets: &CompositionBuckets) -> Self {
        let slices = PIE_LABELS
            .iter()
            .zip(buckets.sums().iter())
            .enumerate()
            .map(|(i, (&label, &value))| PieSlice {
                label,
                value,
                color: get_series_color(i),
            })
            .collect();
        Self { title, slices }
    }

    pub(crate) fn from_profile(profile: &SampleProfile) -> Self {
        Self::from_buckets(profile.label.clone(), &profile.composition)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn slices(&self) -> &[PieSlice] {
        &self.slices
    }

    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Start and sweep angles (radians, clockwise from 12 o'clock) of each slice.
    pub fn slice_angles(&self) -> Vec<(f32, f32)> {
        let total = self.total();
        let mut start = -PI / 2.0;
        self.slices
            .iter()
            .map(|slice| {
                let sweep = if total > 0.0 {
                    (slice.value / total) as f32 * 2.0 * PI
                } else {
                    0.0
                };
                let out = (start, sweep);
                start += sweep;
                out
            })
            .collect()
    }
}

/// Renders the overlay chart using egui_plot
pub fn render_overlay_chart(ui: &mut egui::Ui, chart: &OverlayChart) {
    ui.heading(OVERLAY_TITLE);
    ui.separator();

    let legend = Legend::default()
        .position(Corner::LeftTop)
        .background_alpha(LEGEND_BACKGROUND_ALPHA);

    let mut plot = Plot::new("overlay_chart")
        .legend(legend)
        .show_axes([true, true])
        .x_axis_label(OVERLAY_X_LABEL)
        .y_axis_label(OVERLAY_Y_LABEL)
        .include_y(0.0);
    let (rt_min, rt_max) = chart.rt_range();
    if rt_min.is_finite() && rt_max.is_finite() {
        plot = plot.include_x(rt_min).include_x(rt_max);
    }

    plot.show(ui, |plot_ui| {
        for line in chart.lines() {
            plot_ui.line(line.to_plot_line());
        }
    });
}

/// Renders pie charts in rows of `PIE_GRID_COLUMNS`
pub fn render_pie_grid(ui: &mut egui::Ui, pies: &[PieChart]) {
    egui::Grid::new("composition_grid")
        .num_columns(PIE_GRID_COLUMNS)
        .spacing([8.0, 8.0])
        .show(ui, |ui| {
            for (i, pie) in pies.iter().enumerate() {
                render_pie_chart(ui, pie);
                if (i + 1) % PIE_GRID_COLUMNS == 0 {
                    ui.end_row();
                }
            }
        });
}

/// Draws one donut chart with its title and legend into a square cell
pub fn render_pie_chart(ui: &mut egui::Ui, pie: &PieChart) -> egui::Response {
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(PIE_SIZE, PIE_SIZE), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let text_color = ui.visuals().text_color();

    painter.text(
        egui::pos2(rect.left() + 10.0, rect.top() + 4.0),
        egui::Align2::LEFT_TOP,
        pie.title(),
        egui::FontId::proportional(12.0),
        text_color,
    );

    let radius = 78.0;
    let inner_radius = radius * PIE_HOLE;
    let center = egui::pos2(rect.left() + 10.0 + radius, rect.top() + 30.0 + radius);

    let total = pie.total();
    if total <= 0.0 {
        painter.circle_stroke(center, radius, egui::Stroke::new(1.0, egui::Color32::GRAY));
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            "no signal",
            egui::FontId::proportional(11.0),
            egui::Color32::GRAY,
        );
    } else {
        for (slice, (start, sweep)) in pie.slices().iter().zip(pie.slice_angles()) {
            if sweep <= 0.0 {
                continue;
            }
            paint_donut_segment(&painter, center, inner_radius, radius, start, sweep, slice.color);

            let fraction = slice.value / total;
            if fraction >= 0.05 {
                let mid = start + sweep / 2.0;
                let label_radius = (inner_radius + radius) / 2.0;
                painter.text(
                    egui::pos2(
                        center.x + label_radius * mid.cos(),
                        center.y + label_radius * mid.sin(),
                    ),
                    egui::Align2::CENTER_CENTER,
                    format!("{:.1}%", fraction * 100.0),
                    egui::FontId::proportional(9.0),
                    egui::Color32::WHITE,
                );
            }
        }
    }

    let legend_x = center.x + radius + 14.0;
    for (i, slice) in pie.slices().iter().enumerate() {
        let y = rect.top() + 40.0 + i as f32 * 16.0;
        painter.rect_filled(
            egui::Rect::from_min_size(egui::pos2(legend_x, y), egui::vec2(9.0, 9.0)),
            1.0,
            slice.color,
        );
        painter.text(
            egui::pos2(legend_x + 13.0, y - 1.0),
            egui::Align2::LEFT_TOP,
            slice.label,
            egui::FontId::proportional(9.5),
            text_color,
        );
    }

    response.on_hover_text(
        pie.slices()
            .iter()
            .map(|s| format!("{}: {:.1}", s.label, s.value))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

fn paint_donut_segment(
    painter: &egui::Painter,
    center: egui::Pos2,
    inner_radius: f32,
    outer_radius: f32,
    start: f32,
    sweep: f32,
    color: egui::Color32,
) {
    let at = |r: f32, angle: f32| {
        egui::pos2(center.x + r * angle.cos(), center.y + r * angle.sin())
    };
    let steps = ((sweep * 30.0) as usize).max(4);
    for step in 0..steps {
        let a1 = start + sweep * (step as f32 / steps as f32);
        let a2 = start + sweep * ((step + 1) as f32 / steps as f32);
        painter.add(egui::Shape::convex_polygon(
            vec![
                at(outer_radius, a1),
                at(outer_radius, a2),
                at(inner_radius, a2),
                at(inner_radius, a1),
            ],
            color,
            egui::Stroke::NONE,
        ));
    }
}

/// Get a color for a series or bucket
fn get_series_color(index: usize) -> egui::Color32 {
    let colors = [
        egui::Color32::from_rgb(99, 110, 250),  // Blue
        egui::Color32::from_rgb(239, 85, 59),   // Red
        egui::Color32::from_rgb(0, 204, 150),   // Green
        egui::Color32::from_rgb(171, 99, 250),  // Purple
        egui::Color32::from_rgb(255, 161, 90),  // Orange
        egui::Color32::from_rgb(25, 211, 243),  // Cyan
        egui::Color32::from_rgb(255, 102, 146), // Pink
        egui::Color32::from_rgb(182, 232, 128), // Light Green
        egui::Color32::from_rgb(255, 151, 255), // Magenta
        egui::Color32::from_rgb(254, 203, 82),  // Yellow
    ];
    colors[index % colors.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodrepo::{
        PeakPoint,
        composition_buckets,
        merge_histogram,
    };

    fn profile(id: &str, pairs: &[(f64, f64)]) -> SampleProfile {
        let peaks: Vec<PeakPoint> = pairs
            .iter()
            .map(|&(rt, i)| PeakPoint::try_new(rt, i).unwrap())
            .collect();
        SampleProfile {
            sample_id: id.to_string(),
            label: format!("Sample {} (ID: {})", id, id),
            histogram: merge_histogram(&peaks, 0.5).unwrap(),
            composition: composition_buckets(&peaks),
        }
    }

    #[test]
    fn test_overlay_has_one_line_per_profile() {
        let profiles = vec![
            profile("A", &[(1.0, 1.0), (2.0, 3.0)]),
            profile("B", &[(0.5, 2.0), (4.0, 2.0)]),
        ];
        let chart = OverlayChart::from_profiles(&profiles);
        assert_eq!(chart.lines().len(), 2);
        assert_eq!(chart.lines()[1].name(), "Sample B (ID: B)");
        assert_eq!(chart.lines()[0].points().len(), profiles[0].histogram.num_bins());
        assert_eq!(chart.rt_range(), (0.5, 4.0));
    }

    #[test]
    fn test_pie_keeps_fixed_label_order() {
        // Largest bucket last, still drawn last.
        let buckets = CompositionBuckets::from_sums([1.0, 0.0, 2.0, 0.0, 10.0]);
        let pie = PieChart::from_buckets("t".into(), &buckets);
        let labels: Vec<&str> = pie.slices().iter().map(|s| s.label).collect();
        assert_eq!(labels, PIE_LABELS.to_vec());
        assert_eq!(pie.slices()[4].value, 10.0);
    }

    #[test]
    fn test_pie_angles_are_clockwise_from_top() {
        let buckets = CompositionBuckets::from_sums([1.0, 1.0, 0.0, 0.0, 2.0]);
        let pie = PieChart::from_buckets("t".into(), &buckets);
        let angles = pie.slice_angles();
        assert!((angles[0].0 + PI / 2.0).abs() < 1e-6);
        assert!((angles[0].1 - PI / 2.0).abs() < 1e-6);
        assert!((angles[1].0 - 0.0).abs() < 1e-6);
        assert_eq!(angles[2].1, 0.0);
        let swept: f32 = angles.iter().map(|(_, s)| s).sum();
        assert!((swept - 2.0 * PI).abs() < 1e-5);
    }

    #[test]
    fn test_zero_total_pie_has_no_sweep() {
        let pie = PieChart::from_buckets("t".into(), &CompositionBuckets::default());
        assert_eq!(pie.total(), 0.0);
        assert!(pie.slice_angles().iter().all(|(_, sweep)| *sweep == 0.0));
        assert_eq!(pie.slices().len(), 5);
    }

    #[test]
    fn test_pie_title_is_series_label() {
        let p = profile("C", &[(25.0, 4.0)]);
        let pie = PieChart::from_profile(&p);
        assert_eq!(pie.title(), "Sample C (ID: C)");
        assert_eq!(pie.slices()[1].value, 4.0);
    }
}
