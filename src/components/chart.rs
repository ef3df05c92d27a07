//! Chart Component
//!
//! Price and volatility chart using HTML5 Canvas.

use chrono::NaiveDate;
use leptos::*;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::state::global::{relevant_events, Changepoint, DashboardState, MarketEvent, PricePoint};

/// Series and marker colors
const PRICE_COLOR: &str = "#8884d8";
const VOLATILITY_COLOR: &str = "#82ca9d";
const BAND_FILL: &str = "rgba(255, 0, 0, 0.1)";
const BAND_EDGE: &str = "rgba(255, 0, 0, 0.3)";
const BAND_LABEL: &str = "#d00";
const EVENT_COLOR: &str = "#22c55e";

/// Price/volatility chart component
#[component]
pub fn Chart() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();

    let price_data = state.price_data;
    let events = state.events;
    let changepoint = state.changepoint;
    let start_date = state.start_date;
    let end_date = state.end_date;

    // Redraw whenever fetched data or the filter changes
    create_effect(move |_| {
        let prices = price_data.get();
        let markers = relevant_events(&events.get(), start_date.get(), end_date.get());
        let changepoint = changepoint.get();

        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &prices, &markers, changepoint.as_ref());
        }
    });

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="900"
                height="500"
                class="w-full rounded-lg"
            />

            <ChartLegend />
            <EventList />
        </div>
    }
}

/// Chart legend showing series and marker colors
#[component]
fn ChartLegend() -> impl IntoView {
    let entries = [
        (PRICE_COLOR, "Price"),
        (VOLATILITY_COLOR, "Volatility"),
        ("rgba(255, 0, 0, 0.4)", "Changepoint window"),
        (EVENT_COLOR, "Events"),
    ];

    view! {
        <div class="flex justify-center flex-wrap gap-4 mt-4">
            {entries
                .into_iter()
                .map(|(color, label)| {
                    view! {
                        <div class="flex items-center space-x-2">
                            <div
                                class="w-3 h-3 rounded-full"
                                style=format!("background-color: {}", color)
                            />
                            <span class="text-sm text-gray-300">{label}</span>
                        </div>
                    }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}

/// Relevant events listed under the chart. Keyed by date plus text so
/// same-named events on different days stay distinct.
#[component]
fn EventList() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");

    let events = state.events;
    let start_date = state.start_date;
    let end_date = state.end_date;

    view! {
        <div class="mt-4 space-y-1">
            <For
                each=move || relevant_events(&events.get(), start_date.get(), end_date.get())
                key=|event| (event.event_date, event.description.clone())
                children=|event: MarketEvent| {
                    view! {
                        <div class="flex items-center space-x-2 text-sm text-gray-300">
                            <span class="w-2 h-2 bg-green-500 rounded-full" />
                            <span class="text-gray-400">{event.event_date.to_string()}</span>
                            <span>{event.description}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}

/// Draw the chart on canvas
fn draw_chart(
    canvas: &HtmlCanvasElement,
    prices: &[PricePoint],
    markers: &[MarketEvent],
    changepoint: Option<&Changepoint>,
) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    // Margins; the right margin holds the log-return axis
    let margin_left = 60.0;
    let margin_right = 60.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    // Clear canvas
    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    let Some((first_day, last_day)) = x_domain(prices) else {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No data for selected range", width / 2.0 - 80.0, height / 2.0);
        return;
    };

    let span_days = (last_day - first_day).num_days().max(1) as f64;
    let x_of =
        |date: NaiveDate| margin_left + ((date - first_day).num_days() as f64 / span_days) * chart_width;

    let (price_min, price_max) = padded_bounds(prices.iter().filter_map(|p| p.price));
    let (ret_min, ret_max) = padded_bounds(prices.iter().filter_map(|p| p.log_return));

    let y_left =
        |value: f64| margin_top + ((price_max - value) / (price_max - price_min)) * chart_height;
    let y_right =
        |value: f64| margin_top + ((ret_max - value) / (ret_max - ret_min)) * chart_height;

    let dash = js_sys::Array::of2(&JsValue::from_f64(3.0), &JsValue::from_f64(3.0));
    let solid = js_sys::Array::new();

    // Dashed grid with value labels on both axes
    let _ = ctx.set_line_dash(&dash);
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");

    for i in 0..=5 {
        let y = margin_top + (i as f64 / 5.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        let price = price_max - (i as f64 / 5.0) * (price_max - price_min);
        let _ = ctx.fill_text(&format!("{:.1}", price), 5.0, y + 4.0);

        let ret = ret_max - (i as f64 / 5.0) * (ret_max - ret_min);
        let _ = ctx.fill_text(&format!("{:.3}", ret), width - margin_right + 6.0, y + 4.0);
    }
    let _ = ctx.set_line_dash(&solid);

    // Axis titles
    ctx.set_fill_style(&"#9ca3af".into());
    draw_rotated_text(&ctx, "Price ($)", 14.0, margin_top + chart_height / 2.0 + 30.0);
    draw_rotated_text(&ctx, "Log Return", width - 8.0, margin_top + chart_height / 2.0 + 30.0);

    // Changepoint window behind the series
    if let Some(cp) = changepoint {
        let x1 = x_of(cp.start_date.clamp(first_day, last_day));
        let x2 = x_of(cp.end_date.clamp(first_day, last_day));

        if x2 > x1 {
            ctx.set_fill_style(&BAND_FILL.into());
            ctx.fill_rect(x1, margin_top, x2 - x1, chart_height);

            ctx.set_stroke_style(&BAND_EDGE.into());
            ctx.stroke_rect(x1, margin_top, x2 - x1, chart_height);

            ctx.set_fill_style(&BAND_LABEL.into());
            ctx.set_font("14px sans-serif");
            let _ = ctx.fill_text(&cp.description, x1 + 6.0, margin_top + 16.0);
        }
    }

    // Price series on the left axis
    ctx.set_line_width(2.0);
    ctx.set_stroke_style(&PRICE_COLOR.into());
    for run in segments(prices, |p| p.price) {
        stroke_polyline(&ctx, run.iter().map(|(date, value)| (x_of(*date), y_left(*value))));
    }

    // Log return on the right axis at reduced opacity, as the volatility proxy
    ctx.set_global_alpha(0.5);
    ctx.set_stroke_style(&VOLATILITY_COLOR.into());
    for run in segments(prices, |p| p.log_return) {
        stroke_polyline(&ctx, run.iter().map(|(date, value)| (x_of(*date), y_right(*value))));
    }
    ctx.set_global_alpha(1.0);

    // Event markers: dashed verticals with labels along the line
    let _ = ctx.set_line_dash(&dash);
    ctx.set_stroke_style(&EVENT_COLOR.into());
    ctx.set_line_width(1.0);

    for event in markers {
        if event.event_date < first_day || event.event_date > last_day {
            continue;
        }
        let x = x_of(event.event_date);

        ctx.begin_path();
        ctx.move_to(x, margin_top);
        ctx.line_to(x, margin_top + chart_height);
        ctx.stroke();

        ctx.set_fill_style(&"#d1d5db".into()); // gray-300
        ctx.set_font("10px sans-serif");
        draw_rotated_text(&ctx, &event.description, x - 4.0, margin_top + chart_height - 8.0);
    }
    let _ = ctx.set_line_dash(&solid);

    // X-axis date labels
    ctx.set_fill_style(&"#9ca3af".into());
    ctx.set_font("12px sans-serif");

    let num_labels = 5;
    for i in 0..=num_labels {
        let date = first_day + chrono::Duration::days(i * span_days as i64 / num_labels);
        let x = margin_left + (i as f64 / num_labels as f64) * chart_width;
        let _ = ctx.fill_text(&date.format("%Y-%m").to_string(), x - 20.0, height - 10.0);
    }
}

/// Text rotated 90 degrees counterclockwise around its anchor
fn draw_rotated_text(ctx: &CanvasRenderingContext2d, text: &str, x: f64, y: f64) {
    ctx.save();
    let _ = ctx.translate(x, y);
    let _ = ctx.rotate(-std::f64::consts::FRAC_PI_2);
    let _ = ctx.fill_text(text, 0.0, 0.0);
    ctx.restore();
}

fn stroke_polyline(ctx: &CanvasRenderingContext2d, points: impl Iterator<Item = (f64, f64)>) {
    ctx.begin_path();
    for (i, (x, y)) in points.enumerate() {
        if i == 0 {
            ctx.move_to(x, y);
        } else {
            ctx.line_to(x, y);
        }
    }
    ctx.stroke();
}

/// Date span covered by the series. The backend sends the series
/// chronologically sorted, so the ends are the first and last points.
fn x_domain(prices: &[PricePoint]) -> Option<(NaiveDate, NaiveDate)> {
    let first = prices.first()?.date;
    let last = prices.last()?.date;
    Some((first, last.max(first)))
}

/// Consecutive runs of present values. A null breaks the polyline
/// instead of interpolating across the missing trading day.
fn segments(
    prices: &[PricePoint],
    select: fn(&PricePoint) -> Option<f64>,
) -> Vec<Vec<(NaiveDate, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();

    for point in prices {
        match select(point) {
            Some(value) => current.push((point.date, value)),
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Min/max of a value stream, padded by 10% so lines stay off the frame
/// edges. Collapses to a unit band around a constant or empty series.
fn padded_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for value in values {
        min = min.min(value);
        max = max.max(value);
    }

    if !min.is_finite() || !max.is_finite() {
        return (-1.0, 1.0);
    }

    let range = max - min;
    let padding = if range > 0.0 { range * 0.1 } else { 1.0 };
    (min - padding, max + padding)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn point(d: NaiveDate, price: Option<f64>, log_return: Option<f64>) -> PricePoint {
        PricePoint { date: d, price, log_return }
    }

    #[test]
    fn domain_spans_first_to_last_point() {
        let prices = vec![
            point(date(2005, 1, 1), Some(50.0), Some(0.01)),
            point(date(2010, 12, 31), Some(90.0), Some(-0.01)),
        ];
        assert_eq!(x_domain(&prices), Some((date(2005, 1, 1), date(2010, 12, 31))));
        assert_eq!(x_domain(&[]), None);
    }

    #[test]
    fn nulls_split_the_polyline() {
        let prices = vec![
            point(date(2005, 1, 3), Some(50.0), None),
            point(date(2005, 1, 4), Some(51.0), None),
            point(date(2005, 1, 5), None, None),
            point(date(2005, 1, 6), Some(52.0), None),
        ];

        let runs = segments(&prices, |p| p.price);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len(), 2);
        assert_eq!(runs[1], vec![(date(2005, 1, 6), 52.0)]);
    }

    #[test]
    fn all_null_series_has_no_runs() {
        let prices = vec![point(date(2005, 1, 3), None, None)];
        assert!(segments(&prices, |p| p.price).is_empty());
    }

    #[test]
    fn bounds_are_padded_and_never_degenerate() {
        let (min, max) = padded_bounds([10.0, 20.0].into_iter());
        assert_eq!((min, max), (9.0, 21.0));

        let (min, max) = padded_bounds([5.0].into_iter());
        assert_eq!((min, max), (4.0, 6.0));

        let (min, max) = padded_bounds(std::iter::empty());
        assert_eq!((min, max), (-1.0, 1.0));
    }
}
