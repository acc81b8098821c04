//! The comparison chart: elapsed time over delay percentage, one line per
//! process count and mode.

use errors::*;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use series::TimingSeries;
use setting::{ChartSetting, Setting};
use std::f64;
use std::fmt::Display;
use std::ops::Range;
use std::path::Path;
use style::{Dash, LineStyle, line_style};

// Font sizes in pixels; 10 pt at 300 DPI is about 42 px.
const TITLE_SIZE: u32 = 50;
const LABEL_SIZE: u32 = 42;
const TICK_SIZE: u32 = 36;
const LEGEND_SIZE: u32 = 40;

const MARGIN: u32 = 30;
const LABEL_AREA: u32 = 150;
const AXIS_MARGIN: f64 = 0.05;

const DASH_LENGTH: u32 = 30;
const DASH_GAP: u32 = 15;

const LEGEND_SAMPLE: i32 = 80;
const LEGEND_PAD: i32 = 20;
const LEGEND_ROW: i32 = 60;

/// One line of the chart, ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLine {
    /// Legend text.
    pub label: String,

    /// (percentage, time) points in series order.
    pub points: Vec<(f64, f64)>,

    /// Colour, dash and width.
    pub style: LineStyle,
}

/// Turns the series into chart lines. Keys are ordered by process count,
/// keys without samples are left out, and the style index counts the lines
/// actually drawn.
pub fn layout(times: &TimingSeries, setting: &Setting) -> Vec<ChartLine> {
    times
        .keys_by_procs()
        .into_iter()
        .filter_map(|key| match times.get(key) {
            Some(samples) if !samples.is_empty() => Some((key, samples)),
            _ => None,
        })
        .enumerate()
        .map(|(i, (key, samples))| {
            let balanced = setting.is_balanced(&key.mode);
            let suffix = if balanced {
                &setting.chart.balanced_suffix
            } else {
                &setting.chart.plain_suffix
            };
            ChartLine {
                label: format!("{}{}", key.procs, suffix),
                points: samples.iter().map(|s| (s.percent, s.time)).collect(),
                style: line_style(balanced, i),
            }
        })
        .collect()
}

/// Data range widened by 5% on both sides.
fn padded_range<I: Iterator<Item = f64>>(values: I) -> Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    if lo > hi {
        return 0.0..1.0;
    }
    if lo == hi {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * AXIS_MARGIN };
        return (lo - pad)..(hi + pad);
    }

    let pad = (hi - lo) * AXIS_MARGIN;
    (lo - pad)..(hi + pad)
}

/// Legend panel width: sample stroke, paddings and the longest label.
fn legend_width(lines: &[ChartLine]) -> u32 {
    let longest = lines
        .iter()
        .map(|l| l.label.chars().count())
        .max()
        .unwrap_or(0) as u32;
    (LEGEND_SAMPLE + 4 * LEGEND_PAD) as u32 + longest * LEGEND_SIZE * 6 / 10
}

fn render_err<E: Display>(e: E) -> Error {
    ErrorKind::Render(e.to_string()).into()
}

/// Draws the chart as PNG. The plot area is `chart.width` by `chart.height`
/// pixels; the legend sits right of it, vertically centred.
pub fn render<P: AsRef<Path>>(lines: &[ChartLine], chart: &ChartSetting, path: P) -> Result<()> {
    let legend = legend_width(lines);
    let root = BitMapBackend::new(path.as_ref(), (chart.width + legend, chart.height))
        .into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let (plot_area, legend_area) = root.split_horizontally(chart.width);

    let font = chart.font.as_str();
    let x_range = padded_range(lines.iter().flat_map(|l| l.points.iter().map(|p| p.0)));
    let y_range = padded_range(lines.iter().flat_map(|l| l.points.iter().map(|p| p.1)));
    debug!("chart ranges x {:?}, y {:?}", x_range, y_range);

    let mut cc = ChartBuilder::on(&plot_area)
        .caption(chart.title.as_str(), (font, TITLE_SIZE).into_font())
        .margin(MARGIN)
        .x_label_area_size(LABEL_AREA)
        .y_label_area_size(LABEL_AREA)
        .build_cartesian_2d(x_range, y_range)
        .map_err(render_err)?;

    cc.configure_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .axis_desc_style((font, LABEL_SIZE).into_font())
        .label_style((font, TICK_SIZE).into_font())
        .draw()
        .map_err(render_err)?;

    for line in lines {
        let stroke = line.style.color.stroke_width(line.style.width);
        match line.style.dash {
            Dash::Solid => {
                cc.draw_series(LineSeries::new(line.points.clone(), stroke))
                    .map_err(render_err)?;
            }
            Dash::Dashed => {
                cc.draw_series(DashedLineSeries::new(
                    line.points.clone().into_iter(),
                    DASH_LENGTH,
                    DASH_GAP,
                    stroke,
                )).map_err(render_err)?;
            }
        }
    }

    draw_legend(&legend_area, lines, font)?;
    root.present().map_err(render_err)?;
    info!("chart with {} lines written", lines.len());
    Ok(())
}

fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    lines: &[ChartLine],
    font: &str,
) -> Result<()> {
    if lines.is_empty() {
        return Ok(());
    }

    let (w, h) = area.dim_in_pixel();
    let rows = lines.len() as i32;
    let top = (h as i32 - rows * LEGEND_ROW) / 2;
    let bottom = top + rows * LEGEND_ROW;
    let frame = RGBColor(204, 204, 204).stroke_width(2);
    area.draw(&Rectangle::new(
        [
            (LEGEND_PAD / 2, top - LEGEND_PAD),
            (w as i32 - LEGEND_PAD / 2, bottom + LEGEND_PAD),
        ],
        frame,
    )).map_err(render_err)?;

    for (i, line) in lines.iter().enumerate() {
        let y = top + i as i32 * LEGEND_ROW + LEGEND_ROW / 2;
        let x0 = LEGEND_PAD * 2;
        let x1 = x0 + LEGEND_SAMPLE;
        let stroke = line.style.color.stroke_width(line.style.width);

        match line.style.dash {
            Dash::Solid => {
                area.draw(&PathElement::new(vec![(x0, y), (x1, y)], stroke))
                    .map_err(render_err)?;
            }
            Dash::Dashed => {
                let third = LEGEND_SAMPLE / 3;
                area.draw(&PathElement::new(vec![(x0, y), (x0 + third, y)], stroke))
                    .map_err(render_err)?;
                area.draw(&PathElement::new(vec![(x1 - third, y), (x1, y)], stroke))
                    .map_err(render_err)?;
            }
        }

        area.draw(&Text::new(
            line.label.clone(),
            (x1 + LEGEND_PAD, y - LEGEND_SIZE as i32 / 2),
            (font, LEGEND_SIZE).into_font(),
        )).map_err(render_err)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use series::{Key, Sample};
    use std::fs;
    use style::{Dash, PALETTE};
    use tempfile::TempDir;

    fn series() -> TimingSeries {
        let setting = Setting::default();
        let mut times = TimingSeries::from_setting(&setting);
        for &procs in &[128, 16] {
            for &(m, t) in &[(0.5, 10.0), (1.0, 12.0)] {
                times.push(Key::new(procs, "par"), Sample::new(t, m * 25.0)).unwrap();
                times.push(Key::new(procs, "parBal"), Sample::new(t - 1.0, m * 25.0)).unwrap();
            }
        }
        times
    }

    #[test]
    fn lines_follow_process_count() {
        let lines = layout(&series(), &Setting::default());
        let labels = lines.iter().map(|l| l.label.as_str()).collect::<Vec<_>>();
        assert_eq!(labels, vec!["16 bez vyv.", "16 s vyv.", "128 bez vyv.", "128 s vyv."]);
        assert_eq!(lines[0].points, vec![(12.5, 10.0), (25.0, 12.0)]);
    }

    #[test]
    fn styles_pair_up() {
        let lines = layout(&series(), &Setting::default());
        assert_eq!(lines[0].style.dash, Dash::Dashed);
        assert_eq!(lines[1].style.dash, Dash::Solid);
        assert_eq!(lines[0].style.color, PALETTE[0]);
        assert_eq!(lines[1].style.color, PALETTE[0]);
        assert_eq!(lines[2].style.color, PALETTE[1]);
        assert_eq!(lines[3].style.color, PALETTE[1]);
    }

    #[test]
    fn empty_series_are_not_drawn() {
        let setting = Setting::default();
        let times = TimingSeries::from_setting(&setting);
        assert!(layout(&times, &setting).is_empty());
    }

    #[test]
    fn ranges_are_padded() {
        let r = padded_range(vec![10.0, 20.0].into_iter());
        assert_eq!(r, 9.5..20.5);
        assert_eq!(padded_range(Vec::<f64>::new().into_iter()), 0.0..1.0);
        assert_eq!(padded_range(vec![0.0].into_iter()), -1.0..1.0);
        assert_eq!(padded_range(vec![20.0].into_iter()), 19.0..21.0);
    }

    #[test]
    fn legend_grows_with_labels() {
        let lines = layout(&series(), &Setting::default());
        assert!(legend_width(&lines) > legend_width(&lines[..1]));
        assert!(legend_width(&[]) > 0);
    }

    #[test]
    fn renders_a_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("batch.png");
        let setting = Setting::default();
        let lines = layout(&series(), &setting);

        if let Err(e) = render(&lines, &setting.chart, &path) {
            match *e.kind() {
                // no usable font for the labels on this machine
                ErrorKind::Render(ref reason) => {
                    eprintln!("chart not rendered: {}", reason);
                    return;
                }
                ref other => panic!("unexpected error {:?}", other),
            }
        }

        let png = fs::read(&path).unwrap();
        assert!(png.len() > 8);
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
