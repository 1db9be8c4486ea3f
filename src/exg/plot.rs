use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use ndarray::Array2;
use plotters::prelude::*;
use crate::exg::protocol::SessionProtocol;
use crate::exg::start::{StartCorrection, StartSearch};
use crate::exg::ExgError;
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub palette: Vec<RGBColor>,
    /// Draw captions, axis labels, legends and action names.
    pub annotate: bool,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            background: RGBColor(10, 10, 10),
            palette: vec![BLUE, RED, GREEN, CYAN, MAGENTA, YELLOW, WHITE],
            annotate: true,
        }
    }
}
const CLOCK_Y_RANGE: (f64, f64) = (-0.1, 1.1);
/// Clock signal, slope trace and detected start over the search window.
pub fn render_start_search_png(
    timestamps: &[f64],
    search: &StartSearch,
    correction: &StartCorrection,
    style: &PlotStyle,
) -> Result<Vec<u8>, ExgError> {
    let fs = search.sample_rate_hz;
    let (first, last) = search.window.sample_bounds(fs);
    if last > timestamps.len() || first >= last {
        return Err(ExgError::WindowOutOfRange {
            first,
            last,
            len: timestamps.len(),
        });
    }
    let (y_lo, y_hi) = CLOCK_Y_RANGE;
    let clamp = |v: f64| v.clamp(y_lo, y_hi);
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let mut builder = ChartBuilder::on(&root);
        builder.margin(10);
        if style.annotate {
            builder
                .caption("Start correction", ("sans-serif", 20).into_font().color(&WHITE))
                .set_label_area_size(LabelAreaPosition::Left, 45)
                .set_label_area_size(LabelAreaPosition::Bottom, 40);
        }
        let mut chart = builder
            .build_cartesian_2d(search.window.start_secs..search.window.end_secs, y_lo..y_hi)?;
        if style.annotate {
            chart
                .configure_mesh()
                .light_line_style(&WHITE.mix(0.1))
                .x_desc("time (s)")
                .draw()?;
        }
        let clock_color = pick_color(&style.palette, 0);
        let slope_color = pick_color(&style.palette, 2);
        let clock = (first..last).map(|n| (n as f64 / fs, clamp(timestamps[n])));
        chart
            .draw_series(LineSeries::new(clock, &clock_color))?
            .label("time index")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &clock_color));
        let slopes = correction
            .slopes
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_finite())
            .map(|(i, s)| ((correction.first_sample + i) as f64 / fs, clamp(*s)));
        chart
            .draw_series(LineSeries::new(slopes, &slope_color))?
            .label("gradient")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &slope_color));
        let mark = correction.mark_seconds(fs);
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(mark, 0.0), (mark, y_hi)],
                &RED,
            )))?
            .label("start index found")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));
        if style.annotate {
            chart
                .configure_series_labels()
                .border_style(&WHITE.mix(0.2))
                .background_style(&style.background)
                .draw()?;
        }
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
/// One PNG per requested channel row with a red line at every movement boundary.
pub fn render_session_markers_png(
    channels: &Array2<f64>,
    protocol: &SessionProtocol,
    session: &str,
    time_start: f64,
    rows: &[usize],
    sample_rate_hz: f64,
    style: &PlotStyle,
) -> Result<Vec<Vec<u8>>, ExgError> {
    if sample_rate_hz <= 0.0 || !sample_rate_hz.is_finite() {
        return Err(ExgError::InvalidSampleRate(sample_rate_hz));
    }
    let markers = protocol.marker_times(session, time_start)?;
    let actions = &protocol.session(session)?.actions;
    let samples = channels.ncols();
    if samples == 0 {
        return Err(ExgError::Plot("channel array has no samples".into()));
    }
    let duration = samples as f64 / sample_rate_hz;
    let x_end = markers.iter().copied().fold(duration, f64::max);
    let mut images = Vec::with_capacity(rows.len());
    for &row in rows {
        if row >= channels.nrows() {
            return Err(ExgError::ChannelRowOutOfRange {
                row,
                rows: channels.nrows(),
            });
        }
        let signal = channels.row(row);
        let lo = signal.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = signal.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let (y_lo, y_hi) = if (hi - lo).abs() < f64::EPSILON {
            (lo - 1.0, hi + 1.0)
        } else {
            (lo, hi)
        };
        let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
                .into_drawing_area();
            root.fill(&style.background)?;
            let mut builder = ChartBuilder::on(&root);
            builder.margin(10);
            if style.annotate {
                builder
                    .caption(
                        format!("{session} / channel {row}"),
                        ("sans-serif", 20).into_font().color(&WHITE),
                    )
                    .set_label_area_size(LabelAreaPosition::Left, 60)
                    .set_label_area_size(LabelAreaPosition::Bottom, 40);
            }
            let mut chart = builder.build_cartesian_2d(0f64..x_end, y_lo..y_hi)?;
            if style.annotate {
                chart
                    .configure_mesh()
                    .light_line_style(&WHITE.mix(0.1))
                    .x_desc("time (s)")
                    .draw()?;
            }
            let color = pick_color(&style.palette, row);
            let series = signal
                .iter()
                .enumerate()
                .map(|(n, v)| (n as f64 / sample_rate_hz, *v));
            chart.draw_series(LineSeries::new(series, &color))?;
            chart.draw_series(
                markers
                    .iter()
                    .map(|&t| PathElement::new(vec![(t, y_lo), (t, y_hi)], &RED)),
            )?;
            if style.annotate {
                let font = ("sans-serif", 14).into_font().color(&WHITE);
                chart.draw_series(
                    markers
                        .windows(2)
                        .zip(actions)
                        .map(|(span, action)| {
                            Text::new(action.clone(), (span[0], y_hi), font.clone())
                        }),
                )?;
            }
            root.present()?;
        }
        images.push(encode_png(&buffer, style.width, style.height)?);
    }
    Ok(images)
}
fn pick_color(palette: &[RGBColor], index: usize) -> RGBColor {
    if palette.is_empty() {
        WHITE
    } else {
        palette[index % palette.len()]
    }
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ExgError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| ExgError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
