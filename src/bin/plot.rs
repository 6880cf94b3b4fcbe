use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use csv::ReaderBuilder;
use log::info;
use plotters::prelude::*;
use standard_atmosphere_analyzer::export::{performance, profile};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render atmosphere or performance line charts from exported CSV"
)]
struct Cli {
    #[arg(long)]
    input: PathBuf,
    #[arg(long, default_value = "artifacts/chart.png")]
    output: PathBuf,
    #[arg(long, value_enum, default_value_t = Chart::Atmosphere)]
    chart: Chart,
    #[arg(long, default_value_t = 1200)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Chart {
    /// Temperature, pressure and density against altitude (profile CSV)
    Atmosphere,
    /// L/D and required thrust against altitude (performance CSV)
    Altitude,
    /// Required thrust and L/D against velocity (performance CSV)
    Velocity,
}

/// One panel: `y` plotted against `x`, each column scaled before drawing.
struct Panel {
    caption: &'static str,
    x: (&'static str, f64, &'static str),
    y: (&'static str, f64, &'static str),
    color: RGBColor,
}

impl Chart {
    fn expected_columns(self) -> &'static [&'static str] {
        match self {
            Chart::Atmosphere => &profile::COLUMNS,
            Chart::Altitude | Chart::Velocity => &performance::COLUMNS,
        }
    }

    fn panels(self) -> Vec<Panel> {
        const BLUE_LINE: RGBColor = RGBColor(31, 119, 180);
        const ORANGE_LINE: RGBColor = RGBColor(255, 127, 14);
        const GREEN_LINE: RGBColor = RGBColor(44, 160, 44);
        match self {
            Chart::Atmosphere => vec![
                Panel {
                    caption: "Temperature",
                    x: ("temperature_c", 1.0, "Temperature (°C)"),
                    y: ("altitude_m", 1e-3, "Altitude (km)"),
                    color: BLUE_LINE,
                },
                Panel {
                    caption: "Pressure",
                    x: ("pressure_pa", 1e-3, "Pressure (kPa)"),
                    y: ("altitude_m", 1e-3, "Altitude (km)"),
                    color: ORANGE_LINE,
                },
                Panel {
                    caption: "Density",
                    x: ("density_kg_m3", 1.0, "Density (kg/m³)"),
                    y: ("altitude_m", 1e-3, "Altitude (km)"),
                    color: GREEN_LINE,
                },
            ],
            Chart::Altitude => vec![
                Panel {
                    caption: "Lift-to-drag ratio",
                    x: ("altitude_m", 1e-3, "Altitude (km)"),
                    y: ("lift_to_drag_ratio", 1.0, "L/D"),
                    color: BLUE_LINE,
                },
                Panel {
                    caption: "Required thrust",
                    x: ("altitude_m", 1e-3, "Altitude (km)"),
                    y: ("required_thrust_n", 1e-3, "Thrust (kN)"),
                    color: ORANGE_LINE,
                },
            ],
            Chart::Velocity => vec![
                Panel {
                    caption: "Required thrust",
                    x: ("velocity_m_s", 1.0, "Velocity (m/s)"),
                    y: ("required_thrust_n", 1e-3, "Thrust (kN)"),
                    color: ORANGE_LINE,
                },
                Panel {
                    caption: "Lift-to-drag ratio",
                    x: ("velocity_m_s", 1.0, "Velocity (m/s)"),
                    y: ("lift_to_drag_ratio", 1.0, "L/D"),
                    color: BLUE_LINE,
                },
            ],
        }
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let table = Table::read(&cli.input, cli.chart.expected_columns())?;
    if table.rows.is_empty() {
        anyhow::bail!("no data rows in {}", cli.input.display());
    }

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let root = BitMapBackend::new(&cli.output, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 22.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 15.0, FontStyle::Normal);

    let panels = cli.chart.panels();
    let areas = root.split_evenly((1, panels.len()));
    for (panel, area) in panels.iter().zip(areas.iter()) {
        let points = table.points(panel)?;
        let x_range = padded_range(points.iter().map(|p| p.0));
        let y_range = padded_range(points.iter().map(|p| p.1));

        let mut chart = ChartBuilder::on(area)
            .margin(15)
            .caption(panel.caption, caption_font.clone())
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, y_range.clone())?;
        chart
            .configure_mesh()
            .x_desc(panel.x.2)
            .y_desc(panel.y.2)
            .label_style(label_font.clone())
            .axis_desc_style(label_font.clone())
            .x_labels(6)
            .y_labels(8)
            .draw()?;
        chart.draw_series(LineSeries::new(
            points.iter().copied(),
            ShapeStyle::from(&panel.color).stroke_width(2),
        ))?;

        // stall speed of the first row marks the low-speed limit
        if cli.chart == Chart::Velocity {
            let stall = table.value(0, "stall_speed_m_s")?;
            if stall.is_finite() {
                chart.draw_series(std::iter::once(PathElement::new(
                    vec![(stall, y_range.start), (stall, y_range.end)],
                    ShapeStyle::from(&RED.mix(0.6)).stroke_width(1),
                )))?;
            }
        }
    }

    root.present()?;
    info!("wrote {}", cli.output.display());
    Ok(())
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

/// Numeric CSV rows keyed by the header names.
struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl Table {
    fn read(path: &Path, expected: &[&str]) -> anyhow::Result<Self> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        if let Some(missing) = expected
            .iter()
            .find(|column| !headers.iter().any(|h| h.eq_ignore_ascii_case(column)))
        {
            anyhow::bail!("CSV missing '{missing}' column");
        }
        let mut rows = Vec::new();
        for rec in rdr.records() {
            let r = rec?;
            rows.push(
                r.iter()
                    .map(|field| field.trim().parse().unwrap_or(f64::NAN))
                    .collect(),
            );
        }
        Ok(Self { headers, rows })
    }

    fn column(&self, name: &str) -> anyhow::Result<usize> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow::anyhow!("CSV missing '{name}' column"))
    }

    fn value(&self, row: usize, name: &str) -> anyhow::Result<f64> {
        let idx = self.column(name)?;
        Ok(self
            .rows
            .get(row)
            .and_then(|r| r.get(idx))
            .copied()
            .unwrap_or(f64::NAN))
    }

    /// Finite `(x, y)` pairs for a panel, already scaled.
    fn points(&self, panel: &Panel) -> anyhow::Result<Vec<(f64, f64)>> {
        let xi = self.column(panel.x.0)?;
        let yi = self.column(panel.y.0)?;
        let points: Vec<(f64, f64)> = self
            .rows
            .iter()
            .filter_map(|row| Some((*row.get(xi)? * panel.x.1, *row.get(yi)? * panel.y.1)))
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect();
        if points.is_empty() {
            anyhow::bail!("no finite values for {} against {}", panel.y.0, panel.x.0);
        }
        Ok(points)
    }
}

fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let span = max - min;
    let pad = if span.abs() < f64::EPSILON {
        min.abs().max(1.0) * 0.05
    } else {
        span * 0.05
    };
    (min - pad)..(max + pad)
}
