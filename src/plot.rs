//! Line and surface figures rendered to image files.
//!
//! Figures are drawn with [plotters](https://docs.rs/plotters). The backend is picked from the
//! file extension: `.svg` is written as SVG, anything else as PNG. Text is laid out with the
//! bundled DejaVu Sans, so no system fonts are needed.
use std::ops::Range;
use std::path::Path;
use std::sync::OnceLock;

use log::info;
use ndarray::Array2;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontStyle;

/// Size of rendered figures in pixels.
pub const SIZE: (u32, u32) = (800, 600);

const FONT: &str = "sans-serif";

static FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Register the bundled font as [FONT], once per process.
fn register_font() -> anyhow::Result<()> {
    static REGISTERED: OnceLock<Result<(), String>> = OnceLock::new();

    REGISTERED
        .get_or_init(|| {
            plotters::style::register_font(FONT, FontStyle::Normal, FONT_DATA)
                .map_err(|e| format!("bundled font is invalid: {e:?}"))
        })
        .clone()
        .map_err(|e| anyhow!(e))
}

/// Axis label as `"{long_name}  [{units}]"`.
pub fn label(long_name: &str, units: &str) -> String {
    format!("{long_name}  [{units}]")
}

/// A figure that can be drawn on any plotters backend.
pub trait Figure {
    fn draw<DB>(&self, root: &DrawingArea<DB, Shift>) -> anyhow::Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static;

    /// Render to `path`.
    fn render(&self, path: &Path) -> anyhow::Result<()> {
        info!("rendering {}", path.display());
        register_font()?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("svg") => {
                let root = SVGBackend::new(path, SIZE).into_drawing_area();
                self.draw(&root)?;
                root.present()?;
            }
            _ => {
                let root = BitMapBackend::new(path, SIZE).into_drawing_area();
                self.draw(&root)?;
                root.present()?;
            }
        }

        Ok(())
    }
}

/// Padded range covering the finite `values`.
fn bounds(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if lo > hi {
        0.0..1.0
    } else if lo == hi {
        (lo - 1.0)..(hi + 1.0)
    } else {
        let pad = (hi - lo) * 0.05;
        (lo - pad)..(hi + pad)
    }
}

#[derive(Debug, Clone)]
pub struct Series {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: RGBColor,
}

impl Series {
    pub fn new(x: Vec<f64>, y: Vec<f64>, color: RGBColor) -> Series {
        Series { x, y, color }
    }
}

/// One or more lines in a single chart.
#[derive(Debug, Clone)]
pub struct LinePlot {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    pub grid: bool,
}

impl Figure for LinePlot {
    fn draw<DB>(&self, root: &DrawingArea<DB, Shift>) -> anyhow::Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        for s in &self.series {
            ensure!(
                s.x.len() == s.y.len(),
                "series has {} x values, but {} y values",
                s.x.len(),
                s.y.len()
            );
        }

        root.fill(&WHITE)?;

        let xr = bounds(self.series.iter().flat_map(|s| s.x.iter().copied()));
        let yr = bounds(self.series.iter().flat_map(|s| s.y.iter().copied()));

        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, (FONT, 24))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(xr, yr)?;

        let mut mesh = chart.configure_mesh();
        mesh.x_desc(&self.x_label).y_desc(&self.y_label);
        if !self.grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;

        for s in &self.series {
            chart.draw_series(LineSeries::new(
                s.x.iter().copied().zip(s.y.iter().copied()),
                &s.color,
            ))?;
        }

        Ok(())
    }
}

/// `z[(iy, ix)]` over the grid `x × y`, coloured from blue (low) to red (high).
#[derive(Debug, Clone)]
pub struct SurfacePlot {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub z_label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Array2<f64>,
}

impl SurfacePlot {
    fn at(&self, x: f64, y: f64) -> f64 {
        let ix = self.x.iter().position(|v| v.to_bits() == x.to_bits());
        let iy = self.y.iter().position(|v| v.to_bits() == y.to_bits());

        match (ix, iy) {
            (Some(ix), Some(iy)) => self.z[(iy, ix)],
            _ => f64::NAN,
        }
    }
}

impl Figure for SurfacePlot {
    fn draw<DB>(&self, root: &DrawingArea<DB, Shift>) -> anyhow::Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        ensure!(
            self.z.dim() == (self.y.len(), self.x.len()),
            "surface is {:?}, but the grid is {}×{}",
            self.z.dim(),
            self.y.len(),
            self.x.len()
        );

        root.fill(&WHITE)?;

        let zr = bounds(self.z.iter().copied());
        let (lo, span) = (zr.start, zr.end - zr.start);

        // plotters draws y upwards, the surface value goes there.
        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, (FONT, 24))
            .margin(20)
            .build_cartesian_3d(
                bounds(self.x.iter().copied()),
                zr,
                bounds(self.y.iter().copied()),
            )?;

        chart.with_projection(|mut pb| {
            pb.yaw = 0.6;
            pb.pitch = 0.4;
            pb.scale = 0.8;
            pb.into_matrix()
        });

        chart.configure_axes().draw()?;

        chart.draw_series(
            SurfaceSeries::xoz(
                self.x.iter().copied(),
                self.y.iter().copied(),
                |x, y| self.at(x, y),
            )
            .style_func(&|&v| {
                let t = ((v - lo) / span).clamp(0.0, 1.0);
                HSLColor(240.0 / 360.0 * (1.0 - t), 0.8, 0.5).filled()
            }),
        )?;

        let (_, h) = root.dim_in_pixel();
        for (i, l) in [
            format!("x: {}", self.x_label),
            format!("y: {}", self.y_label),
            format!("z: {}", self.z_label),
        ]
        .into_iter()
        .enumerate()
        {
            root.draw(&Text::new(l, (10, h as i32 - 70 + 20 * i as i32), (FONT, 14)))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn label_has_two_spaces() {
        assert_eq!(label("Pressure head", "m"), "Pressure head  [m]");
    }

    #[test]
    fn bounds_pad() {
        assert_eq!(bounds([0.0, 10.0].into_iter()), -0.5..10.5);
        assert_eq!(bounds([2.0, 2.0].into_iter()), 1.0..3.0);
        assert_eq!(bounds(std::iter::empty()), 0.0..1.0);

        let r = bounds([f64::NAN, 1.0, 3.0].into_iter());
        assert!(r.start < 1.0 && r.start > 0.8);
        assert!(r.end > 3.0 && r.end < 3.2);
    }

    #[test]
    fn surface_lookup() {
        let s = SurfacePlot {
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            z_label: String::new(),
            x: vec![-25.0, -20.0, -15.0],
            y: vec![-125.0, -120.0],
            z: arr2(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]),
        };

        assert_eq!(s.at(-20.0, -125.0), 2.0);
        assert_eq!(s.at(-15.0, -120.0), 6.0);
        assert!(s.at(0.0, -120.0).is_nan());
    }

    #[test]
    fn render_line_svg() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("line.svg");

        let plot = LinePlot {
            title: "SWRC".into(),
            x_label: label("Pressure head", "m"),
            y_label: label("Water content", "-"),
            series: vec![Series::new(vec![-1.0, 0.0], vec![0.1, 0.3], BLUE)],
            grid: true,
        };
        plot.render(&p).unwrap();

        let svg = std::fs::read_to_string(&p).unwrap();
        assert!(svg.contains("Pressure head  [m]"));
    }

    #[test]
    fn render_surface_svg() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("surface.svg");

        let plot = SurfacePlot {
            title: "Surface pressure".into(),
            x_label: "latitude".into(),
            y_label: "longitude".into(),
            z_label: label("Surface pressure", "hPa"),
            x: vec![-25.0, -20.0, -15.0],
            y: vec![-125.0, -120.0],
            z: arr2(&[[900.0, 910.0, 920.0], [930.0, 940.0, 950.0]]),
        };
        plot.render(&p).unwrap();

        let svg = std::fs::read_to_string(&p).unwrap();
        assert!(svg.contains("Surface pressure"));
        assert!(svg.contains("z: Surface pressure  [hPa]"));
    }

    #[test]
    fn render_line_png() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("line.png");

        let plot = LinePlot {
            title: "1991-10-30 01:00".into(),
            x_label: label("Hydraulic head", "m"),
            y_label: label("Soil depth", "m"),
            series: vec![Series::new(vec![1.0, 2.0, 3.0], vec![0.0, -1.0, -2.0], RED)],
            grid: true,
        };
        plot.render(&p).unwrap();

        let png = std::fs::read(&p).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn mismatched_series() {
        let dir = tempfile::tempdir().unwrap();
        let plot = LinePlot {
            title: "bad".into(),
            x_label: String::new(),
            y_label: String::new(),
            series: vec![Series::new(vec![0.0, 1.0], vec![0.0], RED)],
            grid: false,
        };

        assert!(plot.render(&dir.path().join("bad.svg")).is_err());
    }
}
