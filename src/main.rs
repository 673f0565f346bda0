use clap::{Parser, ValueEnum};
use quadhex_rs::{
    GeoPoint, GeometryFormat, QuadHexError, Quadrilateral, TilesToCsv, TilesToGeoParquet,
    TilingConfig, TilingJob, UtmZone, generate_tiling,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One row per tile with the circle outline as WKT
    Csv,
    /// FeatureCollection of tile centers
    Geojson,
    /// MULTIPOINT of tile centers
    Wkt,
    /// GeoParquet with point geometry
    Parquet,
}

impl OutputFormat {
    fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "geojson" | "json" => Some(Self::Geojson),
            "wkt" | "txt" => Some(Self::Wkt),
            "parquet" | "geoparquet" => Some(Self::Parquet),
            _ => None,
        }
    }
}

#[derive(Parser)]
#[command(name = "quadhex")]
#[command(about = "Tile a quadrilateral with hexagonally packed circles", long_about = None)]
struct Args {
    /// JSON job file with the quadrilateral and config (overrides corner flags)
    #[arg(long)]
    job: Option<PathBuf>,

    /// Top-left corner as LAT,LON
    #[arg(long, value_parser = parse_geo_point, required_unless_present = "job")]
    top_left: Option<GeoPoint>,

    /// Top-right corner as LAT,LON
    #[arg(long, value_parser = parse_geo_point, required_unless_present = "job")]
    top_right: Option<GeoPoint>,

    /// Bottom-left corner as LAT,LON
    #[arg(long, value_parser = parse_geo_point, required_unless_present = "job")]
    bot_left: Option<GeoPoint>,

    /// Bottom-right corner as LAT,LON
    #[arg(long, value_parser = parse_geo_point, required_unless_present = "job")]
    bot_right: Option<GeoPoint>,

    /// Circle diameter in meters
    #[arg(long, required_unless_present = "job")]
    diameter: Option<f64>,

    /// Pin the UTM zone (e.g. 17N) instead of deriving it from the corners
    #[arg(long)]
    utm_zone: Option<UtmZone>,

    /// Output file path
    #[arg(long)]
    output: PathBuf,

    /// Output format (auto-detected from file extension if not specified)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

fn parse_geo_point(s: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got '{}'", s))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lon))?;
    Ok(GeoPoint::new(lat, lon))
}

fn job_from_args(args: &Args) -> Result<TilingJob, QuadHexError> {
    let mut job = match &args.job {
        Some(path) => TilingJob::from_json_file(path)?,
        None => {
            let missing = || QuadHexError::InvalidConfig("missing corner or diameter".to_string());
            TilingJob {
                quadrilateral: Quadrilateral::new(
                    args.top_left.ok_or_else(missing)?,
                    args.top_right.ok_or_else(missing)?,
                    args.bot_left.ok_or_else(missing)?,
                    args.bot_right.ok_or_else(missing)?,
                ),
                config: TilingConfig::new(args.diameter.ok_or_else(missing)?),
            }
        }
    };

    if let Some(zone) = args.utm_zone {
        job.config = job.config.utm_zone(zone);
    }
    Ok(job)
}

fn run(args: &Args) -> Result<(), QuadHexError> {
    let format = args
        .format
        .or_else(|| OutputFormat::from_extension(&args.output))
        .ok_or_else(|| {
            QuadHexError::InvalidConfig(format!(
                "cannot infer output format from '{}', pass --format",
                args.output.display()
            ))
        })?;

    let job = job_from_args(args)?;
    let tiles = generate_tiling(&job.quadrilateral, &job.config)?;

    match format {
        OutputFormat::Csv => tiles.to_csv(&args.output, Some(GeometryFormat::Wkt))?,
        OutputFormat::Geojson => tiles.write_geojson(&args.output)?,
        OutputFormat::Wkt => tiles.write_wkt(&args.output)?,
        OutputFormat::Parquet => tiles.to_geoparquet(&args.output)?,
    }

    tracing::info!(
        tiles = tiles.len(),
        zone = %tiles.zone(),
        output = %args.output.display(),
        "wrote tiling"
    );
    Ok(())
}

fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_geo_point() {
        assert_eq!(
            parse_geo_point("43.72, -79.42"),
            Ok(GeoPoint::new(43.72, -79.42))
        );
        assert!(parse_geo_point("43.72").is_err());
        assert!(parse_geo_point("north,-79.42").is_err());
    }

    #[test]
    fn test_format_from_extension() {
        assert!(matches!(
            OutputFormat::from_extension(Path::new("out.CSV")),
            Some(OutputFormat::Csv)
        ));
        assert!(matches!(
            OutputFormat::from_extension(Path::new("out.geojson")),
            Some(OutputFormat::Geojson)
        ));
        assert!(OutputFormat::from_extension(Path::new("out")).is_none());
    }

    #[test]
    fn test_args_from_corner_flags() -> Result<(), QuadHexError> {
        let args = Args::parse_from([
            "quadhex",
            "--top-left",
            "43.72,-79.42",
            "--top-right",
            "43.72,-79.38",
            "--bot-left",
            "43.70,-79.42",
            "--bot-right",
            "43.70,-79.38",
            "--diameter",
            "300",
            "--utm-zone",
            "17N",
            "--output",
            "tiles.csv",
        ]);
        let job = job_from_args(&args)?;
        assert_eq!(job.config.circle_diameter, 300.0);
        assert_eq!(job.config.utm_zone, Some("17N".parse()?));
        assert_eq!(job.quadrilateral.bot_right, GeoPoint::new(43.70, -79.38));
        Ok(())
    }

    #[test]
    fn test_args_require_corners_without_job() {
        let result = Args::try_parse_from(["quadhex", "--output", "tiles.csv"]);
        assert!(result.is_err());
    }
}
