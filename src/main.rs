use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use genmandel::{
    Algebra, AxisOrdering, Frame, Norm, Properties, RunConfig, Slicer, ValidatedRun, audit,
    catalog_sequences, classical, lattice,
};

#[derive(Parser)]
#[command(name = "genmandel")]
#[command(version, about = "Escape-time fractals over 2D, 3D and 4D algebras")]
struct Cli {
    /// JSON run config; flags given on the command line override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List algebras, norms and orderings
    Catalog,

    /// Escape counts over a plane
    Plane {
        #[command(flatten)]
        run: RunArgs,

        /// Repeat the run once per norm
        #[arg(long)]
        all_norms: bool,
    },

    /// Bounded points of a full lattice
    Lattice {
        #[command(flatten)]
        run: RunArgs,

        /// Lattice dimension; defaults to the algebra's
        #[arg(long)]
        dimension: Option<usize>,
    },

    /// Stream a sequence of slices, one JSON line per frame
    Slices {
        #[command(flatten)]
        run: RunArgs,

        /// Values of the swept parameter
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        values: Vec<f64>,

        /// One sequence per axis ordering (4D algebras only)
        #[arg(long)]
        all_orderings: bool,
    },

    /// Classical complex Mandelbrot on a plane rotated by a root of unity
    Classic {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Check every algebra's declared properties on random samples
    Audit {
        #[arg(long, default_value = "200")]
        samples: usize,

        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

#[derive(Args)]
struct RunArgs {
    #[arg(long)]
    algebra: Option<String>,
    #[arg(long)]
    norm: Option<String>,
    #[arg(long)]
    ordering: Option<String>,
    #[arg(long)]
    strategy: Option<String>,
    #[arg(long)]
    power: Option<u32>,
    #[arg(long, allow_hyphen_values = true)]
    iterations: Option<i64>,
    #[arg(long)]
    threshold: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    resolution: Option<i64>,
    #[arg(long, allow_hyphen_values = true)]
    lower: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    upper: Option<f64>,
    #[arg(long)]
    unity_root: Option<u32>,
    /// Fixed components for 3D/4D slices, comma separated; `slices` sweeps the first
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    params: Vec<f64>,
}

impl RunArgs {
    fn apply(self, mut cfg: RunConfig) -> RunConfig {
        if let Some(v) = self.algebra {
            cfg.algebra = v;
        }
        if let Some(v) = self.norm {
            cfg.norm = v;
        }
        if let Some(v) = self.ordering {
            cfg.ordering = v;
        }
        if let Some(v) = self.strategy {
            cfg.strategy = v;
        }
        if let Some(v) = self.power {
            cfg.power = v;
        }
        if let Some(v) = self.iterations {
            cfg.iterations = v;
        }
        if let Some(v) = self.threshold {
            cfg.threshold = v;
        }
        if let Some(v) = self.resolution {
            cfg.resolution = v;
        }
        if let Some(v) = self.lower {
            cfg.lower = v;
        }
        if let Some(v) = self.upper {
            cfg.upper = v;
        }
        if self.unity_root.is_some() {
            cfg.unity_root = self.unity_root;
        }
        if !self.params.is_empty() {
            cfg.params = self.params;
        }
        cfg
    }
}

#[derive(Serialize)]
struct CatalogEntry {
    key: String,
    name: &'static str,
    label: String,
    dimension: usize,
    properties: Properties,
}

#[derive(Serialize)]
struct PlaneOutput {
    title: String,
    algebra: String,
    norm: &'static str,
    shape: (usize, usize),
    counts: Vec<Vec<u32>>,
}

#[derive(Serialize)]
struct LatticeOutput {
    algebra: String,
    total: usize,
    bounded: usize,
    points: Vec<Vec<f64>>,
}

#[derive(Serialize)]
struct FrameOutput<'a> {
    label: &'a str,
    value: f64,
    title: &'a str,
    counts: Vec<Vec<u32>>,
}

#[derive(Serialize)]
struct AuditOutput {
    key: &'static str,
    declared: Properties,
    observed: genmandel::Audit,
    consistent: bool,
}

fn rows(counts: &Array2<u32>) -> Vec<Vec<u32>> {
    counts.rows().into_iter().map(|r| r.to_vec()).collect()
}

fn emit<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

fn resolve(config: &Option<PathBuf>, run: RunArgs) -> Result<ValidatedRun, Box<dyn std::error::Error>> {
    let base = match config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    Ok(run.apply(base).validate()?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Catalog => {
            let algebras: Vec<CatalogEntry> = Algebra::ALL
                .iter()
                .map(|a| CatalogEntry {
                    key: a.key().to_string(),
                    name: a.short_name(),
                    label: a.label(),
                    dimension: a.dimension(),
                    properties: a.properties(),
                })
                .collect();
            let norms: Vec<(&str, &str)> = Norm::ALL.iter().map(|n| (n.key(), n.label())).collect();
            let orderings: Vec<(&str, &str)> =
                AxisOrdering::ALL.iter().map(|o| (o.key(), o.short_name())).collect();
            emit(&serde_json::json!({
                "algebras": algebras,
                "norms": norms,
                "orderings": orderings,
            }))?;
        }
        Commands::Plane { run, all_norms } => {
            let run = resolve(&cli.config, run)?;
            let norms: Vec<Norm> = if all_norms { Norm::ALL.to_vec() } else { vec![run.engine.norm] };
            for norm in norms {
                let engine = run.engine.with_norm(norm);
                let slicer = Slicer::for_algebra(engine, run.plane, run.ordering)?;
                let params = if run.params.is_empty() {
                    vec![0.0; slicer.embedding.parameter_count()]
                } else {
                    run.params.clone()
                };
                let counts = slicer.slice(&params)?;
                emit(&PlaneOutput {
                    title: engine.title(),
                    algebra: engine.algebra.key().to_string(),
                    norm: norm.label(),
                    shape: counts.dim(),
                    counts: rows(&counts),
                })?;
            }
        }
        Commands::Lattice { run, dimension } => {
            let run = resolve(&cli.config, run)?;
            let dim = dimension.unwrap_or(run.engine.algebra.dimension());
            let field = lattice(run.plane.resolution, run.plane.lower, run.plane.upper, dim)?;
            let bounded = run.engine.bounded_points(&field)?;
            emit(&LatticeOutput {
                algebra: run.engine.algebra.key().to_string(),
                total: field.len(),
                bounded: bounded.len(),
                points: bounded.iter().map(|p| p.as_slice().to_vec()).collect(),
            })?;
        }
        Commands::Slices { run, values, all_orderings } => {
            let run = resolve(&cli.config, run)?;
            let sequences = if all_orderings {
                catalog_sequences(run.engine, run.plane, &values)?
            } else {
                let slicer = Slicer::for_algebra(run.engine, run.plane, run.ordering)?;
                let fixed = if run.params.is_empty() {
                    vec![0.0; slicer.embedding.parameter_count()]
                } else {
                    run.params.clone()
                };
                vec![slicer.sweep(values, &fixed)?]
            };
            for sequence in &sequences {
                let label = sequence.label();
                for frame in sequence {
                    let Frame { value, title, counts } = frame?;
                    emit(&FrameOutput { label: &label, value, title: &title, counts: rows(&counts) })?;
                }
            }
        }
        Commands::Classic { run } => {
            let run = resolve(&cli.config, run)?;
            let e = run.engine;
            let counts = classical(&run.plane, e.power, e.iterations, e.threshold)?;
            emit(&PlaneOutput {
                title: "$z^n + c$".to_string(),
                algebra: Algebra::Complex.key().to_string(),
                norm: Norm::SumOfSquares.label(),
                shape: counts.dim(),
                counts: rows(&counts),
            })?;
        }
        Commands::Audit { samples, seed } => {
            let mut rng = StdRng::seed_from_u64(seed);
            for algebra in Algebra::ALL {
                let observed = audit(*algebra, samples, &mut rng)?;
                let declared = algebra.properties();
                let consistent = observed.consistent_with(declared);
                if !consistent {
                    tracing::warn!(algebra = algebra.key(), "declared properties disagree with samples");
                }
                emit(&AuditOutput {
                    key: algebra.key(),
                    declared,
                    observed,
                    consistent,
                })?;
            }
        }
    }

    Ok(())
}
