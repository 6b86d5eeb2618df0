use al_app::{AppResult, project_service, report, run_service};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(name = "al-cli")]
#[command(about = "aerolattice CLI - vortex-lattice aerodynamic analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax, values and geometry
    Validate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// Solve the project's operating point
    Run {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        #[arg(long, value_enum, default_value = "json")]
        format: Format,
        /// Output file (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Sweep angle of attack, holding the rest of the operating point
    Sweep {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// First angle of attack in degrees
        #[arg(long, allow_hyphen_values = true)]
        from: f64,
        /// Last angle of attack in degrees
        #[arg(long, allow_hyphen_values = true)]
        to: f64,
        /// Number of points, endpoints included
        #[arg(long, default_value_t = 11)]
        count: usize,
        #[arg(long, value_enum, default_value = "csv")]
        format: Format,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Stability derivatives and neutral point at the operating point
    Stability {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        #[arg(long, value_enum, default_value = "json")]
        format: Format,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Trace streamlines from the project's seeds or an upstream rake
    Streamlines {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Points per streamline (overrides the project)
        #[arg(long)]
        steps: Option<usize>,
        /// Path length of each streamline (overrides the project)
        #[arg(long)]
        length: Option<f64>,
        #[arg(long, value_enum, default_value = "csv")]
        format: Format,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compare induced drag with an elliptically loaded wing
    Elliptic {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Run {
            project_path,
            format,
            output,
        } => cmd_run(&project_path, format, output.as_deref()),
        Commands::Sweep {
            project_path,
            from,
            to,
            count,
            format,
            output,
        } => cmd_sweep(&project_path, from, to, count, format, output.as_deref()),
        Commands::Stability {
            project_path,
            format,
            output,
        } => cmd_stability(&project_path, format, output.as_deref()),
        Commands::Streamlines {
            project_path,
            steps,
            length,
            format,
            output,
        } => cmd_streamlines(&project_path, steps, length, format, output.as_deref()),
        Commands::Elliptic { project_path } => cmd_elliptic(&project_path),
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    let airplane = project_service::build_airplane(&project)?;

    println!("✓ Project '{}' is valid", project.name);
    println!("  Reference area: {:.4}", airplane.references.s_ref);
    println!("  Reference chord: {:.4}", airplane.references.c_ref);
    println!("  Reference span: {:.4}", airplane.references.b_ref);
    println!("\nWings:");
    for w in project_service::list_wings(&airplane) {
        println!(
            "  {} ({} sections{}): span {:.3}, area {:.3}, AR {:.2}",
            w.name,
            w.sections,
            if w.symmetric { ", mirrored" } else { "" },
            w.span,
            w.area,
            w.aspect_ratio
        );
    }
    Ok(())
}

fn cmd_run(project_path: &Path, format: Format, output: Option<&Path>) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let result = run_service::run_point(&project)?;
    match format {
        Format::Json => write_out(output, &to_json(&result)?),
        Format::Csv => write_out(output, &report::result_csv(&result)),
    }
}

fn cmd_sweep(
    project_path: &Path,
    from: f64,
    to: f64,
    count: usize,
    format: Format,
    output: Option<&Path>,
) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let alphas = run_service::alpha_range(from, to, count)?;
    let sweep = run_service::run_alpha_sweep(&project, &alphas)?;
    match format {
        Format::Json => write_out(output, &to_json(&sweep)?),
        Format::Csv => write_out(output, &sweep.to_csv()),
    }
}

fn cmd_stability(project_path: &Path, format: Format, output: Option<&Path>) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let result = run_service::run_stability(&project)?;
    match format {
        Format::Json => write_out(output, &to_json(&result)?),
        Format::Csv => write_out(output, &report::result_csv(&result)),
    }
}

fn cmd_streamlines(
    project_path: &Path,
    steps: Option<usize>,
    length: Option<f64>,
    format: Format,
    output: Option<&Path>,
) -> AppResult<()> {
    let mut project = project_service::load_project(project_path)?;
    if let Some(steps) = steps {
        project.analysis.streamlines.steps = steps;
    }
    if length.is_some() {
        project.analysis.streamlines.length = length;
    }
    let lines = run_service::trace_streamlines(&project, None)?;
    debug!(lines = lines.lines.len(), "streamlines traced");
    match format {
        Format::Json => write_out(output, &to_json(&lines)?),
        Format::Csv => write_out(output, &lines.to_csv()),
    }
}

fn cmd_elliptic(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let c = run_service::run_elliptic_comparison(&project)?;
    println!("Aspect ratio:        {:.4}", c.aspect_ratio);
    println!("CL:                  {:.6}", c.cl);
    println!("CDi (lattice):       {:.6}", c.cdi);
    println!("CDi (elliptic):      {:.6}", c.cdi_elliptic);
    println!("Span efficiency e:   {:.4}", c.span_efficiency);
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn write_out(output: Option<&Path>, content: &str) -> AppResult<()> {
    if let Some(path) = output {
        std::fs::write(path, content)?;
        println!("✓ Wrote {}", path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}
