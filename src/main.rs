use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thumbgen::config::{self, GeneratorConfig, Overrides};
use thumbgen::{output, process, scan};

fn version_string() -> &'static str {
    if env!("THUMBGEN_RELEASE") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    let hash = env!("THUMBGEN_GIT_HASH");
    if hash.is_empty() {
        "dev@unknown"
    } else {
        // Leaked once at startup
        Box::leak(format!("dev@{hash}").into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "thumbgen")]
#[command(about = "Generate JPEG thumbnails for a directory of photos")]
#[command(long_about = "\
Generate JPEG thumbnails for a directory of photos

Every .jpg, .jpeg, .png, .gif and .webp file directly inside the source
directory is decoded, flattened onto white if it has transparency, scaled
down so neither side exceeds --width (Lanczos3), and written as a JPEG with
the same file name into the output directory.

Project layout (defaults):

  <root>/
  ├── thumbs.toml        # Optional config (see 'thumbgen gen-config')
  └── images/
      ├── fulls/         # Source images (not scanned recursively)
      └── thumbs/        # Created if missing

Exit status is 0 when every image was converted (including when there are
none) and 1 when the source directory is missing or any image failed.")]
#[command(version = version_string())]
struct Cli {
    /// Project root; relative directories are resolved against it
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Source directory (default from config: images/fulls)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Output directory (default from config: images/thumbs)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Maximum thumbnail width and height in pixels
    #[arg(long, global = true)]
    width: Option<u32>,

    /// JPEG quality, 1-100
    #[arg(long, global = true)]
    quality: Option<u32>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate thumbnails (the default when no command is given)
    Generate,
    /// List the images a generate run would process, without writing anything
    Check,
    /// Print a stock thumbs.toml with all options documented
    GenConfig,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            fulls_dir: self.source.clone(),
            thumbs_dir: self.output.clone(),
            width: self.width,
            quality: self.quality,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Run the selected command. `Ok(false)` means it ran but some images failed.
fn run(cli: &Cli) -> Result<bool, Box<dyn std::error::Error>> {
    match cli.command.as_ref().unwrap_or(&Command::Generate) {
        Command::Generate => {
            let site = config::load_config(&cli.root, &cli.overrides())?;
            generate(&cli.root, &site)
        }
        Command::Check => {
            let site = config::load_config(&cli.root, &cli.overrides())?;
            let source = site.fulls_path(&cli.root);
            let scanned = scan::scan(&source)?;
            output::print_check_output(&scanned, &source);
            Ok(true)
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            Ok(true)
        }
    }
}

fn generate(root: &Path, site: &GeneratorConfig) -> Result<bool, Box<dyn std::error::Error>> {
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_process_event(&event) {
                println!("{}", line);
            }
        }
    });

    let result = process::generate_thumbnails(
        &site.fulls_path(root),
        &site.thumbs_path(root),
        &site.thumbnail_config(),
        Some(tx),
    );
    printer.join().map_err(|_| "progress printer panicked")?;
    let result = result?;

    if !result.generated.is_empty() || !result.failures.is_empty() {
        println!();
    }
    output::print_run_summary(&result);
    Ok(result.is_success())
}
