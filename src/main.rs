use std::io::Write;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;

use island_generator::export;
use island_generator::params::GenParams;
use island_generator::progress::Progress;
use island_generator::seeds::TerrainSeeds;
use island_generator::terrain;

#[derive(Parser, Debug)]
#[command(name = "island_generator")]
#[command(about = "Generate a procedural island terrain mesh")]
struct Args {
    /// Map size in cells per side (must be a power of two)
    #[arg(short, long, default_value = "1024")]
    size: usize,

    /// Number of noise octaves (0 = run until the frequency bound)
    #[arg(short, long, default_value = "0")]
    iterations: usize,

    /// Base noise amplitude
    #[arg(short, long, default_value = "0.25")]
    amplitude: f64,

    /// Random seed (uses a random seed if not specified)
    #[arg(long)]
    seed: Option<u64>,

    /// Load generation parameters from a JSON file instead of the flags above
    #[arg(long)]
    config: Option<String>,

    /// Export the heightmap as a colormapped PNG
    #[arg(long)]
    export_heightmap: Option<String>,

    /// Export a top-down biome preview PNG
    #[arg(long)]
    export_preview: Option<String>,
}

fn main() {
    let args = Args::parse();

    let params = match load_params(&args) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = params.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let seeds = TerrainSeeds::from_master(seed);

    println!("Generating island terrain with seed: {}", seed);
    println!("Map size: {}x{}", params.size, params.size);

    let start = Instant::now();
    let progress = Arc::new(Progress::new());

    let worker = {
        let params = params.clone();
        let progress = Arc::clone(&progress);
        thread::spawn(move || terrain::generate(&params, seeds, &progress))
    };

    // Poll the shared counter the way the loading screen does.
    while !progress.is_complete() && !worker.is_finished() {
        print!("\rGenerating terrain... {:3}%", progress.get());
        let _ = std::io::stdout().flush();
        thread::sleep(Duration::from_millis(100));
    }

    let data = match worker.join() {
        Ok(Ok(data)) => data,
        Ok(Err(e)) => {
            eprintln!("\rGeneration failed: {}", e);
            std::process::exit(1);
        }
        Err(_) => {
            eprintln!("\rGeneration thread panicked");
            std::process::exit(1);
        }
    };
    println!("\rGenerating terrain... 100%");

    println!("Generation complete in {:.2} sec", start.elapsed().as_secs_f64());
    println!("Water level: {:.3}", data.water_level);
    println!("Minimum height: {:.3}", data.min_height);
    println!(
        "Mesh: {} triangles, {} vertices",
        data.mesh.triangle_count(),
        data.mesh.vertex_count()
    );

    if let Some(ref path) = args.export_heightmap {
        match export::export_heightmap(&data.heightmap, path) {
            Ok(()) => println!("Heightmap exported to: {}", path),
            Err(e) => eprintln!("Failed to export heightmap: {}", e),
        }
    }

    if let Some(ref path) = args.export_preview {
        match export::export_preview(&data, path) {
            Ok(()) => println!("Preview exported to: {}", path),
            Err(e) => eprintln!("Failed to export preview: {}", e),
        }
    }
}

/// Build parameters from the config file when given, otherwise from flags.
fn load_params(args: &Args) -> Result<GenParams, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.config {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    } else {
        Ok(GenParams {
            size: args.size,
            iterations: args.iterations,
            amplitude: args.amplitude,
            ..GenParams::default()
        })
    }
}
