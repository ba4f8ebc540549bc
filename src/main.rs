use clap::Parser;
use rand::Rng;

use gallery_generator::ascii;
use gallery_generator::config::GalleryConfig;
use gallery_generator::exhibit::{load_exhibits, placeholder_exhibits};
use gallery_generator::export;
use gallery_generator::gallery::generate_gallery_with;
use gallery_generator::placement::TileCategory;
use gallery_generator::seeds::GallerySeeds;

#[derive(Parser, Debug)]
#[command(name = "gallery_generator")]
#[command(about = "Generate procedural art gallery layouts sized to an exhibit list")]
struct Args {
    /// Number of placeholder exhibits to hang (ignored when --exhibits is given)
    #[arg(short = 'n', long, default_value = "20")]
    items: usize,

    /// JSON file with an ordered exhibit list
    #[arg(short, long)]
    exhibits: Option<String>,

    /// Layout seed (random 1-32 if not specified)
    #[arg(short, long, allow_hyphen_values = true)]
    seed: Option<i64>,

    /// First grid size tried
    #[arg(long, default_value = "5")]
    start_size: usize,

    /// Largest grid size tried before giving up
    #[arg(long, default_value = "200")]
    max_size: usize,

    /// Skip chairs and plants in corners
    #[arg(long)]
    no_decorations: bool,

    /// Print the layout as ASCII
    #[arg(long)]
    ascii: bool,

    /// Use ANSI colours when printing the layout
    #[arg(long)]
    color: bool,

    /// Export a layout report to a text file (e.g., "gallery.txt")
    #[arg(long)]
    export_ascii: Option<String>,

    /// Export the compiled gallery as JSON
    #[arg(long)]
    export_json: Option<String>,

    /// Export a PNG preview of the layout
    #[arg(long)]
    export_png: Option<String>,

    /// Include plaques in the layout report
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    // Small seeds keep the noise frequency low enough for connected rooms
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen_range(1..=32));
    let seeds = GallerySeeds::from_master(seed);

    let exhibits = match args.exhibits {
        Some(ref path) => match load_exhibits(path) {
            Ok(list) => {
                println!("Loaded {} exhibits from {}", list.len(), path);
                list
            }
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        None => placeholder_exhibits(args.items),
    };

    let mut config = GalleryConfig::default().with_size_bounds(args.start_size, args.max_size);
    if args.no_decorations {
        config = config.without_decorations();
    }

    println!("Generating gallery with seed: {}", seed);
    println!("Exhibits to hang: {}", exhibits.len());

    println!("Sizing layout...");
    let progress = |size: usize, capacity: usize| {
        if args.verbose {
            println!("  {}x{}: capacity {}", size, size, capacity);
        }
    };
    let gallery = match generate_gallery_with(&exhibits, seeds, &config, None, Some(&progress)) {
        Ok(gallery) => gallery,
        Err(e) => {
            eprintln!("Generation failed: {}", e);
            std::process::exit(1);
        }
    };

    let layout = &gallery.layout;
    let counts = layout.grid.tile_counts();
    println!(
        "Layout: {}x{} after {} attempts (capacity {})",
        layout.size, layout.size, layout.attempts, layout.capacity
    );
    println!(
        "  {} floor, {} pillars, {} walls, {} corners, {} niches",
        counts.floor, counts.pillar, counts.wall, counts.corner, counts.niche
    );

    let compiled = &gallery.compiled;
    println!("Compiled {} instances:", compiled.batches.total_instances());
    for category in TileCategory::all() {
        println!("  {}: {}", category.display_name(), compiled.batch(*category).len());
    }
    println!(
        "Exhibit slots: {} ({} exhibits, {} filler)",
        compiled.slots.len(),
        compiled.exhibits_placed(),
        compiled.filler_slots()
    );

    if args.ascii {
        println!();
        ascii::print_ascii_grid(&layout.grid, args.color);
        println!();
        print!("{}", ascii::tile_legend());
    }

    if let Some(ref path) = args.export_ascii {
        match ascii::export_gallery_file(layout, compiled, path, args.verbose) {
            Ok(()) => println!("Exported layout report to: {}", path),
            Err(e) => eprintln!("Failed to export layout report: {}", e),
        }
    }

    if let Some(ref path) = args.export_json {
        match export::export_gallery_json(&gallery, &exhibits, path) {
            Ok(()) => println!("Exported gallery JSON to: {}", path),
            Err(e) => eprintln!("Failed to export gallery JSON: {}", e),
        }
    }

    if let Some(ref path) = args.export_png {
        match export::export_layout_png(&layout.grid, Some(compiled), path) {
            Ok(()) => println!("Exported layout preview to: {}", path),
            Err(e) => eprintln!("Failed to export layout preview: {}", e),
        }
    }
}
