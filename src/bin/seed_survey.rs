//! Survey how large a gallery each seed needs for a given exhibit count

use std::time::Instant;

use clap::Parser;
use rayon::prelude::*;

use gallery_generator::occupancy::MaskParams;
use gallery_generator::sizer::{size_layout, SizerParams, SizingError};

#[derive(Parser, Debug)]
#[command(name = "seed_survey")]
struct Args {
    /// Exhibit count each layout must exceed
    #[arg(short, long, default_value = "50")]
    target: usize,

    /// First seed surveyed
    #[arg(long, default_value = "1", allow_hyphen_values = true)]
    from: i64,

    /// Last seed surveyed (inclusive)
    #[arg(long, default_value = "64", allow_hyphen_values = true)]
    to: i64,

    /// Largest grid size tried per seed
    #[arg(long, default_value = "200")]
    max_size: usize,
}

struct SurveyRow {
    seed: i64,
    result: Result<(usize, usize, usize), SizingError>,
}

fn main() {
    let args = Args::parse();
    if args.from > args.to {
        eprintln!("Empty seed range {}..={}", args.from, args.to);
        std::process::exit(1);
    }

    let mask = MaskParams::default();
    let params = SizerParams { max_size: args.max_size, ..SizerParams::default() };

    println!("=== Seed Survey ===");
    println!(
        "Target: {} exhibits, seeds {}..={}, max size {}",
        args.target, args.from, args.to, args.max_size
    );
    println!();

    let start = Instant::now();
    let mut rows: Vec<SurveyRow> = (args.from..=args.to)
        .into_par_iter()
        .map(|seed| SurveyRow {
            seed,
            result: size_layout(args.target, seed, &mask, &params)
                .map(|layout| (layout.size, layout.capacity, layout.attempts)),
        })
        .collect();
    rows.sort_by_key(|row| row.seed);
    let elapsed = start.elapsed();

    println!("{:>8} {:>6} {:>9} {:>9}", "Seed", "Size", "Capacity", "Attempts");
    println!("{}", "-".repeat(36));
    let mut sizes = Vec::new();
    for row in &rows {
        match &row.result {
            Ok((size, capacity, attempts)) => {
                sizes.push(*size);
                println!("{:>8} {:>6} {:>9} {:>9}", row.seed, size, capacity, attempts);
            }
            Err(e) => println!("{:>8}  {}", row.seed, e),
        }
    }

    println!();
    println!("=== Summary ===");
    println!("Surveyed {} seeds in {:?}", rows.len(), elapsed);
    if let (Some(min), Some(max)) = (sizes.iter().min(), sizes.iter().max()) {
        let mean = sizes.iter().sum::<usize>() as f64 / sizes.len() as f64;
        println!("  Size: min {}, max {}, mean {:.1}", min, max, mean);
    }
    let failed = rows.len() - sizes.len();
    if failed > 0 {
        println!("  Unsatisfiable: {}", failed);
    }
}
