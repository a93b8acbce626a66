use clap::Parser;
use sheet_cutter::{Demand, Report, pack};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sheet_cutter",
    about = "Guillotine cutting-stock packer for uniform sheets"
)]
struct Cli {
    /// Sheet dimensions (LxW, e.g. 244x122.5)
    #[arg(long)]
    sheet: String,

    /// Pieces as LxW:qty (e.g. 80x60:3 40.5x30:5)
    #[arg(long = "pieces", num_args = 1..)]
    pieces: Vec<String>,

    /// Maximum number of sheets available (default: unlimited)
    #[arg(long)]
    sheet_quantity: Option<u32>,

    /// Measurement unit label used in the summary
    #[arg(long, default_value = "cm")]
    unit: String,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,
}

fn parse_dimensions(s: &str) -> Result<(f64, f64), String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return Err(format!("invalid dimensions '{}', expected LxW", s));
    }
    let length = parts[0]
        .parse::<f64>()
        .map_err(|_| format!("invalid length in '{}'", s))?;
    let width = parts[1]
        .parse::<f64>()
        .map_err(|_| format!("invalid width in '{}'", s))?;
    Ok((length, width))
}

fn parse_piece(s: &str) -> Result<Demand, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 2 {
        return Err(format!("invalid piece '{}', expected LxW:qty", s));
    }
    let (length, width) = parse_dimensions(parts[0])?;
    let qty = parts[1]
        .parse::<u32>()
        .map_err(|_| format!("invalid quantity in '{}'", s))?;
    Ok(Demand::new(length, width, qty))
}

fn print_report(report: &Report, unit: &str) {
    for (i, sheet) in report.placements.iter().enumerate() {
        println!("Sheet {}:", i + 1);
        for p in sheet {
            let rot = if p.rotated { " [rotated]" } else { "" };
            println!(
                "  {}x{} @ ({}, {}){}",
                p.original_length, p.original_width, p.x, p.y, rot
            );
        }
        println!();
    }

    println!(
        "Summary: {} sheet{} used, {:.2} {}² waste ({:.1}%)",
        report.sheet_count(),
        if report.sheet_count() == 1 { "" } else { "s" },
        report.waste_area,
        unit,
        report.waste_percent(),
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let (sheet_length, sheet_width) = parse_dimensions(&cli.sheet).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let demands: Vec<Demand> = cli
        .pieces
        .iter()
        .map(|p| parse_piece(p))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    let report = pack(sheet_length, sheet_width, cli.sheet_quantity, &demands).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print_report(&report, &cli.unit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_piece() {
        let d = parse_piece("80.5x60:3").unwrap();
        assert_eq!(d, Demand::new(80.5, 60.0, 3));
        assert!(parse_piece("80x60").is_err());
        assert!(parse_piece("80x60:many").is_err());
        assert!(parse_dimensions("80").is_err());
    }
}
