//! Coordinate conversion and distance tool
//!
//! Converts points between the Cartesian and spheric representations and
//! measures distances between them.
//!
//! Usage:
//!   cargo run --bin coordinate_tool -- convert cartesian 1.23 2.34 3.45
//!   cargo run --bin coordinate_tool -- convert spheric 1.0 2.0 3.0 --json
//!   cargo run --bin coordinate_tool -- distance \
//!       '{"cartesian": {"x": 1.23, "y": 2.34, "z": 3.45}}' \
//!       '{"spheric": {"latitude": 1.0, "longitude": 2.0, "radius": 3.0}}'

use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use wahlzeit_coordinates::{cache_stats, Coordinate};

/// Type alias for the error type used throughout this tool
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Coordinate conversion and distance tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Converts coordinates between Cartesian and spheric form and measures distances",
    long_about = None
)]
struct Args {
    /// Print results as JSON
    #[arg(short, long, action = ArgAction::SetTrue, global = true)]
    json: bool,

    /// Print registry sizes after the command
    #[arg(short, long, action = ArgAction::SetTrue, global = true)]
    stats: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show a point in both representations
    Convert {
        #[command(subcommand)]
        point: Point,
    },
    /// Measure the distance between two points given as JSON
    Distance {
        /// First point, e.g. '{"cartesian": {"x": 1, "y": 2, "z": 3}}'
        from: String,
        /// Second point
        to: String,
    },
}

#[derive(Subcommand, Debug)]
enum Point {
    /// Point given as x y z
    Cartesian {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
        #[arg(allow_negative_numbers = true)]
        z: f64,
    },
    /// Point given as latitude longitude radius (radians)
    Spheric {
        latitude: f64,
        longitude: f64,
        radius: f64,
    },
}

#[derive(Serialize)]
struct Conversion {
    input: Coordinate,
    cartesian: Coordinate,
    /// Absent when the atan-based conversion rejects the point
    spheric: Option<Coordinate>,
}

#[derive(Serialize)]
struct Distances {
    from: Coordinate,
    to: Coordinate,
    cartesian: f64,
    spheric: Option<f64>,
    natural: f64,
}

fn convert(point: Point, json: bool) -> Result<()> {
    let input = match point {
        Point::Cartesian { x, y, z } => Coordinate::cartesian(x, y, z)?,
        Point::Spheric {
            latitude,
            longitude,
            radius,
        } => Coordinate::spheric(latitude, longitude, radius)?,
    };

    let cartesian = Coordinate::from(input.as_cartesian_coordinate()?);
    let spheric = match input.as_spheric_coordinate() {
        Ok(s) => Some(Coordinate::from(s)),
        Err(e) => {
            log::warn!("no spheric form for {}: {}", input, e);
            None
        }
    };

    let conversion = Conversion {
        input,
        cartesian,
        spheric,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&conversion)?);
    } else {
        println!("Input:     {}", conversion.input);
        println!("Cartesian: {}", conversion.cartesian);
        match &conversion.spheric {
            Some(s) => println!("Spheric:   {}", s),
            None => println!("Spheric:   (not representable)"),
        }
    }
    Ok(())
}

fn distance(from: &str, to: &str, json: bool) -> Result<()> {
    let from: Coordinate = serde_json::from_str(from)?;
    let to: Coordinate = serde_json::from_str(to)?;

    let distances = Distances {
        cartesian: from.cartesian_distance(&to)?,
        spheric: from.spheric_distance(&to).ok(),
        natural: from.distance(&to)?,
        from,
        to,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&distances)?);
    } else {
        println!("From:      {}", distances.from);
        println!("To:        {}", distances.to);
        println!("Cartesian: {:.6}", distances.cartesian);
        match distances.spheric {
            Some(d) => println!("Spheric:   {:.6}", d),
            None => println!("Spheric:   (not representable)"),
        }
        println!("Distance:  {:.6}", distances.natural);
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Convert { point } => convert(point, args.json)?,
        Command::Distance { from, to } => distance(&from, &to, args.json)?,
    }

    if args.stats {
        let stats = cache_stats();
        if args.json {
            println!("{}", serde_json::to_string(&stats)?);
        } else {
            println!(
                "Shared instances: {} cartesian, {} spheric",
                stats.cartesian, stats.spheric
            );
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
