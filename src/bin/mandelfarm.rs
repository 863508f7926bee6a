// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
#[macro_use]
extern crate log;
extern crate mandelfarm;
extern crate num;
extern crate simplog;

use clap::{App, AppSettings, Arg, ArgMatches};
use mandelfarm::{BlockSizeSource, Config};
use num::Complex;
use simplog::simplog::SimpleLogger;
use std::path::PathBuf;
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn validate_float(s: &str, err: &str) -> Result<(), String> {
    match f64::from_str(s) {
        Ok(f) if f.is_finite() => Ok(()),
        _ => Err(err.to_string()),
    }
}

const ZOOM: &str = "zoom";
const XCENTER: &str = "xcenter";
const YCENTER: &str = "ycenter";
const BLOCKSIZE: &str = "blocksize";
const PROCESSES: &str = "processes";
const SIZE: &str = "size";
const ITERATIONS: &str = "iterations";
const OUTPUT: &str = "output";
const VERBOSITY: &str = "verbosity";

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandelfarm")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Mandelbrot renderer with pull-based row distribution")
        .setting(AppSettings::AllowNegativeNumbers)
        .arg(
            Arg::with_name(ZOOM)
                .index(1)
                .default_value("1.0")
                .validator(|s| {
                    validate_range(
                        &s,
                        std::f64::MIN_POSITIVE,
                        std::f64::MAX,
                        "Could not parse zoom factor",
                        "Zoom factor must be greater than zero",
                    )
                })
                .help("Zoom factor"),
        )
        .arg(
            Arg::with_name(XCENTER)
                .index(2)
                .default_value("-0.5")
                .validator(|s| validate_float(&s, "Could not parse horizontal center"))
                .help("Real part of the point at the center of the image"),
        )
        .arg(
            Arg::with_name(YCENTER)
                .index(3)
                .default_value("0.0")
                .validator(|s| validate_float(&s, "Could not parse vertical center"))
                .help("Imaginary part of the point at the center of the image"),
        )
        .arg(
            Arg::with_name(BLOCKSIZE)
                .long(BLOCKSIZE)
                .short("b")
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        usize::max_value(),
                        "Could not parse block size",
                        "Block size must be at least 1",
                    )
                })
                .help("Rows per unit of work; asked for interactively if absent"),
        )
        .arg(
            Arg::with_name(PROCESSES)
                .long(PROCESSES)
                .short("p")
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        2,
                        256,
                        "Could not parse process count",
                        "Process count must be between 2 and 256",
                    )
                })
                .help("Processes in the group, the coordinator included"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1024x1024")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("350")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        200_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 200000",
                    )
                })
                .help("Maximum number of iterations per point"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("mandelbrot.png")
                .help("Output file"),
        )
        .arg(
            Arg::with_name(VERBOSITY)
                .long(VERBOSITY)
                .short("v")
                .takes_value(true)
                .possible_values(&["error", "warn", "info", "debug", "trace"])
                .help("Set verbosity level for output"),
        )
        .get_matches()
}

// Every value read here has already passed its validator.
fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> T {
    match matches.value_of(name).map(T::from_str) {
        Some(Ok(v)) => v,
        _ => unreachable!("argument {} was validated", name),
    }
}

fn config(matches: &ArgMatches) -> Config {
    let defaults = Config::default();
    let (width, height) = matches
        .value_of(SIZE)
        .and_then(|s| parse_pair::<usize>(s, 'x'))
        .unwrap_or((defaults.width, defaults.height));
    Config {
        width,
        height,
        zoom: value(matches, ZOOM),
        center: Complex::new(value(matches, XCENTER), value(matches, YCENTER)),
        max_iter: value(matches, ITERATIONS),
        processes: if matches.is_present(PROCESSES) {
            value(matches, PROCESSES)
        } else {
            defaults.processes
        },
        output: matches.value_of(OUTPUT).map(PathBuf::from),
        ..defaults
    }
}

fn main() {
    let matches = args();
    SimpleLogger::init(matches.value_of(VERBOSITY));
    debug!("'{}' version {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = config(&matches);
    let source = if matches.is_present(BLOCKSIZE) {
        BlockSizeSource::Given(value(&matches, BLOCKSIZE))
    } else {
        BlockSizeSource::Prompt
    };

    let outcome = source
        .resolve()
        .and_then(|block_size| mandelfarm::render(&config, block_size));

    match outcome {
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok(outcome) => info!(
            "{} blocks handed out to {} workers",
            outcome
                .assignments
                .iter()
                .filter(|&&(_, a)| a != mandelfarm::Assignment::Exhausted)
                .count(),
            config.processes - 1
        ),
    }
}
