// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Run parameters, and the interactive block size prompt.

use num::Complex;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use errors::Error;

/// Everything that describes one run apart from the block size.
#[derive(Clone, Debug)]
pub struct Config {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Magnification of the window onto the complex plane.
    pub zoom: f64,
    /// The point shown at the middle of the image.
    pub center: Complex<f64>,
    /// Orbits whose magnitude reaches this bound have escaped.
    pub max_abs: f64,
    /// The escape-time cap.
    pub max_iter: usize,
    /// Members of the process group, the coordinator included.
    pub processes: usize,
    /// Where the coordinator writes the image, if anywhere.
    pub output: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            width: 1024,
            height: 1024,
            zoom: 1.0,
            center: Complex::new(-0.5, 0.0),
            max_abs: 2.0,
            max_iter: 350,
            processes: num_cpus::get() + 1,
            output: Some(PathBuf::from("mandelbrot.png")),
        }
    }
}

/// How the coordinating side obtains the block size.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BlockSizeSource {
    /// Supplied up front.
    Given(usize),
    /// Asked for interactively.
    Prompt,
}

/// Asks for the block size on `output` and reads one line of `input`.
pub fn prompt_block_size<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<usize, Error> {
    write!(output, "Please enter the blocksize: ")
        .and_then(|_| output.flush())
        .map_err(|e| Error::Prompt(e.to_string()))?;
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| Error::Prompt(e.to_string()))?;
    if read == 0 {
        return Err(Error::Prompt("no input".to_string()));
    }
    line.trim()
        .parse::<usize>()
        .map_err(|_| Error::Prompt(format!("'{}' is not a block size", line.trim())))
}

impl BlockSizeSource {
    /// Produces the block size, prompting on the terminal if necessary.
    pub fn resolve(self) -> Result<usize, Error> {
        match self {
            BlockSizeSource::Given(n) => Ok(n),
            BlockSizeSource::Prompt => {
                let stdin = std::io::stdin();
                let stdout = std::io::stdout();
                let size = prompt_block_size(stdin.lock(), stdout.lock());
                size
            }
        }
    }
}
