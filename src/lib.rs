#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer with pull-based work distribution
//!
//! A fixed group of cooperating processes renders one image.  One of
//! them, the coordinator, owns a cursor over the rows of the image and
//! hands out fixed-size blocks of rows to whichever worker asks next;
//! slow workers simply ask less often.  When the rows run out, every
//! worker that asks is told to stop.  Each member renders only into
//! its own private buffer, leaving every row it was not given at zero,
//! so the buffers can be merged at the end by taking the maximum of
//! every cell.  The coordinator keeps the merged image and writes it
//! out as a PNG.
//!
//! The members are threads, but they share nothing: everything goes
//! through the message-passing endpoints in `transport`.

extern crate crossbeam;
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;

#[cfg(test)]
extern crate rand;
#[cfg(test)]
extern crate tempfile;

pub mod buffer;
pub mod color;
pub mod config;
pub mod coordinator;
pub mod encode;
pub mod errors;
pub mod escape;
pub mod planes;
pub mod protocol;
pub mod render;
pub mod transport;
pub mod worker;

pub use buffer::{PixelBuffer, Rgba};
pub use config::{BlockSizeSource, Config};
pub use errors::Error;
pub use protocol::Assignment;

use coordinator::Coordinator;
use planes::PlaneMapper;
use protocol::{validate_block_size, COORDINATOR};
use render::RowBlockRenderer;
use transport::{Endpoint, Payload};

/// What the coordinator is left holding at the end of a run.
#[derive(Debug)]
pub struct Outcome {
    /// The merged image.
    pub image: PixelBuffer,
    /// Every reply the coordinator sent, in order, with the rank of the
    /// worker it went to.
    pub assignments: Vec<(usize, Assignment)>,
    /// Whether the image was written to the configured output.
    pub written: bool,
}

/// Renders the image described by `config` with a group of
/// `config.processes` members, handing out `block_size` rows at a
/// time.  Configuration errors are reported before any member starts.
/// A failure to write the image is logged, not returned.
pub fn render(config: &Config, block_size: usize) -> Result<Outcome, Error> {
    if config.processes < 2 {
        return Err(Error::GroupSize(config.processes));
    }
    if config.max_iter == 0 {
        return Err(Error::Viewport("the iteration cap must be at least 1".to_string()));
    }
    validate_block_size(config.height, block_size)?;
    let plane = PlaneMapper::new(config.width, config.height, config.center, config.zoom)?;
    let plane = &plane;

    info!(
        "Rendering {}x{} around {} at zoom {} with {} processes",
        config.width, config.height, config.center, config.zoom, config.processes
    );

    let endpoints = transport::group(config.processes);
    let results = crossbeam::scope(|spawner| {
        let handles: Vec<_> = endpoints
            .into_iter()
            .map(|endpoint| spawner.spawn(move |_| member(config, plane, endpoint, block_size)))
            .collect();
        handles
            .into_iter()
            .enumerate()
            .map(|(rank, handle)| handle.join().map_err(|_| Error::Panicked(rank)))
            .collect::<Vec<_>>()
    })
    .unwrap_or_else(|panic| std::panic::resume_unwind(panic));

    let mut outcome = None;
    for result in results {
        if let Some(o) = result?? {
            outcome = Some(o);
        }
    }
    outcome.ok_or(Error::Disconnected(COORDINATOR))
}

// The life of one member of the group.  Only the coordinator returns
// an outcome.
fn member(
    config: &Config,
    plane: &PlaneMapper,
    mut endpoint: Endpoint,
    block_size: usize,
) -> Result<Option<Outcome>, Error> {
    let (rank, size) = (endpoint.rank(), endpoint.size());
    let offered = if rank == COORDINATOR {
        Some(Payload::BlockSize(block_size))
    } else {
        None
    };
    let block_size = match endpoint.broadcast(COORDINATOR, offered)? {
        Payload::BlockSize(n) => n,
        other => panic!("process {} expected a block size, got {:?}", rank, other),
    };

    let mut private = PixelBuffer::new(config.width, config.height);
    let assignments = if rank == COORDINATOR {
        Coordinator::new(config.height, block_size, size - 1)?.serve(&mut endpoint)?
    } else {
        let renderer = RowBlockRenderer::new(plane.clone(), config.max_abs, config.max_iter, rank, size);
        worker::work(&mut endpoint, &renderer, block_size, &mut private)?;
        vec![]
    };

    let image = match endpoint.reduce_max(COORDINATOR, private)? {
        Some(image) => image,
        None => return Ok(None),
    };

    let unrendered = image.unrendered();
    if unrendered > 0 {
        warn!("{} pixels were not rendered by any process", unrendered);
    }

    let written = match config.output {
        Some(ref path) => match encode::write_png(path, &image) {
            Ok(()) => {
                info!("Wrote {}", path.display());
                true
            }
            Err(e) => {
                error!("{}", e);
                false
            }
        },
        None => false,
    };

    Ok(Some(Outcome {
        image,
        assignments,
        written,
    }))
}
