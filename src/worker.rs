// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The worker side of the protocol: ask, render, repeat.

use buffer::PixelBuffer;
use errors::Error;
use protocol::{work_request, Assignment, COORDINATOR};
use render::RowBlockRenderer;
use transport::{Endpoint, Source, Tag};

fn next_assignment(endpoint: &mut Endpoint) -> Result<Assignment, Error> {
    endpoint.send(COORDINATOR, Tag::StartingLine, work_request())?;
    let reply = endpoint.recv(Source::Rank(COORDINATOR), Tag::StartingLine)?;
    Ok(Assignment::from_payload(&reply.payload))
}

/// Pulls blocks from the coordinator and renders each into `buffer`
/// until the coordinator runs out.  Returns the number of blocks
/// rendered.
pub fn work(
    endpoint: &mut Endpoint,
    renderer: &RowBlockRenderer,
    block_size: usize,
    buffer: &mut PixelBuffer,
) -> Result<usize, Error> {
    let mut blocks = 0;
    while let Assignment::Start(row) = next_assignment(endpoint)? {
        trace!("Process {} rendering rows from {}", endpoint.rank(), row);
        renderer.render_block(buffer, block_size, row);
        blocks += 1;
    }
    debug!("Process {} rendered {} blocks", endpoint.rank(), blocks);
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use buffer::Rgba;
    use num::Complex;
    use planes::PlaneMapper;
    use protocol::REQUEST_BODY;
    use transport::{group, Payload};

    #[test]
    fn renders_what_it_is_given_and_stops_on_the_sentinel() {
        let mut endpoints = group(2);
        let mut worker = endpoints.pop().unwrap();
        let coordinator = endpoints.pop().unwrap();

        // Queue the replies ahead of the requests; the worker only reads
        // one reply per request.
        coordinator.send(1, Tag::StartingLine, Payload::Line(12)).unwrap();
        coordinator.send(1, Tag::StartingLine, Payload::Line(0)).unwrap();
        coordinator.send(1, Tag::StartingLine, Payload::Line(-1)).unwrap();

        let plane = PlaneMapper::new(16, 16, Complex::new(-0.5, 0.0), 1.0).unwrap();
        let renderer = RowBlockRenderer::new(plane, 2.0, 350, 1, 2);
        let mut buffer = PixelBuffer::new(16, 16);
        let blocks = work(&mut worker, &renderer, 4, &mut buffer).unwrap();
        assert_eq!(blocks, 2);

        for row in 0..16 {
            let expected = row < 4 || row >= 12;
            assert_eq!(buffer.row(row)[0] != Rgba::CLEAR, expected, "row {}", row);
        }

        let mut coordinator = coordinator;
        for _ in 0..3 {
            let request = coordinator.recv(Source::Any, Tag::StartingLine).unwrap();
            assert_eq!(request.source, 1);
            assert_eq!(request.payload, Payload::Request(REQUEST_BODY));
        }
    }
}
