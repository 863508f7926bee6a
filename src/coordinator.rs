// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The coordinator owns the only copy of the "next unassigned row"
//! cursor and answers work requests one at a time.  Because nothing
//! else can touch the cursor and every request gets exactly one reply,
//! each block of rows goes to exactly one worker, and every worker is
//! told to stop exactly once.

use errors::Error;
use protocol::{validate_block_size, Assignment, REQUEST_BODY};
use transport::{Endpoint, Payload, Source, Tag};

/// Where the coordinator is in the run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    /// Rows remain to be handed out, or no worker has been told to stop.
    Distributing,
    /// All rows are out and at least one worker has been told to stop.
    Draining,
    /// Every worker has been told to stop.
    Done,
}

// Hands out the starting rows 0, block, 2 * block, ... below `limit`.
#[derive(Debug)]
struct RowCursor {
    next: Option<usize>,
    step: usize,
    limit: usize,
}

impl RowCursor {
    fn new(step: usize, limit: usize) -> RowCursor {
        RowCursor {
            next: if limit > 0 { Some(0) } else { None },
            step,
            limit,
        }
    }

    fn take(&mut self) -> Option<usize> {
        let row = self.next?;
        let following = row + self.step;
        self.next = if following >= self.limit { None } else { Some(following) };
        Some(row)
    }
}

/// The work-distribution state machine.
#[derive(Debug)]
pub struct Coordinator {
    cursor: RowCursor,
    workers: usize,
    stopped: usize,
    state: State,
}

impl Coordinator {
    /// Prepares to distribute an image `height` rows tall in blocks of
    /// `block_size` rows among `workers` workers.
    pub fn new(height: usize, block_size: usize, workers: usize) -> Result<Coordinator, Error> {
        validate_block_size(height, block_size)?;
        Ok(Coordinator {
            cursor: RowCursor::new(block_size, height),
            workers,
            stopped: 0,
            state: if workers == 0 { State::Done } else { State::Distributing },
        })
    }

    /// The current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// How many workers have been told to stop.
    pub fn stopped(&self) -> usize {
        self.stopped
    }

    /// Answers one work request.  A request with any body other than the
    /// request byte breaks the protocol and panics.
    pub fn handle(&mut self, request: &Payload) -> Assignment {
        assert_eq!(
            *request,
            Payload::Request(REQUEST_BODY),
            "malformed work request"
        );
        assert!(self.state != State::Done, "work requested after every worker stopped");
        match self.cursor.take() {
            Some(row) => Assignment::Start(row),
            None => {
                self.stopped += 1;
                self.state = if self.stopped == self.workers {
                    State::Done
                } else {
                    State::Draining
                };
                Assignment::Exhausted
            }
        }
    }

    /// Serves work requests arriving from any member until every worker
    /// has been told to stop.  Returns every reply sent, in order, along
    /// with the rank it was sent to.
    pub fn serve(mut self, endpoint: &mut Endpoint) -> Result<Vec<(usize, Assignment)>, Error> {
        info!(
            "Coordinating {} workers, {} rows per block",
            self.workers, self.cursor.step
        );
        let mut issued = vec![];
        while self.state != State::Done {
            let request = endpoint.recv(Source::Any, Tag::StartingLine)?;
            let before = self.state;
            let assignment = self.handle(&request.payload);
            match assignment {
                Assignment::Start(row) => debug!("Rows from {} go to process {}", row, request.source),
                Assignment::Exhausted => debug!(
                    "Process {} stopped ({} of {})",
                    request.source, self.stopped, self.workers
                ),
            }
            endpoint.send(request.source, Tag::StartingLine, assignment.to_payload())?;
            if self.state != before {
                info!("Coordinator is now {:?}", self.state);
            }
            issued.push((request.source, assignment));
        }
        Ok(issued)
    }
}
