// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A fixed-size process group with reliable, ordered point-to-point
//! delivery, a broadcast, and an element-wise max reduction.
//!
//! Every member owns one `Endpoint`.  Each endpoint has a single inbox
//! and a sender into the inbox of every other member; messages are
//! tagged, and a receive names the tag and either a specific source or
//! any source.  Messages that arrive before anyone asks for them are
//! parked, in arrival order, until a matching receive comes along, so
//! two messages from the same sender are always seen in the order they
//! were sent.

use crossbeam::channel::{unbounded, Receiver, Sender};
use std::collections::VecDeque;

use buffer::PixelBuffer;
use errors::Error;

/// Separates the conversations that share an inbox.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tag {
    /// The one-time distribution of the block size.
    BlockSize,
    /// Work requests and the assignments sent in reply.
    StartingLine,
    /// Buffers contributed to the final reduction.
    Reduce,
}

/// The body of a message.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// A single request byte.
    Request(u8),
    /// A starting line, or the exhaustion sentinel.
    Line(i32),
    /// The number of rows in every unit of work.
    BlockSize(usize),
    /// A member's pixels.
    Pixels(PixelBuffer),
}

/// Which sender a receive will accept.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// The first matching message from anyone.
    Any,
    /// Only messages from this rank.
    Rank(usize),
}

/// A delivered message, stamped with the rank that sent it.
#[derive(Clone, Debug)]
pub struct Envelope {
    /// Rank of the sender.
    pub source: usize,
    /// The conversation the message belongs to.
    pub tag: Tag,
    /// The message itself.
    pub payload: Payload,
}

impl Envelope {
    fn matches(&self, source: Source, tag: Tag) -> bool {
        self.tag == tag
            && match source {
                Source::Any => true,
                Source::Rank(r) => self.source == r,
            }
    }
}

/// One member's connection to the group.
pub struct Endpoint {
    rank: usize,
    // Indexed by rank; there is no sender to our own inbox.
    peers: Vec<Option<Sender<Envelope>>>,
    inbox: Receiver<Envelope>,
    parked: VecDeque<Envelope>,
}

/// Builds a group of `size` members and returns their endpoints, the
/// endpoint for rank `r` at index `r`.
pub fn group(size: usize) -> Vec<Endpoint> {
    let (senders, receivers): (Vec<_>, Vec<_>) = (0..size).map(|_| unbounded::<Envelope>()).unzip();
    receivers
        .into_iter()
        .enumerate()
        .map(|(rank, inbox)| Endpoint {
            rank,
            peers: senders
                .iter()
                .enumerate()
                .map(|(peer, s)| if peer == rank { None } else { Some(s.clone()) })
                .collect(),
            inbox,
            parked: VecDeque::new(),
        })
        .collect()
}

impl Endpoint {
    /// This member's rank.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// The number of members in the group.
    pub fn size(&self) -> usize {
        self.peers.len()
    }

    /// Queues a message for `dest`.  Never blocks.
    pub fn send(&self, dest: usize, tag: Tag, payload: Payload) -> Result<(), Error> {
        let peer = match self.peers.get(dest) {
            Some(Some(peer)) => peer,
            _ => return Err(Error::Disconnected(dest)),
        };
        peer.send(Envelope {
            source: self.rank,
            tag,
            payload,
        })
        .map_err(|_| Error::Disconnected(dest))
    }

    /// Blocks until a message with the given tag arrives from the given
    /// source, and returns it.
    pub fn recv(&mut self, source: Source, tag: Tag) -> Result<Envelope, Error> {
        if let Some(i) = self.parked.iter().position(|e| e.matches(source, tag)) {
            if let Some(envelope) = self.parked.remove(i) {
                return Ok(envelope);
            }
        }
        loop {
            let envelope = self.inbox.recv().map_err(|_| {
                Error::Disconnected(match source {
                    Source::Rank(r) => r,
                    Source::Any => self.rank,
                })
            })?;
            if envelope.matches(source, tag) {
                return Ok(envelope);
            }
            trace!(
                "Process {} parked a {:?} message from {}",
                self.rank,
                envelope.tag,
                envelope.source
            );
            self.parked.push_back(envelope);
        }
    }

    /// Distributes a value from `root` to every member.  The root passes
    /// `Some(value)`; everyone else passes `None` and gets the root's
    /// value back.
    pub fn broadcast(&mut self, root: usize, value: Option<Payload>) -> Result<Payload, Error> {
        if self.rank == root {
            let value = match value {
                Some(value) => value,
                None => panic!("process {} is the broadcast root but has no value", root),
            };
            for dest in (0..self.size()).filter(|r| *r != root) {
                self.send(dest, Tag::BlockSize, value.clone())?;
            }
            Ok(value)
        } else {
            Ok(self.recv(Source::Rank(root), Tag::BlockSize)?.payload)
        }
    }

    /// Combines every member's buffer cell by cell, keeping the
    /// channel-wise maximum.  Every member must call this; only `root`
    /// receives the combined buffer, and it does not return until every
    /// other member has contributed.
    pub fn reduce_max(&mut self, root: usize, buffer: PixelBuffer) -> Result<Option<PixelBuffer>, Error> {
        if self.rank != root {
            self.send(root, Tag::Reduce, Payload::Pixels(buffer))?;
            return Ok(None);
        }
        let mut combined = buffer;
        for source in (0..self.size()).filter(|r| *r != root) {
            match self.recv(Source::Rank(source), Tag::Reduce)?.payload {
                Payload::Pixels(contribution) => combined.max_combine(&contribution),
                other => panic!("process {} contributed {:?} to a reduction", source, other),
            }
        }
        Ok(Some(combined))
    }
}
