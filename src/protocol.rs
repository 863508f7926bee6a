// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The vocabulary shared by the coordinator and the workers.

use errors::Error;
use transport::Payload;

/// The rank of the member that hands out work and owns the final image.
pub const COORDINATOR: usize = 0;

/// The only valid body of a work request.
pub const REQUEST_BODY: u8 = b's';

/// The wire value meaning "no more work."
pub const EXHAUSTED: i32 = -1;

/// The coordinator's answer to one work request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Assignment {
    /// Render a block starting at this row.
    Start(usize),
    /// Every row has been handed out; stop asking.
    Exhausted,
}

impl Assignment {
    /// Encodes the assignment as a starting-line message.
    pub fn to_payload(self) -> Payload {
        match self {
            Assignment::Start(row) => Payload::Line(row as i32),
            Assignment::Exhausted => Payload::Line(EXHAUSTED),
        }
    }

    /// Decodes a starting-line message.  Anything other than a starting
    /// line or the sentinel breaks the protocol.
    pub fn from_payload(payload: &Payload) -> Assignment {
        match *payload {
            Payload::Line(EXHAUSTED) => Assignment::Exhausted,
            Payload::Line(row) if row >= 0 => Assignment::Start(row as usize),
            ref other => panic!("expected a starting line, got {:?}", other),
        }
    }
}

/// The message a worker sends to ask for work.
pub fn work_request() -> Payload {
    Payload::Request(REQUEST_BODY)
}

/// Checks that `block_size` is usable for an image `height` rows tall.
pub fn validate_block_size(height: usize, block_size: usize) -> Result<(), Error> {
    if block_size == 0 || height % block_size != 0 {
        return Err(Error::BlockSize { block_size, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignments_use_the_sentinel_on_the_wire() {
        assert_eq!(Assignment::Start(12).to_payload(), Payload::Line(12));
        assert_eq!(Assignment::Exhausted.to_payload(), Payload::Line(-1));
        assert_eq!(Assignment::from_payload(&Payload::Line(-1)), Assignment::Exhausted);
        assert_eq!(Assignment::from_payload(&Payload::Line(0)), Assignment::Start(0));
    }

    #[test]
    #[should_panic]
    fn other_negative_lines_break_the_protocol() {
        Assignment::from_payload(&Payload::Line(-4));
    }

    #[test]
    #[should_panic]
    fn other_payloads_break_the_protocol() {
        Assignment::from_payload(&Payload::BlockSize(4));
    }

    #[test]
    fn block_sizes_must_divide_the_height() {
        assert!(validate_block_size(1024, 4).is_ok());
        assert!(validate_block_size(1024, 1024).is_ok());
        assert!(validate_block_size(16, 1).is_ok());
        assert!(validate_block_size(1024, 3).is_err());
        assert!(validate_block_size(1024, 2048).is_err());
        assert!(validate_block_size(1024, 0).is_err());
    }
}
