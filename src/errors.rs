// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The single error type shared by every part of the renderer.
//! Protocol violations are not represented here: a member that
//! receives a message it cannot interpret panics.

use failure::Fail;
use std::io;

/// Everything that can go wrong during a run.
#[derive(Debug, Fail)]
pub enum Error {
    /// The block size is zero or does not evenly divide the image height.
    #[fail(
        display = "Block size {} does not evenly divide the image height {}",
        block_size, height
    )]
    BlockSize {
        /// The rejected block size.
        block_size: usize,
        /// The height of the image being rendered.
        height: usize,
    },

    /// The process group is too small to have a coordinator and a worker.
    #[fail(display = "A process group needs at least 2 members, got {}", _0)]
    GroupSize(usize),

    /// The image dimensions or the zoom factor cannot describe a plane.
    #[fail(display = "Invalid viewport: {}", _0)]
    Viewport(String),

    /// The block size could not be read from the interactive prompt.
    #[fail(display = "Could not read the block size: {}", _0)]
    Prompt(String),

    /// A peer of the process group can no longer be reached.
    #[fail(display = "Process {} of the group is unreachable", _0)]
    Disconnected(usize),

    /// A member of the process group panicked.
    #[fail(display = "Process {} of the group panicked", _0)]
    Panicked(usize),

    /// The final image could not be written.
    #[fail(display = "Could not encode the image: {}", _0)]
    Encoding(#[cause] io::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Encoding(err)
    }
}
