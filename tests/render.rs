// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate image;
extern crate mandelfarm;
extern crate tempfile;

use image::GenericImageView;
use mandelfarm::{Assignment, Config};

fn config(output: Option<std::path::PathBuf>) -> Config {
    Config {
        width: 16,
        height: 16,
        processes: 3,
        output,
        ..Config::default()
    }
}

#[test]
fn one_coordinator_and_two_workers_render_a_small_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("small.png");
    let outcome = mandelfarm::render(&config(Some(path.clone())), 4).unwrap();

    let starts: Vec<usize> = outcome
        .assignments
        .iter()
        .filter_map(|&(_, a)| match a {
            Assignment::Start(row) => Some(row),
            Assignment::Exhausted => None,
        })
        .collect();
    assert_eq!(starts, vec![0, 4, 8, 12]);

    let mut stopped: Vec<usize> = outcome
        .assignments
        .iter()
        .filter(|&&(_, a)| a == Assignment::Exhausted)
        .map(|&(rank, _)| rank)
        .collect();
    stopped.sort();
    assert_eq!(stopped, vec![1, 2]);

    // No worker is stopped while blocks remain.
    let first_stop = outcome
        .assignments
        .iter()
        .position(|&(_, a)| a == Assignment::Exhausted)
        .unwrap();
    assert_eq!(first_stop, 4);

    assert_eq!(outcome.image.len(), 256);
    assert_eq!(outcome.image.unrendered(), 0);
    for row in 0..16 {
        assert!(outcome.image.row(row).iter().all(|p| p.r > 0 && p.g > 0 && p.b > 0));
    }

    assert!(outcome.written);
    let decoded = image::open(&path).unwrap();
    assert_eq!(decoded.dimensions(), (16, 16));
    assert_eq!(decoded.to_rgba().into_raw(), outcome.image.to_rgba_bytes());
}

#[test]
fn the_image_does_not_depend_on_the_block_size() {
    // Colors depend on which worker drew a row, so use a single worker.
    let single = Config {
        processes: 2,
        ..config(None)
    };
    let whole = mandelfarm::render(&single, 16).unwrap();
    let blocks = mandelfarm::render(&single, 1).unwrap();
    assert_eq!(whole.image, blocks.image);
    assert_eq!(blocks.assignments.len(), 17);
}

#[test]
fn encoding_failures_do_not_fail_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no").join("such").join("dir.png");
    let outcome = mandelfarm::render(&config(Some(path.clone())), 8).unwrap();
    assert!(!outcome.written);
    assert_eq!(outcome.image.unrendered(), 0);
    assert!(!path.exists());
}
