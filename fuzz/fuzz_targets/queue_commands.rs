#![no_main]

use libfuzzer_sys::fuzz_target;
use playdeck::app::{CommandOutcome, Session, run_command};
use playdeck::queue::PlaybackQueue;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut session = Session {
        queue: PlaybackQueue::with_seed(0),
        last_playlist: None,
    };

    for line in text.lines() {
        // Keep the fuzzer off the filesystem.
        let trimmed = line.trim_start();
        if trimmed.starts_with("save") || trimmed.starts_with("load") {
            continue;
        }
        if run_command(&mut session, line) == CommandOutcome::Quit {
            break;
        }
    }
});
