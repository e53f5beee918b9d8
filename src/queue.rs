use anyhow::{Context, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone)]
struct TrackNode {
    name: String,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Doubly-linked playback queue over an index arena. Links are slot indices
/// into `slots`; freed slots go on the `free` stack and are only ever reused
/// by `add`, so no link can dangle.
#[derive(Debug)]
pub struct PlaybackQueue {
    slots: Vec<TrackNode>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    cursor: Option<usize>,
    len: usize,
    shuffle_enabled: bool,
    rng: SmallRng,
}

impl PlaybackQueue {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_os_rng())
    }

    /// Deterministic shuffle selection for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            cursor: None,
            len: 0,
            shuffle_enabled: false,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn shuffle_enabled(&self) -> bool {
        self.shuffle_enabled
    }

    pub fn toggle_shuffle(&mut self) {
        self.shuffle_enabled = !self.shuffle_enabled;
    }

    pub fn set_shuffle(&mut self, enabled: bool) {
        self.shuffle_enabled = enabled;
    }

    /// Appends a track at the tail. The first track added to an empty queue
    /// also becomes the cursor; otherwise the cursor stays put. Duplicate
    /// names are allowed and kept as separate tracks.
    pub fn add(&mut self, name: &str) {
        let node = TrackNode {
            name: name.to_string(),
            prev: self.tail,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = node;
                slot
            }
            None => {
                self.slots.push(node);
                self.slots.len() - 1
            }
        };

        match self.tail {
            Some(tail) => self.slots[tail].next = Some(idx),
            None => {
                self.head = Some(idx);
                self.cursor = Some(idx);
            }
        }
        self.tail = Some(idx);
        self.len += 1;
    }

    /// Removes the first track whose name matches exactly. Returns false if
    /// no track matched. If the cursor sat on the removed track it moves to
    /// the successor, falling back to the predecessor, then to none.
    pub fn remove(&mut self, name: &str) -> bool {
        let mut walk = self.head;
        while let Some(idx) = walk {
            if self.slots[idx].name == name {
                self.unlink(idx);
                return true;
            }
            walk = self.slots[idx].next;
        }
        false
    }

    fn unlink(&mut self, idx: usize) {
        let prev = self.slots[idx].prev;
        let next = self.slots[idx].next;

        match prev {
            Some(p) => self.slots[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.slots[n].prev = prev,
            None => self.tail = prev,
        }
        if self.cursor == Some(idx) {
            self.cursor = next.or(prev);
        }

        self.slots[idx].name.clear();
        self.slots[idx].prev = None;
        self.slots[idx].next = None;
        self.free.push(idx);
        self.len -= 1;
    }

    /// Moves the cursor forward. With shuffle on, picks uniformly among all
    /// tracks except the current one; a single-track or empty queue stays
    /// put. With shuffle off, follows the chain and sticks at the tail.
    pub fn advance(&mut self) {
        if self.shuffle_enabled {
            let candidates: Vec<usize> = self
                .chain_indices()
                .into_iter()
                .filter(|&idx| Some(idx) != self.cursor)
                .collect();
            if candidates.is_empty() {
                return;
            }
            self.cursor = Some(candidates[self.rng.random_range(0..candidates.len())]);
        } else if let Some(idx) = self.cursor
            && let Some(next) = self.slots[idx].next
        {
            self.cursor = Some(next);
        }
    }

    /// Moves the cursor to its chain predecessor and sticks at the head.
    /// Shuffle governs only forward discovery; going back always follows
    /// the static chain.
    pub fn retreat(&mut self) {
        if let Some(idx) = self.cursor
            && let Some(prev) = self.slots[idx].prev
        {
            self.cursor = Some(prev);
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.cursor.map(|idx| self.slots[idx].name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        let mut walk = self.head;
        while let Some(idx) = walk {
            if self.slots[idx].name == name {
                return true;
            }
            walk = self.slots[idx].next;
        }
        false
    }

    /// Track names in chain order, head to tail. Recomputed on every call.
    pub fn snapshot(&self) -> Vec<String> {
        self.chain_indices()
            .into_iter()
            .map(|idx| self.slots[idx].name.clone())
            .collect()
    }

    fn chain_indices(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.len);
        let mut walk = self.head;
        while let Some(idx) = walk {
            out.push(idx);
            walk = self.slots[idx].next;
        }
        out
    }

    /// Drops every track. Shuffle flag and RNG state survive.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.cursor = None;
        self.len = 0;
    }

    /// Writes one name per line, newline-terminated, in chain order. A name
    /// containing a newline cannot round-trip through this format.
    pub fn export(&self, mut sink: impl Write) -> io::Result<()> {
        let mut walk = self.head;
        while let Some(idx) = walk {
            writeln!(sink, "{}", self.slots[idx].name)?;
            walk = self.slots[idx].next;
        }
        Ok(())
    }

    /// Replaces the queue contents with the lines of `source`, in order,
    /// skipping empty lines. The queue is cleared up front, so a read error
    /// mid-stream leaves it partially populated.
    pub fn import(&mut self, source: impl BufRead) -> io::Result<()> {
        self.clear();
        for line in source.lines() {
            let line = line?;
            let name = line.trim_end_matches('\r');
            if name.is_empty() {
                continue;
            }
            self.add(name);
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        let mut sink = BufWriter::new(file);
        self.export(&mut sink)
            .with_context(|| format!("failed to write {}", path.display()))?;
        sink.flush()
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn load_from(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        self.import(BufReader::new(file))
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(())
    }
}

impl Default for PlaybackQueue {
    fn default() -> Self {
        Self::new()
    }
}
