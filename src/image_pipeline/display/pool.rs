//! Reusable output buffers keyed by frame size.
//!
//! The caller acquires a frame, the processor fills it through
//! `FrameProcessor::process_into`, and the caller releases it once the renderer
//! has consumed it. Frames of a size the pool has never seen are allocated on
//! demand.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::display::types::{DisplayFrame, display_len};

pub const DEFAULT_FRAMES_PER_SIZE: usize = 3;

pub struct DisplayFramePool {
    free: Mutex<HashMap<(usize, usize), Vec<DisplayFrame>>>,
    max_per_size: usize,
}

impl Default for DisplayFramePool {
    fn default() -> Self {
        Self::new(DEFAULT_FRAMES_PER_SIZE)
    }
}

impl DisplayFramePool {
    /// `max_per_size` caps how many idle frames are kept for each resolution.
    pub fn new(max_per_size: usize) -> Self {
        Self {
            free: Mutex::new(HashMap::new()),
            max_per_size,
        }
    }

    pub fn acquire(&self, width: usize, height: usize) -> Result<DisplayFrame> {
        if let Some(frame) = self
            .free
            .lock()
            .get_mut(&(width, height))
            .and_then(Vec::pop)
        {
            trace!("Reusing pooled {}x{} frame", width, height);
            return Ok(frame);
        }
        debug!("Allocating {}x{} display frame", width, height);
        DisplayFrame::zeroed(width, height)
    }

    /// Returns a frame to the pool. Frames whose buffer no longer matches their
    /// dimensions are dropped.
    pub fn release(&self, frame: DisplayFrame) {
        let intact = display_len(frame.width, frame.height)
            .map(|len| len == frame.data.len())
            .unwrap_or(false);
        if !intact {
            debug!("Dropping resized {}x{} frame", frame.width, frame.height);
            return;
        }

        let mut free = self.free.lock();
        let slot = free.entry((frame.width, frame.height)).or_default();
        if slot.len() < self.max_per_size {
            slot.push(frame);
        }
    }

    pub fn available(&self, width: usize, height: usize) -> usize {
        self.free
            .lock()
            .get(&(width, height))
            .map_or(0, Vec::len)
    }

    pub fn clear(&self) {
        self.free.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn released_frames_are_reused_per_size() {
        let pool = DisplayFramePool::new(2);
        let mut frame = pool.acquire(4, 2).unwrap();
        assert_eq!(frame.data.len(), 32);
        frame.data[0] = 9;
        pool.release(frame);

        assert_eq!(pool.available(4, 2), 1);
        assert_eq!(pool.available(2, 4), 0);

        let again = pool.acquire(4, 2).unwrap();
        assert_eq!(again.data[0], 9);
        assert_eq!(pool.available(4, 2), 0);

        let other = pool.acquire(2, 4).unwrap();
        assert_eq!(other.width, 2);
    }

    #[test]
    fn idle_frames_are_capped() {
        let pool = DisplayFramePool::new(1);
        let a = pool.acquire(2, 2).unwrap();
        let b = pool.acquire(2, 2).unwrap();
        pool.release(a);
        pool.release(b);
        assert_eq!(pool.available(2, 2), 1);

        pool.clear();
        assert_eq!(pool.available(2, 2), 0);
    }

    #[test]
    fn tampered_frames_are_not_pooled() {
        let pool = DisplayFramePool::default();
        let mut frame = pool.acquire(2, 2).unwrap();
        frame.data.truncate(3);
        pool.release(frame);
        assert_eq!(pool.available(2, 2), 0);
    }
}
