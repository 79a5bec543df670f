// src/crawl/frontier.rs
// =============================================================================
// The frontier: URLs waiting to be fetched, plus every URL already taken.
//
// How it works:
// 1. The seed URL starts out queued
// 2. `next()` pops the oldest queued URL and marks it visited in the same step
// 3. `push()` refuses anything visited or already waiting
// 4. Once `max_pages` URLs have been visited, `next()` returns None even if
//    the queue still holds URLs
//
// Invariants:
// - queued and visited never overlap
// - a URL is never in the queue twice
// - a URL is handed out at most once, so it is fetched at most once
//
// Rust concepts:
// - VecDeque: FIFO queue, giving breadth-first order
// - HashSet: O(1) membership checks for both queued and visited
// =============================================================================

use std::collections::{HashSet, VecDeque};

use super::normalize::NormalizedUrl;

#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<NormalizedUrl>,
    queued: HashSet<NormalizedUrl>,
    visited: HashSet<NormalizedUrl>,
    max_pages: usize,
}

impl Frontier {
    pub fn new(seed: NormalizedUrl, max_pages: usize) -> Self {
        let mut frontier = Frontier {
            queue: VecDeque::new(),
            queued: HashSet::new(),
            visited: HashSet::new(),
            max_pages,
        };
        frontier.push(seed);
        frontier
    }

    /// Queues a discovered URL. Returns false if it was already visited or
    /// already waiting.
    pub fn push(&mut self, url: NormalizedUrl) -> bool {
        if self.visited.contains(&url) || self.queued.contains(&url) {
            return false;
        }
        self.queued.insert(url.clone());
        self.queue.push_back(url);
        true
    }

    /// Takes the next URL to fetch and marks it visited before returning it.
    pub fn next(&mut self) -> Option<NormalizedUrl> {
        if self.budget_exhausted() {
            return None;
        }
        let url = self.queue.pop_front()?;
        self.queued.remove(&url);
        self.visited.insert(url.clone());
        Some(url)
    }

    pub fn budget_exhausted(&self) -> bool {
        self.visited.len() >= self.max_pages
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }
}
