//! `RequestQueue` — pending requests in service order.
//!
//! New customer requests join at the back.  Requests recovered from an
//! evicted robot jump to the front, so they are served before anything that
//! was already waiting.

use std::collections::VecDeque;

use crate::Request;

#[derive(Debug, Default)]
pub struct RequestQueue {
    inner: VecDeque<Request>,
}

impl RequestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new customer request.
    pub fn enqueue(&mut self, request: Request) {
        self.inner.push_back(request);
    }

    /// Put a recovered request ahead of every queued one.
    pub fn requeue_with_priority(&mut self, request: Request) {
        self.inner.push_front(request);
    }

    /// Remove and return every pending request, front first.
    pub fn drain(&mut self) -> Vec<Request> {
        self.inner.drain(..).collect()
    }

    /// Return requests a dispatch pass could not place.  They go back to the
    /// front in their original relative order.
    pub fn restore_front(&mut self, requests: Vec<Request>) {
        for request in requests.into_iter().rev() {
            self.inner.push_front(request);
        }
    }

    pub fn front(&self) -> Option<&Request> {
        self.inner.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Request> + '_ {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
