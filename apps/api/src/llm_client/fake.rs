//! Deterministic `TextJudge` for tests. Routes each prompt to fixture replies by
//! the first registered marker substring the prompt contains.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::llm_client::{LlmError, TextJudge};

#[derive(Clone)]
enum Reply {
    Text(String),
    Unavailable,
}

struct Route {
    marker: String,
    /// Consumed front to back; the last reply repeats once the queue drains.
    replies: VecDeque<Reply>,
    calls: usize,
}

#[derive(Default)]
pub struct FakeJudge {
    routes: Mutex<Vec<Route>>,
    calls: AtomicUsize,
    /// Simulated latency applied to every reply.
    delay: Option<Duration>,
}

impl FakeJudge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answers prompts containing `marker` with `body`.
    pub fn respond(self, marker: &str, body: impl Into<String>) -> Self {
        self.route(marker, vec![Reply::Text(body.into())])
    }

    /// Answers successive matching prompts with `bodies` in order.
    pub fn respond_sequence<S: Into<String>>(self, marker: &str, bodies: Vec<S>) -> Self {
        self.route(
            marker,
            bodies.into_iter().map(|b| Reply::Text(b.into())).collect(),
        )
    }

    /// Simulates a 503 from the completion service.
    pub fn unavailable(self, marker: &str) -> Self {
        self.route(marker, vec![Reply::Unavailable])
    }

    /// Every reply takes `delay` of tokio time to arrive.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Total calls across all routes.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Calls answered by the route registered under `marker`.
    pub fn calls_for(&self, marker: &str) -> usize {
        self.routes
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.marker == marker)
            .map(|r| r.calls)
            .unwrap_or(0)
    }

    fn route(self, marker: &str, replies: Vec<Reply>) -> Self {
        self.routes.lock().unwrap().push(Route {
            marker: marker.to_string(),
            replies: replies.into(),
            calls: 0,
        });
        self
    }
}

#[async_trait]
impl TextJudge for FakeJudge {
    async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let reply = {
            let mut routes = self.routes.lock().unwrap();
            let route = routes
                .iter_mut()
                .find(|r| prompt.contains(&r.marker))
                .unwrap_or_else(|| panic!("FakeJudge has no route for prompt:\n{prompt}"));
            route.calls += 1;
            if route.replies.len() > 1 {
                route.replies.pop_front()
            } else {
                route.replies.front().cloned()
            }
        };

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match reply {
            Some(Reply::Text(body)) => Ok(body),
            Some(Reply::Unavailable) => Err(LlmError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            }),
            None => Err(LlmError::EmptyContent),
        }
    }
}
