//! Review service: per-account `load -> answer -> snapshot -> save`.
//!
//! Every operation that touches an account's queue holds that account's
//! lock for the whole round trip, so two callers answering for the same
//! learner never interleave. Different accounts do not contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use review_queue::{grade, Grade, Question, ReviewQueue, Review, ReviewStats};
use serde::Serialize;

use crate::config::ReviewSettings;
use crate::error::{Result, ServiceError};
use crate::store::StateStore;

/// Outcome of answering the current question.
#[derive(Debug, Clone, Serialize)]
pub struct Answered {
    pub question: Question,
    pub review: Review,
    /// The question now due, if any.
    pub next: Option<Question>,
}

/// One entry of the upcoming order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Upcoming {
    pub prompt: String,
    pub weight: u32,
}

/// Summary of an account's queue.
#[derive(Debug, Clone, Serialize)]
pub struct Status {
    pub total: usize,
    pub stats: ReviewStats,
    pub upcoming: Vec<Upcoming>,
}

pub struct ReviewService<S> {
    store: S,
    settings: ReviewSettings,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S: StateStore<Question>> ReviewService<S> {
    pub fn new(store: S, settings: ReviewSettings) -> Self {
        Self {
            store,
            settings,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn settings(&self) -> &ReviewSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn account_lock(&self, account: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().expect("lock registry");
        locks
            .entry(account.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn load_queue(&self, account: &str) -> Result<ReviewQueue<Question>> {
        let state = self
            .store
            .load(account)?
            .ok_or_else(|| ServiceError::NotEnrolled(account.to_string()))?;
        let queue = ReviewQueue::load(state)?.with_miss_policy(self.settings.miss_policy);
        Ok(queue)
    }

    /// Run `f` against the account's queue and persist the result.
    ///
    /// Nothing is saved when `f` fails.
    fn with_queue<T>(
        &self,
        account: &str,
        f: impl FnOnce(&mut ReviewQueue<Question>) -> Result<T>,
    ) -> Result<T> {
        let lock = self.account_lock(account);
        let _guard = lock.lock().expect("account lock");

        let mut queue = self.load_queue(account)?;
        let value = f(&mut queue)?;
        self.store.save(account, &queue.into_state())?;
        Ok(value)
    }

    fn read_queue<T>(&self, account: &str, f: impl FnOnce(&ReviewQueue<Question>) -> T) -> Result<T> {
        let lock = self.account_lock(account);
        let _guard = lock.lock().expect("account lock");

        let queue = self.load_queue(account)?;
        Ok(f(&queue))
    }

    /// Create a fresh queue for `account` from `questions`, in order.
    ///
    /// Returns the number of questions enrolled.
    pub fn enroll(&self, account: &str, questions: Vec<Question>, replace: bool) -> Result<usize> {
        let lock = self.account_lock(account);
        let _guard = lock.lock().expect("account lock");

        if !replace && self.store.load(account)?.is_some() {
            return Err(ServiceError::AlreadyEnrolled(account.to_string()));
        }

        let queue = ReviewQueue::new(questions);
        let total = queue.len();
        self.store.save(account, &queue.into_state())?;

        tracing::info!(account, total, replace, "enrolled");
        Ok(total)
    }

    /// The question due next.
    pub fn current(&self, account: &str) -> Result<Question> {
        self.read_queue(account, |queue| queue.peek().map(|item| item.content.clone()))?
            .map_err(ServiceError::from)
    }

    /// Record a self-graded answer for the current question.
    pub fn answer(&self, account: &str, correct: bool) -> Result<Answered> {
        self.with_queue(account, |queue| {
            let question = queue.peek()?.content.clone();
            let review = queue.record_answer(correct)?;
            let next = queue.peek().ok().map(|item| item.content.clone());
            Ok(Answered {
                question,
                review,
                next,
            })
        })
    }

    /// Grade a typed answer for the current question, then record it.
    pub fn answer_typed(&self, account: &str, typed: &str) -> Result<(Grade, Answered)> {
        let settings = self.settings;
        self.with_queue(account, |queue| {
            let question = queue.peek()?.content.clone();
            let grade = grade(
                typed,
                &question.answer,
                settings.matching_mode,
                settings.fuzzy_threshold,
            );
            let review = queue.record_answer(grade.correct)?;
            let next = queue.peek().ok().map(|item| item.content.clone());
            Ok((
                grade,
                Answered {
                    question,
                    review,
                    next,
                },
            ))
        })
    }

    /// Counters and the first `limit` questions in presentation order.
    pub fn status(&self, account: &str, limit: usize) -> Result<Status> {
        self.read_queue(account, |queue| Status {
            total: queue.len(),
            stats: queue.stats(),
            upcoming: queue
                .iter()
                .take(limit)
                .map(|(_, item)| Upcoming {
                    prompt: item.content.prompt.clone(),
                    weight: item.weight,
                })
                .collect(),
        })
    }

    /// Delete the account's queue. Returns whether one existed.
    pub fn withdraw(&self, account: &str) -> Result<bool> {
        let lock = self.account_lock(account);
        let _guard = lock.lock().expect("account lock");

        let removed = self.store.remove(account)?;
        if removed {
            tracing::info!(account, "withdrew");
        }
        Ok(removed)
    }
}
