//! Index-linked review queue with doubling reinsertion.
//!
//! Items live in a fixed slot array and are chained through `next` indices.
//! A correct answer doubles the head's weight `w` and splices it back in `w`
//! links further down the chain, so well-known items drift towards the tail
//! while missed ones stay near the front. Distance in the chain stands in for
//! elapsed time; there is no clock involved.

use crate::error::{Corruption, QueueError, Result};
use crate::types::{Item, MissPolicy, QueueState, Review, ReviewStats};

/// A learner's review queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewQueue<C> {
    items: Vec<Item<C>>,
    current: Option<usize>,
    stats: ReviewStats,
    miss_policy: MissPolicy,
}

impl<C> ReviewQueue<C> {
    /// Build a forward chain over `contents` in the order given.
    pub fn new(contents: impl IntoIterator<Item = C>) -> Self {
        let mut items: Vec<Item<C>> = contents
            .into_iter()
            .enumerate()
            .map(|(index, content)| Item::new(content, Some(index + 1)))
            .collect();
        if let Some(tail) = items.last_mut() {
            tail.next = None;
        }
        let current = if items.is_empty() { None } else { Some(0) };

        Self {
            items,
            current,
            stats: ReviewStats::default(),
            miss_policy: MissPolicy::default(),
        }
    }

    /// Rebuild a queue from persisted state, rejecting structural damage.
    ///
    /// An empty item list always loads as an exhausted queue. A non-empty list
    /// without a cursor starts from slot 0.
    pub fn load(state: QueueState<C>) -> Result<Self> {
        let stats = state.stats();
        let QueueState { items, current, .. } = state;

        let current = if items.is_empty() {
            None
        } else {
            Some(current.unwrap_or(0))
        };

        if let Err(corruption) = check_chain(&items, current) {
            tracing::warn!(%corruption, "rejecting queue state");
            return Err(corruption.into());
        }

        Ok(Self {
            items,
            current,
            stats,
            miss_policy: MissPolicy::default(),
        })
    }

    pub fn with_miss_policy(mut self, policy: MissPolicy) -> Self {
        self.miss_policy = policy;
        self
    }

    pub fn miss_policy(&self) -> MissPolicy {
        self.miss_policy
    }

    /// The item due next.
    pub fn peek(&self) -> Result<&Item<C>> {
        let head = self.current.ok_or(QueueError::Exhausted)?;
        Ok(&self.items[head])
    }

    /// Slot of the item due next.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Record the learner's answer to the head item and reschedule it.
    pub fn record_answer(&mut self, correct: bool) -> Result<Review> {
        let head = self.current.ok_or(QueueError::Exhausted)?;

        let review = if correct {
            self.stats.correct = self.stats.correct.saturating_add(1);
            self.promote(head)
        } else {
            self.stats.incorrect = self.stats.incorrect.saturating_add(1);
            self.hold_back(head)
        };

        debug_assert!(
            self.validate().is_ok(),
            "chain broken after answering slot {head}"
        );
        Ok(review)
    }

    fn promote(&mut self, head: usize) -> Review {
        let weight = self.items[head].weight.saturating_mul(2);
        self.items[head].weight = weight;

        // A lone item has nowhere to go and stays at the head.
        let Some(successor) = self.items[head].next else {
            tracing::debug!(index = head, weight, "sole item kept at head");
            return Review {
                index: head,
                correct: true,
                weight,
                due_in: 0,
            };
        };
        self.current = Some(successor);

        let hops_wanted = usize::try_from(weight).unwrap_or(usize::MAX);
        let mut landing = head;
        let mut hops = 0;
        while hops < hops_wanted {
            match self.items[landing].next {
                Some(next) => {
                    landing = next;
                    hops += 1;
                }
                None => break,
            }
        }

        // When the walk ran off the end, `landing` is the old tail and
        // `after` is None, which makes the head the new tail.
        let after = self.items[landing].next;
        self.items[landing].next = Some(head);
        self.items[head].next = after;

        tracing::debug!(
            index = head,
            weight,
            after = landing,
            due_in = hops,
            "reinserted item"
        );
        Review {
            index: head,
            correct: true,
            weight,
            due_in: hops,
        }
    }

    fn hold_back(&mut self, head: usize) -> Review {
        let weight = self.items[head].weight;
        let due_in = match (self.miss_policy, self.items[head].next) {
            (MissPolicy::Advance, Some(successor)) => {
                self.items[head].next = self.items[successor].next;
                self.items[successor].next = Some(head);
                self.current = Some(successor);
                1
            }
            _ => 0,
        };

        tracing::debug!(index = head, due_in, policy = self.miss_policy.as_str(), "missed item");
        Review {
            index: head,
            correct: false,
            weight,
            due_in,
        }
    }

    /// Copy of the full state for persistence.
    pub fn snapshot(&self) -> QueueState<C>
    where
        C: Clone,
    {
        QueueState {
            items: self.items.clone(),
            current: self.current,
            correct: self.stats.correct,
            incorrect: self.stats.incorrect,
        }
    }

    /// Consume the queue into its persisted state.
    pub fn into_state(self) -> QueueState<C> {
        QueueState {
            items: self.items,
            current: self.current,
            correct: self.stats.correct,
            incorrect: self.stats.incorrect,
        }
    }

    /// Re-check the chain invariants on a live queue.
    pub fn validate(&self) -> Result<()> {
        check_chain(&self.items, self.current).map_err(QueueError::from)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.current.is_none()
    }

    pub fn stats(&self) -> ReviewStats {
        self.stats
    }

    /// Item in slot `index`, regardless of chain position.
    pub fn get(&self, index: usize) -> Option<&Item<C>> {
        self.items.get(index)
    }

    /// Slots in presentation order.
    pub fn order(&self) -> Order<'_, C> {
        Order {
            items: &self.items,
            cursor: self.current,
        }
    }

    /// Items in presentation order, paired with their slots.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Item<C>)> + '_ {
        self.order().map(move |index| (index, &self.items[index]))
    }

    /// How many reviews away slot `index` is (0 for the head).
    pub fn position_of(&self, index: usize) -> Option<usize> {
        self.order().position(|slot| slot == index)
    }
}

/// Iterator over slots following `next` links from the head.
pub struct Order<'a, C> {
    items: &'a [Item<C>],
    cursor: Option<usize>,
}

impl<C> Iterator for Order<'_, C> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let index = self.cursor?;
        self.cursor = self.items[index].next;
        Some(index)
    }
}

fn check_chain<C>(items: &[Item<C>], current: Option<usize>) -> std::result::Result<(), Corruption> {
    let len = items.len();
    let Some(head) = current else {
        return Ok(());
    };
    if head >= len {
        return Err(Corruption::CurrentOutOfRange { current: head, len });
    }

    let mut tails = 0;
    for (index, item) in items.iter().enumerate() {
        if item.weight == 0 {
            return Err(Corruption::ZeroWeight { index });
        }
        match item.next {
            Some(next) if next == index => return Err(Corruption::SelfLink { index }),
            Some(next) if next >= len => {
                return Err(Corruption::NextOutOfRange { index, next, len })
            }
            Some(_) => {}
            None => tails += 1,
        }
    }
    if tails != 1 {
        return Err(Corruption::TailCount { tails });
    }

    let mut seen = vec![false; len];
    let mut reachable = 0;
    let mut cursor = Some(head);
    while let Some(index) = cursor {
        if seen[index] {
            return Err(Corruption::Cycle { index });
        }
        seen[index] = true;
        reachable += 1;
        cursor = items[index].next;
    }
    if reachable != len {
        return Err(Corruption::Unreachable { reachable, len });
    }

    Ok(())
}
