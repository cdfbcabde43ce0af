use std::cell::Cell;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::OrderConfirmation;

/// Source of the current time, injectable for tests.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Delivery progress of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
}

/// Seconds after placement at which each status is reached.
pub const STATUS_TIMELINE: [(OrderStatus, i64); 4] = [
    (OrderStatus::Confirmed, 0),
    (OrderStatus::Preparing, 5),
    (OrderStatus::OutForDelivery, 10),
    (OrderStatus::Delivered, 15),
];

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
    ];

    /// The following status, or `None` once delivered.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::OutForDelivery),
            OrderStatus::OutForDelivery => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::OutForDelivery => "Out For Delivery",
            OrderStatus::Delivered => "Delivered",
        }
    }

    /// Status reached after `elapsed` on the timeline.
    pub fn at_elapsed(elapsed: Duration) -> OrderStatus {
        STATUS_TIMELINE
            .iter()
            .rev()
            .find(|(_, secs)| elapsed >= Duration::seconds(*secs))
            .map(|(status, _)| *status)
            .unwrap_or(OrderStatus::Confirmed)
    }

    fn reached_after(&self) -> Duration {
        STATUS_TIMELINE
            .iter()
            .find(|(status, _)| status == self)
            .map(|(_, secs)| Duration::seconds(*secs))
            .unwrap_or_else(Duration::zero)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Drives an order through its statuses from elapsed time or explicit events.
///
/// The reported status is the later of the timeline and any manual advances,
/// so it never moves backwards.
pub struct OrderTracker<C: Clock> {
    clock: C,
    started_at: DateTime<Utc>,
    advanced_to: OrderStatus,
}

impl<C: Clock> OrderTracker<C> {
    /// Start tracking now, at `Confirmed`.
    pub fn start(clock: C) -> Self {
        let started_at = clock.now();
        Self {
            clock,
            started_at,
            advanced_to: OrderStatus::Confirmed,
        }
    }

    /// Track an existing order from its placement time.
    pub fn for_order(order: &OrderConfirmation, clock: C) -> Self {
        Self {
            clock,
            started_at: order.created_at,
            advanced_to: OrderStatus::Confirmed,
        }
    }

    pub fn status(&self) -> OrderStatus {
        let elapsed = self.clock.now() - self.started_at;
        OrderStatus::at_elapsed(elapsed).max(self.advanced_to)
    }

    /// Move one step forward regardless of the clock. Stays at `Delivered`.
    pub fn advance(&mut self) -> OrderStatus {
        let current = self.status();
        self.advanced_to = current.next().unwrap_or(current);
        self.advanced_to
    }

    pub fn is_delivered(&self) -> bool {
        self.status().is_terminal()
    }

    /// Each status with whether it has been reached.
    pub fn progress(&self) -> Vec<(OrderStatus, bool)> {
        let current = self.status();
        OrderStatus::ALL.iter().map(|s| (*s, *s <= current)).collect()
    }

    /// Time until the timeline reaches the next status, if any.
    pub fn time_until_next(&self) -> Option<Duration> {
        let next = self.status().next()?;
        let due = self.started_at + next.reached_after();
        Some((due - self.clock.now()).max(Duration::zero()))
    }
}
