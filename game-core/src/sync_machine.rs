use game_types::{ProgressRecord, ProgressUpdate};

/// Identifies one route entry. Loads that finish after a newer entry are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteTicket {
    epoch: u64,
}

/// Identifies one push attempt. Only the ticket currently in flight may clear
/// the gate; its epoch tells whether it belongs to the current route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushTicket {
    epoch: u64,
    sequence: u64,
}

impl PushTicket {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateDecision {
    /// No route has attached an anchor yet; nothing is cached or sent.
    NotAnchored,
    /// A push is outstanding: cache the record, send nothing.
    Coalesced(ProgressRecord),
    /// Cache the record and send it under `ticket`.
    Push {
        record: ProgressRecord,
        ticket: PushTicket,
    },
}

/// Decides when a progress update is pushed and what elapsed time it carries.
///
/// Holds the elapsed-time anchor, the in-flight gate and the current route.
/// It never performs I/O; callers cache and transmit according to the
/// returned [`UpdateDecision`] and report completion through [`finish_push`].
///
/// [`finish_push`]: SyncMachine::finish_push
#[derive(Debug, Default)]
pub struct SyncMachine {
    anchor: Option<i64>,
    in_flight: Option<PushTicket>,
    epoch: u64,
    sequence: u64,
    current_game_id: Option<String>,
    current_game_name: Option<String>,
}

impl SyncMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new route. Drops the anchor; a push still outstanding from the
    /// previous route keeps the gate closed until it settles.
    pub fn enter_route(&mut self, game_id: impl Into<String>, game_name: impl Into<String>) -> RouteTicket {
        self.epoch += 1;
        self.anchor = None;
        self.current_game_id = Some(game_id.into());
        self.current_game_name = Some(game_name.into());

        RouteTicket { epoch: self.epoch }
    }

    pub fn is_current(&self, ticket: RouteTicket) -> bool {
        ticket.epoch == self.epoch
    }

    /// Attach the anchor once the route's load has settled, whatever its outcome.
    /// Returns false if the route has since been replaced.
    pub fn attach_anchor(&mut self, ticket: RouteTicket, now: i64) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.anchor = Some(now);
        true
    }

    pub fn begin_update(&mut self, update: ProgressUpdate, now: i64) -> UpdateDecision {
        let Some(anchor) = self.anchor else {
            return UpdateDecision::NotAnchored;
        };

        let record = ProgressRecord::stamped(update, now, elapsed_seconds(anchor, now));

        // The outstanding push will be superseded by the next one; the cache
        // already carries this record.
        if self.in_flight.is_some() {
            return UpdateDecision::Coalesced(record);
        }

        self.anchor = Some(now);
        self.sequence += 1;
        let ticket = PushTicket {
            epoch: self.epoch,
            sequence: self.sequence,
        };
        self.in_flight = Some(ticket);

        UpdateDecision::Push { record, ticket }
    }

    /// Clear the gate if `ticket` is the push in flight. Returns false for
    /// duplicate or unknown completions.
    pub fn finish_push(&mut self, ticket: PushTicket) -> bool {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    /// Whether `ticket` was issued under the current route.
    pub fn owns_push(&self, ticket: PushTicket) -> bool {
        ticket.epoch == self.epoch
    }

    pub fn anchor(&self) -> Option<i64> {
        self.anchor
    }

    pub fn push_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn current_game_id(&self) -> Option<&str> {
        self.current_game_id.as_deref()
    }

    pub fn current_game_name(&self) -> Option<&str> {
        self.current_game_name.as_deref()
    }
}

/// Whole seconds between `anchor` and `now`; never negative.
pub fn elapsed_seconds(anchor: i64, now: i64) -> u32 {
    let millis = now.saturating_sub(anchor).max(0);
    u32::try_from(millis / 1000).unwrap_or(u32::MAX)
}
