//! Per-player session state: the current board and running score counters.

use derive_getters::Getters;
use derive_new::new;
use derive_more::{Display, Error};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use strictly_wordgrid::Grid;
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a player session.
pub type SessionId = String;

/// State held for one player between requests.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct PlayerSession {
    /// Session ID.
    id: SessionId,
    /// Board of the current round, if one has been dealt.
    board: Option<Grid>,
    /// Best score posted so far.
    highscore: u32,
    /// Number of finished rounds.
    nplays: u32,
}

impl PlayerSession {
    /// Creates an empty session.
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            board: None,
            highscore: 0,
            nplays: 0,
        }
    }

    /// Counts a finished round and keeps the best score.
    pub fn record_score(&mut self, score: u32) -> ScoreOutcome {
        let broke_record = score > self.highscore;
        self.nplays += 1;
        self.highscore = self.highscore.max(score);
        ScoreOutcome::new(broke_record, self.highscore, self.nplays)
    }
}

/// Result of posting a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, new)]
pub struct ScoreOutcome {
    /// Whether the score beat the previous high score.
    broke_record: bool,
    /// High score after this round.
    highscore: u32,
    /// Rounds played after this round.
    nplays: u32,
}

/// Session lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SessionError {
    /// No session with this ID exists.
    #[display("Unknown session {id}")]
    UnknownSession {
        /// The ID that was looked up.
        id: SessionId,
    },
    /// The session exists but no board has been dealt.
    #[display("Session {id} has no board; start a round first")]
    NoBoard {
        /// The session without a board.
        id: SessionId,
    },
}

/// Default idle time after which a session is dropped.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Default upper bound on stored sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Debug)]
struct Entry {
    session: PlayerSession,
    last_seen: Instant,
    /// Store-wide access counter at the last touch; orders entries for eviction.
    tick: u64,
}

impl Entry {
    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.last_seen) >= ttl
    }
}

#[derive(Debug, Default)]
struct Sessions {
    entries: HashMap<SessionId, Entry>,
    tick: u64,
}

impl Sessions {
    /// The session if it is still live, refreshing its last-seen time.
    ///
    /// An expired entry is removed on the spot.
    fn live_mut(&mut self, id: &str, ttl: Duration) -> Option<&mut PlayerSession> {
        let now = Instant::now();
        if self.entries.get(id).is_some_and(|e| e.is_expired(now, ttl)) {
            self.entries.remove(id);
            debug!(session_id = id, "Session expired");
            return None;
        }
        self.tick += 1;
        let tick = self.tick;
        let entry = self.entries.get_mut(id)?;
        entry.last_seen = now;
        entry.tick = tick;
        Some(&mut entry.session)
    }

    /// Drops expired entries, then the least recently used ones until there
    /// is room, and inserts a fresh session.
    fn insert(&mut self, ttl: Duration, max_sessions: usize) -> SessionId {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, e| !e.is_expired(now, ttl));

        while self.entries.len() >= max_sessions {
            let Some(oldest) = self
                .entries
                .iter()
                .min_by_key(|(_, e)| e.tick)
                .map(|(id, _)| id.clone())
            else {
                break;
            };
            self.entries.remove(&oldest);
        }

        let evicted = before - self.entries.len();
        if evicted > 0 {
            debug!(evicted, remaining = self.entries.len(), "Evicted sessions");
        }

        let id = uuid::Uuid::new_v4().to_string();
        self.tick += 1;
        self.entries.insert(
            id.clone(),
            Entry {
                session: PlayerSession::new(id.clone()),
                last_seen: now,
                tick: self.tick,
            },
        );
        id
    }
}

/// Manages all player sessions.
///
/// Sessions idle for longer than the TTL are dropped, and the store never
/// holds more than `max_sessions` entries: creating one past the cap evicts
/// the least recently used.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<Sessions>>,
    ttl: Duration,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_limits(DEFAULT_SESSION_TTL, DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    /// Creates an empty store with the default limits.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session store");
        Self::default()
    }

    /// Creates an empty store with the given idle TTL and capacity.
    ///
    /// A capacity of zero is treated as one.
    pub fn with_limits(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Arc::default(),
            ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Sessions> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates a new session with a random ID.
    #[instrument(skip(self))]
    pub fn create(&self) -> SessionId {
        let id = self.lock().insert(self.ttl, self.max_sessions);
        info!(session_id = %id, "Created new session");
        id
    }

    /// Returns `id` if it names a live session, otherwise creates one.
    ///
    /// The flag is `true` when a new session was created.
    #[instrument(skip(self))]
    pub fn ensure(&self, id: Option<&str>) -> (SessionId, bool) {
        let mut sessions = self.lock();
        if let Some(id) = id {
            if sessions.live_mut(id, self.ttl).is_some() {
                return (id.to_string(), false);
            }
            debug!(session_id = id, "Unknown session, issuing a new one");
        }
        let id = sessions.insert(self.ttl, self.max_sessions);
        info!(session_id = %id, "Created new session");
        (id, true)
    }

    /// Snapshot of a session.
    #[instrument(skip(self))]
    pub fn get(&self, id: &str) -> Option<PlayerSession> {
        let mut sessions = self.lock();
        let session = sessions.live_mut(id, self.ttl).map(|s| s.clone());
        if session.is_none() {
            debug!(session_id = id, "Session not found");
        }
        session
    }

    /// Replaces the session's board with `board`.
    #[instrument(skip(self, board))]
    pub fn set_board(&self, id: &str, board: Grid) -> Result<(), SessionError> {
        let mut sessions = self.lock();
        let session = sessions
            .live_mut(id, self.ttl)
            .ok_or_else(|| SessionError::UnknownSession { id: id.to_string() })?;
        session.board = Some(board);
        debug!(session_id = id, "Board dealt");
        Ok(())
    }

    /// The session's current board.
    #[instrument(skip(self))]
    pub fn board(&self, id: &str) -> Result<Grid, SessionError> {
        let mut sessions = self.lock();
        let session = sessions.live_mut(id, self.ttl).ok_or_else(|| {
            warn!(session_id = id, "Board requested for unknown session");
            SessionError::UnknownSession { id: id.to_string() }
        })?;
        session.board.clone().ok_or_else(|| {
            warn!(session_id = id, "Board requested before one was dealt");
            SessionError::NoBoard { id: id.to_string() }
        })
    }

    /// Records a finished round for the session.
    #[instrument(skip(self))]
    pub fn record_score(&self, id: &str, score: u32) -> Result<ScoreOutcome, SessionError> {
        let mut sessions = self.lock();
        let session = sessions
            .live_mut(id, self.ttl)
            .ok_or_else(|| SessionError::UnknownSession { id: id.to_string() })?;
        let outcome = session.record_score(score);
        info!(
            session_id = id,
            score,
            broke_record = outcome.broke_record,
            highscore = outcome.highscore,
            nplays = outcome.nplays,
            "Score recorded"
        );
        Ok(outcome)
    }

    /// Number of stored sessions. Expired ones count until they are swept.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Whether no sessions are stored.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }
}
