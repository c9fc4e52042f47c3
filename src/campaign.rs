//! Campaign timeline: players take turns, rounds advance when the turn order
//! wraps, and notable happenings are appended as events.

use crate::errors::{CampaignError, CampaignResult};
use chrono::{DateTime, Utc};
use schema::EventKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    pub order: u32,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>, order: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            order,
        }
    }
}

/// Optional specifics attached to an event.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pokemon_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battle_result: Option<String>,
}

impl EventDetails {
    /// One-line rendering of the filled-in details, e.g. `宝可梦: 小火龙 | 地点: 武斗市`.
    pub fn summary(&self) -> Option<String> {
        let parts: Vec<String> = [
            ("宝可梦", &self.pokemon_name),
            ("道具", &self.item_name),
            ("徽章", &self.badge_name),
            ("地点", &self.location),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_ref().map(|v| format!("{}: {}", label, v)))
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" | "))
        }
    }
}

/// An event as submitted, before it gets an id and timestamp.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub round_number: u32,
    pub player_id: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub details: Option<EventDetails>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameEvent {
    pub id: String,
    pub round_number: u32,
    pub player_id: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub details: Option<EventDetails>,
    pub timestamp: DateTime<Utc>,
}

impl GameEvent {
    /// What the timeline shows under the title: the details if any, else the
    /// description.
    pub fn detail_line(&self) -> Option<String> {
        self.details
            .as_ref()
            .and_then(EventDetails::summary)
            .or_else(|| self.description.clone())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub current_round: u32,
    pub current_player_id: Option<String>,
    pub players: Vec<Player>,
    pub events: Vec<GameEvent>,
    pub is_game_started: bool,
    #[serde(default)]
    next_event_seq: u64,
}

impl Default for Campaign {
    fn default() -> Self {
        Self {
            current_round: 1,
            current_player_id: None,
            players: Vec::new(),
            events: Vec::new(),
            is_game_started: false,
            next_event_seq: 0,
        }
    }
}

impl Campaign {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a game with `players` in turn order. Clears previous events.
    pub fn start_game(&mut self, players: Vec<Player>) -> CampaignResult<()> {
        let first = players.first().ok_or(CampaignError::NoPlayers)?;
        self.current_player_id = Some(first.id.clone());
        self.current_round = 1;
        self.players = players;
        self.events.clear();
        self.is_game_started = true;
        info!(players = self.players.len(), "campaign started");
        Ok(())
    }

    pub fn end_game(&mut self) {
        self.is_game_started = false;
    }

    pub fn current_player(&self) -> Option<&Player> {
        let id = self.current_player_id.as_deref()?;
        self.players.iter().find(|p| p.id == id)
    }

    /// Passes the turn to the next player; wrapping back to the first player
    /// starts a new round.
    pub fn end_turn(&mut self) -> CampaignResult<&Player> {
        if self.players.is_empty() {
            return Err(CampaignError::NotStarted);
        }
        let current = self
            .current_player_id
            .as_deref()
            .and_then(|id| self.players.iter().position(|p| p.id == id));
        let next = current.map_or(0, |i| (i + 1) % self.players.len());

        if next == 0 {
            self.current_round += 1;
        }
        let player = &self.players[next];
        self.current_player_id = Some(player.id.clone());
        debug!(round = self.current_round, player = %player.id, "turn ended");
        Ok(player)
    }

    /// Appends an event, stamping it with a unique id and the current time.
    pub fn add_event(&mut self, event: NewEvent) -> CampaignResult<&GameEvent> {
        if event.title.trim().is_empty() {
            return Err(CampaignError::BlankTitle);
        }

        let timestamp = Utc::now();
        self.next_event_seq += 1;
        let id = format!("{}-{}", timestamp.timestamp_millis(), self.next_event_seq);

        self.events.push(GameEvent {
            id,
            round_number: event.round_number,
            player_id: event.player_id,
            title: event.title,
            description: event.description,
            kind: event.kind,
            details: event.details,
            timestamp,
        });
        Ok(&self.events[self.events.len() - 1])
    }

    /// Events grouped by round in ascending order, optionally only those of
    /// one player.
    pub fn events_by_round(&self, player_id: Option<&str>) -> BTreeMap<u32, Vec<&GameEvent>> {
        let mut rounds: BTreeMap<u32, Vec<&GameEvent>> = BTreeMap::new();
        for event in self
            .events
            .iter()
            .filter(|e| player_id.map_or(true, |id| e.player_id == id))
        {
            rounds.entry(event.round_number).or_default().push(event);
        }
        rounds
    }
}
