use alloc::vec::Vec;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::random::GameRng;
use crate::*;

/// Card faces, one pair of each ends up in the deck.
pub const SYMBOLS: [&str; 8] = ["🚀", "🌟", "🎮", "🎯", "🎲", "🎭", "🎨", "🎪"];

pub const DECK_SIZE: usize = SYMBOLS.len() * 2;

/// How long a matching pair stays face up before it locks in.
pub const MATCH_DELAY_MS: u32 = 500;

/// How long a mismatched pair stays face up before it flips back.
pub const MISMATCH_DELAY_MS: u32 = 1000;

/// Identity of a card in the unshuffled deck: `i` and `i + SYMBOLS.len()` form a pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u8);

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CardFlags: u8 {
        const REVEALED = 1;
        const MATCHED  = 1 << 1;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub symbol: &'static str,
    pub flags: CardFlags,
}

impl Card {
    pub fn is_revealed(&self) -> bool {
        self.flags.contains(CardFlags::REVEALED)
    }

    pub fn is_matched(&self) -> bool {
        self.flags.contains(CardFlags::MATCHED)
    }

    /// Whether the face is visible, either for this turn or for good.
    pub fn is_face_up(&self) -> bool {
        self.flags.intersects(CardFlags::REVEALED | CardFlags::MATCHED)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryState {
    NotStarted,
    Idle,
    OneRevealed,
    Evaluating,
    Won,
}

/// A pending resolution of the two face-up cards, to be fed back after [`ResolveTicket::delay_ms`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveTicket {
    epoch: Epoch,
    turn: u32,
    is_match: bool,
}

impl ResolveTicket {
    pub const fn epoch(self) -> Epoch {
        self.epoch
    }

    pub const fn is_match(self) -> bool {
        self.is_match
    }

    pub const fn delay_ms(self) -> u32 {
        if self.is_match {
            MATCH_DELAY_MS
        } else {
            MISMATCH_DELAY_MS
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Evaluating(ResolveTicket),
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResolveOutcome {
    Stale,
    Matched,
    Mismatched,
    Won,
}

impl ResolveOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Stale)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MemoryEvent {
    Start,
    Reveal(CardId),
    Resolve(ResolveTicket),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MemoryOutcome {
    Started,
    Reveal(RevealOutcome),
    Resolve(ResolveOutcome),
}

impl MemoryOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Started => true,
            Self::Reveal(outcome) => outcome.has_update(),
            Self::Resolve(outcome) => outcome.has_update(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MemoryGame {
    rng: GameRng,
    cards: Vec<Card>,
    picks: SmallVec<[usize; 2]>,
    moves: u32,
    started: bool,
    epoch: Epoch,
}

impl MemoryGame {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
            cards: Vec::new(),
            picks: SmallVec::new(),
            moves: 0,
            started: false,
            epoch: Epoch::default(),
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn state(&self) -> MemoryState {
        if !self.started {
            MemoryState::NotStarted
        } else if self.cards.iter().all(Card::is_matched) {
            MemoryState::Won
        } else {
            match self.picks.len() {
                0 => MemoryState::Idle,
                1 => MemoryState::OneRevealed,
                _ => MemoryState::Evaluating,
            }
        }
    }

    pub fn is_won(&self) -> bool {
        matches!(self.state(), MemoryState::Won)
    }

    pub fn unmatched_count(&self) -> usize {
        self.cards.iter().filter(|card| !card.is_matched()).count()
    }

    /// Deals a freshly shuffled deck, invalidating any resolution still in flight.
    pub fn start(&mut self) {
        let mut cards: Vec<Card> = SYMBOLS
            .iter()
            .chain(SYMBOLS.iter())
            .enumerate()
            .map(|(index, &symbol)| Card {
                id: CardId(index as u8),
                symbol,
                flags: CardFlags::empty(),
            })
            .collect();
        self.rng.shuffle(&mut cards);

        self.cards = cards;
        self.picks.clear();
        self.moves = 0;
        self.started = true;
        self.epoch.advance();
        log::debug!("memory: new deck dealt, epoch {:?}", self.epoch);
    }

    pub fn reveal(&mut self, id: CardId) -> Result<RevealOutcome> {
        if usize::from(id.0) >= DECK_SIZE {
            return Err(HubError::InvalidCard);
        }

        if !matches!(self.state(), MemoryState::Idle | MemoryState::OneRevealed) {
            return Ok(RevealOutcome::NoChange);
        }

        let Some(pos) = self.cards.iter().position(|card| card.id == id) else {
            return Err(HubError::InvalidCard);
        };

        let card = &mut self.cards[pos];
        if card.is_face_up() {
            return Ok(RevealOutcome::NoChange);
        }
        card.flags.insert(CardFlags::REVEALED);
        self.picks.push(pos);

        let [first, second] = self.picks[..] else {
            return Ok(RevealOutcome::Revealed);
        };

        self.moves += 1;
        let is_match = self.cards[first].symbol == self.cards[second].symbol;
        log::trace!(
            "memory: move {} picked {} and {}",
            self.moves,
            self.cards[first].symbol,
            self.cards[second].symbol
        );

        Ok(RevealOutcome::Evaluating(ResolveTicket {
            epoch: self.epoch,
            turn: self.moves,
            is_match,
        }))
    }

    pub fn resolve(&mut self, ticket: ResolveTicket) -> ResolveOutcome {
        if !ticket.epoch.is_current(self.epoch)
            || ticket.turn != self.moves
            || self.picks.len() != 2
        {
            log::debug!("memory: discarding stale resolution from {:?}", ticket.epoch);
            return ResolveOutcome::Stale;
        }

        let is_match = self.cards[self.picks[0]].symbol == self.cards[self.picks[1]].symbol;
        for pos in self.picks.drain(..) {
            let card = &mut self.cards[pos];
            card.flags.remove(CardFlags::REVEALED);
            if is_match {
                card.flags.insert(CardFlags::MATCHED);
            }
        }

        if !is_match {
            ResolveOutcome::Mismatched
        } else if self.is_won() {
            log::debug!("memory: won in {} moves", self.moves);
            ResolveOutcome::Won
        } else {
            ResolveOutcome::Matched
        }
    }
}

impl StateMachine for MemoryGame {
    type Event = MemoryEvent;
    type Outcome = Result<MemoryOutcome>;

    fn apply(&mut self, event: MemoryEvent) -> Self::Outcome {
        Ok(match event {
            MemoryEvent::Start => {
                self.start();
                MemoryOutcome::Started
            }
            MemoryEvent::Reveal(id) => MemoryOutcome::Reveal(self.reveal(id)?),
            MemoryEvent::Resolve(ticket) => MemoryOutcome::Resolve(self.resolve(ticket)),
        })
    }
}
