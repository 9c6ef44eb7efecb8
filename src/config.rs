//! Table configuration.
//!
//! Defaults follow the classic home game: blinds 2/5, 500 chip stacks,
//! rebuys for another 500, at least three players and a 100 hand limit.

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("blinds must be positive: small {small}, big {big}")]
    ZeroBlind { small: u64, big: u64 },
    #[error("small blind {small} exceeds big blind {big}")]
    BlindOrder { small: u64, big: u64 },
    #[error("starting stack must be positive")]
    ZeroStack,
    #[error("at least two players are required, got {0}")]
    MinPlayers(usize),
    #[error("a single deck cannot deal {players} players")]
    DeckTooSmall { players: usize },
}

/// Stakes, stacks and session limits for a table.
///
/// ```
/// use holdem_rs::config::TableConfig;
///
/// let cfg = TableConfig::default().with_blinds(5, 10).with_seed(7);
/// assert_eq!(cfg.big_blind, 10);
/// cfg.validate().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct TableConfig {
    pub small_blind: u64,
    pub big_blind: u64,
    pub starting_stack: u64,
    pub rebuy_amount: u64,
    pub min_players: usize,
    pub max_hands: u64,
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: 2,
            big_blind: 5,
            starting_stack: 500,
            rebuy_amount: 500,
            min_players: 3,
            max_hands: 100,
            seed: None,
        }
    }
}

impl TableConfig {
    /// Largest roster one deck can serve: two private cards each, five shared
    /// cards and three burns.
    pub const MAX_PLAYERS: usize = (52 - 5 - 3) / 2;

    pub fn with_blinds(mut self, small: u64, big: u64) -> Self {
        self.small_blind = small;
        self.big_blind = big;
        self
    }

    pub fn with_starting_stack(mut self, stack: u64) -> Self {
        self.starting_stack = stack;
        self
    }

    pub fn with_rebuy_amount(mut self, amount: u64) -> Self {
        self.rebuy_amount = amount;
        self
    }

    pub fn with_min_players(mut self, n: usize) -> Self {
        self.min_players = n;
        self
    }

    pub fn with_max_hands(mut self, n: u64) -> Self {
        self.max_hands = n;
        self
    }

    /// Set a deterministic seed for shuffles and the opening dealer.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.small_blind == 0 || self.big_blind == 0 {
            return Err(ConfigError::ZeroBlind { small: self.small_blind, big: self.big_blind });
        }
        if self.small_blind > self.big_blind {
            return Err(ConfigError::BlindOrder { small: self.small_blind, big: self.big_blind });
        }
        if self.starting_stack == 0 {
            return Err(ConfigError::ZeroStack);
        }
        if self.min_players < 2 {
            return Err(ConfigError::MinPlayers(self.min_players));
        }
        if self.min_players > Self::MAX_PLAYERS {
            return Err(ConfigError::DeckTooSmall { players: self.min_players });
        }
        Ok(())
    }
}
