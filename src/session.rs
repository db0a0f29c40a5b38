//! Presentation state for one interactive session.
//!
//! The aggregator, coach and renderer are stateless. Everything the user sees between commands
//! (which tab is active, the chat transcript, the cached report and the latest meme) lives here and
//! is owned by whoever drives the session.

use crate::analysis::{aggregate, analyze, AggregateResult, Analysis};
use crate::coach;
use crate::meme::{MemeImage, MemeRenderer};
use crate::model::Transaction;
use crate::source::TransactionSource;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use tracing::{debug, warn};

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    /// Spend Sensei, the chat coach.
    #[default]
    Coach,
    /// Mind Over Money, the spending report.
    Habits,
}

serde_plain::derive_display_from_serialize!(Tab);
serde_plain::derive_fromstr_from_deserialize!(Tab);

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Bot,
}

/// One line of the chat transcript.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Debug)]
pub struct Session {
    transactions: Vec<Transaction>,
    period_count: NonZeroU32,
    currency_symbol: String,
    renderer: MemeRenderer,
    active_tab: Tab,
    transcript: Vec<Message>,
    analysis: Option<Analysis>,
    meme: Option<MemeImage>,
}

impl Session {
    pub fn new(
        source: &dyn TransactionSource,
        renderer: MemeRenderer,
        period_count: NonZeroU32,
        currency_symbol: impl Into<String>,
    ) -> Self {
        Self {
            transactions: source.transactions(),
            period_count,
            currency_symbol: currency_symbol.into(),
            renderer,
            active_tab: Tab::default(),
            transcript: Vec::new(),
            analysis: None,
            meme: None,
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        self.analysis.as_ref()
    }

    pub fn meme(&self) -> Option<&MemeImage> {
        self.meme.as_ref()
    }

    /// Switches to `tab`. The first time the habits tab is shown its report is generated.
    pub fn activate(&mut self, tab: Tab) -> AggregateResult<()> {
        debug!("Switching from the {} tab to the {tab} tab", self.active_tab);
        self.active_tab = tab;
        if tab == Tab::Habits && self.analysis.is_none() {
            self.generate_analysis()?;
        }
        Ok(())
    }

    /// Recomputes the spending report from the full transaction list.
    pub fn generate_analysis(&mut self) -> AggregateResult<&Analysis> {
        let aggregation = aggregate(&self.transactions, self.period_count)?;
        let analysis = analyze(&aggregation, &self.currency_symbol);
        let analysis: &Analysis = self.analysis.insert(analysis);
        Ok(analysis)
    }

    /// Sends `text` to the coach. Blank messages are ignored and return `None`, otherwise the
    /// message and the coach's reply are added to the transcript and the reply is returned.
    pub fn send(&mut self, text: &str) -> Option<String> {
        let reply = coach::reply(text, &self.currency_symbol)?;
        self.transcript.push(Message {
            role: Role::User,
            content: text.to_string(),
        });
        self.transcript.push(Message {
            role: Role::Bot,
            content: reply.clone(),
        });
        Some(reply)
    }

    /// Renders a new meme for the latest transaction, replacing the previous one. On failure the
    /// meme is cleared so that a fallback can be shown.
    pub fn refresh_meme<R: Rng>(&mut self, rng: &mut R) -> Option<&MemeImage> {
        self.meme = match self.transactions.first() {
            Some(latest) => self.renderer.render(latest, rng).ok(),
            None => {
                warn!("There are no transactions to roast");
                None
            }
        };
        self.meme.as_ref()
    }
}
