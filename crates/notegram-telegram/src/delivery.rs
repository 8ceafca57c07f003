// SPDX-FileCopyrightText: 2026 Notegram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delivery of one note to one bot/chat pair.
//!
//! [`prepare`] turns a [`Document`] into a [`DeliveryPlan`] without touching
//! the network. [`DeliveryOrchestrator`] then walks the plan one call at a
//! time and stops at the first failure.

use notegram_core::error::NotegramError;
use notegram_core::traits::Transport;
use notegram_core::types::{BotTarget, DeliveryState, DeliveryUnit, Document};
use tracing::{debug, info, warn};

use crate::batch::batch;
use crate::client::{ApiSettings, BotApi, check_credentials};
use crate::images::strip_images;
use crate::markdown::format_for_telegram;
use crate::media::media_items;

/// Text and media calls planned for one send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryPlan {
    /// MarkdownV2 text, sent as the message or as the first caption.
    pub text: String,
    /// Media units in send order. Empty for a text-only note.
    pub units: Vec<DeliveryUnit>,
}

impl DeliveryPlan {
    /// Number of Bot API calls the plan needs.
    pub fn call_count(&self) -> usize {
        self.units.len().max(1)
    }

    pub fn media_count(&self) -> usize {
        self.units.iter().map(DeliveryUnit::len).sum()
    }
}

/// Source markdown for a note: bold title, blank line, body.
pub fn compose(title: &str, body: &str) -> String {
    let title = title.trim();
    if title.is_empty() {
        body.to_string()
    } else {
        format!("**{title}**\n\n{body}")
    }
}

/// Builds the plan for `document`.
pub fn prepare(document: Document) -> DeliveryPlan {
    let body = strip_images(&document.body);
    let text = format_for_telegram(&compose(&document.title, &body));
    let items = media_items(document.attachments);
    let caption = (!items.is_empty()).then(|| text.clone());
    let units = batch(items, caption);
    DeliveryPlan { text, units }
}

/// Summary of a successful delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub bot: String,
    pub calls: usize,
    pub media: usize,
}

/// Per-send state machine: `Idle → Preparing → Sending → Succeeded | Failed`.
///
/// Built fresh for every send. Calls are issued sequentially and the first
/// failure aborts the remaining units.
pub struct DeliveryOrchestrator<'a> {
    api: BotApi<'a>,
    state: DeliveryState,
    calls_made: usize,
}

impl<'a> DeliveryOrchestrator<'a> {
    pub fn new(
        transport: &'a dyn Transport,
        settings: &'a ApiSettings,
        target: &'a BotTarget,
    ) -> Self {
        Self {
            api: BotApi::new(transport, settings, target),
            state: DeliveryState::Idle,
            calls_made: 0,
        }
    }

    pub fn state(&self) -> DeliveryState {
        self.state
    }

    /// Calls attempted so far, including a failed one.
    pub fn calls_made(&self) -> usize {
        self.calls_made
    }

    fn transition(&mut self, next: DeliveryState) {
        debug!(bot = %self.api.target().name, from = %self.state, to = %next, "delivery state");
        self.state = next;
    }

    fn fail(&mut self, err: NotegramError) -> NotegramError {
        warn!(bot = %self.api.target().name, error = %err, "delivery failed");
        self.transition(DeliveryState::Failed);
        err
    }

    /// Prepares and sends `document`.
    ///
    /// Target problems (disabled bot, missing token or chat id) fail before
    /// any call is made.
    pub async fn deliver(&mut self, document: Document) -> Result<DeliveryReport, NotegramError> {
        self.transition(DeliveryState::Preparing);

        let target = self.api.target();
        if !target.enabled {
            let err = NotegramError::Config(format!("bot `{}` is disabled", target.name));
            return Err(self.fail(err));
        }
        if let Err(err) = check_credentials(target) {
            return Err(self.fail(err));
        }

        let plan = prepare(document);
        self.execute(plan).await
    }

    /// Sends an already prepared plan.
    pub async fn execute(&mut self, plan: DeliveryPlan) -> Result<DeliveryReport, NotegramError> {
        if self.state == DeliveryState::Idle {
            self.transition(DeliveryState::Preparing);
        }
        self.transition(DeliveryState::Sending);
        debug!(
            bot = %self.api.target().name,
            units = plan.units.len(),
            media = plan.media_count(),
            "sending note"
        );

        if plan.units.is_empty() {
            self.calls_made += 1;
            if let Err(err) = self.api.send_message(&plan.text).await {
                return Err(self.fail(err));
            }
        }

        for unit in &plan.units {
            self.calls_made += 1;
            let result = match unit {
                DeliveryUnit::Single { item, caption } => {
                    self.api.send_media(item, caption.as_deref()).await
                }
                DeliveryUnit::Group { items, caption } if items.len() == 1 => {
                    self.api.send_media(&items[0], caption.as_deref()).await
                }
                DeliveryUnit::Group { items, caption } => {
                    self.api.send_media_group(items, caption.as_deref()).await
                }
            };
            if let Err(err) = result {
                return Err(self.fail(err));
            }
        }

        self.transition(DeliveryState::Succeeded);
        let report = DeliveryReport {
            bot: self.api.target().name.clone(),
            calls: self.calls_made,
            media: plan.media_count(),
        };
        info!(bot = %report.bot, calls = report.calls, media = report.media, "note delivered");
        Ok(report)
    }
}
