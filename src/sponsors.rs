//! Sponsorship webhook event core.
//!
//! The HTTP route and signature verification live with the host; this
//! module consumes already-verified sponsorship events, maps the sender's
//! GitHub account onto a player, adjusts perks through an injected
//! service, and posts announcements to the configured channel.

use serde::{Deserialize, Serialize};

use crate::metrics;
use crate::minion::errors::MinionError;
use crate::minion::types::PerkTier;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SponsorAction {
    Created,
    TierChanged,
    PendingTierChange,
    Cancelled,
}

/// Verified sponsorship event, decoded from the webhook payload subset the
/// core cares about.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SponsorEvent {
    pub action: SponsorAction,
    pub sender_login: String,
    pub sender_id: String,
    /// Current sponsorship tier name, e.g. "$14 a month".
    pub tier_name: String,
    /// Previous tier name, present for tier-change actions.
    #[serde(default)]
    pub previous_tier_name: Option<String>,
}

impl SponsorEvent {
    /// Decode the payload subset from a webhook body. Signature
    /// verification happens upstream; this only parses.
    pub fn from_json(payload: &str) -> Result<Self, MinionError> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// Maps a GitHub account id onto a player id, when linked.
pub trait SponsorDirectory {
    fn user_id_for_github(&self, github_id: &str) -> Result<Option<String>, MinionError>;
}

/// Applies perk changes to a player.
pub trait PerkService {
    fn give_perks(&self, user_id: &str, tier: PerkTier) -> Result<(), MinionError>;
    fn change_tier(&self, user_id: &str, from: PerkTier, to: PerkTier)
        -> Result<(), MinionError>;
    fn remove_perks(&self, user_id: &str) -> Result<(), MinionError>;
}

/// Posts announcement messages to a channel.
pub trait ChannelNotifier {
    fn send(&self, channel_id: &str, content: &str);
}

/// Derive the perk tier from a sponsorship tier name by its leading dollar
/// amount ("$14 a month" -> tier four). Unparseable names fall back to the
/// lowest tier.
pub fn parse_tier_from_name(name: &str) -> PerkTier {
    let amount: u32 = name
        .trim()
        .strip_prefix('$')
        .map(|rest| {
            rest.chars()
                .take_while(|c| c.is_ascii_digit())
                .collect::<String>()
        })
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(0);
    match amount {
        a if a >= 46 => PerkTier::Six,
        a if a >= 23 => PerkTier::Five,
        a if a >= 14 => PerkTier::Four,
        a if a >= 6 => PerkTier::Three,
        a if a >= 3 => PerkTier::Two,
        _ => PerkTier::One,
    }
}

/// Announcements use the tier number offset by one, matching the public
/// sponsor tier naming rather than the internal perk ladder.
fn announced_tier(tier: PerkTier) -> u8 {
    tier.number().saturating_sub(1)
}

/// Handle one verified sponsorship event.
pub fn handle_sponsor_event(
    event: &SponsorEvent,
    directory: &dyn SponsorDirectory,
    perks: &dyn PerkService,
    notifier: &dyn ChannelNotifier,
    announce_channel: &str,
) -> Result<(), MinionError> {
    metrics::inc_sponsor_events();
    let user_id = directory.user_id_for_github(&event.sender_id)?;

    match event.action {
        SponsorAction::Created => {
            let tier = parse_tier_from_name(&event.tier_name);
            notifier.send(
                announce_channel,
                &format!(
                    "{}[{}] became a Tier {} sponsor.",
                    event.sender_login,
                    event.sender_id,
                    announced_tier(tier)
                ),
            );
            if let Some(user_id) = user_id {
                perks.give_perks(&user_id, tier)?;
            }
        }
        SponsorAction::TierChanged | SponsorAction::PendingTierChange => {
            let from = event
                .previous_tier_name
                .as_deref()
                .map(parse_tier_from_name)
                .unwrap_or(PerkTier::One);
            let to = parse_tier_from_name(&event.tier_name);
            notifier.send(
                announce_channel,
                &format!(
                    "{}[{}] changed their sponsorship from Tier {} to Tier {}.",
                    event.sender_login,
                    event.sender_id,
                    announced_tier(from),
                    announced_tier(to)
                ),
            );
            if let Some(user_id) = user_id {
                perks.change_tier(&user_id, from, to)?;
            }
        }
        SponsorAction::Cancelled => {
            if let Some(user_id) = &user_id {
                perks.remove_perks(user_id)?;
            }
            let tail = if user_id.is_some() {
                "Removing perks."
            } else {
                "Can't remove perks because couldn't find discord user."
            };
            notifier.send(
                announce_channel,
                &format!(
                    "{}[{}] cancelled being a Tier {} sponsor. {}",
                    event.sender_login,
                    event.sender_id,
                    announced_tier(parse_tier_from_name(&event.tier_name)),
                    tail
                ),
            );
        }
    }
    Ok(())
}
