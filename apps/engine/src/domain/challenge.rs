//! Passing, blocking and challenging: the bluff contest.

use tracing::debug;

use super::actions::BlockScope;
use super::elimination::demand_card;
use super::players::Card;
use super::resolver::{proceed_after_loss, resolve_action};
use super::state::{
    phase_mismatch, require_living, require_pending, require_pending_mut, ChallengeContext,
    LogTone, LoseReason, MatchState, TurnState,
};
use super::turns::end_turn;
use super::Role;
use crate::errors::domain::{DomainError, ValidationKind};

/// Every living player except `excluded` has voted.
pub fn consensus_reached(state: &MatchState, excluded: &str) -> bool {
    let Some(pending) = state.pending.as_ref() else {
        return false;
    };
    state
        .living()
        .filter(|p| p.id != excluded)
        .all(|p| pending.votes.contains(&p.id))
}

fn record_vote(state: &mut MatchState, player_id: &str, excluded: &str) -> Result<(), DomainError> {
    require_living(state, player_id)?;
    if player_id == excluded {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("{player_id} cannot vote on their own claim"),
        ));
    }
    let pending = require_pending_mut(state, "record_vote")?;
    if !pending.votes.insert(player_id.to_string()) {
        return Err(DomainError::validation(
            ValidationKind::AlreadyVoted,
            format!("{player_id} has already passed"),
        ));
    }
    Ok(())
}

/// Pass on the pending action. In `BLOCK_PENDING` a pass accepts the block.
pub fn pass_action(state: &mut MatchState, player_id: &str) -> Result<(), DomainError> {
    match state.turn_state {
        TurnState::ActionPending => {}
        TurnState::BlockPending => return accept_block(state, player_id),
        _ => return Err(phase_mismatch(state, "ACTION_PENDING")),
    }
    let actor_id = require_pending(state, "pass_action")?.actor_id.clone();
    record_vote(state, player_id, &actor_id)?;
    let name = state.name_of(player_id);
    state.push_log(LogTone::Neutral, format!("{name} passes."));

    if consensus_reached(state, &actor_id) {
        debug!(match_id = %state.match_id, "action unopposed");
        resolve_action(state)?;
    }
    Ok(())
}

pub fn accept_block(state: &mut MatchState, player_id: &str) -> Result<(), DomainError> {
    if state.turn_state != TurnState::BlockPending {
        return Err(phase_mismatch(state, "BLOCK_PENDING"));
    }
    let blocker_id = require_pending(state, "accept_block")?
        .blocker_id
        .clone()
        .unwrap_or_default();
    record_vote(state, player_id, &blocker_id)?;
    let name = state.name_of(player_id);
    state.push_log(LogTone::Neutral, format!("{name} accepts the block."));

    if consensus_reached(state, &blocker_id) {
        settle_blocked(state)?;
    }
    Ok(())
}

/// The block stands. Costs already paid stay paid.
pub fn settle_blocked(state: &mut MatchState) -> Result<(), DomainError> {
    let action = require_pending(state, "settle_blocked")?.action;
    state.push_log(LogTone::Warning, format!("{action} is blocked."));
    end_turn(state);
    Ok(())
}

pub fn declare_block(
    state: &mut MatchState,
    player_id: &str,
    claimed_role: Role,
) -> Result<(), DomainError> {
    if state.turn_state != TurnState::ActionPending {
        return Err(phase_mismatch(state, "ACTION_PENDING"));
    }
    require_living(state, player_id)?;
    let pending = require_pending(state, "declare_block")?;
    let spec = pending.action.spec();
    if !spec.blockable() {
        return Err(DomainError::validation(
            ValidationKind::NotBlockable,
            format!("{} cannot be blocked", pending.action),
        ));
    }
    if pending.actor_id == player_id {
        return Err(DomainError::validation(
            ValidationKind::SelfBlock,
            "Cannot block your own action",
        ));
    }
    if spec.block_scope == BlockScope::TargetOnly
        && pending.target_id.as_deref() != Some(player_id)
    {
        return Err(DomainError::validation(
            ValidationKind::NotTarget,
            format!("Only the target may block {}", pending.action),
        ));
    }
    if !spec.blocked_by.contains(&claimed_role) {
        return Err(DomainError::validation(
            ValidationKind::IllegalBlockClaim,
            format!("{claimed_role} does not block {}", pending.action),
        ));
    }

    let action = pending.action;
    let pending = require_pending_mut(state, "declare_block")?;
    pending.blocker_id = Some(player_id.to_string());
    pending.block_claim = Some(claimed_role);
    pending.votes.clear();
    let name = state.name_of(player_id);
    state.push_log(
        LogTone::Warning,
        format!("{name} blocks {action} claiming {claimed_role}."),
    );
    state.turn_state = TurnState::BlockPending;
    Ok(())
}

/// Accuse the current claimant. In `ACTION_PENDING` that is the actor; in
/// `BLOCK_PENDING` it is the blocker.
pub fn challenge(state: &mut MatchState, player_id: &str) -> Result<(), DomainError> {
    let pending = match state.turn_state {
        TurnState::ActionPending | TurnState::BlockPending => require_pending(state, "challenge")?,
        _ => return Err(phase_mismatch(state, "ACTION_PENDING or BLOCK_PENDING")),
    };
    let is_block_challenge = state.turn_state == TurnState::BlockPending;
    let (accused_id, claim) = if is_block_challenge {
        match (&pending.blocker_id, pending.block_claim) {
            (Some(blocker), Some(claim)) => (blocker.clone(), claim),
            _ => return Err(DomainError::validation_other("Block has no claimant")),
        }
    } else {
        let claim = pending.action.spec().claim.ok_or_else(|| {
            DomainError::validation(
                ValidationKind::NotChallengeable,
                format!("{} makes no claim", pending.action),
            )
        })?;
        (pending.actor_id.clone(), claim)
    };
    require_living(state, player_id)?;
    if accused_id == player_id {
        return Err(DomainError::validation(
            ValidationKind::SelfChallenge,
            "Cannot challenge your own claim",
        ));
    }

    let challenger = state.name_of(player_id);
    let accused = state.name_of(&accused_id);
    state.push_log(
        LogTone::Warning,
        format!("{challenger} challenges {accused}'s {claim}!"),
    );
    state.turn_state = TurnState::ChallengeResolve {
        challenge: ChallengeContext {
            challenger_id: player_id.to_string(),
            accused_id,
            claim,
            is_block_challenge,
        },
    };
    Ok(())
}

fn open_challenge(state: &MatchState, player_id: &str) -> Result<ChallengeContext, DomainError> {
    let TurnState::ChallengeResolve { challenge } = &state.turn_state else {
        return Err(phase_mismatch(state, "CHALLENGE_RESOLVE"));
    };
    if challenge.accused_id != player_id {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("{player_id} is not the accused"),
        ));
    }
    Ok(challenge.clone())
}

/// Show a card. A matching live card proves the claim; any other live
/// card loses the challenge.
pub fn reveal_card(
    state: &mut MatchState,
    player_id: &str,
    card_index: usize,
) -> Result<(), DomainError> {
    let ctx = open_challenge(state, player_id)?;
    let accused = require_living(state, player_id)?;
    let role = accused.live_card(card_index)?.role;
    if role == ctx.claim {
        claim_proven(state, &ctx, card_index)
    } else {
        claim_disproven(state, &ctx)
    }
}

/// Concede without showing a card.
pub fn surrender(state: &mut MatchState, player_id: &str) -> Result<(), DomainError> {
    let ctx = open_challenge(state, player_id)?;
    claim_disproven(state, &ctx)
}

/// The proven card goes back into the deck and the accused draws a
/// replacement into the same slot; the challenger pays.
fn claim_proven(
    state: &mut MatchState,
    ctx: &ChallengeContext,
    card_index: usize,
) -> Result<(), DomainError> {
    state.deck.return_and_shuffle([ctx.claim]);
    let fresh = state.deck.draw()?;
    if let Some(accused) = state.player_mut(&ctx.accused_id) {
        accused.hand[card_index] = Card::face_down(fresh);
    }
    let name = state.name_of(&ctx.accused_id);
    state.push_log(
        LogTone::Success,
        format!("{name} reveals {} and draws a new card.", ctx.claim),
    );

    if ctx.is_block_challenge {
        let action = require_pending(state, "claim_proven")?.action;
        state.push_log(LogTone::Warning, format!("{action} is blocked."));
        demand_card(state, ctx.challenger_id.clone(), LoseReason::Challenge);
        Ok(())
    } else {
        proceed_after_loss(state, ctx.challenger_id.clone())
    }
}

fn claim_disproven(state: &mut MatchState, ctx: &ChallengeContext) -> Result<(), DomainError> {
    let name = state.name_of(&ctx.accused_id);
    state.push_log(
        LogTone::Danger,
        format!("{name} was bluffing {}.", ctx.claim),
    );

    if ctx.is_block_challenge {
        state.push_log(LogTone::Info, "The block fails.");
        proceed_after_loss(state, ctx.accused_id.clone())
    } else {
        let pending = require_pending_mut(state, "claim_disproven")?;
        pending.deferred_effect_pending = false;
        let action = pending.action;
        state.push_log(LogTone::Warning, format!("{action} is cancelled."));
        demand_card(state, ctx.accused_id.clone(), LoseReason::Challenge);
        Ok(())
    }
}
