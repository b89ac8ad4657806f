//! Action declaration, payoffs and the exchange sub-protocol.

use tracing::debug;

use super::actions::{ActionKind, CostTiming, Payoff};
use super::elimination::demand_card;
use super::players::{Card, PlayerId};
use super::rules::{EXCHANGE_DRAW, FORCED_KILL_THRESHOLD};
use super::state::{
    phase_mismatch, require_pending, require_pending_mut, LogTone, LoseReason, MatchState,
    PendingAction, TurnState,
};
use super::turns::end_turn;
use crate::errors::domain::{DomainError, ValidationKind};

fn lose_reason(action: ActionKind) -> LoseReason {
    match action {
        ActionKind::Kill => LoseReason::Kill,
        _ => LoseReason::Stab,
    }
}

/// `IDLE` handler. Validates the declaration, charges on-declare costs and
/// either resolves at once (uncontestable actions) or opens the floor.
pub fn declare_action(
    state: &mut MatchState,
    player_id: &str,
    action: ActionKind,
    target_id: Option<PlayerId>,
) -> Result<(), DomainError> {
    if state.turn_state != TurnState::Idle {
        return Err(phase_mismatch(state, "IDLE"));
    }
    let actor = state
        .current_player()
        .ok_or_else(|| DomainError::validation_other("No current player"))?;
    if actor.id != player_id {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("It is {}'s turn", actor.name),
        ));
    }
    let spec = action.spec();
    if actor.coins >= FORCED_KILL_THRESHOLD && action != ActionKind::Kill {
        return Err(DomainError::validation(
            ValidationKind::MustKill,
            format!("{} holds {} coins and must kill", actor.name, actor.coins),
        ));
    }
    if actor.coins < spec.cost {
        return Err(DomainError::validation(
            ValidationKind::InsufficientCoins,
            format!("{action} costs {}, {} has {}", spec.cost, actor.name, actor.coins),
        ));
    }
    match (&target_id, spec.targeted) {
        (Some(target), true) => {
            let valid = target != player_id
                && state.player(target).is_some_and(|p| p.is_alive());
            if !valid {
                return Err(DomainError::validation(
                    ValidationKind::InvalidTarget,
                    format!("{target} cannot be targeted by {action}"),
                ));
            }
        }
        (None, true) => {
            return Err(DomainError::validation(
                ValidationKind::InvalidTarget,
                format!("{action} needs a target"),
            ));
        }
        (Some(_), false) => {
            return Err(DomainError::validation(
                ValidationKind::InvalidTarget,
                format!("{action} takes no target"),
            ));
        }
        (None, false) => {}
    }

    let actor_id = actor.id.clone();
    let actor_name = actor.name.clone();
    if spec.cost_timing == CostTiming::OnDeclare && spec.cost > 0 {
        if let Some(actor) = state.player_mut(&actor_id) {
            actor.coins -= spec.cost;
        }
    }
    let text = match &target_id {
        Some(t) => format!("{actor_name} declares {action} on {}.", state.name_of(t)),
        None => format!("{actor_name} declares {action}."),
    };
    state.push_log(LogTone::Info, text);
    debug!(match_id = %state.match_id, actor = %actor_id, ?action, "action declared");

    state.pending = Some(PendingAction::new(action, actor_id, target_id));
    if spec.contestable() {
        state.turn_state = TurnState::ActionPending;
        Ok(())
    } else {
        resolve_action(state)
    }
}

/// Charges any on-success cost and applies coin payoffs. Returns true when
/// the action still owes a card loss or an exchange.
fn apply_immediate_payoff(state: &mut MatchState) -> Result<bool, DomainError> {
    let pending = require_pending(state, "apply_immediate_payoff")?.clone();
    let spec = pending.action.spec();

    if spec.cost_timing == CostTiming::OnSuccess && spec.cost > 0 {
        if let Some(actor) = state.player_mut(&pending.actor_id) {
            actor.coins = actor.coins.saturating_sub(spec.cost);
        }
    }

    match spec.payoff {
        Payoff::Income(amount) => {
            let name = state.name_of(&pending.actor_id);
            if let Some(actor) = state.player_mut(&pending.actor_id) {
                actor.coins += amount;
            }
            state.push_log(LogTone::Success, format!("{name} takes {amount} coin(s)."));
        }
        Payoff::Transfer(limit) => {
            let taken = pending
                .target_id
                .as_deref()
                .and_then(|t| state.player_mut(t))
                .map(|target| {
                    let amount = target.coins.min(limit);
                    target.coins -= amount;
                    amount
                })
                .unwrap_or(0);
            if let Some(actor) = state.player_mut(&pending.actor_id) {
                actor.coins += taken;
            }
            let name = state.name_of(&pending.actor_id);
            state.push_log(LogTone::Success, format!("{name} steals {taken} coin(s)."));
        }
        Payoff::TargetLosesCard | Payoff::Exchange => {}
    }
    Ok(spec.payoff.is_deferrable())
}

/// Resolves an uncontested (or unblocked) action.
pub fn resolve_action(state: &mut MatchState) -> Result<(), DomainError> {
    if apply_immediate_payoff(state)? {
        fire_deferred_effect(state)
    } else {
        end_turn(state);
        Ok(())
    }
}

/// The action survived a challenge but `loser_id` owes a card first. Coin
/// payoffs land now; card loss and exchange wait for that flip.
pub fn proceed_after_loss(state: &mut MatchState, loser_id: PlayerId) -> Result<(), DomainError> {
    let deferred = apply_immediate_payoff(state)?;
    require_pending_mut(state, "proceed_after_loss")?.deferred_effect_pending = deferred;
    demand_card(state, loser_id, LoseReason::Challenge);
    Ok(())
}

/// Fires the card-loss or exchange half of an action. Skips it when the
/// player it depends on is gone.
pub fn fire_deferred_effect(state: &mut MatchState) -> Result<(), DomainError> {
    let pending = require_pending_mut(state, "fire_deferred_effect")?;
    pending.deferred_effect_pending = false;
    let pending = pending.clone();

    match pending.action.spec().payoff {
        Payoff::TargetLosesCard => {
            let target = pending
                .target_id
                .filter(|t| state.player(t).is_some_and(|p| p.is_alive()));
            match target {
                Some(target) => demand_card(state, target, lose_reason(pending.action)),
                None => {
                    state.push_log(
                        LogTone::Neutral,
                        format!("{} continues, but the target is already out.", pending.action),
                    );
                    end_turn(state);
                }
            }
            Ok(())
        }
        Payoff::Exchange => {
            if state.player(&pending.actor_id).is_some_and(|p| p.is_alive()) {
                begin_exchange(state)
            } else {
                end_turn(state);
                Ok(())
            }
        }
        Payoff::Income(_) | Payoff::Transfer(_) => {
            end_turn(state);
            Ok(())
        }
    }
}

/// Draws the exchange buffer and hands control to the actor.
pub fn begin_exchange(state: &mut MatchState) -> Result<(), DomainError> {
    let drawn = state.deck.draw_many(EXCHANGE_DRAW)?;
    let actor_id = require_pending(state, "begin_exchange")?.actor_id.clone();
    let name = state.name_of(&actor_id);
    state.push_log(LogTone::Info, format!("{name} draws {EXCHANGE_DRAW} cards to exchange."));
    state.turn_state = TurnState::ExchangeSelect { drawn };
    Ok(())
}

/// `EXCHANGE_SELECT` handler. `indices` address the pool formed by the
/// actor's live roles (hand order) followed by the drawn cards.
pub fn select_exchange_keep(
    state: &mut MatchState,
    player_id: &str,
    indices: &[usize],
) -> Result<(), DomainError> {
    let TurnState::ExchangeSelect { drawn } = &state.turn_state else {
        return Err(phase_mismatch(state, "EXCHANGE_SELECT"));
    };
    let drawn = drawn.clone();
    let actor_id = require_pending(state, "select_exchange_keep")?.actor_id.clone();
    if actor_id != player_id {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("{player_id} is not exchanging"),
        ));
    }
    let actor = state.player(&actor_id).ok_or_else(|| {
        DomainError::validation(ValidationKind::NotAParticipant, actor_id.clone())
    })?;
    let mut pool = actor.alive_roles();
    let keep_count = pool.len();
    pool.extend(drawn);

    let mut seen = vec![false; pool.len()];
    let valid_shape = indices.len() == keep_count
        && indices.iter().all(|&i| {
            i < pool.len() && !std::mem::replace(&mut seen[i], true)
        });
    if !valid_shape {
        return Err(DomainError::validation(
            ValidationKind::InvalidSelection,
            format!("Choose exactly {keep_count} distinct cards from {}", pool.len()),
        ));
    }

    let mut kept = indices.iter().map(|&i| pool[i]);
    let hand: Vec<Card> = actor
        .hand
        .iter()
        .map(|card| {
            if card.flipped {
                *card
            } else {
                kept.next().map(Card::face_down).unwrap_or(*card)
            }
        })
        .collect();
    let returned: Vec<_> = pool
        .iter()
        .enumerate()
        .filter(|(i, _)| !seen[*i])
        .map(|(_, role)| *role)
        .collect();

    let name = actor.name.clone();
    if let Some(actor) = state.player_mut(&actor_id) {
        actor.set_hand(hand);
    }
    state.deck.return_and_shuffle(returned);
    state.push_log(LogTone::Info, format!("{name} completes the exchange."));
    end_turn(state);
    Ok(())
}
