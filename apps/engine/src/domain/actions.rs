//! Declarable actions and their rule table.
//!
//! Every rule that differs between actions (cost, when the cost is paid,
//! payoff, which roles block it, which role it claims) lives in
//! [`ActionSpec`] so that resolution code never special-cases an action
//! by name for those properties.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Role;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Earn,
    Export,
    Tax,
    Steal,
    Stab,
    Exchange,
    Kill,
}

/// When an action's cost leaves the actor's purse.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CostTiming {
    /// Deducted once, at declaration; forfeited if the action fails.
    OnDeclare,
    /// Deducted once, when the action resolves successfully.
    OnSuccess,
}

/// Who may declare a block against an action.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BlockScope {
    /// Any living player other than the actor.
    AnyPlayer,
    /// Only the action's target.
    TargetOnly,
}

/// What a successful action does.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Payoff {
    /// Actor gains coins from the bank.
    Income(u32),
    /// Up to the given amount moves from target to actor.
    Transfer(u32),
    /// Target must lose a card.
    TargetLosesCard,
    /// Actor runs the exchange sub-protocol.
    Exchange,
}

impl Payoff {
    /// Coin effects land immediately; card loss and exchange are
    /// sequenced after any pending card loss.
    pub fn is_deferrable(&self) -> bool {
        matches!(self, Payoff::TargetLosesCard | Payoff::Exchange)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpec {
    pub name: &'static str,
    pub cost: u32,
    pub cost_timing: CostTiming,
    pub payoff: Payoff,
    pub targeted: bool,
    /// Role the actor claims by declaring; `None` means unchallengeable.
    pub claim: Option<Role>,
    /// Roles that may block; empty means unblockable.
    pub blocked_by: &'static [Role],
    pub block_scope: BlockScope,
}

impl ActionSpec {
    pub fn blockable(&self) -> bool {
        !self.blocked_by.is_empty()
    }

    pub fn challengeable(&self) -> bool {
        self.claim.is_some()
    }

    /// Whether other players get a chance to respond before resolution.
    pub fn contestable(&self) -> bool {
        self.blockable() || self.challengeable()
    }
}

impl ActionKind {
    pub const ALL: [ActionKind; 7] = [
        ActionKind::Earn,
        ActionKind::Export,
        ActionKind::Tax,
        ActionKind::Steal,
        ActionKind::Stab,
        ActionKind::Exchange,
        ActionKind::Kill,
    ];

    pub const fn spec(&self) -> ActionSpec {
        match self {
            ActionKind::Earn => ActionSpec {
                name: "Earn",
                cost: 0,
                cost_timing: CostTiming::OnSuccess,
                payoff: Payoff::Income(1),
                targeted: false,
                claim: None,
                blocked_by: &[],
                block_scope: BlockScope::AnyPlayer,
            },
            ActionKind::Export => ActionSpec {
                name: "Export",
                cost: 0,
                cost_timing: CostTiming::OnSuccess,
                payoff: Payoff::Income(2),
                targeted: false,
                claim: None,
                blocked_by: &[Role::Hero],
                block_scope: BlockScope::AnyPlayer,
            },
            ActionKind::Tax => ActionSpec {
                name: "Hero Bonus",
                cost: 0,
                cost_timing: CostTiming::OnSuccess,
                payoff: Payoff::Income(3),
                targeted: false,
                claim: Some(Role::Hero),
                blocked_by: &[],
                block_scope: BlockScope::AnyPlayer,
            },
            ActionKind::Steal => ActionSpec {
                name: "Steal",
                cost: 0,
                cost_timing: CostTiming::OnSuccess,
                payoff: Payoff::Transfer(super::rules::STEAL_LIMIT),
                targeted: true,
                claim: Some(Role::Robber),
                blocked_by: &[Role::Robber, Role::Riddler],
                block_scope: BlockScope::TargetOnly,
            },
            ActionKind::Stab => ActionSpec {
                name: "Stab",
                cost: 3,
                cost_timing: CostTiming::OnDeclare,
                payoff: Payoff::TargetLosesCard,
                targeted: true,
                claim: Some(Role::Monster),
                blocked_by: &[Role::Genie],
                block_scope: BlockScope::TargetOnly,
            },
            ActionKind::Exchange => ActionSpec {
                name: "Exchange",
                cost: 0,
                cost_timing: CostTiming::OnSuccess,
                payoff: Payoff::Exchange,
                targeted: false,
                claim: Some(Role::Riddler),
                blocked_by: &[],
                block_scope: BlockScope::AnyPlayer,
            },
            ActionKind::Kill => ActionSpec {
                name: "Kill",
                cost: 7,
                cost_timing: CostTiming::OnDeclare,
                payoff: Payoff::TargetLosesCard,
                targeted: true,
                claim: None,
                blocked_by: &[],
                block_scope: BlockScope::AnyPlayer,
            },
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().name)
    }
}
