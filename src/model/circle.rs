use serde::{Deserialize, Serialize};

use super::context::{BlockHeight, TxContext};
use super::ids::Id;
use super::principal::Principal;

/// A named expense-sharing group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Circle {
    pub id: Id<Circle>,
    pub name: String,
    pub creator: Principal,
    pub created_at: BlockHeight,
    pub member_count: u32,
    pub is_active: bool,
}

impl Circle {
    /// A freshly created circle: the creator is its only member.
    pub fn create(id: Id<Circle>, name: String, ctx: &TxContext) -> Self {
        Self {
            id,
            name,
            creator: ctx.sender.clone(),
            created_at: ctx.block_height,
            member_count: 1,
            is_active: true,
        }
    }

    pub fn view(&self) -> CircleView {
        CircleView {
            name: self.name.clone(),
            creator: self.creator.clone(),
            created_at: self.created_at,
            member_count: self.member_count,
            is_active: self.is_active,
        }
    }
}

/// Read-only snapshot returned by `get-circle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CircleView {
    pub name: String,
    pub creator: Principal,
    pub created_at: BlockHeight,
    pub member_count: u32,
    pub is_active: bool,
}
