use async_graphql::InputObject;
use serde::Deserialize;

use crate::{engine::Move, models::domain::AnswerKey};

#[derive(Debug, Clone, Copy, Deserialize, InputObject)]
pub struct MoveItemRequest {
    pub from: u32,
    pub to: u32,
}

impl From<MoveItemRequest> for Move {
    fn from(request: MoveItemRequest) -> Self {
        Move::new(request.from as usize, request.to as usize)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, InputObject)]
pub struct SelectOptionRequest {
    pub selected: AnswerKey,
}
