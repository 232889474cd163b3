//! Wire DTOs for the grocery fulfilment `POST /api/shopping-cart` contract.

use serde::{Deserialize, Serialize};

use crate::domain::AggregatedItem;
use crate::domain::ports::PlacedOrder;

#[derive(Debug, Serialize)]
pub(super) struct ShoppingCartRequestDto<'a> {
    pub(super) items: &'a [AggregatedItem],
}

#[derive(Debug, Deserialize)]
pub(super) struct ShoppingCartResponseDto {
    pub(super) success: bool,
    pub(super) message: String,
    pub(super) order_uuid: String,
    pub(super) items: Vec<AggregatedItem>,
}

impl ShoppingCartResponseDto {
    pub(super) fn into_placed_order(self) -> Result<PlacedOrder, String> {
        if !self.success {
            return Err("service reported success=false".to_owned());
        }
        if self.order_uuid.trim().is_empty() {
            return Err("order_uuid is empty".to_owned());
        }
        Ok(PlacedOrder {
            order_id: self.order_uuid,
            message: self.message,
            items: self.items,
        })
    }
}
