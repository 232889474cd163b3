//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod cart_repository;
mod checkout_command;
mod grocery_fulfilment;

#[cfg(test)]
pub use cart_repository::MockCartRepository;
pub use cart_repository::{CartRepository, CartRepositoryError};
#[cfg(test)]
pub use checkout_command::MockCheckoutCommand;
pub use checkout_command::{CheckoutCommand, CheckoutConfirmation, CheckoutError};
#[cfg(test)]
pub use grocery_fulfilment::MockGroceryFulfilment;
pub use grocery_fulfilment::{
    CheckoutResult, FixtureGroceryFulfilment, GroceryFulfilment, GroceryFulfilmentError,
    PlacedOrder,
};
