mod cart;
mod product;

pub use cart::{AddToCart, Cart, LineItem};
pub use product::{Product, ProductPayload};
