pub mod cart;
pub mod content;
pub mod coupon;
pub mod customer;
pub mod inventory;
pub mod order;
pub mod page;
pub mod product;
pub mod team;
