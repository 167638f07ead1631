pub mod deposit;
pub mod favorite;
pub mod pay;
pub mod pay_favorite;
pub mod register;
pub mod reject;
pub mod repeat;
