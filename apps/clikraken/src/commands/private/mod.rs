//! Commands backed by the private API, all of them need credentials

pub mod balance;
pub mod cancel;
pub mod deposit;
pub mod ledgers;
pub mod orders;
pub mod place;
pub mod positions;
pub mod trades;
pub mod withdraw;
