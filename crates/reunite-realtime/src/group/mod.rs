//! Named broadcast groups and the membership table behind them.

pub mod membership;
pub mod name;

pub use membership::GroupMembership;
pub use name::Group;
