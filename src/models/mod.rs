mod company;
mod id;
mod investment;

pub use company::Company;
pub use id::{Id, IdKind};
pub use investment::{Holding, Investment};
