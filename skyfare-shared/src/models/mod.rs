pub mod basket;
pub mod identity;
pub mod profile;
pub mod ticket;

pub use basket::{Baggage, BasketDraft, BasketItem};
pub use identity::Identity;
pub use profile::{NewProfile, Profile};
pub use ticket::{SpecialOffer, Ticket};
