//! Wire-level models shared between the server and API consumers

mod event;
mod registration;
mod user;

pub use event::{Event, EventCreate, EventDetail, EventStatus, EventUpdate, InvalidEventStatus};
pub use registration::{
    EventRegistrationCreate, Registration, RegistrationCreate, RegistrationCreated,
    RegistrationList, RegistrationStatus,
};
pub use user::{User, UserCreate};
