mod error;
mod mock_data;
mod operations;
mod requests;
mod types;

pub use error::{FieldError, TicketError, ValidationErrors};
pub use mock_data::{default_priorities, demo_tickets};
pub use operations::{
    join_priorities, validate_description, validate_title, TITLE_MAX_LENGTH, TITLE_MIN_LENGTH,
};
pub use requests::{CreateTicketRequest, UpdateTicketRequest, DESCRIPTION_FIELD, TITLE_FIELD};
pub use types::{
    NewTicket, Priority, Ticket, TicketChanges, TicketDetails, STATUS_FINISHED, STATUS_OPEN,
};
