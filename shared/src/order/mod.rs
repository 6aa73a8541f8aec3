//! Order domain types shared between server and clients

pub mod command;
pub mod event;
pub mod snapshot;
pub mod types;

pub use command::{OrderCommand, OrderCommandPayload};
pub use event::{EventPayload, OrderEvent, OrderEventType, ShareAssignment};
pub use snapshot::{
    OrderItemEntry, OrderSnapshot, OrderStatus, ParticipantEntry, PaymentEntry,
    PaymentHistoryEntry,
};
pub use types::{
    CommandError, CommandErrorCode, CommandResponse, OrderItemInput, ParticipantInput,
    PaymentMethod, PaymentStatus, SplitPolicy,
};
