pub mod inbound;
pub mod outbound;

pub use inbound::{decode, InboundEvent, WireEvent};
pub use outbound::OutboundAction;
