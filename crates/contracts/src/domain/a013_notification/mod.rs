pub mod dto;

pub use dto::{
    DeviceToken, DispatchOutcome, NotificationLog, NotificationType, SaveTokenRequest,
    SendTargetedRequest, SendToAllRequest,
};
