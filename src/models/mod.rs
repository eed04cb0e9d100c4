pub mod action;
pub mod response;

pub use action::{ActionDraft, ActionPayload, ActionType, ExecuteActionRequest, Property, RestAction};
pub use response::{
    ActionApiResponse, ApiErrorDescriptor, ApiResponse, ExecutionResult, ResponseMeta,
};
