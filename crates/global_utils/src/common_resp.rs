use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Empty {}

pub trait ErrorIntoStatusMsgTuple {
    fn into_status_msg_tuple(self) -> (axum::http::StatusCode, String);
}
