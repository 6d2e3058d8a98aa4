//! Digest core: pure state machine, view-model helpers and summary markup model.
mod effect;
mod markup;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, COPY_ACK_WINDOW};
pub use markup::{Block, Inline, ListMarker, SummaryDocument};
pub use msg::Msg;
pub use state::{AckId, AppState, Phase, RenderMode, RequestId};
pub use update::update;
pub use view_model::AppViewModel;
