//! Projection of the activity directory into the list region, the activity
//! selector, and their HTML markup.

pub mod markup;
pub mod render;

pub use render::{
    render, ActivityCard, DisplayState, ListRegion, ParticipantRow, RenderedDirectory,
    SelectOption, UnregisterAction, FETCH_FAILURE_MESSAGE, LOADING_MESSAGE,
    SELECT_PLACEHOLDER_LABEL,
};
