pub mod classify;
pub mod etl;
pub mod grouping;
pub mod layout;
pub mod pipeline;

pub use crate::domain::model::{
    Record, RenderedReport, ReportLayout, Role, RolePools, Sheet, Team, TeamRoster,
};
pub use crate::domain::ports::{
    Canvas, ConfigProvider, Pipeline, Storage, TextStyle, WorkbookReader,
};
pub use crate::utils::error::Result;
