pub mod request;

pub use request::{InputMessage, LocationType, ResponseRequest, Tool, UserLocation, WebSearchTool};
