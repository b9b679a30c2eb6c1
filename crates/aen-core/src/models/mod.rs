mod file;
mod object;
mod search;
mod trace;

pub use file::{AenFile, FileTarget};
pub use object::{AenCategory, AenLocalizedValue, AenObject, AenProperty, NewObject, View};
pub use search::{QueryResult, SearchRequest};
pub use trace::RequestLogEntry;
