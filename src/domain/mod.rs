pub mod feed;
pub mod theme;
pub mod topic;
pub mod view;

pub use feed::{CategoryCounts, FeedDocument, StatsSummary};
pub use theme::Theme;
pub use topic::{Article, Topic};
pub use view::{FilterCategory, SortMode, ViewState};
