mod search;

#[doc(inline)]
pub use search::SearchOutcome;
#[doc(inline)]
pub use search::SearchStats;
#[doc(inline)]
pub use search::Spot;
#[doc(inline)]
pub use search::find_best_spot;
